use std::path::PathBuf;
use std::sync::OnceLock;

static EXE_DIR: OnceLock<PathBuf> = OnceLock::new();

/// Returns the directory containing the executable.
pub fn get_exe_dir() -> &'static PathBuf {
    EXE_DIR.get_or_init(|| {
        std::env::current_exe()
            .ok()
            .and_then(|p| p.parent().map(|p| p.to_path_buf()))
            .unwrap_or_else(|| PathBuf::from("."))
    })
}

/// Returns the logs directory: `<exe_dir>/logs/`
pub fn get_logs_dir() -> PathBuf {
    get_exe_dir().join("logs")
}

/// Returns the key-value store holding calibration and favorites: `<exe_dir>/store.json`
pub fn get_store_path() -> PathBuf {
    get_exe_dir().join("store.json")
}

/// Returns the palette catalog cache: `<cache_dir>/wheel-palette/palettes_cache.json`
///
/// `None` when the platform has no cache directory; the catalog is then always fetched.
pub fn get_catalog_cache_path() -> Option<PathBuf> {
    dirs::cache_dir().map(|dir| dir.join("wheel-palette").join("palettes_cache.json"))
}

/// Ensures all output directories exist. Call at startup.
pub fn ensure_directories() -> std::io::Result<()> {
    std::fs::create_dir_all(get_logs_dir())?;
    Ok(())
}
