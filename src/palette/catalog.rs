//! Palette catalog loading.
//!
//! The catalog is a JSON array of palettes, each an array of `#rrggbb` strings.
//! The first five colors of each row form a palette; rows that are too short or
//! contain malformed colors are skipped.

use std::fs;
use std::path::PathBuf;
use std::time::Duration;

use anyhow::{anyhow, Context, Result};

use crate::color::transform::hex_to_hsv;
use crate::palette::types::{ColorTriple, Palette, PALETTE_SIZE};

/// Supplies the palette catalog.
pub trait CatalogSource {
    fn load_catalog(&self) -> Result<Vec<Palette>>;
}

/// Converts raw hex rows into palettes named `Palette {n}` after their row (1-based).
pub fn palettes_from_hex_rows(rows: &[Vec<String>]) -> Vec<Palette> {
    rows.iter()
        .enumerate()
        .filter_map(|(i, row)| {
            let hexes = row.get(..PALETTE_SIZE)?;
            let colors: Vec<ColorTriple> = hexes.iter().filter_map(|h| hex_to_hsv(h)).collect();
            let colors: [ColorTriple; PALETTE_SIZE] = colors.try_into().ok()?;
            Some(Palette::new(format!("Palette {}", i + 1), colors))
        })
        .collect()
}

/// Catalog fetched over HTTP and cached on disk.
///
/// The cache is tried first; on a miss the URL is fetched and the raw document
/// is written back to the cache.
#[derive(Clone, Debug)]
pub struct RemoteCatalog {
    pub url: String,
    pub cache_path: Option<PathBuf>,
    pub timeout: Duration,
}

impl RemoteCatalog {
    pub fn new(url: impl Into<String>, cache_path: Option<PathBuf>) -> Self {
        Self {
            url: url.into(),
            cache_path,
            timeout: Duration::from_secs(10),
        }
    }

    fn load_from_cache(&self) -> Result<Vec<Vec<String>>> {
        let path = self
            .cache_path
            .as_ref()
            .ok_or_else(|| anyhow!("No cache directory"))?;
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read cache {}", path.display()))?;
        serde_json::from_str(&contents).context("Failed to parse cache")
    }

    fn save_to_cache(&self, rows: &[Vec<String>]) -> Result<()> {
        let Some(path) = &self.cache_path else {
            return Ok(());
        };
        if let Some(dir) = path.parent() {
            fs::create_dir_all(dir)?;
        }
        fs::write(path, serde_json::to_string(rows)?)
            .with_context(|| format!("Failed to write cache {}", path.display()))
    }

    fn fetch(&self) -> Result<Vec<Vec<String>>> {
        crate::log(&format!("Fetching palettes from {}", self.url));

        let client = reqwest::blocking::Client::builder()
            .timeout(self.timeout)
            .build()
            .context("Failed to create HTTP client")?;
        let response = client
            .get(&self.url)
            .send()
            .context("Failed to fetch palettes")?;

        let status = response.status();
        if !status.is_success() {
            return Err(anyhow!(
                "HTTP error: {} - {}",
                status.as_u16(),
                status.canonical_reason().unwrap_or("Unknown")
            ));
        }

        let text = response.text().context("Failed to read response body")?;
        serde_json::from_str(&text).with_context(|| {
            let preview: String = text.chars().take(200).collect();
            format!("Failed to parse palette JSON. Response preview: {}", preview)
        })
    }
}

impl CatalogSource for RemoteCatalog {
    fn load_catalog(&self) -> Result<Vec<Palette>> {
        let rows = match self.load_from_cache() {
            Ok(rows) => {
                crate::log("Loaded palettes from cache");
                rows
            }
            Err(e) => {
                crate::log(&format!("Cache miss ({:#}), fetching...", e));
                let rows = self.fetch()?;
                if let Err(e) = self.save_to_cache(&rows) {
                    crate::log(&format!("Warning: Failed to save cache: {:#}", e));
                }
                rows
            }
        };

        let palettes = palettes_from_hex_rows(&rows);
        if palettes.is_empty() {
            return Err(anyhow!("No valid palettes found"));
        }
        Ok(palettes)
    }
}
