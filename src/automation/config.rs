//! Application configuration.
//!
//! Loads settings from config.json at startup: the target window, the palette
//! catalog URL, the wheel orientation and click/drag timing.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::sync::OnceLock;

use crate::color::HueDirection;

/// Global configuration instance, initialized once at startup.
static CONFIG: OnceLock<AppConfig> = OnceLock::new();

/// Complete application configuration.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Title (or part of it) of the window that owns the color wheel
    pub window_title: String,
    /// JSON document with the palette catalog
    pub catalog_url: String,
    /// Which way hue increases around the on-screen wheel
    pub hue_direction: HueDirection,
    /// Pause after moving the cursor before pressing (milliseconds)
    pub move_settle_ms: u64,
    /// How long the wheel click is held (milliseconds)
    pub click_hold_ms: u64,
    /// Pause after the wheel click so the target registers it (milliseconds)
    pub wheel_settle_ms: u64,
    /// Pause between pressing on the brightness handle and dragging (milliseconds)
    pub slider_press_ms: u64,
    /// Number of intermediate moves when dragging the brightness handle
    pub slider_drag_steps: u32,
    /// Pause between drag moves (milliseconds)
    pub slider_step_ms: u64,
    /// Pause after releasing the brightness handle (milliseconds)
    pub post_apply_ms: u64,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            window_title: "BoomBang".to_string(),
            catalog_url:
                "https://raw.githubusercontent.com/Jam3/nice-color-palettes/master/1000.json"
                    .to_string(),
            hue_direction: HueDirection::CounterClockwise,
            move_settle_ms: 150,
            click_hold_ms: 100,
            wheel_settle_ms: 500,
            slider_press_ms: 50,
            slider_drag_steps: 10,
            slider_step_ms: 20,
            post_apply_ms: 300,
        }
    }
}

/// Parses a config document; fields that are missing take their defaults.
pub fn parse_config(contents: &str) -> serde_json::Result<AppConfig> {
    serde_json::from_str(contents)
}

/// Loads configuration from config.json or returns defaults.
/// Looks for config.json in the same directory as the executable.
fn load_config() -> AppConfig {
    let config_path = crate::paths::get_exe_dir().join("config.json");
    load_config_from(&config_path)
}

fn load_config_from(config_path: &Path) -> AppConfig {
    crate::log(&format!("Looking for config at: {}", config_path.display()));

    if config_path.exists() {
        match fs::read_to_string(config_path) {
            Ok(contents) => match parse_config(&contents) {
                Ok(config) => {
                    crate::log("Config loaded from config.json");
                    return config;
                }
                Err(e) => {
                    crate::log(&format!(
                        "Failed to parse config.json: {}. Using defaults.",
                        e
                    ));
                }
            },
            Err(e) => {
                crate::log(&format!(
                    "Failed to read config.json: {}. Using defaults.",
                    e
                ));
            }
        }
    } else {
        crate::log("config.json not found. Using default config.");
    }

    AppConfig::default()
}

/// Initializes the global configuration. Call once at startup.
pub fn init_config() {
    let _ = CONFIG.set(load_config());
}

/// Returns the global configuration, loading it on first use.
pub fn get_config() -> &'static AppConfig {
    CONFIG.get_or_init(load_config)
}
