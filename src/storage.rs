//! JSON key-value store file.
//!
//! Holds one JSON object whose top-level keys are independent records
//! (`"calibration"`, `"favorites"`). Each write rewrites the whole file through a
//! temporary file in the same directory, so a failed write leaves the old file intact.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context, Result};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::{Map, Value};

use crate::calibration::CalibrationModel;
use crate::palette::types::Palette;

pub const CALIBRATION_KEY: &str = "calibration";
pub const FAVORITES_KEY: &str = "favorites";

/// Durable storage for the calibrated geometry.
pub trait CalibrationStore {
    fn persist_calibration(&self, model: &CalibrationModel) -> Result<()>;
    fn load_calibration(&self) -> Result<Option<CalibrationModel>>;
}

/// Durable storage for the saved-palette list.
pub trait FavoritesBackend {
    fn save(&self, favorites: &[Palette]) -> Result<()>;
    fn load(&self) -> Result<Vec<Palette>>;
}

/// A JSON object on disk, read and written one key at a time.
#[derive(Clone, Debug)]
pub struct KeyValueFile {
    path: PathBuf,
}

impl KeyValueFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_map(&self) -> Result<Map<String, Value>> {
        if !self.path.exists() {
            return Ok(Map::new());
        }
        let contents = fs::read_to_string(&self.path)
            .with_context(|| format!("Failed to read {}", self.path.display()))?;
        if contents.trim().is_empty() {
            return Ok(Map::new());
        }
        match serde_json::from_str(&contents)
            .with_context(|| format!("Failed to parse {}", self.path.display()))?
        {
            Value::Object(map) => Ok(map),
            _ => Err(anyhow!("{} is not a JSON object", self.path.display())),
        }
    }

    fn write_map(&self, map: &Map<String, Value>) -> Result<()> {
        let dir = match self.path.parent() {
            Some(p) if !p.as_os_str().is_empty() => p.to_path_buf(),
            _ => PathBuf::from("."),
        };
        fs::create_dir_all(&dir)
            .with_context(|| format!("Failed to create {}", dir.display()))?;

        let json = serde_json::to_string_pretty(map)?;
        let mut tmp = tempfile::NamedTempFile::new_in(&dir)
            .with_context(|| format!("Failed to create temp file in {}", dir.display()))?;
        tmp.write_all(json.as_bytes())?;
        tmp.persist(&self.path)
            .with_context(|| format!("Failed to write {}", self.path.display()))?;
        Ok(())
    }

    /// Returns the value stored under `key`, or `None` if absent.
    pub fn get<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>> {
        let mut map = self.read_map()?;
        match map.remove(key) {
            Some(value) => Ok(Some(
                serde_json::from_value(value)
                    .with_context(|| format!("Invalid '{}' entry in {}", key, self.path.display()))?,
            )),
            None => Ok(None),
        }
    }

    /// Stores `value` under `key`, keeping every other key as it was.
    pub fn set<T: Serialize + ?Sized>(&self, key: &str, value: &T) -> Result<()> {
        let mut map = self.read_map()?;
        map.insert(key.to_string(), serde_json::to_value(value)?);
        self.write_map(&map)
    }
}

impl CalibrationStore for KeyValueFile {
    fn persist_calibration(&self, model: &CalibrationModel) -> Result<()> {
        self.set(CALIBRATION_KEY, model)
    }

    fn load_calibration(&self) -> Result<Option<CalibrationModel>> {
        self.get(CALIBRATION_KEY)
    }
}

impl FavoritesBackend for KeyValueFile {
    fn save(&self, favorites: &[Palette]) -> Result<()> {
        self.set(FAVORITES_KEY, favorites)
    }

    fn load(&self) -> Result<Vec<Palette>> {
        Ok(self.get(FAVORITES_KEY)?.unwrap_or_default())
    }
}
