//! Error taxonomy for the calibration and palette-application core.
//!
//! Collaborators (pointer reader, clicker, storage, catalog) report failures as
//! `anyhow::Error`; the core converts them into one of these kinds at its
//! public boundary so the host can react per kind.

use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum AppError {
    #[error("invalid calibration geometry: radius must be positive (got {radius})")]
    InvalidGeometry { radius: i32 },

    #[error("not calibrated; run calibration first")]
    NotCalibrated,

    #[error("no active palette")]
    NoActivePalette,

    #[error("color index {index} is out of range (palette has {len} colors)")]
    IndexOutOfRange { index: usize, len: usize },

    #[error("palette catalog is empty")]
    EmptyCatalog,

    #[error("failed to apply color: {0}")]
    ApplyFailed(String),

    #[error("another color is still being applied")]
    ApplyInProgress,

    #[error("palette catalog unavailable: {0}")]
    CatalogUnavailable(String),

    #[error("failed to persist: {0}")]
    PersistenceError(String),
}

impl AppError {
    /// Wraps a storage failure, keeping the whole context chain in the message.
    pub fn persistence(err: &anyhow::Error) -> Self {
        Self::PersistenceError(format!("{:#}", err))
    }
}

pub type AppResult<T> = std::result::Result<T, AppError>;
