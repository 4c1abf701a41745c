//! GUI application state management.
//!
//! Tracks UI toggles, outstanding background work, and which controls are usable.

use std::sync::mpsc::Receiver;

use crate::calibration::KeyEdges;
use crate::palette::{ColorTriple, Palette};
use crate::session::{ApplicationSession, PendingApply};

/// Result of a background catalog load.
pub type CatalogResult = anyhow::Result<Vec<Palette>>;

/// Result of a background apply, with the claim it completes.
pub type ApplyOutcome = (PendingApply, anyhow::Result<()>);

/// GUI application state.
#[derive(Debug, Default)]
pub struct GuiState {
    /// Whether the favorites panel is open.
    pub show_favorites: bool,
    /// Calibration key presses, edge-detected across frames.
    pub key_edges: KeyEdges,
    /// Catalog load running on a worker thread.
    pub catalog_rx: Option<Receiver<CatalogResult>>,
    /// Apply running on a worker thread.
    pub apply_rx: Option<Receiver<ApplyOutcome>>,
}

impl GuiState {
    /// True while a worker thread is running.
    pub fn is_busy(&self) -> bool {
        self.catalog_rx.is_some() || self.apply_rx.is_some()
    }
}

/// Which controls are enabled this frame.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Controls {
    pub can_generate: bool,
    pub can_calibrate: bool,
    pub can_apply: bool,
    pub can_favorite: bool,
    pub calibrated: bool,
}

impl Controls {
    pub fn from_session(session: &ApplicationSession, state: &GuiState) -> Self {
        let calibrating = session.is_calibrating();
        let applying = session.is_apply_in_flight() || state.apply_rx.is_some();
        let has_palette = session.active_palette().is_some();

        Self {
            can_generate: session.is_calibrated()
                && session.catalog_len() > 0
                && !calibrating
                && !applying,
            can_calibrate: !calibrating && !applying,
            can_apply: session.is_calibrated() && has_palette && !calibrating && !applying,
            can_favorite: has_palette && !applying,
            calibrated: session.is_calibrated(),
        }
    }
}

/// Text lines shown under a swatch: hex, RGB and HSV.
pub fn swatch_lines(color: ColorTriple) -> [String; 3] {
    let (r, g, b) = color.to_rgb();
    [
        color.to_hex().to_uppercase(),
        format!("RGB: {}, {}, {}", r, g, b),
        format!("HSV: {:.2}, {:.2}, {:.2}", color.h, color.s, color.v),
    ]
}
