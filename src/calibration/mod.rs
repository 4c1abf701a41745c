//! Calibration of the on-screen color wheel and brightness bar.
//!
//! The wizard collects four pointer samples (wheel center, wheel edge, bar start,
//! bar end) on confirmation events and turns them into a [`CalibrationModel`].

pub mod coords;
pub mod model;
pub mod state;
pub mod wizard;

pub use coords::{global_confirm_keys, ConfirmKeys, CursorPointer, KeyEdges, PointerSource};
pub use model::CalibrationModel;
pub use state::CalibrationStep;
pub use wizard::{CalibrationWizard, WizardEvent};
