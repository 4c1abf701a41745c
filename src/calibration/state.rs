//! Calibration state tracking.
//!
//! Tracks the samples collected so far and the current step in the wizard.

/// Raw pointer samples collected during one calibration run.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct CalibrationSamples {
    /// Wheel center.
    pub center: Option<(i32, i32)>,
    /// Any point on the wheel's outer edge.
    pub edge: Option<(i32, i32)>,
    /// Brightness bar start (value 0); its y is the bar's row.
    pub bar_start: Option<(i32, i32)>,
    /// Brightness bar end (value 1). Only x is used.
    pub bar_end: Option<(i32, i32)>,
}

/// Steps in the calibration wizard.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CalibrationStep {
    /// Capture the center of the color wheel.
    AwaitCenter,
    /// Capture a point on the edge of the color wheel.
    AwaitEdge,
    /// Capture the start of the brightness bar.
    AwaitBarStart,
    /// Capture the end of the brightness bar.
    AwaitBarEnd,
    /// All four samples captured.
    Complete,
    /// Run cancelled; samples discarded.
    Aborted,
}

impl CalibrationStep {
    /// Returns a human-readable description of the step.
    pub fn description(&self) -> &'static str {
        match self {
            Self::AwaitCenter => "Wheel center",
            Self::AwaitEdge => "Wheel edge",
            Self::AwaitBarStart => "Brightness bar start",
            Self::AwaitBarEnd => "Brightness bar end",
            Self::Complete => "Complete",
            Self::Aborted => "Aborted",
        }
    }

    /// Returns the step number (1-based) for display.
    pub fn step_number(&self) -> usize {
        match self {
            Self::AwaitCenter => 1,
            Self::AwaitEdge => 2,
            Self::AwaitBarStart => 3,
            Self::AwaitBarEnd => 4,
            Self::Complete | Self::Aborted => 5,
        }
    }

    /// Total number of capture steps.
    pub fn total_steps() -> usize {
        4
    }

    /// The step that follows a successful capture.
    pub fn next(&self) -> Self {
        match self {
            Self::AwaitCenter => Self::AwaitEdge,
            Self::AwaitEdge => Self::AwaitBarStart,
            Self::AwaitBarStart => Self::AwaitBarEnd,
            Self::AwaitBarEnd | Self::Complete => Self::Complete,
            Self::Aborted => Self::Aborted,
        }
    }

    /// True while the step is waiting for a confirmation event.
    pub fn is_awaiting(&self) -> bool {
        !matches!(self, Self::Complete | Self::Aborted)
    }

    /// What the user should do to complete this step.
    pub fn instructions(&self) -> &'static str {
        match self {
            Self::AwaitCenter => "Position mouse on CENTER of color wheel, then press ENTER",
            Self::AwaitEdge => "Position mouse on EDGE of color wheel, then press ENTER",
            Self::AwaitBarStart => "Position mouse on LEFT of brightness bar, then press ENTER",
            Self::AwaitBarEnd => "Position mouse on RIGHT of brightness bar, then press ENTER",
            Self::Complete => "Calibration complete",
            Self::Aborted => "Calibration cancelled",
        }
    }
}
