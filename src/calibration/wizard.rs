//! Calibration wizard implementation.
//!
//! A single-shot, four-step state machine. The host calls [`CalibrationWizard::confirm`]
//! (or the `begin_capture`/`record_sample` pair when it reads the pointer off-thread)
//! each time the user presses the confirm key. Each accepted event consumes one
//! pointer sample; after the fourth the run is complete and further events are ignored.

use anyhow::Result;

use crate::calibration::coords::PointerSource;
use crate::calibration::model::{derive_radius, CalibrationModel};
use crate::calibration::state::{CalibrationSamples, CalibrationStep};
use crate::log;

/// Result of handing one confirmation event to the wizard.
#[derive(Clone, Debug, PartialEq)]
pub enum WizardEvent {
    /// Event arrived while nothing was awaited (read in flight, finished, or aborted).
    Ignored,
    /// Sample stored; the wizard now waits for the given step.
    Advanced(CalibrationStep),
    /// Fourth sample stored; the run produced this model.
    Completed(CalibrationModel),
}

/// One calibration run. Create at calibration start, drop when it finishes.
#[derive(Debug)]
pub struct CalibrationWizard {
    step: CalibrationStep,
    samples: CalibrationSamples,
    /// Set while the host is reading the pointer for the current step.
    capture_pending: bool,
    /// Steps whose pointer read failed and were filled with (0, 0).
    degraded: Vec<CalibrationStep>,
    last_message: String,
}

impl Default for CalibrationWizard {
    fn default() -> Self {
        Self::new()
    }
}

impl CalibrationWizard {
    pub fn new() -> Self {
        log(&format!(
            "Calibration started. Step 1/{}: {}",
            CalibrationStep::total_steps(),
            CalibrationStep::AwaitCenter.description()
        ));
        Self {
            step: CalibrationStep::AwaitCenter,
            samples: CalibrationSamples::default(),
            capture_pending: false,
            degraded: Vec::new(),
            last_message: String::new(),
        }
    }

    pub fn step(&self) -> CalibrationStep {
        self.step
    }

    /// Steps captured with a substituted (0, 0) because the pointer could not be read.
    pub fn degraded_steps(&self) -> &[CalibrationStep] {
        &self.degraded
    }

    /// Handles a confirmation event by reading the pointer synchronously.
    pub fn confirm(&mut self, pointer: &dyn PointerSource) -> WizardEvent {
        if !self.begin_capture() {
            return WizardEvent::Ignored;
        }
        self.record_sample(pointer.pointer_position())
    }

    /// Claims the current step for a pointer read.
    ///
    /// Returns false, and changes nothing, if the wizard is not awaiting an event
    /// or a read for this step is already outstanding.
    pub fn begin_capture(&mut self) -> bool {
        if !self.step.is_awaiting() || self.capture_pending {
            log("Calibration: confirmation ignored");
            return false;
        }
        self.capture_pending = true;
        true
    }

    /// Stores the result of the pointer read claimed by `begin_capture`.
    ///
    /// A failed read is replaced by (0, 0) and the run continues.
    pub fn record_sample(&mut self, position: Result<(i32, i32)>) -> WizardEvent {
        if !self.capture_pending || !self.step.is_awaiting() {
            return WizardEvent::Ignored;
        }
        self.capture_pending = false;

        let pos = match position {
            Ok(pos) => pos,
            Err(e) => {
                log(&format!(
                    "Calibration: failed to read pointer for '{}': {:#}. Using (0, 0).",
                    self.step.description(),
                    e
                ));
                self.degraded.push(self.step);
                (0, 0)
            }
        };

        self.last_message = match self.step {
            CalibrationStep::AwaitCenter => {
                self.samples.center = Some(pos);
                format!("Center captured ({}, {})", pos.0, pos.1)
            }
            CalibrationStep::AwaitEdge => {
                self.samples.edge = Some(pos);
                let center = self.samples.center.unwrap_or((0, 0));
                format!("Radius: {}px", derive_radius(center, pos))
            }
            CalibrationStep::AwaitBarStart => {
                self.samples.bar_start = Some(pos);
                format!("Bar start captured ({}, {})", pos.0, pos.1)
            }
            CalibrationStep::AwaitBarEnd => {
                self.samples.bar_end = Some(pos);
                format!("Bar end captured ({}, {})", pos.0, pos.1)
            }
            CalibrationStep::Complete | CalibrationStep::Aborted => String::new(),
        };
        log(&format!("Calibration: {}", self.last_message));

        self.step = self.step.next();
        if self.step == CalibrationStep::Complete {
            return match self.build_model() {
                Some(model) => {
                    log(&format!("Calibration complete: {:?}", model));
                    WizardEvent::Completed(model)
                }
                None => WizardEvent::Ignored,
            };
        }

        log(&format!(
            "Step {}/{}: {}",
            self.step.step_number(),
            CalibrationStep::total_steps(),
            self.step.description()
        ));
        WizardEvent::Advanced(self.step)
    }

    /// Cancels the run and discards every collected sample.
    ///
    /// Has no effect once the run is complete.
    pub fn abort(&mut self) {
        if !self.step.is_awaiting() {
            return;
        }
        self.samples = CalibrationSamples::default();
        self.degraded.clear();
        self.capture_pending = false;
        self.step = CalibrationStep::Aborted;
        log("Calibration aborted by user.");
    }

    fn build_model(&self) -> Option<CalibrationModel> {
        let center = self.samples.center?;
        let edge = self.samples.edge?;
        let bar_start = self.samples.bar_start?;
        let bar_end = self.samples.bar_end?;

        Some(CalibrationModel {
            center_x: center.0,
            center_y: center.1,
            radius: derive_radius(center, edge),
            brightness_x_start: bar_start.0,
            brightness_x_end: bar_end.0,
            brightness_y: bar_start.1,
        })
    }

    /// Human-readable progress line for the status bar.
    pub fn status_text(&self) -> String {
        let mut text = match self.step {
            CalibrationStep::Complete | CalibrationStep::Aborted => {
                self.step.instructions().to_string()
            }
            step if self.last_message.is_empty() => format!(
                "Step {}: {}",
                step.step_number(),
                step.instructions()
            ),
            step => format!(
                "{} | Step {}: {}",
                self.last_message,
                step.step_number(),
                step.instructions()
            ),
        };

        if !self.degraded.is_empty() {
            let names: Vec<&str> = self.degraded.iter().map(|s| s.description()).collect();
            text.push_str(&format!(
                " (pointer unavailable for: {}; used 0,0)",
                names.join(", ")
            ));
        }
        text
    }
}
