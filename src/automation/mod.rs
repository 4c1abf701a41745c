//! Driving the target application.
//!
//! This module provides:
//! - Configuration for the target window and input timing
//! - Window discovery by title
//! - Mouse input simulation that sets a color on the wheel and brightness bar

pub mod config;
pub mod input;
pub mod window;

pub use config::{get_config, init_config};
pub use input::{ColorApplier, SendInputApplier};
