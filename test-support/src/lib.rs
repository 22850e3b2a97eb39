//! Test support utilities.
//!
//! Helpers shared by the unit, integration and behavioural tests of
//! `envconf`: scoped environment mutation and log capture.

pub mod env_guard;
pub mod logging;

pub use env_guard::EnvVarGuard;
pub use logging::{LogCapture, capture_logs};
