//! Step definitions for the behavioural tests.

pub mod load_steps;

pub use load_steps::LoadWorld;
