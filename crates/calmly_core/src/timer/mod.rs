//! Ritual countdown timer.
//!
//! # Responsibility
//! - Model the countdown lifecycle as an explicit state machine.
//! - Drive it on a one-second cadence with deterministic cancellation.

pub mod runner;
pub mod session;

pub use runner::RitualTimer;
pub use session::{format_remaining, RitualSession, TimerPhase};
