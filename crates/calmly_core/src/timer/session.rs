//! Ritual countdown session state machine.
//!
//! # Responsibility
//! - Model the countdown lifecycle independent of any clock.
//!
//! # Invariants
//! - `remaining_secs` changes only through `tick()`.
//! - Pause and resume preserve the remaining value exactly.
//! - `Finished` is terminal for a session; a new session starts fresh.

use crate::model::ritual::Ritual;

/// Lifecycle phase of the ritual timer.
///
/// `Idle` means no ritual is selected; the other phases describe a live
/// session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerPhase {
    Idle,
    Running,
    Paused,
    Finished,
}

/// One ritual countdown in progress.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RitualSession {
    ritual_id: String,
    remaining_secs: u32,
    phase: TimerPhase,
}

impl RitualSession {
    /// Seeds a session from the ritual's fixed duration.
    ///
    /// A zero-duration ritual is finished from the start.
    pub fn begin(ritual: &Ritual) -> Self {
        let remaining_secs = ritual.countdown_seconds();
        let phase = if remaining_secs == 0 {
            TimerPhase::Finished
        } else {
            TimerPhase::Running
        };
        Self {
            ritual_id: ritual.id.clone(),
            remaining_secs,
            phase,
        }
    }

    /// Advances the countdown by one second while running.
    ///
    /// Reaching zero flips the session to `Finished`. Ticks in any other
    /// phase are ignored.
    pub fn tick(&mut self) -> TimerPhase {
        if self.phase == TimerPhase::Running {
            self.remaining_secs -= 1;
            if self.remaining_secs == 0 {
                self.phase = TimerPhase::Finished;
            }
        }
        self.phase
    }

    /// Freezes the countdown. No-op unless running.
    pub fn pause(&mut self) {
        if self.phase == TimerPhase::Running {
            self.phase = TimerPhase::Paused;
        }
    }

    /// Continues from the exact remaining value. No-op unless paused.
    pub fn resume(&mut self) {
        if self.phase == TimerPhase::Paused {
            self.phase = TimerPhase::Running;
        }
    }

    pub fn phase(&self) -> TimerPhase {
        self.phase
    }

    pub fn remaining_secs(&self) -> u32 {
        self.remaining_secs
    }

    pub fn ritual_id(&self) -> &str {
        &self.ritual_id
    }
}

/// Renders remaining seconds the way the session view displays them (`m:ss`).
pub fn format_remaining(total_secs: u32) -> String {
    let minutes = total_secs / 60;
    let seconds = total_secs % 60;
    format!("{minutes}:{seconds:02}")
}
