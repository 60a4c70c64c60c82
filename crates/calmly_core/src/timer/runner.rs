//! Tokio-driven ritual timer with deterministic cancellation.
//!
//! # Responsibility
//! - Drive one [`RitualSession`] at a one-second cadence while running.
//! - Release the recurring tick task on every exit path.
//!
//! # Invariants
//! - At most one ticker task is live at a time.
//! - Each ticker owns a cancellation token that is cancelled at most once
//!   (the handle is taken out before cancelling).
//! - No ticks accrue while paused or after dismissal.
//! - Timer progress is never persisted.

use log::info;
use parking_lot::Mutex;
use std::sync::Arc;
use std::time::Duration;
use tokio_util::sync::CancellationToken;

use crate::model::ritual::Ritual;

use super::session::{RitualSession, TimerPhase};

const TICK_PERIOD: Duration = Duration::from_secs(1);

type SharedSession = Arc<Mutex<Option<RitualSession>>>;

/// Countdown driver for the active ritual session.
///
/// Must be used inside a Tokio runtime. Dropping the timer cancels any
/// live ticker, so navigating away can never leak the recurring task.
pub struct RitualTimer {
    session: SharedSession,
    ticker: Option<CancellationToken>,
}

impl RitualTimer {
    pub fn new() -> Self {
        Self {
            session: Arc::new(Mutex::new(None)),
            ticker: None,
        }
    }

    /// Starts a countdown for the given ritual.
    ///
    /// Any previous session is discarded and its ticker cancelled first, so
    /// re-selecting mid-run restarts cleanly from the new duration.
    pub fn select(&mut self, ritual: &Ritual) {
        self.stop_ticker();
        let session = RitualSession::begin(ritual);
        let needs_ticker = session.phase() == TimerPhase::Running;
        info!(
            "event=timer_start module=timer status=ok ritual_id={} remaining_secs={}",
            session.ritual_id(),
            session.remaining_secs()
        );
        *self.session.lock() = Some(session);
        if needs_ticker {
            self.spawn_ticker();
        }
    }

    /// Freezes the countdown and stops the tick cadence entirely.
    pub fn pause(&mut self) {
        let paused = {
            let mut guard = self.session.lock();
            match guard.as_mut() {
                Some(session) if session.phase() == TimerPhase::Running => {
                    session.pause();
                    true
                }
                _ => false,
            }
        };
        if paused {
            self.stop_ticker();
            info!("event=timer_pause module=timer status=ok");
        }
    }

    /// Continues from the exact remaining value with a fresh ticker.
    pub fn resume(&mut self) {
        let resumed = {
            let mut guard = self.session.lock();
            match guard.as_mut() {
                Some(session) if session.phase() == TimerPhase::Paused => {
                    session.resume();
                    true
                }
                _ => false,
            }
        };
        if resumed {
            self.spawn_ticker();
            info!("event=timer_resume module=timer status=ok");
        }
    }

    /// Clears the session and returns to the ritual list.
    ///
    /// Timer progress is discarded; checklist state lives on the ritual
    /// definition and is unaffected.
    pub fn dismiss(&mut self) {
        self.stop_ticker();
        if self.session.lock().take().is_some() {
            info!("event=timer_dismiss module=timer status=ok");
        }
    }

    /// Current phase; `Idle` when no ritual is selected.
    pub fn phase(&self) -> TimerPhase {
        self.session
            .lock()
            .as_ref()
            .map(RitualSession::phase)
            .unwrap_or(TimerPhase::Idle)
    }

    pub fn remaining_secs(&self) -> Option<u32> {
        self.session.lock().as_ref().map(RitualSession::remaining_secs)
    }

    pub fn active_ritual_id(&self) -> Option<String> {
        self.session
            .lock()
            .as_ref()
            .map(|session| session.ritual_id().to_string())
    }

    fn spawn_ticker(&mut self) {
        let token = CancellationToken::new();
        let task_token = token.clone();
        let session = Arc::clone(&self.session);
        tokio::spawn(async move {
            let mut interval = tokio::time::interval(TICK_PERIOD);
            // the first interval tick resolves immediately; consume it so
            // the countdown advances one full period after start
            interval.tick().await;
            loop {
                // cancellation must win over a due tick
                tokio::select! {
                    biased;
                    _ = task_token.cancelled() => break,
                    _ = interval.tick() => {
                        let mut guard = session.lock();
                        let Some(active) = guard.as_mut() else {
                            break;
                        };
                        if active.tick() == TimerPhase::Finished {
                            info!(
                                "event=timer_finished module=timer status=ok ritual_id={}",
                                active.ritual_id()
                            );
                            break;
                        }
                    }
                }
            }
        });
        self.ticker = Some(token);
    }

    /// Cancels the live ticker, if any. Called on every state-exiting
    /// transition; taking the token out keeps each cancellation single-shot.
    fn stop_ticker(&mut self) {
        if let Some(token) = self.ticker.take() {
            token.cancel();
        }
    }
}

impl Default for RitualTimer {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for RitualTimer {
    fn drop(&mut self) {
        self.stop_ticker();
    }
}
