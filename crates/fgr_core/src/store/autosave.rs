//! Debounced auto-save policy.
//!
//! # Responsibility
//! - Coalesce bursts of edits into one save request per quiet period.
//! - Keep at most one save in flight; extra requests are dropped, not
//!   queued (last-writer-wins).
//!
//! # Invariants
//! - No save becomes due less than the quiet period after the latest edit.
//! - Edits on an unpopulated store never arm the timer.
//!
//! The host event loop owns time: it reports edits and polls `take_due`
//! with epoch-millisecond clocks, so the policy itself stays deterministic
//! and single-threaded.

use crate::store::form_store::StoreChange;

/// Quiet period between the last edit and the save it triggers.
pub const AUTO_SAVE_QUIET_MS: i64 = 1_000;

#[derive(Debug)]
pub struct AutoSaver {
    quiet_ms: i64,
    deadline_ms: Option<i64>,
    in_flight: bool,
}

impl AutoSaver {
    pub fn new() -> Self {
        Self::with_quiet_period(AUTO_SAVE_QUIET_MS)
    }

    pub fn with_quiet_period(quiet_ms: i64) -> Self {
        Self {
            quiet_ms,
            deadline_ms: None,
            in_flight: false,
        }
    }

    /// Observes one store change. User edits on a populated store re-arm the
    /// debounce deadline; anything else is ignored.
    pub fn note_change(&mut self, change: &StoreChange, populated: bool, now_ms: i64) {
        if populated && change.is_user_edit() {
            self.deadline_ms = Some(now_ms + self.quiet_ms);
        }
    }

    /// Returns true when a save should start now: the quiet period elapsed
    /// and no save is in flight. Consumes the pending request either way;
    /// a request arriving while a save runs is dropped, and the next edit
    /// arms a fresh one.
    pub fn take_due(&mut self, now_ms: i64) -> bool {
        match self.deadline_ms {
            Some(deadline) if now_ms >= deadline => {
                self.deadline_ms = None;
                if self.in_flight {
                    return false;
                }
                self.in_flight = true;
                true
            }
            _ => false,
        }
    }

    /// Marks the in-flight save finished, successfully or not.
    pub fn finish(&mut self) {
        self.in_flight = false;
    }

    pub fn is_in_flight(&self) -> bool {
        self.in_flight
    }
}

impl Default for AutoSaver {
    fn default() -> Self {
        Self::new()
    }
}
