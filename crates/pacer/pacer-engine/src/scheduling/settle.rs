//! Settle (debounce) trigger.
//!
//! Every arm restarts a single countdown. Only the countdown that completes
//! without being superseded fires, so a burst inside the window collapses
//! into one drain pass.

use std::time::Duration;

use pacer_core::Timestamp;

use super::timers::{TimerHandle, TimerKind, TimerQueue};

#[derive(Debug)]
pub struct SettleTrigger {
    window: Duration,
    pending: Option<TimerHandle>,
    rearms: u64,
}

impl SettleTrigger {
    pub fn new(window: Duration) -> Self {
        Self {
            window,
            pending: None,
            rearms: 0,
        }
    }

    /// Start the countdown, cancelling any countdown already running.
    pub fn arm(&mut self, timers: &mut TimerQueue, now: Timestamp) -> TimerHandle {
        if let Some(previous) = self.pending.take() {
            if timers.cancel(previous) {
                self.rearms += 1;
            }
        }
        let handle = timers.schedule(now + self.window, TimerKind::Settle);
        self.pending = Some(handle);
        handle
    }

    /// Claim a fired settle timer. False for a superseded or foreign handle.
    pub fn fire(&mut self, handle: TimerHandle) -> bool {
        if self.pending == Some(handle) {
            self.pending = None;
            true
        } else {
            false
        }
    }

    pub fn cancel(&mut self, timers: &mut TimerQueue) {
        if let Some(handle) = self.pending.take() {
            timers.cancel(handle);
        }
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// How many countdowns were superseded before firing.
    pub fn rearms(&self) -> u64 {
        self.rearms
    }
}
