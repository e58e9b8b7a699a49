//! One-shot timers on the engine's logical clock.
//!
//! Cancellation is explicit and handle-based. A cancelled handle never fires,
//! and handles are never reused, so a stale handle cannot match a newer timer.

use std::collections::{BTreeMap, HashMap};

use serde::Serialize;

use pacer_core::Timestamp;

/// Identifies one scheduled timer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct TimerHandle(u64);

/// What a timer does when it fires.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum TimerKind {
    /// Settle window elapsed: run a drain pass.
    Settle,
    /// Active action reached its duration.
    Expiry,
}

#[derive(Debug, Default)]
pub struct TimerQueue {
    next_id: u64,
    // (deadline, id) keeps equal deadlines in schedule order.
    pending: BTreeMap<(Timestamp, u64), TimerKind>,
    deadlines: HashMap<u64, Timestamp>,
}

impl TimerQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn schedule(&mut self, at: Timestamp, kind: TimerKind) -> TimerHandle {
        let id = self.next_id;
        self.next_id += 1;
        self.pending.insert((at, id), kind);
        self.deadlines.insert(id, at);
        TimerHandle(id)
    }

    /// Cancel a pending timer. Returns false if it already fired or was cancelled.
    pub fn cancel(&mut self, handle: TimerHandle) -> bool {
        match self.deadlines.remove(&handle.0) {
            Some(at) => self.pending.remove(&(at, handle.0)).is_some(),
            None => false,
        }
    }

    /// Earliest pending deadline.
    pub fn next_deadline(&self) -> Option<Timestamp> {
        self.pending.keys().next().map(|(at, _)| *at)
    }

    /// Remove and return the earliest timer due at or before `now`.
    pub fn pop_due(&mut self, now: Timestamp) -> Option<(TimerHandle, TimerKind)> {
        let (&(at, id), _) = self.pending.iter().next()?;
        if at > now {
            return None;
        }
        let kind = self.pending.remove(&(at, id))?;
        self.deadlines.remove(&id);
        Some((TimerHandle(id), kind))
    }

    /// Drop every pending timer. Handle ids keep increasing.
    pub fn clear(&mut self) {
        self.pending.clear();
        self.deadlines.clear();
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fires_in_deadline_then_schedule_order() {
        let mut timers = TimerQueue::new();
        let late = timers.schedule(Timestamp(200), TimerKind::Expiry);
        let first = timers.schedule(Timestamp(100), TimerKind::Settle);
        let second = timers.schedule(Timestamp(100), TimerKind::Expiry);

        assert_eq!(timers.next_deadline(), Some(Timestamp(100)));
        assert_eq!(timers.pop_due(Timestamp(50)), None);
        assert_eq!(
            timers.pop_due(Timestamp(150)),
            Some((first, TimerKind::Settle))
        );
        assert_eq!(
            timers.pop_due(Timestamp(150)),
            Some((second, TimerKind::Expiry))
        );
        assert_eq!(timers.pop_due(Timestamp(150)), None);
        assert_eq!(timers.pop_due(Timestamp(200)), Some((late, TimerKind::Expiry)));
        assert!(timers.is_empty());
    }

    #[test]
    fn cancelled_timer_never_fires() {
        let mut timers = TimerQueue::new();
        let handle = timers.schedule(Timestamp(10), TimerKind::Expiry);
        assert!(timers.cancel(handle));
        assert!(!timers.cancel(handle));
        assert_eq!(timers.pop_due(Timestamp(100)), None);
        assert_eq!(timers.next_deadline(), None);
    }

    #[test]
    fn handles_are_not_reused_after_clear() {
        let mut timers = TimerQueue::new();
        let old = timers.schedule(Timestamp(10), TimerKind::Settle);
        timers.clear();
        let new = timers.schedule(Timestamp(10), TimerKind::Settle);
        assert_ne!(old, new);
        assert!(!timers.cancel(old));
        assert_eq!(timers.next_deadline(), Some(Timestamp(10)));
    }
}
