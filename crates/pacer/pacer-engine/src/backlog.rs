//! Bounded, priority-ordered backlog of pending signals.
//!
//! Entries are kept sorted by ascending priority value (most urgent first)
//! with FIFO order among equal priorities.
//!
//! Overflow policy: when full, index 0 is evicted before the new signal is
//! inserted, whatever its priority. Index 0 is the head of the queue, so a
//! burst can push out the most urgent pending signal. Memory stays bounded
//! and the newest input is never lost; callers that need a different trade-off
//! must size `capacity` for their burst length.

use std::collections::VecDeque;

use pacer_core::Signal;

#[derive(Debug, Clone)]
pub struct PriorityBacklog {
    entries: VecDeque<Signal>,
    capacity: usize,
}

impl PriorityBacklog {
    /// Create a backlog. A zero capacity is treated as one.
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            entries: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Insert `signal` in priority order. Returns the evicted entry on overflow.
    pub fn insert(&mut self, signal: Signal) -> Option<Signal> {
        let evicted = if self.entries.len() >= self.capacity {
            self.entries.pop_front()
        } else {
            None
        };

        let index = self
            .entries
            .iter()
            .position(|queued| signal.priority < queued.priority)
            .unwrap_or(self.entries.len());
        self.entries.insert(index, signal);

        evicted
    }

    /// Remove and return the most urgent, oldest signal.
    pub fn pop_highest(&mut self) -> Option<Signal> {
        self.entries.pop_front()
    }

    pub fn peek(&self) -> Option<&Signal> {
        self.entries.front()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Signal> {
        self.entries.iter()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }
}
