//! Per-signal-type cooldown expiry map.
//!
//! Entries are overwritten on renewal. Expired entries are dropped when a
//! query finds them, and in bulk by `purge_expired` on every intake.

use std::collections::HashMap;
use std::time::Duration;

use pacer_core::Timestamp;

/// Expiry times keyed by signal type.
#[derive(Debug, Clone, Default)]
pub struct CooldownTable {
    expiries: HashMap<String, Timestamp>,
}

impl CooldownTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// True while `signal_type` is still cooling down at `now`.
    /// An expired entry is dropped as a side effect.
    pub fn is_cooling(&mut self, signal_type: &str, now: Timestamp) -> bool {
        match self.expiries.get(signal_type) {
            Some(expiry) if now < *expiry => true,
            Some(_) => {
                self.expiries.remove(signal_type);
                false
            }
            None => false,
        }
    }

    /// Read-only variant of [`is_cooling`](Self::is_cooling).
    pub fn peek(&self, signal_type: &str, now: Timestamp) -> bool {
        self.expiries
            .get(signal_type)
            .is_some_and(|expiry| now < *expiry)
    }

    /// Start (or renew) a cooldown for `signal_type`.
    pub fn arm(&mut self, signal_type: &str, now: Timestamp, cooldown: Duration) {
        self.expiries.insert(signal_type.to_string(), now + cooldown);
    }

    /// Types still cooling at `now`, sorted.
    pub fn active_types(&self, now: Timestamp) -> Vec<String> {
        let mut types: Vec<String> = self
            .expiries
            .iter()
            .filter(|(_, expiry)| now < **expiry)
            .map(|(signal_type, _)| signal_type.clone())
            .collect();
        types.sort();
        types
    }

    /// Drop every entry that has expired by `now`.
    pub fn purge_expired(&mut self, now: Timestamp) -> usize {
        let before = self.expiries.len();
        self.expiries.retain(|_, expiry| now < *expiry);
        before - self.expiries.len()
    }

    pub fn clear(&mut self) {
        self.expiries.clear();
    }

    /// Recorded entries, expired or not.
    pub fn len(&self) -> usize {
        self.expiries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.expiries.is_empty()
    }
}
