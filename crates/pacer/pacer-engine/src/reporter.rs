//! Execution reporter: counters and a read-only snapshot of engine state.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use pacer_core::{Priority, Timestamp};

use crate::admission::{ActiveAction, AdmissionOutcome};

/// Monotonic counters. Survive `reset()`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngineCounters {
    pub submitted: u64,
    pub accepted: u64,
    pub throttled: u64,
    pub evicted: u64,
    pub drain_passes: u64,
    pub processed: u64,
    pub admitted: u64,
    pub unresolved: u64,
    pub rejected_by_safety: u64,
    pub rejected_by_preemption: u64,
    pub preempted: u64,
    pub expired: u64,
    pub emergency_resets: u64,
    pub effect_faults: u64,
}

/// The most recent admission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdmissionRecord {
    pub signal_type: String,
    pub pattern: String,
    pub priority: Priority,
    pub admitted_at: Timestamp,
    pub wall_clock: DateTime<Utc>,
}

/// Public view of the active action.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActiveActionView {
    pub pattern_name: String,
    pub response_kind: String,
    pub signal_type: String,
    pub priority: Priority,
    pub admitted_at: Timestamp,
    pub expires_at: Timestamp,
}

impl From<&ActiveAction> for ActiveActionView {
    fn from(active: &ActiveAction) -> Self {
        Self {
            pattern_name: active.descriptor.pattern_name.clone(),
            response_kind: active.descriptor.response_kind.clone(),
            signal_type: active.signal_type.clone(),
            priority: active.descriptor.priority,
            admitted_at: active.admitted_at,
            expires_at: active.expires_at,
        }
    }
}

/// Read-only snapshot of engine state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngineSnapshot {
    pub active_action: Option<ActiveActionView>,
    pub backlog_length: usize,
    pub is_draining: bool,
    pub settle_pending: bool,
    /// Settle countdowns superseded by a later intake before firing.
    pub settle_rearms: u64,
    /// Entries held by the cooldown table, expired ones included.
    pub cooldown_entries: usize,
    pub cooled_down_types: Vec<String>,
    pub last_admitted: Option<AdmissionRecord>,
    pub last_processed: Option<String>,
    pub counters: EngineCounters,
    pub captured_at: Timestamp,
}

/// Bookkeeping the engine updates as it makes decisions.
#[derive(Debug, Default)]
pub struct ExecutionReporter {
    counters: EngineCounters,
    last_admitted: Option<AdmissionRecord>,
    last_processed: Option<String>,
}

impl ExecutionReporter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn counters(&self) -> &EngineCounters {
        &self.counters
    }

    pub fn counters_mut(&mut self) -> &mut EngineCounters {
        &mut self.counters
    }

    pub fn last_admitted(&self) -> Option<&AdmissionRecord> {
        self.last_admitted.as_ref()
    }

    pub fn last_processed(&self) -> Option<&str> {
        self.last_processed.as_deref()
    }

    pub fn record_processed(&mut self, signal_type: &str) {
        self.counters.processed += 1;
        self.last_processed = Some(signal_type.to_string());
    }

    /// Tally one drain-loop outcome.
    pub fn record_outcome(&mut self, outcome: &AdmissionOutcome) {
        match outcome {
            AdmissionOutcome::Admitted { preempted, .. } => {
                self.counters.admitted += 1;
                if preempted.is_some() {
                    self.counters.preempted += 1;
                }
            }
            AdmissionOutcome::Unresolved => self.counters.unresolved += 1,
            AdmissionOutcome::RejectedBySafety(_) => self.counters.rejected_by_safety += 1,
            AdmissionOutcome::RejectedByPreemption { .. } => {
                self.counters.rejected_by_preemption += 1
            }
        }
    }

    pub fn record_admission(
        &mut self,
        signal_type: &str,
        pattern: &str,
        priority: Priority,
        at: Timestamp,
    ) {
        self.last_admitted = Some(AdmissionRecord {
            signal_type: signal_type.to_string(),
            pattern: pattern.to_string(),
            priority,
            admitted_at: at,
            wall_clock: Utc::now(),
        });
    }

    /// Forget per-run history; counters are kept.
    pub fn clear_history(&mut self) {
        self.last_admitted = None;
        self.last_processed = None;
    }
}
