//! Admission decisions made during a drain pass: the safety policy and the
//! active-action preemption rule.

pub mod active;
pub mod safety;

pub use active::{ActiveAction, ActiveSlot};
pub use safety::{SafetyPolicy, SafetyViolation};

use serde::Serialize;

/// What happened to one signal popped from the backlog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum AdmissionOutcome {
    /// Installed as the active action.
    Admitted { pattern: String, preempted: Option<String> },
    /// The resolver had no action for this input.
    Unresolved,
    /// Blocked by the safety policy.
    RejectedBySafety(SafetyViolation),
    /// An equal or more urgent action is already running.
    RejectedByPreemption { active: String },
}

impl AdmissionOutcome {
    pub fn is_admitted(&self) -> bool {
        matches!(self, AdmissionOutcome::Admitted { .. })
    }
}
