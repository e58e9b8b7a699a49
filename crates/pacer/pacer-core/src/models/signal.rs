use serde::{Deserialize, Serialize};

use super::{Priority, Timestamp};

/// Opaque signal payload, passed through to the resolver and the action.
pub type Payload = serde_json::Value;

/// An external event awaiting a decision. Immutable once enqueued.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Signal {
    /// Unique id generated at intake.
    pub id: String,
    /// Signal type key, e.g. `"undo-loop"`.
    pub signal_type: String,
    pub payload: Payload,
    pub enqueued_at: Timestamp,
    pub priority: Priority,
}

impl Signal {
    pub fn new(
        signal_type: impl Into<String>,
        payload: Payload,
        enqueued_at: Timestamp,
        priority: Priority,
    ) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            signal_type: signal_type.into(),
            payload,
            enqueued_at,
            priority,
        }
    }
}
