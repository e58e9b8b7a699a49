use std::fmt;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use super::{Payload, Priority};

/// Where an action should land. Interpreted only by the effect applier.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", content = "id", rename_all = "lowercase")]
pub enum Target {
    /// Let the applier choose.
    Auto,
    /// A specific target id.
    Named(String),
}

impl fmt::Display for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Target::Auto => f.write_str("auto"),
            Target::Named(id) => f.write_str(id),
        }
    }
}

/// A resolved, time-bounded action. Produced by the resolver; immutable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActionDescriptor {
    pub pattern_name: String,
    pub response_kind: String,
    pub target: Target,
    pub duration_ms: u64,
    pub priority: Priority,
    pub payload: Payload,
}

impl ActionDescriptor {
    pub fn duration(&self) -> Duration {
        Duration::from_millis(self.duration_ms)
    }
}
