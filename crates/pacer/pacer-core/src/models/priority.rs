use std::fmt;

use serde::{Deserialize, Serialize};

/// Action urgency. Lower values are more urgent; `1` beats `5`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Priority(pub u8);

impl Priority {
    /// The most urgent rank used by the default registry.
    pub const HIGHEST: Priority = Priority(1);
    /// Rank given to anything the registry does not know about.
    pub const LOWEST: Priority = Priority(5);

    pub fn value(self) -> u8 {
        self.0
    }

    /// True when `self` is strictly more urgent than `other`.
    pub fn outranks(self, other: Priority) -> bool {
        self.0 < other.0
    }
}

impl Default for Priority {
    fn default() -> Self {
        Self::LOWEST
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "p{}", self.0)
    }
}
