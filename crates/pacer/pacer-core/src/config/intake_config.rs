use std::time::Duration;

use serde::{Deserialize, Serialize};

use super::defaults;

/// Intake gate and backlog configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct IntakeConfig {
    /// Per-type cooldown applied on every accepted submission.
    pub cooldown_ms: u64,
    /// Quiet period after the last intake before the backlog drains.
    pub settle_ms: u64,
    /// Maximum pending signals. The oldest is evicted on overflow.
    pub backlog_capacity: usize,
}

impl IntakeConfig {
    pub fn cooldown(&self) -> Duration {
        Duration::from_millis(self.cooldown_ms)
    }

    pub fn settle_window(&self) -> Duration {
        Duration::from_millis(self.settle_ms)
    }
}

impl Default for IntakeConfig {
    fn default() -> Self {
        Self {
            cooldown_ms: defaults::DEFAULT_COOLDOWN_MS,
            settle_ms: defaults::DEFAULT_SETTLE_MS,
            backlog_capacity: defaults::DEFAULT_BACKLOG_CAPACITY,
        }
    }
}
