use std::time::Duration;

use serde::{Deserialize, Serialize};

use super::defaults;

/// Admission-time safety limits, independent of the intake cooldown.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SafetyConfig {
    /// Admissions allowed inside one trailing window.
    pub max_admissions_per_window: usize,
    /// Length of the trailing rate window.
    pub window_secs: u64,
    /// Minimum gap between two admissions of the same signal type.
    pub min_spacing_ms: u64,
    /// Longest action duration that may be admitted.
    pub max_duration_ms: u64,
}

impl SafetyConfig {
    pub fn window(&self) -> Duration {
        Duration::from_secs(self.window_secs)
    }

    pub fn min_spacing(&self) -> Duration {
        Duration::from_millis(self.min_spacing_ms)
    }
}

impl Default for SafetyConfig {
    fn default() -> Self {
        Self {
            max_admissions_per_window: defaults::DEFAULT_MAX_ADMISSIONS_PER_WINDOW,
            window_secs: defaults::DEFAULT_WINDOW_SECS,
            min_spacing_ms: defaults::DEFAULT_MIN_SPACING_MS,
            max_duration_ms: defaults::DEFAULT_MAX_DURATION_MS,
        }
    }
}
