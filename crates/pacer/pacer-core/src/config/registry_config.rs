use serde::{Deserialize, Serialize};

use super::defaults;
use crate::registry::SignalKind;

/// One `[[registry.patterns]]` table: binds a signal to an action pattern.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PatternConfig {
    pub name: String,
    pub signal: SignalKind,
    pub response: String,
    /// Defaults to the lowest priority at registry load.
    #[serde(default)]
    pub priority: Option<u8>,
    /// Defaults to `default_duration_ms` at registry load.
    #[serde(default)]
    pub duration_ms: Option<u64>,
}

impl PatternConfig {
    fn new(name: &str, signal: SignalKind, response: &str, priority: u8, duration_ms: u64) -> Self {
        Self {
            name: name.to_string(),
            signal,
            response: response.to_string(),
            priority: Some(priority),
            duration_ms: Some(duration_ms),
        }
    }
}

/// Static signal → action registry configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RegistryConfig {
    /// Duration given to patterns that do not declare one.
    pub default_duration_ms: u64,
    /// Known target ids. Empty means any explicit id is accepted.
    pub targets: Vec<String>,
    pub patterns: Vec<PatternConfig>,
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            default_duration_ms: defaults::DEFAULT_ACTION_DURATION_MS,
            targets: Vec::new(),
            patterns: default_patterns(),
        }
    }
}

/// The stock pattern table.
pub fn default_patterns() -> Vec<PatternConfig> {
    vec![
        PatternConfig::new(
            "focus-assist",
            SignalKind::UndoLoop,
            "highlight-main-action",
            1,
            3_000,
        ),
        PatternConfig::new(
            "navigation-guide",
            SignalKind::Backtrack,
            "breadcrumb-highlight",
            2,
            3_500,
        ),
        PatternConfig::new(
            "hover-relief",
            SignalKind::HoverRepeat,
            "gentle-fade",
            3,
            4_000,
        ),
        PatternConfig::new(
            "attention-recentering",
            SignalKind::Dwell,
            "pulse-relevant",
            4,
            4_000,
        ),
        PatternConfig::new("quick-combo", SignalKind::FastAction, "quick-combo", 5, 1_000),
    ]
}
