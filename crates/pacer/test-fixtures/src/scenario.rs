use serde::Deserialize;
use serde_json::Value;

/// A timed sequence of host operations plus the expected end state.
#[derive(Debug, Clone, Deserialize)]
pub struct Scenario {
    pub name: String,
    #[serde(default)]
    pub description: String,
    /// Optional TOML overrides applied on top of the default config.
    #[serde(default)]
    pub config: Option<String>,
    pub steps: Vec<ScenarioStep>,
    pub expected: ScenarioExpectation,
}

/// One host operation at an absolute logical time.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum ScenarioStep {
    Submit {
        at_ms: u64,
        signal: String,
        #[serde(default)]
        payload: Value,
        #[serde(default)]
        expect_accepted: Option<bool>,
    },
    /// Move the clock and fire due timers.
    Advance { to_ms: u64 },
    Reset { at_ms: u64 },
}

/// Fields left out are not checked.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ScenarioExpectation {
    pub active_pattern: Option<String>,
    /// Assert that nothing is active at the end.
    pub idle: bool,
    pub last_admitted_type: Option<String>,
    pub applied: Option<Vec<String>>,
    pub clears: Option<usize>,
    pub drain_passes: Option<u64>,
    pub backlog_length: Option<usize>,
    pub rejected_by_safety: Option<u64>,
    pub rejected_by_preemption: Option<u64>,
    pub evicted: Option<u64>,
}
