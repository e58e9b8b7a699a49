// Single source of truth for all default values.

// --- Intake ---
pub const DEFAULT_COOLDOWN_MS: u64 = 1_000;
pub const DEFAULT_SETTLE_MS: u64 = 100;
pub const DEFAULT_BACKLOG_CAPACITY: usize = 10;

// --- Safety ---
pub const DEFAULT_MAX_ADMISSIONS_PER_WINDOW: usize = 10;
pub const DEFAULT_WINDOW_SECS: u64 = 60;
pub const DEFAULT_MIN_SPACING_MS: u64 = 1_000;
pub const DEFAULT_MAX_DURATION_MS: u64 = 5_000;

// --- Registry ---
pub const DEFAULT_ACTION_DURATION_MS: u64 = 3_000;

// --- Observability ---
pub const DEFAULT_LOG_LEVEL: &str = "info";
pub const DEFAULT_JSON_LOGS: bool = true;

/// Settle windows longer than this multiple of the cooldown are rejected.
pub const MAX_SETTLE_TO_COOLDOWN_RATIO: u64 = 10;
