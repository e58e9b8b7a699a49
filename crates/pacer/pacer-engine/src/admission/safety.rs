//! Safety policy: global rate ceiling, per-type minimum spacing, and a
//! maximum action duration.
//!
//! This is a last-line net applied at admission time. It is deliberately
//! independent of the intake cooldown, which gates submission rather than
//! admission.

use std::collections::{HashMap, VecDeque};
use std::fmt;

use serde::Serialize;

use pacer_core::config::SafetyConfig;
use pacer_core::{ActionDescriptor, Timestamp};

/// Why the safety policy refused an admission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "rule", rename_all = "snake_case")]
pub enum SafetyViolation {
    /// Missing signal type or empty pattern.
    InvalidInput,
    /// Too many admissions in the trailing window.
    RateCeiling { admitted: usize, limit: usize },
    /// Same type admitted too recently.
    TooFrequent {
        signal_type: String,
        elapsed_ms: u64,
        min_spacing_ms: u64,
    },
    /// Declared duration is longer than allowed.
    DurationTooLong { duration_ms: u64, max_ms: u64 },
}

impl fmt::Display for SafetyViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SafetyViolation::InvalidInput => f.write_str("invalid signal or action"),
            SafetyViolation::RateCeiling { admitted, limit } => {
                write!(f, "rate ceiling reached ({admitted}/{limit} in window)")
            }
            SafetyViolation::TooFrequent {
                signal_type,
                elapsed_ms,
                min_spacing_ms,
            } => write!(
                f,
                "{signal_type} admitted {elapsed_ms}ms ago (min spacing {min_spacing_ms}ms)"
            ),
            SafetyViolation::DurationTooLong {
                duration_ms,
                max_ms,
            } => write!(f, "duration {duration_ms}ms exceeds {max_ms}ms"),
        }
    }
}

/// Sliding-window admission history plus last admission per type.
#[derive(Debug, Clone)]
pub struct SafetyPolicy {
    limits: SafetyConfig,
    history: VecDeque<Timestamp>,
    last_by_type: HashMap<String, Timestamp>,
}

impl SafetyPolicy {
    pub fn new(limits: SafetyConfig) -> Self {
        Self {
            limits,
            history: VecDeque::new(),
            last_by_type: HashMap::new(),
        }
    }

    /// Check every rule. The first violated rule is reported.
    pub fn permits(
        &self,
        signal_type: &str,
        descriptor: &ActionDescriptor,
        now: Timestamp,
    ) -> Result<(), SafetyViolation> {
        if signal_type.is_empty() || descriptor.pattern_name.is_empty() {
            return Err(SafetyViolation::InvalidInput);
        }

        let admitted = self.admissions_in_window(now);
        if admitted >= self.limits.max_admissions_per_window {
            return Err(SafetyViolation::RateCeiling {
                admitted,
                limit: self.limits.max_admissions_per_window,
            });
        }

        if let Some(last) = self.last_by_type.get(signal_type) {
            let elapsed = now.saturating_since(*last);
            if elapsed < self.limits.min_spacing() {
                return Err(SafetyViolation::TooFrequent {
                    signal_type: signal_type.to_string(),
                    elapsed_ms: u64::try_from(elapsed.as_millis()).unwrap_or(u64::MAX),
                    min_spacing_ms: self.limits.min_spacing_ms,
                });
            }
        }

        if descriptor.duration_ms > self.limits.max_duration_ms {
            return Err(SafetyViolation::DurationTooLong {
                duration_ms: descriptor.duration_ms,
                max_ms: self.limits.max_duration_ms,
            });
        }

        Ok(())
    }

    /// Record an admission and prune history to the trailing window.
    pub fn record(&mut self, signal_type: &str, now: Timestamp) {
        self.history.push_back(now);
        self.last_by_type.insert(signal_type.to_string(), now);
        self.prune(now);
    }

    /// Admissions whose age is strictly less than the window.
    pub fn admissions_in_window(&self, now: Timestamp) -> usize {
        let window = self.limits.window();
        self.history
            .iter()
            .filter(|at| now.saturating_since(**at) < window)
            .count()
    }

    pub fn reset(&mut self) {
        self.history.clear();
        self.last_by_type.clear();
    }

    fn prune(&mut self, now: Timestamp) {
        let window = self.limits.window();
        while let Some(oldest) = self.history.front() {
            if now.saturating_since(*oldest) < window {
                break;
            }
            self.history.pop_front();
        }
    }
}

impl Default for SafetyPolicy {
    fn default() -> Self {
        Self::new(SafetyConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pacer_core::{Priority, Target};
    use serde_json::json;

    fn descriptor(duration_ms: u64) -> ActionDescriptor {
        ActionDescriptor {
            pattern_name: "focus-assist".into(),
            response_kind: "highlight-main-action".into(),
            target: Target::Auto,
            duration_ms,
            priority: Priority(1),
            payload: json!({}),
        }
    }

    #[test]
    fn rate_ceiling_blocks_eleventh_admission() {
        let mut policy = SafetyPolicy::default();
        for i in 0..10u64 {
            let ty = format!("type-{i}");
            let now = Timestamp(i * 100);
            assert!(policy.permits(&ty, &descriptor(1_000), now).is_ok());
            policy.record(&ty, now);
        }
        let err = policy
            .permits("type-10", &descriptor(1_000), Timestamp(1_000))
            .unwrap_err();
        assert_eq!(
            err,
            SafetyViolation::RateCeiling {
                admitted: 10,
                limit: 10
            }
        );
    }

    #[test]
    fn window_slides_after_sixty_seconds() {
        let mut policy = SafetyPolicy::default();
        for i in 0..10u64 {
            policy.record(&format!("type-{i}"), Timestamp(i));
        }
        assert_eq!(policy.admissions_in_window(Timestamp(59_999)), 10);
        // The first admission (t=0) ages out at exactly 60s.
        assert_eq!(policy.admissions_in_window(Timestamp(60_000)), 9);
        assert!(policy
            .permits("fresh", &descriptor(1_000), Timestamp(60_000))
            .is_ok());
    }

    #[test]
    fn record_prunes_history() {
        let mut policy = SafetyPolicy::default();
        policy.record("a", Timestamp(0));
        policy.record("b", Timestamp(70_000));
        assert_eq!(policy.history.len(), 1);
    }

    #[test]
    fn min_spacing_is_per_type() {
        let mut policy = SafetyPolicy::default();
        policy.record("dwell", Timestamp(0));

        let err = policy
            .permits("dwell", &descriptor(1_000), Timestamp(999))
            .unwrap_err();
        assert!(matches!(err, SafetyViolation::TooFrequent { elapsed_ms: 999, .. }));
        assert!(policy
            .permits("undo-loop", &descriptor(1_000), Timestamp(999))
            .is_ok());
        assert!(policy
            .permits("dwell", &descriptor(1_000), Timestamp(1_000))
            .is_ok());
    }

    #[test]
    fn overlong_duration_is_rejected() {
        let policy = SafetyPolicy::default();
        assert!(policy
            .permits("dwell", &descriptor(5_000), Timestamp(0))
            .is_ok());
        let err = policy
            .permits("dwell", &descriptor(5_001), Timestamp(0))
            .unwrap_err();
        assert_eq!(
            err,
            SafetyViolation::DurationTooLong {
                duration_ms: 5_001,
                max_ms: 5_000
            }
        );
    }

    #[test]
    fn empty_inputs_are_invalid() {
        let policy = SafetyPolicy::default();
        assert_eq!(
            policy.permits("", &descriptor(100), Timestamp(0)),
            Err(SafetyViolation::InvalidInput)
        );
    }

    #[test]
    fn reset_forgets_history() {
        let mut policy = SafetyPolicy::default();
        policy.record("dwell", Timestamp(0));
        policy.reset();
        assert_eq!(policy.admissions_in_window(Timestamp(1)), 0);
        // Spacing for the type is forgotten too.
        assert!(policy
            .permits("dwell", &descriptor(100), Timestamp(1))
            .is_ok());
    }
}
