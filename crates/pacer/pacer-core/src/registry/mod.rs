//! Static signal registry: a validated `SignalKind` → pattern table loaded once.
//!
//! Optional priorities and durations from config are defaulted here, at load
//! time, so no call site ever has to supply its own fallback.

mod signal_kind;

pub use signal_kind::{SignalKind, UnknownSignalKind};

use std::collections::HashMap;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::config::{PatternConfig, RegistryConfig};
use crate::errors::ConfigError;
use crate::models::Priority;

/// A fully-defaulted registry entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PatternEntry {
    pub pattern: String,
    pub signal: SignalKind,
    pub response: String,
    pub priority: Priority,
    pub duration_ms: u64,
}

impl PatternEntry {
    fn from_config(pattern: &PatternConfig, default_duration_ms: u64) -> Self {
        Self {
            pattern: pattern.name.clone(),
            signal: pattern.signal,
            response: pattern.response.clone(),
            priority: pattern.priority.map(Priority).unwrap_or(Priority::LOWEST),
            duration_ms: pattern.duration_ms.unwrap_or(default_duration_ms),
        }
    }

    pub fn duration(&self) -> Duration {
        Duration::from_millis(self.duration_ms)
    }
}

/// Result of a registry lookup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Lookup<'a> {
    Registered(&'a PatternEntry),
    Unregistered,
}

impl<'a> Lookup<'a> {
    pub fn entry(self) -> Option<&'a PatternEntry> {
        match self {
            Lookup::Registered(entry) => Some(entry),
            Lookup::Unregistered => None,
        }
    }
}

/// Immutable signal → pattern table.
#[derive(Debug, Clone)]
pub struct SignalRegistry {
    entries: HashMap<SignalKind, PatternEntry>,
    targets: Vec<String>,
}

impl SignalRegistry {
    /// Build the registry, defaulting optional fields and rejecting duplicate bindings.
    pub fn from_config(config: &RegistryConfig) -> Result<Self, ConfigError> {
        let mut entries: HashMap<SignalKind, PatternEntry> = HashMap::new();
        for pattern in &config.patterns {
            let entry = PatternEntry::from_config(pattern, config.default_duration_ms);
            if let Some(existing) = entries.get(&pattern.signal) {
                return Err(ConfigError::DuplicateSignal {
                    signal: pattern.signal.to_string(),
                    first: existing.pattern.clone(),
                    second: pattern.name.clone(),
                });
            }
            entries.insert(pattern.signal, entry);
        }
        Ok(Self {
            entries,
            targets: config.targets.clone(),
        })
    }

    /// Look up the pattern bound to a raw signal type string.
    pub fn lookup(&self, signal_type: &str) -> Lookup<'_> {
        signal_type
            .parse::<SignalKind>()
            .ok()
            .and_then(|kind| self.entries.get(&kind))
            .map_or(Lookup::Unregistered, Lookup::Registered)
    }

    /// Backlog priority for a signal type. Unregistered types rank lowest.
    pub fn intake_priority(&self, signal_type: &str) -> Priority {
        self.lookup(signal_type)
            .entry()
            .map_or(Priority::LOWEST, |entry| entry.priority)
    }

    /// Known target ids. Empty means unrestricted.
    pub fn targets(&self) -> &[String] {
        &self.targets
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for SignalRegistry {
    fn default() -> Self {
        let config = RegistryConfig::default();
        let entries = config
            .patterns
            .iter()
            .map(|p| (p.signal, PatternEntry::from_config(p, config.default_duration_ms)))
            .collect();
        Self {
            entries,
            targets: config.targets,
        }
    }
}
