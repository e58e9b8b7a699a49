use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex, PoisonError};

use pacer_core::errors::{EffectError, ResolveError};
use pacer_core::traits::{IEffectApplier, IResolver};
use pacer_core::{ActionDescriptor, Payload, Priority, Target};

/// Build a descriptor with an auto target and empty payload.
pub fn descriptor(pattern: &str, priority: u8, duration_ms: u64) -> ActionDescriptor {
    ActionDescriptor {
        pattern_name: pattern.to_string(),
        response_kind: pattern.to_string(),
        target: Target::Auto,
        duration_ms,
        priority: Priority(priority),
        payload: Payload::Null,
    }
}

/// One call observed by an applier double.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EffectCall {
    Apply { pattern: String, target: Target },
    Clear,
}

/// Shared, cloneable record of effect calls.
#[derive(Debug, Clone, Default)]
pub struct EffectLog {
    calls: Arc<Mutex<Vec<EffectCall>>>,
}

impl EffectLog {
    fn push(&self, call: EffectCall) {
        self.calls
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(call);
    }

    pub fn calls(&self) -> Vec<EffectCall> {
        self.calls
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Patterns passed to `apply`, in order.
    pub fn applied(&self) -> Vec<String> {
        self.calls()
            .into_iter()
            .filter_map(|call| match call {
                EffectCall::Apply { pattern, .. } => Some(pattern),
                EffectCall::Clear => None,
            })
            .collect()
    }

    pub fn clear_count(&self) -> usize {
        self.calls()
            .iter()
            .filter(|call| matches!(call, EffectCall::Clear))
            .count()
    }
}

/// Applier that records every call and never fails.
#[derive(Debug, Clone, Default)]
pub struct RecordingApplier {
    log: EffectLog,
}

impl RecordingApplier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn log(&self) -> EffectLog {
        self.log.clone()
    }
}

impl IEffectApplier for RecordingApplier {
    fn apply(&mut self, descriptor: &ActionDescriptor) -> Result<(), EffectError> {
        self.log.push(EffectCall::Apply {
            pattern: descriptor.pattern_name.clone(),
            target: descriptor.target.clone(),
        });
        Ok(())
    }

    fn clear(&mut self) -> Result<(), EffectError> {
        self.log.push(EffectCall::Clear);
        Ok(())
    }
}

/// Applier that records calls and fails on demand.
#[derive(Debug, Clone, Default)]
pub struct FailingApplier {
    log: EffectLog,
    fail_apply: HashSet<String>,
    fail_clear: bool,
}

impl FailingApplier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fail every `apply` for `pattern`.
    pub fn fail_apply_on(mut self, pattern: &str) -> Self {
        self.fail_apply.insert(pattern.to_string());
        self
    }

    /// Fail every `clear`.
    pub fn fail_clear(mut self) -> Self {
        self.fail_clear = true;
        self
    }

    pub fn log(&self) -> EffectLog {
        self.log.clone()
    }
}

impl IEffectApplier for FailingApplier {
    fn apply(&mut self, descriptor: &ActionDescriptor) -> Result<(), EffectError> {
        self.log.push(EffectCall::Apply {
            pattern: descriptor.pattern_name.clone(),
            target: descriptor.target.clone(),
        });
        if self.fail_apply.contains(&descriptor.pattern_name) {
            return Err(EffectError::ApplyFailed {
                pattern: descriptor.pattern_name.clone(),
                reason: "scripted failure".to_string(),
            });
        }
        Ok(())
    }

    fn clear(&mut self) -> Result<(), EffectError> {
        self.log.push(EffectCall::Clear);
        if self.fail_clear {
            return Err(EffectError::ClearFailed {
                reason: "scripted failure".to_string(),
            });
        }
        Ok(())
    }
}

#[derive(Debug, Clone)]
enum Script {
    Resolve(ActionDescriptor),
    Nothing,
    Fail,
}

/// Resolver driven by a fixed table. Unknown types resolve to nothing.
#[derive(Debug, Clone, Default)]
pub struct ScriptedResolver {
    scripts: HashMap<String, Script>,
}

impl ScriptedResolver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, signal_type: &str, descriptor: ActionDescriptor) -> Self {
        self.scripts
            .insert(signal_type.to_string(), Script::Resolve(descriptor));
        self
    }

    pub fn nothing_for(mut self, signal_type: &str) -> Self {
        self.scripts.insert(signal_type.to_string(), Script::Nothing);
        self
    }

    pub fn failing(mut self, signal_type: &str) -> Self {
        self.scripts.insert(signal_type.to_string(), Script::Fail);
        self
    }
}

impl IResolver for ScriptedResolver {
    fn resolve(
        &self,
        signal_type: &str,
        payload: &Payload,
    ) -> Result<Option<ActionDescriptor>, ResolveError> {
        match self.scripts.get(signal_type) {
            Some(Script::Resolve(descriptor)) => Ok(Some(ActionDescriptor {
                payload: payload.clone(),
                ..descriptor.clone()
            })),
            Some(Script::Fail) => Err(ResolveError::Unavailable {
                reason: format!("scripted failure for {signal_type}"),
            }),
            Some(Script::Nothing) | None => Ok(None),
        }
    }
}
