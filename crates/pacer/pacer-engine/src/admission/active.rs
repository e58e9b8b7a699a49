//! The single active-action slot and its preemption rule.

use serde::Serialize;

use pacer_core::{ActionDescriptor, Priority, Timestamp};

use crate::scheduling::TimerHandle;

/// The action currently in effect.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ActiveAction {
    pub signal_type: String,
    pub descriptor: ActionDescriptor,
    pub admitted_at: Timestamp,
    pub expires_at: Timestamp,
    #[serde(skip)]
    pub expiry: TimerHandle,
}

impl ActiveAction {
    pub fn pattern(&self) -> &str {
        &self.descriptor.pattern_name
    }

    pub fn priority(&self) -> Priority {
        self.descriptor.priority
    }
}

/// Holds at most one active action.
#[derive(Debug, Default)]
pub struct ActiveSlot {
    current: Option<ActiveAction>,
}

impl ActiveSlot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Admit unconditionally when idle; otherwise only a strictly more urgent
    /// priority wins. Ties go to the incumbent.
    pub fn should_admit(&self, priority: Priority) -> bool {
        self.current
            .as_ref()
            .map_or(true, |active| priority.outranks(active.priority()))
    }

    /// Install `action`, returning whatever it displaced.
    pub fn install(&mut self, action: ActiveAction) -> Option<ActiveAction> {
        self.current.replace(action)
    }

    pub fn take(&mut self) -> Option<ActiveAction> {
        self.current.take()
    }

    /// Take the active action only if `handle` is its expiry timer.
    pub fn take_if_expiring(&mut self, handle: TimerHandle) -> Option<ActiveAction> {
        if self.current.as_ref()?.expiry == handle {
            self.current.take()
        } else {
            None
        }
    }

    pub fn current(&self) -> Option<&ActiveAction> {
        self.current.as_ref()
    }
}
