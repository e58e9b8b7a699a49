//! PacerEngine: intake gate, serialized drain loop, and active-action lifecycle.
//!
//! All state is owned by the engine and mutated only through `&mut self`, so
//! each intake, expiry, or drain turn is atomic. Time comes from an injected
//! [`IClock`]; timers are tasks on that clock, fired by [`PacerEngine::advance`].

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use pacer_core::config::{IntakeConfig, PacerConfig};
use pacer_core::errors::{ConfigError, PacerError, PacerResult};
use pacer_core::traits::{IClock, IEffectApplier, IResolver, MonotonicClock};
use pacer_core::{ActionDescriptor, Payload, Signal, SignalRegistry, Timestamp};
use pacer_observability::tracing_setup::events;

use crate::admission::{ActiveAction, ActiveSlot, AdmissionOutcome, SafetyPolicy};
use crate::backlog::PriorityBacklog;
use crate::intake::CooldownTable;
use crate::reporter::{EngineCounters, EngineSnapshot, ExecutionReporter};
use crate::resolver::RegistryResolver;
use crate::scheduling::{SettleTrigger, TimerHandle, TimerKind, TimerQueue};

/// Result of one `drain()` call.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DrainReport {
    /// Pass number, or `None` if the call was a no-op.
    pub pass: Option<u64>,
    pub outcomes: Vec<AdmissionOutcome>,
    /// A fault triggered an emergency reset during this pass.
    pub faulted: bool,
}

impl DrainReport {
    pub fn ran(&self) -> bool {
        self.pass.is_some()
    }

    pub fn processed(&self) -> usize {
        self.outcomes.len()
    }

    pub fn admitted(&self) -> usize {
        self.outcomes.iter().filter(|o| o.is_admitted()).count()
    }
}

/// Result of one `advance()` call.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AdvanceReport {
    pub drain_passes: usize,
    pub admitted: usize,
    pub expired: usize,
}

/// Builds a [`PacerEngine`] from config plus collaborators.
pub struct EngineBuilder {
    config: PacerConfig,
    resolver: Option<Box<dyn IResolver>>,
    clock: Option<Arc<dyn IClock>>,
}

impl EngineBuilder {
    pub fn new(config: PacerConfig) -> Self {
        Self {
            config,
            resolver: None,
            clock: None,
        }
    }

    /// Replace the registry-backed resolver.
    pub fn resolver(mut self, resolver: impl IResolver + 'static) -> Self {
        self.resolver = Some(Box::new(resolver));
        self
    }

    /// Use a specific clock. Defaults to [`MonotonicClock`].
    pub fn clock(mut self, clock: Arc<dyn IClock>) -> Self {
        self.clock = Some(clock);
        self
    }

    pub fn build(self, applier: impl IEffectApplier + 'static) -> Result<PacerEngine, ConfigError> {
        self.config.validate()?;
        let registry = Arc::new(SignalRegistry::from_config(&self.config.registry)?);
        let resolver = self
            .resolver
            .unwrap_or_else(|| Box::new(RegistryResolver::new(Arc::clone(&registry))));
        let clock = self
            .clock
            .unwrap_or_else(|| Arc::new(MonotonicClock::new()));

        Ok(PacerEngine {
            backlog: PriorityBacklog::new(self.config.intake.backlog_capacity),
            settle: SettleTrigger::new(self.config.intake.settle_window()),
            safety: SafetyPolicy::new(self.config.safety.clone()),
            intake: self.config.intake,
            registry,
            resolver,
            applier: Box::new(applier),
            clock,
            cooldowns: CooldownTable::new(),
            timers: TimerQueue::new(),
            active: ActiveSlot::new(),
            is_draining: Arc::new(AtomicBool::new(false)),
            reporter: ExecutionReporter::new(),
        })
    }
}

/// The admission-control and priority scheduler.
pub struct PacerEngine {
    intake: IntakeConfig,
    registry: Arc<SignalRegistry>,
    resolver: Box<dyn IResolver>,
    applier: Box<dyn IEffectApplier>,
    clock: Arc<dyn IClock>,
    cooldowns: CooldownTable,
    backlog: PriorityBacklog,
    timers: TimerQueue,
    settle: SettleTrigger,
    safety: SafetyPolicy,
    active: ActiveSlot,
    /// Guard: only one drain pass can run at a time.
    is_draining: Arc<AtomicBool>,
    reporter: ExecutionReporter,
}

impl PacerEngine {
    pub fn builder(config: PacerConfig) -> EngineBuilder {
        EngineBuilder::new(config)
    }

    // --- Intake ---------------------------------------------------------

    /// Offer a signal. Returns whether the intake gate accepted it, not
    /// whether it will eventually be admitted.
    pub fn submit(&mut self, signal_type: &str, payload: Payload) -> bool {
        if signal_type.is_empty() {
            tracing::debug!("empty signal type ignored");
            return false;
        }
        let now = self.clock.now();
        self.reporter.counters_mut().submitted += 1;

        self.cooldowns.purge_expired(now);
        if self.cooldowns.is_cooling(signal_type, now) {
            self.reporter.counters_mut().throttled += 1;
            events::signal_throttled(signal_type);
            return false;
        }

        self.cooldowns.arm(signal_type, now, self.intake.cooldown());
        let priority = self.registry.intake_priority(signal_type);
        let signal = Signal::new(signal_type, payload, now, priority);
        let signal_id = signal.id.clone();

        if let Some(evicted) = self.backlog.insert(signal) {
            self.reporter.counters_mut().evicted += 1;
            events::backlog_overflow(
                &evicted.signal_type,
                evicted.priority.value(),
                self.backlog.capacity(),
            );
        }
        self.reporter.counters_mut().accepted += 1;
        events::signal_accepted(&signal_id, signal_type, priority.value(), self.backlog.len());

        self.settle.arm(&mut self.timers, now);
        true
    }

    /// True while `signal_type` is under its intake cooldown.
    pub fn is_throttled(&self, signal_type: &str) -> bool {
        self.cooldowns.peek(signal_type, self.clock.now())
    }

    // --- Timers ---------------------------------------------------------

    /// Fire every timer due at the clock's current time, in deadline order.
    pub fn advance(&mut self) -> AdvanceReport {
        let now = self.clock.now();
        self.cooldowns.purge_expired(now);
        let mut report = AdvanceReport::default();
        while let Some((handle, kind)) = self.timers.pop_due(now) {
            match kind {
                TimerKind::Settle => {
                    if self.settle.fire(handle) {
                        let drained = self.drain();
                        if drained.ran() {
                            report.drain_passes += 1;
                            report.admitted += drained.admitted();
                        }
                    }
                }
                TimerKind::Expiry => {
                    if self.expire(handle) {
                        report.expired += 1;
                    }
                }
            }
        }
        report
    }

    /// When the next timer is due, if any.
    pub fn next_deadline(&self) -> Option<Timestamp> {
        self.timers.next_deadline()
    }

    // --- Drain loop -----------------------------------------------------

    /// Process the whole backlog, one signal at a time, in backlog order.
    ///
    /// A call while a pass is already running, or with nothing queued, is a
    /// no-op. Rejected signals are dropped, never requeued.
    pub fn drain(&mut self) -> DrainReport {
        if self.backlog.is_empty() {
            return DrainReport::default();
        }
        if self
            .is_draining
            .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .is_err()
        {
            return DrainReport::default();
        }

        let counters = self.reporter.counters_mut();
        counters.drain_passes += 1;
        let pass = counters.drain_passes;
        events::drain_started(pass, self.backlog.len());

        let mut report = DrainReport {
            pass: Some(pass),
            ..DrainReport::default()
        };
        while let Some(signal) = self.backlog.pop_highest() {
            self.reporter.record_processed(&signal.signal_type);
            match self.process(&signal) {
                Ok(outcome) => {
                    self.reporter.record_outcome(&outcome);
                    report.outcomes.push(outcome);
                }
                Err(fault) => {
                    report.faulted = true;
                    self.emergency_reset(&fault);
                }
            }
        }

        // Release the guard.
        self.is_draining.store(false, Ordering::SeqCst);
        events::drain_completed(pass, report.processed(), report.admitted());
        report
    }

    fn process(&mut self, signal: &Signal) -> PacerResult<AdmissionOutcome> {
        let Some(descriptor) = self
            .resolver
            .resolve(&signal.signal_type, &signal.payload)?
        else {
            events::action_unresolved(&signal.signal_type);
            return Ok(AdmissionOutcome::Unresolved);
        };

        let now = self.clock.now();
        if let Err(violation) = self.safety.permits(&signal.signal_type, &descriptor, now) {
            events::action_rejected(
                &signal.signal_type,
                &descriptor.pattern_name,
                &violation.to_string(),
            );
            return Ok(AdmissionOutcome::RejectedBySafety(violation));
        }

        if !self.active.should_admit(descriptor.priority) {
            let active = self
                .active
                .current()
                .map(|a| a.pattern().to_string())
                .unwrap_or_default();
            events::action_rejected(
                &signal.signal_type,
                &descriptor.pattern_name,
                &format!("{active} is equal or more urgent"),
            );
            return Ok(AdmissionOutcome::RejectedByPreemption { active });
        }

        self.admit(signal, descriptor, now)
    }

    fn admit(
        &mut self,
        signal: &Signal,
        descriptor: ActionDescriptor,
        now: Timestamp,
    ) -> PacerResult<AdmissionOutcome> {
        // Cancel the prior expiry first so it can never clear the new action.
        let preempted = match self.active.take() {
            Some(prior) => {
                self.timers.cancel(prior.expiry);
                events::action_preempted(prior.pattern(), &descriptor.pattern_name);
                self.applier.clear()?;
                Some(prior.descriptor.pattern_name)
            }
            None => None,
        };

        let pattern = descriptor.pattern_name.clone();
        let priority = descriptor.priority;
        let duration_ms = descriptor.duration_ms;
        let expires_at = now + descriptor.duration();
        let expiry = self.timers.schedule(expires_at, TimerKind::Expiry);
        self.active.install(ActiveAction {
            signal_type: signal.signal_type.clone(),
            descriptor,
            admitted_at: now,
            expires_at,
            expiry,
        });

        if let Some(active) = self.active.current() {
            self.applier.apply(&active.descriptor)?;
        }
        self.safety.record(&signal.signal_type, now);
        self.reporter
            .record_admission(&signal.signal_type, &pattern, priority, now);
        events::action_admitted(&signal.signal_type, &pattern, priority.value(), duration_ms);

        Ok(AdmissionOutcome::Admitted { pattern, preempted })
    }

    // --- Active action lifecycle ---------------------------------------

    fn expire(&mut self, handle: TimerHandle) -> bool {
        let Some(action) = self.active.take_if_expiring(handle) else {
            return false;
        };
        self.reporter.counters_mut().expired += 1;
        events::action_expired(action.pattern());
        if let Err(err) = self.applier.clear() {
            self.emergency_reset(&PacerError::from(err));
        }
        true
    }

    /// Cancel the active action's timer and revert it now.
    /// Returns false if nothing was active.
    pub fn clear_active(&mut self) -> bool {
        let Some(action) = self.active.take() else {
            return false;
        };
        self.timers.cancel(action.expiry);
        if let Err(err) = self.applier.clear() {
            self.emergency_reset(&PacerError::from(err));
        }
        true
    }

    /// Clear backlog, active action, safety history, and cooldowns.
    /// Synchronous and idempotent. Counters are kept.
    pub fn reset(&mut self) {
        if let Some(action) = self.active.take() {
            self.timers.cancel(action.expiry);
            if let Err(err) = self.applier.clear() {
                self.reporter.counters_mut().effect_faults += 1;
                events::effect_fault("reset", &err.to_string());
            }
        }
        self.settle.cancel(&mut self.timers);
        self.timers.clear();
        self.backlog.clear();
        self.cooldowns.clear();
        self.safety.reset();
        self.reporter.clear_history();
    }

    fn emergency_reset(&mut self, cause: &PacerError) {
        let counters = self.reporter.counters_mut();
        counters.emergency_resets += 1;
        if matches!(cause, PacerError::Effect(_)) {
            counters.effect_faults += 1;
        }
        events::emergency_reset(&cause.to_string());
        self.reset();
    }

    // --- Reporting ------------------------------------------------------

    /// Read-only view of the current state.
    pub fn snapshot(&self) -> EngineSnapshot {
        let now = self.clock.now();
        EngineSnapshot {
            active_action: self.active.current().map(Into::into),
            backlog_length: self.backlog.len(),
            is_draining: self.is_draining(),
            settle_pending: self.settle.is_pending(),
            settle_rearms: self.settle.rearms(),
            cooldown_entries: self.cooldowns.len(),
            cooled_down_types: self.cooldowns.active_types(now),
            last_admitted: self.reporter.last_admitted().cloned(),
            last_processed: self.reporter.last_processed().map(str::to_string),
            counters: *self.reporter.counters(),
            captured_at: now,
        }
    }

    pub fn is_draining(&self) -> bool {
        self.is_draining.load(Ordering::SeqCst)
    }

    /// Shared drain guard, for lock-free `is_draining` checks by a driver.
    pub fn draining_flag(&self) -> Arc<AtomicBool> {
        Arc::clone(&self.is_draining)
    }

    pub fn active(&self) -> Option<&ActiveAction> {
        self.active.current()
    }

    pub fn backlog(&self) -> &PriorityBacklog {
        &self.backlog
    }

    pub fn counters(&self) -> &EngineCounters {
        self.reporter.counters()
    }

    pub fn registry(&self) -> &SignalRegistry {
        &self.registry
    }

    pub fn now(&self) -> Timestamp {
        self.clock.now()
    }
}

impl std::fmt::Debug for PacerEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PacerEngine")
            .field("backlog", &self.backlog.len())
            .field("active", &self.active.current().map(|a| a.pattern()))
            .field("is_draining", &self.is_draining())
            .field("pending_timers", &self.timers.len())
            .finish()
    }
}
