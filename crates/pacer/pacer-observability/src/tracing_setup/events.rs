//! Structured log events for every engine decision.
//!
//! Each function emits a `tracing` event with structured fields.

/// Log an accepted submission.
pub fn signal_accepted(signal_id: &str, signal_type: &str, priority: u8, backlog_len: usize) {
    tracing::debug!(
        event = "signal_accepted",
        signal_id = %signal_id,
        signal_type = %signal_type,
        priority = priority,
        backlog_len = backlog_len,
        "signal accepted"
    );
}

/// Log a submission rejected by the intake cooldown.
pub fn signal_throttled(signal_type: &str) {
    tracing::debug!(
        event = "signal_throttled",
        signal_type = %signal_type,
        "signal throttled"
    );
}

/// Log an eviction caused by backlog overflow.
pub fn backlog_overflow(evicted_type: &str, evicted_priority: u8, capacity: usize) {
    tracing::warn!(
        event = "backlog_overflow",
        evicted_type = %evicted_type,
        evicted_priority = evicted_priority,
        capacity = capacity,
        "backlog overflow, dropped oldest signal"
    );
}

/// Log the start of a drain pass.
pub fn drain_started(pass: u64, backlog_len: usize) {
    tracing::debug!(
        event = "drain_started",
        pass = pass,
        backlog_len = backlog_len,
        "drain started"
    );
}

/// Log the end of a drain pass.
pub fn drain_completed(pass: u64, processed: usize, admitted: usize) {
    tracing::info!(
        event = "drain_completed",
        pass = pass,
        processed = processed,
        admitted = admitted,
        "drain completed"
    );
}

/// Log an admitted action.
pub fn action_admitted(signal_type: &str, pattern: &str, priority: u8, duration_ms: u64) {
    tracing::info!(
        event = "action_admitted",
        signal_type = %signal_type,
        pattern = %pattern,
        priority = priority,
        duration_ms = duration_ms,
        "action admitted"
    );
}

/// Log a policy rejection (safety or preemption).
pub fn action_rejected(signal_type: &str, pattern: &str, reason: &str) {
    tracing::info!(
        event = "action_rejected",
        signal_type = %signal_type,
        pattern = %pattern,
        reason = %reason,
        "action rejected"
    );
}

/// Log a signal the resolver had no action for.
pub fn action_unresolved(signal_type: &str) {
    tracing::debug!(
        event = "action_unresolved",
        signal_type = %signal_type,
        "no action for signal"
    );
}

/// Log an action expiring on its own timer.
pub fn action_expired(pattern: &str) {
    tracing::info!(
        event = "action_expired",
        pattern = %pattern,
        "action expired"
    );
}

/// Log an active action being superseded by a more urgent one.
pub fn action_preempted(previous: &str, next: &str) {
    tracing::info!(
        event = "action_preempted",
        previous = %previous,
        next = %next,
        "action preempted"
    );
}

/// Log an emergency reset of the whole engine.
pub fn emergency_reset(cause: &str) {
    tracing::error!(
        event = "emergency_reset",
        cause = %cause,
        "emergency reset"
    );
}

/// Log a fault raised by the effect applier that was absorbed.
pub fn effect_fault(stage: &str, error: &str) {
    tracing::warn!(
        event = "effect_fault",
        stage = %stage,
        error = %error,
        "effect applier fault"
    );
}

/// Log the runtime driver starting.
pub fn driver_started(next_deadline_ms: Option<u64>) {
    tracing::info!(
        event = "driver_started",
        next_deadline_ms = ?next_deadline_ms,
        "pacer driver started"
    );
}

/// Log the runtime driver exiting.
pub fn driver_stopped(reason: &str) {
    tracing::info!(
        event = "driver_stopped",
        reason = %reason,
        "pacer driver stopped"
    );
}
