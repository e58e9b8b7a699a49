/// Faults raised by the effect applier while applying or reverting an action.
#[derive(Debug, thiserror::Error)]
pub enum EffectError {
    #[error("failed to apply {pattern}: {reason}")]
    ApplyFailed { pattern: String, reason: String },

    #[error("failed to clear active effect: {reason}")]
    ClearFailed { reason: String },

    #[error("target {target} is gone")]
    TargetGone { target: String },
}
