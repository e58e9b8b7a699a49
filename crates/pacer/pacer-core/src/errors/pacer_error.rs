use super::{ConfigError, EffectError, ResolveError};

/// Top-level error for everything the host can observe.
#[derive(Debug, thiserror::Error)]
pub enum PacerError {
    #[error("config error: {0}")]
    Config(#[from] ConfigError),

    #[error("resolve error: {0}")]
    Resolve(#[from] ResolveError),

    #[error("effect error: {0}")]
    Effect(#[from] EffectError),

    #[error("engine lock poisoned: {reason}")]
    LockPoisoned { reason: String },

    #[error("runtime stopped: {reason}")]
    RuntimeStopped { reason: String },
}

pub type PacerResult<T> = Result<T, PacerError>;
