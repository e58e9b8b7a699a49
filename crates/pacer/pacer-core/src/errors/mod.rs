//! Error handling for pacer.
//! One error enum per concern, `thiserror` only.
//!
//! Policy rejections (cooldown, safety, preemption) are not errors and never
//! appear here; they are reported as plain outcomes by the engine.

pub mod config_error;
pub mod effect_error;
pub mod pacer_error;
pub mod resolve_error;

pub use config_error::ConfigError;
pub use effect_error::EffectError;
pub use pacer_error::{PacerError, PacerResult};
pub use resolve_error::ResolveError;
