//! # pacer-core
//!
//! Foundation crate for the pacer admission scheduler.
//! Defines the signal and action model, the static signal registry,
//! collaborator traits, errors, and config. Every other crate depends on this.

pub mod config;
pub mod errors;
pub mod models;
pub mod registry;
pub mod traits;

// Re-export the most commonly used types at the crate root.
pub use config::PacerConfig;
pub use errors::{PacerError, PacerResult};
pub use models::{ActionDescriptor, Payload, Priority, Signal, Target, Timestamp};
pub use registry::{Lookup, PatternEntry, SignalKind, SignalRegistry};
