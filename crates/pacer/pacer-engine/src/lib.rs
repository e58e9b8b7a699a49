//! # pacer-engine
//!
//! Admission control and priority scheduling for ephemeral, self-expiring
//! actions.
//!
//! Signals pass a per-type cooldown at intake, wait in a bounded priority
//! backlog, and are drained in one pass once a short settle window goes quiet.
//! Each drained signal is resolved into an action, checked against the safety
//! policy and the preemption rule, and, if admitted, becomes the single active
//! action until it expires or something more urgent replaces it.

pub mod admission;
pub mod backlog;
pub mod engine;
pub mod intake;
pub mod reporter;
pub mod resolver;
pub mod scheduling;

pub use admission::{AdmissionOutcome, SafetyViolation};
pub use engine::{AdvanceReport, DrainReport, EngineBuilder, PacerEngine};
pub use reporter::{ActiveActionView, AdmissionRecord, EngineCounters, EngineSnapshot};
pub use resolver::RegistryResolver;
