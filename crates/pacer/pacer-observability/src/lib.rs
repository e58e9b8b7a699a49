//! # pacer-observability
//!
//! Tracing subscriber setup plus one structured event function per engine
//! decision, so every crate logs the same field names.

pub mod tracing_setup;

pub use tracing_setup::{init_from_config, init_tracing, init_tracing_with_filter};
