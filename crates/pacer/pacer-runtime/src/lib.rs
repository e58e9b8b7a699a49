//! # pacer-runtime
//!
//! Runs a [`PacerEngine`](pacer_engine::PacerEngine) on tokio. A single
//! driver task sleeps until the engine's next timer deadline and fires it;
//! hosts talk to the engine through a cloneable [`PacerHandle`].

pub mod clock;
pub mod driver;

pub use clock::TokioClock;
pub use driver::{PacerHandle, PacerRuntime};
