mod clock;
mod effect_applier;
mod resolver;

pub use clock::{IClock, ManualClock, MonotonicClock};
pub use effect_applier::IEffectApplier;
pub use resolver::IResolver;
