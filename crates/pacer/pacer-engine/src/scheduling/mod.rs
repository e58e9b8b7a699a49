//! Logical-clock scheduling: one-shot timers and the settle (debounce) trigger.

pub mod settle;
pub mod timers;

pub use settle::SettleTrigger;
pub use timers::{TimerHandle, TimerKind, TimerQueue};
