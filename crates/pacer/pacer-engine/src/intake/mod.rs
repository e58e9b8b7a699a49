//! Intake gate: per-type cooldown applied before a signal reaches the backlog.

pub mod cooldown;

pub use cooldown::CooldownTable;
