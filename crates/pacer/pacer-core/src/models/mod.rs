mod action;
mod priority;
mod signal;
mod timestamp;

pub use action::{ActionDescriptor, Target};
pub use priority::Priority;
pub use signal::{Payload, Signal};
pub use timestamp::Timestamp;
