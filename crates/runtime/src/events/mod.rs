//! Topic-based event bus for session and timer events.
mod bus;
mod types;

pub use bus::{Event, EventBus, Topic};
pub use types::{SessionEvent, TimerEvent};
