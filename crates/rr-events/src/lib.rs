pub mod bus;
pub mod listeners;
pub mod types;

pub use crate::bus::EventBus;
pub use crate::listeners::{ListenerId, Listeners};
pub use crate::types::{EventRecord, EventSource};
