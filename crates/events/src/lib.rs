//! `shopcart-events`: change notification plumbing.
//!
//! State containers publish facts (`Event`) on a bus; observers hold a
//! `Subscription` and drain it at their own pace.

pub mod bus;
pub mod event;
pub mod in_memory_bus;

pub use bus::{EventBus, Subscription};
pub use event::Event;
pub use in_memory_bus::{InMemoryBusError, InMemoryEventBus};
