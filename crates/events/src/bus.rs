//! Publish/subscribe abstraction (mechanics only).
//!
//! The bus is the observer mechanism behind every state container in the
//! workspace: the owner publishes after each applied change, and any number of
//! subscribers receive a copy.
//!
//! - **Broadcast**: every live subscription gets every message published after it
//!   subscribed.
//! - **Ordered per publisher**: messages arrive in publication order.
//! - **No persistence**: a subscriber created later does not see earlier messages;
//!   it reads the current state from the owner instead.

use std::sync::mpsc::{Receiver, TryRecvError};

/// A subscription to a message stream.
///
/// ## Usage Pattern
///
/// ```ignore
/// let subscription = store.subscribe();
/// store.remove_item(&name)?;
///
/// while let Ok(change) = subscription.try_recv() {
///     render(&change.snapshot);
/// }
/// ```
///
/// Subscriptions are designed for single-threaded consumption. Dropping one
/// unregisters it on the next publish.
#[derive(Debug)]
pub struct Subscription<M> {
    receiver: Receiver<M>,
}

impl<M> Subscription<M> {
    pub fn new(receiver: Receiver<M>) -> Self {
        Self { receiver }
    }

    /// Try to receive a message without blocking.
    pub fn try_recv(&self) -> Result<M, TryRecvError> {
        self.receiver.try_recv()
    }

    /// Drain everything currently queued, without blocking.
    pub fn drain(&self) -> Vec<M> {
        self.receiver.try_iter().collect()
    }
}

/// Domain-agnostic pub/sub bus.
///
/// `publish()` can fail (e.g. a poisoned lock); failures are surfaced to the
/// caller. The trait requires `Send + Sync` so a bus can sit inside shared state.
pub trait EventBus<M>: Send + Sync {
    type Error: core::fmt::Debug + Send + Sync + 'static;

    fn publish(&self, message: M) -> Result<(), Self::Error>;

    fn subscribe(&self) -> Subscription<M>;
}
