//! Cart Store: the single owner of cart state.
//!
//! Every mutation goes through [`CartStore::dispatch`]:
//!
//! ```text
//! CartCommand
//!   ↓
//! 1. Cart::handle   (pure decision, may be a no-op)
//!   ↓
//! 2. Cart::apply    (every resulting event)
//!   ↓
//! 3. Swap in a new Arc<CartSnapshot>
//!   ↓
//! 4. Publish one CartChanged per event to subscribers
//! ```
//!
//! All four steps run under the store lock, so a subscriber never observes a
//! partially applied command and changes arrive in the order they were applied.

use std::sync::{Arc, Mutex, PoisonError};

use thiserror::Error;

use shopcart_core::{Aggregate, CartId, Currency, DomainError};
use shopcart_events::{Event, EventBus, InMemoryBusError, InMemoryEventBus, Subscription};

use crate::cart::{Cart, CartCommand, CartEvent, CartSnapshot};
use crate::item::{ItemName, LineItem, Quantity};

/// Notification sent to subscribers after a change is applied.
#[derive(Debug, Clone)]
pub struct CartChanged {
    pub event: CartEvent,
    /// State after the whole command was applied.
    pub snapshot: Arc<CartSnapshot>,
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DispatchError {
    /// The command was rejected by the cart.
    #[error(transparent)]
    Domain(#[from] DomainError),

    /// A previous mutation panicked while holding the store lock.
    #[error("cart store lock poisoned")]
    Poisoned,

    /// State was applied but subscribers could not be notified.
    #[error("failed to notify subscribers: {0}")]
    Publish(#[from] InMemoryBusError),
}

#[derive(Debug)]
struct StoreState {
    cart: Cart,
    snapshot: Arc<CartSnapshot>,
}

/// Shared, process-wide cart state container.
///
/// Hand it out as `Arc<CartStore>`; consumers read snapshots and subscribe, and
/// only `add_item`, `remove_item` and `update_quantity` mutate.
#[derive(Debug)]
pub struct CartStore {
    state: Mutex<StoreState>,
    bus: InMemoryEventBus<CartChanged>,
}

impl CartStore {
    /// A store holding an empty cart.
    pub fn new(cart_id: CartId, currency: Currency) -> Self {
        let cart = Cart::new(cart_id, currency);
        let snapshot = Arc::new(cart.snapshot());
        Self {
            state: Mutex::new(StoreState { cart, snapshot }),
            bus: InMemoryEventBus::new(),
        }
    }

    /// Current snapshot.
    ///
    /// The snapshot is only ever replaced wholesale after a command is fully
    /// applied, so it is still consistent if the lock was poisoned.
    pub fn snapshot(&self) -> Arc<CartSnapshot> {
        let state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
        Arc::clone(&state.snapshot)
    }

    /// Receive a `CartChanged` for every change applied from now on.
    pub fn subscribe(&self) -> Subscription<CartChanged> {
        self.bus.subscribe()
    }

    /// Insert `item`, or raise an existing entry's quantity by `item.quantity`.
    pub fn add_item(&self, item: LineItem) -> Result<(), DispatchError> {
        self.dispatch(CartCommand::add_item(item)).map(|_| ())
    }

    /// Remove the entry named `name`. Absent names are a no-op.
    pub fn remove_item(&self, name: &ItemName) -> Result<(), DispatchError> {
        self.dispatch(CartCommand::remove_item(name.clone()))
            .map(|_| ())
    }

    /// Set the entry's quantity. Absent names are a no-op.
    pub fn update_quantity(
        &self,
        name: &ItemName,
        quantity: Quantity,
    ) -> Result<(), DispatchError> {
        self.dispatch(CartCommand::update_quantity(name.clone(), quantity))
            .map(|_| ())
    }

    /// Handle, apply and publish a command. Returns the applied events (empty for a no-op).
    pub fn dispatch(&self, command: CartCommand) -> Result<Vec<CartEvent>, DispatchError> {
        let mut state = self.state.lock().map_err(|_| DispatchError::Poisoned)?;

        let events = state.cart.handle(&command).map_err(|err| {
            tracing::warn!(item = %command.name(), error = %err, "cart command rejected");
            err
        })?;

        if events.is_empty() {
            tracing::debug!(item = %command.name(), "cart command was a no-op");
            return Ok(events);
        }

        for event in &events {
            state.cart.apply(event);
        }
        let snapshot = Arc::new(state.cart.snapshot());
        state.snapshot = Arc::clone(&snapshot);

        for event in &events {
            tracing::info!(
                event_type = event.event_type(),
                item = %event.name(),
                version = snapshot.version(),
                "cart changed"
            );
            self.bus.publish(CartChanged {
                event: event.clone(),
                snapshot: Arc::clone(&snapshot),
            })?;
        }

        Ok(events)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use shopcart_core::Money;

    fn name(s: &str) -> ItemName {
        ItemName::new(s).unwrap()
    }

    fn qty(n: u32) -> Quantity {
        Quantity::new(n).unwrap()
    }

    fn usd_item(s: &str, dollars: u64, quantity: u32) -> LineItem {
        LineItem::new(
            name(s),
            format!("{s}.png"),
            Money::from_major(dollars, Currency::Usd),
            qty(quantity),
        )
    }

    fn store() -> CartStore {
        CartStore::new(CartId::new(), Currency::Usd)
    }

    #[test]
    fn new_store_starts_empty_at_version_zero() {
        let store = store();
        let snapshot = store.snapshot();
        assert!(snapshot.is_empty());
        assert_eq!(snapshot.version(), 0);
        assert_eq!(snapshot.currency(), Currency::Usd);
    }

    #[test]
    fn subscribers_receive_post_change_snapshots() {
        let store = store();
        let sub = store.subscribe();

        store.add_item(usd_item("A", 15, 2)).unwrap();
        store.update_quantity(&name("A"), qty(3)).unwrap();

        let changes = sub.drain();
        assert_eq!(changes.len(), 2);
        assert_eq!(changes[0].snapshot.item(&name("A")).unwrap().quantity, qty(2));
        assert_eq!(changes[1].snapshot.item(&name("A")).unwrap().quantity, qty(3));
        assert!(changes[0].snapshot.version() < changes[1].snapshot.version());
    }

    #[test]
    fn earlier_snapshots_are_not_affected_by_later_changes() {
        let store = store();
        store.add_item(usd_item("A", 15, 1)).unwrap();
        let before = store.snapshot();

        store.remove_item(&name("A")).unwrap();

        assert!(before.contains(&name("A")));
        assert!(!store.snapshot().contains(&name("A")));
    }

    #[test]
    fn removing_twice_equals_removing_once() {
        let store = store();
        store.add_item(usd_item("A", 15, 1)).unwrap();
        store.add_item(usd_item("B", 10, 1)).unwrap();
        let sub = store.subscribe();

        store.remove_item(&name("A")).unwrap();
        let after_first = store.snapshot();
        store.remove_item(&name("A")).unwrap();

        assert_eq!(*store.snapshot(), *after_first);
        assert_eq!(sub.drain().len(), 1);
    }

    #[test]
    fn rejected_commands_leave_state_untouched() {
        let store = store();
        let sub = store.subscribe();
        let mut item = usd_item("A", 15, 1);
        item.unit_cost = Money::from_major(15, Currency::Gbp);

        let err = store.add_item(item).unwrap_err();

        assert!(matches!(err, DispatchError::Domain(DomainError::Validation(_))));
        assert_eq!(store.snapshot().version(), 0);
        assert!(sub.try_recv().is_err());
    }

    #[test]
    fn dispatch_returns_applied_events() {
        let store = store();
        let events = store
            .dispatch(CartCommand::add_item(usd_item("A", 15, 1)))
            .unwrap();
        assert!(matches!(events.as_slice(), [CartEvent::ItemAdded(_)]));

        let events = store
            .dispatch(CartCommand::remove_item(name("missing")))
            .unwrap();
        assert!(events.is_empty());
    }

    #[test]
    fn store_is_shareable_across_threads() {
        let store = Arc::new(store());
        let handles: Vec<_> = (0..4)
            .map(|_| {
                let store = Arc::clone(&store);
                std::thread::spawn(move || store.add_item(usd_item("A", 1, 1)).unwrap())
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }

        assert_eq!(store.snapshot().item(&name("A")).unwrap().quantity, qty(4));
        assert_eq!(store.snapshot().version(), 4);
    }

    proptest! {
        #![proptest_config(ProptestConfig {
            cases: 256,
            ..ProptestConfig::default()
        })]

        /// Property: names stay unique and quantities positive under any mix of operations.
        #[test]
        fn names_stay_unique_under_random_operations(
            ops in prop::collection::vec((0u8..3, 0usize..4, 1u32..5), 1..40)
        ) {
            let store = store();
            let names = ["A", "B", "C", "D"];

            for (op, idx, amount) in ops {
                let n = name(names[idx]);
                match op {
                    0 => store.add_item(usd_item(names[idx], 3, amount)).unwrap(),
                    1 => store.remove_item(&n).unwrap(),
                    _ => store.update_quantity(&n, qty(amount)).unwrap(),
                }
            }

            let snapshot = store.snapshot();
            let mut seen: Vec<_> = snapshot.items().iter().map(|i| i.name.clone()).collect();
            seen.sort();
            seen.dedup();
            prop_assert_eq!(seen.len(), snapshot.len());
            prop_assert!(snapshot.items().iter().all(|i| i.quantity.get() >= 1));
        }
    }
}
