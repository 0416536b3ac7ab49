//! Cart View Model: derived values plus gesture handlers.
//!
//! The view model never mutates the cart itself; each gesture becomes a single
//! `CartStore` call. Decrementing below one is routed to removal here, so the
//! store never sees a request for a zero quantity.

use std::cell::Cell;
use std::sync::Arc;

use shopcart_cart::{CartSnapshot, CartStore, DispatchError, LineItem};
use shopcart_core::Money;

use crate::display::CartDisplay;
use crate::totals::{item_subtotal, total_amount};

pub const CHECKOUT_NOTICE: &str = "Functionality to be added for future reference";

/// Callback supplied by the enclosing application for "continue shopping".
pub type Navigator = Box<dyn Fn() + Send + Sync>;

/// Result of the checkout gesture.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheckoutOutcome {
    /// Checkout is a stub; presentation shows `notice` to the user.
    NotImplemented { notice: &'static str },
}

pub struct CartViewModel {
    store: Arc<CartStore>,
    navigator: Option<Navigator>,
    total_memo: Cell<Option<(u64, Money)>>,
}

impl core::fmt::Debug for CartViewModel {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("CartViewModel")
            .field("store", &self.store)
            .field("has_navigator", &self.navigator.is_some())
            .finish()
    }
}

impl CartViewModel {
    pub fn new(store: Arc<CartStore>) -> Self {
        Self {
            store,
            navigator: None,
            total_memo: Cell::new(None),
        }
    }

    pub fn with_navigator(mut self, navigator: Navigator) -> Self {
        self.navigator = Some(navigator);
        self
    }

    pub fn snapshot(&self) -> Arc<CartSnapshot> {
        self.store.snapshot()
    }

    /// Grand total of the current snapshot, memoised per snapshot version.
    pub fn total(&self) -> Money {
        let snapshot = self.store.snapshot();
        if let Some((version, total)) = self.total_memo.get() {
            if version == snapshot.version() {
                return total;
            }
        }
        let total = total_amount(&snapshot);
        self.total_memo.set(Some((snapshot.version(), total)));
        total
    }

    pub fn subtotal(&self, item: &LineItem) -> Money {
        item_subtotal(item)
    }

    pub fn display(&self) -> CartDisplay {
        CartDisplay::from_snapshot(&self.store.snapshot())
    }

    /// Raise the entry's quantity by one.
    ///
    /// At `u32::MAX` the quantity is saturated: nothing is dispatched and the
    /// call still succeeds.
    pub fn on_increment(&self, item: &LineItem) -> Result<(), DispatchError> {
        match item.quantity.increment() {
            Some(quantity) => self.store.update_quantity(&item.name, quantity),
            None => {
                tracing::warn!(item = %item.name, "quantity already at maximum; ignoring increment");
                Ok(())
            }
        }
    }

    pub fn on_decrement(&self, item: &LineItem) -> Result<(), DispatchError> {
        match item.quantity.decrement() {
            Some(quantity) => self.store.update_quantity(&item.name, quantity),
            None => self.store.remove_item(&item.name),
        }
    }

    pub fn on_delete(&self, item: &LineItem) -> Result<(), DispatchError> {
        self.store.remove_item(&item.name)
    }

    pub fn on_checkout(&self) -> CheckoutOutcome {
        let snapshot = self.store.snapshot();
        tracing::info!(
            cart_id = %snapshot.cart_id(),
            items = snapshot.len(),
            "checkout requested"
        );
        CheckoutOutcome::NotImplemented {
            notice: CHECKOUT_NOTICE,
        }
    }

    pub fn on_continue_shopping(&self) {
        if let Some(navigate) = &self.navigator {
            navigate();
        }
    }
}
