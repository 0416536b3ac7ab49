use std::sync::Arc;

use shopcart_cart::CartStore;
use shopcart_core::{CartId, Currency};

/// Owns the session's cart store and hands it to components explicitly.
///
/// Created once at startup, before the root component; every consumer receives
/// its `Arc<CartStore>` from here rather than reaching for a global.
#[derive(Debug, Clone)]
pub struct StoreProvider {
    store: Arc<CartStore>,
}

impl StoreProvider {
    /// A provider with a fresh, empty cart.
    pub fn new(currency: Currency) -> Self {
        let cart_id = CartId::new();
        tracing::info!(%cart_id, %currency, "cart session started");
        Self {
            store: Arc::new(CartStore::new(cart_id, currency)),
        }
    }

    pub fn store(&self) -> Arc<CartStore> {
        Arc::clone(&self.store)
    }
}
