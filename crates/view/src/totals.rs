//! Pure derivations over a cart snapshot.
//!
//! Nothing here is cached; callers that memoise must key on the snapshot version.

use shopcart_cart::{CartSnapshot, LineItem};
use shopcart_core::Money;

/// Unit cost × quantity for one entry.
pub fn item_subtotal(item: &LineItem) -> Money {
    item.unit_cost.times(item.quantity.get())
}

/// Sum of every entry's subtotal, in the cart's currency.
///
/// The store only admits items in the cart currency, so amounts add directly.
/// The sum saturates at `u64::MAX` minor units rather than failing, matching
/// [`Money::times`] for a single entry.
pub fn total_amount(snapshot: &CartSnapshot) -> Money {
    let minor_units = snapshot
        .items()
        .iter()
        .map(|item| item_subtotal(item).minor_units())
        .fold(0u64, u64::saturating_add);
    Money::new(minor_units, snapshot.currency())
}

/// Total number of units across all entries.
pub fn item_count(snapshot: &CartSnapshot) -> u64 {
    snapshot
        .items()
        .iter()
        .map(|item| u64::from(item.quantity.get()))
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use shopcart_cart::{CartStore, ItemName, Quantity};
    use shopcart_core::{CartId, Currency};

    fn usd_item(name: &str, cents: u64, quantity: u32) -> LineItem {
        LineItem::new(
            ItemName::new(name).unwrap(),
            "",
            Money::new(cents, Currency::Usd),
            Quantity::new(quantity).unwrap(),
        )
    }

    #[test]
    fn total_of_two_entries() {
        let store = CartStore::new(CartId::new(), Currency::Usd);
        store.add_item(usd_item("A", 1500, 2)).unwrap();
        store.add_item(usd_item("B", 1000, 1)).unwrap();

        let total = total_amount(&store.snapshot());
        assert_eq!(total, Money::from_major(40, Currency::Usd));
    }

    #[test]
    fn empty_cart_totals_zero_in_cart_currency() {
        let store = CartStore::new(CartId::new(), Currency::Eur);
        let total = total_amount(&store.snapshot());
        assert!(total.is_zero());
        assert_eq!(total.currency(), Currency::Eur);
        assert_eq!(item_count(&store.snapshot()), 0);
    }

    #[test]
    fn item_count_sums_quantities() {
        let store = CartStore::new(CartId::new(), Currency::Usd);
        store.add_item(usd_item("A", 100, 2)).unwrap();
        store.add_item(usd_item("B", 100, 5)).unwrap();
        assert_eq!(item_count(&store.snapshot()), 7);
    }

    #[test]
    fn total_saturates_instead_of_overflowing() {
        let store = CartStore::new(CartId::new(), Currency::Usd);
        store.add_item(usd_item("A", u64::MAX, 1)).unwrap();
        store.add_item(usd_item("B", u64::MAX - 1, 2)).unwrap();

        let total = total_amount(&store.snapshot());
        assert_eq!(total, Money::new(u64::MAX, Currency::Usd));
    }

    proptest! {
        /// Property: the grand total equals the sum of per-item subtotals.
        #[test]
        fn total_is_sum_of_subtotals(
            entries in prop::collection::vec((0u64..100_000, 1u32..50), 0..12)
        ) {
            let store = CartStore::new(CartId::new(), Currency::Usd);
            for (idx, (cents, quantity)) in entries.iter().enumerate() {
                store.add_item(usd_item(&format!("item-{idx}"), *cents, *quantity)).unwrap();
            }

            let snapshot = store.snapshot();
            let summed = snapshot
                .items()
                .iter()
                .map(item_subtotal)
                .try_fold(Money::zero(Currency::Usd), |acc, m| acc.checked_add(&m))
                .unwrap();
            prop_assert_eq!(total_amount(&snapshot), summed);
            prop_assert_eq!(total_amount(&snapshot), total_amount(&snapshot));
        }
    }
}
