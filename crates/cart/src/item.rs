//! Line item value types.

use core::num::NonZeroU32;
use serde::{Deserialize, Serialize};

use shopcart_core::{DomainError, DomainResult, Money, ValueObject};

/// Name of a product in the cart. Unique within a cart; acts as the item key.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ItemName(String);

impl ValueObject for ItemName {}

impl ItemName {
    /// Trims surrounding whitespace; an empty result is rejected.
    pub fn new(name: impl Into<String>) -> DomainResult<Self> {
        let name = name.into();
        let trimmed = name.trim();
        if trimmed.is_empty() {
            return Err(DomainError::validation("item name must not be empty"));
        }
        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for ItemName {
    type Error = DomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<ItemName> for String {
    fn from(value: ItemName) -> Self {
        value.0
    }
}

impl core::fmt::Display for ItemName {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Number of units of one item. Never zero: an item that would reach zero is
/// removed from the cart instead.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Quantity(NonZeroU32);

impl ValueObject for Quantity {}

impl Quantity {
    pub const ONE: Quantity = Quantity(NonZeroU32::MIN);

    /// `None` for zero.
    pub fn new(value: u32) -> Option<Self> {
        NonZeroU32::new(value).map(Self)
    }

    pub fn get(self) -> u32 {
        self.0.get()
    }

    /// One more unit; `None` on overflow.
    pub fn increment(self) -> Option<Self> {
        self.0.checked_add(1).map(Self)
    }

    /// One fewer unit; `None` when that would be zero.
    pub fn decrement(self) -> Option<Self> {
        Self::new(self.get() - 1)
    }

    pub fn checked_add(self, other: Quantity) -> Option<Self> {
        self.0.checked_add(other.get()).map(Self)
    }
}

impl core::fmt::Display for Quantity {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        core::fmt::Display::fmt(&self.0, f)
    }
}

/// One product entry in the cart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineItem {
    pub name: ItemName,
    /// Reference to a display asset; opaque to cart logic.
    pub image: String,
    pub unit_cost: Money,
    pub quantity: Quantity,
}

impl LineItem {
    pub fn new(
        name: ItemName,
        image: impl Into<String>,
        unit_cost: Money,
        quantity: Quantity,
    ) -> Self {
        Self {
            name,
            image: image.into(),
            unit_cost,
            quantity,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn item_names_are_trimmed_and_non_empty() {
        assert_eq!(ItemName::new("  Aloe Vera ").unwrap().as_str(), "Aloe Vera");
        assert!(matches!(
            ItemName::new("   "),
            Err(DomainError::Validation(_))
        ));
    }

    #[test]
    fn item_name_deserialization_validates() {
        let ok: ItemName = serde_json::from_str("\"Mint\"").unwrap();
        assert_eq!(ok.as_str(), "Mint");
        assert!(serde_json::from_str::<ItemName>("\"\"").is_err());
    }

    #[test]
    fn zero_quantity_is_unrepresentable() {
        assert!(Quantity::new(0).is_none());
        assert!(serde_json::from_str::<Quantity>("0").is_err());
        assert_eq!(serde_json::from_str::<Quantity>("3").unwrap().get(), 3);
    }

    #[test]
    fn decrement_from_one_yields_none() {
        assert_eq!(Quantity::ONE.decrement(), None);
        assert_eq!(Quantity::new(3).unwrap().decrement(), Quantity::new(2));
    }

    #[test]
    fn increment_stops_at_u32_max() {
        assert_eq!(Quantity::ONE.increment(), Quantity::new(2));
        assert_eq!(Quantity::new(u32::MAX).unwrap().increment(), None);
    }
}
