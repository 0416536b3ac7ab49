//! Value object trait: equality by value, not identity.
//!
//! Value objects have **no identity**: two value objects with the same values are
//! the same value. `Money`, `Quantity` and `ItemName` are value objects; a cart is
//! not.

/// Marker trait for value objects.
///
/// Value objects are **immutable** and **compared by value**. To "modify" one,
/// build a new one (`Money::times` returns a fresh `Money`).
pub trait ValueObject: Clone + PartialEq + core::fmt::Debug {}
