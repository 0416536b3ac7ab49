//! Shopping cart domain module.
//!
//! The cart is a plain aggregate (`Cart`) driven by commands; `CartStore` wraps
//! it as the process-wide state container and notifies subscribers of changes.

pub mod cart;
pub mod item;
pub mod store;

pub use cart::{
    AddItem, Cart, CartCommand, CartEvent, CartSnapshot, ItemAdded, ItemRemoved,
    QuantityChanged, RemoveItem, UpdateQuantity,
};
pub use item::{ItemName, LineItem, Quantity};
pub use store::{CartChanged, CartStore, DispatchError};
