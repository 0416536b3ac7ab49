//! `shopcart-core`: domain foundation building blocks.
//!
//! This crate contains **pure domain** primitives (no presentation concerns).

pub mod aggregate;
pub mod error;
pub mod id;
pub mod money;
pub mod value_object;

pub use aggregate::Aggregate;
pub use error::{DomainError, DomainResult};
pub use id::CartId;
pub use money::{Currency, Money};
pub use value_object::ValueObject;
