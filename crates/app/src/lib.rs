//! `shopcart-app`: application bootstrap.
//!
//! Wires a `StoreProvider` (the session's cart store) around the root `App`
//! component, loads configuration and the product catalog, and renders text.

pub mod app;
pub mod catalog;
pub mod config;
pub mod provider;
pub mod render;

pub use app::{App, Gesture, ParseGestureError, Reply, Screen};
pub use catalog::{Catalog, Category, Product, parse_price_label};
pub use config::AppConfig;
pub use provider::StoreProvider;
