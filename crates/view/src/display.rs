//! Display state derived from a snapshot.

use serde::Serialize;

use shopcart_cart::{CartSnapshot, ItemName, LineItem, Quantity};
use shopcart_core::Money;

use crate::totals::{item_subtotal, total_amount};

pub const EMPTY_HEADING: &str = "Your Cart is Empty";
pub const START_SHOPPING_LABEL: &str = "Start Shopping";
pub const CONTINUE_SHOPPING_LABEL: &str = "Continue Shopping";
pub const CHECKOUT_LABEL: &str = "Checkout";

/// The two observable cart states.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DisplayState {
    Empty,
    Populated,
}

impl DisplayState {
    pub fn of(snapshot: &CartSnapshot) -> Self {
        if snapshot.is_empty() {
            DisplayState::Empty
        } else {
            DisplayState::Populated
        }
    }
}

/// One rendered cart row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LineItemRow {
    pub name: ItemName,
    pub image: String,
    pub unit_cost: Money,
    pub quantity: Quantity,
    pub subtotal: Money,
}

impl From<&LineItem> for LineItemRow {
    fn from(item: &LineItem) -> Self {
        Self {
            name: item.name.clone(),
            image: item.image.clone(),
            unit_cost: item.unit_cost,
            quantity: item.quantity,
            subtotal: item_subtotal(item),
        }
    }
}

/// What the rendering layer draws.
///
/// An empty cart is its own branch with a single call to action, not an
/// itemised view with zero rows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "state", rename_all = "lowercase")]
pub enum CartDisplay {
    Empty {
        heading: &'static str,
        call_to_action: &'static str,
    },
    Populated {
        total: Money,
        rows: Vec<LineItemRow>,
        continue_label: &'static str,
        checkout_label: &'static str,
    },
}

impl CartDisplay {
    pub fn from_snapshot(snapshot: &CartSnapshot) -> Self {
        match DisplayState::of(snapshot) {
            DisplayState::Empty => CartDisplay::Empty {
                heading: EMPTY_HEADING,
                call_to_action: START_SHOPPING_LABEL,
            },
            DisplayState::Populated => CartDisplay::Populated {
                total: total_amount(snapshot),
                rows: snapshot.items().iter().map(LineItemRow::from).collect(),
                continue_label: CONTINUE_SHOPPING_LABEL,
                checkout_label: CHECKOUT_LABEL,
            },
        }
    }

    pub fn state(&self) -> DisplayState {
        match self {
            CartDisplay::Empty { .. } => DisplayState::Empty,
            CartDisplay::Populated { .. } => DisplayState::Populated,
        }
    }
}
