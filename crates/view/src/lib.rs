//! `shopcart-view`: the cart as the user sees it.
//!
//! Read-only derivations from a `CartSnapshot` (subtotals, grand total, display
//! state) and the translation of UI gestures into `CartStore` calls.

pub mod display;
pub mod format;
pub mod totals;
pub mod view_model;

pub use display::{CartDisplay, DisplayState, LineItemRow};
pub use format::format_money;
pub use totals::{item_count, item_subtotal, total_amount};
pub use view_model::{CHECKOUT_NOTICE, CartViewModel, CheckoutOutcome, Navigator};
