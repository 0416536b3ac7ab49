//! Plain-text rendering of the two screens.

use shopcart_cart::CartSnapshot;
use shopcart_view::{CartDisplay, format_money, item_count};

use crate::catalog::Catalog;

pub fn render_cart(display: &CartDisplay) -> Vec<String> {
    match display {
        CartDisplay::Empty {
            heading,
            call_to_action,
        } => vec![heading.to_string(), format!("[{call_to_action}]")],
        CartDisplay::Populated {
            total,
            rows,
            continue_label,
            checkout_label,
        } => {
            let mut lines = vec![format!("Total Cart Amount: {}", format_money(*total))];
            for row in rows {
                lines.push(format!(
                    "- {} ({}) x{}  Total: {}",
                    row.name,
                    format_money(row.unit_cost),
                    row.quantity,
                    format_money(row.subtotal)
                ));
            }
            lines.push(format!("[{continue_label}] [{checkout_label}]"));
            lines
        }
    }
}

pub fn render_products(catalog: &Catalog, cart: &CartSnapshot) -> Vec<String> {
    let mut lines = vec![format!("Products (cart: {} items)", item_count(cart))];
    for category in catalog.categories() {
        lines.push(format!("## {}", category.name));
        for product in &category.products {
            let marker = if cart.contains(&product.name) {
                "  [Added to Cart]"
            } else {
                ""
            };
            lines.push(format!(
                "- {} {}{}",
                product.name,
                format_money(product.cost),
                marker
            ));
        }
    }
    lines
}
