//! Cart/catalogue join helpers
//!
//! These joins take a catalogue snapshot rather than reaching for shared
//! state. Lines whose product can no longer be found are skipped and
//! logged, never an error.

use super::models::CartLine;
use crate::catalog::models::Product;
use rust_decimal::Decimal;
use tracing::warn;

fn find_product<'a>(products: &'a [Product], product_id: &str) -> Option<&'a Product> {
    let wanted = product_id.trim();
    products.iter().find(|p| p.id.trim() == wanted)
}

/// Sums `quantity × price` over all lines that still resolve to a product.
pub fn total_price(lines: &[CartLine], products: &[Product]) -> Decimal {
    lines
        .iter()
        .filter_map(|line| match find_product(products, &line.product_id) {
            Some(product) => Some(product.price * Decimal::from(line.quantity)),
            None => {
                warn!(product_id = %line.product_id, "cart line has no catalogue entry, skipping");
                None
            }
        })
        .sum()
}

/// Resolves lines to `(product, quantity)` pairs, skipping unmatched lines.
pub fn products_in_cart(lines: &[CartLine], products: &[Product]) -> Vec<(Product, u32)> {
    lines
        .iter()
        .filter_map(|line| match find_product(products, &line.product_id) {
            Some(product) => Some((product.clone(), line.quantity)),
            None => {
                warn!(product_id = %line.product_id, "cart line has no catalogue entry, skipping");
                None
            }
        })
        .collect()
}

/// Produces a human-readable one-line summary for a list of cart lines.
///
/// Example output: `"2x 1, 1x 7"`.
pub fn format_line_summary(lines: &[CartLine]) -> String {
    lines
        .iter()
        .map(|l| format!("{}x {}", l.quantity, l.product_id))
        .collect::<Vec<_>>()
        .join(", ")
}
