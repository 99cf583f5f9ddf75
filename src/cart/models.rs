//! Cart domain models and wire shapes

use serde::{Deserialize, Serialize};

/// Returns the default quantity (1) for added lines.
fn default_quantity() -> u32 {
    1
}

/// One cart line: a product reference and how many of it.
///
/// Invariant (held by `Cart`): at most one line per product id.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct CartLine {
    pub product_id: String,
    pub quantity: u32,
}

/// Input for adding a product to the cart.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddItemInput {
    pub product_id: String,

    /// Quantity of this item (defaults to 1)
    #[serde(default = "default_quantity")]
    pub quantity: u32,
}

/// Input for replacing the whole cart (frontend-driven sync).
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SyncCartInput {
    pub lines: Vec<CartLine>,
}

/// Input for changing one line's quantity. Zero or negative removes it.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuantityInput {
    pub quantity: i64,
}

/// Response for cart mutations.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CartResponse {
    pub status: String,
    pub cart_id: String,
    pub lines: Vec<CartLine>,
    pub item_count: u32,
}
