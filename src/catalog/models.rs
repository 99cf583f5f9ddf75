//! Product catalogue domain models
//!
//! Drafts and updates carry `price`/`qty` as raw strings because they arrive
//! from form fields; validation parses them and reports per-field failures.

use crate::error::ValidationErrors;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A purchasable item. `qty` is the available stock.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: String,
    pub name: String,
    pub price: Decimal,
    pub description: String,
    pub available: bool,
    pub qty: u32,
}

fn default_available() -> bool {
    true
}

/// Input for creating a product. `id` is assigned when omitted.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductDraft {
    pub id: Option<String>,
    pub name: String,
    pub price: String,
    pub description: String,
    #[serde(default = "default_available")]
    pub available: bool,
    pub qty: String,
}

/// Partial update for an existing product. Absent fields are left untouched.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductUpdate {
    pub name: Option<String>,
    pub price: Option<String>,
    pub description: Option<String>,
    pub available: Option<bool>,
    pub qty: Option<String>,
}

/// Parses a price field: must be a positive decimal number.
pub fn parse_price(raw: &str) -> Result<Decimal, String> {
    match raw.trim().parse::<Decimal>() {
        Ok(price) if price > Decimal::ZERO => Ok(price),
        Ok(_) => Err("must be a positive number".into()),
        Err(_) => Err("must be a positive number".into()),
    }
}

/// Parses a stock quantity field: must be a non-negative whole number.
/// Zero stock is a legitimate state (listed but out of stock), so the same
/// rule applies to both create and modify paths.
pub fn parse_qty(raw: &str) -> Result<u32, String> {
    raw.trim()
        .parse::<u32>()
        .map_err(|_| "must be a non-negative whole number".into())
}

/// Validates a trimmed text field, returning the trimmed value.
fn non_empty(raw: &str) -> Result<String, String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        Err("must not be empty".into())
    } else {
        Ok(trimmed.to_string())
    }
}

/// Fully-validated draft fields, ready to become a `Product`.
#[derive(Debug)]
pub struct ValidatedDraft {
    pub name: String,
    pub price: Decimal,
    pub description: String,
    pub available: bool,
    pub qty: u32,
}

/// Validates every field of a draft, collecting all failures.
pub fn validate_draft(draft: &ProductDraft) -> Result<ValidatedDraft, ValidationErrors> {
    let mut errors = ValidationErrors::new();

    let name = non_empty(&draft.name).map_err(|m| errors.add("name", m)).ok();
    let price = parse_price(&draft.price)
        .map_err(|m| errors.add("price", m))
        .ok();
    let description = non_empty(&draft.description)
        .map_err(|m| errors.add("description", m))
        .ok();
    let qty = parse_qty(&draft.qty).map_err(|m| errors.add("qty", m)).ok();

    if errors.is_empty() {
        // All four Options are Some when no error was recorded.
        Ok(ValidatedDraft {
            name: name.unwrap_or_default(),
            price: price.unwrap_or_default(),
            description: description.unwrap_or_default(),
            available: draft.available,
            qty: qty.unwrap_or_default(),
        })
    } else {
        Err(errors)
    }
}

/// Applies a partial update to a product clone, validating each supplied
/// field. Returns the updated product or the collected failures.
pub fn apply_update(product: &Product, update: &ProductUpdate) -> Result<Product, ValidationErrors> {
    let mut errors = ValidationErrors::new();
    let mut updated = product.clone();

    if let Some(name) = &update.name {
        match non_empty(name) {
            Ok(value) => updated.name = value,
            Err(m) => errors.add("name", m),
        }
    }
    if let Some(price) = &update.price {
        match parse_price(price) {
            Ok(value) => updated.price = value,
            Err(m) => errors.add("price", m),
        }
    }
    if let Some(description) = &update.description {
        match non_empty(description) {
            Ok(value) => updated.description = value,
            Err(m) => errors.add("description", m),
        }
    }
    if let Some(available) = update.available {
        updated.available = available;
    }
    if let Some(qty) = &update.qty {
        match parse_qty(qty) {
            Ok(value) => updated.qty = value,
            Err(m) => errors.add("qty", m),
        }
    }

    if errors.is_empty() {
        Ok(updated)
    } else {
        Err(errors)
    }
}
