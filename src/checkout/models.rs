//! Checkout wire shapes

use crate::shipping::models::{Address, Package, ShippingOption};
use serde::{Deserialize, Serialize};

/// Input for requesting shipping quotes.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuoteInput {
    pub address: Address,
    pub package: Package,
}

/// Input for selecting one of the quoted options.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SelectOptionInput {
    pub carrier_id: String,
}

/// Response carrying the quoted options; the first is pre-selected.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QuoteResponse {
    pub status: String,
    pub options: Vec<ShippingOption>,
}

/// Response for the payment-details validation step.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentCheckResponse {
    pub valid: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}
