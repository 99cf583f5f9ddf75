//! Shipping domain models

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Delivery address (Australian-style: 4-digit postcode, state code).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Address {
    pub street: String,
    pub town: String,
    pub state: String,
    pub postcode: String,
    pub country: String,
}

/// Physical package parameters used for surcharge pricing.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Package {
    pub weight_kg: Decimal,
    pub dimensions: Dimensions,
    #[serde(default)]
    pub is_fragile: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Dimensions {
    pub length_cm: Decimal,
    pub width_cm: Decimal,
    pub height_cm: Decimal,
}

/// Estimated delivery window in business days.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeliveryWindow {
    pub min_days: u8,
    pub max_days: u8,
}

/// A carrier registered with the resolver.
#[derive(Debug, Clone)]
pub struct Carrier {
    pub id: &'static str,
    pub name: &'static str,
    pub base_rate: Decimal,
    /// Per-state price multipliers; unlisted states default to 1.0.
    pub state_multipliers: Vec<(&'static str, Decimal)>,
    pub supported_states: Vec<&'static str>,
    /// Postcode prefixes this carrier delivers to.
    pub service_prefixes: Vec<&'static str>,
    pub window: DeliveryWindow,
}

impl Carrier {
    pub fn multiplier_for(&self, state: &str) -> Decimal {
        self.state_multipliers
            .iter()
            .find(|(s, _)| s.eq_ignore_ascii_case(state))
            .map(|(_, m)| *m)
            .unwrap_or(Decimal::ONE)
    }

    pub fn serves(&self, state: &str, postcode: &str) -> bool {
        let state_ok = self
            .supported_states
            .iter()
            .any(|s| s.eq_ignore_ascii_case(state));
        let prefix_ok = self
            .service_prefixes
            .iter()
            .any(|prefix| postcode.starts_with(prefix));
        state_ok && prefix_ok
    }
}

/// One priced delivery option; the first resolved option is the default
/// selection.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ShippingOption {
    pub carrier_id: String,
    pub name: String,
    pub price: Decimal,
    pub window: DeliveryWindow,
    pub free_shipping: bool,
    pub fragile_surcharge: bool,
    pub remote_surcharge: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ShippingError {
    /// Address failed validation or lies outside the serviceable area.
    /// Carries the itemized issues for display next to the form fields.
    #[error("address cannot be shipped to")]
    InvalidAddress { issues: Vec<String> },

    /// The address is fine but no registered carrier covers it.
    #[error("no delivery partner services this address")]
    NoDeliveryPartner,
}
