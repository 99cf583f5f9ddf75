//! Serviceable-area and carrier tables
//!
//! These tables stand in for a real carrier-rate API; the resolver only
//! produces the synthetic validation failures, never network ones.

use super::models::{Carrier, DeliveryWindow};
use rust_decimal::Decimal;

/// `(town, postcode, state)` rows the storefront delivers to.
pub const SERVICEABLE_AREAS: &[(&str, &str, &str)] = &[
    ("Melbourne", "3000", "VIC"),
    ("Richmond", "3121", "VIC"),
    ("Geelong", "3220", "VIC"),
    ("Sydney", "2000", "NSW"),
    ("Parramatta", "2150", "NSW"),
    ("Newcastle", "2300", "NSW"),
    ("Brisbane", "4000", "QLD"),
    ("Cairns", "4870", "QLD"),
    ("Mount Isa", "4825", "QLD"),
    ("Adelaide", "5000", "SA"),
    ("Perth", "6000", "WA"),
];

/// `(postcode, state)` pairs that attract the remote-area surcharge.
pub const REMOTE_AREAS: &[(&str, &str)] = &[("4825", "QLD"), ("4870", "QLD"), ("6721", "WA")];

/// Orders at or above this subtotal ship free (option still listed).
pub fn free_shipping_threshold() -> Decimal {
    Decimal::from(100)
}

/// Weight above which the per-kilogram surcharge applies.
pub fn weight_limit_kg() -> Decimal {
    Decimal::from(5)
}

/// Surcharge per kilogram over the weight limit.
pub fn per_kg_surcharge() -> Decimal {
    Decimal::new(50, 2) // 0.50
}

/// Flat surcharge for fragile packages.
pub fn fragile_surcharge() -> Decimal {
    Decimal::new(450, 2) // 4.50
}

/// Flat surcharge for remote-area delivery.
pub fn remote_surcharge() -> Decimal {
    Decimal::new(950, 2) // 9.50
}

/// The carriers registered with the resolver.
pub fn default_carriers() -> Vec<Carrier> {
    vec![
        Carrier {
            id: "kanga",
            name: "Kanga Couriers",
            base_rate: Decimal::new(899, 2), // 8.99
            state_multipliers: vec![
                ("VIC", Decimal::ONE),
                ("NSW", Decimal::new(11, 1)), // 1.1
                ("SA", Decimal::new(12, 1)),  // 1.2
            ],
            supported_states: vec!["VIC", "NSW", "SA"],
            service_prefixes: vec!["2", "3", "5"],
            window: DeliveryWindow {
                min_days: 3,
                max_days: 5,
            },
        },
        Carrier {
            id: "fastpost",
            name: "FastPost Express",
            base_rate: Decimal::new(1295, 2), // 12.95
            state_multipliers: vec![
                ("VIC", Decimal::ONE),
                ("NSW", Decimal::new(105, 2)), // 1.05
                ("QLD", Decimal::new(12, 1)),  // 1.2
            ],
            supported_states: vec!["VIC", "NSW", "QLD"],
            service_prefixes: vec!["2", "3", "4"],
            window: DeliveryWindow {
                min_days: 1,
                max_days: 2,
            },
        },
        Carrier {
            id: "roadfreight",
            name: "Road Freight Co",
            base_rate: Decimal::new(650, 2), // 6.50
            state_multipliers: vec![("WA", Decimal::new(13, 1))], // 1.3
            supported_states: vec!["VIC", "NSW", "QLD", "SA", "WA"],
            service_prefixes: vec!["2", "3", "4", "5", "6"],
            window: DeliveryWindow {
                min_days: 5,
                max_days: 8,
            },
        },
    ]
}
