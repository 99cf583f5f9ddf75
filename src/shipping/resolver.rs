//! Shipping rate resolution
//!
//! Pipeline: validate the address, check the serviceable-area table, filter
//! carriers by state and postcode prefix, then price each match with the
//! surcharge rules. Prices round to cents; a subtotal at or above the
//! free-shipping threshold overrides every price to zero.

use super::models::{Address, Carrier, Package, ShippingError, ShippingOption};
use super::tables;
use rust_decimal::{Decimal, RoundingStrategy};

/// Collects address-format issues. An empty list means the address is
/// well-formed (serviceability is checked separately).
pub fn validate_address(address: &Address) -> Vec<String> {
    let mut issues = Vec::new();
    if address.street.trim().is_empty() {
        issues.push("street must not be empty".to_string());
    }
    if address.town.trim().is_empty() {
        issues.push("town must not be empty".to_string());
    }
    let postcode = address.postcode.trim();
    if postcode.len() != 4 || !postcode.chars().all(|c| c.is_ascii_digit()) {
        issues.push("postcode must be 4 digits".to_string());
    }
    issues
}

fn is_serviceable(address: &Address) -> bool {
    tables::SERVICEABLE_AREAS.iter().any(|(town, postcode, state)| {
        town.eq_ignore_ascii_case(address.town.trim())
            && *postcode == address.postcode.trim()
            && state.eq_ignore_ascii_case(address.state.trim())
    })
}

fn is_remote(address: &Address) -> bool {
    tables::REMOTE_AREAS.iter().any(|(postcode, state)| {
        *postcode == address.postcode.trim() && state.eq_ignore_ascii_case(address.state.trim())
    })
}

/// Prices one carrier for the given address and package, before the
/// free-shipping override. Also reports which surcharges applied.
fn price_carrier(carrier: &Carrier, address: &Address, package: &Package) -> (Decimal, bool, bool) {
    let mut price = carrier.base_rate * carrier.multiplier_for(address.state.trim());

    let limit = tables::weight_limit_kg();
    if package.weight_kg > limit {
        price += (package.weight_kg - limit) * tables::per_kg_surcharge();
    }

    let fragile = package.is_fragile;
    if fragile {
        price += tables::fragile_surcharge();
    }

    let remote = is_remote(address);
    if remote {
        price += tables::remote_surcharge();
    }

    let price = price.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    (price, fragile, remote)
}

/// Resolves priced delivery options for an address, package, and cart
/// subtotal. The first option is a reasonable default selection.
pub fn resolve_options(
    carriers: &[Carrier],
    address: &Address,
    package: &Package,
    subtotal: Decimal,
) -> Result<Vec<ShippingOption>, ShippingError> {
    let mut issues = validate_address(address);
    if issues.is_empty() && !is_serviceable(address) {
        issues.push(format!(
            "{} {} {} is outside our delivery area",
            address.town.trim(),
            address.postcode.trim(),
            address.state.trim()
        ));
    }
    if !issues.is_empty() {
        return Err(ShippingError::InvalidAddress { issues });
    }

    let free = subtotal >= tables::free_shipping_threshold();

    let options: Vec<ShippingOption> = carriers
        .iter()
        .filter(|carrier| carrier.serves(address.state.trim(), address.postcode.trim()))
        .map(|carrier| {
            let (price, fragile, remote) = price_carrier(carrier, address, package);
            ShippingOption {
                carrier_id: carrier.id.to_string(),
                name: carrier.name.to_string(),
                price: if free { Decimal::ZERO } else { price },
                window: carrier.window,
                free_shipping: free,
                fragile_surcharge: fragile,
                remote_surcharge: remote,
            }
        })
        .collect();

    if options.is_empty() {
        return Err(ShippingError::NoDeliveryPartner);
    }
    Ok(options)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shipping::models::Dimensions;

    fn address(town: &str, postcode: &str, state: &str) -> Address {
        Address {
            street: "1 Example St".into(),
            town: town.into(),
            state: state.into(),
            postcode: postcode.into(),
            country: "AU".into(),
        }
    }

    fn package(weight_tenths_kg: i64, fragile: bool) -> Package {
        Package {
            weight_kg: Decimal::new(weight_tenths_kg, 1),
            dimensions: Dimensions {
                length_cm: Decimal::from(30),
                width_cm: Decimal::from(20),
                height_cm: Decimal::from(10),
            },
            is_fragile: fragile,
        }
    }

    #[test]
    fn melbourne_below_threshold_prices_base_times_multiplier() {
        let carriers = tables::default_carriers();
        let options = resolve_options(
            &carriers,
            &address("Melbourne", "3000", "VIC"),
            &package(20, false),
            Decimal::from(25),
        )
        .unwrap();

        let kanga = options.iter().find(|o| o.carrier_id == "kanga").unwrap();
        assert_eq!(kanga.price, Decimal::new(899, 2)); // 8.99 × 1.0
        assert!(!kanga.free_shipping);
    }

    #[test]
    fn threshold_met_zeroes_every_matching_carrier() {
        let carriers = tables::default_carriers();
        let options = resolve_options(
            &carriers,
            &address("Melbourne", "3000", "VIC"),
            &package(20, false),
            Decimal::from(100),
        )
        .unwrap();

        assert!(!options.is_empty());
        for option in &options {
            assert_eq!(option.price, Decimal::ZERO);
            assert!(option.free_shipping);
        }
    }

    #[test]
    fn overweight_packages_pay_per_extra_kilogram() {
        let carriers = tables::default_carriers();
        let options = resolve_options(
            &carriers,
            &address("Melbourne", "3000", "VIC"),
            &package(80, false), // 8.0 kg: 3 kg over the limit
            Decimal::from(10),
        )
        .unwrap();

        let kanga = options.iter().find(|o| o.carrier_id == "kanga").unwrap();
        // 8.99 + 3 × 0.50
        assert_eq!(kanga.price, Decimal::new(1049, 2));
    }

    #[test]
    fn fragile_and_remote_surcharges_stack() {
        let carriers = tables::default_carriers();
        let options = resolve_options(
            &carriers,
            &address("Mount Isa", "4825", "QLD"),
            &package(20, true),
            Decimal::from(10),
        )
        .unwrap();

        let fastpost = options.iter().find(|o| o.carrier_id == "fastpost").unwrap();
        // 12.95 × 1.2 + 4.50 + 9.50
        assert_eq!(fastpost.price, Decimal::new(2954, 2));
        assert!(fastpost.fragile_surcharge);
        assert!(fastpost.remote_surcharge);
    }

    #[test]
    fn bad_postcode_fails_fast_with_itemized_issues() {
        let carriers = tables::default_carriers();
        let err = resolve_options(
            &carriers,
            &address("Melbourne", "30", "VIC"),
            &package(20, false),
            Decimal::from(10),
        )
        .unwrap_err();

        match err {
            ShippingError::InvalidAddress { issues } => {
                assert_eq!(issues, vec!["postcode must be 4 digits".to_string()]);
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn unserviceable_town_is_reported_as_an_issue() {
        let carriers = tables::default_carriers();
        let err = resolve_options(
            &carriers,
            &address("Nowhere", "3999", "VIC"),
            &package(20, false),
            Decimal::from(10),
        )
        .unwrap_err();
        assert!(matches!(err, ShippingError::InvalidAddress { .. }));
    }

    #[test]
    fn covered_area_with_no_carrier_reports_no_delivery_partner() {
        // Perth is serviceable, but only roadfreight reaches WA; with that
        // carrier removed there is no delivery partner.
        let carriers: Vec<_> = tables::default_carriers()
            .into_iter()
            .filter(|c| c.id != "roadfreight")
            .collect();
        let err = resolve_options(
            &carriers,
            &address("Perth", "6000", "WA"),
            &package(20, false),
            Decimal::from(10),
        )
        .unwrap_err();
        assert_eq!(err, ShippingError::NoDeliveryPartner);
    }

    #[test]
    fn first_option_preserves_carrier_registration_order() {
        let carriers = tables::default_carriers();
        let options = resolve_options(
            &carriers,
            &address("Melbourne", "3000", "VIC"),
            &package(20, false),
            Decimal::from(10),
        )
        .unwrap();
        assert_eq!(options[0].carrier_id, "kanga");
    }
}
