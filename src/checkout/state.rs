//! Per-session checkout state
//!
//! Each cart session gets a checkout session holding the validity
//! aggregator plus the transient shipping and payment inputs gathered from
//! the sub-forms. Card details live here only until submission; they are
//! never persisted. Validity edges are routed through the trailing-edge
//! debounce so a burst of sub-form edits delivers one notification.

use super::aggregator::CheckoutAggregator;
use super::debounce::DebouncedValidityNotifier;
use crate::payment::models::CardDetails;
use crate::shipping::models::{Address, Package, ShippingOption};
use std::time::Duration;

/// Quiet period before a validity edge is delivered.
pub const VALIDITY_DEBOUNCE: Duration = Duration::from_millis(250);

pub struct CheckoutSession {
    pub aggregator: CheckoutAggregator,
    pub address: Option<Address>,
    pub package: Option<Package>,
    pub quoted: Vec<ShippingOption>,
    pub selected: Option<ShippingOption>,
    pub card: Option<CardDetails>,
}

impl CheckoutSession {
    /// Session whose validity edges pass through the debounce notifier
    /// before reaching `listener`. The notifier task needs a running tokio
    /// runtime.
    pub fn debounced(delay: Duration, listener: impl Fn(bool) + Send + 'static) -> Self {
        let notifier = DebouncedValidityNotifier::spawn(delay, listener);
        let mut aggregator = CheckoutAggregator::new();
        aggregator.set_listener(Box::new(move |valid| notifier.notify(valid)));
        Self {
            aggregator,
            address: None,
            package: None,
            quoted: Vec::new(),
            selected: None,
            card: None,
        }
    }
}
