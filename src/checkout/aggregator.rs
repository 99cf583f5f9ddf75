//! Checkout validity aggregation
//!
//! Combines the independent validity signals (shipping form, payment form,
//! non-empty cart) into one boolean. Notification is edge-triggered: the
//! registered listener fires exactly once each time the aggregate value
//! changes, never on repeated recomputes of the same value.

use tracing::debug;

type ValidityListener = Box<dyn Fn(bool) + Send + Sync>;

#[derive(Default)]
pub struct CheckoutAggregator {
    shipping_valid: bool,
    payment_valid: bool,
    cart_item_count: u32,
    listener: Option<ValidityListener>,
    last_broadcast: Option<bool>,
}

impl CheckoutAggregator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Checkout is valid only when both sub-forms are valid and the cart
    /// holds at least one unit.
    pub fn is_checkout_valid(&self) -> bool {
        self.shipping_valid && self.payment_valid && self.cart_item_count > 0
    }

    pub fn set_shipping_valid(&mut self, valid: bool) {
        self.shipping_valid = valid;
        self.recompute();
    }

    pub fn set_payment_valid(&mut self, valid: bool) {
        self.payment_valid = valid;
        self.recompute();
    }

    pub fn set_cart_item_count(&mut self, count: u32) {
        self.cart_item_count = count;
        self.recompute();
    }

    /// Registers the listener notified on validity edges. Replaces any
    /// earlier listener; the last known state is not replayed.
    pub fn set_listener(&mut self, listener: ValidityListener) {
        self.listener = Some(listener);
    }

    pub fn clear_listener(&mut self) {
        self.listener = None;
    }

    fn recompute(&mut self) {
        let valid = self.is_checkout_valid();
        if self.last_broadcast == Some(valid) {
            return;
        }
        self.last_broadcast = Some(valid);
        debug!(valid, "checkout validity changed");
        if let Some(listener) = &self.listener {
            listener(valid);
        }
        // No listener registered: the notification is silently dropped.
    }
}
