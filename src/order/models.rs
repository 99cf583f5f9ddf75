//! Order assembly
//!
//! An order snapshots the cart, shipping, and payment state at submission
//! time. Line prices are frozen when items are added; after creation only
//! `status` may change.

use crate::catalog::models::Product;
use crate::shipping::models::Address;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    Pending,
    Processing,
    Shipped,
    Delivered,
    Cancelled,
}

/// One frozen order line: product snapshot, quantity, and the line total
/// captured at assembly time.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderLine {
    pub product: Product,
    pub quantity: u32,
    pub line_total: Decimal,
}

/// Payment details as stored on an order: masked card plus the gateway
/// transaction id. Full card data never reaches this type.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentInfo {
    pub masked_card: String,
    pub transaction_id: String,
}

#[derive(Debug, Clone)]
pub struct Order {
    order_id: String,
    items: Vec<OrderLine>,
    shipping_info: Option<Address>,
    shipping_cost: Decimal,
    payment_info: Option<PaymentInfo>,
    status: OrderStatus,
    order_date: DateTime<Utc>,
}

/// Time+random order id. Collision-improbable, not collision-proof.
fn generate_order_id() -> String {
    let fragment = Uuid::new_v4().simple().to_string();
    format!("ORD-{}-{}", Utc::now().timestamp_millis(), &fragment[..6])
}

impl Default for Order {
    fn default() -> Self {
        Self::new()
    }
}

impl Order {
    pub fn new() -> Self {
        Self {
            order_id: generate_order_id(),
            items: Vec::new(),
            shipping_info: None,
            shipping_cost: Decimal::ZERO,
            payment_info: None,
            status: OrderStatus::Pending,
            order_date: Utc::now(),
        }
    }

    pub fn order_id(&self) -> &str {
        &self.order_id
    }

    pub fn status(&self) -> OrderStatus {
        self.status
    }

    pub fn items(&self) -> &[OrderLine] {
        &self.items
    }

    /// Freezes `quantity × price` per line from resolved cart contents.
    pub fn add_items(&mut self, items: Vec<(Product, u32)>) {
        for (product, quantity) in items {
            let line_total = product.price * Decimal::from(quantity);
            self.items.push(OrderLine {
                product,
                quantity,
                line_total,
            });
        }
    }

    pub fn set_shipping(&mut self, address: Address, cost: Decimal) {
        self.shipping_info = Some(address);
        self.shipping_cost = cost;
    }

    pub fn set_payment(&mut self, info: PaymentInfo) {
        self.payment_info = Some(info);
    }

    /// Succeeds only when shipping and payment are set and items exist;
    /// moves the order to `Processing`. Otherwise false, no mutation.
    pub fn submit(&mut self) -> bool {
        if self.shipping_info.is_none() || self.payment_info.is_none() || self.items.is_empty() {
            return false;
        }
        self.status = OrderStatus::Processing;
        true
    }

    /// Unconditional transition among the status set. No validity matrix
    /// is enforced between transitions.
    pub fn update_status(&mut self, status: OrderStatus) {
        self.status = status;
    }

    pub fn subtotal(&self) -> Decimal {
        self.items.iter().map(|line| line.line_total).sum()
    }

    /// Read-only projection for display; the card stays masked.
    pub fn summary(&self) -> OrderSummary {
        OrderSummary {
            order_id: self.order_id.clone(),
            items: self.items.clone(),
            shipping_info: self.shipping_info.clone(),
            subtotal: self.subtotal(),
            shipping_cost: self.shipping_cost,
            total: self.subtotal() + self.shipping_cost,
            payment: self.payment_info.clone(),
            status: self.status,
            order_date: self.order_date,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderSummary {
    pub order_id: String,
    pub items: Vec<OrderLine>,
    pub shipping_info: Option<Address>,
    pub subtotal: Decimal,
    pub shipping_cost: Decimal,
    pub total: Decimal,
    pub payment: Option<PaymentInfo>,
    pub status: OrderStatus,
    pub order_date: DateTime<Utc>,
}

/// Input for the status-update endpoint.
#[derive(Debug, Deserialize)]
pub struct StatusInput {
    pub status: OrderStatus,
}
