//! Cart state and change notification
//!
//! The cart is an ordered set of lines, one per product id. Every mutating
//! call notifies all subscribed listeners synchronously, in subscription
//! order, after the mutation has been applied (listeners observe the
//! post-state). The persistence layer subscribes to this interface rather
//! than being wired into each mutation.

use super::models::CartLine;
use crate::catalog::models::Product;
use tracing::debug;

type CartListener = Box<dyn Fn(&[CartLine]) + Send + Sync>;

/// Handle returned by `subscribe`, used to unsubscribe later.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SubscriptionId(u64);

#[derive(Default)]
pub struct Cart {
    lines: Vec<CartLine>,
    listeners: Vec<(SubscriptionId, CartListener)>,
    next_subscription: u64,
}

impl Cart {
    pub fn new() -> Self {
        Self::default()
    }

    /// Cart pre-populated with restored lines (session resume).
    pub fn from_lines(lines: Vec<CartLine>) -> Self {
        Self {
            lines,
            ..Self::default()
        }
    }

    pub fn items(&self) -> &[CartLine] {
        &self.lines
    }

    /// Total units across all lines, saturating at `u32::MAX`.
    pub fn item_count(&self) -> u32 {
        self.lines
            .iter()
            .fold(0u32, |total, line| total.saturating_add(line.quantity))
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Adds `quantity` of a product, merging into an existing line for the
    /// same id. A zero quantity is a no-op.
    pub fn add_product(&mut self, product_id: &str, quantity: u32) {
        if quantity == 0 {
            return;
        }
        let id = product_id.trim();
        if let Some(line) = self.lines.iter_mut().find(|l| l.product_id.trim() == id) {
            line.quantity = line.quantity.saturating_add(quantity);
        } else {
            self.lines.push(CartLine {
                product_id: id.to_string(),
                quantity,
            });
        }
        self.notify();
    }

    /// Removes a line entirely. Returns whether anything changed.
    pub fn remove_product(&mut self, product_id: &str) -> bool {
        let id = product_id.trim();
        let before = self.lines.len();
        self.lines.retain(|l| l.product_id.trim() != id);
        let changed = self.lines.len() != before;
        if changed {
            self.notify();
        }
        changed
    }

    /// Sets a line's quantity. Zero or negative removes the line. When a
    /// catalogue snapshot is supplied, an increase beyond both the current
    /// quantity and the product's stock is rejected (no mutation); lines
    /// already over stock are tolerated as long as they are not increased
    /// further.
    pub fn modify_quantity(
        &mut self,
        product_id: &str,
        quantity: i64,
        catalogue: Option<&[Product]>,
    ) -> bool {
        if quantity <= 0 {
            return self.remove_product(product_id);
        }
        let Ok(quantity) = u32::try_from(quantity) else {
            debug!(product_id = product_id.trim(), quantity, "quantity out of range, rejected");
            return false;
        };
        let id = product_id.trim();

        let Some(line) = self.lines.iter_mut().find(|l| l.product_id.trim() == id) else {
            return false;
        };

        if let Some(products) = catalogue {
            if let Some(product) = products.iter().find(|p| p.id.trim() == id) {
                if quantity > line.quantity && quantity > product.qty {
                    debug!(product_id = id, quantity, stock = product.qty, "stock cap rejected increase");
                    return false;
                }
            } else {
                debug!(product_id = id, "no catalogue entry, skipping stock cap");
            }
        }

        line.quantity = quantity;
        self.notify();
        true
    }

    /// Replaces the whole cart with the given lines (frontend sync),
    /// merging duplicates so the one-line-per-product invariant holds.
    pub fn replace_lines(&mut self, lines: Vec<CartLine>) {
        self.lines.clear();
        for line in lines {
            if line.quantity == 0 {
                continue;
            }
            let id = line.product_id.trim().to_string();
            if let Some(existing) = self.lines.iter_mut().find(|l| l.product_id == id) {
                existing.quantity = existing.quantity.saturating_add(line.quantity);
            } else {
                self.lines.push(CartLine {
                    product_id: id,
                    quantity: line.quantity,
                });
            }
        }
        self.notify();
    }

    pub fn clear(&mut self) {
        self.lines.clear();
        self.notify();
    }

    /// Registers a change listener; it will see every subsequent mutation.
    pub fn subscribe(&mut self, listener: CartListener) -> SubscriptionId {
        self.next_subscription += 1;
        let id = SubscriptionId(self.next_subscription);
        self.listeners.push((id, listener));
        id
    }

    /// Drops a listener. Returns whether it was registered.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(sub, _)| *sub != id);
        self.listeners.len() != before
    }

    fn notify(&self) {
        for (_, listener) in &self.listeners {
            listener(&self.lines);
        }
    }
}
