//! Key-value persistence collaborator
//!
//! Cart, catalogue, and session state survive page reloads through an
//! external key-value store. Writes are fire-and-forget: a failure is
//! logged and the in-memory state remains authoritative for the session.
//!
//! Stored schema:
//! - `cart:<session>` -> array of `[productId, quantity]` pairs
//! - `catalogue`      -> array of product records

use crate::cart::models::CartLine;
use crate::catalog::models::Product;
use crate::error::StoreError;
use dashmap::DashMap;
use tracing::warn;

/// Storage key for the product catalogue.
pub const CATALOGUE_KEY: &str = "catalogue";

/// Storage key for a session's cart.
pub fn cart_key(cart_id: &str) -> String {
    format!("cart:{cart_id}")
}

/// Minimal key-value store contract offered by the external collaborator.
pub trait KeyValueStore: Send + Sync {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&self, key: &str, json: &str) -> Result<(), StoreError>;
}

/// In-memory store used in place of the real persistence backend.
#[derive(Default)]
pub struct MemoryStore {
    entries: DashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.get(key).map(|entry| entry.value().clone())
    }

    fn set(&self, key: &str, json: &str) -> Result<(), StoreError> {
        self.entries.insert(key.to_string(), json.to_string());
        Ok(())
    }
}

/// Serializes cart lines as `[productId, quantity]` pairs and writes them
/// through. Errors are logged, never returned.
pub fn save_cart(store: &dyn KeyValueStore, cart_id: &str, lines: &[CartLine]) {
    let pairs: Vec<(&str, u32)> = lines
        .iter()
        .map(|line| (line.product_id.as_str(), line.quantity))
        .collect();

    match serde_json::to_string(&pairs) {
        Ok(json) => {
            if let Err(err) = store.set(&cart_key(cart_id), &json) {
                warn!(cart_id, %err, "cart write-through failed, keeping in-memory state");
            }
        }
        Err(err) => warn!(cart_id, %err, "cart serialization failed"),
    }
}

/// Restores cart lines for a session, or `None` when nothing was stored
/// (or the stored payload no longer parses).
pub fn load_cart(store: &dyn KeyValueStore, cart_id: &str) -> Option<Vec<CartLine>> {
    let json = store.get(&cart_key(cart_id))?;
    match serde_json::from_str::<Vec<(String, u32)>>(&json) {
        Ok(pairs) => Some(
            pairs
                .into_iter()
                .map(|(product_id, quantity)| CartLine {
                    product_id,
                    quantity,
                })
                .collect(),
        ),
        Err(err) => {
            warn!(cart_id, %err, "stored cart unreadable, starting empty");
            None
        }
    }
}

/// Writes the catalogue snapshot through. Errors are logged, never returned.
pub fn save_catalogue(store: &dyn KeyValueStore, products: &[Product]) {
    match serde_json::to_string(products) {
        Ok(json) => {
            if let Err(err) = store.set(CATALOGUE_KEY, &json) {
                warn!(%err, "catalogue write-through failed, keeping in-memory state");
            }
        }
        Err(err) => warn!(%err, "catalogue serialization failed"),
    }
}

/// Restores the catalogue snapshot, or an empty list when absent/unreadable.
pub fn load_catalogue(store: &dyn KeyValueStore) -> Vec<Product> {
    let Some(json) = store.get(CATALOGUE_KEY) else {
        return Vec::new();
    };
    match serde_json::from_str(&json) {
        Ok(products) => products,
        Err(err) => {
            warn!(%err, "stored catalogue unreadable, starting empty");
            Vec::new()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cart_round_trips_as_id_quantity_pairs() {
        let store = MemoryStore::new();
        let lines = vec![
            CartLine {
                product_id: "1".into(),
                quantity: 2,
            },
            CartLine {
                product_id: "7".into(),
                quantity: 1,
            },
        ];

        save_cart(&store, "s1", &lines);

        let raw = store.get(&cart_key("s1")).unwrap();
        assert_eq!(raw, r#"[["1",2],["7",1]]"#);

        let restored = load_cart(&store, "s1").unwrap();
        assert_eq!(restored, lines);
    }

    #[test]
    fn missing_cart_restores_as_none() {
        let store = MemoryStore::new();
        assert!(load_cart(&store, "nope").is_none());
    }

    #[test]
    fn corrupt_cart_payload_is_tolerated() {
        let store = MemoryStore::new();
        store.set(&cart_key("s1"), "not json").unwrap();
        assert!(load_cart(&store, "s1").is_none());
    }
}
