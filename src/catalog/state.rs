//! Catalogue state and mutation side effects
//!
//! The catalogue owns the product list. Every successful mutation is
//! written through to the persistence store, broadcast to the registered
//! update listener, and propagated best-effort to the product directory.
//! Collaborator failures are logged and never surfaced to the caller.

use super::models::{apply_update, validate_draft, Product, ProductDraft, ProductUpdate};
use crate::directory::{NullDirectory, ProductDirectory};
use crate::error::{CatalogError, ValidationErrors};
use crate::persistence::{self, KeyValueStore, MemoryStore};
use std::collections::BTreeSet;
use std::sync::Arc;
use tracing::warn;

type UpdateListener = Box<dyn Fn(&[Product]) + Send + Sync>;

pub struct Catalog {
    products: Vec<Product>,
    store: Arc<dyn KeyValueStore>,
    directory: Arc<dyn ProductDirectory>,
    update_listener: Option<UpdateListener>,
}

impl Catalog {
    /// Builds a catalogue wired to its collaborators, restoring any
    /// previously stored product list.
    pub fn new(store: Arc<dyn KeyValueStore>, directory: Arc<dyn ProductDirectory>) -> Self {
        let products = persistence::load_catalogue(store.as_ref());
        Self {
            products,
            store,
            directory,
            update_listener: None,
        }
    }

    /// Catalogue backed by in-memory stand-ins, for tests and local runs.
    pub fn in_memory() -> Self {
        Self::new(Arc::new(MemoryStore::new()), Arc::new(NullDirectory::new()))
    }

    /// Registers the callback invoked with the full product list after each
    /// successful mutation. Replaces any earlier listener.
    pub fn set_update_listener(&mut self, listener: UpdateListener) {
        self.update_listener = Some(listener);
    }

    /// Snapshot of the current product list.
    pub fn products(&self) -> Vec<Product> {
        self.products.clone()
    }

    pub fn by_id(&self, id: &str) -> Option<&Product> {
        let wanted = id.trim();
        self.products.iter().find(|p| p.id.trim() == wanted)
    }

    /// Smallest positive integer not already used among numeric ids,
    /// rendered as a string. Non-numeric ids are ignored.
    pub fn generate_new_id(&self) -> String {
        let taken: BTreeSet<u64> = self
            .products
            .iter()
            .filter_map(|p| p.id.trim().parse::<u64>().ok())
            .collect();
        let mut candidate = 1u64;
        while taken.contains(&candidate) {
            candidate += 1;
        }
        candidate.to_string()
    }

    /// Validates and inserts a new product. No mutation on failure.
    pub fn add_product(&mut self, draft: ProductDraft) -> Result<Product, ValidationErrors> {
        let validated = validate_draft(&draft)?;

        let id = match draft.id {
            Some(id) if !id.trim().is_empty() => {
                let id = id.trim().to_string();
                if self.by_id(&id).is_some() {
                    return Err(ValidationErrors::single("id", "already in use"));
                }
                id
            }
            _ => self.generate_new_id(),
        };

        let product = Product {
            id,
            name: validated.name,
            price: validated.price,
            description: validated.description,
            available: validated.available,
            qty: validated.qty,
        };
        self.products.push(product.clone());
        self.after_mutation();

        if let Err(err) = self.directory.create_product(&product) {
            warn!(id = %product.id, %err, "directory create failed, continuing");
        }
        Ok(product)
    }

    /// Validates and applies a partial update. No mutation on failure.
    pub fn modify_product(
        &mut self,
        id: &str,
        update: ProductUpdate,
    ) -> Result<Product, ValidationErrors> {
        let wanted = id.trim();
        let Some(index) = self.products.iter().position(|p| p.id.trim() == wanted) else {
            return Err(ValidationErrors::single("id", "no product with this id"));
        };

        let updated = apply_update(&self.products[index], &update)?;
        self.products[index] = updated.clone();
        self.after_mutation();

        if let Err(err) = self.directory.update_product(&updated) {
            warn!(id = %updated.id, %err, "directory update failed, continuing");
        }
        Ok(updated)
    }

    pub fn remove_product(&mut self, id: &str) -> Result<(), CatalogError> {
        let wanted = id.trim();
        let Some(index) = self.products.iter().position(|p| p.id.trim() == wanted) else {
            return Err(CatalogError::NotFound(wanted.to_string()));
        };

        let removed = self.products.remove(index);
        self.after_mutation();

        if let Err(err) = self.directory.delete_product(&removed.id) {
            warn!(id = %removed.id, %err, "directory delete failed, continuing");
        }
        Ok(())
    }

    fn after_mutation(&self) {
        persistence::save_catalogue(self.store.as_ref(), &self.products);
        if let Some(listener) = &self.update_listener {
            listener(&self.products);
        }
    }
}
