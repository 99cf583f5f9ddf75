//! Product-directory collaborator
//!
//! Catalogue mutations are propagated to an external product-management
//! service on a best-effort basis: failures are logged and never surfaced
//! to the caller of the mutation.

use crate::catalog::models::Product;
use crate::error::DirectoryError;
use tracing::debug;

/// Network-facing product directory contract.
pub trait ProductDirectory: Send + Sync {
    fn get_all_products(&self) -> Result<Vec<Product>, DirectoryError>;
    fn create_product(&self, product: &Product) -> Result<(), DirectoryError>;
    fn update_product(&self, product: &Product) -> Result<(), DirectoryError>;
    fn delete_product(&self, id: &str) -> Result<(), DirectoryError>;
}

/// Stand-in directory that acknowledges every call and only logs it.
#[derive(Default)]
pub struct NullDirectory;

impl NullDirectory {
    pub fn new() -> Self {
        Self
    }
}

impl ProductDirectory for NullDirectory {
    fn get_all_products(&self) -> Result<Vec<Product>, DirectoryError> {
        Ok(Vec::new())
    }

    fn create_product(&self, product: &Product) -> Result<(), DirectoryError> {
        debug!(id = %product.id, "directory create");
        Ok(())
    }

    fn update_product(&self, product: &Product) -> Result<(), DirectoryError> {
        debug!(id = %product.id, "directory update");
        Ok(())
    }

    fn delete_product(&self, id: &str) -> Result<(), DirectoryError> {
        debug!(id, "directory delete");
        Ok(())
    }
}
