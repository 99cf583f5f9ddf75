//! Product Catalogue Domain Module
//!
//! This module contains the catalogue business logic, including:
//! - Domain models and field validation (Product, drafts, updates)
//! - Catalogue state with mutation side effects
//! - REST API handlers

pub mod handlers;
pub mod models;
pub mod state;

// Re-export commonly used types for convenience
pub use handlers::routes;
pub use models::Product;
pub use state::Catalog;
