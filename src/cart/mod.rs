//! Shopping Cart Domain Module
//!
//! This module contains the cart business logic, including:
//! - Domain models (CartLine, inputs, responses)
//! - Cart state with change notification
//! - Catalogue join helpers (totals, resolved lines)
//! - REST API handlers

pub mod handlers;
pub mod helpers;
pub mod models;
pub mod state;

// Re-export commonly used types for convenience
pub use handlers::routes;
pub use models::CartLine;
pub use state::Cart;
