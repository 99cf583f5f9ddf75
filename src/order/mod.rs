//! Order Domain Module
//!
//! This module contains order assembly, including:
//! - The immutable order snapshot and its status transitions
//! - REST API handlers for lookups and status changes

pub mod handlers;
pub mod models;

// Re-export commonly used types for convenience
pub use handlers::routes;
pub use models::{Order, OrderStatus};
