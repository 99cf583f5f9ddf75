//! Shipping Domain Module
//!
//! This module contains the shipping rate resolver, including:
//! - Domain models (address, package, carriers, priced options)
//! - The serviceable-area, remote-area, and carrier tables
//! - The resolution pipeline (validate, filter, price, round, free-ship)

pub mod models;
pub mod resolver;
pub mod tables;

// Re-export commonly used types for convenience
pub use models::{Address, Package, ShippingError, ShippingOption};
pub use resolver::resolve_options;
