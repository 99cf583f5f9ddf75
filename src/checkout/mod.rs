//! Checkout Domain Module
//!
//! This module contains the checkout flow, including:
//! - The edge-triggered validity aggregator and its debounced notifier
//! - Per-session checkout state (shipping, payment, selection)
//! - REST API handlers for quote / select / payment / submit

pub mod aggregator;
pub mod debounce;
pub mod handlers;
pub mod models;
pub mod state;

// Re-export commonly used types for convenience
pub use aggregator::CheckoutAggregator;
pub use handlers::routes;
pub use state::CheckoutSession;
