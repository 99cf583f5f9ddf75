//! Storefront Checkout Core
//!
//! This library provides the cart and checkout core of a small storefront:
//! catalogue, cart with change notification, checkout validity aggregation,
//! shipping rate resolution, payment authorization, and order assembly,
//! exposed over a thin REST surface.

// Domain modules
pub mod cart;
pub mod catalog;
pub mod checkout;
pub mod order;
pub mod payment;
pub mod shipping;

// Infrastructure
pub mod directory;
pub mod error;
pub mod persistence;
pub mod router;
pub mod session;
pub mod state;
