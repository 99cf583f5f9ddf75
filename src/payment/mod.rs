//! Payment Domain Module
//!
//! This module contains payment authorization, including:
//! - Domain models (card details, receipts, typed errors)
//! - Format validation (Luhn, expiry, CVV) and card masking
//! - The mock card ledger with the 3% processing fee

pub mod ledger;
pub mod models;
pub mod validate;

// Re-export commonly used types for convenience
pub use ledger::CardLedger;
pub use models::{CardDetails, PaymentError, PaymentReceipt};
