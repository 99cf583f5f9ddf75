//! Payment domain models

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Card details as entered. Transient: discarded after authorization and
/// never persisted; the CVV is never echoed back in any error path.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CardDetails {
    pub card_number: String,
    /// `MM/YY`
    pub expiry: String,
    pub cvv: String,
}

/// Successful authorization result.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentReceipt {
    pub transaction_id: String,
    pub timestamp: DateTime<Utc>,
    /// The amount actually deducted, processing fee included.
    pub amount_charged: Decimal,
}

/// Authorization failures, in the order the checks run.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PaymentError {
    #[error("card number is invalid")]
    InvalidCardNumber,
    #[error("expiry date must be MM/YY")]
    InvalidExpiry,
    #[error("card has expired")]
    CardExpired,
    #[error("security code is invalid")]
    InvalidCvv,
    #[error("card was not recognized")]
    CardNotRecognized,
    #[error("insufficient funds")]
    InsufficientFunds,
}
