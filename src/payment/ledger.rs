//! Mock card ledger and charging
//!
//! A small fixed set of card records stands in for the payment gateway.
//! Authorization matches number+expiry+CVV exactly, then checks the balance
//! against the charge amount plus a 3% processing fee. The deduction is
//! plain in-memory state; callers serialize access through the owning
//! application state.

use super::models::{CardDetails, PaymentError, PaymentReceipt};
use super::validate::validate_card_format;
use chrono::Utc;
use rust_decimal::{Decimal, RoundingStrategy};
use uuid::Uuid;

/// Multiplier applying the 3% processing fee.
fn fee_multiplier() -> Decimal {
    Decimal::new(103, 2) // 1.03
}

#[derive(Debug, Clone)]
pub struct CardRecord {
    pub number: String,
    pub expiry: String,
    pub cvv: String,
    pub balance: Decimal,
}

#[derive(Debug, Default)]
pub struct CardLedger {
    records: Vec<CardRecord>,
}

impl CardLedger {
    pub fn new(records: Vec<CardRecord>) -> Self {
        Self { records }
    }

    /// The fixed test records the storefront recognizes.
    pub fn with_default_records() -> Self {
        Self::new(vec![
            CardRecord {
                number: "4242424242424242".into(),
                expiry: "12/27".into(),
                cvv: "123".into(),
                balance: Decimal::from(5000),
            },
            CardRecord {
                number: "5555555555554444".into(),
                expiry: "06/28".into(),
                cvv: "456".into(),
                balance: Decimal::new(12000, 2), // 120.00
            },
            CardRecord {
                number: "4000056655665556".into(),
                expiry: "03/27".into(),
                cvv: "999".into(),
                balance: Decimal::new(1550, 2), // 15.50
            },
        ])
    }

    pub fn balance_of(&self, number: &str) -> Option<Decimal> {
        self.records
            .iter()
            .find(|r| r.number == number)
            .map(|r| r.balance)
    }

    /// Authorizes and charges `amount` plus the processing fee. On any
    /// failure no state changes and the CVV is never part of the error.
    pub fn charge(
        &mut self,
        card: &CardDetails,
        amount: Decimal,
    ) -> Result<PaymentReceipt, PaymentError> {
        let number = validate_card_format(card)?;

        let total = (amount * fee_multiplier())
            .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);

        let record = self
            .records
            .iter_mut()
            .find(|r| {
                r.number == number && r.expiry == card.expiry.trim() && r.cvv == card.cvv.trim()
            })
            .ok_or(PaymentError::CardNotRecognized)?;

        if record.balance < total {
            return Err(PaymentError::InsufficientFunds);
        }
        record.balance -= total;

        Ok(PaymentReceipt {
            transaction_id: format!("TXN-{}", Uuid::new_v4().simple()),
            timestamp: Utc::now(),
            amount_charged: total,
        })
    }
}
