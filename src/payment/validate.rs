//! Card-detail validation
//!
//! Checks short-circuit in a fixed order: card number format + Luhn, expiry
//! format + not-in-the-past, then CVV shape. Ledger lookup and balance
//! checks live in `ledger`.

use super::models::{CardDetails, PaymentError};
use chrono::{Datelike, Utc};

/// Strips spaces and dashes, leaving the raw digit string.
pub fn normalize_card_number(raw: &str) -> String {
    raw.chars().filter(|c| !c.is_whitespace() && *c != '-').collect()
}

/// Luhn checksum over a digit string. Non-digits fail outright.
pub fn luhn_check(digits: &str) -> bool {
    if digits.is_empty() || !digits.chars().all(|c| c.is_ascii_digit()) {
        return false;
    }
    let sum: u32 = digits
        .chars()
        .rev()
        .enumerate()
        .map(|(i, c)| {
            let mut d = c.to_digit(10).unwrap_or(0);
            if i % 2 == 1 {
                d *= 2;
                if d > 9 {
                    d -= 9;
                }
            }
            d
        })
        .sum();
    sum % 10 == 0
}

/// Parses `MM/YY` into `(month, four_digit_year)`.
pub fn parse_expiry(raw: &str) -> Option<(u32, i32)> {
    let (month, year) = raw.trim().split_once('/')?;
    if month.len() != 2 || year.len() != 2 {
        return None;
    }
    let month: u32 = month.parse().ok()?;
    let year: i32 = year.parse().ok()?;
    if !(1..=12).contains(&month) {
        return None;
    }
    Some((month, 2000 + year))
}

/// True when the expiry month/year is strictly before the given now.
pub fn expiry_is_past(month: u32, year: i32, now_year: i32, now_month: u32) -> bool {
    (year, month) < (now_year, now_month)
}

fn cvv_is_valid(cvv: &str) -> bool {
    (3..=4).contains(&cvv.len()) && cvv.chars().all(|c| c.is_ascii_digit())
}

/// Runs the format checks in order, short-circuiting on the first failure.
/// On success returns the normalized card number.
pub fn validate_card_format(card: &CardDetails) -> Result<String, PaymentError> {
    let number = normalize_card_number(&card.card_number);
    if !(13..=19).contains(&number.len()) || !luhn_check(&number) {
        return Err(PaymentError::InvalidCardNumber);
    }

    let (month, year) = parse_expiry(&card.expiry).ok_or(PaymentError::InvalidExpiry)?;
    let now = Utc::now();
    if expiry_is_past(month, year, now.year(), now.month()) {
        return Err(PaymentError::CardExpired);
    }

    if !cvv_is_valid(&card.cvv) {
        return Err(PaymentError::InvalidCvv);
    }
    Ok(number)
}

/// Masks a card number to its last 4 digits, e.g. `**** **** **** 4242`.
pub fn mask_card_number(raw: &str) -> String {
    let digits = normalize_card_number(raw);
    let last4 = if digits.len() >= 4 {
        &digits[digits.len() - 4..]
    } else {
        digits.as_str()
    };
    format!("**** **** **** {last4}")
}
