//! Shared error taxonomy for the storefront core
//!
//! Errors here fall into four families:
//! - `ValidationErrors`: field-keyed messages, returned (never thrown) by the
//!   operation that detected them.
//! - `CatalogError::NotFound`: an operation referenced a missing product.
//! - `StoreError` / `DirectoryError`: external-collaborator failures. These
//!   are always caught at the call site, logged, and treated as non-fatal
//!   degradation.
//! - Business-rule rejections (empty-cart submit, over-stock increase, card
//!   declined) are expressed as booleans or typed results in their own
//!   modules, never as panics.

use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;
use thiserror::Error;

/// Field-keyed validation failure map.
///
/// Keys are input field names (`name`, `price`, `qty`, ...), values are
/// human-readable messages. A `BTreeMap` keeps the serialized order stable.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ValidationErrors {
    fields: BTreeMap<String, String>,
}

impl ValidationErrors {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a message against a field, replacing any earlier one.
    pub fn add(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.fields.insert(field.into(), message.into());
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn get(&self, field: &str) -> Option<&str> {
        self.fields.get(field).map(String::as_str)
    }

    pub fn fields(&self) -> &BTreeMap<String, String> {
        &self.fields
    }

    /// Convenience for single-field failures.
    pub fn single(field: impl Into<String>, message: impl Into<String>) -> Self {
        let mut errors = Self::new();
        errors.add(field, message);
        errors
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let joined = self
            .fields
            .iter()
            .map(|(k, v)| format!("{k}: {v}"))
            .collect::<Vec<_>>()
            .join("; ");
        write!(f, "{joined}")
    }
}

impl std::error::Error for ValidationErrors {}

/// Catalogue lookup failures.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CatalogError {
    #[error("no product with id {0}")]
    NotFound(String),
}

/// Persistence-store failures. Callers log these and keep the in-memory
/// state authoritative for the session.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("persistence write failed: {0}")]
    WriteFailed(String),
}

/// Product-directory collaborator failures. Always best-effort; never
/// surfaced to the caller of a catalogue mutation.
#[derive(Debug, Error)]
pub enum DirectoryError {
    #[error("product directory call failed: {0}")]
    CallFailed(String),
}
