//! Error types for stockroom
//!
//! Two tiers: business-rule and input failures are plain values reported back
//! to the caller, while snapshot I/O failures stay inside the storage layer.

use thiserror::Error;

/// Snapshot read/write failure
#[derive(Debug, Error)]
pub enum StoreError {
    /// File could not be read, written, or its directory created
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// Snapshot content is not a valid list of products
    #[error("Parse error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result alias for snapshot operations
pub type StoreResult<T> = std::result::Result<T, StoreError>;

/// A business rule refused the requested change. The inventory is unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Rejection {
    #[error("Product {0} not found.")]
    NotFound(String),
    #[error("A product named '{0}' already exists.")]
    DuplicateName(String),
    #[error("Price must be greater than zero.")]
    InvalidPrice,
    #[error("Stock cannot be negative.")]
    NegativeStock,
    #[error("Stock value is too large.")]
    StockOutOfRange,
    #[error("No more item codes can be issued.")]
    CodeSpaceExhausted,
}

/// Raw form input could not be turned into a request
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InputError {
    #[error("Product name is required.")]
    MissingName,
    #[error("Invalid number format for {field}: '{value}'.")]
    InvalidNumber { field: &'static str, value: String },
}

/// Anything a caller-facing operation can report instead of succeeding
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ServiceError {
    #[error(transparent)]
    Input(#[from] InputError),
    #[error(transparent)]
    Rejected(#[from] Rejection),
}

impl ServiceError {
    /// True when the request named a product code that does not exist
    pub fn is_not_found(&self) -> bool {
        matches!(self, ServiceError::Rejected(Rejection::NotFound(_)))
    }
}
