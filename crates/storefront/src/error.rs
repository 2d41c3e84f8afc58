//! Unified error handling for cart operations.
//!
//! No cart error is fatal: malformed persisted data never reaches this type
//! (it is logged and read as an empty cart), and a remove of an unknown
//! product is a no-op. What remains are rejected input and backend failures.

use thiserror::Error;

use cartkeeper_core::ProductError;

use crate::storage::StorageError;

/// Error type for cart store operations.
#[derive(Debug, Error)]
pub enum CartError {
    /// The add-to-cart payload failed validation.
    #[error("Invalid product: {0}")]
    InvalidProduct(#[from] ProductError),

    /// The storage backend failed.
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    /// The cart could not be serialized.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Result type alias for `CartError`.
pub type Result<T> = std::result::Result<T, CartError>;
