//! Error types for catalog value objects.

use thiserror::Error;

/// Errors raised while validating catalog data.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CatalogError {
    /// Service code was empty after trimming.
    #[error("service code cannot be empty")]
    EmptyCode,

    /// Service code contains characters outside `[A-Z0-9_]`.
    ///
    /// The reference separator (`-`) is deliberately excluded so a code can
    /// always be recovered from a payment reference unambiguously.
    #[error("invalid service code: {0}")]
    InvalidCode(String),

    /// Currency is not a 3-letter alphabetic code.
    #[error("invalid currency: {0}")]
    InvalidCurrency(String),

    /// Stored price is not a finite non-negative number.
    ///
    /// Seen in the wild when a corrupted document carries a negative or
    /// non-numeric price; checkout must refuse rather than truncate.
    #[error("invalid price {price} for service {code}")]
    InvalidPrice { code: String, price: f64 },
}
