//! Domain error model.

use thiserror::Error;

/// Result type used across the domain layer.
pub type DomainResult<T> = Result<T, DomainError>;

/// Domain-level error.
///
/// Every variant is recoverable by the user: the operation that produced it
/// was rejected as a whole and no state was mutated.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// The login pair did not match the configured credentials.
    #[error("invalid username or password")]
    InvalidCredentials,

    /// A required field was blank or failed to parse.
    #[error("validation failed: {0}")]
    Validation(String),

    /// An update was requested while no product is selected.
    #[error("no product selected")]
    NoSelection,

    /// A purchase was attempted on a product with zero quantity.
    #[error("product \"{name}\" is out of stock")]
    OutOfStock { name: String },

    /// The referenced product does not exist.
    #[error("product not found: {0}")]
    NotFound(String),

    /// A domain invariant was violated.
    #[error("invariant violated: {0}")]
    InvariantViolation(String),
}

impl DomainError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn invariant(msg: impl Into<String>) -> Self {
        Self::InvariantViolation(msg.into())
    }

    pub fn not_found(what: impl core::fmt::Display) -> Self {
        Self::NotFound(what.to_string())
    }

    pub fn out_of_stock(name: impl Into<String>) -> Self {
        Self::OutOfStock { name: name.into() }
    }
}
