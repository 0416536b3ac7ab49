//! Domain error model.

use thiserror::Error;

/// Result type used across the domain layer.
pub type DomainResult<T> = Result<T, DomainError>;

/// Domain-level error.
///
/// Keep this focused on deterministic failures (validation, invariants,
/// malformed identifiers). Presentation and bootstrap concerns belong elsewhere.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// A value failed validation (e.g. empty item name, currency mismatch).
    #[error("validation failed: {0}")]
    Validation(String),

    /// A domain invariant was violated.
    #[error("invariant violated: {0}")]
    InvariantViolation(String),

    /// An identifier was invalid (e.g. parse failure).
    #[error("invalid identifier: {0}")]
    InvalidId(String),
}

impl DomainError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn invariant(msg: impl Into<String>) -> Self {
        Self::InvariantViolation(msg.into())
    }

    pub fn invalid_id(msg: impl Into<String>) -> Self {
        Self::InvalidId(msg.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn constructors_carry_messages_into_display() {
        assert_eq!(
            DomainError::validation("name must not be empty").to_string(),
            "validation failed: name must not be empty"
        );
        assert_eq!(
            DomainError::invariant("quantity must be positive").to_string(),
            "invariant violated: quantity must be positive"
        );
        assert_eq!(
            DomainError::invalid_id("CartId: bad length").to_string(),
            "invalid identifier: CartId: bad length"
        );
    }
}
