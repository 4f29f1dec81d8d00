//! # Validation Errors
//!
//! Structured errors for wire values that fall outside the domain
//! vocabularies. These surface at the API boundary as 422 responses.

use thiserror::Error;

/// Errors raised when parsing domain vocabulary values.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// A status string matched none of the enumerated values.
    #[error("unrecognized status value: {0:?}")]
    InvalidStatus(String),

    /// A priority string matched none of the enumerated values.
    #[error("unrecognized priority value: {0:?}")]
    InvalidPriority(String),
}
