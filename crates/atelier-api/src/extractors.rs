//! # Request Extraction & Validation
//!
//! The [`Validate`] trait for request DTOs plus helpers that turn Axum's
//! JSON rejection into a structured 422 instead of the default plain-text
//! response.

use axum::extract::rejection::JsonRejection;
use axum::Json;

use crate::error::AppError;

/// Business-rule validation for request types, applied after serde has
/// already checked shape and vocabulary.
pub trait Validate {
    /// Validate business rules. Returns an error message on failure.
    fn validate(&self) -> Result<(), String>;
}

/// Extract a JSON body, mapping deserialization errors to [`AppError::BadRequest`].
pub fn extract_json<T>(result: Result<Json<T>, JsonRejection>) -> Result<T, AppError> {
    result
        .map(|Json(v)| v)
        .map_err(|err| AppError::BadRequest(err.body_text()))
}

/// Extract a JSON body and validate it using the [`Validate`] trait.
pub fn extract_validated_json<T: Validate>(
    result: Result<Json<T>, JsonRejection>,
) -> Result<T, AppError> {
    let value = extract_json(result)?;
    value.validate().map_err(AppError::Validation)?;
    Ok(value)
}

/// Shared field checks for request DTOs.
pub(crate) fn require_name(name: &str, field: &str) -> Result<(), String> {
    if name.trim().is_empty() {
        return Err(format!("{field} must not be empty"));
    }
    if name.len() > 255 {
        return Err(format!("{field} must not exceed 255 characters"));
    }
    Ok(())
}

/// Reject negative quantities and costs.
pub(crate) fn require_non_negative(value: f64, field: &str) -> Result<(), String> {
    if value < 0.0 {
        return Err(format!("{field} must not be negative"));
    }
    Ok(())
}

/// Row identifiers are positive.
pub(crate) fn require_id(id: i64, field: &str) -> Result<(), String> {
    if id <= 0 {
        return Err(format!("{field} must be a positive identifier"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn require_name_rejects_blank_and_oversized() {
        assert!(require_name("Linen", "name").is_ok());
        assert!(require_name("   ", "name").is_err());
        assert!(require_name(&"x".repeat(256), "name").is_err());
    }

    #[test]
    fn require_non_negative_rejects_negatives() {
        assert!(require_non_negative(0.0, "quantity").is_ok());
        assert!(require_non_negative(-0.5, "quantity").is_err());
    }

    #[test]
    fn require_id_rejects_zero_and_negative() {
        assert!(require_id(1, "order_id").is_ok());
        assert!(require_id(0, "order_id").is_err());
        assert!(require_id(-3, "order_id").is_err());
    }
}
