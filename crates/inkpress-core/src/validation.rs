//! Validation utilities.

use crate::{FieldError, InkpressError};
use validator::{Validate, ValidationErrors};

/// Extension trait for validation.
pub trait ValidateExt: Validate {
    /// Validates the struct and returns an `InkpressError` on failure.
    fn validate_request(&self) -> Result<(), InkpressError> {
        self.validate().map_err(into_inkpress_error)
    }
}

impl<T: Validate> ValidateExt for T {}

/// Flattens `validator::ValidationErrors` into field errors.
///
/// Fields are sorted by name so that messages are stable.
#[must_use]
pub fn field_errors(errors: &ValidationErrors) -> Vec<FieldError> {
    let mut fields: Vec<_> = errors.field_errors().into_iter().collect();
    fields.sort_by(|a, b| a.0.cmp(&b.0));

    fields
        .into_iter()
        .flat_map(|(field, errors)| {
            errors.iter().map(move |error| FieldError {
                field: field.to_string(),
                message: error
                    .message
                    .as_ref()
                    .map_or_else(|| error.code.to_string(), ToString::to_string),
                code: error.code.to_string(),
            })
        })
        .collect()
}

/// Converts `validator::ValidationErrors` to `InkpressError`.
#[must_use]
pub fn into_inkpress_error(errors: ValidationErrors) -> InkpressError {
    let message = field_errors(&errors)
        .iter()
        .map(|e| format!("{}: {}", e.field, e.message))
        .collect::<Vec<_>>()
        .join("; ");

    InkpressError::Validation(message)
}

/// Common validation functions.
pub mod rules {
    use std::borrow::Cow;
    use validator::ValidationError;

    /// Validates that a string is not blank (not empty after trimming).
    pub fn not_blank(value: &str) -> Result<(), ValidationError> {
        if value.trim().is_empty() {
            return Err(ValidationError::new("not_blank").with_message(Cow::Borrowed("must not be blank")));
        }
        Ok(())
    }

    /// Validates that a string parses as a UUID.
    pub fn valid_uuid(value: &str) -> Result<(), ValidationError> {
        uuid::Uuid::parse_str(value.trim())
            .map(|_| ())
            .map_err(|_| ValidationError::new("uuid").with_message(Cow::Borrowed("invalid id format")))
    }
}
