//! Validation utilities.

use crate::SnipError;
use validator::{Validate, ValidationErrors};

/// Extension trait for validation.
pub trait ValidateExt: Validate {
    /// Validates the struct and returns a `SnipError` on failure.
    fn validate_request(&self) -> Result<(), SnipError> {
        self.validate().map_err(validation_errors_to_snip_error)
    }
}

impl<T: Validate> ValidateExt for T {}

/// Converts `validator::ValidationErrors` to a single `SnipError::Validation`.
///
/// Field errors are sorted by field name so the message is stable.
#[must_use]
pub fn validation_errors_to_snip_error(errors: ValidationErrors) -> SnipError {
    let mut messages: Vec<String> = errors
        .field_errors()
        .iter()
        .flat_map(|(field, errors)| {
            errors.iter().map(move |error| {
                let message = error
                    .message
                    .as_ref()
                    .map_or_else(|| error.code.to_string(), ToString::to_string);
                format!("{field}: {message}")
            })
        })
        .collect();
    messages.sort();

    SnipError::Validation(messages.join("; "))
}
