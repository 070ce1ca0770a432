//! Field-level validation errors.
//!
//! Request DTOs derive [`validator::Validate`]; the resulting
//! [`ValidationErrors`] are flattened here into a stable
//! `field -> [message]` map that the API layer serializes verbatim.

use std::collections::BTreeMap;

use validator::{ValidationError, ValidationErrors};

use crate::error::CoreError;

/// Messages per offending field, keyed by the wire field name.
pub type FieldErrors = BTreeMap<String, Vec<String>>;

/// Flatten `validator` output into [`FieldErrors`].
///
/// Errors without an explicit message fall back to the rule code
/// (e.g. `"length"`), so no failing field is ever silently dropped.
pub fn collect_field_errors(errors: &ValidationErrors) -> FieldErrors {
    errors
        .field_errors()
        .into_iter()
        .map(|(field, errs)| {
            let messages = errs.iter().map(error_message).collect();
            (field.to_string(), messages)
        })
        .collect()
}

fn error_message(err: &ValidationError) -> String {
    match &err.message {
        Some(msg) => msg.to_string(),
        None => err.code.to_string(),
    }
}

impl From<ValidationErrors> for CoreError {
    fn from(errors: ValidationErrors) -> Self {
        CoreError::InvalidFields(collect_field_errors(&errors))
    }
}
