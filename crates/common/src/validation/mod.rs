//! Field-level validation errors
//!
//! Form-style input checks report every offending field at once instead of
//! failing on the first. The error is data, not a panic: surfaces map the
//! `field` values back onto inputs and show `message` next to each.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Type alias for validation results
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Validation error carrying one message per offending field.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationError {
    pub errors: Vec<FieldError>,
}

/// A single field-level error.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

impl ValidationError {
    /// Create an empty validation error to accumulate into.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create with a single field error.
    pub fn field(field: impl Into<String>, message: impl Into<String>) -> Self {
        let mut err = Self::new();
        err.add_field_error(field, message);
        err
    }

    /// Add a field-level error.
    pub fn add_field_error(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.errors.push(FieldError { field: field.into(), message: message.into() });
    }

    /// True when no field failed.
    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    /// Number of failed fields.
    pub fn error_count(&self) -> usize {
        self.errors.len()
    }

    /// First message recorded for a field, if any.
    pub fn message_for(&self, field: &str) -> Option<&str> {
        self.errors.iter().find(|e| e.field == field).map(|e| e.message.as_str())
    }

    /// Finish accumulation: `Ok(value)` when empty, `Err(self)` otherwise.
    pub fn into_result<T>(self, value: T) -> ValidationResult<T> {
        if self.is_empty() {
            Ok(value)
        } else {
            Err(self)
        }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.errors.as_slice() {
            [] => write!(f, "Validation error with no specific field errors"),
            [single] => write!(f, "Validation failed: {}: {}", single.field, single.message),
            many => {
                write!(f, "Validation failed with {} errors: ", many.len())?;
                let joined = many
                    .iter()
                    .map(|e| format!("{}: {}", e.field, e.message))
                    .collect::<Vec<_>>()
                    .join("; ");
                write!(f, "{joined}")
            }
        }
    }
}

impl std::error::Error for ValidationError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accumulates_and_reports_per_field() {
        let mut err = ValidationError::new();
        assert!(err.is_empty());

        err.add_field_error("nome", "Informe o nome.");
        err.add_field_error("horario", "Horário inválido.");

        assert_eq!(err.error_count(), 2);
        assert_eq!(err.message_for("nome"), Some("Informe o nome."));
        assert_eq!(err.message_for("missing"), None);
    }

    #[test]
    fn into_result_returns_value_only_when_clean() {
        let clean = ValidationError::new();
        assert_eq!(clean.into_result(7), Ok(7));

        let dirty = ValidationError::field("date", "Informe a data.");
        let result: ValidationResult<i32> = dirty.into_result(7);
        assert!(result.is_err());
    }

    #[test]
    fn display_lists_every_field() {
        let mut err = ValidationError::new();
        err.add_field_error("a", "first");
        err.add_field_error("b", "second");

        let text = err.to_string();
        assert!(text.contains("2 errors"));
        assert!(text.contains("a: first"));
        assert!(text.contains("b: second"));
    }
}
