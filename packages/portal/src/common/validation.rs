//! Field-level form validation results.
//!
//! Local validation never performs IO; a [`ValidationError`] means the
//! workflow stopped before any provider call was issued.

use std::fmt;

use thiserror::Error;

/// A single rejected field with a display-ready reason.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    /// Wire name of the field, e.g. `schoolEmail`.
    pub field: &'static str,
    pub reason: String,
}

impl FieldError {
    pub fn required(field: &'static str) -> Self {
        Self {
            field,
            reason: "This field is required".to_string(),
        }
    }

    pub fn new(field: &'static str, reason: impl Into<String>) -> Self {
        Self {
            field,
            reason: reason.into(),
        }
    }
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.reason)
    }
}

/// One or more fields failed validation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("validation failed: {}", summary(.fields))]
pub struct ValidationError {
    pub fields: Vec<FieldError>,
}

impl ValidationError {
    pub fn new(fields: Vec<FieldError>) -> Self {
        Self { fields }
    }

    pub fn single(field: &'static str, reason: impl Into<String>) -> Self {
        Self {
            fields: vec![FieldError::new(field, reason)],
        }
    }

    /// True when `field` is among the rejected fields.
    pub fn rejects(&self, field: &str) -> bool {
        self.fields.iter().any(|f| f.field == field)
    }
}

fn summary(fields: &[FieldError]) -> String {
    fields
        .iter()
        .map(|f| f.field)
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_names_rejected_fields() {
        let err = ValidationError::new(vec![
            FieldError::required("schoolName"),
            FieldError::required("district"),
        ]);
        let msg = err.to_string();
        assert!(msg.contains("schoolName"));
        assert!(msg.contains("district"));
        assert!(err.rejects("schoolName"));
        assert!(!err.rejects("nin"));
    }
}
