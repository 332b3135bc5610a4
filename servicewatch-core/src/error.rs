//! Typed validation errors for telemetry input
//!
//! Validation failures are ordinary results, not panics. Callers at a
//! transport boundary map them to a client error.

use serde::Serialize;
use std::fmt;
use thiserror::Error;

/// Why a single field was rejected
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldIssue {
    Missing,
    NotANumber,
    NotFinite,
}

impl FieldIssue {
    pub fn as_str(&self) -> &'static str {
        match self {
            FieldIssue::Missing => "missing",
            FieldIssue::NotANumber => "not a number",
            FieldIssue::NotFinite => "not finite",
        }
    }
}

/// A rejected field and the reason
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InvalidField {
    pub field: &'static str,
    pub issue: FieldIssue,
}

/// One or more required telemetry fields were missing or unusable.
///
/// Fields are listed in canonical feature order.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub struct ValidationError {
    fields: Vec<InvalidField>,
}

impl ValidationError {
    pub(crate) fn new(fields: Vec<InvalidField>) -> Self {
        debug_assert!(!fields.is_empty());
        ValidationError { fields }
    }

    /// All offending fields
    pub fn fields(&self) -> &[InvalidField] {
        &self.fields
    }

    /// Name of the first offending field
    pub fn first_field(&self) -> &'static str {
        self.fields.first().map(|f| f.field).unwrap_or("<unknown>")
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names = self
            .fields
            .iter()
            .map(|field| field.field)
            .collect::<Vec<_>>()
            .join(", ");
        write!(f, "Missing or invalid field: {}", names)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_single_field() {
        let err = ValidationError::new(vec![InvalidField {
            field: "odometer",
            issue: FieldIssue::Missing,
        }]);
        assert_eq!(err.to_string(), "Missing or invalid field: odometer");
        assert_eq!(err.first_field(), "odometer");
    }

    #[test]
    fn test_display_joins_all_fields() {
        let err = ValidationError::new(vec![
            InvalidField {
                field: "engine_temp",
                issue: FieldIssue::NotANumber,
            },
            InvalidField {
                field: "vibration_level",
                issue: FieldIssue::Missing,
            },
        ]);
        assert_eq!(
            err.to_string(),
            "Missing or invalid field: engine_temp, vibration_level"
        );
        assert_eq!(err.fields().len(), 2);
    }
}
