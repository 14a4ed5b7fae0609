// Request field validation helpers
// Handlers collect missing-field errors into a single VALIDATION_ERROR
// response listing every offending field.

use crate::utils::api_error::{ApiError, FieldError};

/// Accumulates required-field failures the way the HTTP layer reports them.
#[derive(Debug, Default)]
pub struct RequiredFields {
    missing: Vec<FieldError>,
}

impl RequiredFields {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `field` as missing unless `value` holds a non-blank string.
    pub fn require_str(&mut self, field: &str, value: Option<&String>, message: &str) -> &mut Self {
        match value {
            Some(v) if !v.trim().is_empty() => {},
            _ => self.missing.push(FieldError::new(field, message)),
        }
        self
    }

    /// Record `field` as missing when the option is empty, whatever its type.
    pub fn require<T>(&mut self, field: &str, value: &Option<T>, message: &str) -> &mut Self {
        if value.is_none() {
            self.missing.push(FieldError::new(field, message));
        }
        self
    }

    pub fn is_empty(&self) -> bool {
        self.missing.is_empty()
    }

    /// Fail with every collected field if any requirement was violated.
    pub fn check(self) -> Result<(), ApiError> {
        if self.missing.is_empty() {
            Ok(())
        } else {
            Err(ApiError::validation("Validation error", self.missing))
        }
    }
}

/// Trim an optional string, mapping blank input to `None`.
pub fn trim_optional(field: Option<&String>) -> Option<String> {
    field.and_then(|s| {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(trimmed.to_string())
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_required_fields_collects_every_miss() {
        let mut fields = RequiredFields::new();
        fields
            .require_str("title", None, "Title is required")
            .require_str("description", Some(&"  ".to_string()), "Description is required")
            .require_str("location", Some(&"Jakarta".to_string()), "Location is required");

        let err = fields.check().unwrap_err();
        match err {
            ApiError::Validation { details, .. } => {
                let names: Vec<&str> = details.iter().map(|d| d.field.as_str()).collect();
                assert_eq!(names, vec!["title", "description"]);
            },
            other => panic!("Expected validation error, got {:?}", other),
        }
    }

    #[test]
    fn test_required_fields_passes_when_complete() {
        let mut fields = RequiredFields::new();
        fields.require("isActive", &Some(true), "isActive is required");
        assert!(fields.check().is_ok());
    }

    #[test]
    fn test_trim_optional() {
        assert_eq!(trim_optional(None), None);
        assert_eq!(trim_optional(Some(&"  ".to_string())), None);
        assert_eq!(
            trim_optional(Some(&"  hello ".to_string())),
            Some("hello".to_string())
        );
    }
}
