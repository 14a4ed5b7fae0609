// Shared handling of enumerated status columns
// Each entity declares its allowed set once; requests referencing any other
// value are rejected with a VALIDATION_ERROR listing the allowed values.

use crate::utils::api_error::ApiError;

/// A closed status set stored as text in the database.
pub trait EntityStatus: Sized + Copy {
    /// Every accepted status value, in the order reported to clients.
    const ALLOWED: &'static [&'static str];

    fn as_str(&self) -> &'static str;

    fn from_str(s: &str) -> Option<Self>;

    /// Parse a requested status value, failing with the canonical
    /// allowed-values message when it is outside the set.
    fn parse_request(s: &str) -> Result<Self, ApiError> {
        Self::from_str(s).ok_or_else(|| {
            ApiError::validation(
                "Invalid status value",
                vec![crate::utils::api_error::FieldError::new(
                    "status",
                    format!("Status must be one of {}", Self::ALLOWED.join(", ")),
                )],
            )
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    enum Light {
        Red,
        Green,
    }

    impl EntityStatus for Light {
        const ALLOWED: &'static [&'static str] = &["RED", "GREEN"];

        fn as_str(&self) -> &'static str {
            match self {
                Light::Red => "RED",
                Light::Green => "GREEN",
            }
        }

        fn from_str(s: &str) -> Option<Self> {
            match s {
                "RED" => Some(Light::Red),
                "GREEN" => Some(Light::Green),
                _ => None,
            }
        }
    }

    #[test]
    fn test_parse_request_accepts_members() {
        assert_eq!(Light::parse_request("GREEN").unwrap(), Light::Green);
    }

    #[test]
    fn test_parse_request_lists_allowed_values() {
        let err = Light::parse_request("BLUE").unwrap_err();
        match err {
            ApiError::Validation { details, .. } => {
                assert_eq!(details[0].field, "status");
                assert_eq!(details[0].message, "Status must be one of RED, GREEN");
            },
            other => panic!("Expected validation error, got {:?}", other),
        }
    }
}
