// JWT claims structures

use serde::{Deserialize, Serialize};

/// Access token claims. Role codes ride in the token so the authorization
/// middleware never touches the store on the hot path.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AccessTokenClaims {
    /// User id (subject)
    pub sub: String,

    /// JWT id
    pub jti: String,

    /// User email address
    pub email: String,

    /// Role codes held at issue time
    pub roles: Vec<String>,

    /// Audience
    pub aud: String,

    /// Issuer
    pub iss: String,

    /// Issued at (Unix epoch seconds)
    pub iat: u64,

    /// Expires at (Unix epoch seconds)
    pub exp: u64,
}

/// Refresh token claims carry the user id only; roles are re-read from the
/// store at refresh time.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RefreshTokenClaims {
    pub sub: String,
    pub jti: String,
    pub aud: String,
    pub iss: String,
    pub iat: u64,
    pub exp: u64,
}

impl AccessTokenClaims {
    pub fn is_expired(&self) -> bool {
        self.exp < now_epoch()
    }
}

impl RefreshTokenClaims {
    pub fn is_expired(&self) -> bool {
        self.exp < now_epoch()
    }
}

fn now_epoch() -> u64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_access_token_claims_roundtrip() {
        let claims = AccessTokenClaims {
            sub: "user-123".to_string(),
            jti: "jti-1".to_string(),
            email: "user@example.com".to_string(),
            roles: vec!["ADMIN".to_string()],
            aud: "loka.id".to_string(),
            iss: "loka.id".to_string(),
            iat: 1_700_000_000,
            exp: 1_700_000_900,
        };

        let json = serde_json::to_string(&claims).expect("serialize");
        let decoded: AccessTokenClaims = serde_json::from_str(&json).expect("deserialize");

        assert_eq!(claims, decoded);
    }

    #[test]
    fn test_refresh_claims_carry_user_id_only() {
        let claims = RefreshTokenClaims {
            sub: "user-456".to_string(),
            jti: "jti-2".to_string(),
            aud: "loka.id".to_string(),
            iss: "loka.id".to_string(),
            iat: 1_700_000_000,
            exp: 1_700_604_800,
        };

        let value = serde_json::to_value(&claims).expect("serialize");
        let obj = value.as_object().unwrap();

        assert_eq!(obj.len(), 6);
        assert!(!obj.contains_key("roles"));
        assert!(!obj.contains_key("email"));
    }

    #[test]
    fn test_expiry_check() {
        let now = now_epoch();

        let expired = AccessTokenClaims {
            sub: "u".into(),
            jti: "j".into(),
            email: "e@example.com".into(),
            roles: vec![],
            aud: "loka.id".into(),
            iss: "loka.id".into(),
            iat: now - 120,
            exp: now - 60,
        };
        assert!(expired.is_expired());

        let valid = AccessTokenClaims {
            exp: now + 3600,
            ..expired
        };
        assert!(!valid.is_expired());
    }
}
