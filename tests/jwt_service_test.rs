// JWT issue/verify tests without database dependencies

use chrono::Utc;
use uuid::Uuid;

use loka_backend_core::models::user::User;
use loka_backend_core::services::{JwtConfig, JwtError, JwtService};

fn test_jwt_config() -> JwtConfig {
    JwtConfig::build(
        "test-access-secret-hs256-minimum-32-characters-long",
        "test-refresh-secret-hs256-minimum-32-characters-long",
        900,    // 15 minutes
        604800, // 7 days
        "test.loka.id".to_string(),
        "test.loka.id".to_string(),
    )
}

fn test_user() -> User {
    let now = Utc::now();
    User {
        id: Uuid::new_v4(),
        name: "Test User".to_string(),
        username: "testuser".to_string(),
        email: "test@example.com".to_string(),
        password_hash: "$argon2id$v=19$hash".to_string(),
        is_active: true,
        last_login_at: None,
        created_at: now,
        updated_at: now,
    }
}

#[test]
fn test_access_token_roundtrip() {
    let jwt_service = JwtService::new(test_jwt_config());
    let user = test_user();
    let roles = vec!["USER".to_string(), "ADMIN".to_string()];

    let token = jwt_service
        .generate_access_token(&user, &roles)
        .expect("Failed to generate access token");

    let claims = jwt_service
        .validate_access_token(&token)
        .expect("Failed to validate access token");

    assert_eq!(claims.sub, user.id.to_string());
    assert_eq!(claims.email, user.email);
    assert_eq!(claims.roles, roles);
    assert_eq!(claims.aud, "test.loka.id");
    assert_eq!(claims.iss, "test.loka.id");
    assert!(claims.exp > claims.iat);
}

#[test]
fn test_refresh_token_roundtrip_carries_user_id_only() {
    let jwt_service = JwtService::new(test_jwt_config());
    let user_id = Uuid::new_v4();

    let (token, issued_claims) = jwt_service
        .generate_refresh_token(user_id)
        .expect("Failed to generate refresh token");

    let claims = jwt_service
        .validate_refresh_token(&token)
        .expect("Failed to validate refresh token");

    assert_eq!(claims.sub, user_id.to_string());
    assert_eq!(claims.jti, issued_claims.jti);
    assert_eq!(claims.exp, issued_claims.iat + 604800);
}

#[test]
fn test_access_and_refresh_secrets_are_not_interchangeable() {
    let jwt_service = JwtService::new(test_jwt_config());
    let user = test_user();

    let access_token = jwt_service
        .generate_access_token(&user, &[])
        .expect("Failed to generate access token");
    let (refresh_token, _) = jwt_service
        .generate_refresh_token(user.id)
        .expect("Failed to generate refresh token");

    // An access token must not pass refresh verification and vice versa
    assert!(jwt_service.validate_refresh_token(&access_token).is_err());
    assert!(jwt_service.validate_access_token(&refresh_token).is_err());
}

#[test]
fn test_invalid_token_is_rejected() {
    let jwt_service = JwtService::new(test_jwt_config());

    let result = jwt_service.validate_access_token("invalid.jwt.token");
    assert!(result.is_err(), "Invalid token should fail validation");
}

#[test]
fn test_wrong_audience_is_rejected() {
    let issuing_service = JwtService::new(JwtConfig::build(
        "test-access-secret-hs256-minimum-32-characters-long",
        "test-refresh-secret-hs256-minimum-32-characters-long",
        900,
        604800,
        "other-audience.example.com".to_string(),
        "test.loka.id".to_string(),
    ));
    let validating_service = JwtService::new(test_jwt_config());

    let token = issuing_service
        .generate_access_token(&test_user(), &[])
        .expect("Failed to generate token");

    let result = validating_service.validate_access_token(&token);
    assert!(matches!(result, Err(JwtError::InvalidToken)));
}

#[tokio::test]
async fn test_expired_token_is_rejected() {
    let jwt_service = JwtService::new(JwtConfig::build(
        "test-access-secret-hs256-minimum-32-characters-long",
        "test-refresh-secret-hs256-minimum-32-characters-long",
        1, // 1 second expiry
        604800,
        "test.loka.id".to_string(),
        "test.loka.id".to_string(),
    ));

    let token = jwt_service
        .generate_access_token(&test_user(), &[])
        .expect("Failed to generate token");

    assert!(jwt_service.validate_access_token(&token).is_ok());

    // Wait past expiry; validation uses zero leeway
    tokio::time::sleep(tokio::time::Duration::from_secs(3)).await;

    let result = jwt_service.validate_access_token(&token);
    assert!(matches!(result, Err(JwtError::TokenExpired)));
}
