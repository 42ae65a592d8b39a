use super::*;
use std::env;

fn set_env_vars() {
    unsafe {
        env::set_var("JWT_SECRET", "supersecretjwtsecretforunittesting123");
    }
}

#[test]
fn test_generate_and_validate_jwt() {
    set_env_vars();

    let token = generate_jwt(
        42,
        "ramesh",
        "ramesh@example.com",
        "Farmer",
        "supersecretjwtsecretforunittesting123",
    )
    .unwrap();

    let claims = validate_jwt(&token).expect("Valid token should pass");
    assert_eq!(claims.sub, "42");
    assert_eq!(claims.username, "ramesh");
    assert_eq!(claims.email, "ramesh@example.com");
    assert_eq!(claims.role, "Farmer");
}

#[test]
fn test_validate_jwt_invalid_signature() {
    set_env_vars();

    let token = generate_jwt(42, "ramesh", "ramesh@example.com", "Farmer", "wrongsecret")
        .unwrap();

    let result = validate_jwt(&token);
    assert!(result.is_err());
}

#[test]
fn test_validate_jwt_garbage_token() {
    set_env_vars();

    let result = validate_jwt("not-a-jwt");
    assert!(result.is_err());
}

#[test]
fn test_password_hash_roundtrip() {
    let hash = hash_password("Secret@123").unwrap();

    assert!(verify_password("Secret@123", &hash));
    assert!(!verify_password("Secret@124", &hash));
}

#[test]
fn test_verify_password_rejects_malformed_hash() {
    assert!(!verify_password("Secret@123", "not-a-phc-string"));
}

#[test]
fn test_require_role() {
    let auth_user = AuthUser {
        user_id: 1,
        username: "admin".to_string(),
        email: "admin@krishisetu.com".to_string(),
        role: "Admin".to_string(),
    };

    assert!(auth_user.require_role(RoleName::Admin).is_ok());
    assert!(auth_user.require_role(RoleName::Farmer).is_err());
}
