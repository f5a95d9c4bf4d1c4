use chrono::{Duration, Utc};
use jsonwebtoken::{encode, EncodingKey, Header};
use serde::Serialize;

/// Secret shared by the test config and minted tokens.
pub const TEST_JWT_SECRET: &str = "test-jwt-secret-at-least-32-characters-long";

const ISSUER: &str = "tubely-access";

#[derive(Serialize)]
struct Claims<'a> {
    sub: &'a str,
    iss: &'a str,
    iat: i64,
    exp: i64,
}

fn sign(user_id: &str, issuer: &str, expires_in: Duration) -> String {
    let now = Utc::now();
    let claims = Claims {
        sub: user_id,
        iss: issuer,
        iat: now.timestamp(),
        exp: (now + expires_in).timestamp(),
    };
    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(TEST_JWT_SECRET.as_bytes()),
    )
    .expect("Failed to sign test token")
}

/// `Authorization` header value carrying a valid token for `user_id`.
pub fn bearer(user_id: &str) -> String {
    format!("Bearer {}", sign(user_id, ISSUER, Duration::hours(1)))
}

/// `Authorization` header value carrying a token that expired an hour ago.
pub fn expired_bearer(user_id: &str) -> String {
    format!("Bearer {}", sign(user_id, ISSUER, Duration::hours(-1)))
}
