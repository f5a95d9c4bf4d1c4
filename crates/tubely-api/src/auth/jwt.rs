use crate::auth::models::JwtClaims;
use jsonwebtoken::{decode, Algorithm, DecodingKey, Validation};
use tubely_core::{constants::TOKEN_ISSUER, AppError};

/// Validates HS256 access tokens signed with the shared secret
#[derive(Clone)]
pub struct JwtService {
    decoding_key: DecodingKey,
    validation: Validation,
}

impl JwtService {
    pub fn new(secret: &str) -> Self {
        // Strict: exp required, exact issuer, no clock skew allowance
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = true;
        validation.leeway = 0;
        validation.set_issuer(&[TOKEN_ISSUER]);
        validation.set_required_spec_claims(&["exp", "iss", "sub"]);

        Self {
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            validation,
        }
    }

    /// Validate a token and return the user ID it was issued to
    pub fn validate_token(&self, token: &str) -> Result<String, AppError> {
        let token_data =
            decode::<JwtClaims>(token, &self.decoding_key, &self.validation).map_err(|e| {
                tracing::debug!("JWT validation failed: {}", e);
                match e.kind() {
                    jsonwebtoken::errors::ErrorKind::ExpiredSignature => {
                        AppError::Unauthorized("Token has expired".to_string())
                    }
                    jsonwebtoken::errors::ErrorKind::InvalidIssuer => {
                        AppError::Unauthorized("Invalid token issuer".to_string())
                    }
                    jsonwebtoken::errors::ErrorKind::InvalidSignature => {
                        AppError::Unauthorized("Invalid token signature".to_string())
                    }
                    _ => AppError::Unauthorized(format!("Invalid or expired token: {}", e)),
                }
            })?;

        let user_id = token_data.claims.sub.trim();
        if user_id.is_empty() {
            return Err(AppError::Unauthorized("Invalid token subject".to_string()));
        }

        Ok(user_id.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, Utc};
    use jsonwebtoken::{encode, EncodingKey, Header};

    const SECRET: &str = "0123456789abcdef0123456789abcdef";

    fn token(secret: &str, sub: &str, issuer: &str, expires_in: Duration) -> String {
        let now = Utc::now();
        let claims = JwtClaims {
            sub: sub.to_string(),
            iss: issuer.to_string(),
            iat: now.timestamp(),
            exp: (now + expires_in).timestamp(),
        };
        encode(
            &Header::new(Algorithm::HS256),
            &claims,
            &EncodingKey::from_secret(secret.as_bytes()),
        )
        .unwrap()
    }

    #[test]
    fn test_valid_token_yields_subject() {
        let service = JwtService::new(SECRET);
        let jwt = token(SECRET, "u1", TOKEN_ISSUER, Duration::hours(1));
        assert_eq!(service.validate_token(&jwt).unwrap(), "u1");
    }

    #[test]
    fn test_expired_token_rejected() {
        let service = JwtService::new(SECRET);
        let jwt = token(SECRET, "u1", TOKEN_ISSUER, Duration::hours(-1));
        match service.validate_token(&jwt) {
            Err(AppError::Unauthorized(msg)) => assert_eq!(msg, "Token has expired"),
            other => panic!("expected Unauthorized, got {:?}", other),
        }
    }

    #[test]
    fn test_wrong_secret_rejected() {
        let service = JwtService::new(SECRET);
        let jwt = token(
            "ffffffffffffffffffffffffffffffff",
            "u1",
            TOKEN_ISSUER,
            Duration::hours(1),
        );
        assert!(matches!(
            service.validate_token(&jwt),
            Err(AppError::Unauthorized(_))
        ));
    }

    #[test]
    fn test_wrong_issuer_rejected() {
        let service = JwtService::new(SECRET);
        let jwt = token(SECRET, "u1", "someone-else", Duration::hours(1));
        match service.validate_token(&jwt) {
            Err(AppError::Unauthorized(msg)) => assert_eq!(msg, "Invalid token issuer"),
            other => panic!("expected Unauthorized, got {:?}", other),
        }
    }

    #[test]
    fn test_garbage_rejected() {
        let service = JwtService::new(SECRET);
        assert!(service.validate_token("not-a-jwt").is_err());
    }

    #[test]
    fn test_blank_subject_rejected() {
        let service = JwtService::new(SECRET);
        let jwt = token(SECRET, " ", TOKEN_ISSUER, Duration::hours(1));
        assert!(service.validate_token(&jwt).is_err());
    }
}
