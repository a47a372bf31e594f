//! HS256 access tokens: issued at login, checked on every protected route.

use chrono::Utc;
use encuentro_core::types::DbId;
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

/// Default token lifetime in hours when `JWT_EXPIRY_HOURS` is not set.
pub const DEFAULT_TOKEN_EXPIRY_HOURS: i64 = 12;

/// JWT claims embedded in every issued token.
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    /// Subject: the authenticated user's id.
    pub sub: DbId,
    /// Expiration time (unix timestamp, seconds).
    pub exp: i64,
    /// Issued-at time (unix timestamp, seconds).
    pub iat: i64,
}

/// JWT signing configuration.
#[derive(Debug, Clone)]
pub struct JwtConfig {
    pub secret: String,
    pub token_expiry_hours: i64,
}

impl JwtConfig {
    /// Read signing settings from the environment.
    ///
    /// `JWT_SECRET` is required and must be non-empty; startup panics
    /// without it. `JWT_EXPIRY_HOURS` falls back to
    /// [`DEFAULT_TOKEN_EXPIRY_HOURS`].
    pub fn from_env() -> Self {
        let secret = std::env::var("JWT_SECRET").expect("JWT_SECRET must be set");
        assert!(!secret.is_empty(), "JWT_SECRET must not be empty");

        let token_expiry_hours = std::env::var("JWT_EXPIRY_HOURS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(DEFAULT_TOKEN_EXPIRY_HOURS);

        Self {
            secret,
            token_expiry_hours,
        }
    }
}

/// Generate a signed token for the given user id.
pub fn generate_token(
    user_id: DbId,
    config: &JwtConfig,
) -> Result<String, jsonwebtoken::errors::Error> {
    let now = Utc::now().timestamp();
    let claims = Claims {
        sub: user_id,
        exp: now + config.token_expiry_hours * 3600,
        iat: now,
    };

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(config.secret.as_bytes()),
    )
}

/// Validate a token and return its claims.
///
/// Fails on bad signatures and expired tokens (default validation allows
/// 60 seconds of clock leeway).
pub fn validate_token(
    token: &str,
    config: &JwtConfig,
) -> Result<Claims, jsonwebtoken::errors::Error> {
    let data = decode::<Claims>(
        token,
        &DecodingKey::from_secret(config.secret.as_bytes()),
        &Validation::default(),
    )?;
    Ok(data.claims)
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use jsonwebtoken::errors::ErrorKind;
    use uuid::Uuid;

    fn test_config() -> JwtConfig {
        JwtConfig {
            secret: "unit-test-signing-secret-0123456789".to_string(),
            token_expiry_hours: 12,
        }
    }

    #[test]
    fn test_generate_and_validate_roundtrip() {
        let config = test_config();
        let user_id = Uuid::new_v4();

        let token = generate_token(user_id, &config).unwrap();
        let claims = validate_token(&token, &config).unwrap();

        assert_eq!(claims.sub, user_id);
        assert!(claims.exp > claims.iat);
    }

    #[test]
    fn test_expired_token_rejected() {
        let config = test_config();

        // Expired an hour ago, far past the default 60s leeway.
        let now = Utc::now().timestamp();
        let stale = Claims {
            sub: Uuid::new_v4(),
            exp: now - 3600,
            iat: now - 7200,
        };
        let token = encode(
            &Header::default(),
            &stale,
            &EncodingKey::from_secret(config.secret.as_bytes()),
        )
        .unwrap();

        let err = validate_token(&token, &config).unwrap_err();
        assert_matches!(err.kind(), ErrorKind::ExpiredSignature);
    }

    #[test]
    fn test_token_signed_with_different_secret_rejected() {
        let config = test_config();
        let other = JwtConfig {
            secret: "a-completely-different-secret-value".to_string(),
            token_expiry_hours: 12,
        };

        let token = generate_token(Uuid::new_v4(), &other).unwrap();
        assert!(validate_token(&token, &config).is_err());
    }

    #[test]
    fn test_garbage_token_rejected() {
        let config = test_config();
        assert!(validate_token("not-a-jwt", &config).is_err());
    }
}
