//! HS256 bearer tokens.
//!
//! Claims carry the user's id, email and admin flag as they were at login.
//! Only `userId` is trusted on later requests: the user row is re-loaded and
//! authorization reads the fresh row.

use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use rollcall_core::types::DbId;
use serde::{Deserialize, Serialize};

/// Default token lifetime in days.
pub const DEFAULT_EXPIRY_DAYS: i64 = 30;

/// JWT claims embedded in every token.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Claims {
    #[serde(rename = "userId")]
    pub user_id: DbId,
    pub email: String,
    pub is_admin: bool,
    /// Issued-at time (UTC Unix timestamp).
    pub iat: i64,
    /// Expiration time (UTC Unix timestamp).
    pub exp: i64,
}

#[derive(Debug, Clone)]
pub struct JwtConfig {
    /// HMAC-SHA256 secret used to sign and verify tokens.
    pub secret: String,
    pub expiry_days: i64,
}

/// Sign a token for the given user.
pub fn generate_token(
    user_id: DbId,
    email: &str,
    is_admin: bool,
    config: &JwtConfig,
) -> Result<String, jsonwebtoken::errors::Error> {
    let now = Utc::now();
    let claims = Claims {
        user_id,
        email: email.to_string(),
        is_admin,
        iat: now.timestamp(),
        exp: (now + Duration::days(config.expiry_days)).timestamp(),
    };

    encode(
        &Header::default(), // HS256
        &claims,
        &EncodingKey::from_secret(config.secret.as_bytes()),
    )
}

/// Verify signature and expiry, returning the embedded [`Claims`].
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

    fn config(secret: &str) -> JwtConfig {
        JwtConfig {
            secret: secret.to_string(),
            expiry_days: DEFAULT_EXPIRY_DAYS,
        }
    }

    #[test]
    fn token_round_trips_claims() {
        let config = config("test-secret-that-is-long-enough-for-hmac");
        let token = generate_token(7, "ada@example.com", true, &config).unwrap();

        let claims = validate_token(&token, &config).unwrap();
        assert_eq!(claims.user_id, 7);
        assert_eq!(claims.email, "ada@example.com");
        assert!(claims.is_admin);
        assert_eq!(claims.exp - claims.iat, 30 * 24 * 60 * 60);
    }

    #[test]
    fn claims_use_user_id_camel_case_on_the_wire() {
        let claims = Claims {
            user_id: 1,
            email: "a@b.c".into(),
            is_admin: false,
            iat: 0,
            exp: 1,
        };
        let json = serde_json::to_value(&claims).unwrap();
        assert_eq!(json["userId"], 1);
        assert!(json.get("user_id").is_none());
    }

    #[test]
    fn expired_token_is_rejected() {
        let config = config("secret");
        let now = Utc::now().timestamp();
        let claims = Claims {
            user_id: 1,
            email: "a@b.c".into(),
            is_admin: false,
            // Well past the default 60-second leeway.
            iat: now - 600,
            exp: now - 300,
        };
        let token = encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(config.secret.as_bytes()),
        )
        .unwrap();

        assert!(validate_token(&token, &config).is_err());
    }

    #[test]
    fn token_from_another_secret_is_rejected() {
        let token = generate_token(1, "a@b.c", false, &config("alpha")).unwrap();
        assert!(validate_token(&token, &config("bravo")).is_err());
    }
}
