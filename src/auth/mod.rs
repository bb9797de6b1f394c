use chrono::{Duration, Utc};
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::config;
use crate::models::Token;

pub mod password;

#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,
    pub exp: i64,
    pub iat: i64,
}

impl Claims {
    pub fn new(username: &str) -> Self {
        let now = Utc::now();
        let expiry_hours = config::config().security.jwt_expiry_hours;
        let exp = (now + Duration::hours(expiry_hours as i64)).timestamp();

        Self {
            sub: username.to_string(),
            exp,
            iat: now.timestamp(),
        }
    }
}

#[derive(Error, Debug)]
pub enum AuthError {
    #[error("JWT secret not configured")]
    MissingSecret,

    #[error("JWT generation error: {0}")]
    TokenGeneration(String),

    #[error("Invalid token: {0}")]
    InvalidToken(String),

    #[error("Token has expired")]
    TokenExpired,

    #[error("Password hashing error: {0}")]
    Hash(String),
}

/// Issue a bearer token for an authenticated user.
pub fn issue_token(username: &str) -> Result<Token, AuthError> {
    let secret = &config::config().security.jwt_secret;
    let access_token = sign_claims(&Claims::new(username), secret)?;

    Ok(Token {
        access_token,
        token_type: "bearer".to_string(),
    })
}

/// Verify a bearer token and return its claims.
pub fn verify_token(token: &str) -> Result<Claims, AuthError> {
    decode_claims(token, &config::config().security.jwt_secret)
}

fn sign_claims(claims: &Claims, secret: &str) -> Result<String, AuthError> {
    if secret.is_empty() {
        return Err(AuthError::MissingSecret);
    }

    let encoding_key = EncodingKey::from_secret(secret.as_bytes());
    encode(&Header::default(), claims, &encoding_key)
        .map_err(|e| AuthError::TokenGeneration(e.to_string()))
}

fn decode_claims(token: &str, secret: &str) -> Result<Claims, AuthError> {
    if secret.is_empty() {
        return Err(AuthError::MissingSecret);
    }

    let decoding_key = DecodingKey::from_secret(secret.as_bytes());
    let token_data =
        decode::<Claims>(token, &decoding_key, &Validation::default()).map_err(|e| {
            match e.kind() {
                ErrorKind::ExpiredSignature => AuthError::TokenExpired,
                _ => AuthError::InvalidToken(e.to_string()),
            }
        })?;

    Ok(token_data.claims)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: &str = "unit-test-secret";

    #[test]
    fn sign_then_decode_roundtrips_subject() {
        let claims = Claims {
            sub: "alice".to_string(),
            exp: (Utc::now() + Duration::hours(1)).timestamp(),
            iat: Utc::now().timestamp(),
        };

        let token = sign_claims(&claims, SECRET).unwrap();
        let decoded = decode_claims(&token, SECRET).unwrap();
        assert_eq!(decoded.sub, "alice");
    }

    #[test]
    fn expired_token_is_rejected_as_expired() {
        let claims = Claims {
            sub: "alice".to_string(),
            exp: (Utc::now() - Duration::hours(2)).timestamp(),
            iat: (Utc::now() - Duration::hours(3)).timestamp(),
        };

        let token = sign_claims(&claims, SECRET).unwrap();
        assert!(matches!(decode_claims(&token, SECRET), Err(AuthError::TokenExpired)));
    }

    #[test]
    fn wrong_secret_is_rejected() {
        let claims = Claims {
            sub: "alice".to_string(),
            exp: (Utc::now() + Duration::hours(1)).timestamp(),
            iat: Utc::now().timestamp(),
        };

        let token = sign_claims(&claims, SECRET).unwrap();
        assert!(matches!(
            decode_claims(&token, "some-other-secret"),
            Err(AuthError::InvalidToken(_))
        ));
    }

    #[test]
    fn empty_secret_is_an_error() {
        assert!(matches!(
            sign_claims(&Claims::new("alice"), ""),
            Err(AuthError::MissingSecret)
        ));
    }
}
