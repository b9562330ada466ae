use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::config::SecurityConfig;

pub mod password;

/// Claims carried by a bearer token: the asserted identity (email) and a
/// signed expiry window. Tokens are stateless; validity is purely a function
/// of signature and time.
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,
    pub exp: i64,
    pub iat: i64,
}

impl Claims {
    pub fn new(identity: impl Into<String>, ttl: Duration) -> Self {
        let now = Utc::now();

        Self {
            sub: identity.into(),
            exp: (now + ttl).timestamp(),
            iat: now.timestamp(),
        }
    }
}

#[derive(Debug, Error)]
pub enum TokenError {
    /// Signing misconfiguration. A startup fault, not a per-request one.
    #[error("signing secret is not configured")]
    MissingSecret,

    #[error("token generation failed: {0}")]
    Encode(#[source] jsonwebtoken::errors::Error),

    #[error("invalid or expired token")]
    Invalid,
}

/// Sign a token asserting `identity` for `ttl` from now.
pub fn issue_token(
    security: &SecurityConfig,
    identity: &str,
    ttl: Duration,
) -> Result<String, TokenError> {
    if security.jwt_secret.is_empty() {
        return Err(TokenError::MissingSecret);
    }

    let claims = Claims::new(identity, ttl);
    let encoding_key = EncodingKey::from_secret(security.jwt_secret.as_bytes());

    encode(&Header::default(), &claims, &encoding_key).map_err(TokenError::Encode)
}

/// Verify signature and expiry, returning the claims. Zero leeway: a token
/// is rejected the moment its expiry passes.
pub fn decode_token(security: &SecurityConfig, token: &str) -> Result<Claims, TokenError> {
    if security.jwt_secret.is_empty() {
        return Err(TokenError::MissingSecret);
    }

    let decoding_key = DecodingKey::from_secret(security.jwt_secret.as_bytes());
    let mut validation = Validation::default();
    validation.leeway = 0;
    validation.set_required_spec_claims(&["exp"]);

    decode::<Claims>(token, &decoding_key, &validation)
        .map(|data| data.claims)
        .map_err(|_| TokenError::Invalid)
}
