//! Access token issuance and validation
//!
//! Tokens are HS256 JWTs signed with the process-wide secret. The secret
//! is injected once at construction rather than read ad hoc, so tests can
//! run with deterministic secrets and a missing secret fails at startup.

use crate::core::error::{AppError, Result};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

/// How long an issued token stays valid
pub const TOKEN_TTL_DAYS: i64 = 30;

/// JWT claims carried by an access token
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    /// The authenticated user's id
    pub sub: String,
    /// Issuance time (unix seconds)
    pub iat: usize,
    /// Expiration time (unix seconds), `iat` + 30 days
    pub exp: usize,
}

/// Issues and validates signed access tokens
pub struct TokenIssuer {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
}

impl TokenIssuer {
    /// Build an issuer from the process secret.
    ///
    /// An empty or blank secret is a configuration fault and is rejected
    /// here, before the server starts accepting requests.
    pub fn new(secret: &str) -> Result<Self> {
        if secret.trim().is_empty() {
            return Err(AppError::SigningConfig(
                "signing secret is empty".to_string(),
            ));
        }

        Ok(Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
        })
    }

    /// Issue a signed token for an already-verified subject.
    ///
    /// Credentials are never re-checked here; callers pass the id of a
    /// user that has already been authenticated.
    pub fn issue(&self, subject: &str) -> Result<String> {
        let issued_at = chrono::Utc::now();
        let expires_at = issued_at
            .checked_add_signed(chrono::Duration::days(TOKEN_TTL_DAYS))
            .ok_or_else(|| {
                AppError::SigningConfig("failed to calculate token expiration".to_string())
            })?;

        let claims = Claims {
            sub: subject.to_string(),
            iat: issued_at.timestamp() as usize,
            exp: expires_at.timestamp() as usize,
        };

        encode(&Header::default(), &claims, &self.encoding_key)
            .map_err(|e| AppError::SigningConfig(format!("failed to sign token: {}", e)))
    }

    /// Validate a token's signature and expiry, returning its claims
    pub fn decode(&self, token: &str) -> Result<Claims> {
        let token_data = decode::<Claims>(token, &self.decoding_key, &Validation::default())
            .map_err(|e| AppError::Unauthorized(format!("invalid token: {}", e)))?;

        Ok(token_data.claims)
    }
}
