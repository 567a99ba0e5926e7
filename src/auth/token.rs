use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{
    decode, encode, errors::ErrorKind, DecodingKey, EncodingKey, Header, Validation,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::config::TokenConfig;
use crate::error::AppError;

/// Represents the claims encoded within a JWT (JSON Web Token).
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    /// Subject of the token: the user's ID.
    pub sub: String,
    /// Random token ID, so tokens issued in the same second still differ.
    pub jti: String,
    /// Issued-at timestamp (seconds since epoch).
    pub iat: usize,
    /// Expiration timestamp (seconds since epoch).
    pub exp: usize,
}

/// A freshly signed token and the instant it stops being valid.
#[derive(Debug, Clone)]
pub struct IssuedToken {
    pub token: String,
    pub expires_at: DateTime<Utc>,
}

/// Signs access/refresh tokens and verifies access tokens.
///
/// Generation never hands out a token together with an error. Verification
/// reports `AccessTokenExpired` separately from every other failure.
pub trait TokenIssuer: Send + Sync {
    fn generate_access_token(&self, user_id: &str) -> Result<IssuedToken, AppError>;
    fn generate_refresh_token(&self, user_id: &str) -> Result<IssuedToken, AppError>;
    /// Returns the user ID carried by a valid access token.
    fn verify_access_token(&self, token: &str) -> Result<String, AppError>;
}

/// HS256 tokens with separate keys and lifetimes for access and refresh tokens.
pub struct JwtIssuer {
    access_key: EncodingKey,
    access_decoding_key: DecodingKey,
    /// Lifetime in seconds.
    access_ttl: i64,
    refresh_key: EncodingKey,
    refresh_ttl: i64,
}

impl JwtIssuer {
    pub fn new(access: &TokenConfig, refresh: &TokenConfig) -> Self {
        Self {
            access_key: EncodingKey::from_secret(access.key.as_bytes()),
            access_decoding_key: DecodingKey::from_secret(access.key.as_bytes()),
            access_ttl: access.expires_in,
            refresh_key: EncodingKey::from_secret(refresh.key.as_bytes()),
            refresh_ttl: refresh.expires_in,
        }
    }

    fn sign(&self, user_id: &str, key: &EncodingKey, ttl: i64) -> Result<IssuedToken, AppError> {
        let now = Utc::now();
        let expires_at = Duration::try_seconds(ttl)
            .and_then(|ttl| now.checked_add_signed(ttl))
            .ok_or_else(|| AppError::Internal(format!("token lifetime of {}s is out of range", ttl)))?;

        let claims = Claims {
            sub: user_id.to_string(),
            jti: Uuid::new_v4().to_string(),
            iat: now.timestamp() as usize,
            exp: expires_at.timestamp() as usize,
        };

        let token = encode(&Header::default(), &claims, key)?;
        Ok(IssuedToken { token, expires_at })
    }
}

impl TokenIssuer for JwtIssuer {
    fn generate_access_token(&self, user_id: &str) -> Result<IssuedToken, AppError> {
        self.sign(user_id, &self.access_key, self.access_ttl)
    }

    fn generate_refresh_token(&self, user_id: &str) -> Result<IssuedToken, AppError> {
        self.sign(user_id, &self.refresh_key, self.refresh_ttl)
    }

    fn verify_access_token(&self, token: &str) -> Result<String, AppError> {
        decode::<Claims>(token, &self.access_decoding_key, &Validation::default())
            .map(|data| data.claims.sub)
            .map_err(|e| match e.kind() {
                ErrorKind::ExpiredSignature => AppError::AccessTokenExpired,
                _ => AppError::AccessTokenInvalid(e.to_string()),
            })
    }
}
