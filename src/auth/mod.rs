use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::config;

/// Claims carried by both access and refresh tokens. The refresh token is
/// minted by an external issuer but shares this shape.
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub user: i64,
    pub exp: i64,
    pub iat: i64,
}

impl Claims {
    pub fn new(user: i64) -> Self {
        let now = Utc::now();
        let expiry_hours = config::config().security.access_token_expiry_hours;

        Self {
            user,
            exp: (now + Duration::hours(expiry_hours as i64)).timestamp(),
            iat: now.timestamp(),
        }
    }
}

#[derive(Debug, Error)]
pub enum TokenError {
    #[error("token secret is not configured")]
    MissingSecret,
    #[error("token rejected: {0}")]
    Verification(#[from] jsonwebtoken::errors::Error),
}

impl TokenError {
    /// The access token was otherwise valid but past its expiry.
    pub fn is_expiry(&self) -> bool {
        matches!(
            self,
            TokenError::Verification(err)
                if matches!(err.kind(), jsonwebtoken::errors::ErrorKind::ExpiredSignature)
        )
    }
}

/// Mint a fresh access token for the given user identity.
pub fn generate_access_token(user: i64) -> Result<String, TokenError> {
    let secret = &config::config().security.access_token_secret;
    if secret.is_empty() {
        return Err(TokenError::MissingSecret);
    }

    let token = encode(
        &Header::default(),
        &Claims::new(user),
        &EncodingKey::from_secret(secret.as_bytes()),
    )?;
    Ok(token)
}

pub fn verify_access_token(token: &str) -> Result<Claims, TokenError> {
    verify(token, &config::config().security.access_token_secret)
}

pub fn verify_refresh_token(token: &str) -> Result<Claims, TokenError> {
    verify(token, &config::config().security.refresh_token_secret)
}

fn verify(token: &str, secret: &str) -> Result<Claims, TokenError> {
    if secret.is_empty() {
        return Err(TokenError::MissingSecret);
    }

    let data = decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &Validation::default(),
    )?;
    Ok(data.claims)
}
