use std::sync::Arc;

use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
    application::{error::ApplicationError, repositories::cache_repository::CacheRepository},
    services::error::TokenError,
};

pub const ACCESS_TOKEN_TTL_SECONDS: i64 = 15 * 60;
pub const REFRESH_TOKEN_TTL_SECONDS: i64 = 7 * 24 * 60 * 60;

#[derive(Debug, Serialize, Deserialize)]
pub struct TokenClaims {
    #[serde(rename = "userId")]
    pub user_id: Uuid,
    pub iat: i64,
    pub exp: i64,
}

#[derive(Debug, Clone)]
pub struct TokenPair {
    pub access_token: String,
    pub refresh_token: String,
}

/// Issues and validates the HS256 token pair and reconciles refresh tokens
/// against the session cache. Access and refresh tokens are signed with
/// distinct secrets.
pub struct TokenService {
    access_secret: String,
    refresh_secret: String,
    cache: Arc<dyn CacheRepository>,
}

impl TokenService {
    pub fn new(
        access_secret: String,
        refresh_secret: String,
        cache: Arc<dyn CacheRepository>,
    ) -> Self {
        Self {
            access_secret,
            refresh_secret,
            cache,
        }
    }

    pub fn issue_token_pair(&self, user_id: Uuid) -> Result<TokenPair, ApplicationError> {
        let access_token = self.sign(user_id, &self.access_secret, ACCESS_TOKEN_TTL_SECONDS)?;
        let refresh_token = self.sign(user_id, &self.refresh_secret, REFRESH_TOKEN_TTL_SECONDS)?;
        Ok(TokenPair {
            access_token,
            refresh_token,
        })
    }

    /// Access token only; the refresh flow does not rotate refresh tokens.
    pub fn issue_access_token(&self, user_id: Uuid) -> Result<String, ApplicationError> {
        self.sign(user_id, &self.access_secret, ACCESS_TOKEN_TTL_SECONDS)
    }

    pub async fn persist_refresh_token(
        &self,
        user_id: Uuid,
        refresh_token: &str,
    ) -> Result<(), ApplicationError> {
        self.cache
            .set_refresh_token(user_id, refresh_token, REFRESH_TOKEN_TTL_SECONDS as u64)
            .await
    }

    pub fn verify_access_token(&self, token: &str) -> Result<TokenClaims, TokenError> {
        Self::verify(token, &self.access_secret)
    }

    pub fn verify_refresh_token(&self, token: &str) -> Result<TokenClaims, TokenError> {
        Self::verify(token, &self.refresh_secret)
    }

    /// True iff the cached token for the user string-equals the presented one.
    /// A cache miss (expired or never stored) is a mismatch, not an error.
    pub async fn validate_refresh_token(
        &self,
        user_id: Uuid,
        presented: &str,
    ) -> Result<bool, ApplicationError> {
        let stored = self.cache.get_refresh_token(user_id).await?;
        Ok(stored.as_deref() == Some(presented))
    }

    pub async fn revoke_refresh_token(&self, user_id: Uuid) -> Result<(), ApplicationError> {
        self.cache.delete_refresh_token(user_id).await
    }

    fn sign(&self, user_id: Uuid, secret: &str, ttl_seconds: i64) -> Result<String, ApplicationError> {
        let now = Utc::now();
        let claims = TokenClaims {
            user_id,
            iat: now.timestamp(),
            exp: (now + Duration::seconds(ttl_seconds)).timestamp(),
        };
        encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(secret.as_bytes()),
        )
        .map_err(|e| ApplicationError::InternalError(format!("Failed to sign token: {}", e)))
    }

    fn verify(token: &str, secret: &str) -> Result<TokenClaims, TokenError> {
        let data = decode::<TokenClaims>(
            token,
            &DecodingKey::from_secret(secret.as_bytes()),
            &Validation::new(Algorithm::HS256),
        )?;
        Ok(data.claims)
    }
}
