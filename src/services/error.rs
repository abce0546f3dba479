use thiserror::Error;

use crate::application::error::ApplicationError;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Network error: {0}")]
    NetworkError(String),

    #[error("Storage provider error: {0}")]
    ProviderError(String),

    #[error("Internal error: {0}")]
    InternalError(String),
}

impl From<StorageError> for ApplicationError {
    fn from(error: StorageError) -> Self {
        match error {
            StorageError::NetworkError(msg)
            | StorageError::ProviderError(msg)
            | StorageError::InternalError(msg) => {
                ApplicationError::InternalError(format!("Storage error: {}", msg))
            }
        }
    }
}

impl From<reqwest::Error> for StorageError {
    fn from(error: reqwest::Error) -> Self {
        if error.is_timeout() {
            StorageError::NetworkError("Request timeout".to_string())
        } else if error.is_connect() {
            StorageError::NetworkError(format!("Connection failed: {}", error))
        } else {
            StorageError::ProviderError(error.to_string())
        }
    }
}

#[derive(Debug, Error)]
pub enum OAuthError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("Identity provider error: {0}")]
    Provider(String),
}

impl From<OAuthError> for ApplicationError {
    fn from(error: OAuthError) -> Self {
        ApplicationError::InternalError(format!("OAuth error: {}", error))
    }
}

impl From<reqwest::Error> for OAuthError {
    fn from(error: reqwest::Error) -> Self {
        if error.is_timeout() || error.is_connect() {
            OAuthError::Network(error.to_string())
        } else {
            OAuthError::Provider(error.to_string())
        }
    }
}

#[derive(Debug, Error)]
pub enum TokenError {
    #[error("Token expired")]
    Expired,

    #[error("Invalid token: {0}")]
    Invalid(String),
}

impl From<jsonwebtoken::errors::Error> for TokenError {
    fn from(error: jsonwebtoken::errors::Error) -> Self {
        match error.kind() {
            jsonwebtoken::errors::ErrorKind::ExpiredSignature => TokenError::Expired,
            _ => TokenError::Invalid(error.to_string()),
        }
    }
}

/// Decode failures that reach a handler boundary without an explicit mapping
/// surface as the generic 500-class response. The access-token middleware maps
/// both variants to 401 itself before this conversion can run.
impl From<TokenError> for ApplicationError {
    fn from(error: TokenError) -> Self {
        ApplicationError::InternalError(error.to_string())
    }
}
