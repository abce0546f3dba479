mod cloudinary_storage;
mod error;
mod google_oauth;
mod token_service;

pub use cloudinary_storage::CloudinaryStorageService;
pub use error::{OAuthError, StorageError, TokenError};
pub use google_oauth::{GoogleOAuthService, GoogleUserInfo};
pub use token_service::{
    TokenClaims, TokenPair, TokenService, ACCESS_TOKEN_TTL_SECONDS, REFRESH_TOKEN_TTL_SECONDS,
};
