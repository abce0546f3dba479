use axum::extract::FromRef;
use std::sync::Arc;

use crate::{
    application::{
        repositories::{
            cache_repository::CacheRepository, product_repository::ProductRepository,
            user_repository::UserRepository,
        },
        services::ImageStorage,
    },
    domain::config::environment::Environment,
    services::{GoogleOAuthService, TokenService},
};

#[derive(Clone, FromRef)]
pub struct AppState {
    pub environment: Environment,
    pub client_url: String,
    pub user_repository: Arc<dyn UserRepository>,
    pub product_repository: Arc<dyn ProductRepository>,
    pub cache_repository: Arc<dyn CacheRepository>,
    pub token_service: Arc<TokenService>,
    pub image_storage: Arc<dyn ImageStorage>,
    pub google_oauth: Arc<GoogleOAuthService>,
}
