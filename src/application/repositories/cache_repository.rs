use async_trait::async_trait;
use uuid::Uuid;

use crate::{application::error::ApplicationError, domain::models::product::Product};

/// Key-value session cache: per-user refresh-token state plus the
/// denormalized featured-product list.
#[async_trait]
pub trait CacheRepository: Send + Sync {
    /// Stores the user's current refresh token under `refresh_token:{userId}`
    /// with the given TTL, overwriting any prior value (last write wins).
    async fn set_refresh_token(
        &self,
        user_id: Uuid,
        token: &str,
        ttl_seconds: u64,
    ) -> Result<(), ApplicationError>;

    async fn get_refresh_token(&self, user_id: Uuid) -> Result<Option<String>, ApplicationError>;

    /// Unconditional delete; missing keys are not an error.
    async fn delete_refresh_token(&self, user_id: Uuid) -> Result<(), ApplicationError>;

    /// `featured_products` entry, JSON array of products, no TTL.
    async fn get_featured_products(&self) -> Result<Option<Vec<Product>>, ApplicationError>;

    async fn set_featured_products(&self, products: &[Product]) -> Result<(), ApplicationError>;
}
