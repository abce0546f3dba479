use async_trait::async_trait;
use redis::AsyncCommands;
use uuid::Uuid;

use crate::{
    application::{error::ApplicationError, repositories::cache_repository::CacheRepository},
    domain::models::product::Product,
};

const FEATURED_PRODUCTS_KEY: &str = "featured_products";

pub struct RedisCacheRepository {
    client: redis::aio::ConnectionManager,
}

impl RedisCacheRepository {
    pub fn new(client: redis::aio::ConnectionManager) -> Self {
        Self { client }
    }

    fn refresh_token_key(user_id: Uuid) -> String {
        format!("refresh_token:{}", user_id)
    }
}

#[async_trait]
impl CacheRepository for RedisCacheRepository {
    async fn set_refresh_token(
        &self,
        user_id: Uuid,
        token: &str,
        ttl_seconds: u64,
    ) -> Result<(), ApplicationError> {
        let key = Self::refresh_token_key(user_id);
        let mut conn = self.client.clone();
        conn.set_ex::<_, _, ()>(&key, token, ttl_seconds)
            .await
            .map_err(|e| {
                ApplicationError::CacheError(format!("Failed to store refresh token: {}", e))
            })
    }

    async fn get_refresh_token(&self, user_id: Uuid) -> Result<Option<String>, ApplicationError> {
        let key = Self::refresh_token_key(user_id);
        let mut conn = self.client.clone();
        let value: Option<String> = conn.get(&key).await.map_err(|e| {
            ApplicationError::CacheError(format!("Failed to read refresh token: {}", e))
        })?;
        Ok(value)
    }

    async fn delete_refresh_token(&self, user_id: Uuid) -> Result<(), ApplicationError> {
        let key = Self::refresh_token_key(user_id);
        let mut conn = self.client.clone();
        conn.del::<_, ()>(&key).await.map_err(|e| {
            ApplicationError::CacheError(format!("Failed to delete refresh token: {}", e))
        })
    }

    async fn get_featured_products(&self) -> Result<Option<Vec<Product>>, ApplicationError> {
        let mut conn = self.client.clone();
        let value: Option<String> = conn.get(FEATURED_PRODUCTS_KEY).await.map_err(|e| {
            ApplicationError::CacheError(format!("Failed to read featured products: {}", e))
        })?;
        match value {
            None => Ok(None),
            Some(json) => {
                let products = serde_json::from_str(&json).map_err(|e| {
                    ApplicationError::CacheError(format!("Corrupt featured products entry: {}", e))
                })?;
                Ok(Some(products))
            }
        }
    }

    async fn set_featured_products(&self, products: &[Product]) -> Result<(), ApplicationError> {
        let json = serde_json::to_string(products).map_err(|e| {
            ApplicationError::CacheError(format!("Failed to serialize featured products: {}", e))
        })?;
        let mut conn = self.client.clone();
        // No TTL; the write paths keep this entry fresh.
        conn.set::<_, _, ()>(FEATURED_PRODUCTS_KEY, json)
            .await
            .map_err(|e| {
                ApplicationError::CacheError(format!("Failed to store featured products: {}", e))
            })
    }
}
