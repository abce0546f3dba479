use async_trait::async_trait;
use uuid::Uuid;

use crate::{
    application::{dto::product_dto::NewProduct, error::ApplicationError},
    domain::models::product::Product,
};

#[async_trait]
pub trait ProductRepository: Send + Sync {
    async fn create_product(&self, product: NewProduct) -> Result<Product, ApplicationError>;
    async fn find_all(&self) -> Result<Vec<Product>, ApplicationError>;
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Product>, ApplicationError>;
    async fn find_by_ids(&self, ids: &[Uuid]) -> Result<Vec<Product>, ApplicationError>;
    async fn find_featured(&self) -> Result<Vec<Product>, ApplicationError>;
    async fn find_by_category(&self, category: &str) -> Result<Vec<Product>, ApplicationError>;
    /// Random sample for the recommendations endpoint.
    async fn sample_products(&self, limit: i64) -> Result<Vec<Product>, ApplicationError>;
    async fn set_featured(&self, id: Uuid, is_featured: bool) -> Result<Product, ApplicationError>;
    async fn delete_product(&self, id: Uuid) -> Result<(), ApplicationError>;
}
