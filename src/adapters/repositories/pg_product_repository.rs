use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::query_as;
use uuid::Uuid;

use crate::{
    application::{
        dto::product_dto::NewProduct, error::ApplicationError,
        repositories::product_repository::ProductRepository,
    },
    domain::models::product::Product,
};

#[derive(Debug, sqlx::FromRow)]
struct ProductRow {
    id: Uuid,
    name: String,
    description: String,
    price: f64,
    image: String,
    category: String,
    is_featured: bool,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<ProductRow> for Product {
    fn from(row: ProductRow) -> Self {
        Product {
            id: row.id,
            name: row.name,
            description: row.description,
            price: row.price,
            image: row.image,
            category: row.category,
            is_featured: row.is_featured,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

pub struct PgProductRepository {
    pool: sqlx::PgPool,
}

impl PgProductRepository {
    pub fn new(pool: sqlx::PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ProductRepository for PgProductRepository {
    async fn create_product(&self, product: NewProduct) -> Result<Product, ApplicationError> {
        let query = r#"
            INSERT INTO application.products (name, description, price, image, category)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING *
        "#;
        let created: ProductRow = query_as::<_, ProductRow>(query)
            .bind(&product.name)
            .bind(&product.description)
            .bind(product.price)
            .bind(&product.image)
            .bind(&product.category)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| ApplicationError::DatabaseError(e.to_string()))?;
        Ok(created.into())
    }

    async fn find_all(&self) -> Result<Vec<Product>, ApplicationError> {
        let query = "SELECT * FROM application.products ORDER BY created_at DESC";
        let rows: Vec<ProductRow> = query_as::<_, ProductRow>(query)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| ApplicationError::DatabaseError(e.to_string()))?;
        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Product>, ApplicationError> {
        let query = "SELECT * FROM application.products WHERE id = $1";
        let row: Option<ProductRow> = query_as::<_, ProductRow>(query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| ApplicationError::DatabaseError(e.to_string()))?;
        Ok(row.map(Into::into))
    }

    async fn find_by_ids(&self, ids: &[Uuid]) -> Result<Vec<Product>, ApplicationError> {
        let query = "SELECT * FROM application.products WHERE id = ANY($1)";
        let rows: Vec<ProductRow> = query_as::<_, ProductRow>(query)
            .bind(ids)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| ApplicationError::DatabaseError(e.to_string()))?;
        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn find_featured(&self) -> Result<Vec<Product>, ApplicationError> {
        let query = "SELECT * FROM application.products WHERE is_featured ORDER BY created_at DESC";
        let rows: Vec<ProductRow> = query_as::<_, ProductRow>(query)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| ApplicationError::DatabaseError(e.to_string()))?;
        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn find_by_category(&self, category: &str) -> Result<Vec<Product>, ApplicationError> {
        let query = "SELECT * FROM application.products WHERE category = $1 ORDER BY created_at DESC";
        let rows: Vec<ProductRow> = query_as::<_, ProductRow>(query)
            .bind(category)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| ApplicationError::DatabaseError(e.to_string()))?;
        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn sample_products(&self, limit: i64) -> Result<Vec<Product>, ApplicationError> {
        let query = "SELECT * FROM application.products ORDER BY random() LIMIT $1";
        let rows: Vec<ProductRow> = query_as::<_, ProductRow>(query)
            .bind(limit)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| ApplicationError::DatabaseError(e.to_string()))?;
        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn set_featured(&self, id: Uuid, is_featured: bool) -> Result<Product, ApplicationError> {
        let query = r#"
            UPDATE application.products
            SET is_featured = $2, updated_at = now()
            WHERE id = $1
            RETURNING *
        "#;
        let updated: ProductRow = query_as::<_, ProductRow>(query)
            .bind(id)
            .bind(is_featured)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| ApplicationError::DatabaseError(e.to_string()))?;
        Ok(updated.into())
    }

    async fn delete_product(&self, id: Uuid) -> Result<(), ApplicationError> {
        let query = "DELETE FROM application.products WHERE id = $1";
        let result = sqlx::query(query)
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| ApplicationError::DatabaseError(e.to_string()))?;
        if result.rows_affected() == 0 {
            return Err(ApplicationError::NotFound("Product not found".to_string()));
        }
        Ok(())
    }
}
