use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use base64::{engine::general_purpose::STANDARD, Engine as _};
use tracing::{info, warn};
use uuid::Uuid;

use crate::{
    adapters::{
        dto::{
            auth_dto::MessageResponse,
            product_dto::{CreateProductRequest, ProductsResponse},
        },
        state::AppState,
    },
    application::{
        dto::product_dto::NewProduct, error::ApplicationError,
        repositories::product_repository::ProductRepository,
    },
    domain::models::product::Product,
};

const IMAGE_FOLDER: &str = "products";
const RECOMMENDED_SAMPLE_SIZE: i64 = 4;

pub struct ProductController;

impl ProductController {
    pub async fn get_all_products(
        State(product_repo): State<Arc<dyn ProductRepository>>,
    ) -> Result<Json<ProductsResponse>, ApplicationError> {
        let products = product_repo.find_all().await?;
        Ok(Json(ProductsResponse { products }))
    }

    /// Cache-aside read. A miss falls back to the store and writes the result
    /// back so the next read stays on the cache path.
    pub async fn get_featured_products(
        State(app_state): State<AppState>,
    ) -> Result<Json<Vec<Product>>, ApplicationError> {
        if let Some(products) = app_state.cache_repository.get_featured_products().await? {
            return Ok(Json(products));
        }

        let products = app_state.product_repository.find_featured().await?;
        if let Err(e) = app_state
            .cache_repository
            .set_featured_products(&products)
            .await
        {
            warn!("Failed to refresh featured products cache: {:?}", e);
        }
        Ok(Json(products))
    }

    pub async fn create_product(
        State(app_state): State<AppState>,
        Json(body): Json<CreateProductRequest>,
    ) -> Result<(StatusCode, Json<Product>), ApplicationError> {
        let image = match body.image.as_deref() {
            Some(payload) if !payload.is_empty() => {
                let bytes = decode_image_payload(payload)?;
                let uploaded = app_state
                    .image_storage
                    .upload_image(bytes, IMAGE_FOLDER)
                    .await?;
                info!("Uploaded product image {}", uploaded.public_id);
                uploaded.secure_url
            }
            _ => String::new(),
        };

        let product = app_state
            .product_repository
            .create_product(NewProduct {
                name: body.name,
                description: body.description,
                price: body.price,
                image,
                category: body.category,
            })
            .await?;

        info!("Product {} created", product.id);
        Ok((StatusCode::CREATED, Json(product)))
    }

    pub async fn delete_product(
        State(app_state): State<AppState>,
        Path(id): Path<Uuid>,
    ) -> Result<Json<MessageResponse>, ApplicationError> {
        let product = app_state
            .product_repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| ApplicationError::NotFound("Product not found".to_string()))?;

        if let Some(public_id) = product.image_public_id() {
            // Best effort; a stale image is not worth failing the delete.
            let storage_id = format!("{}/{}", IMAGE_FOLDER, public_id);
            match app_state.image_storage.delete_image(&storage_id).await {
                Ok(()) => info!("Deleted image {} from storage", storage_id),
                Err(e) => warn!("Failed to delete image {} from storage: {:?}", storage_id, e),
            }
        }

        app_state.product_repository.delete_product(id).await?;
        Ok(Json(MessageResponse::new("Product deleted successfully")))
    }

    pub async fn get_recommended_products(
        State(product_repo): State<Arc<dyn ProductRepository>>,
    ) -> Result<Json<Vec<Product>>, ApplicationError> {
        let products = product_repo.sample_products(RECOMMENDED_SAMPLE_SIZE).await?;
        Ok(Json(products))
    }

    pub async fn get_products_by_category(
        State(product_repo): State<Arc<dyn ProductRepository>>,
        Path(category): Path<String>,
    ) -> Result<Json<ProductsResponse>, ApplicationError> {
        let products = product_repo.find_by_category(&category).await?;
        Ok(Json(ProductsResponse { products }))
    }

    pub async fn toggle_featured_product(
        State(app_state): State<AppState>,
        Path(id): Path<Uuid>,
    ) -> Result<Json<Product>, ApplicationError> {
        let product = app_state
            .product_repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| ApplicationError::NotFound("Product not found".to_string()))?;

        let updated = app_state
            .product_repository
            .set_featured(id, !product.is_featured)
            .await?;

        Self::update_featured_products_cache(&app_state).await;
        Ok(Json(updated))
    }

    /// Failures are logged and swallowed; the toggle itself already landed.
    async fn update_featured_products_cache(app_state: &AppState) {
        let products = match app_state.product_repository.find_featured().await {
            Ok(products) => products,
            Err(e) => {
                warn!("Failed to load featured products for cache refresh: {:?}", e);
                return;
            }
        };
        if let Err(e) = app_state
            .cache_repository
            .set_featured_products(&products)
            .await
        {
            warn!("Failed to update featured products cache: {:?}", e);
        }
    }
}

/// Accepts a bare base64 payload or a `data:image/...;base64,` URI.
fn decode_image_payload(payload: &str) -> Result<Vec<u8>, ApplicationError> {
    let encoded = payload.rsplit(',').next().unwrap_or(payload);
    STANDARD
        .decode(encoded.trim())
        .map_err(|e| ApplicationError::BadRequest(format!("Invalid image payload: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{seed_product, test_state};

    #[tokio::test]
    async fn featured_read_hits_the_cache_first() {
        let state = test_state();
        let cached = seed_product(&state, "cached", true).await;
        // The store no longer agrees with the cache; the cached view wins.
        state
            .cache_repository
            .set_featured_products(&[cached.clone()])
            .await
            .unwrap();
        seed_product(&state, "uncached", true).await;

        let Json(products) = ProductController::get_featured_products(State(state))
            .await
            .unwrap();
        assert_eq!(products.len(), 1);
        assert_eq!(products[0].id, cached.id);
    }

    #[tokio::test]
    async fn featured_read_miss_falls_back_and_repopulates_the_cache() {
        let state = test_state();
        let featured = seed_product(&state, "lamp", true).await;
        seed_product(&state, "mug", false).await;

        let Json(products) = ProductController::get_featured_products(State(state.clone()))
            .await
            .unwrap();
        assert_eq!(products.len(), 1);
        assert_eq!(products[0].id, featured.id);

        let cached = state
            .cache_repository
            .get_featured_products()
            .await
            .unwrap()
            .expect("read miss should have written the cache back");
        assert_eq!(cached.len(), 1);
        assert_eq!(cached[0].id, featured.id);
    }

    #[tokio::test]
    async fn toggle_flips_the_flag_and_refreshes_the_cache() {
        let state = test_state();
        let product = seed_product(&state, "lamp", false).await;

        let Json(updated) =
            ProductController::toggle_featured_product(State(state.clone()), Path(product.id))
                .await
                .unwrap();
        assert!(updated.is_featured);

        let cached = state
            .cache_repository
            .get_featured_products()
            .await
            .unwrap()
            .expect("toggle should refresh the cache");
        assert_eq!(cached.len(), 1);
        assert_eq!(cached[0].id, product.id);

        // Toggling back empties the cached list again.
        ProductController::toggle_featured_product(State(state.clone()), Path(product.id))
            .await
            .unwrap();
        let cached = state
            .cache_repository
            .get_featured_products()
            .await
            .unwrap()
            .unwrap();
        assert!(cached.is_empty());
    }

    #[tokio::test]
    async fn toggle_missing_product_is_not_found() {
        let state = test_state();
        let result =
            ProductController::toggle_featured_product(State(state), Path(Uuid::new_v4())).await;
        assert!(matches!(result, Err(ApplicationError::NotFound(_))));
    }

    #[tokio::test]
    async fn create_with_image_uploads_and_stores_the_url() {
        let state = test_state();
        let payload = format!("data:image/png;base64,{}", STANDARD.encode(b"png-bytes"));

        let (status, Json(product)) = ProductController::create_product(
            State(state.clone()),
            Json(CreateProductRequest {
                name: "Lamp".to_string(),
                description: "A lamp".to_string(),
                price: 25.0,
                image: Some(payload),
                category: "home".to_string(),
            }),
        )
        .await
        .unwrap();

        assert_eq!(status, StatusCode::CREATED);
        assert!(product.image.contains("products/"));
    }

    #[tokio::test]
    async fn create_with_garbage_image_payload_is_a_bad_request() {
        let state = test_state();
        let result = ProductController::create_product(
            State(state),
            Json(CreateProductRequest {
                name: "Lamp".to_string(),
                description: "A lamp".to_string(),
                price: 25.0,
                image: Some("%%%not-base64%%%".to_string()),
                category: "home".to_string(),
            }),
        )
        .await;
        assert!(matches!(result, Err(ApplicationError::BadRequest(_))));
    }

    #[tokio::test]
    async fn delete_missing_product_is_not_found() {
        let state = test_state();
        let result = ProductController::delete_product(State(state), Path(Uuid::new_v4())).await;
        assert!(matches!(result, Err(ApplicationError::NotFound(_))));
    }

    #[tokio::test]
    async fn delete_removes_the_record_and_reports_success() {
        let state = test_state();
        let product = seed_product(&state, "lamp", false).await;

        let Json(message) =
            ProductController::delete_product(State(state.clone()), Path(product.id))
                .await
                .unwrap();
        assert_eq!(message.message, "Product deleted successfully");
        assert!(state
            .product_repository
            .find_by_id(product.id)
            .await
            .unwrap()
            .is_none());
    }

    #[tokio::test]
    async fn category_listing_filters_by_category() {
        let state = test_state();
        seed_product(&state, "lamp", false).await;
        let Json(response) = ProductController::get_products_by_category(
            State(state.product_repository.clone()),
            Path("home".to_string()),
        )
        .await
        .unwrap();
        assert_eq!(response.products.len(), 1);

        let Json(response) = ProductController::get_products_by_category(
            State(state.product_repository.clone()),
            Path("garden".to_string()),
        )
        .await
        .unwrap();
        assert!(response.products.is_empty());
    }
}
