use std::sync::Arc;

use axum::{
    extract::{Path, State},
    Extension, Json,
};
use uuid::Uuid;

use crate::{
    adapters::dto::cart_dto::{
        AddToCartRequest, CartProductResponse, RemoveFromCartRequest, UpdateQuantityRequest,
    },
    application::{
        error::ApplicationError,
        repositories::{
            product_repository::ProductRepository, user_repository::UserRepository,
        },
    },
    domain::models::user::{CartItem, User},
};

pub struct CartController;

impl CartController {
    /// The caller's cart entries merged with their product records. Entries
    /// whose product has since been deleted are silently dropped.
    pub async fn get_cart_products(
        State(product_repo): State<Arc<dyn ProductRepository>>,
        Extension(user): Extension<User>,
    ) -> Result<Json<Vec<CartProductResponse>>, ApplicationError> {
        let ids: Vec<Uuid> = user.cart_items.iter().map(|item| item.product).collect();
        let products = product_repo.find_by_ids(&ids).await?;

        let cart = products
            .into_iter()
            .filter_map(|product| {
                user.cart_items
                    .iter()
                    .find(|item| item.product == product.id)
                    .map(|item| CartProductResponse {
                        quantity: item.quantity,
                        product,
                    })
            })
            .collect();
        Ok(Json(cart))
    }

    pub async fn add_to_cart(
        State(user_repo): State<Arc<dyn UserRepository>>,
        Extension(user): Extension<User>,
        Json(body): Json<AddToCartRequest>,
    ) -> Result<Json<Vec<CartItem>>, ApplicationError> {
        let mut items = user.cart_items.clone();
        match items.iter_mut().find(|item| item.product == body.product_id) {
            Some(item) => item.quantity += 1,
            None => items.push(CartItem {
                product: body.product_id,
                quantity: 1,
            }),
        }

        let user = user_repo.save_cart(user.id, &items).await?;
        Ok(Json(user.cart_items))
    }

    pub async fn remove_all_from_cart(
        State(user_repo): State<Arc<dyn UserRepository>>,
        Extension(user): Extension<User>,
        Json(body): Json<RemoveFromCartRequest>,
    ) -> Result<Json<Vec<CartItem>>, ApplicationError> {
        let items: Vec<CartItem> = match body.product_id {
            Some(product_id) => user
                .cart_items
                .iter()
                .filter(|item| item.product != product_id)
                .cloned()
                .collect(),
            None => Vec::new(),
        };

        let user = user_repo.save_cart(user.id, &items).await?;
        Ok(Json(user.cart_items))
    }

    pub async fn update_quantity(
        State(user_repo): State<Arc<dyn UserRepository>>,
        Extension(user): Extension<User>,
        Path(product_id): Path<Uuid>,
        Json(body): Json<UpdateQuantityRequest>,
    ) -> Result<Json<Vec<CartItem>>, ApplicationError> {
        let mut items = user.cart_items.clone();
        let position = items
            .iter()
            .position(|item| item.product == product_id)
            .ok_or_else(|| ApplicationError::NotFound("Product not found".to_string()))?;

        if body.quantity == 0 {
            items.remove(position);
        } else {
            items[position].quantity = body.quantity;
        }

        let user = user_repo.save_cart(user.id, &items).await?;
        Ok(Json(user.cart_items))
    }
}
