use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::models::product::Product;

#[derive(Debug, Deserialize)]
pub struct AddToCartRequest {
    #[serde(rename = "productId")]
    pub product_id: Uuid,
}

/// Without a product id the whole cart is cleared.
#[derive(Debug, Default, Deserialize)]
pub struct RemoveFromCartRequest {
    #[serde(rename = "productId")]
    pub product_id: Option<Uuid>,
}

#[derive(Debug, Deserialize)]
pub struct UpdateQuantityRequest {
    pub quantity: i32,
}

/// A catalog product merged with its quantity in the caller's cart.
#[derive(Debug, Serialize)]
pub struct CartProductResponse {
    #[serde(flatten)]
    pub product: Product,
    pub quantity: i32,
}
