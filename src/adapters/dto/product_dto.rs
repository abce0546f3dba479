use serde::{Deserialize, Serialize};

use crate::domain::models::product::Product;

#[derive(Debug, Deserialize)]
pub struct CreateProductRequest {
    pub name: String,
    pub description: String,
    pub price: f64,
    /// Base64 image payload, either bare or as a `data:` URI.
    pub image: Option<String>,
    pub category: String,
}

#[derive(Debug, Serialize)]
pub struct ProductsResponse {
    pub products: Vec<Product>,
}
