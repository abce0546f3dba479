use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    #[serde(rename = "_id")]
    pub id: Uuid,
    pub name: String,
    pub description: String,
    pub price: f64,
    /// Secure URL of the product image, empty when none was uploaded.
    pub image: String,
    pub category: String,
    #[serde(rename = "isFeatured")]
    pub is_featured: bool,
    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,
    #[serde(rename = "updatedAt")]
    pub updated_at: DateTime<Utc>,
}

impl Product {
    /// Public id of the stored image, derived from the URL tail
    /// (`.../products/<public_id>.<ext>`). None when the product has no image.
    pub fn image_public_id(&self) -> Option<String> {
        if self.image.is_empty() {
            return None;
        }
        let filename = self.image.rsplit('/').next()?;
        let public_id = filename.split('.').next()?;
        if public_id.is_empty() {
            return None;
        }
        Some(public_id.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn image_public_id_derived_from_url_tail() {
        let product = Product {
            id: Uuid::new_v4(),
            name: "Mug".to_string(),
            description: "A mug".to_string(),
            price: 9.5,
            image: "https://res.example.com/image/upload/v1/products/abc123.png".to_string(),
            category: "kitchen".to_string(),
            is_featured: false,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };
        assert_eq!(product.image_public_id().as_deref(), Some("abc123"));
    }

    #[test]
    fn image_public_id_absent_without_image() {
        let product = Product {
            id: Uuid::new_v4(),
            name: "Mug".to_string(),
            description: "A mug".to_string(),
            price: 9.5,
            image: String::new(),
            category: "kitchen".to_string(),
            is_featured: false,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };
        assert!(product.image_public_id().is_none());
    }
}
