/// Catalog-store insert payload. `image` is the already-uploaded secure URL,
/// empty when the product was created without one.
#[derive(Debug, Clone)]
pub struct NewProduct {
    pub name: String,
    pub description: String,
    pub price: f64,
    pub image: String,
    pub category: String,
}
