//! In-memory stand-ins for the store, cache and image storage, plus an
//! `AppState` factory for controller tests.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::Utc;
use jsonwebtoken::{decode, Algorithm, DecodingKey, Validation};
use uuid::Uuid;

use crate::{
    adapters::state::AppState,
    application::{
        dto::{product_dto::NewProduct, user_dto::NewUser},
        error::ApplicationError,
        repositories::{
            cache_repository::CacheRepository, product_repository::ProductRepository,
            user_repository::UserRepository,
        },
        services::{ImageStorage, UploadedImage},
    },
    domain::{
        config::{environment::Environment, secrets::GoogleOAuthSecrets},
        models::{
            product::Product,
            user::{AuthProvider, CartItem, User, UserRole},
        },
    },
    services::{GoogleOAuthService, TokenClaims, TokenService},
};

pub const TEST_ACCESS_SECRET: &str = "access-secret";
pub const TEST_REFRESH_SECRET: &str = "refresh-secret";

#[derive(Default)]
pub struct InMemoryUserRepository {
    users: Mutex<Vec<User>>,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn create_user(&self, user: NewUser) -> Result<User, ApplicationError> {
        let mut users = self.users.lock().unwrap();
        if users.iter().any(|existing| existing.email == user.email) {
            return Err(ApplicationError::Conflict("User already exists".to_string()));
        }
        let now = Utc::now();
        let created = User {
            id: Uuid::new_v4(),
            name: user.name,
            email: user.email,
            password_hash: user.password_hash,
            google_id: user.google_id,
            profile_picture: user.profile_picture,
            auth_provider: user.auth_provider,
            cart_items: Vec::new(),
            role: UserRole::Customer,
            created_at: now,
            updated_at: now,
        };
        users.push(created.clone());
        Ok(created)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, ApplicationError> {
        let users = self.users.lock().unwrap();
        Ok(users.iter().find(|user| user.id == id).cloned())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, ApplicationError> {
        let users = self.users.lock().unwrap();
        Ok(users.iter().find(|user| user.email == email).cloned())
    }

    async fn find_by_google_id(&self, google_id: &str) -> Result<Option<User>, ApplicationError> {
        let users = self.users.lock().unwrap();
        Ok(users
            .iter()
            .find(|user| user.google_id.as_deref() == Some(google_id))
            .cloned())
    }

    async fn link_google_account(
        &self,
        id: Uuid,
        google_id: &str,
        profile_picture: &str,
    ) -> Result<User, ApplicationError> {
        let mut users = self.users.lock().unwrap();
        let user = users
            .iter_mut()
            .find(|user| user.id == id)
            .ok_or_else(|| ApplicationError::DatabaseError("no rows returned".to_string()))?;
        user.google_id = Some(google_id.to_string());
        user.auth_provider = AuthProvider::Google;
        if user.profile_picture.is_empty() {
            user.profile_picture = profile_picture.to_string();
        }
        user.updated_at = Utc::now();
        Ok(user.clone())
    }

    async fn save_cart(&self, id: Uuid, items: &[CartItem]) -> Result<User, ApplicationError> {
        let mut users = self.users.lock().unwrap();
        let user = users
            .iter_mut()
            .find(|user| user.id == id)
            .ok_or_else(|| ApplicationError::DatabaseError("no rows returned".to_string()))?;
        user.cart_items = items.to_vec();
        user.updated_at = Utc::now();
        Ok(user.clone())
    }
}

#[derive(Default)]
pub struct InMemoryProductRepository {
    products: Mutex<Vec<Product>>,
}

impl InMemoryProductRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ProductRepository for InMemoryProductRepository {
    async fn create_product(&self, product: NewProduct) -> Result<Product, ApplicationError> {
        let now = Utc::now();
        let created = Product {
            id: Uuid::new_v4(),
            name: product.name,
            description: product.description,
            price: product.price,
            image: product.image,
            category: product.category,
            is_featured: false,
            created_at: now,
            updated_at: now,
        };
        self.products.lock().unwrap().push(created.clone());
        Ok(created)
    }

    async fn find_all(&self) -> Result<Vec<Product>, ApplicationError> {
        Ok(self.products.lock().unwrap().clone())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Product>, ApplicationError> {
        let products = self.products.lock().unwrap();
        Ok(products.iter().find(|product| product.id == id).cloned())
    }

    async fn find_by_ids(&self, ids: &[Uuid]) -> Result<Vec<Product>, ApplicationError> {
        let products = self.products.lock().unwrap();
        Ok(products
            .iter()
            .filter(|product| ids.contains(&product.id))
            .cloned()
            .collect())
    }

    async fn find_featured(&self) -> Result<Vec<Product>, ApplicationError> {
        let products = self.products.lock().unwrap();
        Ok(products
            .iter()
            .filter(|product| product.is_featured)
            .cloned()
            .collect())
    }

    async fn find_by_category(&self, category: &str) -> Result<Vec<Product>, ApplicationError> {
        let products = self.products.lock().unwrap();
        Ok(products
            .iter()
            .filter(|product| product.category == category)
            .cloned()
            .collect())
    }

    async fn sample_products(&self, limit: i64) -> Result<Vec<Product>, ApplicationError> {
        let products = self.products.lock().unwrap();
        Ok(products.iter().take(limit as usize).cloned().collect())
    }

    async fn set_featured(&self, id: Uuid, is_featured: bool) -> Result<Product, ApplicationError> {
        let mut products = self.products.lock().unwrap();
        let product = products
            .iter_mut()
            .find(|product| product.id == id)
            .ok_or_else(|| ApplicationError::DatabaseError("no rows returned".to_string()))?;
        product.is_featured = is_featured;
        product.updated_at = Utc::now();
        Ok(product.clone())
    }

    async fn delete_product(&self, id: Uuid) -> Result<(), ApplicationError> {
        let mut products = self.products.lock().unwrap();
        let before = products.len();
        products.retain(|product| product.id != id);
        if products.len() == before {
            return Err(ApplicationError::NotFound("Product not found".to_string()));
        }
        Ok(())
    }
}

#[derive(Default)]
pub struct InMemoryCacheRepository {
    refresh_tokens: Mutex<HashMap<Uuid, String>>,
    featured: Mutex<Option<Vec<Product>>>,
}

impl InMemoryCacheRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl CacheRepository for InMemoryCacheRepository {
    async fn set_refresh_token(
        &self,
        user_id: Uuid,
        token: &str,
        _ttl_seconds: u64,
    ) -> Result<(), ApplicationError> {
        self.refresh_tokens
            .lock()
            .unwrap()
            .insert(user_id, token.to_string());
        Ok(())
    }

    async fn get_refresh_token(&self, user_id: Uuid) -> Result<Option<String>, ApplicationError> {
        Ok(self.refresh_tokens.lock().unwrap().get(&user_id).cloned())
    }

    async fn delete_refresh_token(&self, user_id: Uuid) -> Result<(), ApplicationError> {
        self.refresh_tokens.lock().unwrap().remove(&user_id);
        Ok(())
    }

    async fn get_featured_products(&self) -> Result<Option<Vec<Product>>, ApplicationError> {
        Ok(self.featured.lock().unwrap().clone())
    }

    async fn set_featured_products(&self, products: &[Product]) -> Result<(), ApplicationError> {
        *self.featured.lock().unwrap() = Some(products.to_vec());
        Ok(())
    }
}

pub struct StaticImageStorage {
    pub deleted: Mutex<Vec<String>>,
}

impl StaticImageStorage {
    pub fn new() -> Self {
        Self {
            deleted: Mutex::new(Vec::new()),
        }
    }
}

#[async_trait]
impl ImageStorage for StaticImageStorage {
    async fn upload_image(
        &self,
        _data: Vec<u8>,
        folder: &str,
    ) -> Result<UploadedImage, ApplicationError> {
        let id = Uuid::new_v4().simple().to_string();
        Ok(UploadedImage {
            secure_url: format!("https://images.test/{}/{}.png", folder, id),
            public_id: format!("{}/{}", folder, id),
        })
    }

    async fn delete_image(&self, public_id: &str) -> Result<(), ApplicationError> {
        self.deleted.lock().unwrap().push(public_id.to_string());
        Ok(())
    }
}

pub fn test_state() -> AppState {
    let cache_repository = Arc::new(InMemoryCacheRepository::new()) as Arc<dyn CacheRepository>;
    let token_service = Arc::new(TokenService::new(
        TEST_ACCESS_SECRET.to_string(),
        TEST_REFRESH_SECRET.to_string(),
        cache_repository.clone(),
    ));
    AppState {
        environment: Environment::Development,
        client_url: "http://localhost:5173".to_string(),
        user_repository: Arc::new(InMemoryUserRepository::new()),
        product_repository: Arc::new(InMemoryProductRepository::new()),
        cache_repository,
        token_service,
        image_storage: Arc::new(StaticImageStorage::new()),
        google_oauth: Arc::new(GoogleOAuthService::new(GoogleOAuthSecrets {
            client_id: "test-client".to_string(),
            client_secret: "test-secret".to_string(),
            redirect_uri: "http://localhost:8080/api/auth/google/callback".to_string(),
        })),
    }
}

pub fn decode_claims(token: &str, secret: &str) -> TokenClaims {
    decode::<TokenClaims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &Validation::new(Algorithm::HS256),
    )
    .expect("token should decode")
    .claims
}

pub async fn seed_user(state: &AppState, email: &str) -> User {
    let password_hash = bcrypt::hash("secret1", 4).unwrap();
    state
        .user_repository
        .create_user(NewUser::local("Ada".to_string(), email.to_string(), password_hash))
        .await
        .unwrap()
}

pub async fn seed_product(state: &AppState, name: &str, featured: bool) -> Product {
    let product = state
        .product_repository
        .create_product(NewProduct {
            name: name.to_string(),
            description: format!("{} description", name),
            price: 10.0,
            image: String::new(),
            category: "home".to_string(),
        })
        .await
        .unwrap();
    if featured {
        return state
            .product_repository
            .set_featured(product.id, true)
            .await
            .unwrap();
    }
    product
}
