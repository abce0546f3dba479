use async_trait::async_trait;
use uuid::Uuid;

use crate::{
    application::{dto::user_dto::NewUser, error::ApplicationError},
    domain::models::user::{CartItem, User},
};

#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Persists a new user. The store enforces email uniqueness; a duplicate
    /// fails with `ApplicationError::Conflict`.
    async fn create_user(&self, user: NewUser) -> Result<User, ApplicationError>;
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, ApplicationError>;
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, ApplicationError>;
    async fn find_by_google_id(&self, google_id: &str) -> Result<Option<User>, ApplicationError>;
    /// Attaches a federated identity to an existing local account.
    async fn link_google_account(
        &self,
        id: Uuid,
        google_id: &str,
        profile_picture: &str,
    ) -> Result<User, ApplicationError>;
    /// Replaces the user's embedded cart wholesale.
    async fn save_cart(&self, id: Uuid, items: &[CartItem]) -> Result<User, ApplicationError>;
}
