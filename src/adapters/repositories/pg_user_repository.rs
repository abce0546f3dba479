use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{query_as, types::Json};
use uuid::Uuid;

use crate::{
    application::{
        dto::user_dto::NewUser, error::ApplicationError,
        repositories::user_repository::UserRepository,
    },
    domain::models::user::{AuthProvider, CartItem, User, UserRole},
};

#[derive(Debug, sqlx::FromRow)]
struct UserRow {
    id: Uuid,
    name: String,
    email: String,
    password_hash: Option<String>,
    google_id: Option<String>,
    profile_picture: String,
    auth_provider: String,
    cart_items: Json<Vec<CartItem>>,
    role: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<UserRow> for User {
    fn from(row: UserRow) -> Self {
        User {
            id: row.id,
            name: row.name,
            email: row.email,
            password_hash: row.password_hash,
            google_id: row.google_id,
            profile_picture: row.profile_picture,
            auth_provider: AuthProvider::from_str(&row.auth_provider),
            cart_items: row.cart_items.0,
            role: UserRole::from_str(&row.role),
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

pub struct PgUserRepository {
    pool: sqlx::PgPool,
}

impl PgUserRepository {
    pub fn new(pool: sqlx::PgPool) -> Self {
        Self { pool }
    }

    /// The unique index on email backstops the pre-insert existence check
    /// against concurrent signups.
    fn map_insert_error(e: sqlx::Error) -> ApplicationError {
        match &e {
            sqlx::Error::Database(db)
                if matches!(db.kind(), sqlx::error::ErrorKind::UniqueViolation) =>
            {
                ApplicationError::Conflict("User already exists".to_string())
            }
            _ => ApplicationError::DatabaseError(e.to_string()),
        }
    }
}

#[async_trait]
impl UserRepository for PgUserRepository {
    async fn create_user(&self, user: NewUser) -> Result<User, ApplicationError> {
        let query = r#"
            INSERT INTO application.users
                (name, email, password_hash, google_id, profile_picture, auth_provider)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING *
        "#;
        let created: UserRow = query_as::<_, UserRow>(query)
            .bind(&user.name)
            .bind(&user.email)
            .bind(&user.password_hash)
            .bind(&user.google_id)
            .bind(&user.profile_picture)
            .bind(user.auth_provider.as_str())
            .fetch_one(&self.pool)
            .await
            .map_err(Self::map_insert_error)?;
        Ok(created.into())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, ApplicationError> {
        let query = "SELECT * FROM application.users WHERE id = $1";
        let row: Option<UserRow> = query_as::<_, UserRow>(query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| ApplicationError::DatabaseError(e.to_string()))?;
        Ok(row.map(Into::into))
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, ApplicationError> {
        let query = "SELECT * FROM application.users WHERE email = $1";
        let row: Option<UserRow> = query_as::<_, UserRow>(query)
            .bind(email)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| ApplicationError::DatabaseError(e.to_string()))?;
        Ok(row.map(Into::into))
    }

    async fn find_by_google_id(&self, google_id: &str) -> Result<Option<User>, ApplicationError> {
        let query = "SELECT * FROM application.users WHERE google_id = $1";
        let row: Option<UserRow> = query_as::<_, UserRow>(query)
            .bind(google_id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| ApplicationError::DatabaseError(e.to_string()))?;
        Ok(row.map(Into::into))
    }

    async fn link_google_account(
        &self,
        id: Uuid,
        google_id: &str,
        profile_picture: &str,
    ) -> Result<User, ApplicationError> {
        let query = r#"
            UPDATE application.users
            SET google_id = $2,
                auth_provider = 'google',
                profile_picture = CASE
                    WHEN profile_picture = '' THEN $3
                    ELSE profile_picture
                END,
                updated_at = now()
            WHERE id = $1
            RETURNING *
        "#;
        let updated: UserRow = query_as::<_, UserRow>(query)
            .bind(id)
            .bind(google_id)
            .bind(profile_picture)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| ApplicationError::DatabaseError(e.to_string()))?;
        Ok(updated.into())
    }

    async fn save_cart(&self, id: Uuid, items: &[CartItem]) -> Result<User, ApplicationError> {
        let query = r#"
            UPDATE application.users
            SET cart_items = $2, updated_at = now()
            WHERE id = $1
            RETURNING *
        "#;
        let updated: UserRow = query_as::<_, UserRow>(query)
            .bind(id)
            .bind(Json(items))
            .fetch_one(&self.pool)
            .await
            .map_err(|e| ApplicationError::DatabaseError(e.to_string()))?;
        Ok(updated.into())
    }
}
