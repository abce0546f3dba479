use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum UserRole {
    #[serde(rename = "customer")]
    Customer,
    #[serde(rename = "admin")]
    Admin,
}

impl UserRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            UserRole::Customer => "customer",
            UserRole::Admin => "admin",
        }
    }

    pub fn from_str(value: &str) -> Self {
        match value {
            "admin" => UserRole::Admin,
            _ => UserRole::Customer,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AuthProvider {
    #[serde(rename = "local")]
    Local,
    #[serde(rename = "google")]
    Google,
}

impl AuthProvider {
    pub fn as_str(&self) -> &'static str {
        match self {
            AuthProvider::Local => "local",
            AuthProvider::Google => "google",
        }
    }

    pub fn from_str(value: &str) -> Self {
        match value {
            "google" => AuthProvider::Google,
            _ => AuthProvider::Local,
        }
    }
}

/// One entry of the cart embedded in the user record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartItem {
    pub product: Uuid,
    pub quantity: i32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    #[serde(rename = "_id")]
    pub id: Uuid,
    pub name: String,
    pub email: String,
    /// Absent for federated identities. Never serialized to the wire.
    #[serde(skip_serializing, default)]
    pub password_hash: Option<String>,
    #[serde(rename = "googleId")]
    pub google_id: Option<String>,
    #[serde(rename = "profilePicture")]
    pub profile_picture: String,
    #[serde(rename = "authProvider")]
    pub auth_provider: AuthProvider,
    #[serde(rename = "cartItems")]
    pub cart_items: Vec<CartItem>,
    pub role: UserRole,
    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,
    #[serde(rename = "updatedAt")]
    pub updated_at: DateTime<Utc>,
}

impl User {
    pub fn is_admin(&self) -> bool {
        self.role == UserRole::Admin
    }
}
