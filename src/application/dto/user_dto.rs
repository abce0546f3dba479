use crate::domain::models::user::AuthProvider;

/// Everything the credential store needs to persist a new user.
/// The password arrives here already hashed; hashing is an explicit step in
/// the signup path, not a store-side hook.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub name: String,
    pub email: String,
    pub password_hash: Option<String>,
    pub google_id: Option<String>,
    pub profile_picture: String,
    pub auth_provider: AuthProvider,
}

impl NewUser {
    pub fn local(name: String, email: String, password_hash: String) -> Self {
        Self {
            name,
            email,
            password_hash: Some(password_hash),
            google_id: None,
            profile_picture: String::new(),
            auth_provider: AuthProvider::Local,
        }
    }

    pub fn federated(name: String, email: String, google_id: String, picture: String) -> Self {
        Self {
            name,
            email,
            password_hash: None,
            google_id: Some(google_id),
            profile_picture: picture,
            auth_provider: AuthProvider::Google,
        }
    }
}
