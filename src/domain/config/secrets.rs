#[derive(Debug, Clone)]
pub struct CloudinarySecrets {
    pub cloud_name: String,
    pub api_key: String,
    pub api_secret: String,
}

#[derive(Debug, Clone)]
pub struct GoogleOAuthSecrets {
    pub client_id: String,
    pub client_secret: String,
    pub redirect_uri: String,
}

#[derive(Debug, Clone)]
pub struct Secrets {
    pub access_token_secret: String,
    pub refresh_token_secret: String,
    pub cloudinary: CloudinarySecrets,
    pub google_oauth: GoogleOAuthSecrets,
}

impl Secrets {
    /// Loads all signing and provider secrets from the environment.
    /// Fails fast on anything missing, like the rest of startup.
    pub fn from_env() -> Self {
        Self {
            access_token_secret: require("ACCESS_TOKEN_SECRET"),
            refresh_token_secret: require("REFRESH_TOKEN_SECRET"),
            cloudinary: CloudinarySecrets {
                cloud_name: require("CLOUDINARY_CLOUD_NAME"),
                api_key: require("CLOUDINARY_API_KEY"),
                api_secret: require("CLOUDINARY_API_SECRET"),
            },
            google_oauth: GoogleOAuthSecrets {
                client_id: require("GOOGLE_CLIENT_ID"),
                client_secret: require("GOOGLE_CLIENT_SECRET"),
                redirect_uri: require("GOOGLE_REDIRECT_URI"),
            },
        }
    }
}

fn require(name: &str) -> String {
    std::env::var(name)
        .unwrap_or_else(|_| panic!("ERROR: {} environment variable must be set", name))
}
