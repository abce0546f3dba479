use reqwest::Client;
use serde::Deserialize;
use url::form_urlencoded;

use crate::{domain::config::secrets::GoogleOAuthSecrets, services::error::OAuthError};

const GOOGLE_AUTH_URL: &str = "https://accounts.google.com/o/oauth2/v2/auth";
const GOOGLE_TOKEN_URL: &str = "https://oauth2.googleapis.com/token";
const GOOGLE_USERINFO_URL: &str = "https://www.googleapis.com/oauth2/v3/userinfo";

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
}

#[derive(Debug, Deserialize)]
pub struct GoogleUserInfo {
    /// Google's stable account id.
    pub sub: String,
    pub email: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub picture: String,
}

/// Authorization-code flow against Google's OpenID endpoints.
pub struct GoogleOAuthService {
    client: Client,
    secrets: GoogleOAuthSecrets,
}

impl GoogleOAuthService {
    pub fn new(secrets: GoogleOAuthSecrets) -> Self {
        Self {
            client: Client::new(),
            secrets,
        }
    }

    /// Consent-screen URL the browser is redirected to. `state` is echoed back
    /// on the callback and checked against the caller's state cookie.
    pub fn authorize_url(&self, state: &str) -> String {
        let query = form_urlencoded::Serializer::new(String::new())
            .append_pair("client_id", &self.secrets.client_id)
            .append_pair("redirect_uri", &self.secrets.redirect_uri)
            .append_pair("response_type", "code")
            .append_pair("scope", "openid email profile")
            .append_pair("state", state)
            .finish();
        format!("{}?{}", GOOGLE_AUTH_URL, query)
    }

    /// Exchanges the authorization code and fetches the user's profile.
    pub async fn exchange_code(&self, code: &str) -> Result<GoogleUserInfo, OAuthError> {
        let response = self
            .client
            .post(GOOGLE_TOKEN_URL)
            .form(&[
                ("code", code),
                ("client_id", self.secrets.client_id.as_str()),
                ("client_secret", self.secrets.client_secret.as_str()),
                ("redirect_uri", self.secrets.redirect_uri.as_str()),
                ("grant_type", "authorization_code"),
            ])
            .send()
            .await?;

        if !response.status().is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(OAuthError::Provider(format!(
                "Code exchange failed: {}",
                error_text
            )));
        }

        let token: TokenResponse = response
            .json()
            .await
            .map_err(|e| OAuthError::Provider(format!("Malformed token response: {}", e)))?;

        let response = self
            .client
            .get(GOOGLE_USERINFO_URL)
            .bearer_auth(&token.access_token)
            .send()
            .await?;

        if !response.status().is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(OAuthError::Provider(format!(
                "Userinfo fetch failed: {}",
                error_text
            )));
        }

        response
            .json()
            .await
            .map_err(|e| OAuthError::Provider(format!("Malformed userinfo response: {}", e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn authorize_url_carries_client_and_state() {
        let svc = GoogleOAuthService::new(GoogleOAuthSecrets {
            client_id: "client-123".to_string(),
            client_secret: "secret".to_string(),
            redirect_uri: "http://localhost:8080/api/auth/google/callback".to_string(),
        });

        let url = svc.authorize_url("nonce-42");
        assert!(url.starts_with(GOOGLE_AUTH_URL));
        assert!(url.contains("client_id=client-123"));
        assert!(url.contains("state=nonce-42"));
        assert!(url.contains("response_type=code"));
        // The redirect URI must be percent-encoded.
        assert!(url.contains("redirect_uri=http%3A%2F%2Flocalhost%3A8080"));
    }
}
