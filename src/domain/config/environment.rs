use serde::Serialize;

/// Deployment environment switch. Controls the `Secure` flag on session
/// cookies and nothing else.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Environment {
    #[serde(rename = "development")]
    Development,
    #[serde(rename = "production")]
    Production,
}

impl Environment {
    /// Reads `ENVIRONMENT`; anything other than "production" is development.
    pub fn from_env() -> Self {
        match std::env::var("ENVIRONMENT") {
            Ok(value) if value.eq_ignore_ascii_case("production") => Environment::Production,
            _ => Environment::Development,
        }
    }

    pub fn is_production(&self) -> bool {
        matches!(self, Environment::Production)
    }
}
