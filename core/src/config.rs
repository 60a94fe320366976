//! Configuration providers supplying the auth token.
//!
//! The executor reads the token through `ConfigProvider` on every request
//! build, so a provider that rotates its token is picked up on the next call.

use std::fmt;
use std::sync::Arc;

use secrecy::{ExposeSecret, SecretString};

use crate::error::ConfigError;

/// Environment variable read by `ApiConfig::from_env`.
pub const API_TOKEN_ENV: &str = "TYPED_FETCH_API_TOKEN";

/// Source of the value sent in the `Authorization` header.
pub trait ConfigProvider: Send + Sync {
    fn api_token(&self) -> String;
}

impl<C: ConfigProvider + ?Sized> ConfigProvider for Arc<C> {
    fn api_token(&self) -> String {
        (**self).api_token()
    }
}

impl<C: ConfigProvider + ?Sized> ConfigProvider for &C {
    fn api_token(&self) -> String {
        (**self).api_token()
    }
}

/// Static token configuration.
pub struct ApiConfig {
    api_token: SecretString,
}

impl ApiConfig {
    pub fn new(api_token: impl Into<String>) -> Self {
        Self {
            api_token: SecretString::from(api_token.into()),
        }
    }

    /// Load the token from `TYPED_FETCH_API_TOKEN`.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_env_var(API_TOKEN_ENV)
    }

    pub fn from_env_var(var: &str) -> Result<Self, ConfigError> {
        match std::env::var(var) {
            Ok(token) => Ok(Self::new(token)),
            Err(std::env::VarError::NotPresent) => Err(ConfigError::MissingToken {
                var: var.to_string(),
            }),
            Err(std::env::VarError::NotUnicode(_)) => Err(ConfigError::InvalidToken {
                var: var.to_string(),
            }),
        }
    }
}

impl ConfigProvider for ApiConfig {
    fn api_token(&self) -> String {
        self.api_token.expose_secret().to_string()
    }
}

impl fmt::Debug for ApiConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ApiConfig")
            .field("api_token", &"[REDACTED]")
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn token_is_exposed_through_provider() {
        let config = ApiConfig::new("secret-token");
        assert_eq!(config.api_token(), "secret-token");
    }

    #[test]
    fn debug_output_redacts_token() {
        let config = ApiConfig::new("secret-token");
        let rendered = format!("{config:?}");
        assert!(!rendered.contains("secret-token"));
        assert!(rendered.contains("REDACTED"));
    }

    #[test]
    fn shared_config_is_a_provider() {
        let config = Arc::new(ApiConfig::new("shared"));
        assert_eq!(config.api_token(), "shared");
        assert_eq!((&*config).api_token(), "shared");
    }

    #[test]
    fn missing_env_var_is_reported_by_name() {
        let err = ApiConfig::from_env_var("TYPED_FETCH_TEST_UNSET_VARIABLE").unwrap_err();
        assert!(matches!(
            err,
            ConfigError::MissingToken { ref var } if var == "TYPED_FETCH_TEST_UNSET_VARIABLE"
        ));
    }
}
