//! JWT configuration.
//!
//! Implements the `FromEnv` trait from `core_config`, following the same
//! pattern as `MongoConfig` and `ServerConfig`.

use core_config::{ConfigError, FromEnv, env_or_default, env_required};

/// JWT authentication configuration.
///
/// Loaded from environment variables:
/// - `JWT_SECRET` (required) - Must be at least 32 characters for security
/// - `ACCESS_TOKEN_EXPIRE_MINUTES` (optional, default: 30)
///
/// # Example
///
/// ```ignore
/// use axum_helpers::JwtConfig;
/// use core_config::FromEnv;
///
/// // From environment variables
/// let config = JwtConfig::from_env()?;
///
/// // Manual construction (for testing)
/// let config = JwtConfig::new("my-super-secret-key-that-is-at-least-32-chars");
/// ```
#[derive(Clone, Debug)]
pub struct JwtConfig {
    /// JWT signing secret (minimum 32 characters)
    pub secret: String,

    /// Access token lifetime in minutes
    pub expire_minutes: i64,
}

impl JwtConfig {
    /// Create a new JwtConfig with the given secret and the default
    /// 30 minute token lifetime.
    ///
    /// # Panics
    /// Panics if the secret is less than 32 characters.
    pub fn new(secret: impl Into<String>) -> Self {
        let secret = secret.into();
        assert!(
            secret.len() >= 32,
            "JWT secret must be at least 32 characters"
        );
        Self {
            secret,
            expire_minutes: 30,
        }
    }

    /// Set the access token lifetime.
    pub fn with_expire_minutes(mut self, minutes: i64) -> Self {
        self.expire_minutes = minutes;
        self
    }
}

impl FromEnv for JwtConfig {
    fn from_env() -> Result<Self, ConfigError> {
        let secret = env_required("JWT_SECRET")?;

        if secret.len() < 32 {
            return Err(ConfigError::ParseError {
                key: "JWT_SECRET".to_string(),
                details: format!(
                    "must be at least 32 characters for security (got {}). Generate one with: openssl rand -base64 32",
                    secret.len()
                ),
            });
        }

        let expire_minutes = env_or_default("ACCESS_TOKEN_EXPIRE_MINUTES", "30")
            .parse()
            .map_err(|e| ConfigError::ParseError {
                key: "ACCESS_TOKEN_EXPIRE_MINUTES".to_string(),
                details: format!("{}", e),
            })?;

        Ok(Self {
            secret,
            expire_minutes,
        })
    }
}
