use super::config::JwtConfig;
use crate::errors::{ErrorCode, ErrorResponse};
use axum::{
    Json,
    http::{HeaderValue, StatusCode, header},
    response::{IntoResponse, Response},
};
use chrono::{Duration, Utc};
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};

/// Claims carried in an access token.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Subject: the authenticated user's email
    pub sub: String,
    /// Expiration time (unix timestamp, seconds)
    pub exp: i64,
    /// Issued at (unix timestamp, seconds)
    pub iat: i64,
}

/// Authentication failures, each mapping to an HTTP response.
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    #[error("Not authenticated")]
    MissingToken,

    #[error("Token has expired")]
    ExpiredToken,

    #[error("Could not validate credentials")]
    InvalidToken,

    #[error("Could not create token")]
    TokenCreation,
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        let (status, code) = match self {
            AuthError::TokenCreation => {
                (StatusCode::INTERNAL_SERVER_ERROR, ErrorCode::InternalError)
            }
            _ => (StatusCode::UNAUTHORIZED, ErrorCode::Unauthorized),
        };

        let body = Json(ErrorResponse {
            code: code.code(),
            error: code.as_str().to_string(),
            message: self.to_string(),
            details: None,
        });

        let mut response = (status, body).into_response();
        if status == StatusCode::UNAUTHORIZED {
            // Bearer challenge expected by OAuth2-style clients
            response
                .headers_mut()
                .insert(header::WWW_AUTHENTICATE, HeaderValue::from_static("Bearer"));
        }
        response
    }
}

/// Stateless JWT authentication.
///
/// Signs and verifies HS256 access tokens. Tokens carry only the subject
/// and timestamps; nothing is stored server-side, so issued tokens remain
/// valid until they expire.
#[derive(Clone)]
pub struct JwtAuth {
    secret: String,
    expire_minutes: i64,
}

impl JwtAuth {
    /// Create an auth instance from config.
    ///
    /// # Example
    /// ```ignore
    /// use axum_helpers::auth::{JwtAuth, JwtConfig};
    /// use core_config::FromEnv;
    ///
    /// let config = JwtConfig::from_env()?;
    /// let auth = JwtAuth::new(&config);
    /// ```
    pub fn new(config: &JwtConfig) -> Self {
        Self {
            secret: config.secret.clone(),
            expire_minutes: config.expire_minutes,
        }
    }

    /// Create a signed access token for the given subject.
    pub fn create_token(&self, subject: &str) -> Result<String, AuthError> {
        let now = Utc::now();
        let claims = Claims {
            sub: subject.to_string(),
            exp: (now + Duration::minutes(self.expire_minutes)).timestamp(),
            iat: now.timestamp(),
        };

        let header = Header {
            alg: jsonwebtoken::Algorithm::HS256,
            ..Default::default()
        };

        encode(
            &header,
            &claims,
            &EncodingKey::from_secret(self.secret.as_bytes()),
        )
        .map_err(|e| {
            tracing::error!("Failed to sign access token: {}", e);
            AuthError::TokenCreation
        })
    }

    /// Verify a token's signature and expiry, returning its claims.
    ///
    /// Distinguishes expiry from every other failure so clients can tell
    /// "log in again" apart from "this token was never valid".
    pub fn verify_token(&self, token: &str) -> Result<Claims, AuthError> {
        decode::<Claims>(
            token,
            &DecodingKey::from_secret(self.secret.as_bytes()),
            &Validation::default(),
        )
        .map(|data| data.claims)
        .map_err(|e| match e.kind() {
            jsonwebtoken::errors::ErrorKind::ExpiredSignature => AuthError::ExpiredToken,
            _ => AuthError::InvalidToken,
        })
    }
}
