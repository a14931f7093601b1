//! Authentication and authorization module.
//!
//! This module provides:
//! - Stateless JWT access token creation and verification
//! - Bearer authentication middleware for protected routes
//!
//! Tokens are self-contained: once issued they stay valid until expiry,
//! with no server-side session state to consult.
//!
//! # Example
//!
//! ```ignore
//! use axum_helpers::auth::{JwtAuth, JwtConfig, bearer_auth};
//! use core_config::FromEnv;
//!
//! // Load config and create the auth instance
//! let config = JwtConfig::from_env()?;
//! let auth = JwtAuth::new(&config);
//!
//! // Protect routes with the bearer middleware
//! let protected = Router::new()
//!     .route("/products/", get(handler))
//!     .layer(axum::middleware::from_fn_with_state(auth, bearer_auth));
//! ```

pub mod config;
pub mod jwt;
pub mod middleware;

// Re-export commonly used types
pub use config::JwtConfig;
pub use jwt::{AuthError, Claims, JwtAuth};
pub use middleware::bearer_auth;
