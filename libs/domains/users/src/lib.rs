//! Users Domain
//!
//! Identity store and credential verification for the inventory service,
//! backed by MongoDB.
//!
//! Accounts are provisioned out of band (by the admin CLI); the only HTTP
//! surface this domain exposes is the login route, which exchanges form
//! credentials for a bearer token.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐
//! │  Handlers   │  ← POST /token
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │   Service   │  ← Argon2 hashing, credential checks
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │ Repository  │  ← Data access (trait + MongoDB implementation)
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │   Models    │  ← User entity, DTOs
//! └─────────────┘
//! ```
//!
//! # Usage
//!
//! ```rust,no_run
//! use axum_helpers::{JwtAuth, JwtConfig};
//! use domain_users::{handlers, mongodb::MongoUserRepository, service::UserService};
//! use mongodb::Client;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let client = Client::with_uri_str("mongodb://localhost:27017").await?;
//! let db = client.database("inventory");
//!
//! let repository = MongoUserRepository::new(db);
//! let service = UserService::new(repository);
//! let jwt = JwtAuth::new(&JwtConfig::new("a-signing-secret-of-at-least-32-chars"));
//!
//! let router = handlers::router(service, jwt);
//! # Ok(())
//! # }
//! ```

pub mod error;
pub mod handlers;
pub mod models;
pub mod mongodb;
pub mod repository;
pub mod service;

// Re-export commonly used types
pub use error::{UserError, UserResult};
pub use handlers::ApiDoc;
pub use models::{CreateUser, TokenRequest, TokenResponse, User, UserResponse};
pub use repository::UserRepository;
pub use self::mongodb::MongoUserRepository;
pub use service::UserService;
