use database::DocumentId;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

/// User account - stored in the `users` collection.
///
/// The entity serializes in full (the hash included) because serde is the
/// storage codec here; only [`UserResponse`] ever crosses the HTTP surface.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    /// Unique identifier (stored as _id in MongoDB)
    #[serde(rename = "_id", alias = "id")]
    pub id: DocumentId,
    /// Login email (unique)
    pub email: String,
    /// Argon2 hash in PHC string format
    pub password_hash: String,
    /// Deactivated accounts fail login but keep their record
    pub is_active: bool,
}

/// User response DTO (string id, no password hash)
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct UserResponse {
    pub id: String,
    pub email: String,
    pub is_active: bool,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id.to_hex(),
            email: user.email,
            is_active: user.is_active,
        }
    }
}

/// DTO for provisioning a new user (admin CLI, not exposed over HTTP)
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateUser {
    #[validate(email, length(max = 255))]
    pub email: String,
    #[validate(length(min = 8, max = 128))]
    pub password: String,
    #[serde(default = "default_active")]
    pub is_active: bool,
}

fn default_active() -> bool {
    true
}

/// Login form body (OAuth2 password-flow field names; `username` is the email)
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct TokenRequest {
    pub username: String,
    pub password: String,
}

/// Successful login response
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct TokenResponse {
    pub access_token: String,
    pub token_type: String,
}

impl User {
    /// Create a new user (password must already be hashed by the service layer)
    pub fn new(email: String, password_hash: String, is_active: bool) -> Self {
        Self {
            id: DocumentId::new(),
            email,
            password_hash,
            is_active,
        }
    }
}
