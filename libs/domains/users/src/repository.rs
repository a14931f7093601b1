use async_trait::async_trait;

use crate::error::UserResult;
use crate::models::User;

/// Repository trait for user persistence
///
/// Accounts are provisioned and maintained by email, never by id: the id
/// exists only as the storage key.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Look up a user by email
    async fn find_by_email(&self, email: &str) -> UserResult<Option<User>>;

    /// Insert a new user
    async fn insert(&self, user: User) -> UserResult<User>;

    /// Replace the stored password hash for an existing user
    async fn update_password(&self, email: &str, password_hash: &str) -> UserResult<()>;

    /// Activate or deactivate an account
    async fn set_active(&self, email: &str, active: bool) -> UserResult<()>;

    /// List all users, oldest first
    async fn list(&self) -> UserResult<Vec<User>>;

    /// Create the unique email index
    async fn init_indexes(&self) -> UserResult<()>;
}
