//! User service - credential verification and account provisioning

use argon2::{
    Argon2,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng},
};
use std::sync::Arc;
use tracing::instrument;
use validator::Validate;

use crate::error::{UserError, UserResult};
use crate::models::{CreateUser, User, UserResponse};
use crate::repository::UserRepository;

/// User service providing login checks and account management
pub struct UserService<R: UserRepository> {
    repository: Arc<R>,
}

impl<R: UserRepository> UserService<R> {
    /// Create a new UserService with the given repository
    pub fn new(repository: R) -> Self {
        Self {
            repository: Arc::new(repository),
        }
    }

    /// Provision a new user with a freshly hashed password
    #[instrument(skip(self, input), fields(email = %input.email))]
    pub async fn create_user(&self, input: CreateUser) -> UserResult<UserResponse> {
        input
            .validate()
            .map_err(|e| UserError::Validation(e.to_string()))?;

        let password_hash = hash_password(&input.password)?;
        let user = User::new(input.email, password_hash, input.is_active);

        let created = self.repository.insert(user).await?;
        Ok(created.into())
    }

    /// Check a login attempt against the stored hash
    ///
    /// Unknown email, deactivated account and wrong password all collapse
    /// into `InvalidCredentials` so responses do not reveal which emails
    /// have accounts.
    #[instrument(skip(self, password))]
    pub async fn verify_credentials(&self, email: &str, password: &str) -> UserResult<User> {
        let user = self
            .repository
            .find_by_email(email)
            .await?
            .ok_or(UserError::InvalidCredentials)?;

        if !user.is_active {
            return Err(UserError::InvalidCredentials);
        }

        if !verify_password(password, &user.password_hash)? {
            return Err(UserError::InvalidCredentials);
        }

        Ok(user)
    }

    /// Replace a user's password
    #[instrument(skip(self, password))]
    pub async fn set_password(&self, email: &str, password: &str) -> UserResult<()> {
        let password_hash = hash_password(password)?;
        self.repository.update_password(email, &password_hash).await
    }

    /// Activate or deactivate an account
    #[instrument(skip(self))]
    pub async fn set_active(&self, email: &str, active: bool) -> UserResult<()> {
        self.repository.set_active(email, active).await
    }

    /// List provisioned users (responses never carry hashes)
    #[instrument(skip(self))]
    pub async fn list_users(&self) -> UserResult<Vec<UserResponse>> {
        let users = self.repository.list().await?;
        Ok(users.into_iter().map(UserResponse::from).collect())
    }

    /// Create the indexes this domain relies on
    pub async fn init_indexes(&self) -> UserResult<()> {
        self.repository.init_indexes().await
    }
}

impl<R: UserRepository> Clone for UserService<R> {
    fn clone(&self) -> Self {
        Self {
            repository: Arc::clone(&self.repository),
        }
    }
}

// Password helpers

fn hash_password(password: &str) -> UserResult<String> {
    let salt = SaltString::generate(&mut OsRng);

    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| UserError::PasswordHash(e.to_string()))
}

fn verify_password(password: &str, hash: &str) -> UserResult<bool> {
    let parsed_hash = PasswordHash::new(hash).map_err(|e| UserError::PasswordHash(e.to_string()))?;

    Ok(Argon2::default()
        .verify_password(password.as_bytes(), &parsed_hash)
        .is_ok())
}
