//! Auth API routes
//!
//! Exposes the login route backed by the MongoDB user store. Accounts are
//! provisioned by the admin CLI, not over HTTP.

use axum::Router;
use axum_helpers::JwtAuth;
use domain_users::{MongoUserRepository, UserService, handlers};
use tracing::info;

use crate::state::AppState;

/// Create the auth router
pub fn router(state: &AppState, jwt: JwtAuth) -> Router {
    let repository = MongoUserRepository::new(state.db.clone());
    let service = UserService::new(repository);

    handlers::router(service, jwt)
}

/// Initialize user indexes in MongoDB
pub async fn init_indexes(db: &mongodb::Database) -> eyre::Result<()> {
    let repository = MongoUserRepository::new(db.clone());
    UserService::new(repository)
        .init_indexes()
        .await
        .map_err(|e| eyre::eyre!("Failed to create user indexes: {}", e))?;
    info!("User collection indexes created");
    Ok(())
}
