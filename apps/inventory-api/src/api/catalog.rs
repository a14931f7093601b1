//! Catalog API routes
//!
//! Integrates the catalog domain with MongoDB. Category, product, and export
//! routes all require a valid access token.

use axum::{Router, middleware};
use axum_helpers::{JwtAuth, bearer_auth};
use domain_catalog::{CatalogService, MongoCategoryRepository, MongoProductRepository, handlers};
use tracing::info;

use crate::state::AppState;

/// Create the catalog router with the bearer-token guard applied
pub fn router(state: &AppState, jwt: JwtAuth) -> Router {
    let categories = MongoCategoryRepository::new(state.db.clone());
    let products = MongoProductRepository::new(state.db.clone());
    let service = CatalogService::new(categories, products);

    handlers::router(service).layer(middleware::from_fn_with_state(jwt, bearer_auth))
}

/// Initialize catalog indexes in MongoDB
pub async fn init_indexes(db: &mongodb::Database) -> eyre::Result<()> {
    let categories = MongoCategoryRepository::new(db.clone());
    let products = MongoProductRepository::new(db.clone());
    CatalogService::new(categories, products)
        .init_indexes()
        .await
        .map_err(|e| eyre::eyre!("Failed to create catalog indexes: {}", e))?;
    info!("Catalog collection indexes created");
    Ok(())
}
