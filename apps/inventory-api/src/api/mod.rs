//! API routes module
//!
//! Wires the domain routers to their MongoDB-backed services. Catalog routes
//! sit behind the bearer-token guard; login and health stay open.

pub mod catalog;
pub mod health;
pub mod users;

use axum::Router;
use axum_helpers::JwtAuth;

use crate::state::AppState;

/// Create all API routes
pub fn routes(state: &AppState) -> Router {
    let jwt = JwtAuth::new(&state.config.jwt);

    Router::new()
        .merge(users::router(state, jwt.clone()))
        .merge(catalog::router(state, jwt))
        .merge(health::router(state.clone()))
}
