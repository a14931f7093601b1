use axum::{Form, Json, Router, extract::State, routing::post};
use axum_helpers::JwtAuth;
use axum_helpers::errors::responses::{InternalServerErrorResponse, UnauthorizedResponse};
use utoipa::OpenApi;

use crate::error::{UserError, UserResult};
use crate::models::{TokenRequest, TokenResponse};
use crate::repository::UserRepository;
use crate::service::UserService;

/// OpenAPI documentation for the auth API
#[derive(OpenApi)]
#[openapi(
    paths(login),
    components(
        schemas(TokenRequest, TokenResponse),
        responses(UnauthorizedResponse, InternalServerErrorResponse)
    ),
    tags(
        (name = "Auth", description = "Login and token issuing")
    )
)]
pub struct ApiDoc;

/// Shared state for the auth routes
pub struct AuthState<R: UserRepository> {
    service: UserService<R>,
    jwt: JwtAuth,
}

impl<R: UserRepository> Clone for AuthState<R> {
    fn clone(&self) -> Self {
        Self {
            service: self.service.clone(),
            jwt: self.jwt.clone(),
        }
    }
}

/// Create the auth router
pub fn router<R: UserRepository + 'static>(service: UserService<R>, jwt: JwtAuth) -> Router {
    Router::new()
        .route("/token", post(login))
        .with_state(AuthState { service, jwt })
}

/// Exchange form credentials for a bearer access token
#[utoipa::path(
    post,
    path = "/token",
    tag = "Auth",
    request_body(content = TokenRequest, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 200, description = "Token issued", body = TokenResponse),
        (status = 401, response = UnauthorizedResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn login<R: UserRepository>(
    State(state): State<AuthState<R>>,
    Form(input): Form<TokenRequest>,
) -> UserResult<Json<TokenResponse>> {
    let user = state
        .service
        .verify_credentials(&input.username, &input.password)
        .await?;

    let access_token = state
        .jwt
        .create_token(&user.email)
        .map_err(|e| UserError::TokenCreation(e.to_string()))?;

    Ok(Json(TokenResponse {
        access_token,
        token_type: "bearer".to_string(),
    }))
}
