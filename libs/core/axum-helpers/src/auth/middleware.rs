use super::jwt::{AuthError, JwtAuth};
use axum::{
    extract::{Request, State},
    http::HeaderMap,
    middleware::Next,
    response::Response,
};

/// Extract the bearer token from the Authorization header.
fn extract_bearer_token(headers: &HeaderMap) -> Option<String> {
    headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .and_then(|auth| auth.strip_prefix("Bearer ").map(|s| s.to_string()))
}

/// Bearer authentication middleware.
///
/// Requires a valid `Authorization: Bearer <token>` header. On success the
/// decoded [`Claims`](super::Claims) are inserted into request extensions
/// for handlers to read; on failure a 401 with a `WWW-Authenticate: Bearer`
/// challenge is returned.
///
/// # Example
///
/// ```ignore
/// use axum::Router;
/// use axum::routing::get;
/// use axum_helpers::auth::{JwtAuth, bearer_auth};
///
/// let protected_routes = Router::new()
///     .route("/products/", get(list_products))
///     .layer(axum::middleware::from_fn_with_state(
///         jwt_auth.clone(),
///         bearer_auth,
///     ));
/// ```
pub async fn bearer_auth(
    State(auth): State<JwtAuth>,
    headers: HeaderMap,
    mut request: Request,
    next: Next,
) -> Result<Response, AuthError> {
    let token = extract_bearer_token(&headers).ok_or_else(|| {
        tracing::debug!("No bearer token in Authorization header");
        AuthError::MissingToken
    })?;

    let claims = auth.verify_token(&token).inspect_err(|e| {
        tracing::debug!("Token verification failed: {}", e);
    })?;

    request.extensions_mut().insert(claims);
    Ok(next.run(request).await)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::{Claims, JwtConfig};
    use axum::{
        Extension, Router,
        body::Body,
        http::{Request as HttpRequest, StatusCode, header},
        middleware::from_fn_with_state,
        routing::get,
    };
    use tower::ServiceExt;

    const SECRET: &str = "test-secret-key-with-at-least-32-chars!";

    async fn whoami(Extension(claims): Extension<Claims>) -> String {
        claims.sub
    }

    fn protected_app() -> (JwtAuth, Router) {
        let auth = JwtAuth::new(&JwtConfig::new(SECRET));
        let app = Router::new()
            .route("/me", get(whoami))
            .layer(from_fn_with_state(auth.clone(), bearer_auth));
        (auth, app)
    }

    #[tokio::test]
    async fn test_missing_token_is_401_with_challenge() {
        let (_, app) = protected_app();
        let request = HttpRequest::builder()
            .uri("/me")
            .body(Body::empty())
            .unwrap();

        let response = app.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(
            response.headers().get(header::WWW_AUTHENTICATE).unwrap(),
            "Bearer"
        );
    }

    #[tokio::test]
    async fn test_bad_token_is_401() {
        let (_, app) = protected_app();
        let request = HttpRequest::builder()
            .uri("/me")
            .header("authorization", "Bearer nonsense")
            .body(Body::empty())
            .unwrap();

        let response = app.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_valid_token_reaches_handler_with_claims() {
        use http_body_util::BodyExt;

        let (auth, app) = protected_app();
        let token = auth.create_token("alice@example.com").unwrap();
        let request = HttpRequest::builder()
            .uri("/me")
            .header("authorization", format!("Bearer {}", token))
            .body(Body::empty())
            .unwrap();

        let response = app.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body = response.into_body().collect().await.unwrap().to_bytes();
        assert_eq!(&body[..], b"alice@example.com");
    }

    #[tokio::test]
    async fn test_token_without_bearer_prefix_is_rejected() {
        let (auth, app) = protected_app();
        let token = auth.create_token("alice@example.com").unwrap();
        let request = HttpRequest::builder()
            .uri("/me")
            .header("authorization", token)
            .body(Body::empty())
            .unwrap();

        let response = app.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }
}
