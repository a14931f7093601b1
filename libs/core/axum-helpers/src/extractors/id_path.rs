//! Document id path parameter extractor with automatic validation.

use crate::errors::AppError;
use axum::{
    extract::{FromRequestParts, Path},
    http::request::Parts,
    response::{IntoResponse, Response},
};
use database::DocumentId;

/// Extractor for document id path parameters.
///
/// Parses the path segment as a [`DocumentId`], returning a 400 response
/// with the standard error body when the segment is not a valid id.
/// A well-formed id that matches no record is the handler's concern (404),
/// not the extractor's.
///
/// # Example
/// ```ignore
/// use axum::Router;
/// use axum::routing::get;
/// use axum_helpers::extractors::IdPath;
///
/// async fn get_product(IdPath(id): IdPath) -> String {
///     format!("Product ID: {}", id)
/// }
///
/// let app = Router::new().route("/products/{id}", get(get_product));
/// ```
pub struct IdPath(pub DocumentId);

impl<S> FromRequestParts<S> for IdPath
where
    S: Send + Sync,
{
    type Rejection = Response;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(raw) = Path::<String>::from_request_parts(parts, state)
            .await
            .map_err(|e| e.into_response())?;

        match raw.parse::<DocumentId>() {
            Ok(id) => Ok(IdPath(id)),
            Err(e) => Err(AppError::from(e).into_response()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{Router, body::Body, http::Request, http::StatusCode, routing::get};
    use tower::ServiceExt;

    async fn echo_id(IdPath(id): IdPath) -> String {
        id.to_hex()
    }

    fn app() -> Router {
        Router::new().route("/items/{id}", get(echo_id))
    }

    #[tokio::test]
    async fn test_valid_id_reaches_handler() {
        let id = DocumentId::new();
        let request = Request::builder()
            .uri(format!("/items/{}", id))
            .body(Body::empty())
            .unwrap();

        let response = app().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_malformed_id_is_rejected_with_400() {
        let request = Request::builder()
            .uri("/items/not-an-id")
            .body(Body::empty())
            .unwrap();

        let response = app().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}
