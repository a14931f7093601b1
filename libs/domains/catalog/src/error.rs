use axum::response::{IntoResponse, Response};
use axum_helpers::{AppError, ErrorCode};
use database::DocumentId;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("Category not found: {0}")]
    CategoryNotFound(DocumentId),

    #[error("Product not found: {0}")]
    ProductNotFound(DocumentId),

    #[error("Category '{0}' already exists")]
    DuplicateCategoryName(String),

    #[error("Invalid category reference: {0}")]
    InvalidCategoryReference(String),

    #[error("Invalid input: {0}")]
    Validation(String),

    #[error("Export failed: {0}")]
    Export(String),

    #[error("Database error: {0}")]
    Database(String),
}

pub type CatalogResult<T> = Result<T, CatalogError>;

/// Convert CatalogError to AppError for standardized error responses.
///
/// Internal failures are logged here with their real cause; the response
/// body only ever carries a generic message.
impl From<CatalogError> for AppError {
    fn from(err: CatalogError) -> Self {
        match err {
            CatalogError::CategoryNotFound(_) => {
                AppError::NotFound("Category not found".to_string())
            }
            CatalogError::ProductNotFound(_) => AppError::NotFound("Product not found".to_string()),
            CatalogError::DuplicateCategoryName(name) => {
                AppError::Conflict(format!("Category '{}' already exists", name))
            }
            // Covers both a malformed id and a well-formed id that matches no
            // category; the client supplied a reference that cannot be used.
            CatalogError::InvalidCategoryReference(_) => {
                AppError::BadRequest("Invalid category ID".to_string())
            }
            CatalogError::Validation(msg) => AppError::BadRequest(msg),
            CatalogError::Export(msg) => {
                tracing::error!(
                    error_code = ErrorCode::InternalError.code(),
                    "Export failed: {}",
                    msg
                );
                AppError::InternalServerError("An internal error occurred".to_string())
            }
            CatalogError::Database(msg) => {
                tracing::error!(
                    error_code = ErrorCode::DatabaseError.code(),
                    "Database error: {}",
                    msg
                );
                AppError::InternalServerError("A database error occurred".to_string())
            }
        }
    }
}

impl IntoResponse for CatalogError {
    fn into_response(self) -> Response {
        // Convert to AppError for the standardized error response format
        let app_error: AppError = self.into();
        app_error.into_response()
    }
}

impl From<mongodb::error::Error> for CatalogError {
    fn from(err: mongodb::error::Error) -> Self {
        CatalogError::Database(err.to_string())
    }
}

impl From<csv::Error> for CatalogError {
    fn from(err: csv::Error) -> Self {
        CatalogError::Export(err.to_string())
    }
}
