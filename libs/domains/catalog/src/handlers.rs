use axum::{
    Json, Router,
    extract::{Query, State},
    http::{StatusCode, header},
    response::IntoResponse,
    routing::get,
};
use axum_helpers::{
    IdPath, ValidatedJson,
    errors::responses::{
        BadRequestIdResponse, BadRequestValidationResponse, ConflictResponse,
        InternalServerErrorResponse, NotFoundResponse,
    },
};
use std::sync::Arc;
use utoipa::OpenApi;

use crate::error::CatalogResult;
use crate::export::ProductExportRecord;
use crate::models::{
    CategoryFilter, CategoryResponse, CreateCategory, MessageResponse, ProductFilter,
    ProductInput, ProductResponse,
};
use crate::repository::{CategoryRepository, ProductRepository};
use crate::service::CatalogService;

/// OpenAPI documentation for the catalog API
#[derive(OpenApi)]
#[openapi(
    paths(
        list_categories,
        create_category,
        get_category,
        list_products,
        create_product,
        get_product,
        update_product,
        delete_product,
        export_products_json,
        export_products_csv,
    ),
    components(
        schemas(
            CategoryResponse,
            CreateCategory,
            ProductResponse,
            ProductInput,
            ProductExportRecord,
            MessageResponse,
            CategoryFilter,
            ProductFilter
        ),
        responses(
            NotFoundResponse,
            BadRequestValidationResponse,
            BadRequestIdResponse,
            ConflictResponse,
            InternalServerErrorResponse
        )
    ),
    tags(
        (name = "Categories", description = "Product category endpoints"),
        (name = "Products", description = "Product management endpoints"),
        (name = "Export", description = "Bulk product export endpoints")
    )
)]
pub struct ApiDoc;

/// Create the catalog router with all HTTP endpoints.
///
/// Collection routes answer both with and without the trailing slash; there
/// is no redirect between the two forms.
pub fn router<C, P>(service: CatalogService<C, P>) -> Router
where
    C: CategoryRepository + 'static,
    P: ProductRepository + 'static,
{
    let shared_service = Arc::new(service);

    Router::new()
        .route("/categories/", get(list_categories).post(create_category))
        .route("/categories", get(list_categories).post(create_category))
        .route("/categories/{id}", get(get_category))
        .route("/products/", get(list_products).post(create_product))
        .route("/products", get(list_products).post(create_product))
        .route(
            "/products/{id}",
            get(get_product).put(update_product).delete(delete_product),
        )
        .route("/export/products/json", get(export_products_json))
        .route("/export/products/csv", get(export_products_csv))
        .with_state(shared_service)
}

/// List categories
#[utoipa::path(
    get,
    path = "/categories/",
    tag = "Categories",
    params(CategoryFilter),
    responses(
        (status = 200, description = "List of categories", body = Vec<CategoryResponse>),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn list_categories<C: CategoryRepository, P: ProductRepository>(
    State(service): State<Arc<CatalogService<C, P>>>,
    Query(filter): Query<CategoryFilter>,
) -> CatalogResult<Json<Vec<CategoryResponse>>> {
    let categories = service.list_categories(filter).await?;
    Ok(Json(
        categories.into_iter().map(CategoryResponse::from).collect(),
    ))
}

/// Create a new category
#[utoipa::path(
    post,
    path = "/categories/",
    tag = "Categories",
    request_body = CreateCategory,
    responses(
        (status = 201, description = "Category created successfully", body = CategoryResponse),
        (status = 400, response = BadRequestValidationResponse),
        (status = 409, response = ConflictResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn create_category<C: CategoryRepository, P: ProductRepository>(
    State(service): State<Arc<CatalogService<C, P>>>,
    ValidatedJson(input): ValidatedJson<CreateCategory>,
) -> CatalogResult<impl IntoResponse> {
    let category = service.create_category(input).await?;
    Ok((StatusCode::CREATED, Json(CategoryResponse::from(category))))
}

/// Get a category by ID
#[utoipa::path(
    get,
    path = "/categories/{id}",
    tag = "Categories",
    params(
        ("id" = String, Path, description = "Category ID (24-character hex)")
    ),
    responses(
        (status = 200, description = "Category found", body = CategoryResponse),
        (status = 400, response = BadRequestIdResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn get_category<C: CategoryRepository, P: ProductRepository>(
    State(service): State<Arc<CatalogService<C, P>>>,
    IdPath(id): IdPath,
) -> CatalogResult<Json<CategoryResponse>> {
    let category = service.get_category(id).await?;
    Ok(Json(CategoryResponse::from(category)))
}

/// List products with optional filters
#[utoipa::path(
    get,
    path = "/products/",
    tag = "Products",
    params(ProductFilter),
    responses(
        (status = 200, description = "List of products", body = Vec<ProductResponse>),
        (status = 400, description = "Malformed category filter"),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn list_products<C: CategoryRepository, P: ProductRepository>(
    State(service): State<Arc<CatalogService<C, P>>>,
    Query(filter): Query<ProductFilter>,
) -> CatalogResult<Json<Vec<ProductResponse>>> {
    let products = service.list_products(filter).await?;
    Ok(Json(
        products.into_iter().map(ProductResponse::from).collect(),
    ))
}

/// Create a new product
#[utoipa::path(
    post,
    path = "/products/",
    tag = "Products",
    request_body = ProductInput,
    responses(
        (status = 201, description = "Product created successfully", body = ProductResponse),
        (status = 400, description = "Validation failed or invalid category reference"),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn create_product<C: CategoryRepository, P: ProductRepository>(
    State(service): State<Arc<CatalogService<C, P>>>,
    ValidatedJson(input): ValidatedJson<ProductInput>,
) -> CatalogResult<impl IntoResponse> {
    let product = service.create_product(input).await?;
    Ok((StatusCode::CREATED, Json(ProductResponse::from(product))))
}

/// Get a product by ID
#[utoipa::path(
    get,
    path = "/products/{id}",
    tag = "Products",
    params(
        ("id" = String, Path, description = "Product ID (24-character hex)")
    ),
    responses(
        (status = 200, description = "Product found", body = ProductResponse),
        (status = 400, response = BadRequestIdResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn get_product<C: CategoryRepository, P: ProductRepository>(
    State(service): State<Arc<CatalogService<C, P>>>,
    IdPath(id): IdPath,
) -> CatalogResult<Json<ProductResponse>> {
    let product = service.get_product(id).await?;
    Ok(Json(ProductResponse::from(product)))
}

/// Replace an existing product
#[utoipa::path(
    put,
    path = "/products/{id}",
    tag = "Products",
    params(
        ("id" = String, Path, description = "Product ID (24-character hex)")
    ),
    request_body = ProductInput,
    responses(
        (status = 200, description = "Product updated successfully", body = ProductResponse),
        (status = 400, description = "Validation failed or invalid category reference"),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn update_product<C: CategoryRepository, P: ProductRepository>(
    State(service): State<Arc<CatalogService<C, P>>>,
    IdPath(id): IdPath,
    ValidatedJson(input): ValidatedJson<ProductInput>,
) -> CatalogResult<Json<ProductResponse>> {
    let product = service.update_product(id, input).await?;
    Ok(Json(ProductResponse::from(product)))
}

/// Delete a product
#[utoipa::path(
    delete,
    path = "/products/{id}",
    tag = "Products",
    params(
        ("id" = String, Path, description = "Product ID (24-character hex)")
    ),
    responses(
        (status = 200, description = "Product deleted successfully", body = MessageResponse),
        (status = 400, response = BadRequestIdResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn delete_product<C: CategoryRepository, P: ProductRepository>(
    State(service): State<Arc<CatalogService<C, P>>>,
    IdPath(id): IdPath,
) -> CatalogResult<Json<MessageResponse>> {
    service.delete_product(id).await?;
    Ok(Json(MessageResponse {
        message: "Product deleted successfully".to_string(),
    }))
}

/// Export every product as JSON
#[utoipa::path(
    get,
    path = "/export/products/json",
    tag = "Export",
    responses(
        (status = 200, description = "All products", body = Vec<ProductExportRecord>),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn export_products_json<C: CategoryRepository, P: ProductRepository>(
    State(service): State<Arc<CatalogService<C, P>>>,
) -> CatalogResult<Json<Vec<ProductExportRecord>>> {
    let records = service.export_products_json().await?;
    Ok(Json(records))
}

/// Export every product as a CSV download
#[utoipa::path(
    get,
    path = "/export/products/csv",
    tag = "Export",
    responses(
        (status = 200, description = "CSV document with one row per product", content_type = "text/csv"),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn export_products_csv<C: CategoryRepository, P: ProductRepository>(
    State(service): State<Arc<CatalogService<C, P>>>,
) -> CatalogResult<impl IntoResponse> {
    let bytes = service.export_products_csv().await?;

    let headers = [
        (header::CONTENT_TYPE, "text/csv; charset=utf-8"),
        (
            header::CONTENT_DISPOSITION,
            "attachment; filename=\"products.csv\"",
        ),
    ];

    Ok((headers, bytes))
}
