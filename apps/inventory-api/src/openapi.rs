//! OpenAPI documentation configuration

use utoipa::OpenApi;

/// Combined OpenAPI documentation for all APIs
///
/// The domain docs carry their full route paths, so they are nested at the
/// root rather than under a prefix.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Inventory API",
        version = "0.1.0",
        description = "MongoDB-based REST API for managing product inventory",
        license(name = "MIT")
    ),
    servers(
        (url = "http://localhost:8080", description = "Local development server")
    ),
    nest(
        (path = "", api = domain_users::ApiDoc),
        (path = "", api = domain_catalog::ApiDoc)
    ),
    tags(
        (name = "Auth", description = "Login and token issuing"),
        (name = "Categories", description = "Product category management"),
        (name = "Products", description = "Product management"),
        (name = "Export", description = "Bulk inventory export")
    )
)]
pub struct ApiDoc;
