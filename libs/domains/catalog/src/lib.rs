//! Catalog Domain
//!
//! This module provides the product catalog: categories, products and bulk
//! export, backed by MongoDB.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐
//! │  Handlers   │  ← HTTP endpoints
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │   Service   │  ← Business logic, validation, category resolution
//! └──────┬──────┘
//!        │
//! ┌──────▼──────────────┐
//! │ Repositories        │  ← Data access (traits + MongoDB implementations)
//! │ categories products │
//! └──────┬──────────────┘
//!        │
//! ┌──────▼──────┐
//! │   Models    │  ← Entities, DTOs, export records
//! └─────────────┘
//! ```
//!
//! # Usage
//!
//! ```rust,no_run
//! use domain_catalog::{
//!     handlers,
//!     mongodb::{MongoCategoryRepository, MongoProductRepository},
//!     service::CatalogService,
//! };
//! use mongodb::Client;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! // Create a MongoDB client
//! let client = Client::with_uri_str("mongodb://localhost:27017").await?;
//! let db = client.database("mydb");
//!
//! // Create the repositories and the service
//! let categories = MongoCategoryRepository::new(db.clone());
//! let products = MongoProductRepository::new(db);
//! let service = CatalogService::new(categories, products);
//!
//! // Create Axum router
//! let router = handlers::router(service);
//! # Ok(())
//! # }
//! ```

pub mod error;
pub mod export;
pub mod handlers;
pub mod models;
pub mod mongodb;
pub mod repository;
pub mod service;

// Re-export commonly used types
pub use error::{CatalogError, CatalogResult};
pub use export::{ExportedProduct, ProductExportRecord};
pub use handlers::ApiDoc;
pub use models::{
    Category, CategoryFilter, CategoryResponse, CreateCategory, MessageResponse, Product,
    ProductFilter, ProductInput, ProductQuery, ProductResponse,
};
pub use self::mongodb::{MongoCategoryRepository, MongoProductRepository};
pub use repository::{CategoryRepository, ProductRepository};
pub use service::CatalogService;
