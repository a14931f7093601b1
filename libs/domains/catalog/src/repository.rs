use async_trait::async_trait;
use database::DocumentId;

use crate::error::CatalogResult;
use crate::export::ExportedProduct;
use crate::models::{Category, CategoryFilter, CreateCategory, Product, ProductInput, ProductQuery};

/// Repository trait for Category persistence
///
/// Categories are append-only: there are no update or delete operations.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CategoryRepository: Send + Sync {
    /// Create a new category
    async fn create(&self, input: CreateCategory) -> CatalogResult<Category>;

    /// Get a category by ID
    async fn get_by_id(&self, id: DocumentId) -> CatalogResult<Option<Category>>;

    /// List categories in insertion order
    async fn list(&self, filter: CategoryFilter) -> CatalogResult<Vec<Category>>;

    /// Check whether a category with this ID exists
    async fn exists(&self, id: DocumentId) -> CatalogResult<bool>;

    /// Create the indexes this repository relies on
    async fn init_indexes(&self) -> CatalogResult<()>;
}

/// Repository trait for Product persistence
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ProductRepository: Send + Sync {
    /// Create a new product under an already-resolved category
    async fn create(&self, input: ProductInput, category_id: DocumentId) -> CatalogResult<Product>;

    /// Get a product by ID
    async fn get_by_id(&self, id: DocumentId) -> CatalogResult<Option<Product>>;

    /// List products matching a query, in insertion order
    async fn list(&self, query: ProductQuery) -> CatalogResult<Vec<Product>>;

    /// Replace an existing product, keeping its creation timestamp
    async fn replace(
        &self,
        id: DocumentId,
        input: ProductInput,
        category_id: DocumentId,
    ) -> CatalogResult<Product>;

    /// Delete a product by ID
    async fn delete(&self, id: DocumentId) -> CatalogResult<()>;

    /// Read the whole collection for export, in insertion order
    async fn export_all(&self) -> CatalogResult<Vec<ExportedProduct>>;

    /// Create the indexes this repository relies on
    async fn init_indexes(&self) -> CatalogResult<()>;
}
