use std::sync::Arc;

use database::DocumentId;
use validator::Validate;

use crate::error::{CatalogError, CatalogResult};
use crate::export::{self, ProductExportRecord};
use crate::models::{
    Category, CategoryFilter, CreateCategory, Product, ProductFilter, ProductInput, ProductQuery,
};
use crate::repository::{CategoryRepository, ProductRepository};

/// Business logic over the category and product repositories.
///
/// The service owns input validation and the translation of client-supplied
/// category references into resolved ids; repositories only ever see ids
/// that parsed.
pub struct CatalogService<C, P> {
    categories: Arc<C>,
    products: Arc<P>,
}

impl<C, P> Clone for CatalogService<C, P> {
    fn clone(&self) -> Self {
        Self {
            categories: Arc::clone(&self.categories),
            products: Arc::clone(&self.products),
        }
    }
}

impl<C: CategoryRepository, P: ProductRepository> CatalogService<C, P> {
    /// Create a new CatalogService over the given repositories
    pub fn new(categories: C, products: P) -> Self {
        Self {
            categories: Arc::new(categories),
            products: Arc::new(products),
        }
    }

    /// Create a new category
    pub async fn create_category(&self, input: CreateCategory) -> CatalogResult<Category> {
        input
            .validate()
            .map_err(|e| CatalogError::Validation(e.to_string()))?;

        self.categories.create(input).await
    }

    /// Get a category by ID
    pub async fn get_category(&self, id: DocumentId) -> CatalogResult<Category> {
        self.categories
            .get_by_id(id)
            .await?
            .ok_or(CatalogError::CategoryNotFound(id))
    }

    /// List categories in insertion order
    pub async fn list_categories(&self, filter: CategoryFilter) -> CatalogResult<Vec<Category>> {
        self.categories.list(filter).await
    }

    /// Create a new product under an existing category
    pub async fn create_product(&self, input: ProductInput) -> CatalogResult<Product> {
        input
            .validate()
            .map_err(|e| CatalogError::Validation(e.to_string()))?;

        let category_id = self.resolve_category(&input.category_id).await?;
        self.products.create(input, category_id).await
    }

    /// Get a product by ID
    pub async fn get_product(&self, id: DocumentId) -> CatalogResult<Product> {
        self.products
            .get_by_id(id)
            .await?
            .ok_or(CatalogError::ProductNotFound(id))
    }

    /// List products matching the filter, in insertion order
    pub async fn list_products(&self, filter: ProductFilter) -> CatalogResult<Vec<Product>> {
        // A malformed category filter is rejected outright; a well-formed id
        // that matches no category just yields an empty page.
        let category_id = match filter.category_id {
            Some(raw) => Some(
                raw.parse::<DocumentId>()
                    .map_err(|_| CatalogError::InvalidCategoryReference(raw))?,
            ),
            None => None,
        };

        let query = ProductQuery {
            category_id,
            name: filter.name,
            skip: filter.skip,
            limit: filter.limit,
        };

        self.products.list(query).await
    }

    /// Replace an existing product, keeping its creation timestamp
    pub async fn update_product(&self, id: DocumentId, input: ProductInput) -> CatalogResult<Product> {
        input
            .validate()
            .map_err(|e| CatalogError::Validation(e.to_string()))?;

        let category_id = self.resolve_category(&input.category_id).await?;
        self.products.replace(id, input, category_id).await
    }

    /// Delete a product by ID
    pub async fn delete_product(&self, id: DocumentId) -> CatalogResult<()> {
        self.products.delete(id).await
    }

    /// Export every product as JSON-ready records, in insertion order
    pub async fn export_products_json(&self) -> CatalogResult<Vec<ProductExportRecord>> {
        self.export_records().await
    }

    /// Export every product as a CSV document, in insertion order
    pub async fn export_products_csv(&self) -> CatalogResult<Vec<u8>> {
        let records = self.export_records().await?;
        export::records_to_csv(&records)
    }

    /// Create the indexes both repositories rely on
    pub async fn init_indexes(&self) -> CatalogResult<()> {
        self.categories.init_indexes().await?;
        self.products.init_indexes().await?;
        Ok(())
    }

    async fn export_records(&self) -> CatalogResult<Vec<ProductExportRecord>> {
        let products = self.products.export_all().await?;
        Ok(products.into_iter().map(ProductExportRecord::from).collect())
    }

    /// Parse and verify a category reference from client input.
    ///
    /// Categories are append-only, so a reference that resolves here stays
    /// valid for the life of the product.
    async fn resolve_category(&self, raw: &str) -> CatalogResult<DocumentId> {
        let id = raw
            .parse::<DocumentId>()
            .map_err(|_| CatalogError::InvalidCategoryReference(raw.to_string()))?;

        if !self.categories.exists(id).await? {
            return Err(CatalogError::InvalidCategoryReference(raw.to_string()));
        }

        Ok(id)
    }
}
