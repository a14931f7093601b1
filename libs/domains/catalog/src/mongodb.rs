//! MongoDB implementations of the catalog repositories

use async_trait::async_trait;
use futures_util::TryStreamExt;
use mongodb::{
    Collection, Database, IndexModel,
    bson::doc,
    error::{ErrorKind, WriteFailure},
    options::{FindOptions, IndexOptions},
};
use tracing::instrument;

use database::DocumentId;

use crate::error::{CatalogError, CatalogResult};
use crate::export::ExportedProduct;
use crate::models::{Category, CategoryFilter, CreateCategory, Product, ProductInput, ProductQuery};
use crate::repository::{CategoryRepository, ProductRepository};

/// Server error code for a unique index violation
fn is_duplicate_key(err: &mongodb::error::Error) -> bool {
    match *err.kind {
        ErrorKind::Write(WriteFailure::WriteError(ref write_error)) => write_error.code == 11000,
        _ => false,
    }
}

/// MongoDB implementation of the CategoryRepository
pub struct MongoCategoryRepository {
    collection: Collection<Category>,
}

impl MongoCategoryRepository {
    /// Create a new MongoCategoryRepository backed by the `categories` collection
    pub fn new(db: Database) -> Self {
        let collection = db.collection::<Category>("categories");
        Self { collection }
    }

    /// Create a new MongoCategoryRepository with a custom collection name
    pub fn with_collection(db: Database, collection_name: &str) -> Self {
        let collection = db.collection::<Category>(collection_name);
        Self { collection }
    }

    /// Get the underlying collection for advanced operations
    pub fn collection(&self) -> &Collection<Category> {
        &self.collection
    }
}

#[async_trait]
impl CategoryRepository for MongoCategoryRepository {
    #[instrument(skip(self, input), fields(category_name = %input.name))]
    async fn create(&self, input: CreateCategory) -> CatalogResult<Category> {
        let category = Category::new(input);

        // Uniqueness is enforced by the index, not a pre-check; a racing
        // duplicate insert still surfaces as a conflict.
        self.collection.insert_one(&category).await.map_err(|e| {
            if is_duplicate_key(&e) {
                CatalogError::DuplicateCategoryName(category.name.clone())
            } else {
                CatalogError::from(e)
            }
        })?;

        tracing::info!(category_id = %category.id, "Category created successfully");
        Ok(category)
    }

    #[instrument(skip(self))]
    async fn get_by_id(&self, id: DocumentId) -> CatalogResult<Option<Category>> {
        let category = self.collection.find_one(doc! { "_id": id }).await?;
        Ok(category)
    }

    #[instrument(skip(self))]
    async fn list(&self, filter: CategoryFilter) -> CatalogResult<Vec<Category>> {
        // _id ascending is insertion order for ObjectIds
        let options = FindOptions::builder()
            .skip(filter.skip)
            .limit(filter.limit)
            .sort(doc! { "_id": 1 })
            .build();

        let cursor = self.collection.find(doc! {}).with_options(options).await?;
        let categories: Vec<Category> = cursor.try_collect().await?;

        Ok(categories)
    }

    #[instrument(skip(self))]
    async fn exists(&self, id: DocumentId) -> CatalogResult<bool> {
        let count = self.collection.count_documents(doc! { "_id": id }).await?;
        Ok(count > 0)
    }

    #[instrument(skip(self))]
    async fn init_indexes(&self) -> CatalogResult<()> {
        let index = IndexModel::builder()
            .keys(doc! { "name": 1 })
            .options(IndexOptions::builder().unique(true).build())
            .build();

        self.collection.create_index(index).await?;
        Ok(())
    }
}

/// MongoDB implementation of the ProductRepository
pub struct MongoProductRepository {
    collection: Collection<Product>,
}

impl MongoProductRepository {
    /// Create a new MongoProductRepository backed by the `products` collection
    pub fn new(db: Database) -> Self {
        let collection = db.collection::<Product>("products");
        Self { collection }
    }

    /// Create a new MongoProductRepository with a custom collection name
    pub fn with_collection(db: Database, collection_name: &str) -> Self {
        let collection = db.collection::<Product>(collection_name);
        Self { collection }
    }

    /// Get the underlying collection for advanced operations
    pub fn collection(&self) -> &Collection<Product> {
        &self.collection
    }

    /// Build a MongoDB filter document from a ProductQuery
    fn build_filter(query: &ProductQuery) -> mongodb::bson::Document {
        let mut doc = doc! {};

        if let Some(category_id) = query.category_id {
            doc.insert("category_id", category_id);
        }

        if let Some(ref name) = query.name {
            // Escaped so the query text matches literally, not as a pattern
            let pattern = format!("(?i){}", regex::escape(name));
            doc.insert("name", doc! { "$regex": pattern });
        }

        doc
    }
}

#[async_trait]
impl ProductRepository for MongoProductRepository {
    #[instrument(skip(self, input), fields(product_name = %input.name))]
    async fn create(&self, input: ProductInput, category_id: DocumentId) -> CatalogResult<Product> {
        let product = Product::new(input, category_id);

        self.collection.insert_one(&product).await?;

        tracing::info!(product_id = %product.id, "Product created successfully");
        Ok(product)
    }

    #[instrument(skip(self))]
    async fn get_by_id(&self, id: DocumentId) -> CatalogResult<Option<Product>> {
        let product = self.collection.find_one(doc! { "_id": id }).await?;
        Ok(product)
    }

    #[instrument(skip(self))]
    async fn list(&self, query: ProductQuery) -> CatalogResult<Vec<Product>> {
        let mongo_filter = Self::build_filter(&query);

        let options = FindOptions::builder()
            .skip(query.skip)
            .limit(query.limit)
            .sort(doc! { "_id": 1 })
            .build();

        let cursor = self
            .collection
            .find(mongo_filter)
            .with_options(options)
            .await?;
        let products: Vec<Product> = cursor.try_collect().await?;

        Ok(products)
    }

    #[instrument(skip(self, input))]
    async fn replace(
        &self,
        id: DocumentId,
        input: ProductInput,
        category_id: DocumentId,
    ) -> CatalogResult<Product> {
        // Read first so the original creation timestamp survives the replace
        let filter = doc! { "_id": id };
        let existing = self
            .collection
            .find_one(filter.clone())
            .await?
            .ok_or(CatalogError::ProductNotFound(id))?;

        let mut updated = existing;
        updated.apply_replace(input, category_id);

        self.collection.replace_one(filter, &updated).await?;

        tracing::info!(product_id = %id, "Product updated successfully");
        Ok(updated)
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: DocumentId) -> CatalogResult<()> {
        let result = self.collection.delete_one(doc! { "_id": id }).await?;

        if result.deleted_count == 0 {
            return Err(CatalogError::ProductNotFound(id));
        }

        tracing::info!(product_id = %id, "Product deleted successfully");
        Ok(())
    }

    #[instrument(skip(self))]
    async fn export_all(&self) -> CatalogResult<Vec<ExportedProduct>> {
        // A separate view type keeps the lenient export deserialization out
        // of the main entity
        let options = FindOptions::builder().sort(doc! { "_id": 1 }).build();

        let cursor = self
            .collection
            .clone_with_type::<ExportedProduct>()
            .find(doc! {})
            .with_options(options)
            .await?;
        let products: Vec<ExportedProduct> = cursor.try_collect().await?;

        Ok(products)
    }

    #[instrument(skip(self))]
    async fn init_indexes(&self) -> CatalogResult<()> {
        let indexes = vec![
            IndexModel::builder().keys(doc! { "name": 1 }).build(),
            IndexModel::builder().keys(doc! { "category_id": 1 }).build(),
        ];

        self.collection.create_indexes(indexes).await?;
        Ok(())
    }
}
