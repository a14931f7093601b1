use chrono::{DateTime, Utc};
use database::DocumentId;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

/// Category entity - represents a product category stored in MongoDB
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Category {
    /// Unique identifier (stored as _id in MongoDB)
    #[serde(rename = "_id", alias = "id")]
    pub id: DocumentId,
    /// Category name, unique across the collection
    pub name: String,
    /// Optional free-form description
    pub description: Option<String>,
}

/// Category as it crosses the HTTP surface, with the id as a hex string
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CategoryResponse {
    pub id: String,
    pub name: String,
    pub description: Option<String>,
}

impl From<Category> for CategoryResponse {
    fn from(category: Category) -> Self {
        Self {
            id: category.id.to_hex(),
            name: category.name,
            description: category.description,
        }
    }
}

/// DTO for creating a new category
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreateCategory {
    #[validate(length(min = 1, max = 100))]
    pub name: String,
    pub description: Option<String>,
}

/// Product entity - represents a product stored in MongoDB
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Product {
    /// Unique identifier (stored as _id in MongoDB)
    #[serde(rename = "_id", alias = "id")]
    pub id: DocumentId,
    /// Product name
    pub name: String,
    /// Optional free-form description
    pub description: Option<String>,
    /// Unit price
    pub price: f64,
    /// Units in stock
    pub quantity: i32,
    /// The category this product belongs to
    pub category_id: DocumentId,
    /// Creation timestamp
    pub created_at: DateTime<Utc>,
    /// Last update timestamp
    pub updated_at: DateTime<Utc>,
}

/// Product as it crosses the HTTP surface, with ids as hex strings
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ProductResponse {
    pub id: String,
    pub name: String,
    pub description: Option<String>,
    pub price: f64,
    pub quantity: i32,
    pub category_id: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Product> for ProductResponse {
    fn from(product: Product) -> Self {
        Self {
            id: product.id.to_hex(),
            name: product.name,
            description: product.description,
            price: product.price,
            quantity: product.quantity,
            category_id: product.category_id.to_hex(),
            created_at: product.created_at,
            updated_at: product.updated_at,
        }
    }
}

/// DTO for creating or replacing a product.
///
/// PUT takes the same full body as POST; there is no partial update.
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct ProductInput {
    #[validate(length(min = 1, max = 200))]
    pub name: String,
    pub description: Option<String>,
    #[validate(range(min = 0.0))]
    pub price: f64,
    #[validate(range(min = 0))]
    pub quantity: i32,
    /// Hex id of the category this product belongs to
    pub category_id: String,
}

/// Query parameters for listing categories
#[derive(Debug, Clone, Default, Deserialize, ToSchema, IntoParams)]
pub struct CategoryFilter {
    /// Number of results to skip
    #[serde(default)]
    pub skip: u64,
    /// Maximum number of results
    #[serde(default = "default_limit")]
    pub limit: i64,
}

/// Query parameters for listing products
#[derive(Debug, Clone, Default, Deserialize, ToSchema, IntoParams)]
pub struct ProductFilter {
    /// Only products belonging to this category (hex id)
    pub category_id: Option<String>,
    /// Case-insensitive substring match on the product name
    pub name: Option<String>,
    /// Number of results to skip
    #[serde(default)]
    pub skip: u64,
    /// Maximum number of results
    #[serde(default = "default_limit")]
    pub limit: i64,
}

fn default_limit() -> i64 {
    100
}

/// Repository-level product query with the category reference already parsed.
///
/// Built by the service from a [`ProductFilter`]; a filter carrying a
/// malformed category id never reaches the repository.
#[derive(Debug, Clone, Default)]
pub struct ProductQuery {
    pub category_id: Option<DocumentId>,
    pub name: Option<String>,
    pub skip: u64,
    pub limit: i64,
}

/// Confirmation body for delete operations
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct MessageResponse {
    pub message: String,
}

impl Category {
    /// Create a new category from the CreateCategory DTO
    pub fn new(input: CreateCategory) -> Self {
        Self {
            id: DocumentId::new(),
            name: input.name,
            description: input.description,
        }
    }
}

impl Product {
    /// Create a new product from the ProductInput DTO and a resolved category id
    pub fn new(input: ProductInput, category_id: DocumentId) -> Self {
        let now = Utc::now();
        Self {
            id: DocumentId::new(),
            name: input.name,
            description: input.description,
            price: input.price,
            quantity: input.quantity,
            category_id,
            created_at: now,
            updated_at: now,
        }
    }

    /// Replace every caller-supplied field, keeping the original creation time
    pub fn apply_replace(&mut self, input: ProductInput, category_id: DocumentId) {
        self.name = input.name;
        self.description = input.description;
        self.price = input.price;
        self.quantity = input.quantity;
        self.category_id = category_id;
        self.updated_at = Utc::now();
    }
}
