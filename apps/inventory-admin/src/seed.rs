//! First-run provisioning: indexes, the default admin account, and a
//! starter set of categories.
//!
//! Every step tolerates data that already exists, so `init` can be re-run
//! safely against a database that was already provisioned.

use domain_catalog::{
    CatalogError, CatalogService, CategoryRepository, CreateCategory, ProductRepository,
};
use domain_users::{CreateUser, UserError, UserRepository, UserService};
use eyre::Result;
use tracing::info;

/// Default admin credentials for local development
const DEFAULT_ADMIN_EMAIL: &str = "admin@example.com";
const DEFAULT_ADMIN_PASSWORD: &str = "testpass123";

const SAMPLE_CATEGORIES: [(&str, &str); 5] = [
    ("Electronics", "Electronic devices and accessories"),
    ("Books", "Physical and digital books"),
    ("Clothing", "Apparel and accessories"),
    ("Home & Garden", "Home improvement and garden supplies"),
    ("Sports", "Sports equipment and accessories"),
];

/// Create indexes and seed the default admin and sample categories
pub async fn run<R, C, P>(users: &UserService<R>, catalog: &CatalogService<C, P>) -> Result<()>
where
    R: UserRepository,
    C: CategoryRepository,
    P: ProductRepository,
{
    users.init_indexes().await?;
    catalog.init_indexes().await?;
    info!("Indexes created");

    let admin = CreateUser {
        email: DEFAULT_ADMIN_EMAIL.to_string(),
        password: DEFAULT_ADMIN_PASSWORD.to_string(),
        is_active: true,
    };
    match users.create_user(admin).await {
        Ok(created) => println!("Created default admin {}", created.email),
        Err(UserError::DuplicateEmail(email)) => {
            println!("Admin {} already exists, skipping", email);
        }
        Err(e) => return Err(e.into()),
    }

    let mut created = 0;
    for (name, description) in SAMPLE_CATEGORIES {
        let input = CreateCategory {
            name: name.to_string(),
            description: Some(description.to_string()),
        };
        match catalog.create_category(input).await {
            Ok(_) => created += 1,
            // Already seeded on a previous run
            Err(CatalogError::DuplicateCategoryName(_)) => {}
            Err(e) => return Err(e.into()),
        }
    }
    println!(
        "Seeded {} of {} sample categories",
        created,
        SAMPLE_CATEGORIES.len()
    );

    Ok(())
}
