//! Integration tests for the catalog domain
//!
//! These tests run against a real MongoDB via testcontainers to ensure:
//! - The unique category name index is enforced
//! - Category references are resolved before products are written
//! - Updates replace documents without losing the creation timestamp
//! - Listing and export read back in insertion order

use database::DocumentId;
use domain_catalog::*;
use test_utils::{TestDataBuilder, TestMongo};

fn catalog(mongo: &TestMongo) -> CatalogService<MongoCategoryRepository, MongoProductRepository> {
    let db = mongo.database("inventory_test");
    CatalogService::new(
        MongoCategoryRepository::new(db.clone()),
        MongoProductRepository::new(db),
    )
}

fn category_input(name: &str) -> CreateCategory {
    CreateCategory {
        name: name.to_string(),
        description: Some("Created by an integration test".to_string()),
    }
}

fn product_input(name: &str, category_id: &str) -> ProductInput {
    ProductInput {
        name: name.to_string(),
        description: Some("Created by an integration test".to_string()),
        price: 9.99,
        quantity: 3,
        category_id: category_id.to_string(),
    }
}

fn all_products() -> ProductFilter {
    ProductFilter {
        category_id: None,
        name: None,
        skip: 0,
        limit: 100,
    }
}

#[tokio::test]
async fn test_create_and_get_category() {
    let mongo = TestMongo::new().await;
    let service = catalog(&mongo);
    let builder = TestDataBuilder::from_test_name("create_category");

    let name = builder.name("category", "tools");
    let created = service
        .create_category(CreateCategory {
            name: name.clone(),
            description: Some("Hand tools".to_string()),
        })
        .await
        .unwrap();

    let fetched = service.get_category(created.id).await.unwrap();
    assert_eq!(fetched.id, created.id);
    assert_eq!(fetched.name, name);
    assert_eq!(fetched.description.as_deref(), Some("Hand tools"));
}

#[tokio::test]
async fn test_duplicate_category_name_rejected() {
    let mongo = TestMongo::new().await;
    let service = catalog(&mongo);
    let builder = TestDataBuilder::from_test_name("duplicate_category");

    // The uniqueness guarantee comes from the index, so create it first
    service.init_indexes().await.unwrap();

    let name = builder.name("category", "unique");
    service.create_category(category_input(&name)).await.unwrap();

    let result = service.create_category(category_input(&name)).await;
    assert!(
        matches!(result, Err(CatalogError::DuplicateCategoryName(ref dup)) if dup == &name),
        "Expected DuplicateCategoryName error, got {:?}",
        result
    );

    // The first category is untouched
    let listed = service
        .list_categories(CategoryFilter { skip: 0, limit: 100 })
        .await
        .unwrap();
    assert_eq!(listed.iter().filter(|c| c.name == name).count(), 1);
}

#[tokio::test]
async fn test_get_missing_category_is_not_found() {
    let mongo = TestMongo::new().await;
    let service = catalog(&mongo);

    let absent = DocumentId::new();
    let result = service.get_category(absent).await;

    assert!(matches!(
        result,
        Err(CatalogError::CategoryNotFound(id)) if id == absent
    ));
}

#[tokio::test]
async fn test_list_categories_in_insertion_order() {
    let mongo = TestMongo::new().await;
    let service = catalog(&mongo);
    let builder = TestDataBuilder::from_test_name("list_categories");

    let names = [
        builder.name("category", "first"),
        builder.name("category", "second"),
        builder.name("category", "third"),
    ];
    for name in &names {
        service.create_category(category_input(name)).await.unwrap();
    }

    let listed = service
        .list_categories(CategoryFilter { skip: 0, limit: 100 })
        .await
        .unwrap();
    let listed_names: Vec<&str> = listed.iter().map(|c| c.name.as_str()).collect();
    assert_eq!(listed_names, names.iter().map(String::as_str).collect::<Vec<_>>());

    // Pagination slices the same order
    let page = service
        .list_categories(CategoryFilter { skip: 1, limit: 1 })
        .await
        .unwrap();
    assert_eq!(page.len(), 1);
    assert_eq!(page[0].name, names[1]);
}

#[tokio::test]
async fn test_product_round_trip() {
    let mongo = TestMongo::new().await;
    let service = catalog(&mongo);
    let builder = TestDataBuilder::from_test_name("product_round_trip");

    let category = service
        .create_category(category_input(&builder.name("category", "tools")))
        .await
        .unwrap();

    let created = service
        .create_product(ProductInput {
            name: "Adjustable Wrench".to_string(),
            description: Some("10-inch, chrome".to_string()),
            price: 24.5,
            quantity: 12,
            category_id: category.id.to_hex(),
        })
        .await
        .unwrap();

    assert_eq!(created.category_id, category.id);
    // A fresh product has identical creation and update timestamps
    assert_eq!(created.created_at, created.updated_at);

    let fetched = service.get_product(created.id).await.unwrap();
    assert_eq!(fetched.id, created.id);
    assert_eq!(fetched.name, "Adjustable Wrench");
    assert_eq!(fetched.price, 24.5);
    assert_eq!(fetched.quantity, 12);
    assert_eq!(fetched.created_at, created.created_at);
}

#[tokio::test]
async fn test_product_with_bad_category_reference_is_rejected() {
    let mongo = TestMongo::new().await;
    let service = catalog(&mongo);

    // Malformed id
    let result = service
        .create_product(product_input("Orphan", "not-a-hex-id"))
        .await;
    assert!(matches!(
        result,
        Err(CatalogError::InvalidCategoryReference(_))
    ));

    // Well-formed id that matches no category
    let absent = DocumentId::new().to_hex();
    let result = service.create_product(product_input("Orphan", &absent)).await;
    assert!(matches!(
        result,
        Err(CatalogError::InvalidCategoryReference(_))
    ));

    // Neither attempt persisted anything
    let listed = service.list_products(all_products()).await.unwrap();
    assert!(listed.is_empty());
}

#[tokio::test]
async fn test_update_replaces_all_fields_and_keeps_created_at() {
    let mongo = TestMongo::new().await;
    let service = catalog(&mongo);
    let builder = TestDataBuilder::from_test_name("update_product");

    let tools = service
        .create_category(category_input(&builder.name("category", "tools")))
        .await
        .unwrap();
    let safety = service
        .create_category(category_input(&builder.name("category", "safety")))
        .await
        .unwrap();

    let created = service
        .create_product(product_input("Hammer", &tools.id.to_hex()))
        .await
        .unwrap();

    let updated = service
        .update_product(
            created.id,
            ProductInput {
                name: "Sledgehammer".to_string(),
                description: None,
                price: 42.0,
                quantity: 1,
                category_id: safety.id.to_hex(),
            },
        )
        .await
        .unwrap();

    assert_eq!(updated.id, created.id);
    assert_eq!(updated.name, "Sledgehammer");
    assert_eq!(updated.description, None);
    assert_eq!(updated.price, 42.0);
    assert_eq!(updated.quantity, 1);
    assert_eq!(updated.category_id, safety.id);
    assert_eq!(updated.created_at, created.created_at);
    assert!(updated.updated_at > created.updated_at);

    // The replacement is what is stored
    let fetched = service.get_product(created.id).await.unwrap();
    assert_eq!(fetched.name, "Sledgehammer");
    assert_eq!(fetched.created_at, created.created_at);
}

#[tokio::test]
async fn test_update_missing_product_is_not_found() {
    let mongo = TestMongo::new().await;
    let service = catalog(&mongo);
    let builder = TestDataBuilder::from_test_name("update_missing");

    let category = service
        .create_category(category_input(&builder.name("category", "tools")))
        .await
        .unwrap();

    let absent = DocumentId::new();
    let result = service
        .update_product(absent, product_input("Ghost", &category.id.to_hex()))
        .await;

    assert!(matches!(
        result,
        Err(CatalogError::ProductNotFound(id)) if id == absent
    ));
}

#[tokio::test]
async fn test_delete_product() {
    let mongo = TestMongo::new().await;
    let service = catalog(&mongo);
    let builder = TestDataBuilder::from_test_name("delete_product");

    let category = service
        .create_category(category_input(&builder.name("category", "tools")))
        .await
        .unwrap();
    let product = service
        .create_product(product_input("Disposable", &category.id.to_hex()))
        .await
        .unwrap();

    service.delete_product(product.id).await.unwrap();

    let result = service.get_product(product.id).await;
    assert!(matches!(result, Err(CatalogError::ProductNotFound(_))));

    // Deleting again reports the absence
    let result = service.delete_product(product.id).await;
    assert!(matches!(result, Err(CatalogError::ProductNotFound(_))));
}

#[tokio::test]
async fn test_list_products_filters() {
    let mongo = TestMongo::new().await;
    let service = catalog(&mongo);
    let builder = TestDataBuilder::from_test_name("list_filters");

    let tools = service
        .create_category(category_input(&builder.name("category", "tools")))
        .await
        .unwrap();
    let safety = service
        .create_category(category_input(&builder.name("category", "safety")))
        .await
        .unwrap();

    for name in ["Adjustable Wrench", "Pipe Wrench", "Hammer"] {
        service
            .create_product(product_input(name, &tools.id.to_hex()))
            .await
            .unwrap();
    }
    service
        .create_product(product_input("Safety Goggles", &safety.id.to_hex()))
        .await
        .unwrap();

    // No filter: everything, in insertion order
    let all = service.list_products(all_products()).await.unwrap();
    let all_names: Vec<&str> = all.iter().map(|p| p.name.as_str()).collect();
    assert_eq!(
        all_names,
        ["Adjustable Wrench", "Pipe Wrench", "Hammer", "Safety Goggles"]
    );

    // By category
    let in_tools = service
        .list_products(ProductFilter {
            category_id: Some(tools.id.to_hex()),
            ..all_products()
        })
        .await
        .unwrap();
    assert_eq!(in_tools.len(), 3);

    // By name, case-insensitive substring
    let wrenches = service
        .list_products(ProductFilter {
            name: Some("WRENCH".to_string()),
            ..all_products()
        })
        .await
        .unwrap();
    assert_eq!(wrenches.len(), 2);

    // Both filters combine with AND
    let safety_wrenches = service
        .list_products(ProductFilter {
            category_id: Some(safety.id.to_hex()),
            name: Some("wrench".to_string()),
            ..all_products()
        })
        .await
        .unwrap();
    assert!(safety_wrenches.is_empty());

    // Pagination slices insertion order
    let page = service
        .list_products(ProductFilter {
            skip: 1,
            limit: 2,
            ..all_products()
        })
        .await
        .unwrap();
    let page_names: Vec<&str> = page.iter().map(|p| p.name.as_str()).collect();
    assert_eq!(page_names, ["Pipe Wrench", "Hammer"]);
}

#[tokio::test]
async fn test_name_filter_matches_literally() {
    let mongo = TestMongo::new().await;
    let service = catalog(&mongo);
    let builder = TestDataBuilder::from_test_name("literal_name");

    let category = service
        .create_category(category_input(&builder.name("category", "tools")))
        .await
        .unwrap();

    service
        .create_product(product_input("a.b widget", &category.id.to_hex()))
        .await
        .unwrap();
    service
        .create_product(product_input("axb widget", &category.id.to_hex()))
        .await
        .unwrap();

    // The dot in the query must not act as a wildcard
    let matched = service
        .list_products(ProductFilter {
            name: Some("a.b".to_string()),
            ..all_products()
        })
        .await
        .unwrap();

    assert_eq!(matched.len(), 1);
    assert_eq!(matched[0].name, "a.b widget");
}

#[tokio::test]
async fn test_export_json_records() {
    let mongo = TestMongo::new().await;
    let service = catalog(&mongo);
    let builder = TestDataBuilder::from_test_name("export_json");

    let category = service
        .create_category(category_input(&builder.name("category", "tools")))
        .await
        .unwrap();

    let first = service
        .create_product(product_input("Wrench", &category.id.to_hex()))
        .await
        .unwrap();
    service
        .create_product(product_input("Hammer", &category.id.to_hex()))
        .await
        .unwrap();

    let records = service.export_products_json().await.unwrap();
    assert_eq!(records.len(), 2);

    assert_eq!(records[0].id, first.id.to_hex());
    assert_eq!(records[0].name, "Wrench");
    assert_eq!(records[0].category_id, category.id.to_hex());
    assert_eq!(records[0].id.len(), 24);
    assert!(records[0].created_at.is_some());
    assert_eq!(records[1].name, "Hammer");
}

#[tokio::test]
async fn test_export_csv_document() {
    let mongo = TestMongo::new().await;
    let service = catalog(&mongo);
    let builder = TestDataBuilder::from_test_name("export_csv");

    let category = service
        .create_category(category_input(&builder.name("category", "tools")))
        .await
        .unwrap();

    service
        .create_product(product_input("Wrench", &category.id.to_hex()))
        .await
        .unwrap();
    // No description: the cell must come out empty
    service
        .create_product(ProductInput {
            name: "Hammer".to_string(),
            description: None,
            price: 15.0,
            quantity: 7,
            category_id: category.id.to_hex(),
        })
        .await
        .unwrap();

    let bytes = service.export_products_csv().await.unwrap();
    let text = String::from_utf8(bytes).unwrap();
    let lines: Vec<&str> = text.lines().collect();

    assert_eq!(
        lines[0],
        "id,name,description,price,quantity,category_id,created_at,updated_at"
    );
    assert_eq!(lines.len(), 3);

    let hammer: Vec<&str> = lines[2].split(',').collect();
    assert_eq!(hammer[1], "Hammer");
    assert_eq!(hammer[2], "");
    assert_eq!(hammer[3], "15");
    assert_eq!(hammer[4], "7");
    assert_eq!(hammer[5], category.id.to_hex());
}

#[tokio::test]
async fn test_category_product_export_flow() {
    let mongo = TestMongo::new().await;
    let service = catalog(&mongo);
    let builder = TestDataBuilder::from_test_name("full_flow");

    service.init_indexes().await.unwrap();

    let category = service
        .create_category(CreateCategory {
            name: builder.name("category", "tools"),
            description: Some("Hand tools".to_string()),
        })
        .await
        .unwrap();

    let product = service
        .create_product(ProductInput {
            name: "Torque Wrench".to_string(),
            description: Some("1/2-inch drive".to_string()),
            price: 89.0,
            quantity: 4,
            category_id: category.id.to_hex(),
        })
        .await
        .unwrap();

    let updated = service
        .update_product(
            product.id,
            ProductInput {
                name: "Torque Wrench".to_string(),
                description: Some("1/2-inch drive".to_string()),
                price: 79.0,
                quantity: 6,
                category_id: category.id.to_hex(),
            },
        )
        .await
        .unwrap();
    assert_eq!(updated.price, 79.0);

    let records = service.export_products_json().await.unwrap();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].price, 79.0);
    assert_eq!(records[0].quantity, 6);

    service.delete_product(product.id).await.unwrap();

    let csv = service.export_products_csv().await.unwrap();
    let text = String::from_utf8(csv).unwrap();
    // Only the header remains after the delete
    assert_eq!(
        text.trim_end(),
        "id,name,description,price,quantity,category_id,created_at,updated_at"
    );
}
