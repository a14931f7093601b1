//! Integration tests for the users domain
//!
//! These tests run against a real MongoDB via testcontainers to ensure:
//! - The unique email index is enforced
//! - Credential verification works against actual stored hashes
//! - Password and activation updates hit the right documents

use domain_users::*;
use test_utils::{TestDataBuilder, TestMongo};

#[tokio::test]
async fn test_create_and_find_user() {
    let mongo = TestMongo::new().await;
    let repo = MongoUserRepository::new(mongo.database("inventory_test"));
    let service = UserService::new(MongoUserRepository::new(mongo.database("inventory_test")));
    let builder = TestDataBuilder::from_test_name("create_and_find");

    let email = builder.email("create");
    let created = service
        .create_user(CreateUser {
            email: email.clone(),
            password: "Sup3r-secret".to_string(),
            is_active: true,
        })
        .await
        .unwrap();

    assert_eq!(created.email, email);
    assert!(created.is_active);
    assert_eq!(created.id.len(), 24, "response id should be hex");

    // The stored entity carries the hash, never the plaintext
    let stored = repo.find_by_email(&email).await.unwrap().unwrap();
    assert!(stored.password_hash.starts_with("$argon2"));
    assert_ne!(stored.password_hash, "Sup3r-secret");
}

#[tokio::test]
async fn test_duplicate_email_rejected() {
    let mongo = TestMongo::new().await;
    let service = UserService::new(MongoUserRepository::new(mongo.database("inventory_test")));
    let builder = TestDataBuilder::from_test_name("duplicate_email");

    // The uniqueness guarantee comes from the index, so create it first
    service.init_indexes().await.unwrap();

    let email = builder.email("dup");
    let input = CreateUser {
        email: email.clone(),
        password: "Sup3r-secret".to_string(),
        is_active: true,
    };

    service.create_user(input.clone()).await.unwrap();

    let result = service.create_user(input).await;
    assert!(
        matches!(result, Err(UserError::DuplicateEmail(_))),
        "Expected DuplicateEmail error, got {:?}",
        result
    );

    // The first account is untouched
    let verified = service.verify_credentials(&email, "Sup3r-secret").await;
    assert!(verified.is_ok());
}

#[tokio::test]
async fn test_verify_credentials_against_storage() {
    let mongo = TestMongo::new().await;
    let service = UserService::new(MongoUserRepository::new(mongo.database("inventory_test")));
    let builder = TestDataBuilder::from_test_name("verify_credentials");

    let email = builder.email("login");
    service
        .create_user(CreateUser {
            email: email.clone(),
            password: "Correct-horse-battery".to_string(),
            is_active: true,
        })
        .await
        .unwrap();

    // Correct password
    let user = service
        .verify_credentials(&email, "Correct-horse-battery")
        .await
        .unwrap();
    assert_eq!(user.email, email);

    // Wrong password
    let result = service.verify_credentials(&email, "wrong-password").await;
    assert!(matches!(result, Err(UserError::InvalidCredentials)));

    // Unknown email
    let result = service
        .verify_credentials(&builder.email("ghost"), "Correct-horse-battery")
        .await;
    assert!(matches!(result, Err(UserError::InvalidCredentials)));
}

#[tokio::test]
async fn test_deactivated_account_cannot_login() {
    let mongo = TestMongo::new().await;
    let service = UserService::new(MongoUserRepository::new(mongo.database("inventory_test")));
    let builder = TestDataBuilder::from_test_name("deactivated_login");

    let email = builder.email("inactive");
    service
        .create_user(CreateUser {
            email: email.clone(),
            password: "Sup3r-secret".to_string(),
            is_active: true,
        })
        .await
        .unwrap();

    service.set_active(&email, false).await.unwrap();

    let result = service.verify_credentials(&email, "Sup3r-secret").await;
    assert!(
        matches!(result, Err(UserError::InvalidCredentials)),
        "deactivated account should fail login"
    );

    // Reactivation restores access
    service.set_active(&email, true).await.unwrap();
    let result = service.verify_credentials(&email, "Sup3r-secret").await;
    assert!(result.is_ok());
}

#[tokio::test]
async fn test_set_password() {
    let mongo = TestMongo::new().await;
    let service = UserService::new(MongoUserRepository::new(mongo.database("inventory_test")));
    let builder = TestDataBuilder::from_test_name("set_password");

    let email = builder.email("reset");
    service
        .create_user(CreateUser {
            email: email.clone(),
            password: "Old-password-1".to_string(),
            is_active: true,
        })
        .await
        .unwrap();

    service.set_password(&email, "New-password-2").await.unwrap();

    let result = service.verify_credentials(&email, "Old-password-1").await;
    assert!(
        matches!(result, Err(UserError::InvalidCredentials)),
        "old password should stop working"
    );

    let result = service.verify_credentials(&email, "New-password-2").await;
    assert!(result.is_ok(), "new password should work");
}

#[tokio::test]
async fn test_set_password_unknown_email() {
    let mongo = TestMongo::new().await;
    let service = UserService::new(MongoUserRepository::new(mongo.database("inventory_test")));
    let builder = TestDataBuilder::from_test_name("set_password_unknown");

    let result = service
        .set_password(&builder.email("nobody"), "Whatever-123")
        .await;

    assert!(matches!(result, Err(UserError::NotFound(_))));
}

#[tokio::test]
async fn test_list_users_oldest_first() {
    let mongo = TestMongo::new().await;
    let service = UserService::new(MongoUserRepository::new(mongo.database("inventory_test")));
    let builder = TestDataBuilder::from_test_name("list_users");

    let emails: Vec<String> = (0..3).map(|i| builder.email(&format!("user{}", i))).collect();
    for email in &emails {
        service
            .create_user(CreateUser {
                email: email.clone(),
                password: "Sup3r-secret".to_string(),
                is_active: true,
            })
            .await
            .unwrap();
    }

    let users = service.list_users().await.unwrap();

    assert_eq!(users.len(), 3);
    let listed: Vec<&str> = users.iter().map(|u| u.email.as_str()).collect();
    assert_eq!(listed, emails.iter().map(String::as_str).collect::<Vec<_>>());
    for user in &users {
        assert_eq!(user.id.len(), 24);
    }
}
