//! MongoDB implementation of UserRepository

use async_trait::async_trait;
use mongodb::{
    Collection, Database, IndexModel,
    bson::doc,
    error::{ErrorKind, WriteFailure},
    options::IndexOptions,
};
use tracing::instrument;

use crate::error::{UserError, UserResult};
use crate::models::User;
use crate::repository::UserRepository;

/// MongoDB implementation of the UserRepository
pub struct MongoUserRepository {
    collection: Collection<User>,
}

impl MongoUserRepository {
    /// Create a new MongoUserRepository backed by the `users` collection
    pub fn new(db: Database) -> Self {
        let collection = db.collection::<User>("users");
        Self { collection }
    }

    /// Create a new MongoUserRepository with a custom collection name
    pub fn with_collection(db: Database, collection_name: &str) -> Self {
        let collection = db.collection::<User>(collection_name);
        Self { collection }
    }

    /// Get the underlying collection for advanced operations
    pub fn collection(&self) -> &Collection<User> {
        &self.collection
    }

    /// True when the error is a unique-index violation (server code 11000)
    fn is_duplicate_key(err: &mongodb::error::Error) -> bool {
        match *err.kind {
            ErrorKind::Write(WriteFailure::WriteError(ref write_error)) => {
                write_error.code == 11000
            }
            _ => false,
        }
    }
}

#[async_trait]
impl UserRepository for MongoUserRepository {
    #[instrument(skip(self))]
    async fn find_by_email(&self, email: &str) -> UserResult<Option<User>> {
        let user = self.collection.find_one(doc! { "email": email }).await?;
        Ok(user)
    }

    #[instrument(skip(self, user), fields(email = %user.email))]
    async fn insert(&self, user: User) -> UserResult<User> {
        self.collection.insert_one(&user).await.map_err(|e| {
            if Self::is_duplicate_key(&e) {
                UserError::DuplicateEmail(user.email.clone())
            } else {
                UserError::from(e)
            }
        })?;

        tracing::info!(user_id = %user.id, "User created");
        Ok(user)
    }

    #[instrument(skip(self, password_hash))]
    async fn update_password(&self, email: &str, password_hash: &str) -> UserResult<()> {
        let result = self
            .collection
            .update_one(
                doc! { "email": email },
                doc! { "$set": { "password_hash": password_hash } },
            )
            .await?;

        if result.matched_count == 0 {
            return Err(UserError::NotFound(email.to_string()));
        }

        tracing::info!(email, "Password updated");
        Ok(())
    }

    #[instrument(skip(self))]
    async fn set_active(&self, email: &str, active: bool) -> UserResult<()> {
        let result = self
            .collection
            .update_one(
                doc! { "email": email },
                doc! { "$set": { "is_active": active } },
            )
            .await?;

        if result.matched_count == 0 {
            return Err(UserError::NotFound(email.to_string()));
        }

        tracing::info!(email, active, "Account status changed");
        Ok(())
    }

    #[instrument(skip(self))]
    async fn list(&self) -> UserResult<Vec<User>> {
        use futures_util::TryStreamExt;

        // _id ascending is insertion order for ObjectIds
        let options = mongodb::options::FindOptions::builder()
            .sort(doc! { "_id": 1 })
            .build();

        let cursor = self.collection.find(doc! {}).with_options(options).await?;
        let users: Vec<User> = cursor.try_collect().await?;

        Ok(users)
    }

    #[instrument(skip(self))]
    async fn init_indexes(&self) -> UserResult<()> {
        let index = IndexModel::builder()
            .keys(doc! { "email": 1 })
            .options(IndexOptions::builder().unique(true).build())
            .build();

        self.collection.create_index(index).await?;

        tracing::debug!("User indexes ready");
        Ok(())
    }
}
