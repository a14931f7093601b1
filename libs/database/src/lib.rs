//! Database library providing the MongoDB connector and shared utilities
//!
//! This library owns everything driver-specific: connection management with
//! retry, health checks, configuration, and the `DocumentId` identifier type
//! used by every domain crate.
//!
//! # Features
//!
//! - `mongodb` (default) - MongoDB support
//! - `config` - Configuration support with `core_config::FromEnv`
//! - `all` - All features
//!
//! # Example
//!
//! ```ignore
//! use database::mongodb::{self, MongoConfig};
//! use core_config::FromEnv;
//!
//! let config = MongoConfig::from_env()?;
//! let client = mongodb::connect_from_config_with_retry(&config, None).await?;
//! let db = client.database(config.database());
//! ```

// Always available modules
pub mod common;

// Database-specific modules (conditional based on features)
#[cfg(feature = "mongodb")]
pub mod mongodb;

// Re-exports for convenience
pub use common::{DatabaseError, DatabaseResult};

#[cfg(feature = "mongodb")]
pub use self::mongodb::{DocumentId, InvalidDocumentId};
