//! MongoDB database connector and utilities
//!
//! Provides connection management, health checks, and the opaque
//! [`DocumentId`] identifier used across domain crates.

mod config;
mod connector;
mod health;
mod id;

pub use config::MongoConfig;
pub use connector::{
    MongoError, connect, connect_from_config, connect_from_config_with_retry, connect_with_retry,
};
pub use health::{HealthStatus, check_health, check_health_detailed};
pub use id::{DocumentId, InvalidDocumentId};

// Re-export MongoDB types for convenience
pub use mongodb::{Client, Collection, Database};
