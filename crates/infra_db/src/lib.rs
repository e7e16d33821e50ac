//! Infrastructure Database Layer
//!
//! PostgreSQL adapters for the lending system's storage ports, implemented
//! with SQLx. The domain crates define the port traits; this crate provides
//! the database-backed implementations and hides all SQL from the domain
//! layer.
//!
//! # Example
//!
//! ```rust,ignore
//! use infra_db::{DatabaseConfig, create_pool, PgApplicationStore};
//!
//! let pool = create_pool(DatabaseConfig::new("postgres://localhost/lending")).await?;
//! let applications = PgApplicationStore::new(pool.clone());
//! ```

pub mod error;
pub mod pool;
pub mod repositories;

pub use error::DatabaseError;
pub use pool::{create_pool, create_pool_from_url, ping, DatabaseConfig, DatabasePool};
pub use repositories::{PgApplicationStore, PgProfileStore};
