//! PostgreSQL connectivity for the workspace's services.
//!
//! # Features
//!
//! - `postgres` (default) - SeaORM connector, migrations runner, health check
//! - `config` - `core_config::FromEnv` support for [`postgres::PostgresConfig`]
//!
//! # Example
//!
//! ```ignore
//! use database::postgres::{self, PostgresConfig};
//! use migration::Migrator;
//!
//! let config = PostgresConfig::from_env()?;
//! let db = postgres::connect_from_config_with_retry(&config, None).await?;
//! postgres::run_migrations::<Migrator>(&db, "projects_api").await?;
//! ```

pub mod common;

#[cfg(feature = "postgres")]
pub mod postgres;

pub use common::{DatabaseError, DatabaseResult};
