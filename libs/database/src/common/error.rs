/// Error type for connection management, migrations and health checks.
#[derive(Debug, thiserror::Error)]
pub enum DatabaseError {
    #[cfg(feature = "postgres")]
    #[error("PostgreSQL error: {0}")]
    Postgres(#[from] sea_orm::DbErr),

    #[cfg(feature = "config")]
    #[error("Configuration error: {0}")]
    Config(#[from] core_config::ConfigError),

    #[error("Health check failed: {0}")]
    HealthCheckFailed(String),

    #[error("Migration error: {0}")]
    MigrationFailed(String),
}

pub type DatabaseResult<T> = Result<T, DatabaseError>;
