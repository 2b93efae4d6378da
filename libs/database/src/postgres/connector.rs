use sea_orm::{Database, DatabaseConnection, DbErr};
use sea_orm_migration::MigratorTrait;
use tracing::{info, warn};

use super::PostgresConfig;
use crate::common::{DatabaseError, DatabaseResult, RetryConfig, retry_with_backoff};

/// Connect with the default pool settings of [`PostgresConfig::new`].
pub async fn connect(database_url: &str) -> Result<DatabaseConnection, DbErr> {
    connect_from_config(&PostgresConfig::new(database_url)).await
}

/// Connect using the pool settings in `config`.
pub async fn connect_from_config(config: &PostgresConfig) -> Result<DatabaseConnection, DbErr> {
    let db = Database::connect(config.connect_options()).await?;

    info!(
        url = %config.redacted_url(),
        max_connections = config.max_connections,
        "Connected to PostgreSQL"
    );

    Ok(db)
}

/// Connect, retrying with exponential backoff.
///
/// Useful at startup when the database container may still be booting.
///
/// ```ignore
/// let config = PostgresConfig::from_env()?;
/// let retry = RetryConfig::new().with_max_retries(5);
/// let db = connect_from_config_with_retry(&config, Some(retry)).await?;
/// ```
pub async fn connect_from_config_with_retry(
    config: &PostgresConfig,
    retry_config: Option<RetryConfig>,
) -> Result<DatabaseConnection, DbErr> {
    retry_with_backoff(|| connect_from_config(config), retry_config.unwrap_or_default())
        .await
        .inspect_err(|e| warn!(url = %config.redacted_url(), error = %e, "Giving up on PostgreSQL"))
}

/// Apply every pending migration of `M`.
///
/// Any failure is reported as [`DatabaseError::MigrationFailed`].
///
/// ```ignore
/// run_migrations::<migration::Migrator>(&db, "projects_api").await?;
/// ```
pub async fn run_migrations<M: MigratorTrait>(
    db: &DatabaseConnection,
    app_name: &str,
) -> DatabaseResult<()> {
    info!("Running {} database migrations...", app_name);
    M::up(db, None).await.map_err(|e| {
        warn!(app = app_name, error = %e, "Migrations failed");
        DatabaseError::MigrationFailed(e.to_string())
    })?;
    info!("Migrations completed successfully for {}", app_name);
    Ok(())
}
