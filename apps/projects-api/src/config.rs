//! Configuration for Projects API

use core_config::{AppInfo, FromEnv, app_info, server::ServerConfig};
use database::postgres::PostgresConfig;

pub use core_config::Environment;

/// Application configuration
#[derive(Clone, Debug)]
pub struct Config {
    pub app: AppInfo,
    pub database: PostgresConfig,
    pub server: ServerConfig,
    pub environment: Environment,
}

impl Config {
    pub fn from_env() -> eyre::Result<Self> {
        let environment = Environment::from_env();
        let database = PostgresConfig::from_env()?;
        let server = ServerConfig::from_env()?;

        Ok(Self {
            app: app_info!(),
            database,
            server,
            environment,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_from_env() {
        temp_env::with_vars(
            [
                ("DATABASE_URL", Some("postgres://app:secret@db:5432/projects")),
                ("APP_ENV", Some("production")),
                ("PORT", Some("3000")),
                ("DB_MAX_CONNECTIONS", Some("7")),
            ],
            || {
                let config = Config::from_env().unwrap();

                assert_eq!(config.app.name, "projects_api");
                assert!(config.environment.is_production());
                assert_eq!(config.server.port, 3000);
                assert_eq!(config.database.max_connections, 7);
            },
        );
    }

    #[test]
    fn test_config_requires_database_url() {
        temp_env::with_var_unset("DATABASE_URL", || {
            let err = Config::from_env().unwrap_err();
            assert!(err.to_string().contains("DATABASE_URL"));
        });
    }
}
