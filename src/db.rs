use sqlx::mysql::{MySqlPool, MySqlPoolOptions};
use sqlx::Executor;
use std::time::Duration;

use crate::config::DatabaseConfig;
use crate::utils::error::AppResult;

const SCHEMA: &str = include_str!("../migrations/001_schema.sql");

// Database connection manager
pub struct Database {
    pub pool: MySqlPool,
}

impl Database {
    // Create a new database connection pool
    pub async fn new(config: &DatabaseConfig) -> AppResult<Self> {
        let pool = MySqlPoolOptions::new()
            .max_connections(config.max_connections)
            .acquire_timeout(Duration::from_secs(config.acquire_timeout_secs))
            .connect(&config.url)
            .await?;

        tracing::info!(max_connections = config.max_connections, "connected to MySQL");
        Ok(Database { pool })
    }

    pub fn from_pool(pool: MySqlPool) -> Self {
        Database { pool }
    }

    // Get a reference to the connection pool
    pub fn get_pool(&self) -> &MySqlPool {
        &self.pool
    }

    /// Creates the tables and (re)creates the stored procedures.
    ///
    /// Procedure bodies contain `;`, so statements are separated by `$$` lines and each
    /// one is sent through the text protocol.
    pub async fn run_migrations(&self) -> AppResult<()> {
        let mut conn = self.pool.acquire().await?;
        let mut applied = 0usize;
        for statement in schema_statements() {
            conn.execute(statement).await?;
            applied += 1;
        }
        tracing::info!(statements = applied, "schema up to date");
        Ok(())
    }
}

fn schema_statements() -> impl Iterator<Item = &'static str> {
    SCHEMA
        .split("\n$$")
        .map(str::trim)
        .filter(|statement| !statement.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::error::AppError;

    #[tokio::test]
    async fn connection_failures_surface_as_database_errors() {
        let config = DatabaseConfig {
            url: "not-a-mysql-url".into(),
            max_connections: 1,
            acquire_timeout_secs: 1,
        };
        let result = Database::new(&config).await;
        assert!(matches!(result.err(), Some(AppError::DatabaseError(_))));
    }

    #[test]
    fn schema_splits_into_tables_and_procedures() {
        let statements: Vec<&str> = schema_statements().collect();
        let tables = statements
            .iter()
            .filter(|s| s.contains("CREATE TABLE"))
            .count();
        assert_eq!(tables, 7);
        assert!(statements
            .iter()
            .any(|s| s.starts_with("CREATE PROCEDURE sp_save_reservation")));
        assert!(statements.iter().all(|s| !s.contains("$$")));
    }
}
