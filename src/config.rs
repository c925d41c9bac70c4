use std::env;
use std::path::PathBuf;
use std::str::FromStr;

use crate::utils::error::{AppError, AppResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageBackend {
    Memory,
    MySql,
}

impl FromStr for StorageBackend {
    type Err = AppError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "memory" | "in-memory" => Ok(StorageBackend::Memory),
            "mysql" => Ok(StorageBackend::MySql),
            other => Err(AppError::ConfigError(format!(
                "Unknown STORAGE_BACKEND '{}', expected 'memory' or 'mysql'",
                other
            ))),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
    pub acquire_timeout_secs: u64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub backend: StorageBackend,
    // Present only for the MySQL backend
    pub database: Option<DatabaseConfig>,
    pub seed_file: Option<PathBuf>,
}

impl AppConfig {
    /// Reads the process environment, after loading `.env` if one exists.
    pub fn from_env() -> AppResult<Self> {
        dotenv::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> AppResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let backend = match lookup("STORAGE_BACKEND") {
            Some(value) => value.parse()?,
            None => StorageBackend::Memory,
        };

        let database = match backend {
            StorageBackend::Memory => None,
            StorageBackend::MySql => {
                let url = lookup("DATABASE_URL").ok_or_else(|| {
                    AppError::ConfigError("DATABASE_URL must be set for the mysql backend".into())
                })?;
                Some(DatabaseConfig {
                    url,
                    max_connections: parse_or(&lookup, "DB_MAX_CONNECTIONS", 5)?,
                    acquire_timeout_secs: parse_or(&lookup, "DB_ACQUIRE_TIMEOUT_SECS", 3)?,
                })
            }
        };

        let seed_file = lookup("SEED_FILE")
            .filter(|path| !path.trim().is_empty())
            .map(PathBuf::from);

        Ok(AppConfig {
            backend,
            database,
            seed_file,
        })
    }
}

fn parse_or<F, T>(lookup: &F, key: &str, default: T) -> AppResult<T>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
{
    match lookup(key) {
        None => Ok(default),
        Some(raw) => raw
            .trim()
            .parse()
            .map_err(|_| AppError::ConfigError(format!("{} has an invalid value '{}'", key, raw))),
    }
}
