use flight_management_system::config::{AppConfig, StorageBackend};
use flight_management_system::console::Console;
use flight_management_system::db::Database;
use flight_management_system::repositories::{MySqlStore, Repositories};
use flight_management_system::seed::SeedData;
use flight_management_system::services::Services;
use flight_management_system::utils::error::{AppError, AppResult};
use flight_management_system::utils::logging;
use std::process::ExitCode;
use tokio::io::BufReader;

#[tokio::main]
async fn main() -> ExitCode {
    logging::init();

    match run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            tracing::error!(kind = err.kind(), error = %err, "fatal");
            eprintln!("Error: {}", err);
            ExitCode::FAILURE
        }
    }
}

async fn run() -> AppResult<()> {
    let config = AppConfig::from_env()?;

    // Pick the storage backend
    let repositories = match config.backend {
        StorageBackend::Memory => Repositories::in_memory(),
        StorageBackend::MySql => {
            let settings = config.database.as_ref().ok_or_else(|| {
                AppError::ConfigError("DATABASE_URL must be set for the mysql backend".into())
            })?;
            let database = Database::new(settings).await?;
            database.run_migrations().await?;
            Repositories::mysql(MySqlStore::new(&database))
        }
    };
    tracing::info!(backend = ?config.backend, "storage ready");

    let services = Services::new(&repositories);

    let seed = match &config.seed_file {
        Some(path) => SeedData::from_file(path).await?,
        None => SeedData::builtin(),
    };
    seed.apply(&services).await?;

    let mut console = Console::new(
        services,
        BufReader::new(tokio::io::stdin()),
        std::io::stdout(),
    );
    console.run().await
}
