use sqlx::mysql::{MySql, MySqlArguments, MySqlPool};
use sqlx::query::Query;
use sqlx::Row;
use std::str::FromStr;

use crate::db::Database;
use crate::utils::error::{AppError, AppResult};

mod aircraft;
mod employee;
mod flight;
mod passenger;
mod reservation;
mod user;

/// MySQL-backed repositories for every record type.
///
/// Writes go through stored procedures that report an `ok` flag and a message through
/// the `@ok` / `@message` session variables; each write runs in its own transaction,
/// committed when the flag is set and rolled back otherwise. Reads are plain
/// parameterized queries.
#[derive(Clone)]
pub struct MySqlStore {
    pool: MySqlPool,
}

impl MySqlStore {
    pub fn new(database: &Database) -> Self {
        MySqlStore {
            pool: database.get_pool().clone(),
        }
    }

    pub fn from_pool(pool: MySqlPool) -> Self {
        MySqlStore { pool }
    }

    pub fn pool(&self) -> &MySqlPool {
        &self.pool
    }

    /// Runs one `CALL sp_...(..., @ok, @message)` and settles its transaction.
    async fn call_procedure<'q>(
        &self,
        procedure: &str,
        call: Query<'q, MySql, MySqlArguments>,
    ) -> AppResult<()> {
        let mut tx = self.pool.begin().await?;

        let outcome = async {
            call.execute(&mut *tx).await?;
            let row = sqlx::query(
                "SELECT CAST(@ok AS SIGNED) AS ok, CAST(@message AS CHAR) AS message",
            )
            .fetch_one(&mut *tx)
            .await?;
            let ok: Option<i64> = row.try_get("ok")?;
            let message: Option<String> = row.try_get("message")?;
            Ok::<_, sqlx::Error>((ok.unwrap_or(0) != 0, message.unwrap_or_default()))
        }
        .await;

        match outcome {
            Ok((true, message)) => {
                tx.commit().await?;
                tracing::info!(procedure, %message, "procedure committed");
                Ok(())
            }
            Ok((false, message)) => {
                tx.rollback().await?;
                tracing::warn!(procedure, %message, "procedure refused, rolled back");
                Err(AppError::DatabaseError(message))
            }
            Err(err) => {
                if let Err(rollback_err) = tx.rollback().await {
                    tracing::warn!(procedure, error = %rollback_err, "rollback failed");
                }
                tracing::warn!(procedure, error = %err, "procedure failed, rolled back");
                Err(err.into())
            }
        }
    }

    async fn count(&self, sql: &str, key: &str) -> AppResult<bool> {
        let count: i64 = sqlx::query_scalar(sql)
            .bind(key)
            .fetch_one(&self.pool)
            .await?;
        Ok(count > 0)
    }
}

/// Decodes a status/role code column, e.g. `IN_FLIGHT`.
fn parse_code<T: FromStr>(column: &str, value: &str) -> AppResult<T> {
    value.parse().map_err(|_| {
        AppError::DatabaseError(format!("Unknown {} value '{}' in database", column, value))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::flight::FlightStatus;

    #[test]
    fn unknown_codes_surface_as_database_errors() {
        let ok: FlightStatus = parse_code("flight status", "BOARDING").unwrap();
        assert_eq!(ok, FlightStatus::Boarding);

        let err = parse_code::<FlightStatus>("flight status", "DELAYED").unwrap_err();
        assert_eq!(
            err,
            AppError::DatabaseError("Unknown flight status value 'DELAYED' in database".into())
        );
    }
}
