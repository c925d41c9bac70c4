use async_trait::async_trait;
use sqlx::{FromRow, MySql, QueryBuilder};

use super::{parse_code, MySqlStore};
use crate::models::aircraft::{Aircraft, AircraftFilter};
use crate::repositories::Repository;
use crate::utils::error::{AppError, AppResult};

const SELECT_AIRCRAFT: &str = "SELECT serial_number, model, manufacturer, passenger_capacity, \
     cargo_capacity, status FROM aircraft";

#[derive(Debug, FromRow)]
pub(super) struct AircraftRow {
    serial_number: String,
    model: String,
    manufacturer: String,
    passenger_capacity: i32,
    cargo_capacity: i32,
    status: String,
}

impl TryFrom<AircraftRow> for Aircraft {
    type Error = AppError;

    fn try_from(row: AircraftRow) -> AppResult<Self> {
        Ok(Aircraft {
            status: parse_code("aircraft status", &row.status)?,
            serial_number: row.serial_number,
            model: row.model,
            manufacturer: row.manufacturer,
            passenger_capacity: row.passenger_capacity,
            cargo_capacity: row.cargo_capacity,
        })
    }
}

fn into_aircraft(rows: Vec<AircraftRow>) -> AppResult<Vec<Aircraft>> {
    rows.into_iter().map(Aircraft::try_from).collect()
}

#[async_trait]
impl Repository<Aircraft> for MySqlStore {
    async fn save(&self, aircraft: &Aircraft) -> AppResult<()> {
        let call = sqlx::query("CALL sp_save_aircraft(?, ?, ?, ?, ?, ?, @ok, @message)")
            .bind(&aircraft.serial_number)
            .bind(&aircraft.model)
            .bind(&aircraft.manufacturer)
            .bind(aircraft.passenger_capacity)
            .bind(aircraft.cargo_capacity)
            .bind(aircraft.status.code());
        self.call_procedure("sp_save_aircraft", call).await
    }

    async fn find_by_key(&self, serial_number: &str) -> AppResult<Option<Aircraft>> {
        let row = sqlx::query_as::<_, AircraftRow>(&format!(
            "{} WHERE serial_number = ?",
            SELECT_AIRCRAFT
        ))
        .bind(serial_number)
        .fetch_optional(&self.pool)
        .await?;
        row.map(Aircraft::try_from).transpose()
    }

    async fn list_all(&self) -> AppResult<Vec<Aircraft>> {
        let rows = sqlx::query_as::<_, AircraftRow>(&format!(
            "{} ORDER BY serial_number",
            SELECT_AIRCRAFT
        ))
        .fetch_all(&self.pool)
        .await?;
        into_aircraft(rows)
    }

    async fn find_by(&self, filter: &AircraftFilter) -> AppResult<Vec<Aircraft>> {
        let mut query: QueryBuilder<MySql> = QueryBuilder::new(SELECT_AIRCRAFT);
        match filter {
            AircraftFilter::Status(status) => {
                query.push(" WHERE status = ").push_bind(status.code());
            }
        }
        query.push(" ORDER BY serial_number");

        let rows = query
            .build_query_as::<AircraftRow>()
            .fetch_all(&self.pool)
            .await?;
        into_aircraft(rows)
    }

    async fn delete(&self, serial_number: &str) -> AppResult<bool> {
        if !Repository::<Aircraft>::exists(self, serial_number).await? {
            return Ok(false);
        }
        let call = sqlx::query("CALL sp_delete_aircraft(?, @ok, @message)").bind(serial_number);
        self.call_procedure("sp_delete_aircraft", call).await?;
        Ok(true)
    }

    async fn exists(&self, serial_number: &str) -> AppResult<bool> {
        self.count(
            "SELECT COUNT(*) FROM aircraft WHERE serial_number = ?",
            serial_number,
        )
        .await
    }
}
