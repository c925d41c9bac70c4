use async_trait::async_trait;
use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use sqlx::{FromRow, MySql, QueryBuilder};

use super::aircraft::AircraftRow;
use super::{parse_code, MySqlStore};
use crate::models::aircraft::Aircraft;
use crate::models::flight::{Flight, FlightFilter, FlightStatus};
use crate::repositories::Repository;
use crate::utils::error::{AppError, AppResult};

pub(super) const FLIGHT_COLUMNS: &str = "f.flight_number, f.origin, f.destination, \
     f.departure, f.arrival, f.price, f.available_seats, f.status AS flight_status, \
     a.serial_number, a.model, a.manufacturer, a.passenger_capacity, a.cargo_capacity, a.status";

const FROM_FLIGHTS: &str = " FROM flights f INNER JOIN aircraft a ON f.aircraft_serial = a.serial_number";

#[derive(Debug, FromRow)]
pub(super) struct FlightRow {
    flight_number: String,
    origin: String,
    destination: String,
    departure: NaiveDateTime,
    arrival: NaiveDateTime,
    price: Decimal,
    available_seats: i32,
    flight_status: String,
    #[sqlx(flatten)]
    aircraft: AircraftRow,
}

impl TryFrom<FlightRow> for Flight {
    type Error = AppError;

    fn try_from(row: FlightRow) -> AppResult<Self> {
        Ok(Flight {
            status: parse_code("flight status", &row.flight_status)?,
            aircraft: Aircraft::try_from(row.aircraft)?,
            flight_number: row.flight_number,
            origin: row.origin,
            destination: row.destination,
            departure: row.departure,
            arrival: row.arrival,
            price: row.price,
            available_seats: row.available_seats,
        })
    }
}

fn select_flights() -> String {
    format!("SELECT {}{}", FLIGHT_COLUMNS, FROM_FLIGHTS)
}

fn into_flights(rows: Vec<FlightRow>) -> AppResult<Vec<Flight>> {
    rows.into_iter().map(Flight::try_from).collect()
}

#[async_trait]
impl Repository<Flight> for MySqlStore {
    async fn save(&self, flight: &Flight) -> AppResult<()> {
        let call = sqlx::query(
            "CALL sp_save_flight(?, ?, ?, ?, ?, ?, ?, ?, ?, @ok, @message)",
        )
        .bind(&flight.flight_number)
        .bind(&flight.origin)
        .bind(&flight.destination)
        .bind(flight.departure)
        .bind(flight.arrival)
        .bind(&flight.aircraft.serial_number)
        .bind(flight.price)
        .bind(flight.available_seats)
        .bind(flight.status.code());
        self.call_procedure("sp_save_flight", call).await
    }

    async fn find_by_key(&self, flight_number: &str) -> AppResult<Option<Flight>> {
        let row = sqlx::query_as::<_, FlightRow>(&format!(
            "{} WHERE f.flight_number = ?",
            select_flights()
        ))
        .bind(flight_number)
        .fetch_optional(&self.pool)
        .await?;
        row.map(Flight::try_from).transpose()
    }

    async fn list_all(&self) -> AppResult<Vec<Flight>> {
        let rows = sqlx::query_as::<_, FlightRow>(&format!(
            "{} ORDER BY f.departure, f.flight_number",
            select_flights()
        ))
        .fetch_all(&self.pool)
        .await?;
        into_flights(rows)
    }

    async fn find_by(&self, filter: &FlightFilter) -> AppResult<Vec<Flight>> {
        let mut query: QueryBuilder<MySql> = QueryBuilder::new(select_flights());
        match filter {
            FlightFilter::Origin(origin) => {
                query.push(" WHERE f.origin = ").push_bind(origin.as_str());
            }
            FlightFilter::Destination(destination) => {
                query
                    .push(" WHERE f.destination = ")
                    .push_bind(destination.as_str());
            }
            FlightFilter::Route {
                origin,
                destination,
            } => {
                query
                    .push(" WHERE f.origin = ")
                    .push_bind(origin.as_str())
                    .push(" AND f.destination = ")
                    .push_bind(destination.as_str());
            }
            FlightFilter::DepartureDate(date) => {
                query.push(" WHERE DATE(f.departure) = ").push_bind(*date);
            }
            FlightFilter::Aircraft(serial) => {
                query.push(" WHERE f.aircraft_serial = ").push_bind(serial.as_str());
            }
            FlightFilter::Available {
                origin,
                destination,
                date,
            } => {
                query
                    .push(" WHERE f.origin = ")
                    .push_bind(origin.as_str())
                    .push(" AND f.destination = ")
                    .push_bind(destination.as_str())
                    .push(" AND DATE(f.departure) = ")
                    .push_bind(*date)
                    .push(" AND f.status = ")
                    .push_bind(FlightStatus::Scheduled.code())
                    .push(" AND f.available_seats > 0");
            }
        }
        query.push(" ORDER BY f.departure, f.flight_number");

        let rows = query
            .build_query_as::<FlightRow>()
            .fetch_all(&self.pool)
            .await?;
        into_flights(rows)
    }

    async fn delete(&self, flight_number: &str) -> AppResult<bool> {
        if !Repository::<Flight>::exists(self, flight_number).await? {
            return Ok(false);
        }
        let call = sqlx::query("CALL sp_delete_flight(?, @ok, @message)").bind(flight_number);
        self.call_procedure("sp_delete_flight", call).await?;
        Ok(true)
    }

    async fn exists(&self, flight_number: &str) -> AppResult<bool> {
        self.count(
            "SELECT COUNT(*) FROM flights WHERE flight_number = ?",
            flight_number,
        )
        .await
    }
}
