use async_trait::async_trait;
use chrono::NaiveDateTime;
use sqlx::{FromRow, MySql, QueryBuilder};

use super::flight::{FlightRow, FLIGHT_COLUMNS};
use super::passenger::PassengerRow;
use super::{parse_code, MySqlStore};
use crate::models::flight::Flight;
use crate::models::person::Passenger;
use crate::models::reservation::{Reservation, ReservationFilter};
use crate::repositories::Repository;
use crate::utils::error::{AppError, AppResult};

const RESERVATION_COLUMNS: &str = "r.reservation_number, r.seat_number, r.created_at, \
     r.status AS reservation_status, \
     pa.dni, p.name, p.surname, p.email, p.phone, pa.birth_date, pa.nationality, pa.passport_number";

const FROM_RESERVATIONS: &str = " FROM reservations r \
     INNER JOIN passengers pa ON r.passenger_dni = pa.dni \
     INNER JOIN persons p ON pa.dni = p.dni \
     INNER JOIN flights f ON r.flight_number = f.flight_number \
     INNER JOIN aircraft a ON f.aircraft_serial = a.serial_number";

#[derive(Debug, FromRow)]
struct ReservationRow {
    reservation_number: String,
    seat_number: i32,
    created_at: NaiveDateTime,
    reservation_status: String,
    #[sqlx(flatten)]
    passenger: PassengerRow,
    #[sqlx(flatten)]
    flight: FlightRow,
}

impl TryFrom<ReservationRow> for Reservation {
    type Error = AppError;

    fn try_from(row: ReservationRow) -> AppResult<Self> {
        Ok(Reservation {
            status: parse_code("reservation status", &row.reservation_status)?,
            flight: Flight::try_from(row.flight)?,
            passenger: Passenger::from(row.passenger),
            reservation_number: row.reservation_number,
            seat_number: row.seat_number,
            created_at: row.created_at,
        })
    }
}

fn select_reservations() -> String {
    format!(
        "SELECT {}, {}{}",
        RESERVATION_COLUMNS, FLIGHT_COLUMNS, FROM_RESERVATIONS
    )
}

fn into_reservations(rows: Vec<ReservationRow>) -> AppResult<Vec<Reservation>> {
    rows.into_iter().map(Reservation::try_from).collect()
}

#[async_trait]
impl Repository<Reservation> for MySqlStore {
    async fn save(&self, reservation: &Reservation) -> AppResult<()> {
        let call = sqlx::query("CALL sp_save_reservation(?, ?, ?, ?, ?, ?, @ok, @message)")
            .bind(&reservation.reservation_number)
            .bind(&reservation.passenger.person.dni)
            .bind(&reservation.flight.flight_number)
            .bind(reservation.seat_number)
            .bind(reservation.created_at)
            .bind(reservation.status.code());
        self.call_procedure("sp_save_reservation", call).await
    }

    async fn find_by_key(&self, reservation_number: &str) -> AppResult<Option<Reservation>> {
        let row = sqlx::query_as::<_, ReservationRow>(&format!(
            "{} WHERE r.reservation_number = ?",
            select_reservations()
        ))
        .bind(reservation_number)
        .fetch_optional(&self.pool)
        .await?;
        row.map(Reservation::try_from).transpose()
    }

    async fn list_all(&self) -> AppResult<Vec<Reservation>> {
        let rows = sqlx::query_as::<_, ReservationRow>(&format!(
            "{} ORDER BY r.created_at, r.reservation_number",
            select_reservations()
        ))
        .fetch_all(&self.pool)
        .await?;
        into_reservations(rows)
    }

    async fn find_by(&self, filter: &ReservationFilter) -> AppResult<Vec<Reservation>> {
        let mut query: QueryBuilder<MySql> = QueryBuilder::new(select_reservations());
        match filter {
            ReservationFilter::Passenger(dni) => {
                query.push(" WHERE r.passenger_dni = ").push_bind(dni.as_str());
            }
            ReservationFilter::Flight(flight_number) => {
                query
                    .push(" WHERE r.flight_number = ")
                    .push_bind(flight_number.as_str());
            }
            ReservationFilter::Date(date) => {
                query.push(" WHERE DATE(r.created_at) = ").push_bind(*date);
            }
        }
        query.push(" ORDER BY r.created_at, r.reservation_number");

        let rows = query
            .build_query_as::<ReservationRow>()
            .fetch_all(&self.pool)
            .await?;
        into_reservations(rows)
    }

    async fn delete(&self, reservation_number: &str) -> AppResult<bool> {
        if !Repository::<Reservation>::exists(self, reservation_number).await? {
            return Ok(false);
        }
        let call = sqlx::query("CALL sp_delete_reservation(?, @ok, @message)")
            .bind(reservation_number);
        self.call_procedure("sp_delete_reservation", call).await?;
        Ok(true)
    }

    async fn exists(&self, reservation_number: &str) -> AppResult<bool> {
        self.count(
            "SELECT COUNT(*) FROM reservations WHERE reservation_number = ?",
            reservation_number,
        )
        .await
    }
}
