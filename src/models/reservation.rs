use chrono::{Local, NaiveDate, NaiveDateTime, SubsecRound};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use strum_macros::{EnumIter, EnumString, IntoStaticStr};
use validator::Validate;

use crate::models::flight::Flight;
use crate::models::person::Passenger;
use crate::models::Entity;
use crate::utils::validation::not_blank;

#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    EnumString,
    IntoStaticStr,
    EnumIter,
)]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ReservationStatus {
    #[default]
    Confirmed,
    Pending,
    Cancelled,
    Completed,
}

impl ReservationStatus {
    pub fn code(self) -> &'static str {
        self.into()
    }

    pub fn description(self) -> &'static str {
        match self {
            ReservationStatus::Confirmed => "Confirmed",
            ReservationStatus::Pending => "Pending",
            ReservationStatus::Cancelled => "Cancelled",
            ReservationStatus::Completed => "Completed",
        }
    }
}

impl fmt::Display for ReservationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.description())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reservation {
    pub reservation_number: String,
    pub passenger: Passenger,
    // Services refresh this from the stored flight on every read
    pub flight: Flight,
    pub seat_number: i32,
    pub created_at: NaiveDateTime,
    pub status: ReservationStatus,
}

impl Reservation {
    pub fn new(
        reservation_number: impl Into<String>,
        passenger: Passenger,
        flight: Flight,
        seat_number: i32,
    ) -> Self {
        Reservation {
            reservation_number: reservation_number.into(),
            passenger,
            flight,
            seat_number,
            // DATETIME columns keep whole seconds only
            created_at: Local::now().naive_local().trunc_subsecs(0),
            status: ReservationStatus::Confirmed,
        }
    }

    pub fn is_cancelled(&self) -> bool {
        self.status == ReservationStatus::Cancelled
    }

    pub fn total(&self) -> Decimal {
        self.flight.price
    }
}

/// Booking request: passenger and flight are referenced by key and resolved by the
/// reservation service.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct NewReservation {
    #[validate(custom(function = "not_blank", message = "Reservation number is required"))]
    pub reservation_number: String,
    #[validate(custom(function = "not_blank", message = "Reservation must have a passenger"))]
    pub passenger_dni: String,
    #[validate(custom(function = "not_blank", message = "Reservation must have a flight"))]
    pub flight_number: String,
    #[validate(range(min = 1, message = "Seat number must be positive"))]
    pub seat_number: i32,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReservationFilter {
    Passenger(String),
    Flight(String),
    Date(NaiveDate),
}

impl Entity for Reservation {
    type Filter = ReservationFilter;
    const KIND: &'static str = "reservation";

    fn key(&self) -> &str {
        &self.reservation_number
    }

    fn matches(&self, filter: &ReservationFilter) -> bool {
        match filter {
            ReservationFilter::Passenger(dni) => self.passenger.person.dni == *dni,
            ReservationFilter::Flight(number) => self.flight.flight_number == *number,
            ReservationFilter::Date(date) => self.created_at.date() == *date,
        }
    }
}
