use chrono::{NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use strum_macros::{EnumIter, EnumString, IntoStaticStr};
use validator::Validate;

use crate::models::aircraft::Aircraft;
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
pub enum FlightStatus {
    #[default]
    Scheduled,
    Boarding,
    InFlight,
    Completed,
    Cancelled,
}

impl FlightStatus {
    pub fn code(self) -> &'static str {
        self.into()
    }

    pub fn description(self) -> &'static str {
        match self {
            FlightStatus::Scheduled => "Scheduled",
            FlightStatus::Boarding => "Boarding",
            FlightStatus::InFlight => "In Flight",
            FlightStatus::Completed => "Completed",
            FlightStatus::Cancelled => "Cancelled",
        }
    }
}

impl fmt::Display for FlightStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.description())
    }
}

/// A scheduled flight and its seat inventory.
///
/// `available_seats` starts at the aircraft's passenger capacity and is only moved by
/// [`Flight::reserve_seat`] and [`Flight::release_seat`]; it never leaves
/// `0..=capacity`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Flight {
    pub flight_number: String,
    pub origin: String,
    pub destination: String,
    pub departure: NaiveDateTime,
    pub arrival: NaiveDateTime,
    pub aircraft: Aircraft,
    pub price: Decimal,
    pub available_seats: i32,
    pub status: FlightStatus,
}

impl Flight {
    pub fn new(
        flight_number: impl Into<String>,
        origin: impl Into<String>,
        destination: impl Into<String>,
        departure: NaiveDateTime,
        arrival: NaiveDateTime,
        aircraft: Aircraft,
        price: Decimal,
    ) -> Self {
        let available_seats = aircraft.passenger_capacity.max(0);
        Flight {
            flight_number: flight_number.into(),
            origin: origin.into(),
            destination: destination.into(),
            departure,
            arrival,
            aircraft,
            price,
            available_seats,
            status: FlightStatus::Scheduled,
        }
    }

    pub fn capacity(&self) -> i32 {
        self.aircraft.passenger_capacity.max(0)
    }

    pub fn has_available_seats(&self) -> bool {
        self.available_seats > 0
    }

    /// Takes one seat. Returns false when the flight is full.
    pub fn reserve_seat(&mut self) -> bool {
        if self.available_seats > 0 {
            self.available_seats -= 1;
            true
        } else {
            false
        }
    }

    /// Gives one seat back. Returns false when the flight is already empty.
    pub fn release_seat(&mut self) -> bool {
        if self.available_seats < self.capacity() {
            self.available_seats += 1;
            true
        } else {
            false
        }
    }
}

/// Input for registering a flight; the aircraft is referenced by serial number.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct NewFlight {
    #[validate(custom(function = "not_blank", message = "Flight number is required"))]
    pub flight_number: String,
    pub origin: String,
    pub destination: String,
    pub departure: NaiveDateTime,
    pub arrival: NaiveDateTime,
    #[validate(custom(function = "not_blank", message = "Flight must have an aircraft assigned"))]
    pub aircraft_serial: String,
    pub price: Decimal,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FlightFilter {
    Origin(String),
    Destination(String),
    Route {
        origin: String,
        destination: String,
    },
    DepartureDate(NaiveDate),
    Aircraft(String),
    // Bookable flights: same route and day, still scheduled, seats left
    Available {
        origin: String,
        destination: String,
        date: NaiveDate,
    },
}

impl Entity for Flight {
    type Filter = FlightFilter;
    const KIND: &'static str = "flight";

    fn key(&self) -> &str {
        &self.flight_number
    }

    fn matches(&self, filter: &FlightFilter) -> bool {
        match filter {
            FlightFilter::Origin(origin) => self.origin.eq_ignore_ascii_case(origin),
            FlightFilter::Destination(destination) => {
                self.destination.eq_ignore_ascii_case(destination)
            }
            FlightFilter::Route {
                origin,
                destination,
            } => {
                self.origin.eq_ignore_ascii_case(origin)
                    && self.destination.eq_ignore_ascii_case(destination)
            }
            FlightFilter::DepartureDate(date) => self.departure.date() == *date,
            FlightFilter::Aircraft(serial) => self.aircraft.serial_number == *serial,
            FlightFilter::Available {
                origin,
                destination,
                date,
            } => {
                self.origin.eq_ignore_ascii_case(origin)
                    && self.destination.eq_ignore_ascii_case(destination)
                    && self.departure.date() == *date
                    && self.status == FlightStatus::Scheduled
                    && self.has_available_seats()
            }
        }
    }
}
