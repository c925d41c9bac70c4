use chrono::NaiveDate;
use std::sync::Arc;
use validator::Validate;

use crate::models::aircraft::Aircraft;
use crate::models::flight::{Flight, FlightFilter, NewFlight};
use crate::models::reservation::{Reservation, ReservationFilter};
use crate::repositories::Repository;
use crate::services::{delete_existing, ensure_new, ensure_unreferenced, find_existing};
use crate::utils::error::AppResult;

pub struct FlightService {
    flights: Arc<dyn Repository<Flight>>,
    aircraft: Arc<dyn Repository<Aircraft>>,
    reservations: Arc<dyn Repository<Reservation>>,
}

impl FlightService {
    pub fn new(
        flights: Arc<dyn Repository<Flight>>,
        aircraft: Arc<dyn Repository<Aircraft>>,
        reservations: Arc<dyn Repository<Reservation>>,
    ) -> Self {
        FlightService {
            flights,
            aircraft,
            reservations,
        }
    }

    // Schedule a flight on a registered aircraft; every seat starts free
    pub async fn register_flight(&self, request: NewFlight) -> AppResult<Flight> {
        request.validate()?;
        ensure_new(self.flights.as_ref(), &request.flight_number).await?;
        let aircraft = find_existing(self.aircraft.as_ref(), &request.aircraft_serial).await?;

        let flight = Flight::new(
            request.flight_number,
            request.origin,
            request.destination,
            request.departure,
            request.arrival,
            aircraft,
            request.price,
        );
        self.flights.save(&flight).await?;
        tracing::info!(
            flight = %flight.flight_number,
            seats = flight.available_seats,
            "flight registered"
        );
        Ok(flight)
    }

    pub async fn find_flight(&self, flight_number: &str) -> AppResult<Option<Flight>> {
        self.flights.find_by_key(flight_number).await
    }

    pub async fn list_flights(&self) -> AppResult<Vec<Flight>> {
        self.flights.list_all().await
    }

    pub async fn find_flights_by_origin(&self, origin: &str) -> AppResult<Vec<Flight>> {
        self.flights
            .find_by(&FlightFilter::Origin(origin.to_string()))
            .await
    }

    pub async fn find_flights_by_destination(&self, destination: &str) -> AppResult<Vec<Flight>> {
        self.flights
            .find_by(&FlightFilter::Destination(destination.to_string()))
            .await
    }

    pub async fn find_flights_by_route(
        &self,
        origin: &str,
        destination: &str,
    ) -> AppResult<Vec<Flight>> {
        self.flights
            .find_by(&FlightFilter::Route {
                origin: origin.to_string(),
                destination: destination.to_string(),
            })
            .await
    }

    pub async fn find_flights_by_date(&self, date: NaiveDate) -> AppResult<Vec<Flight>> {
        self.flights.find_by(&FlightFilter::DepartureDate(date)).await
    }

    // Scheduled flights on the route that day with at least one free seat
    pub async fn search_available_flights(
        &self,
        origin: &str,
        destination: &str,
        date: NaiveDate,
    ) -> AppResult<Vec<Flight>> {
        self.flights
            .find_by(&FlightFilter::Available {
                origin: origin.to_string(),
                destination: destination.to_string(),
                date,
            })
            .await
    }

    /// A flight with reservations on record cannot be removed, cancelled ones included.
    pub async fn delete_flight(&self, flight_number: &str) -> AppResult<bool> {
        let reservations = self
            .reservations
            .find_by(&ReservationFilter::Flight(flight_number.to_string()))
            .await?;
        ensure_unreferenced::<Flight>(flight_number, reservations.len(), "reservations")?;
        delete_existing(self.flights.as_ref(), flight_number, "Flight number is required").await
    }
}
