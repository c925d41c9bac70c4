use chrono::NaiveDate;
use std::collections::HashMap;
use std::sync::Arc;
use validator::Validate;

use crate::models::flight::Flight;
use crate::models::person::Passenger;
use crate::models::reservation::{NewReservation, Reservation, ReservationFilter, ReservationStatus};
use crate::repositories::Repository;
use crate::services::{ensure_new, find_existing};
use crate::utils::error::{AppError, AppResult};
use crate::utils::validation::require_key;

/// Reservations and the seat inventory of their flights.
///
/// Each state change writes the flight first and the reservation second. When the
/// second write fails the seat change is undone and the flight written again, so the
/// seat count never drifts from the set of live reservations.
///
/// Reads carry the flight as it is stored now, not as it was when the reservation was
/// written.
pub struct ReservationService {
    reservations: Arc<dyn Repository<Reservation>>,
    flights: Arc<dyn Repository<Flight>>,
    passengers: Arc<dyn Repository<Passenger>>,
}

impl ReservationService {
    pub fn new(
        reservations: Arc<dyn Repository<Reservation>>,
        flights: Arc<dyn Repository<Flight>>,
        passengers: Arc<dyn Repository<Passenger>>,
    ) -> Self {
        ReservationService {
            reservations,
            flights,
            passengers,
        }
    }

    pub async fn create_reservation(&self, request: NewReservation) -> AppResult<Reservation> {
        request.validate()?;
        ensure_new(self.reservations.as_ref(), &request.reservation_number).await?;
        let passenger = find_existing(self.passengers.as_ref(), &request.passenger_dni).await?;
        let mut flight = find_existing(self.flights.as_ref(), &request.flight_number).await?;

        if !flight.reserve_seat() {
            return Err(AppError::Capacity(format!(
                "Flight '{}' has no available seats",
                flight.flight_number
            )));
        }
        self.flights.save(&flight).await?;

        let reservation = Reservation::new(
            request.reservation_number,
            passenger,
            flight.clone(),
            request.seat_number,
        );
        if let Err(err) = self.reservations.save(&reservation).await {
            tracing::warn!(
                reservation = %reservation.reservation_number,
                error = %err,
                "reservation not stored, releasing its seat"
            );
            flight.release_seat();
            self.restore_flight(&flight).await;
            return Err(err);
        }

        tracing::info!(
            reservation = %reservation.reservation_number,
            flight = %flight.flight_number,
            seats_left = flight.available_seats,
            "reservation created"
        );
        Ok(reservation)
    }

    /// Cancels a reservation and gives its seat back. Cancelling twice changes nothing.
    pub async fn cancel_reservation(&self, reservation_number: &str) -> AppResult<Reservation> {
        require_key(reservation_number, "Reservation number is required")?;
        let mut reservation = find_existing(self.reservations.as_ref(), reservation_number).await?;

        if reservation.is_cancelled() {
            tracing::info!(reservation = reservation_number, "already cancelled");
            return Ok(reservation);
        }

        // The stored flight, not the snapshot carried by the reservation
        let mut flight =
            find_existing(self.flights.as_ref(), &reservation.flight.flight_number).await?;
        flight.release_seat();
        self.flights.save(&flight).await?;

        reservation.status = ReservationStatus::Cancelled;
        reservation.flight = flight.clone();
        if let Err(err) = self.reservations.save(&reservation).await {
            tracing::warn!(
                reservation = reservation_number,
                error = %err,
                "cancellation not stored, taking the seat back"
            );
            flight.reserve_seat();
            self.restore_flight(&flight).await;
            return Err(err);
        }

        tracing::info!(
            reservation = reservation_number,
            flight = %flight.flight_number,
            seats_left = flight.available_seats,
            "reservation cancelled"
        );
        Ok(reservation)
    }

    pub async fn find_reservation(&self, reservation_number: &str) -> AppResult<Option<Reservation>> {
        match self.reservations.find_by_key(reservation_number).await? {
            Some(reservation) => Ok(self.current(vec![reservation]).await?.pop()),
            None => Ok(None),
        }
    }

    pub async fn list_reservations(&self) -> AppResult<Vec<Reservation>> {
        let reservations = self.reservations.list_all().await?;
        self.current(reservations).await
    }

    pub async fn find_reservations_by_passenger(&self, dni: &str) -> AppResult<Vec<Reservation>> {
        let reservations = self
            .reservations
            .find_by(&ReservationFilter::Passenger(dni.to_string()))
            .await?;
        self.current(reservations).await
    }

    pub async fn find_reservations_by_flight(
        &self,
        flight_number: &str,
    ) -> AppResult<Vec<Reservation>> {
        let reservations = self
            .reservations
            .find_by(&ReservationFilter::Flight(flight_number.to_string()))
            .await?;
        self.current(reservations).await
    }

    pub async fn find_reservations_by_date(&self, date: NaiveDate) -> AppResult<Vec<Reservation>> {
        let reservations = self
            .reservations
            .find_by(&ReservationFilter::Date(date))
            .await?;
        self.current(reservations).await
    }

    // Swap each flight snapshot for the stored flight, one lookup per flight number
    async fn current(&self, mut reservations: Vec<Reservation>) -> AppResult<Vec<Reservation>> {
        let mut flights: HashMap<String, Option<Flight>> = HashMap::new();
        for reservation in &mut reservations {
            let number = reservation.flight.flight_number.clone();
            if !flights.contains_key(&number) {
                let stored = self.flights.find_by_key(&number).await?;
                flights.insert(number.clone(), stored);
            }
            if let Some(Some(flight)) = flights.get(&number) {
                reservation.flight = flight.clone();
            }
        }
        Ok(reservations)
    }

    // Compensating write; the original error is what the caller sees
    async fn restore_flight(&self, flight: &Flight) {
        if let Err(err) = self.flights.save(flight).await {
            tracing::error!(
                flight = %flight.flight_number,
                error = %err,
                "could not restore seat count"
            );
        }
    }
}
