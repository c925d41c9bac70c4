use std::sync::Arc;
use validator::Validate;

use crate::models::person::{Passenger, PassengerFilter};
use crate::models::reservation::{Reservation, ReservationFilter};
use crate::repositories::Repository;
use crate::services::{delete_existing, ensure_new, ensure_unreferenced};
use crate::utils::error::AppResult;

pub struct PassengerService {
    passengers: Arc<dyn Repository<Passenger>>,
    reservations: Arc<dyn Repository<Reservation>>,
}

impl PassengerService {
    pub fn new(
        passengers: Arc<dyn Repository<Passenger>>,
        reservations: Arc<dyn Repository<Reservation>>,
    ) -> Self {
        PassengerService {
            passengers,
            reservations,
        }
    }

    pub async fn register_passenger(&self, passenger: Passenger) -> AppResult<Passenger> {
        passenger.validate()?;
        ensure_new(self.passengers.as_ref(), &passenger.person.dni).await?;

        self.passengers.save(&passenger).await?;
        tracing::info!(dni = %passenger.person.dni, "passenger registered");
        Ok(passenger)
    }

    pub async fn find_passenger(&self, dni: &str) -> AppResult<Option<Passenger>> {
        self.passengers.find_by_key(dni).await
    }

    pub async fn list_passengers(&self) -> AppResult<Vec<Passenger>> {
        self.passengers.list_all().await
    }

    pub async fn find_passengers_by_nationality(
        &self,
        nationality: &str,
    ) -> AppResult<Vec<Passenger>> {
        self.passengers
            .find_by(&PassengerFilter::Nationality(nationality.to_string()))
            .await
    }

    // Cancelled reservations still count; they keep the passenger on record
    pub async fn delete_passenger(&self, dni: &str) -> AppResult<bool> {
        let reservations = self
            .reservations
            .find_by(&ReservationFilter::Passenger(dni.to_string()))
            .await?;
        ensure_unreferenced::<Passenger>(dni, reservations.len(), "reservations")?;
        delete_existing(
            self.passengers.as_ref(),
            dni,
            "National ID (DNI) is required",
        )
        .await
    }
}
