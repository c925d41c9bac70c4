use std::sync::Arc;
use validator::Validate;

use crate::models::aircraft::{Aircraft, AircraftFilter, AircraftStatus};
use crate::models::flight::{Flight, FlightFilter};
use crate::repositories::Repository;
use crate::services::{delete_existing, ensure_new, ensure_unreferenced};
use crate::utils::error::AppResult;

pub struct AircraftService {
    aircraft: Arc<dyn Repository<Aircraft>>,
    flights: Arc<dyn Repository<Flight>>,
}

impl AircraftService {
    pub fn new(aircraft: Arc<dyn Repository<Aircraft>>, flights: Arc<dyn Repository<Flight>>) -> Self {
        AircraftService { aircraft, flights }
    }

    pub async fn register_aircraft(&self, aircraft: Aircraft) -> AppResult<Aircraft> {
        aircraft.validate()?;
        ensure_new(self.aircraft.as_ref(), &aircraft.serial_number).await?;

        self.aircraft.save(&aircraft).await?;
        tracing::info!(serial = %aircraft.serial_number, "aircraft registered");
        Ok(aircraft)
    }

    pub async fn find_aircraft(&self, serial_number: &str) -> AppResult<Option<Aircraft>> {
        self.aircraft.find_by_key(serial_number).await
    }

    pub async fn list_aircraft(&self) -> AppResult<Vec<Aircraft>> {
        self.aircraft.list_all().await
    }

    pub async fn list_available_aircraft(&self) -> AppResult<Vec<Aircraft>> {
        self.aircraft
            .find_by(&AircraftFilter::Status(AircraftStatus::Available))
            .await
    }

    /// Aircraft still assigned to flights stay.
    pub async fn delete_aircraft(&self, serial_number: &str) -> AppResult<bool> {
        let flights = self
            .flights
            .find_by(&FlightFilter::Aircraft(serial_number.to_string()))
            .await?;
        ensure_unreferenced::<Aircraft>(serial_number, flights.len(), "assigned flights")?;
        delete_existing(
            self.aircraft.as_ref(),
            serial_number,
            "Aircraft serial number is required",
        )
        .await
    }
}
