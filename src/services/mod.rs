use std::sync::Arc;

use crate::models::Entity;
use crate::repositories::{Repositories, Repository};
use crate::utils::error::{AppError, AppResult};
use crate::utils::validation::require_key;

pub mod aircraft_service;
pub mod employee_service;
pub mod flight_service;
pub mod passenger_service;
pub mod reservation_service;
pub mod user_service;

pub use aircraft_service::AircraftService;
pub use employee_service::EmployeeService;
pub use flight_service::FlightService;
pub use passenger_service::PassengerService;
pub use reservation_service::ReservationService;
pub use user_service::UserService;

/// Every use-case service, wired over one set of repositories.
#[derive(Clone)]
pub struct Services {
    pub aircraft: Arc<AircraftService>,
    pub employees: Arc<EmployeeService>,
    pub passengers: Arc<PassengerService>,
    pub flights: Arc<FlightService>,
    pub reservations: Arc<ReservationService>,
    pub users: Arc<UserService>,
}

impl Services {
    pub fn new(repositories: &Repositories) -> Self {
        Services {
            aircraft: Arc::new(AircraftService::new(
                repositories.aircraft.clone(),
                repositories.flights.clone(),
            )),
            employees: Arc::new(EmployeeService::new(repositories.employees.clone())),
            passengers: Arc::new(PassengerService::new(
                repositories.passengers.clone(),
                repositories.reservations.clone(),
            )),
            flights: Arc::new(FlightService::new(
                repositories.flights.clone(),
                repositories.aircraft.clone(),
                repositories.reservations.clone(),
            )),
            reservations: Arc::new(ReservationService::new(
                repositories.reservations.clone(),
                repositories.flights.clone(),
                repositories.passengers.clone(),
            )),
            users: Arc::new(UserService::new(
                repositories.users.clone(),
                repositories.employees.clone(),
            )),
        }
    }
}

pub(crate) fn not_found<T: Entity>(key: &str) -> AppError {
    AppError::NotFound(format!("{} '{}' does not exist", T::KIND, key))
}

/// Fails with `Conflict` when the key is already taken.
pub(crate) async fn ensure_new<T: Entity>(
    repository: &dyn Repository<T>,
    key: &str,
) -> AppResult<()> {
    if repository.exists(key).await? {
        return Err(AppError::Conflict(format!(
            "{} '{}' already exists",
            T::KIND,
            key
        )));
    }
    Ok(())
}

/// Looks a record up, turning absence into `NotFound`.
pub(crate) async fn find_existing<T: Entity>(
    repository: &dyn Repository<T>,
    key: &str,
) -> AppResult<T> {
    repository
        .find_by_key(key)
        .await?
        .ok_or_else(|| not_found::<T>(key))
}

/// Refuses to remove a record that other records still point at.
pub(crate) fn ensure_unreferenced<T: Entity>(key: &str, references: usize, what: &str) -> AppResult<()> {
    if references > 0 {
        return Err(AppError::Conflict(format!(
            "{} '{}' still has {} {}",
            T::KIND,
            key,
            references,
            what
        )));
    }
    Ok(())
}

/// Shared delete contract: blank key is a validation error, an unknown key is `NotFound`.
pub(crate) async fn delete_existing<T: Entity>(
    repository: &dyn Repository<T>,
    key: &str,
    blank_message: &str,
) -> AppResult<bool> {
    require_key(key, blank_message)?;
    if !repository.exists(key).await? {
        return Err(not_found::<T>(key));
    }
    let deleted = repository.delete(key).await?;
    tracing::info!(kind = T::KIND, key, deleted, "delete requested");
    Ok(deleted)
}
