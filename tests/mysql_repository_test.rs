use async_trait::async_trait;
use ctor::dtor;
use test_context::{test_context, AsyncTestContext};

use flight_management_system::models::aircraft::{Aircraft, AircraftFilter, AircraftStatus};
use flight_management_system::models::flight::{Flight, FlightFilter};
use flight_management_system::models::person::{Employee, EmployeeFilter, Passenger};
use flight_management_system::models::reservation::{Reservation, ReservationFilter, ReservationStatus};
use flight_management_system::models::user::{Role, User, UserFilter};
use flight_management_system::repositories::{MySqlStore, Repositories, Repository};
use flight_management_system::services::Services;
use flight_management_system::utils::error::AppError;

mod common {
    pub mod fixtures;
    pub mod test_utils;
}
use common::fixtures::{self, date};
use common::test_utils::TestDb;

#[dtor]
fn cleanup() {
    if let Err(e) = TestDb::cleanup_database_sync() {
        eprintln!("Failed to cleanup test database: {}", e);
    }
}

struct MySqlContext {
    // None when no MySQL server is configured
    store: Option<MySqlStore>,
}

#[async_trait]
impl AsyncTestContext for MySqlContext {
    async fn setup() -> Self {
        let pool = TestDb::get_instance(file!())
            .await
            .expect("Failed to get test database instance");
        MySqlContext {
            store: pool.map(MySqlStore::from_pool),
        }
    }

    async fn teardown(self) {
        if let Some(store) = self.store {
            store.pool().close().await;
        }
    }
}

fn flight_on(aircraft: Aircraft, number: &str) -> Flight {
    let request = fixtures::new_flight(number, "Lima", "Cusco", &aircraft.serial_number);
    Flight::new(
        request.flight_number,
        request.origin,
        request.destination,
        request.departure,
        request.arrival,
        aircraft,
        request.price,
    )
}

#[test_context(MySqlContext)]
#[tokio::test]
async fn test_aircraft_round_trip(ctx: &MySqlContext) -> Result<(), AppError> {
    let Some(store) = &ctx.store else { return Ok(()) };

    let mut aircraft = fixtures::aircraft("MY-AC-1", 150);
    Repository::<Aircraft>::save(store, &aircraft).await?;
    assert_eq!(
        Repository::<Aircraft>::find_by_key(store, "MY-AC-1").await?,
        Some(aircraft.clone())
    );

    // save is an upsert
    aircraft.status = AircraftStatus::OutOfService;
    Repository::<Aircraft>::save(store, &aircraft).await?;
    let grounded = Repository::<Aircraft>::find_by(
        store,
        &AircraftFilter::Status(AircraftStatus::OutOfService),
    )
    .await?;
    assert!(grounded.contains(&aircraft));

    assert!(Repository::<Aircraft>::delete(store, "MY-AC-1").await?);
    assert!(!Repository::<Aircraft>::delete(store, "MY-AC-1").await?);
    assert!(!Repository::<Aircraft>::exists(store, "MY-AC-1").await?);
    Ok(())
}

#[test_context(MySqlContext)]
#[tokio::test]
async fn test_employee_soft_delete(ctx: &MySqlContext) -> Result<(), AppError> {
    let Some(store) = &ctx.store else { return Ok(()) };

    let employee = fixtures::employee("61000001", "MY-EMP-1", "Dispatcher");
    Repository::<Employee>::save(store, &employee).await?;
    assert_eq!(
        Repository::<Employee>::find_by_key(store, "61000001").await?,
        Some(employee.clone())
    );
    let by_number =
        Repository::<Employee>::find_by(store, &EmployeeFilter::EmployeeNumber("MY-EMP-1".into()))
            .await?;
    assert_eq!(by_number, vec![employee.clone()]);

    assert!(Repository::<Employee>::delete(store, "61000001").await?);
    assert_eq!(Repository::<Employee>::find_by_key(store, "61000001").await?, None);
    assert!(!Repository::<Employee>::exists(store, "61000001").await?);

    // Saving again brings the row back
    Repository::<Employee>::save(store, &employee).await?;
    assert!(Repository::<Employee>::exists(store, "61000001").await?);
    Ok(())
}

#[test_context(MySqlContext)]
#[tokio::test]
async fn test_flight_and_reservation_round_trip(ctx: &MySqlContext) -> Result<(), AppError> {
    let Some(store) = &ctx.store else { return Ok(()) };

    let aircraft = fixtures::aircraft("MY-AC-2", 4);
    Repository::<Aircraft>::save(store, &aircraft).await?;
    let passenger = fixtures::passenger("62000001", "Peruvian");
    Repository::<Passenger>::save(store, &passenger).await?;

    let mut flight = flight_on(aircraft, "MY-FL-2");
    Repository::<Flight>::save(store, &flight).await?;
    assert_eq!(
        Repository::<Flight>::find_by_key(store, "MY-FL-2").await?,
        Some(flight.clone())
    );

    let available = Repository::<Flight>::find_by(
        store,
        &FlightFilter::Available {
            origin: "Lima".into(),
            destination: "Cusco".into(),
            date: date(2025, 6, 1),
        },
    )
    .await?;
    assert!(available.iter().any(|f| f.flight_number == "MY-FL-2"));

    flight.reserve_seat();
    Repository::<Flight>::save(store, &flight).await?;
    let reservation = Reservation::new("MY-R-1", passenger, flight, 1);
    Repository::<Reservation>::save(store, &reservation).await?;

    let stored = Repository::<Reservation>::find_by_key(store, "MY-R-1").await?;
    assert_eq!(stored, Some(reservation.clone()));
    let by_flight =
        Repository::<Reservation>::find_by(store, &ReservationFilter::Flight("MY-FL-2".into()))
            .await?;
    assert_eq!(by_flight, vec![reservation]);
    Ok(())
}

#[test_context(MySqlContext)]
#[tokio::test]
async fn test_procedures_refuse_broken_references(ctx: &MySqlContext) -> Result<(), AppError> {
    let Some(store) = &ctx.store else { return Ok(()) };

    let orphan = flight_on(fixtures::aircraft("MY-AC-404", 4), "MY-FL-404");
    let result = Repository::<Flight>::save(store, &orphan).await;
    assert!(matches!(result, Err(AppError::DatabaseError(_))));
    assert!(!Repository::<Flight>::exists(store, "MY-FL-404").await?);

    // An aircraft still flying a route cannot be removed
    let aircraft = fixtures::aircraft("MY-AC-3", 4);
    Repository::<Aircraft>::save(store, &aircraft).await?;
    Repository::<Flight>::save(store, &flight_on(aircraft, "MY-FL-3")).await?;
    let result = Repository::<Aircraft>::delete(store, "MY-AC-3").await;
    assert!(matches!(result, Err(AppError::DatabaseError(_))));
    assert!(Repository::<Aircraft>::exists(store, "MY-AC-3").await?);
    Ok(())
}

#[test_context(MySqlContext)]
#[tokio::test]
async fn test_users_follow_their_employee(ctx: &MySqlContext) -> Result<(), AppError> {
    let Some(store) = &ctx.store else { return Ok(()) };

    let employee = fixtures::employee("63000001", "MY-EMP-3", "Agent");
    Repository::<Employee>::save(store, &employee).await?;
    let user = User {
        username: "my.agent".into(),
        password: "s3cret".into(),
        role: Role::Operator,
        employee,
    };
    Repository::<User>::save(store, &user).await?;
    assert_eq!(Repository::<User>::find_by_key(store, "my.agent").await?, Some(user.clone()));
    let operators = Repository::<User>::find_by(store, &UserFilter::Role(Role::Operator)).await?;
    assert!(operators.contains(&user));

    // Deactivating the employee hides the account
    Repository::<Employee>::delete(store, "63000001").await?;
    assert_eq!(Repository::<User>::find_by_key(store, "my.agent").await?, None);
    Ok(())
}

#[test_context(MySqlContext)]
#[tokio::test]
async fn test_booking_scenario_against_mysql(ctx: &MySqlContext) -> Result<(), AppError> {
    let Some(store) = &ctx.store else { return Ok(()) };

    let services = Services::new(&Repositories::mysql(store.clone()));
    services
        .aircraft
        .register_aircraft(fixtures::aircraft("MY-AC-4", 1))
        .await?;
    services
        .flights
        .register_flight(fixtures::new_flight("MY-FL-4", "Lima", "Cusco", "MY-AC-4"))
        .await?;
    services
        .passengers
        .register_passenger(fixtures::passenger("64000001", "Peruvian"))
        .await?;

    let booked = services
        .reservations
        .create_reservation(fixtures::new_reservation("MY-R-4", "64000001", "MY-FL-4", 1))
        .await?;
    assert_eq!(booked.flight.available_seats, 0);

    let full = services
        .reservations
        .create_reservation(fixtures::new_reservation("MY-R-5", "64000001", "MY-FL-4", 2))
        .await;
    assert!(matches!(full, Err(AppError::Capacity(_))));

    let cancelled = services.reservations.cancel_reservation("MY-R-4").await?;
    assert_eq!(cancelled.status, ReservationStatus::Cancelled);
    let flight = services.flights.find_flight("MY-FL-4").await?.unwrap();
    assert_eq!(flight.available_seats, 1);
    Ok(())
}
