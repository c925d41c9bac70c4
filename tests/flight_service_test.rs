use async_trait::async_trait;
use test_context::{test_context, AsyncTestContext};

use flight_management_system::models::flight::{Flight, FlightStatus};
use flight_management_system::repositories::{Repositories, Repository};
use flight_management_system::services::Services;
use flight_management_system::utils::error::AppError;

mod common {
    pub mod fixtures;
}
use common::fixtures::{self, at, date};

struct FlightServiceContext {
    repositories: Repositories,
    services: Services,
}

#[async_trait]
impl AsyncTestContext for FlightServiceContext {
    async fn setup() -> Self {
        let repositories = Repositories::in_memory();
        let services = Services::new(&repositories);
        services
            .aircraft
            .register_aircraft(fixtures::aircraft("AC-100", 3))
            .await
            .expect("Failed to register test aircraft");
        FlightServiceContext {
            repositories,
            services,
        }
    }

    async fn teardown(self) {}
}

impl FlightServiceContext {
    // Helper method to create test flight data
    async fn create_test_flight(
        &self,
        number: &str,
        origin: &str,
        destination: &str,
        day: u32,
    ) -> Result<(), AppError> {
        let mut request = fixtures::new_flight(number, origin, destination, "AC-100");
        request.departure = at(date(2025, 6, day), 10, 0);
        request.arrival = at(date(2025, 6, day), 12, 0);
        self.services.flights.register_flight(request).await?;
        Ok(())
    }
}

#[test_context(FlightServiceContext)]
#[tokio::test]
async fn test_register_flight_starts_with_full_capacity(
    ctx: &FlightServiceContext,
) -> Result<(), AppError> {
    let flight = ctx
        .services
        .flights
        .register_flight(fixtures::new_flight("FL-1", "Lima", "Cusco", "AC-100"))
        .await?;

    assert_eq!(flight.available_seats, 3);
    assert_eq!(flight.capacity(), 3);
    assert_eq!(flight.status, FlightStatus::Scheduled);
    assert_eq!(flight.aircraft.serial_number, "AC-100");
    assert_eq!(ctx.services.flights.find_flight("FL-1").await?, Some(flight));
    Ok(())
}

#[test_context(FlightServiceContext)]
#[tokio::test]
async fn test_register_flight_errors(ctx: &FlightServiceContext) -> Result<(), AppError> {
    let flights = &ctx.services.flights;

    let no_aircraft = flights
        .register_flight(fixtures::new_flight("FL-1", "Lima", "Cusco", ""))
        .await;
    assert_eq!(
        no_aircraft,
        Err(AppError::ValidationError(
            "Flight must have an aircraft assigned".into()
        ))
    );

    let blank_number = flights
        .register_flight(fixtures::new_flight(" ", "Lima", "Cusco", "AC-100"))
        .await;
    assert_eq!(
        blank_number,
        Err(AppError::ValidationError("Flight number is required".into()))
    );

    let unknown_aircraft = flights
        .register_flight(fixtures::new_flight("FL-1", "Lima", "Cusco", "AC-404"))
        .await;
    assert!(matches!(unknown_aircraft, Err(AppError::NotFound(_))));

    flights
        .register_flight(fixtures::new_flight("FL-1", "Lima", "Cusco", "AC-100"))
        .await?;
    let duplicate = flights
        .register_flight(fixtures::new_flight("FL-1", "Lima", "Arequipa", "AC-100"))
        .await;
    assert!(matches!(duplicate, Err(AppError::Conflict(_))));
    assert_eq!(flights.find_flight("FL-1").await?.unwrap().destination, "Cusco");
    Ok(())
}

#[test_context(FlightServiceContext)]
#[tokio::test]
async fn test_search_by_origin_destination_route_and_date(
    ctx: &FlightServiceContext,
) -> Result<(), AppError> {
    ctx.create_test_flight("FL-1", "Lima", "Cusco", 1).await?;
    ctx.create_test_flight("FL-2", "Lima", "Arequipa", 1).await?;
    ctx.create_test_flight("FL-3", "Cusco", "Lima", 2).await?;

    let flights = &ctx.services.flights;
    let numbers = |found: Vec<Flight>| {
        found
            .into_iter()
            .map(|f| f.flight_number)
            .collect::<Vec<_>>()
    };

    assert_eq!(numbers(flights.find_flights_by_origin("Lima").await?), ["FL-1", "FL-2"]);
    assert_eq!(numbers(flights.find_flights_by_destination("lima").await?), ["FL-3"]);
    assert_eq!(
        numbers(flights.find_flights_by_route("Lima", "Cusco").await?),
        ["FL-1"]
    );
    assert_eq!(
        numbers(flights.find_flights_by_date(date(2025, 6, 2)).await?),
        ["FL-3"]
    );
    assert!(flights.find_flights_by_origin("Tacna").await?.is_empty());
    Ok(())
}

#[test_context(FlightServiceContext)]
#[tokio::test]
async fn test_search_available_skips_full_and_unscheduled_flights(
    ctx: &FlightServiceContext,
) -> Result<(), AppError> {
    ctx.create_test_flight("FL-1", "Lima", "Cusco", 1).await?;
    ctx.create_test_flight("FL-2", "Lima", "Cusco", 1).await?;
    ctx.create_test_flight("FL-3", "Lima", "Cusco", 1).await?;
    ctx.create_test_flight("FL-4", "Lima", "Cusco", 2).await?;

    // Full flight
    let mut full = ctx.services.flights.find_flight("FL-2").await?.unwrap();
    full.available_seats = 0;
    ctx.repositories.flights.save(&full).await?;

    // Departed flight
    let mut boarding = ctx.services.flights.find_flight("FL-3").await?.unwrap();
    boarding.status = FlightStatus::Boarding;
    ctx.repositories.flights.save(&boarding).await?;

    let available = ctx
        .services
        .flights
        .search_available_flights("Lima", "Cusco", date(2025, 6, 1))
        .await?;
    assert_eq!(available.len(), 1);
    assert_eq!(available[0].flight_number, "FL-1");
    Ok(())
}

#[test_context(FlightServiceContext)]
#[tokio::test]
async fn test_delete_flight(ctx: &FlightServiceContext) -> Result<(), AppError> {
    ctx.create_test_flight("FL-1", "Lima", "Cusco", 1).await?;

    assert!(matches!(
        ctx.services.flights.delete_flight("FL-9").await,
        Err(AppError::NotFound(_))
    ));
    assert!(ctx.services.flights.delete_flight("FL-1").await?);
    assert!(ctx.services.flights.list_flights().await?.is_empty());
    Ok(())
}
