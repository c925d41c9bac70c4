use std::io::Write;
use tokio::io::AsyncBufRead;

use super::{generate_reservation_number, table, Console};
use crate::models::aircraft::Aircraft;
use crate::models::flight::NewFlight;
use crate::models::person::{Employee, Passenger, PersonInfo};
use crate::models::reservation::NewReservation;
use crate::models::user::NewUser;
use crate::utils::error::AppResult;

impl<R, W> Console<R, W>
where
    R: AsyncBufRead + Unpin,
    W: Write,
{
    fn show_one<T>(&mut self, found: Option<T>, render: fn(&[T]) -> String) -> AppResult<()> {
        match found {
            Some(record) => self.prompt.say(render(&[record])),
            None => self.prompt.say("No matching record."),
        }
    }

    fn show_all<T>(&mut self, records: Vec<T>, render: fn(&[T]) -> String) -> AppResult<()> {
        if records.is_empty() {
            return self.prompt.say("No records found.");
        }
        self.prompt.say(render(&records))?;
        self.prompt.say(format!("{} record(s)", records.len()))
    }

    fn show_deleted(&mut self, deleted: bool) -> AppResult<()> {
        self.prompt.say(if deleted { "Deleted." } else { "Nothing was deleted." })
    }

    async fn person_info(&mut self) -> AppResult<PersonInfo> {
        Ok(PersonInfo {
            dni: self.prompt.text("DNI").await?,
            name: self.prompt.text("Name").await?,
            surname: self.prompt.text("Surname").await?,
            email: self.prompt.text("Email").await?,
            phone: self.prompt.text("Phone").await?,
        })
    }

    pub(super) async fn employees_menu(&mut self) -> AppResult<()> {
        let options = [
            "Register employee",
            "Find by DNI",
            "Find by employee number",
            "List all",
            "Filter by job title",
            "Delete",
        ];
        loop {
            let outcome = match self.prompt.menu("Employees", &options, "Back").await? {
                0 => return Ok(()),
                1 => self.register_employee().await,
                2 => async {
                    let dni = self.prompt.text("DNI").await?;
                    let found = self.services.employees.find_employee(&dni).await?;
                    self.show_one(found, table::employees)
                }
                .await,
                3 => async {
                    let number = self.prompt.text("Employee number").await?;
                    let found = self.services.employees.find_employee_by_number(&number).await?;
                    self.show_one(found, table::employees)
                }
                .await,
                4 => async {
                    let all = self.services.employees.list_employees().await?;
                    self.show_all(all, table::employees)
                }
                .await,
                5 => self.employees_by_job_title().await,
                _ => self.delete_employee().await,
            };
            self.settle(outcome)?;
        }
    }

    async fn register_employee(&mut self) -> AppResult<()> {
        let person = self.person_info().await?;
        let employee = Employee {
            person,
            employee_number: self.prompt.text("Employee number").await?,
            job_title: self.prompt.text("Job title").await?,
            hire_date: self.prompt.date("Hire date (YYYY-MM-DD)").await?,
            salary: self.prompt.decimal("Salary").await?,
        };
        let stored = self.services.employees.register_employee(employee).await?;
        self.prompt.say(format!("Employee {} registered.", stored.person.full_name()))
    }

    async fn employees_by_job_title(&mut self) -> AppResult<()> {
        let title = self.prompt.text("Job title").await?;
        let found = self.services.employees.find_employees_by_job_title(&title).await?;
        self.show_all(found, table::employees)
    }

    async fn delete_employee(&mut self) -> AppResult<()> {
        let dni = self.prompt.text("DNI").await?;
        let deleted = self.services.employees.delete_employee(&dni).await?;
        self.show_deleted(deleted)
    }

    pub(super) async fn users_menu(&mut self) -> AppResult<()> {
        let options = [
            "Register user",
            "Find by username",
            "List all",
            "Filter by role",
            "Delete",
        ];
        loop {
            let outcome = match self.prompt.menu("Users", &options, "Back").await? {
                0 => return Ok(()),
                1 => self.register_user().await,
                2 => async {
                    let username = self.prompt.text("Username").await?;
                    let found = self.services.users.find_user(&username).await?;
                    self.show_one(found, table::users)
                }
                .await,
                3 => async {
                    let all = self.services.users.list_users().await?;
                    self.show_all(all, table::users)
                }
                .await,
                4 => async {
                    let role = self.prompt.choice("Role").await?;
                    let found = self.services.users.find_users_by_role(role).await?;
                    self.show_all(found, table::users)
                }
                .await,
                _ => async {
                    let username = self.prompt.text("Username").await?;
                    let deleted = self.services.users.delete_user(&username).await?;
                    self.show_deleted(deleted)
                }
                .await,
            };
            self.settle(outcome)?;
        }
    }

    async fn register_user(&mut self) -> AppResult<()> {
        let request = NewUser {
            username: self.prompt.text("Username").await?,
            password: self.prompt.text("Password").await?,
            role: self.prompt.choice("Role").await?,
            employee_dni: self.prompt.text("Employee DNI").await?,
        };
        let user = self.services.users.register_user(request).await?;
        self.prompt.say(format!("User {} registered as {}.", user.username, user.role))
    }

    pub(super) async fn passengers_menu(&mut self) -> AppResult<()> {
        let options = [
            "Register passenger",
            "Find by DNI",
            "List all",
            "Filter by nationality",
            "Delete",
        ];
        loop {
            let outcome = match self.prompt.menu("Passengers", &options, "Back").await? {
                0 => return Ok(()),
                1 => self.register_passenger().await,
                2 => async {
                    let dni = self.prompt.text("DNI").await?;
                    let found = self.services.passengers.find_passenger(&dni).await?;
                    self.show_one(found, table::passengers)
                }
                .await,
                3 => async {
                    let all = self.services.passengers.list_passengers().await?;
                    self.show_all(all, table::passengers)
                }
                .await,
                4 => async {
                    let nationality = self.prompt.text("Nationality").await?;
                    let found = self
                        .services
                        .passengers
                        .find_passengers_by_nationality(&nationality)
                        .await?;
                    self.show_all(found, table::passengers)
                }
                .await,
                _ => async {
                    let dni = self.prompt.text("DNI").await?;
                    let deleted = self.services.passengers.delete_passenger(&dni).await?;
                    self.show_deleted(deleted)
                }
                .await,
            };
            self.settle(outcome)?;
        }
    }

    async fn register_passenger(&mut self) -> AppResult<()> {
        let person = self.person_info().await?;
        let passenger = Passenger {
            person,
            birth_date: self.prompt.date("Birth date (YYYY-MM-DD)").await?,
            nationality: self.prompt.text("Nationality").await?,
            passport_number: self.prompt.text("Passport number").await?,
        };
        let stored = self.services.passengers.register_passenger(passenger).await?;
        self.prompt.say(format!("Passenger {} registered.", stored.person.full_name()))
    }

    pub(super) async fn aircraft_menu(&mut self) -> AppResult<()> {
        let options = [
            "Register aircraft",
            "Find by serial number",
            "List all",
            "List available",
            "Delete",
        ];
        loop {
            let outcome = match self.prompt.menu("Aircraft", &options, "Back").await? {
                0 => return Ok(()),
                1 => self.register_aircraft().await,
                2 => async {
                    let serial = self.prompt.text("Serial number").await?;
                    let found = self.services.aircraft.find_aircraft(&serial).await?;
                    self.show_one(found, table::aircraft)
                }
                .await,
                3 => async {
                    let all = self.services.aircraft.list_aircraft().await?;
                    self.show_all(all, table::aircraft)
                }
                .await,
                4 => async {
                    let available = self.services.aircraft.list_available_aircraft().await?;
                    self.show_all(available, table::aircraft)
                }
                .await,
                _ => async {
                    let serial = self.prompt.text("Serial number").await?;
                    let deleted = self.services.aircraft.delete_aircraft(&serial).await?;
                    self.show_deleted(deleted)
                }
                .await,
            };
            self.settle(outcome)?;
        }
    }

    async fn register_aircraft(&mut self) -> AppResult<()> {
        let aircraft = Aircraft::new(
            self.prompt.text("Serial number").await?,
            self.prompt.text("Model").await?,
            self.prompt.text("Manufacturer").await?,
            self.prompt.integer("Passenger capacity").await?,
            self.prompt.integer("Cargo capacity (kg)").await?,
        );
        let stored = self.services.aircraft.register_aircraft(aircraft).await?;
        self.prompt.say(format!("Aircraft {} registered.", stored.serial_number))
    }

    pub(super) async fn flights_menu(&mut self) -> AppResult<()> {
        let options = [
            "Register flight",
            "Find by flight number",
            "List all",
            "Filter by origin",
            "Filter by destination",
            "Filter by route",
            "Filter by departure date",
            "Search available flights",
            "Delete",
        ];
        loop {
            let outcome = match self.prompt.menu("Flights", &options, "Back").await? {
                0 => return Ok(()),
                1 => self.register_flight().await,
                2 => async {
                    let number = self.prompt.text("Flight number").await?;
                    let found = self.services.flights.find_flight(&number).await?;
                    self.show_one(found, table::flights)
                }
                .await,
                3 => async {
                    let all = self.services.flights.list_flights().await?;
                    self.show_all(all, table::flights)
                }
                .await,
                4 => async {
                    let origin = self.prompt.text("Origin").await?;
                    let found = self.services.flights.find_flights_by_origin(&origin).await?;
                    self.show_all(found, table::flights)
                }
                .await,
                5 => async {
                    let destination = self.prompt.text("Destination").await?;
                    let found = self
                        .services
                        .flights
                        .find_flights_by_destination(&destination)
                        .await?;
                    self.show_all(found, table::flights)
                }
                .await,
                6 => async {
                    let origin = self.prompt.text("Origin").await?;
                    let destination = self.prompt.text("Destination").await?;
                    let found = self
                        .services
                        .flights
                        .find_flights_by_route(&origin, &destination)
                        .await?;
                    self.show_all(found, table::flights)
                }
                .await,
                7 => async {
                    let date = self.prompt.date("Departure date (YYYY-MM-DD)").await?;
                    let found = self.services.flights.find_flights_by_date(date).await?;
                    self.show_all(found, table::flights)
                }
                .await,
                8 => self.search_available_flights().await,
                _ => async {
                    let number = self.prompt.text("Flight number").await?;
                    let deleted = self.services.flights.delete_flight(&number).await?;
                    self.show_deleted(deleted)
                }
                .await,
            };
            self.settle(outcome)?;
        }
    }

    async fn register_flight(&mut self) -> AppResult<()> {
        let available = self.services.aircraft.list_available_aircraft().await?;
        if !available.is_empty() {
            self.prompt.say("Available aircraft:")?;
            self.prompt.say(table::aircraft(&available))?;
        }

        let request = NewFlight {
            flight_number: self.prompt.text("Flight number").await?,
            origin: self.prompt.text("Origin").await?,
            destination: self.prompt.text("Destination").await?,
            departure: self.prompt.datetime("Departure (YYYY-MM-DD HH:MM)").await?,
            arrival: self.prompt.datetime("Arrival (YYYY-MM-DD HH:MM)").await?,
            aircraft_serial: self.prompt.text("Aircraft serial number").await?,
            price: self.prompt.decimal("Price").await?,
        };
        let flight = self.services.flights.register_flight(request).await?;
        self.prompt.say(format!(
            "Flight {} registered with {} seats.",
            flight.flight_number, flight.available_seats
        ))
    }

    async fn search_available_flights(&mut self) -> AppResult<()> {
        let origin = self.prompt.text("Origin").await?;
        let destination = self.prompt.text("Destination").await?;
        let date = self.prompt.date("Departure date (YYYY-MM-DD)").await?;
        let found = self
            .services
            .flights
            .search_available_flights(&origin, &destination, date)
            .await?;
        self.show_all(found, table::flights)
    }

    pub(super) async fn reservations_menu(&mut self) -> AppResult<()> {
        let options = [
            "Create reservation",
            "Find by number",
            "List all",
            "Filter by passenger",
            "Filter by flight",
            "Filter by date",
            "Cancel reservation",
        ];
        loop {
            let outcome = match self.prompt.menu("Reservations", &options, "Back").await? {
                0 => return Ok(()),
                1 => self.create_reservation().await,
                2 => async {
                    let number = self.prompt.text("Reservation number").await?;
                    let found = self.services.reservations.find_reservation(&number).await?;
                    self.show_one(found, table::reservations)
                }
                .await,
                3 => async {
                    let all = self.services.reservations.list_reservations().await?;
                    self.show_all(all, table::reservations)
                }
                .await,
                4 => async {
                    let dni = self.prompt.text("Passenger DNI").await?;
                    let found = self
                        .services
                        .reservations
                        .find_reservations_by_passenger(&dni)
                        .await?;
                    self.show_all(found, table::reservations)
                }
                .await,
                5 => async {
                    let number = self.prompt.text("Flight number").await?;
                    let found = self
                        .services
                        .reservations
                        .find_reservations_by_flight(&number)
                        .await?;
                    self.show_all(found, table::reservations)
                }
                .await,
                6 => async {
                    let date = self.prompt.date("Date (YYYY-MM-DD)").await?;
                    let found = self
                        .services
                        .reservations
                        .find_reservations_by_date(date)
                        .await?;
                    self.show_all(found, table::reservations)
                }
                .await,
                _ => self.cancel_reservation().await,
            };
            self.settle(outcome)?;
        }
    }

    async fn create_reservation(&mut self) -> AppResult<()> {
        let mut reservation_number = self
            .prompt
            .text("Reservation number (blank to generate)")
            .await?;
        if reservation_number.is_empty() {
            reservation_number = generate_reservation_number();
        }

        let request = NewReservation {
            reservation_number,
            passenger_dni: self.prompt.text("Passenger DNI").await?,
            flight_number: self.prompt.text("Flight number").await?,
            seat_number: self.prompt.integer("Seat number").await?,
        };
        let reservation = self.services.reservations.create_reservation(request).await?;
        self.prompt.say(format!(
            "Reservation {} confirmed. Seats left on {}: {}.",
            reservation.reservation_number,
            reservation.flight.flight_number,
            reservation.flight.available_seats
        ))
    }

    async fn cancel_reservation(&mut self) -> AppResult<()> {
        let number = self.prompt.text("Reservation number").await?;
        let reservation = self.services.reservations.cancel_reservation(&number).await?;
        self.prompt.say(format!(
            "Reservation {} is {}.",
            reservation.reservation_number, reservation.status
        ))
    }
}
