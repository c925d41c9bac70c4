use comfy_table::{presets::UTF8_FULL, ContentArrangement, Table};
use rust_decimal::Decimal;

use crate::console::input::{DATETIME_FORMAT, DATE_FORMAT};
use crate::models::aircraft::Aircraft;
use crate::models::flight::Flight;
use crate::models::person::{Employee, Passenger};
use crate::models::reservation::Reservation;
use crate::models::user::User;

fn table(header: Vec<&str>) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(header);
    table
}

pub fn format_money(amount: Decimal) -> String {
    format!("${:.2}", amount)
}

pub fn aircraft(records: &[Aircraft]) -> String {
    let mut table = table(vec![
        "Serial", "Model", "Manufacturer", "Passengers", "Cargo (kg)", "Status",
    ]);
    for aircraft in records {
        table.add_row(vec![
            aircraft.serial_number.clone(),
            aircraft.model.clone(),
            aircraft.manufacturer.clone(),
            aircraft.passenger_capacity.to_string(),
            aircraft.cargo_capacity.to_string(),
            aircraft.status.to_string(),
        ]);
    }
    table.to_string()
}

pub fn employees(records: &[Employee]) -> String {
    let mut table = table(vec![
        "DNI", "Name", "Email", "Phone", "Number", "Job title", "Hired", "Salary",
    ]);
    for employee in records {
        table.add_row(vec![
            employee.person.dni.clone(),
            employee.person.full_name(),
            employee.person.email.clone(),
            employee.person.phone.clone(),
            employee.employee_number.clone(),
            employee.job_title.clone(),
            employee.hire_date.format(DATE_FORMAT).to_string(),
            format_money(employee.salary),
        ]);
    }
    table.to_string()
}

pub fn passengers(records: &[Passenger]) -> String {
    let mut table = table(vec![
        "DNI", "Name", "Email", "Phone", "Born", "Nationality", "Passport",
    ]);
    for passenger in records {
        table.add_row(vec![
            passenger.person.dni.clone(),
            passenger.person.full_name(),
            passenger.person.email.clone(),
            passenger.person.phone.clone(),
            passenger.birth_date.format(DATE_FORMAT).to_string(),
            passenger.nationality.clone(),
            passenger.passport_number.clone(),
        ]);
    }
    table.to_string()
}

pub fn flights(records: &[Flight]) -> String {
    let mut table = table(vec![
        "Flight", "Route", "Depart", "Arrive", "Aircraft", "Price", "Seats", "Status",
    ]);
    for flight in records {
        table.add_row(vec![
            flight.flight_number.clone(),
            format!("{} → {}", flight.origin, flight.destination),
            flight.departure.format(DATETIME_FORMAT).to_string(),
            flight.arrival.format(DATETIME_FORMAT).to_string(),
            flight.aircraft.serial_number.clone(),
            format_money(flight.price),
            format!("{}/{}", flight.available_seats, flight.capacity()),
            flight.status.to_string(),
        ]);
    }
    table.to_string()
}

pub fn reservations(records: &[Reservation]) -> String {
    let mut table = table(vec![
        "Number", "Passenger", "Flight", "Route", "Seat", "Created", "Total", "Status",
    ]);
    for reservation in records {
        table.add_row(vec![
            reservation.reservation_number.clone(),
            format!(
                "{} ({})",
                reservation.passenger.person.full_name(),
                reservation.passenger.person.dni
            ),
            reservation.flight.flight_number.clone(),
            format!(
                "{} → {}",
                reservation.flight.origin, reservation.flight.destination
            ),
            reservation.seat_number.to_string(),
            reservation.created_at.format(DATETIME_FORMAT).to_string(),
            format_money(reservation.total()),
            reservation.status.to_string(),
        ]);
    }
    table.to_string()
}

pub fn users(records: &[User]) -> String {
    let mut table = table(vec!["Username", "Role", "Employee", "DNI"]);
    for user in records {
        table.add_row(vec![
            user.username.clone(),
            user.role.to_string(),
            user.display_name(),
            user.employee.person.dni.clone(),
        ]);
    }
    table.to_string()
}
