#![allow(dead_code)]

use chrono::{NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;

use flight_management_system::models::aircraft::Aircraft;
use flight_management_system::models::flight::NewFlight;
use flight_management_system::models::person::{Employee, Passenger, PersonInfo};
use flight_management_system::models::reservation::NewReservation;
use flight_management_system::models::user::{NewUser, Role};

pub fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap()
}

pub fn at(day: NaiveDate, hour: u32, minute: u32) -> NaiveDateTime {
    day.and_hms_opt(hour, minute, 0).unwrap()
}

pub fn aircraft(serial: &str, capacity: i32) -> Aircraft {
    Aircraft::new(serial, "A320neo", "Airbus", capacity, 3400)
}

pub fn person(dni: &str) -> PersonInfo {
    PersonInfo::new(
        dni,
        "Rosa",
        "Quispe",
        format!("{}@example.com", dni),
        "987654321",
    )
}

pub fn employee(dni: &str, number: &str, job_title: &str) -> Employee {
    Employee {
        person: person(dni),
        employee_number: number.to_string(),
        job_title: job_title.to_string(),
        hire_date: date(2020, 2, 17),
        salary: Decimal::new(450000, 2),
    }
}

pub fn passenger(dni: &str, nationality: &str) -> Passenger {
    Passenger {
        person: person(dni),
        birth_date: date(1991, 7, 28),
        nationality: nationality.to_string(),
        passport_number: format!("P{}", dni),
    }
}

pub fn new_flight(number: &str, origin: &str, destination: &str, aircraft_serial: &str) -> NewFlight {
    let day = date(2025, 6, 1);
    NewFlight {
        flight_number: number.to_string(),
        origin: origin.to_string(),
        destination: destination.to_string(),
        departure: at(day, 8, 30),
        arrival: at(day, 9, 45),
        aircraft_serial: aircraft_serial.to_string(),
        price: Decimal::new(18990, 2),
    }
}

pub fn new_reservation(number: &str, passenger_dni: &str, flight_number: &str, seat: i32) -> NewReservation {
    NewReservation {
        reservation_number: number.to_string(),
        passenger_dni: passenger_dni.to_string(),
        flight_number: flight_number.to_string(),
        seat_number: seat,
    }
}

pub fn new_user(username: &str, role: Role, employee_dni: &str) -> NewUser {
    NewUser {
        username: username.to_string(),
        password: "s3cret".to_string(),
        role,
        employee_dni: employee_dni.to_string(),
    }
}
