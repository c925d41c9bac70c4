use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::Entity;
use crate::utils::validation::not_blank;

/// Identity and contact data shared by employees and passengers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
pub struct PersonInfo {
    #[validate(custom(function = "not_blank", message = "National ID (DNI) is required"))]
    pub dni: String,
    pub name: String,
    pub surname: String,
    pub email: String,
    pub phone: String,
}

impl PersonInfo {
    pub fn new(
        dni: impl Into<String>,
        name: impl Into<String>,
        surname: impl Into<String>,
        email: impl Into<String>,
        phone: impl Into<String>,
    ) -> Self {
        PersonInfo {
            dni: dni.into(),
            name: name.into(),
            surname: surname.into(),
            email: email.into(),
            phone: phone.into(),
        }
    }

    pub fn full_name(&self) -> String {
        format!("{} {}", self.name, self.surname)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
pub struct Employee {
    #[serde(flatten)]
    #[validate(nested)]
    pub person: PersonInfo,
    pub employee_number: String,
    pub job_title: String,
    pub hire_date: NaiveDate,
    pub salary: Decimal,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EmployeeFilter {
    EmployeeNumber(String),
    JobTitle(String),
}

impl Entity for Employee {
    type Filter = EmployeeFilter;
    const KIND: &'static str = "employee";

    fn key(&self) -> &str {
        &self.person.dni
    }

    fn matches(&self, filter: &EmployeeFilter) -> bool {
        match filter {
            EmployeeFilter::EmployeeNumber(number) => self.employee_number == *number,
            EmployeeFilter::JobTitle(title) => self.job_title == *title,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
pub struct Passenger {
    #[serde(flatten)]
    #[validate(nested)]
    pub person: PersonInfo,
    pub birth_date: NaiveDate,
    pub nationality: String,
    pub passport_number: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PassengerFilter {
    Nationality(String),
}

impl Entity for Passenger {
    type Filter = PassengerFilter;
    const KIND: &'static str = "passenger";

    fn key(&self) -> &str {
        &self.person.dni
    }

    fn matches(&self, filter: &PassengerFilter) -> bool {
        match filter {
            PassengerFilter::Nationality(nationality) => {
                self.nationality.eq_ignore_ascii_case(nationality)
            }
        }
    }
}
