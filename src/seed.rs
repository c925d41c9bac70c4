use chrono::Local;
use rust_decimal::Decimal;
use serde::Deserialize;
use std::path::Path;

use crate::models::aircraft::Aircraft;
use crate::models::person::{Employee, Passenger, PersonInfo};
use crate::models::user::{NewUser, Role};
use crate::services::Services;
use crate::utils::error::{AppError, AppResult};

/// Records loaded at startup, either the built-in accounts or a JSON file.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct SeedData {
    pub employees: Vec<Employee>,
    pub users: Vec<NewUser>,
    pub passengers: Vec<Passenger>,
    pub aircraft: Vec<Aircraft>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SeedReport {
    pub created: usize,
    pub skipped: usize,
}

impl SeedReport {
    fn record<T>(&mut self, outcome: AppResult<T>) -> AppResult<()> {
        match outcome {
            Ok(_) => self.created += 1,
            Err(AppError::Conflict(message)) => {
                tracing::debug!(%message, "seed record already present");
                self.skipped += 1;
            }
            Err(err) => return Err(err),
        }
        Ok(())
    }
}

impl SeedData {
    /// One administrator and one operator, both with password `1234`.
    pub fn builtin() -> Self {
        let hired = Local::now().date_naive();
        let salary = Decimal::new(5000, 0);
        let administrator = Employee {
            person: PersonInfo::new(
                "12345678",
                "Admin",
                "Sistema",
                "admin@sistema.com",
                "999999999",
            ),
            employee_number: "EMP001".into(),
            job_title: "Administrador".into(),
            hire_date: hired,
            salary,
        };
        let operator = Employee {
            person: PersonInfo::new(
                "12345679",
                "Admin",
                "Sistema",
                "juana@sistema.com",
                "88888888",
            ),
            employee_number: "EMP002".into(),
            job_title: "Operadora".into(),
            hire_date: hired,
            salary,
        };

        SeedData {
            users: vec![
                NewUser {
                    username: "jesus.mechan".into(),
                    password: "1234".into(),
                    role: Role::Administrator,
                    employee_dni: administrator.person.dni.clone(),
                },
                NewUser {
                    username: "juana.rivera".into(),
                    password: "1234".into(),
                    role: Role::Operator,
                    employee_dni: operator.person.dni.clone(),
                },
            ],
            employees: vec![administrator, operator],
            passengers: Vec::new(),
            aircraft: Vec::new(),
        }
    }

    pub fn from_json(json: &str) -> AppResult<Self> {
        serde_json::from_str(json)
            .map_err(|e| AppError::ConfigError(format!("Invalid seed data: {}", e)))
    }

    pub async fn from_file(path: &Path) -> AppResult<Self> {
        let json = tokio::fs::read_to_string(path).await?;
        Self::from_json(&json)
    }

    /// Registers everything through the services. Records that already exist are
    /// skipped; any other failure stops the seed.
    pub async fn apply(&self, services: &Services) -> AppResult<SeedReport> {
        let mut report = SeedReport::default();

        for employee in &self.employees {
            report.record(services.employees.register_employee(employee.clone()).await)?;
        }
        for user in &self.users {
            report.record(services.users.register_user(user.clone()).await)?;
        }
        for passenger in &self.passengers {
            report.record(services.passengers.register_passenger(passenger.clone()).await)?;
        }
        for aircraft in &self.aircraft {
            report.record(services.aircraft.register_aircraft(aircraft.clone()).await)?;
        }

        tracing::info!(created = report.created, skipped = report.skipped, "seed applied");
        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repositories::Repositories;

    #[tokio::test]
    async fn builtin_seed_creates_both_accounts_and_is_repeatable() {
        let services = Services::new(&Repositories::in_memory());
        let seed = SeedData::builtin();

        let first = seed.apply(&services).await.unwrap();
        assert_eq!(first, SeedReport { created: 4, skipped: 0 });

        let second = seed.apply(&services).await.unwrap();
        assert_eq!(second, SeedReport { created: 0, skipped: 4 });

        let admin = services.users.authenticate("jesus.mechan", "1234").await.unwrap();
        assert!(admin.is_administrator());
        let operator = services.users.authenticate("juana.rivera", "1234").await.unwrap();
        assert_eq!(operator.role, Role::Operator);
    }

    #[tokio::test]
    async fn seed_file_sections_are_optional() {
        let seed = SeedData::from_json(
            r#"{
                "aircraft": [{
                    "serial_number": "AC-100",
                    "model": "A320",
                    "manufacturer": "Airbus",
                    "passenger_capacity": 180,
                    "cargo_capacity": 2000
                }]
            }"#,
        )
        .unwrap();
        assert!(seed.employees.is_empty());

        let services = Services::new(&Repositories::in_memory());
        seed.apply(&services).await.unwrap();
        let stored = services.aircraft.find_aircraft("AC-100").await.unwrap().unwrap();
        assert_eq!(stored.passenger_capacity, 180);
    }

    #[test]
    fn malformed_seed_is_a_config_error() {
        let err = SeedData::from_json("{ not json").unwrap_err();
        assert_eq!(err.kind(), "config");
    }

    #[tokio::test]
    async fn other_failures_stop_the_seed() {
        let mut seed = SeedData::builtin();
        seed.users[0].employee_dni = "00000000".into();

        let services = Services::new(&Repositories::in_memory());
        let err = seed.apply(&services).await.unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }
}
