use serde::{Deserialize, Serialize};
use std::fmt;
use strum_macros::{EnumIter, EnumString, IntoStaticStr};
use validator::Validate;

use crate::models::Entity;
use crate::utils::validation::not_blank;

#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    EnumString,
    IntoStaticStr,
    EnumIter,
)]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AircraftStatus {
    #[default]
    Available,
    Maintenance,
    InFlight,
    OutOfService,
}

impl AircraftStatus {
    // Storage code, e.g. OUT_OF_SERVICE
    pub fn code(self) -> &'static str {
        self.into()
    }

    pub fn description(self) -> &'static str {
        match self {
            AircraftStatus::Available => "Available",
            AircraftStatus::Maintenance => "In Maintenance",
            AircraftStatus::InFlight => "In Flight",
            AircraftStatus::OutOfService => "Out of Service",
        }
    }
}

impl fmt::Display for AircraftStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.description())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
pub struct Aircraft {
    #[validate(custom(function = "not_blank", message = "Aircraft serial number is required"))]
    pub serial_number: String,
    pub model: String,
    pub manufacturer: String,
    pub passenger_capacity: i32,
    // kilograms
    pub cargo_capacity: i32,
    #[serde(default)]
    pub status: AircraftStatus,
}

impl Aircraft {
    pub fn new(
        serial_number: impl Into<String>,
        model: impl Into<String>,
        manufacturer: impl Into<String>,
        passenger_capacity: i32,
        cargo_capacity: i32,
    ) -> Self {
        Aircraft {
            serial_number: serial_number.into(),
            model: model.into(),
            manufacturer: manufacturer.into(),
            passenger_capacity,
            cargo_capacity,
            status: AircraftStatus::Available,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AircraftFilter {
    Status(AircraftStatus),
}

impl Entity for Aircraft {
    type Filter = AircraftFilter;
    const KIND: &'static str = "aircraft";

    fn key(&self) -> &str {
        &self.serial_number
    }

    fn matches(&self, filter: &AircraftFilter) -> bool {
        match filter {
            AircraftFilter::Status(status) => self.status == *status,
        }
    }
}
