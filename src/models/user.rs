use serde::{Deserialize, Serialize};
use std::fmt;
use strum_macros::{EnumIter, EnumString, IntoStaticStr};
use validator::Validate;

use crate::models::person::Employee;
use crate::models::Entity;
use crate::utils::validation::not_blank;

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, EnumString, IntoStaticStr, EnumIter,
)]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Role {
    Administrator,
    Operator,
}

impl Role {
    pub fn code(self) -> &'static str {
        self.into()
    }

    pub fn description(self) -> &'static str {
        match self {
            Role::Administrator => "Administrator",
            Role::Operator => "Operator",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.description())
    }
}

/// A login account. Every user belongs to exactly one employee.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub username: String,
    // Stored and compared as plain text
    #[serde(skip_serializing)]
    pub password: String,
    pub role: Role,
    pub employee: Employee,
}

impl User {
    pub fn display_name(&self) -> String {
        self.employee.person.full_name()
    }

    pub fn is_administrator(&self) -> bool {
        self.role == Role::Administrator
    }
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct NewUser {
    #[validate(custom(function = "not_blank", message = "Username is required"))]
    pub username: String,
    #[validate(custom(function = "not_blank", message = "Password is required"))]
    pub password: String,
    pub role: Role,
    #[validate(custom(function = "not_blank", message = "User must belong to an employee"))]
    pub employee_dni: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserFilter {
    Role(Role),
}

impl Entity for User {
    type Filter = UserFilter;
    const KIND: &'static str = "user";

    fn key(&self) -> &str {
        &self.username
    }

    fn matches(&self, filter: &UserFilter) -> bool {
        match filter {
            UserFilter::Role(role) => self.role == *role,
        }
    }
}
