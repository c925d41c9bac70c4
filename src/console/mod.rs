use std::io::Write;
use tokio::io::AsyncBufRead;
use uuid::Uuid;

use crate::models::user::{Role, User};
use crate::services::Services;
use crate::utils::error::{AppError, AppResult};

pub mod input;
mod menus;
pub mod table;

use input::{Prompter, INPUT_CLOSED};

/// Areas of the session menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Section {
    Employees,
    Users,
    Passengers,
    Aircraft,
    Flights,
    Reservations,
}

impl Section {
    pub fn title(self) -> &'static str {
        match self {
            Section::Employees => "Employees",
            Section::Users => "Users",
            Section::Passengers => "Passengers",
            Section::Aircraft => "Aircraft",
            Section::Flights => "Flights",
            Section::Reservations => "Reservations",
        }
    }

    /// What each role may open. Operators handle the booking desk only.
    pub fn available_to(role: Role) -> &'static [Section] {
        match role {
            Role::Administrator => &[
                Section::Employees,
                Section::Users,
                Section::Passengers,
                Section::Aircraft,
                Section::Flights,
                Section::Reservations,
            ],
            Role::Operator => &[Section::Passengers, Section::Flights, Section::Reservations],
        }
    }
}

pub fn generate_reservation_number() -> String {
    let id = Uuid::new_v4().simple().to_string();
    format!("R-{}", id[..8].to_uppercase())
}

/// Interactive front end: a login menu, then a role-dependent session menu.
pub struct Console<R, W> {
    services: Services,
    prompt: Prompter<R, W>,
}

impl<R, W> Console<R, W>
where
    R: AsyncBufRead + Unpin,
    W: Write,
{
    pub fn new(services: Services, input: R, output: W) -> Self {
        Console {
            services,
            prompt: Prompter::new(input, output),
        }
    }

    pub fn into_output(self) -> W {
        self.prompt.into_output()
    }

    /// Runs until the user exits or the input closes.
    pub async fn run(&mut self) -> AppResult<()> {
        self.prompt.say("Flight Management System")?;
        loop {
            let outcome = match self.prompt.menu("Main menu", &["Log in"], "Exit").await {
                Ok(0) => return Ok(()),
                Ok(_) => self.login().await,
                Err(err) => Err(err),
            };
            match outcome {
                Err(AppError::Io(message)) if message == INPUT_CLOSED => return Ok(()),
                other => self.settle(other)?,
            }
        }
    }

    async fn login(&mut self) -> AppResult<()> {
        let username = self.prompt.text("Username").await?;
        let password = self.prompt.text("Password").await?;
        let user = self.services.users.authenticate(&username, &password).await?;

        self.prompt.say(format!(
            "Welcome, {} ({})",
            user.display_name(),
            user.role
        ))?;
        self.session(&user).await?;
        self.prompt.say(format!("Goodbye, {}", user.username))
    }

    async fn session(&mut self, user: &User) -> AppResult<()> {
        let sections = Section::available_to(user.role);
        let titles: Vec<&str> = sections.iter().map(|section| section.title()).collect();
        let heading = format!("{} menu", user.role);

        loop {
            let choice = self.prompt.menu(&heading, &titles, "Log out").await?;
            let Some(section) = choice.checked_sub(1).and_then(|i| sections.get(i)) else {
                return Ok(());
            };
            match section {
                Section::Employees => self.employees_menu().await?,
                Section::Users => self.users_menu().await?,
                Section::Passengers => self.passengers_menu().await?,
                Section::Aircraft => self.aircraft_menu().await?,
                Section::Flights => self.flights_menu().await?,
                Section::Reservations => self.reservations_menu().await?,
            }
        }
    }

    /// Reports a failed action once and carries on. I/O failures end the console.
    fn settle(&mut self, outcome: AppResult<()>) -> AppResult<()> {
        match outcome {
            Ok(()) => Ok(()),
            Err(err @ AppError::Io(_)) => Err(err),
            Err(err) => {
                tracing::warn!(kind = err.kind(), error = %err, "action failed");
                self.prompt.say(format!("Error: {}", err))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn operators_only_reach_the_booking_sections() {
        let sections = Section::available_to(Role::Operator);
        assert!(!sections.contains(&Section::Employees));
        assert!(!sections.contains(&Section::Users));
        assert!(!sections.contains(&Section::Aircraft));
        assert!(sections.contains(&Section::Reservations));
        assert_eq!(Section::available_to(Role::Administrator).len(), 6);
    }

    #[test]
    fn generated_reservation_numbers_are_short_and_distinct() {
        let first = generate_reservation_number();
        let second = generate_reservation_number();
        assert!(first.starts_with("R-"));
        assert_eq!(first.len(), 10);
        assert_ne!(first, second);
    }
}
