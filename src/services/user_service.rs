use std::sync::Arc;
use validator::Validate;

use crate::models::person::Employee;
use crate::models::user::{NewUser, Role, User, UserFilter};
use crate::repositories::Repository;
use crate::services::{delete_existing, ensure_new, find_existing};
use crate::utils::error::{AppError, AppResult};
use crate::utils::validation::require_key;

pub struct UserService {
    users: Arc<dyn Repository<User>>,
    employees: Arc<dyn Repository<Employee>>,
}

impl UserService {
    pub fn new(users: Arc<dyn Repository<User>>, employees: Arc<dyn Repository<Employee>>) -> Self {
        UserService { users, employees }
    }

    // Register a new user for an existing employee
    pub async fn register_user(&self, request: NewUser) -> AppResult<User> {
        request.validate()?;
        ensure_new(self.users.as_ref(), &request.username).await?;
        let employee = find_existing(self.employees.as_ref(), &request.employee_dni).await?;

        let user = User {
            username: request.username,
            password: request.password,
            role: request.role,
            employee,
        };
        self.users.save(&user).await?;
        tracing::info!(username = %user.username, role = user.role.code(), "user registered");
        Ok(user)
    }

    // Login: plain comparison of the stored password
    pub async fn authenticate(&self, username: &str, password: &str) -> AppResult<User> {
        require_key(username, "Username is required")?;
        require_key(password, "Password is required")?;

        let user = self
            .users
            .find_by_key(username)
            .await?
            .filter(|user| user.password == password)
            .ok_or_else(|| {
                tracing::warn!(username, "login rejected");
                AppError::NotFound("Invalid credentials".into())
            })?;

        tracing::info!(username, role = user.role.code(), "login accepted");
        Ok(user)
    }

    pub async fn find_user(&self, username: &str) -> AppResult<Option<User>> {
        self.users.find_by_key(username).await
    }

    pub async fn list_users(&self) -> AppResult<Vec<User>> {
        self.users.list_all().await
    }

    pub async fn find_users_by_role(&self, role: Role) -> AppResult<Vec<User>> {
        self.users.find_by(&UserFilter::Role(role)).await
    }

    pub async fn delete_user(&self, username: &str) -> AppResult<bool> {
        delete_existing(self.users.as_ref(), username, "Username is required").await
    }
}
