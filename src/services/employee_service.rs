use std::sync::Arc;
use validator::Validate;

use crate::models::person::{Employee, EmployeeFilter};
use crate::repositories::Repository;
use crate::services::{delete_existing, ensure_new};
use crate::utils::error::{AppError, AppResult};
use crate::utils::validation::require_key;

pub struct EmployeeService {
    employees: Arc<dyn Repository<Employee>>,
}

impl EmployeeService {
    pub fn new(employees: Arc<dyn Repository<Employee>>) -> Self {
        EmployeeService { employees }
    }

    pub async fn register_employee(&self, employee: Employee) -> AppResult<Employee> {
        employee.validate()?;
        ensure_new(self.employees.as_ref(), &employee.person.dni).await?;

        // The employee number is a second unique key
        if !employee.employee_number.trim().is_empty()
            && self
                .find_employee_by_number(&employee.employee_number)
                .await?
                .is_some()
        {
            return Err(AppError::Conflict(format!(
                "Employee number '{}' is already assigned",
                employee.employee_number
            )));
        }

        self.employees.save(&employee).await?;
        tracing::info!(dni = %employee.person.dni, "employee registered");
        Ok(employee)
    }

    pub async fn find_employee(&self, dni: &str) -> AppResult<Option<Employee>> {
        self.employees.find_by_key(dni).await
    }

    pub async fn find_employee_by_number(
        &self,
        employee_number: &str,
    ) -> AppResult<Option<Employee>> {
        let matches = self
            .employees
            .find_by(&EmployeeFilter::EmployeeNumber(employee_number.to_string()))
            .await?;
        Ok(matches.into_iter().next())
    }

    pub async fn list_employees(&self) -> AppResult<Vec<Employee>> {
        self.employees.list_all().await
    }

    pub async fn find_employees_by_job_title(&self, job_title: &str) -> AppResult<Vec<Employee>> {
        require_key(job_title, "Job title is required")?;
        self.employees
            .find_by(&EmployeeFilter::JobTitle(job_title.to_string()))
            .await
    }

    pub async fn delete_employee(&self, dni: &str) -> AppResult<bool> {
        delete_existing(self.employees.as_ref(), dni, "National ID (DNI) is required").await
    }
}
