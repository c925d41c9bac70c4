use async_trait::async_trait;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use sqlx::{FromRow, MySql, QueryBuilder};

use super::MySqlStore;
use crate::models::person::{Employee, EmployeeFilter, PersonInfo};
use crate::repositories::Repository;
use crate::utils::error::AppResult;

// Deactivated employees are invisible to every read
const SELECT_EMPLOYEES: &str = "SELECT e.dni, p.name, p.surname, p.email, p.phone, \
     e.employee_number, e.job_title, e.hire_date, e.salary \
     FROM employees e INNER JOIN persons p ON e.dni = p.dni \
     WHERE e.active = TRUE";

#[derive(Debug, FromRow)]
pub(super) struct EmployeeRow {
    dni: String,
    name: String,
    surname: String,
    email: String,
    phone: String,
    employee_number: String,
    job_title: String,
    hire_date: NaiveDate,
    salary: Decimal,
}

impl From<EmployeeRow> for Employee {
    fn from(row: EmployeeRow) -> Self {
        Employee {
            person: PersonInfo {
                dni: row.dni,
                name: row.name,
                surname: row.surname,
                email: row.email,
                phone: row.phone,
            },
            employee_number: row.employee_number,
            job_title: row.job_title,
            hire_date: row.hire_date,
            salary: row.salary,
        }
    }
}

#[async_trait]
impl Repository<Employee> for MySqlStore {
    async fn save(&self, employee: &Employee) -> AppResult<()> {
        let person = &employee.person;
        let call = sqlx::query(
            "CALL sp_save_employee(?, ?, ?, ?, ?, ?, ?, ?, ?, @ok, @message)",
        )
        .bind(&person.dni)
        .bind(&person.name)
        .bind(&person.surname)
        .bind(&person.email)
        .bind(&person.phone)
        .bind(&employee.employee_number)
        .bind(&employee.job_title)
        .bind(employee.hire_date)
        .bind(employee.salary);
        self.call_procedure("sp_save_employee", call).await
    }

    async fn find_by_key(&self, dni: &str) -> AppResult<Option<Employee>> {
        let row = sqlx::query_as::<_, EmployeeRow>(&format!("{} AND e.dni = ?", SELECT_EMPLOYEES))
            .bind(dni)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row.map(Employee::from))
    }

    async fn list_all(&self) -> AppResult<Vec<Employee>> {
        let rows = sqlx::query_as::<_, EmployeeRow>(&format!(
            "{} ORDER BY p.surname, p.name",
            SELECT_EMPLOYEES
        ))
        .fetch_all(&self.pool)
        .await?;
        Ok(rows.into_iter().map(Employee::from).collect())
    }

    async fn find_by(&self, filter: &EmployeeFilter) -> AppResult<Vec<Employee>> {
        let mut query: QueryBuilder<MySql> = QueryBuilder::new(SELECT_EMPLOYEES);
        match filter {
            EmployeeFilter::EmployeeNumber(number) => {
                query.push(" AND e.employee_number = ").push_bind(number.as_str());
            }
            EmployeeFilter::JobTitle(title) => {
                query.push(" AND e.job_title = ").push_bind(title.as_str());
            }
        }
        query.push(" ORDER BY p.surname, p.name");

        let rows = query
            .build_query_as::<EmployeeRow>()
            .fetch_all(&self.pool)
            .await?;
        Ok(rows.into_iter().map(Employee::from).collect())
    }

    // Soft delete: the row is kept with active = FALSE
    async fn delete(&self, dni: &str) -> AppResult<bool> {
        if !Repository::<Employee>::exists(self, dni).await? {
            return Ok(false);
        }
        let call = sqlx::query("CALL sp_set_employee_active(?, FALSE, @ok, @message)").bind(dni);
        self.call_procedure("sp_set_employee_active", call).await?;
        Ok(true)
    }

    async fn exists(&self, dni: &str) -> AppResult<bool> {
        self.count(
            "SELECT COUNT(*) FROM employees WHERE dni = ? AND active = TRUE",
            dni,
        )
        .await
    }
}
