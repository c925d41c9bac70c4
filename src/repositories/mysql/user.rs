use async_trait::async_trait;
use sqlx::{FromRow, MySql, QueryBuilder};

use super::employee::EmployeeRow;
use super::{parse_code, MySqlStore};
use crate::models::person::Employee;
use crate::models::user::{User, UserFilter};
use crate::repositories::Repository;
use crate::utils::error::{AppError, AppResult};

// A user is only visible while both the account and its employee are active
const SELECT_USERS: &str = "SELECT u.username, u.password, u.role, \
     e.dni, p.name, p.surname, p.email, p.phone, \
     e.employee_number, e.job_title, e.hire_date, e.salary \
     FROM users u \
     INNER JOIN employees e ON u.employee_dni = e.dni \
     INNER JOIN persons p ON e.dni = p.dni \
     WHERE u.active = TRUE AND e.active = TRUE";

#[derive(Debug, FromRow)]
struct UserRow {
    username: String,
    password: String,
    role: String,
    #[sqlx(flatten)]
    employee: EmployeeRow,
}

impl TryFrom<UserRow> for User {
    type Error = AppError;

    fn try_from(row: UserRow) -> AppResult<Self> {
        Ok(User {
            role: parse_code("role", &row.role)?,
            employee: Employee::from(row.employee),
            username: row.username,
            password: row.password,
        })
    }
}

fn into_users(rows: Vec<UserRow>) -> AppResult<Vec<User>> {
    rows.into_iter().map(User::try_from).collect()
}

#[async_trait]
impl Repository<User> for MySqlStore {
    async fn save(&self, user: &User) -> AppResult<()> {
        let call = sqlx::query("CALL sp_save_user(?, ?, ?, ?, @ok, @message)")
            .bind(&user.username)
            .bind(&user.password)
            .bind(user.role.code())
            .bind(&user.employee.person.dni);
        self.call_procedure("sp_save_user", call).await
    }

    async fn find_by_key(&self, username: &str) -> AppResult<Option<User>> {
        let row = sqlx::query_as::<_, UserRow>(&format!("{} AND u.username = ?", SELECT_USERS))
            .bind(username)
            .fetch_optional(&self.pool)
            .await?;
        row.map(User::try_from).transpose()
    }

    async fn list_all(&self) -> AppResult<Vec<User>> {
        let rows = sqlx::query_as::<_, UserRow>(&format!("{} ORDER BY u.username", SELECT_USERS))
            .fetch_all(&self.pool)
            .await?;
        into_users(rows)
    }

    async fn find_by(&self, filter: &UserFilter) -> AppResult<Vec<User>> {
        let mut query: QueryBuilder<MySql> = QueryBuilder::new(SELECT_USERS);
        match filter {
            UserFilter::Role(role) => {
                query.push(" AND u.role = ").push_bind(role.code());
            }
        }
        query.push(" ORDER BY u.username");

        let rows = query
            .build_query_as::<UserRow>()
            .fetch_all(&self.pool)
            .await?;
        into_users(rows)
    }

    // Soft delete, like employees
    async fn delete(&self, username: &str) -> AppResult<bool> {
        if !Repository::<User>::exists(self, username).await? {
            return Ok(false);
        }
        let call = sqlx::query("CALL sp_set_user_active(?, FALSE, @ok, @message)").bind(username);
        self.call_procedure("sp_set_user_active", call).await?;
        Ok(true)
    }

    async fn exists(&self, username: &str) -> AppResult<bool> {
        self.count(
            "SELECT COUNT(*) FROM users u INNER JOIN employees e ON u.employee_dni = e.dni \
             WHERE u.username = ? AND u.active = TRUE AND e.active = TRUE",
            username,
        )
        .await
    }
}
