use async_trait::async_trait;
use chrono::NaiveDate;
use sqlx::{FromRow, MySql, QueryBuilder};

use super::MySqlStore;
use crate::models::person::{Passenger, PassengerFilter, PersonInfo};
use crate::repositories::Repository;
use crate::utils::error::AppResult;

const SELECT_PASSENGERS: &str = "SELECT pa.dni, p.name, p.surname, p.email, p.phone, \
     pa.birth_date, pa.nationality, pa.passport_number \
     FROM passengers pa INNER JOIN persons p ON pa.dni = p.dni";

#[derive(Debug, FromRow)]
pub(super) struct PassengerRow {
    dni: String,
    name: String,
    surname: String,
    email: String,
    phone: String,
    birth_date: NaiveDate,
    nationality: String,
    passport_number: String,
}

impl From<PassengerRow> for Passenger {
    fn from(row: PassengerRow) -> Self {
        Passenger {
            person: PersonInfo {
                dni: row.dni,
                name: row.name,
                surname: row.surname,
                email: row.email,
                phone: row.phone,
            },
            birth_date: row.birth_date,
            nationality: row.nationality,
            passport_number: row.passport_number,
        }
    }
}

#[async_trait]
impl Repository<Passenger> for MySqlStore {
    async fn save(&self, passenger: &Passenger) -> AppResult<()> {
        let person = &passenger.person;
        let call = sqlx::query("CALL sp_save_passenger(?, ?, ?, ?, ?, ?, ?, ?, @ok, @message)")
            .bind(&person.dni)
            .bind(&person.name)
            .bind(&person.surname)
            .bind(&person.email)
            .bind(&person.phone)
            .bind(passenger.birth_date)
            .bind(&passenger.nationality)
            .bind(&passenger.passport_number);
        self.call_procedure("sp_save_passenger", call).await
    }

    async fn find_by_key(&self, dni: &str) -> AppResult<Option<Passenger>> {
        let row = sqlx::query_as::<_, PassengerRow>(&format!(
            "{} WHERE pa.dni = ?",
            SELECT_PASSENGERS
        ))
        .bind(dni)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row.map(Passenger::from))
    }

    async fn list_all(&self) -> AppResult<Vec<Passenger>> {
        let rows = sqlx::query_as::<_, PassengerRow>(&format!(
            "{} ORDER BY p.surname, p.name",
            SELECT_PASSENGERS
        ))
        .fetch_all(&self.pool)
        .await?;
        Ok(rows.into_iter().map(Passenger::from).collect())
    }

    async fn find_by(&self, filter: &PassengerFilter) -> AppResult<Vec<Passenger>> {
        let mut query: QueryBuilder<MySql> = QueryBuilder::new(SELECT_PASSENGERS);
        match filter {
            PassengerFilter::Nationality(nationality) => {
                query
                    .push(" WHERE pa.nationality = ")
                    .push_bind(nationality.as_str());
            }
        }
        query.push(" ORDER BY p.surname, p.name");

        let rows = query
            .build_query_as::<PassengerRow>()
            .fetch_all(&self.pool)
            .await?;
        Ok(rows.into_iter().map(Passenger::from).collect())
    }

    async fn delete(&self, dni: &str) -> AppResult<bool> {
        if !Repository::<Passenger>::exists(self, dni).await? {
            return Ok(false);
        }
        let call = sqlx::query("CALL sp_delete_passenger(?, @ok, @message)").bind(dni);
        self.call_procedure("sp_delete_passenger", call).await?;
        Ok(true)
    }

    async fn exists(&self, dni: &str) -> AppResult<bool> {
        self.count("SELECT COUNT(*) FROM passengers WHERE dni = ?", dni)
            .await
    }
}
