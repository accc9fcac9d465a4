use async_trait::async_trait;
use time::Date;
use uuid::Uuid;

use crate::{
    application::repos::{PersonPredicate, PersonsRepo, RepoError},
    domain::{entities::PersonRecord, types::Gender},
};

use super::{PostgresRepositories, map_sqlx_error};

#[derive(sqlx::FromRow)]
struct PersonRow {
    id: Uuid,
    name: Option<String>,
    email: Option<String>,
    date_of_birth: Option<Date>,
    gender: Option<String>,
    country_id: Option<Uuid>,
    country_name: Option<String>,
    address: Option<String>,
    receive_newsletters: bool,
}

impl TryFrom<PersonRow> for PersonRecord {
    type Error = RepoError;

    fn try_from(row: PersonRow) -> Result<Self, Self::Error> {
        let gender = row
            .gender
            .as_deref()
            .map(str::parse::<Gender>)
            .transpose()
            .map_err(|err| RepoError::Integrity {
                message: format!("person {}: {err}", row.id),
            })?;

        Ok(Self {
            id: row.id,
            name: row.name,
            email: row.email,
            date_of_birth: row.date_of_birth,
            gender,
            country_id: row.country_id,
            country_name: row.country_name,
            address: row.address,
            receive_newsletters: row.receive_newsletters,
        })
    }
}

fn into_records(rows: Vec<PersonRow>) -> Result<Vec<PersonRecord>, RepoError> {
    rows.into_iter().map(PersonRecord::try_from).collect()
}

const SELECT_PERSONS: &str = r#"
    SELECT
        p.id,
        p.name,
        p.email,
        p.date_of_birth,
        p.gender,
        p.country_id,
        c.name AS country_name,
        p.address,
        p.receive_newsletters
    FROM persons p
    LEFT JOIN countries c ON c.id = p.country_id
"#;

impl PostgresRepositories {
    async fn select_persons(&self) -> Result<Vec<PersonRecord>, RepoError> {
        let sql = format!("{SELECT_PERSONS} ORDER BY p.created_at, p.id");
        let rows = sqlx::query_as::<_, PersonRow>(&sql)
            .fetch_all(self.pool())
            .await
            .map_err(map_sqlx_error)?;

        into_records(rows)
    }
}

#[async_trait]
impl PersonsRepo for PostgresRepositories {
    async fn add_person(&self, person: PersonRecord) -> Result<PersonRecord, RepoError> {
        let row = sqlx::query_as::<_, PersonRow>(
            r#"
            WITH inserted AS (
                INSERT INTO persons (
                    id, name, email, date_of_birth, gender, country_id, address, receive_newsletters
                )
                VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
                RETURNING *
            )
            SELECT
                i.id,
                i.name,
                i.email,
                i.date_of_birth,
                i.gender,
                i.country_id,
                c.name AS country_name,
                i.address,
                i.receive_newsletters
            FROM inserted i
            LEFT JOIN countries c ON c.id = i.country_id
            "#,
        )
        .bind(person.id)
        .bind(&person.name)
        .bind(&person.email)
        .bind(person.date_of_birth)
        .bind(person.gender.map(Gender::as_str))
        .bind(person.country_id)
        .bind(&person.address)
        .bind(person.receive_newsletters)
        .fetch_one(self.pool())
        .await
        .map_err(map_sqlx_error)?;

        row.try_into()
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<PersonRecord>, RepoError> {
        let sql = format!("{SELECT_PERSONS} WHERE p.id = $1");
        let row = sqlx::query_as::<_, PersonRow>(&sql)
            .bind(id)
            .fetch_optional(self.pool())
            .await
            .map_err(map_sqlx_error)?;

        row.map(PersonRecord::try_from).transpose()
    }

    async fn list_all(&self) -> Result<Vec<PersonRecord>, RepoError> {
        self.select_persons().await
    }

    async fn list_matching(
        &self,
        predicate: &PersonPredicate,
    ) -> Result<Vec<PersonRecord>, RepoError> {
        let persons = self.select_persons().await?;
        Ok(persons
            .into_iter()
            .filter(|person| predicate(person))
            .collect())
    }

    async fn update_person(&self, person: PersonRecord) -> Result<PersonRecord, RepoError> {
        let row = sqlx::query_as::<_, PersonRow>(
            r#"
            WITH updated AS (
                UPDATE persons
                SET name = $2,
                    email = $3,
                    date_of_birth = $4,
                    gender = $5,
                    country_id = $6,
                    address = $7,
                    receive_newsletters = $8
                WHERE id = $1
                RETURNING *
            )
            SELECT
                u.id,
                u.name,
                u.email,
                u.date_of_birth,
                u.gender,
                u.country_id,
                c.name AS country_name,
                u.address,
                u.receive_newsletters
            FROM updated u
            LEFT JOIN countries c ON c.id = u.country_id
            "#,
        )
        .bind(person.id)
        .bind(&person.name)
        .bind(&person.email)
        .bind(person.date_of_birth)
        .bind(person.gender.map(Gender::as_str))
        .bind(person.country_id)
        .bind(&person.address)
        .bind(person.receive_newsletters)
        .fetch_optional(self.pool())
        .await
        .map_err(map_sqlx_error)?;

        row.ok_or(RepoError::NotFound)?.try_into()
    }

    async fn delete_person(&self, id: Uuid) -> Result<bool, RepoError> {
        let result = sqlx::query("DELETE FROM persons WHERE id = $1")
            .bind(id)
            .execute(self.pool())
            .await
            .map_err(map_sqlx_error)?;

        Ok(result.rows_affected() > 0)
    }

    async fn exists_matching(&self, predicate: &PersonPredicate) -> Result<bool, RepoError> {
        let persons = self.select_persons().await?;
        Ok(persons.iter().any(|person| predicate(person)))
    }
}
