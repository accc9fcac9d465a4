use async_trait::async_trait;
use uuid::Uuid;

use crate::{
    application::repos::{CountriesRepo, CountryPredicate, RepoError},
    domain::entities::CountryRecord,
};

use super::{PostgresRepositories, map_sqlx_error};

#[derive(sqlx::FromRow)]
struct CountryRow {
    id: Uuid,
    name: String,
}

impl From<CountryRow> for CountryRecord {
    fn from(row: CountryRow) -> Self {
        Self {
            id: row.id,
            name: row.name,
        }
    }
}

const INSERT_COUNTRY: &str = r#"
    INSERT INTO countries (id, name)
    VALUES ($1, $2)
    RETURNING id, name
"#;

#[async_trait]
impl CountriesRepo for PostgresRepositories {
    async fn add_country(&self, country: CountryRecord) -> Result<CountryRecord, RepoError> {
        let row = sqlx::query_as::<_, CountryRow>(INSERT_COUNTRY)
            .bind(country.id)
            .bind(&country.name)
            .fetch_one(self.pool())
            .await
            .map_err(map_sqlx_error)?;

        Ok(row.into())
    }

    async fn add_countries(
        &self,
        countries: Vec<CountryRecord>,
    ) -> Result<Vec<CountryRecord>, RepoError> {
        let mut tx = self.begin().await.map_err(map_sqlx_error)?;
        let mut added = Vec::with_capacity(countries.len());

        for country in countries {
            let row = sqlx::query_as::<_, CountryRow>(INSERT_COUNTRY)
                .bind(country.id)
                .bind(&country.name)
                .fetch_one(&mut *tx)
                .await
                .map_err(map_sqlx_error)?;
            added.push(CountryRecord::from(row));
        }

        tx.commit().await.map_err(map_sqlx_error)?;
        Ok(added)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<CountryRecord>, RepoError> {
        let row = sqlx::query_as::<_, CountryRow>(
            r#"
            SELECT id, name
            FROM countries
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(self.pool())
        .await
        .map_err(map_sqlx_error)?;

        Ok(row.map(CountryRecord::from))
    }

    async fn list_all(&self) -> Result<Vec<CountryRecord>, RepoError> {
        let rows = sqlx::query_as::<_, CountryRow>(
            r#"
            SELECT id, name
            FROM countries
            ORDER BY created_at, id
            "#,
        )
        .fetch_all(self.pool())
        .await
        .map_err(map_sqlx_error)?;

        Ok(rows.into_iter().map(CountryRecord::from).collect())
    }

    async fn list_matching(
        &self,
        predicate: &CountryPredicate,
    ) -> Result<Vec<CountryRecord>, RepoError> {
        let countries = CountriesRepo::list_all(self).await?;
        Ok(countries
            .into_iter()
            .filter(|country| predicate(country))
            .collect())
    }

    async fn exists_matching(&self, predicate: &CountryPredicate) -> Result<bool, RepoError> {
        let countries = CountriesRepo::list_all(self).await?;
        Ok(countries.iter().any(|country| predicate(country)))
    }
}
