//! PostgreSQL-backed template catalogue adapters.
//!
//! [`DieselTemplateRepository`] serves catalogue reads. It also implements the
//! startup seeding port, inserting only ids that are not yet catalogued.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{
    TemplateCatalogueSeedError, TemplateCatalogueSeeder, TemplateRepository,
    TemplateRepositoryError, TemplateSeedSummary,
};
use crate::domain::{Template, TemplateId};

use super::diesel_basic_error_mapping::{map_basic_diesel_error, map_basic_pool_error};
use super::models::TemplateRow;
use super::pool::{DbPool, PoolError};
use super::schema::templates;

/// Diesel-backed implementation of the template ports.
#[derive(Clone)]
pub struct DieselTemplateRepository {
    pool: DbPool,
}

impl DieselTemplateRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> TemplateRepositoryError {
    map_basic_pool_error(error, TemplateRepositoryError::connection)
}

fn map_diesel_error(error: diesel::result::Error) -> TemplateRepositoryError {
    map_basic_diesel_error(
        error,
        TemplateRepositoryError::query,
        TemplateRepositoryError::connection,
    )
}

fn map_seed_pool_error(error: PoolError) -> TemplateCatalogueSeedError {
    map_basic_pool_error(error, TemplateCatalogueSeedError::connection)
}

fn map_seed_diesel_error(error: diesel::result::Error) -> TemplateCatalogueSeedError {
    map_basic_diesel_error(
        error,
        TemplateCatalogueSeedError::query,
        TemplateCatalogueSeedError::connection,
    )
}

#[async_trait]
impl TemplateRepository for DieselTemplateRepository {
    async fn find_by_id(&self, id: TemplateId) -> Result<Option<Template>, TemplateRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        templates::table
            .find(id.get())
            .select(TemplateRow::as_select())
            .first::<TemplateRow>(&mut conn)
            .await
            .optional()
            .map(|row| row.map(Template::from))
            .map_err(map_diesel_error)
    }

    async fn exists_by_id(&self, id: TemplateId) -> Result<bool, TemplateRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        diesel::select(diesel::dsl::exists(templates::table.find(id.get())))
            .get_result::<bool>(&mut conn)
            .await
            .map_err(map_diesel_error)
    }

    async fn find_all(&self) -> Result<Vec<Template>, TemplateRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let rows: Vec<TemplateRow> = templates::table
            .order(templates::id.asc())
            .select(TemplateRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        Ok(rows.into_iter().map(Template::from).collect())
    }
}

#[async_trait]
impl TemplateCatalogueSeeder for DieselTemplateRepository {
    async fn seed(
        &self,
        templates_to_seed: &[Template],
    ) -> Result<TemplateSeedSummary, TemplateCatalogueSeedError> {
        if templates_to_seed.is_empty() {
            return Ok(TemplateSeedSummary::default());
        }
        let rows: Vec<TemplateRow> = templates_to_seed.iter().map(TemplateRow::from).collect();
        let mut conn = self.pool.get().await.map_err(map_seed_pool_error)?;

        let inserted = diesel::insert_into(templates::table)
            .values(&rows)
            .on_conflict(templates::id)
            .do_nothing()
            .execute(&mut conn)
            .await
            .map_err(map_seed_diesel_error)?;

        Ok(TemplateSeedSummary {
            inserted,
            skipped: rows.len().saturating_sub(inserted),
        })
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for error mapping.
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn pool_errors_map_to_connection_errors() {
        assert!(matches!(
            map_pool_error(PoolError::checkout("refused")),
            TemplateRepositoryError::Connection { .. }
        ));
        assert!(matches!(
            map_seed_pool_error(PoolError::build("bad url")),
            TemplateCatalogueSeedError::Connection { .. }
        ));
    }

    #[rstest]
    fn diesel_errors_map_to_query_errors() {
        assert!(matches!(
            map_diesel_error(diesel::result::Error::NotFound),
            TemplateRepositoryError::Query { .. }
        ));
        assert!(matches!(
            map_seed_diesel_error(diesel::result::Error::RollbackTransaction),
            TemplateCatalogueSeedError::Query { .. }
        ));
    }
}
