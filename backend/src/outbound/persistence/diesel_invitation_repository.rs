//! PostgreSQL-backed `InvitationRepository` implementation using Diesel ORM.
//!
//! The latest-draft lookup relies on the `(user_id, template_id, id DESC)`
//! index. Updates address rows by primary key and never write `hash_code`.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{InvitationRepository, InvitationRepositoryError};
use crate::domain::{
    HashCode, Invitation, InvitationAddress, InvitationId, InvitationWords, TemplateId, UserId,
};

use super::diesel_basic_error_mapping::{map_basic_diesel_error, map_basic_pool_error};
use super::models::{InvitationAddressUpdate, InvitationRow, InvitationWordsUpdate};
use super::pool::{DbPool, PoolError};
use super::schema::invitations;

/// Diesel-backed implementation of the invitation repository port.
#[derive(Clone)]
pub struct DieselInvitationRepository {
    pool: DbPool,
}

impl DieselInvitationRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> InvitationRepositoryError {
    map_basic_pool_error(error, InvitationRepositoryError::connection)
}

fn map_diesel_error(error: diesel::result::Error) -> InvitationRepositoryError {
    map_basic_diesel_error(
        error,
        InvitationRepositoryError::query,
        InvitationRepositoryError::connection,
    )
}

/// Translate an affected-row count into the port's `Missing` error.
fn expect_single_row(id: InvitationId, affected: usize) -> Result<(), InvitationRepositoryError> {
    if affected == 0 {
        return Err(InvitationRepositoryError::missing(id.get()));
    }
    Ok(())
}

#[async_trait]
impl InvitationRepository for DieselInvitationRepository {
    async fn find_latest_for(
        &self,
        user_id: UserId,
        template_id: TemplateId,
    ) -> Result<Option<Invitation>, InvitationRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        invitations::table
            .filter(
                invitations::user_id
                    .eq(user_id.get())
                    .and(invitations::template_id.eq(template_id.get())),
            )
            .order(invitations::id.desc())
            .select(InvitationRow::as_select())
            .first::<InvitationRow>(&mut conn)
            .await
            .optional()
            .map(|row| row.map(Invitation::from))
            .map_err(map_diesel_error)
    }

    async fn find_by_hash_code(
        &self,
        hash_code: &HashCode,
    ) -> Result<Option<Invitation>, InvitationRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        invitations::table
            .filter(invitations::hash_code.eq(hash_code.as_str()))
            .select(InvitationRow::as_select())
            .first::<InvitationRow>(&mut conn)
            .await
            .optional()
            .map(|row| row.map(Invitation::from))
            .map_err(map_diesel_error)
    }

    async fn update_words(
        &self,
        id: InvitationId,
        words: &InvitationWords,
    ) -> Result<(), InvitationRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let affected = diesel::update(invitations::table.find(id.get()))
            .set(&InvitationWordsUpdate::from(words))
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        expect_single_row(id, affected)
    }

    async fn update_time(
        &self,
        id: InvitationId,
        time: Option<DateTime<Utc>>,
    ) -> Result<(), InvitationRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let affected = diesel::update(invitations::table.find(id.get()))
            .set(invitations::event_time.eq(time))
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        expect_single_row(id, affected)
    }

    async fn update_address(
        &self,
        id: InvitationId,
        address: &InvitationAddress,
    ) -> Result<(), InvitationRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let affected = diesel::update(invitations::table.find(id.get()))
            .set(&InvitationAddressUpdate::from(address))
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        expect_single_row(id, affected)
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for error mapping.
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn zero_affected_rows_is_missing() {
        assert_eq!(
            expect_single_row(InvitationId::new(4), 0),
            Err(InvitationRepositoryError::missing(4_i64))
        );
        assert!(expect_single_row(InvitationId::new(4), 1).is_ok());
    }

    #[rstest]
    fn pool_error_maps_to_connection_error() {
        let error = map_pool_error(PoolError::checkout("connection refused"));
        assert!(matches!(error, InvitationRepositoryError::Connection { .. }));
    }
}
