//! PostgreSQL-backed `InvitationImageRepository` implementation.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{InvitationImageRepository, InvitationImageRepositoryError};
use crate::domain::{ImageUrl, InvitationId, InvitationImage, InvitationImageId};

use super::diesel_basic_error_mapping::{map_basic_diesel_error, map_basic_pool_error};
use super::models::{InvitationImageRow, NewInvitationImageRow};
use super::pool::{DbPool, PoolError};
use super::schema::invitation_images;

/// Diesel-backed implementation of the invitation image port.
#[derive(Clone)]
pub struct DieselInvitationImageRepository {
    pool: DbPool,
}

impl DieselInvitationImageRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> InvitationImageRepositoryError {
    map_basic_pool_error(error, InvitationImageRepositoryError::connection)
}

fn map_diesel_error(error: diesel::result::Error) -> InvitationImageRepositoryError {
    map_basic_diesel_error(
        error,
        InvitationImageRepositoryError::query,
        InvitationImageRepositoryError::connection,
    )
}

#[async_trait]
impl InvitationImageRepository for DieselInvitationImageRepository {
    async fn find_by_id(
        &self,
        id: InvitationImageId,
    ) -> Result<Option<InvitationImage>, InvitationImageRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        invitation_images::table
            .find(id.get())
            .select(InvitationImageRow::as_select())
            .first::<InvitationImageRow>(&mut conn)
            .await
            .optional()
            .map(|row| row.map(InvitationImage::from))
            .map_err(map_diesel_error)
    }

    async fn find_all_by_invitation_id(
        &self,
        invitation_id: InvitationId,
    ) -> Result<Vec<InvitationImage>, InvitationImageRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let rows: Vec<InvitationImageRow> = invitation_images::table
            .filter(invitation_images::invitation_id.eq(invitation_id.get()))
            .order(invitation_images::id.asc())
            .select(InvitationImageRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        Ok(rows.into_iter().map(InvitationImage::from).collect())
    }

    async fn insert(
        &self,
        invitation_id: InvitationId,
        image_url: &ImageUrl,
    ) -> Result<InvitationImage, InvitationImageRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        diesel::insert_into(invitation_images::table)
            .values(&NewInvitationImageRow {
                invitation_id: invitation_id.get(),
                image_url: image_url.as_str(),
            })
            .returning(InvitationImageRow::as_returning())
            .get_result::<InvitationImageRow>(&mut conn)
            .await
            .map(InvitationImage::from)
            .map_err(map_diesel_error)
    }

    async fn update_url(
        &self,
        id: InvitationImageId,
        image_url: &ImageUrl,
    ) -> Result<InvitationImage, InvitationImageRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        diesel::update(invitation_images::table.find(id.get()))
            .set(invitation_images::image_url.eq(image_url.as_str()))
            .returning(InvitationImageRow::as_returning())
            .get_result::<InvitationImageRow>(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?
            .map(InvitationImage::from)
            .ok_or_else(|| InvitationImageRepositoryError::missing(id.get()))
    }

    async fn delete_by_id(
        &self,
        id: InvitationImageId,
    ) -> Result<(), InvitationImageRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let affected = diesel::delete(invitation_images::table.find(id.get()))
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        if affected == 0 {
            return Err(InvitationImageRepositoryError::missing(id.get()));
        }
        Ok(())
    }
}
