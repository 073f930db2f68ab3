//! PostgreSQL-backed user provisioning adapter.
//!
//! Creates the user, one draft per catalogued template and each draft's
//! share code inside a single transaction. The share code is derived from
//! the generated row id, so drafts are inserted first and stamped afterwards.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::scoped_futures::ScopedFutureExt;
use diesel_async::{AsyncConnection, RunQueryDsl};

use crate::domain::ports::{
    ProvisionedUser, UserProvisioningRepository, UserProvisioningRepositoryError,
};
use crate::domain::{DeviceIdentifier, HashAssigner, Invitation, InvitationId};

use super::diesel_basic_error_mapping::{
    is_unique_violation_of, map_basic_diesel_error, map_basic_pool_error,
};
use super::models::{InvitationRow, NewInvitationRow, NewUserRow, UserRow};
use super::pool::{DbPool, PoolError};
use super::schema::{invitations, templates, users};

/// Diesel-backed implementation of the provisioning port.
#[derive(Clone)]
pub struct DieselUserProvisioningRepository {
    pool: DbPool,
}

impl DieselUserProvisioningRepository {
    /// Create a new provisioning repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> UserProvisioningRepositoryError {
    map_basic_pool_error(error, UserProvisioningRepositoryError::connection)
}

const DEVICE_IDENTIFIER_CONSTRAINT: &str = "users_device_identifier_key";

/// Map Diesel errors, reporting a duplicate device as a provisioning race.
///
/// Any other unique violation (a share-code collision from a misbehaving
/// assigner) is a query failure and rolls the transaction back like one.
fn map_diesel_error(
    error: diesel::result::Error,
    device: &DeviceIdentifier,
) -> UserProvisioningRepositoryError {
    if is_unique_violation_of(&error, DEVICE_IDENTIFIER_CONSTRAINT) {
        return UserProvisioningRepositoryError::conflict(device.as_str());
    }
    map_basic_diesel_error(
        error,
        UserProvisioningRepositoryError::query,
        UserProvisioningRepositoryError::connection,
    )
}

#[async_trait]
impl UserProvisioningRepository for DieselUserProvisioningRepository {
    async fn provision(
        &self,
        device: &DeviceIdentifier,
        hash_assigner: &dyn HashAssigner,
    ) -> Result<ProvisionedUser, UserProvisioningRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let device_identifier = device.as_str();

        let (user_row, draft_rows) = conn
            .transaction(|conn| {
                async move {
                    let user_row: UserRow = diesel::insert_into(users::table)
                        .values(&NewUserRow { device_identifier })
                        .returning(UserRow::as_returning())
                        .get_result(conn)
                        .await?;

                    let template_ids: Vec<i64> = templates::table
                        .order(templates::id.asc())
                        .select(templates::id)
                        .load(conn)
                        .await?;

                    let new_drafts: Vec<NewInvitationRow> = template_ids
                        .into_iter()
                        .map(|template_id| NewInvitationRow {
                            user_id: user_row.id,
                            template_id,
                        })
                        .collect();
                    if new_drafts.is_empty() {
                        return Ok((user_row, Vec::new()));
                    }

                    let inserted: Vec<InvitationRow> = diesel::insert_into(invitations::table)
                        .values(&new_drafts)
                        .returning(InvitationRow::as_returning())
                        .get_results(conn)
                        .await?;

                    let mut stamped = Vec::with_capacity(inserted.len());
                    for draft in inserted {
                        let code = hash_assigner.assign(InvitationId::new(draft.id));
                        let row: InvitationRow = diesel::update(invitations::table.find(draft.id))
                            .set(invitations::hash_code.eq(code.as_str()))
                            .returning(InvitationRow::as_returning())
                            .get_result(conn)
                            .await?;
                        stamped.push(row);
                    }

                    Ok::<_, diesel::result::Error>((user_row, stamped))
                }
                .scope_boxed()
            })
            .await
            .map_err(|err| map_diesel_error(err, device))?;

        let user = user_row
            .into_domain()
            .map_err(UserProvisioningRepositoryError::query)?;
        Ok(ProvisionedUser {
            user,
            invitations: draft_rows.into_iter().map(Invitation::from).collect(),
        })
    }
}
