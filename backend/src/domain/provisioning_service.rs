//! First-contact provisioning of users and their invitation drafts.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::info;

use crate::domain::ports::{
    ProvisioningOutcome, UserProvisioning, UserProvisioningRepository, UserRepository,
};
use crate::domain::service_errors::{map_provisioning_error, map_user_error};
use crate::domain::{DeviceIdentifier, Error, HashAssigner};

/// Provisioning service implementing [`UserProvisioning`].
///
/// Templates are enumerated when the user is first created; templates added
/// later are not provisioned retroactively.
#[derive(Clone)]
pub struct UserProvisioningService<U, P> {
    users: Arc<U>,
    provisioning: Arc<P>,
    hash_assigner: Arc<dyn HashAssigner>,
}

impl<U, P> UserProvisioningService<U, P> {
    /// Create a new service with the given repositories and share-code assigner.
    pub fn new(users: Arc<U>, provisioning: Arc<P>, hash_assigner: Arc<dyn HashAssigner>) -> Self {
        Self {
            users,
            provisioning,
            hash_assigner,
        }
    }
}

#[async_trait]
impl<U, P> UserProvisioning for UserProvisioningService<U, P>
where
    U: UserRepository,
    P: UserProvisioningRepository,
{
    async fn ensure_user_and_invitations(
        &self,
        device: &DeviceIdentifier,
    ) -> Result<ProvisioningOutcome, Error> {
        if let Some(user) = self
            .users
            .find_by_device_identifier(device)
            .await
            .map_err(map_user_error)?
        {
            return Ok(ProvisioningOutcome::AlreadyProvisioned { user });
        }

        let provisioned = self
            .provisioning
            .provision(device, self.hash_assigner.as_ref())
            .await
            .map_err(map_provisioning_error)?;

        info!(
            user_id = %provisioned.user.id(),
            invitations = provisioned.invitations.len(),
            "provisioned new device"
        );
        Ok(ProvisioningOutcome::Created {
            user: provisioned.user,
            invitations: provisioned.invitations,
        })
    }
}

#[cfg(test)]
#[path = "provisioning_service_tests.rs"]
mod tests;
