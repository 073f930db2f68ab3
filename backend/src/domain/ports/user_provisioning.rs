//! Driving port for first-contact user provisioning.
//!
//! HTTP handlers call [`UserProvisioning`] when a device announces itself. The
//! call is idempotent per device identifier.

use async_trait::async_trait;

use crate::domain::{DeviceIdentifier, Error, Invitation, User, UserId};

/// What a provisioning call did.
#[derive(Debug, Clone, PartialEq)]
pub enum ProvisioningOutcome {
    /// The device was new; a user and its drafts were created.
    Created {
        /// The created user.
        user: User,
        /// One draft per template catalogued at call time.
        invitations: Vec<Invitation>,
    },
    /// The device was already provisioned; nothing changed.
    AlreadyProvisioned {
        /// The existing user.
        user: User,
    },
}

impl ProvisioningOutcome {
    /// The user the device maps to after the call.
    pub fn user(&self) -> &User {
        match self {
            Self::Created { user, .. } | Self::AlreadyProvisioned { user } => user,
        }
    }

    /// Whether this call created the user.
    pub fn is_created(&self) -> bool {
        matches!(self, Self::Created { .. })
    }
}

/// Driving port ensuring a user and its drafts exist for a device.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserProvisioning: Send + Sync {
    /// Ensure `device` has a user and one draft per catalogued template.
    ///
    /// # Errors
    ///
    /// Returns a conflict error when a concurrent call provisioned the same
    /// device first, and service errors when storage fails.
    async fn ensure_user_and_invitations(
        &self,
        device: &DeviceIdentifier,
    ) -> Result<ProvisioningOutcome, Error>;
}

/// Fixture implementation for handler tests that do not exercise provisioning.
///
/// Always reports the device as already provisioned.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureUserProvisioning;

#[async_trait]
impl UserProvisioning for FixtureUserProvisioning {
    async fn ensure_user_and_invitations(
        &self,
        device: &DeviceIdentifier,
    ) -> Result<ProvisioningOutcome, Error> {
        Ok(ProvisioningOutcome::AlreadyProvisioned {
            user: User::new(UserId::new(1), device.clone()),
        })
    }
}
