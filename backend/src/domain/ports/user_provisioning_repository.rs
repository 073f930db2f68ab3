//! Port abstraction for first-contact user provisioning.
//!
//! Provisioning spans three tables, so it gets its own transactional port
//! instead of being composed from the per-entity repositories. Adapters must
//! ensure the user insert, the draft inserts and the share-code stamps commit
//! or roll back together.

use async_trait::async_trait;

use crate::domain::{DeviceIdentifier, HashAssigner, Invitation, User};

use super::define_port_error;

define_port_error! {
    /// Errors raised by user provisioning adapters.
    pub enum UserProvisioningRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } => "user provisioning connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "user provisioning query failed: {message}",
        /// Another request already created a user for the device.
        Conflict { device_identifier: String } =>
            "device {device_identifier} is already provisioned",
    }
}

/// Result of a successful provisioning transaction.
#[derive(Debug, Clone, PartialEq)]
pub struct ProvisionedUser {
    /// The created user.
    pub user: User,
    /// One draft per template catalogued at call time, each with a share code.
    pub invitations: Vec<Invitation>,
}

/// Port for creating a user together with its invitation drafts.
///
/// Implementations must:
/// - Insert the user, failing with `Conflict` when the device identifier is
///   already taken.
/// - Insert one empty draft per template in the catalogue at call time.
/// - Stamp each draft with `hash_assigner.assign(draft.id)`.
/// - Roll back all changes if any step fails.
#[async_trait]
pub trait UserProvisioningRepository: Send + Sync {
    /// Create the user and its drafts atomically.
    async fn provision(
        &self,
        device: &DeviceIdentifier,
        hash_assigner: &dyn HashAssigner,
    ) -> Result<ProvisionedUser, UserProvisioningRepositoryError>;
}
