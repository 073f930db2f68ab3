//! Port abstraction for user lookups and their errors.
use async_trait::async_trait;

use crate::domain::{DeviceIdentifier, User};

use super::define_port_error;

define_port_error! {
    /// Persistence errors raised by user repository adapters.
    pub enum UserPersistenceError {
        /// Repository connection could not be established.
        Connection { message: String } => "user repository connection failed: {message}",
        /// Query failed during execution.
        Query { message: String } => "user repository query failed: {message}",
    }
}

/// Read access to provisioned users.
///
/// Users are created only through
/// [`UserProvisioningRepository`](super::UserProvisioningRepository), so this
/// port is lookup-only.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Fetch the user provisioned for `device`, if any.
    async fn find_by_device_identifier(
        &self,
        device: &DeviceIdentifier,
    ) -> Result<Option<User>, UserPersistenceError>;
}
