//! Driving port for invitation reads.

use async_trait::async_trait;

use crate::domain::{DeviceIdentifier, Error, HashCode, InvitationView, TemplateId};

/// Driving port for the public view and share-code lookups.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait InvitationQuery: Send + Sync {
    /// Assemble the public view of the invitation carrying `hash_code`.
    ///
    /// # Errors
    ///
    /// Fails with not-found when no invitation carries the code or when the
    /// invitation's template has disappeared from the catalogue.
    async fn get_public_view(&self, hash_code: &HashCode) -> Result<InvitationView, Error>;

    /// Share code of the device's most recent draft for `template_id`.
    ///
    /// # Errors
    ///
    /// Fails with distinct not-found reasons for an unknown device, an unknown
    /// template and a missing draft.
    async fn get_hash_code(
        &self,
        device: &DeviceIdentifier,
        template_id: TemplateId,
    ) -> Result<HashCode, Error>;
}
