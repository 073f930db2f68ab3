//! Port abstraction for invitation image rows.

use async_trait::async_trait;

use crate::domain::{ImageUrl, InvitationId, InvitationImage, InvitationImageId};

use super::define_port_error;

define_port_error! {
    /// Persistence errors raised by invitation image repository adapters.
    pub enum InvitationImageRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } =>
            "invitation image repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } =>
            "invitation image repository query failed: {message}",
        /// The targeted row no longer exists.
        Missing { id: i64 } => "invitation image {id} does not exist",
    }
}

/// Port for invitation image rows.
///
/// Rows only reference blobs; blob lifetimes are managed by the caller through
/// [`ObjectStorage`](super::ObjectStorage).
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait InvitationImageRepository: Send + Sync {
    /// Fetch one image row.
    async fn find_by_id(
        &self,
        id: InvitationImageId,
    ) -> Result<Option<InvitationImage>, InvitationImageRepositoryError>;

    /// Every image row owned by `invitation_id`, in no particular order.
    async fn find_all_by_invitation_id(
        &self,
        invitation_id: InvitationId,
    ) -> Result<Vec<InvitationImage>, InvitationImageRepositoryError>;

    /// Insert a row pointing at an already stored blob.
    async fn insert(
        &self,
        invitation_id: InvitationId,
        image_url: &ImageUrl,
    ) -> Result<InvitationImage, InvitationImageRepositoryError>;

    /// Repoint an existing row at a different blob.
    async fn update_url(
        &self,
        id: InvitationImageId,
        image_url: &ImageUrl,
    ) -> Result<InvitationImage, InvitationImageRepositoryError>;

    /// Remove one row.
    async fn delete_by_id(&self, id: InvitationImageId)
    -> Result<(), InvitationImageRepositoryError>;
}
