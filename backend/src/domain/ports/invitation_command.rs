//! Driving port for invitation mutations.
//!
//! Text, time and address updates target the most recent invitation of the
//! caller's device for one template. Image operations additionally move blobs
//! through object storage.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::domain::{
    DeviceIdentifier, Error, ImageUpload, InvitationAddress, InvitationImage, InvitationImageId,
    InvitationWords, TemplateId,
};

/// Identifies the draft a mutation applies to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DraftTarget {
    /// Device whose user owns the draft.
    pub device: DeviceIdentifier,
    /// Template the draft customises.
    pub template_id: TemplateId,
}

/// Request to replace the title and body of a draft.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdateWordsRequest {
    /// Draft to update.
    pub target: DraftTarget,
    /// New title and body.
    pub words: InvitationWords,
}

/// Request to replace the event time of a draft.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdateTimeRequest {
    /// Draft to update.
    pub target: DraftTarget,
    /// New event time; `None` clears it.
    pub time: Option<DateTime<Utc>>,
}

/// Request to replace every address field of a draft.
#[derive(Debug, Clone, PartialEq)]
pub struct UpdateAddressRequest {
    /// Draft to update.
    pub target: DraftTarget,
    /// New address.
    pub address: InvitationAddress,
}

/// Request to attach a new image to a draft.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadImageRequest {
    /// Draft the image belongs to.
    pub target: DraftTarget,
    /// Image payload.
    pub upload: ImageUpload,
}

/// Driving port for invitation mutations.
///
/// # Errors
///
/// Every operation fails with a not-found error naming the unknown device,
/// the missing draft or the missing image. Image operations fail with an
/// external I/O error when object storage fails.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait InvitationCommand: Send + Sync {
    /// Replace the title and body of the targeted draft.
    async fn update_words(&self, request: UpdateWordsRequest) -> Result<(), Error>;

    /// Replace the event time of the targeted draft.
    async fn update_time(&self, request: UpdateTimeRequest) -> Result<(), Error>;

    /// Replace the address of the targeted draft.
    async fn update_address(&self, request: UpdateAddressRequest) -> Result<(), Error>;

    /// Store a new image and attach it to the targeted draft.
    async fn upload_image(&self, request: UploadImageRequest) -> Result<InvitationImage, Error>;

    /// Swap the blob behind an existing image.
    async fn replace_image(
        &self,
        image_id: InvitationImageId,
        upload: ImageUpload,
    ) -> Result<InvitationImage, Error>;

    /// Delete an image blob and then its row.
    async fn delete_image(&self, image_id: InvitationImageId) -> Result<(), Error>;
}
