//! Invitation mutation and read services.
//!
//! Every mutation resolves its target the same way: the device identifier
//! names a user, and the user's most recently created invitation for the
//! template is the draft being edited. Image operations additionally move
//! blobs through object storage and keep rows and blobs consistent:
//!
//! - upload stores the blob after the draft is resolved and removes it again
//!   when the row cannot be written;
//! - replace repoints the row before deleting the old blob, and points it
//!   back at the old blob when that delete fails;
//! - delete removes the blob first and keeps the row when that fails.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{info, warn};

use crate::domain::ports::{
    DraftTarget, InvitationCommand, InvitationImageRepository, InvitationQuery,
    InvitationRepository, ObjectStorage, ObjectStorageError, TemplateRepository,
    UpdateAddressRequest, UpdateTimeRequest, UpdateWordsRequest, UploadImageRequest,
    UserRepository,
};
use crate::domain::service_errors::{
    map_image_error, map_invitation_error, map_storage_error, map_template_error, map_user_error,
};
use crate::domain::{
    DeviceIdentifier, Error, HashCode, ImageUpload, ImageUrl, Invitation, InvitationImage,
    InvitationImageId, InvitationView, NotFoundReason, TemplateId, User,
};

/// Parameter object bundling the driven ports the invitation service needs.
#[derive(Clone)]
pub struct InvitationPorts {
    pub users: Arc<dyn UserRepository>,
    pub templates: Arc<dyn TemplateRepository>,
    pub invitations: Arc<dyn InvitationRepository>,
    pub images: Arc<dyn InvitationImageRepository>,
    pub storage: Arc<dyn ObjectStorage>,
}

/// Invitation service implementing [`InvitationCommand`] and [`InvitationQuery`].
#[derive(Clone)]
pub struct InvitationService {
    ports: InvitationPorts,
}

impl InvitationService {
    /// Create a new service over the given ports.
    pub fn new(ports: InvitationPorts) -> Self {
        Self { ports }
    }

    async fn resolve_user(&self, device: &DeviceIdentifier) -> Result<User, Error> {
        self.ports
            .users
            .find_by_device_identifier(device)
            .await
            .map_err(map_user_error)?
            .ok_or_else(|| {
                Error::not_found_because(
                    NotFoundReason::UnknownDevice,
                    "no user is provisioned for this device identifier",
                )
            })
    }

    async fn find_draft(&self, user: &User, template_id: TemplateId) -> Result<Invitation, Error> {
        self.ports
            .invitations
            .find_latest_for(user.id(), template_id)
            .await
            .map_err(map_invitation_error)?
            .ok_or_else(|| {
                Error::not_found_because(
                    NotFoundReason::NoDraft,
                    format!("no invitation draft exists for template {template_id}"),
                )
            })
    }

    async fn resolve_draft(&self, target: &DraftTarget) -> Result<Invitation, Error> {
        let user = self.resolve_user(&target.device).await?;
        self.find_draft(&user, target.template_id).await
    }

    async fn resolve_image(&self, image_id: InvitationImageId) -> Result<InvitationImage, Error> {
        self.ports
            .images
            .find_by_id(image_id)
            .await
            .map_err(map_image_error)?
            .ok_or_else(|| {
                Error::not_found_because(
                    NotFoundReason::UnknownImage,
                    format!("invitation image {image_id} does not exist"),
                )
            })
    }

    async fn store_blob(&self, upload: &ImageUpload) -> Result<ImageUrl, Error> {
        self.ports
            .storage
            .upload(upload)
            .await
            .map_err(map_storage_error)
    }

    /// Delete a blob, treating an already absent blob as deleted.
    ///
    /// A URL the store never issued is an error: the blob may still exist
    /// elsewhere and dropping its row would orphan it.
    async fn delete_blob(&self, url: &ImageUrl) -> Result<(), Error> {
        match self.ports.storage.delete(url).await {
            Ok(()) => Ok(()),
            Err(ObjectStorageError::Missing { url: missing }) => {
                warn!(url = %missing, "blob already absent from object storage");
                Ok(())
            }
            Err(err) => Err(map_storage_error(err)),
        }
    }

    /// Best-effort removal of a blob no row will ever reference.
    async fn discard_blob(&self, url: &ImageUrl) {
        if let Err(err) = self.ports.storage.delete(url).await {
            warn!(url = %url, error = %err, "failed to discard unreferenced blob");
        }
    }
}

#[async_trait]
impl InvitationCommand for InvitationService {
    async fn update_words(&self, request: UpdateWordsRequest) -> Result<(), Error> {
        let draft = self.resolve_draft(&request.target).await?;
        self.ports
            .invitations
            .update_words(draft.id, &request.words)
            .await
            .map_err(map_invitation_error)
    }

    async fn update_time(&self, request: UpdateTimeRequest) -> Result<(), Error> {
        let draft = self.resolve_draft(&request.target).await?;
        self.ports
            .invitations
            .update_time(draft.id, request.time)
            .await
            .map_err(map_invitation_error)
    }

    async fn update_address(&self, request: UpdateAddressRequest) -> Result<(), Error> {
        let draft = self.resolve_draft(&request.target).await?;
        self.ports
            .invitations
            .update_address(draft.id, &request.address)
            .await
            .map_err(map_invitation_error)
    }

    async fn upload_image(&self, request: UploadImageRequest) -> Result<InvitationImage, Error> {
        let draft = self.resolve_draft(&request.target).await?;
        let url = self.store_blob(&request.upload).await?;

        match self.ports.images.insert(draft.id, &url).await {
            Ok(image) => {
                info!(image_id = %image.id, invitation_id = %draft.id, "uploaded invitation image");
                Ok(image)
            }
            Err(err) => {
                self.discard_blob(&url).await;
                Err(map_image_error(err))
            }
        }
    }

    async fn replace_image(
        &self,
        image_id: InvitationImageId,
        upload: ImageUpload,
    ) -> Result<InvitationImage, Error> {
        let current = self.resolve_image(image_id).await?;
        let url = self.store_blob(&upload).await?;

        let updated = match self.ports.images.update_url(image_id, &url).await {
            Ok(updated) => updated,
            Err(err) => {
                self.discard_blob(&url).await;
                return Err(map_image_error(err));
            }
        };

        if let Err(err) = self.delete_blob(&current.image_url).await {
            match self
                .ports
                .images
                .update_url(image_id, &current.image_url)
                .await
            {
                Ok(_) => self.discard_blob(&url).await,
                Err(restore) => warn!(
                    image_id = %image_id,
                    error = %restore,
                    "failed to point image back at its previous blob"
                ),
            }
            return Err(err);
        }
        info!(image_id = %image_id, "replaced invitation image");
        Ok(updated)
    }

    async fn delete_image(&self, image_id: InvitationImageId) -> Result<(), Error> {
        let image = self.resolve_image(image_id).await?;
        self.delete_blob(&image.image_url).await?;
        self.ports
            .images
            .delete_by_id(image_id)
            .await
            .map_err(map_image_error)?;
        info!(image_id = %image_id, "deleted invitation image");
        Ok(())
    }
}

#[async_trait]
impl InvitationQuery for InvitationService {
    async fn get_public_view(&self, hash_code: &HashCode) -> Result<InvitationView, Error> {
        let invitation = self
            .ports
            .invitations
            .find_by_hash_code(hash_code)
            .await
            .map_err(map_invitation_error)?
            .ok_or_else(|| {
                Error::not_found_because(
                    NotFoundReason::UnknownHashCode,
                    "invitation link is invalid or expired",
                )
            })?;

        let template = self
            .ports
            .templates
            .find_by_id(invitation.template_id)
            .await
            .map_err(map_template_error)?
            .ok_or_else(|| {
                Error::not_found_because(
                    NotFoundReason::TemplateMissing,
                    format!(
                        "template {} referenced by the invitation is missing",
                        invitation.template_id
                    ),
                )
            })?;

        let images = self
            .ports
            .images
            .find_all_by_invitation_id(invitation.id)
            .await
            .map_err(map_image_error)?;

        Ok(InvitationView::assemble(template, invitation, images))
    }

    async fn get_hash_code(
        &self,
        device: &DeviceIdentifier,
        template_id: TemplateId,
    ) -> Result<HashCode, Error> {
        let user = self.resolve_user(device).await?;

        let known = self
            .ports
            .templates
            .exists_by_id(template_id)
            .await
            .map_err(map_template_error)?;
        if !known {
            return Err(Error::not_found_because(
                NotFoundReason::UnknownTemplate,
                format!("template {template_id} does not exist"),
            ));
        }

        let draft = self.find_draft(&user, template_id).await?;
        draft.hash_code.ok_or_else(|| {
            Error::internal(format!("invitation {} has no share code", draft.id))
        })
    }
}

#[cfg(test)]
#[path = "invitation_service_tests.rs"]
mod tests;
