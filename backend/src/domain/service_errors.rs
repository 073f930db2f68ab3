//! Translation of driven-port failures into domain errors.
//!
//! Connection failures surface as `service_unavailable`, query failures as
//! `internal`, and object storage failures as `external_io`.

use crate::domain::ports::{
    InvitationImageRepositoryError, InvitationRepositoryError, ObjectStorageError,
    TemplateRepositoryError, UserPersistenceError, UserProvisioningRepositoryError,
};
use crate::domain::{Error, NotFoundReason};

pub(crate) fn map_user_error(error: UserPersistenceError) -> Error {
    match error {
        UserPersistenceError::Connection { message } => {
            Error::service_unavailable(format!("user repository unavailable: {message}"))
        }
        UserPersistenceError::Query { message } => {
            Error::internal(format!("user repository error: {message}"))
        }
    }
}

pub(crate) fn map_template_error(error: TemplateRepositoryError) -> Error {
    match error {
        TemplateRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("template repository unavailable: {message}"))
        }
        TemplateRepositoryError::Query { message } => {
            Error::internal(format!("template repository error: {message}"))
        }
    }
}

pub(crate) fn map_invitation_error(error: InvitationRepositoryError) -> Error {
    match error {
        InvitationRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("invitation repository unavailable: {message}"))
        }
        InvitationRepositoryError::Query { message } => {
            Error::internal(format!("invitation repository error: {message}"))
        }
        InvitationRepositoryError::Missing { id } => Error::not_found_because(
            NotFoundReason::NoDraft,
            format!("invitation {id} no longer exists"),
        ),
    }
}

pub(crate) fn map_image_error(error: InvitationImageRepositoryError) -> Error {
    match error {
        InvitationImageRepositoryError::Connection { message } => Error::service_unavailable(
            format!("invitation image repository unavailable: {message}"),
        ),
        InvitationImageRepositoryError::Query { message } => {
            Error::internal(format!("invitation image repository error: {message}"))
        }
        InvitationImageRepositoryError::Missing { id } => Error::not_found_because(
            NotFoundReason::UnknownImage,
            format!("invitation image {id} no longer exists"),
        ),
    }
}

pub(crate) fn map_provisioning_error(error: UserProvisioningRepositoryError) -> Error {
    match error {
        UserProvisioningRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("provisioning store unavailable: {message}"))
        }
        UserProvisioningRepositoryError::Query { message } => {
            Error::internal(format!("provisioning failed: {message}"))
        }
        UserProvisioningRepositoryError::Conflict { .. } => {
            Error::conflict("device identifier is already provisioned")
        }
    }
}

pub(crate) fn map_storage_error(error: ObjectStorageError) -> Error {
    Error::external_io(error.to_string())
}
