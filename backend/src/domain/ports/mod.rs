//! Domain ports and supporting types for the hexagonal boundary.
//!
//! Driven ports (repositories, object storage) are implemented by outbound
//! adapters. Driving ports (commands and queries) are implemented by domain
//! services and consumed by inbound adapters.

mod macros;
pub(crate) use macros::define_port_error;

mod invitation_command;
mod invitation_image_repository;
mod invitation_query;
mod invitation_repository;
mod object_storage;
mod template_catalogue_seeder;
mod template_query;
mod template_repository;
mod user_provisioning;
mod user_provisioning_repository;
mod user_repository;

#[cfg(test)]
pub use invitation_command::MockInvitationCommand;
pub use invitation_command::{
    DraftTarget, InvitationCommand, UpdateAddressRequest, UpdateTimeRequest, UpdateWordsRequest,
    UploadImageRequest,
};
#[cfg(test)]
pub use invitation_image_repository::MockInvitationImageRepository;
pub use invitation_image_repository::{InvitationImageRepository, InvitationImageRepositoryError};
#[cfg(test)]
pub use invitation_query::MockInvitationQuery;
pub use invitation_query::InvitationQuery;
#[cfg(test)]
pub use invitation_repository::MockInvitationRepository;
pub use invitation_repository::{InvitationRepository, InvitationRepositoryError};
#[cfg(test)]
pub use object_storage::MockObjectStorage;
pub use object_storage::{ObjectStorage, ObjectStorageError};
#[cfg(test)]
pub use template_catalogue_seeder::MockTemplateCatalogueSeeder;
pub use template_catalogue_seeder::{
    TemplateCatalogueSeedError, TemplateCatalogueSeeder, TemplateSeedSummary,
};
#[cfg(test)]
pub use template_query::MockTemplateQuery;
pub use template_query::TemplateQuery;
#[cfg(test)]
pub use template_repository::MockTemplateRepository;
pub use template_repository::{
    FixtureTemplateRepository, TemplateRepository, TemplateRepositoryError,
};
#[cfg(test)]
pub use user_provisioning::MockUserProvisioning;
pub use user_provisioning::{FixtureUserProvisioning, ProvisioningOutcome, UserProvisioning};
pub use user_provisioning_repository::{
    ProvisionedUser, UserProvisioningRepository, UserProvisioningRepositoryError,
};
#[cfg(test)]
pub use user_repository::MockUserRepository;
pub use user_repository::{UserPersistenceError, UserRepository};
