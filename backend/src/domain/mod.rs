//! Domain primitives, services and ports.
//!
//! Purpose: Define strongly typed invitation entities and the services that
//! operate on them through ports. Keep types free of transport and storage
//! concerns and document invariants and serialisation contracts (serde) in
//! each type's Rustdoc.
//!
//! Public surface:
//! - Error: transport-agnostic failure.
//! - User, Template, Invitation, InvitationImage: stored entities.
//! - InvitationView: public read projection served by share code.
//! - HashAssigner, FeistelHashAssigner: share-code derivation.
//! - Services implementing the driving ports in [`ports`].

pub mod error;
pub mod hash_code;
mod ids;
pub mod invitation;
pub mod invitation_service;
pub mod invitation_view;
pub mod ports;
pub mod provisioning_service;
mod service_errors;
pub mod template;
pub mod template_service;
pub mod trace_id;
pub mod user;

pub use self::error::{Error, ErrorCode, NotFoundReason};
pub use self::hash_code::{DEFAULT_HASH_SALT, FeistelHashAssigner, HASH_CODE_LEN, HashAssigner};
pub use self::invitation::{
    Coordinates, HashCode, ImageUpload, ImageUploadValidationError, ImageUrl, Invitation,
    InvitationAddress, InvitationId, InvitationImage, InvitationImageId, InvitationWords,
    MapLocation,
};
pub use self::invitation_service::{InvitationPorts, InvitationService};
pub use self::invitation_view::{InvitationImageView, InvitationView, MapInfo};
pub use self::provisioning_service::UserProvisioningService;
pub use self::template::{Template, TemplateId};
pub use self::template_service::TemplateCatalogueService;
pub use self::trace_id::{TRACE_ID_HEADER, TraceId};
pub use self::user::{
    DEVICE_IDENTIFIER_MAX, DeviceIdentifier, DeviceIdentifierValidationError, User, UserId,
};

/// Convenient API result alias.
///
/// # Examples
/// ```
/// use invitation_backend::domain::{ApiResult, Error};
///
/// fn lookup() -> ApiResult<()> {
///     Err(Error::not_found("nope"))
/// }
/// assert!(lookup().is_err());
/// ```
pub type ApiResult<T> = Result<T, Error>;
