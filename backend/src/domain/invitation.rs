//! Invitation aggregate and its images.
//!
//! An invitation is one user's customisation of one template. Several rows may
//! exist for the same `(user, template)` pair over time; the workflow always
//! targets the most recently created one.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::ids::define_numeric_id;
use super::{TemplateId, UserId};

define_numeric_id! {
    /// Storage-generated identifier of an invitation row.
    pub struct InvitationId;
}

define_numeric_id! {
    /// Storage-generated identifier of an invitation image row.
    pub struct InvitationImageId;
}

/// Short public share code derived from an invitation id.
///
/// The code is the only invitation identifier exposed to unauthenticated
/// readers. It is assigned once and never changes.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct HashCode(String);

impl HashCode {
    /// Wrap an already derived or persisted share code.
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Borrow the share code.
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl AsRef<str> for HashCode {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for HashCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Title and body text of an invitation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InvitationWords {
    /// Invitation headline.
    pub title: Option<String>,
    /// Invitation body text.
    pub contents: Option<String>,
}

/// Map coordinates of a named place. Both axes are always present together.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    /// Horizontal coordinate as reported by the map provider.
    pub x: f64,
    /// Vertical coordinate as reported by the map provider.
    pub y: f64,
}

/// Structured location of a named place picked from a map.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MapLocation {
    /// Display name of the address.
    pub address_name: String,
    /// Road address of the place.
    pub road_address_name: String,
    /// Coordinates of the place.
    pub coordinates: Coordinates,
}

/// Address customisation of an invitation.
///
/// `location` is `None` for custom or unset places; a custom place may still
/// carry a free-form `place_name`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InvitationAddress {
    /// Name of the venue as shown to guests.
    pub place_name: Option<String>,
    /// Map location when a named place was chosen.
    pub location: Option<MapLocation>,
}

/// One user's customisation of one template.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Invitation {
    /// Storage identifier.
    pub id: InvitationId,
    /// Owning user.
    pub user_id: UserId,
    /// Template this invitation customises.
    pub template_id: TemplateId,
    /// Title and body.
    pub words: InvitationWords,
    /// Event time.
    pub time: Option<DateTime<Utc>>,
    /// Venue and optional map location.
    pub address: InvitationAddress,
    /// Public share code; assigned during provisioning.
    pub hash_code: Option<HashCode>,
}

impl Invitation {
    /// Build an uncustomised draft for a `(user, template)` pair.
    ///
    /// # Examples
    /// ```
    /// use invitation_backend::domain::{Invitation, InvitationId, TemplateId, UserId};
    ///
    /// let draft = Invitation::draft(InvitationId::new(1), UserId::new(2), TemplateId::new(3));
    /// assert!(draft.words.title.is_none());
    /// assert!(draft.hash_code.is_none());
    /// ```
    pub fn draft(id: InvitationId, user_id: UserId, template_id: TemplateId) -> Self {
        Self {
            id,
            user_id,
            template_id,
            words: InvitationWords::default(),
            time: None,
            address: InvitationAddress::default(),
            hash_code: None,
        }
    }
}

/// URL of a blob held by the object storage gateway.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ImageUrl(String);

impl ImageUrl {
    /// Wrap a URL returned by object storage.
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Borrow the URL.
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl AsRef<str> for ImageUrl {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for ImageUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Uploaded image attached to an invitation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InvitationImage {
    /// Storage identifier.
    pub id: InvitationImageId,
    /// Owning invitation.
    pub invitation_id: InvitationId,
    /// Where the blob can be fetched.
    pub image_url: ImageUrl,
}

/// Validation errors returned by [`ImageUpload::new`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum ImageUploadValidationError {
    /// The upload carried no bytes.
    #[error("image upload must not be empty")]
    Empty,
}

/// Binary image payload handed to object storage.
#[derive(Clone, PartialEq, Eq)]
pub struct ImageUpload {
    content_type: Option<String>,
    bytes: Vec<u8>,
}

impl ImageUpload {
    /// Validate and wrap an image payload.
    ///
    /// # Examples
    /// ```
    /// use invitation_backend::domain::ImageUpload;
    ///
    /// let upload = ImageUpload::new(vec![0x89, 0x50], Some("image/png".into()))
    ///     .expect("non-empty upload");
    /// assert_eq!(upload.file_extension(), "png");
    /// assert!(ImageUpload::new(Vec::new(), None).is_err());
    /// ```
    pub fn new(
        bytes: Vec<u8>,
        content_type: Option<String>,
    ) -> Result<Self, ImageUploadValidationError> {
        if bytes.is_empty() {
            return Err(ImageUploadValidationError::Empty);
        }
        Ok(Self {
            content_type,
            bytes,
        })
    }

    /// Declared MIME type, if the client sent one.
    pub fn content_type(&self) -> Option<&str> {
        self.content_type.as_deref()
    }

    /// Raw image bytes.
    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// File extension matching the declared content type.
    pub fn file_extension(&self) -> &'static str {
        match self.content_type.as_deref() {
            Some("image/png") => "png",
            Some("image/jpeg" | "image/jpg") => "jpg",
            Some("image/gif") => "gif",
            Some("image/webp") => "webp",
            Some("image/heic") => "heic",
            _ => "bin",
        }
    }
}

impl fmt::Debug for ImageUpload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ImageUpload")
            .field("content_type", &self.content_type)
            .field("len", &self.bytes.len())
            .finish()
    }
}
