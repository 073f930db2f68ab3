//! User data model.
//!
//! A user is nothing more than a device installation: the client app supplies
//! an opaque device identifier and the backend assigns a numeric id on first
//! contact. Users are never updated or deleted by the invitation workflow.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::ids::define_numeric_id;

define_numeric_id! {
    /// Storage-generated identifier of a user row.
    pub struct UserId;
}

/// Maximum accepted length of a device identifier, in characters.
pub const DEVICE_IDENTIFIER_MAX: usize = 255;

/// Validation errors returned by [`DeviceIdentifier::new`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeviceIdentifierValidationError {
    /// The identifier is empty once trimmed.
    Empty,
    /// The identifier carries leading or trailing whitespace.
    SurroundingWhitespace,
    /// The identifier exceeds [`DEVICE_IDENTIFIER_MAX`] characters.
    TooLong { max: usize },
    /// The identifier contains control characters.
    ControlCharacters,
}

impl fmt::Display for DeviceIdentifierValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => write!(f, "device identifier must not be empty"),
            Self::SurroundingWhitespace => {
                write!(f, "device identifier must not contain surrounding whitespace")
            }
            Self::TooLong { max } => {
                write!(f, "device identifier must be at most {max} characters")
            }
            Self::ControlCharacters => {
                write!(f, "device identifier must not contain control characters")
            }
        }
    }
}

impl std::error::Error for DeviceIdentifierValidationError {}

/// Opaque client-supplied string naming one app installation.
///
/// Stands in for an account: there is no authentication beyond knowing it.
///
/// # Examples
/// ```
/// use invitation_backend::domain::DeviceIdentifier;
///
/// let device = DeviceIdentifier::new("ios-4f1c").expect("valid identifier");
/// assert_eq!(device.as_ref(), "ios-4f1c");
/// assert!(DeviceIdentifier::new("  ").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct DeviceIdentifier(String);

impl DeviceIdentifier {
    /// Validate and construct a device identifier.
    pub fn new(value: impl Into<String>) -> Result<Self, DeviceIdentifierValidationError> {
        let raw = value.into();
        if raw.trim().is_empty() {
            return Err(DeviceIdentifierValidationError::Empty);
        }
        if raw.trim() != raw {
            return Err(DeviceIdentifierValidationError::SurroundingWhitespace);
        }
        if raw.chars().count() > DEVICE_IDENTIFIER_MAX {
            return Err(DeviceIdentifierValidationError::TooLong {
                max: DEVICE_IDENTIFIER_MAX,
            });
        }
        if raw.chars().any(char::is_control) {
            return Err(DeviceIdentifierValidationError::ControlCharacters);
        }
        Ok(Self(raw))
    }

    /// Borrow the identifier as a string slice.
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl AsRef<str> for DeviceIdentifier {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for DeviceIdentifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<DeviceIdentifier> for String {
    fn from(value: DeviceIdentifier) -> Self {
        value.0
    }
}

impl TryFrom<String> for DeviceIdentifier {
    type Error = DeviceIdentifierValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// A provisioned device installation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    id: UserId,
    device_identifier: DeviceIdentifier,
}

impl User {
    /// Build a user from its persisted parts.
    pub fn new(id: UserId, device_identifier: DeviceIdentifier) -> Self {
        Self {
            id,
            device_identifier,
        }
    }

    /// Storage identifier.
    pub fn id(&self) -> UserId {
        self.id
    }

    /// Device identifier the user was created for.
    pub fn device_identifier(&self) -> &DeviceIdentifier {
        &self.device_identifier
    }
}
