//! Shared validation helpers for inbound HTTP adapters.

use chrono::{DateTime, Utc};
use serde_json::json;

use crate::domain::{
    Coordinates, DeviceIdentifierValidationError, Error, ImageUploadValidationError,
    InvitationAddress, MapLocation,
};

/// Validation error codes for HTTP request failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ErrorCode {
    MissingField,
    MissingHeader,
    InvalidId,
    InvalidDeviceIdentifier,
    InvalidTimestamp,
    PartialCoordinates,
    AddressWithoutCoordinates,
    EmptyImage,
}

impl ErrorCode {
    fn as_str(self) -> &'static str {
        match self {
            ErrorCode::MissingField => "missing_field",
            ErrorCode::MissingHeader => "missing_header",
            ErrorCode::InvalidId => "invalid_id",
            ErrorCode::InvalidDeviceIdentifier => "invalid_device_identifier",
            ErrorCode::InvalidTimestamp => "invalid_timestamp",
            ErrorCode::PartialCoordinates => "partial_coordinates",
            ErrorCode::AddressWithoutCoordinates => "address_without_coordinates",
            ErrorCode::EmptyImage => "empty_image",
        }
    }
}

/// Newtype wrapper for HTTP field names to provide type safety.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct FieldName(&'static str);

impl FieldName {
    pub(crate) const fn new(name: &'static str) -> Self {
        Self(name)
    }

    fn as_str(&self) -> &str {
        self.0
    }
}

/// Builder for validation errors with field context.
struct ValidationError {
    field: String,
    message: String,
}

impl ValidationError {
    fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }

    fn with_code(self, code: ErrorCode) -> Error {
        Error::invalid_request(self.message).with_details(json!({
            "field": self.field,
            "code": code.as_str(),
        }))
    }

    fn with_value(self, code: ErrorCode, value: impl Into<String>) -> Error {
        Error::invalid_request(self.message).with_details(json!({
            "field": self.field,
            "value": value.into(),
            "code": code.as_str(),
        }))
    }
}

pub(crate) fn missing_field_error(field: FieldName) -> Error {
    let field = field.as_str();
    ValidationError::new(field, format!("missing required field: {field}"))
        .with_code(ErrorCode::MissingField)
}

pub(crate) fn missing_header_error(header: &str) -> Error {
    ValidationError::new(header, format!("missing required header: {header}"))
        .with_code(ErrorCode::MissingHeader)
}

pub(crate) fn invalid_device_identifier_error(
    header: &str,
    error: &DeviceIdentifierValidationError,
) -> Error {
    ValidationError::new(header, format!("{header} is invalid: {error}"))
        .with_code(ErrorCode::InvalidDeviceIdentifier)
}

pub(crate) fn empty_image_error(error: ImageUploadValidationError) -> Error {
    ValidationError::new("body", error.to_string()).with_code(ErrorCode::EmptyImage)
}

pub(crate) fn invalid_id_error(field: FieldName, value: &str) -> Error {
    let field = field.as_str();
    ValidationError::new(field, format!("{field} must be a positive integer"))
        .with_value(ErrorCode::InvalidId, value)
}

/// Parse a storage identifier from a path segment.
pub(crate) fn parse_id(value: &str, field: FieldName) -> Result<i64, Error> {
    value
        .parse::<i64>()
        .ok()
        .filter(|id| *id > 0)
        .ok_or_else(|| invalid_id_error(field, value))
}

pub(crate) fn invalid_timestamp_error(field: FieldName, value: &str) -> Error {
    let field = field.as_str();
    ValidationError::new(field, format!("{field} must be an RFC 3339 timestamp"))
        .with_value(ErrorCode::InvalidTimestamp, value)
}

pub(crate) fn parse_optional_rfc3339_timestamp(
    value: Option<String>,
    field: FieldName,
) -> Result<Option<DateTime<Utc>>, Error> {
    value
        .map(|raw| {
            DateTime::parse_from_rfc3339(&raw)
                .map(|timestamp| timestamp.with_timezone(&Utc))
                .map_err(|_| invalid_timestamp_error(field, &raw))
        })
        .transpose()
}

/// Raw address fields as they arrive on the wire.
#[derive(Debug, Clone, Default, PartialEq)]
pub(crate) struct AddressFields {
    pub(crate) place_name: Option<String>,
    pub(crate) address_name: Option<String>,
    pub(crate) road_address_name: Option<String>,
    pub(crate) x: Option<f64>,
    pub(crate) y: Option<f64>,
}

/// Build a domain address, enforcing that map fields arrive together.
///
/// Coordinates must be both present or both absent. When present, the
/// address and road address names are required; when absent, they must not
/// be sent.
pub(crate) fn parse_address(fields: AddressFields) -> Result<InvitationAddress, Error> {
    let AddressFields {
        place_name,
        address_name,
        road_address_name,
        x,
        y,
    } = fields;

    let location = match (x, y) {
        (Some(x), Some(y)) => {
            let address_name =
                address_name.ok_or_else(|| missing_field_error(ADDRESS_NAME_FIELD))?;
            let road_address_name =
                road_address_name.ok_or_else(|| missing_field_error(ROAD_ADDRESS_NAME_FIELD))?;
            Some(MapLocation {
                address_name,
                road_address_name,
                coordinates: Coordinates { x, y },
            })
        }
        (None, None) => {
            if address_name.is_some() || road_address_name.is_some() {
                return Err(ValidationError::new(
                    "x",
                    "address names require both coordinates",
                )
                .with_code(ErrorCode::AddressWithoutCoordinates));
            }
            None
        }
        (Some(_), None) => {
            return Err(ValidationError::new("y", "x and y must be sent together")
                .with_code(ErrorCode::PartialCoordinates));
        }
        (None, Some(_)) => {
            return Err(ValidationError::new("x", "x and y must be sent together")
                .with_code(ErrorCode::PartialCoordinates));
        }
    };

    Ok(InvitationAddress {
        place_name,
        location,
    })
}

const ADDRESS_NAME_FIELD: FieldName = FieldName::new("invitationAddressName");
const ROAD_ADDRESS_NAME_FIELD: FieldName = FieldName::new("invitationRoadAddressName");
