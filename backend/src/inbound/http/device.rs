//! Extractor for the caller's device identifier.
//!
//! Devices stand in for accounts: every mutating endpoint names the caller
//! through the [`DEVICE_IDENTIFIER_HEADER`] request header.

use actix_web::{FromRequest, HttpRequest, dev::Payload};
use futures_util::future::{Ready, ready};

use crate::domain::{DeviceIdentifier, Error};
use crate::inbound::http::validation::{invalid_device_identifier_error, missing_header_error};

/// Request header naming the calling device.
pub const DEVICE_IDENTIFIER_HEADER: &str = "Device-Identifier";

/// Validated device identifier taken from the request headers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeviceContext(DeviceIdentifier);

impl DeviceContext {
    /// Borrow the validated identifier.
    pub fn device(&self) -> &DeviceIdentifier {
        &self.0
    }

    /// Consume the wrapper.
    pub fn into_inner(self) -> DeviceIdentifier {
        self.0
    }

    fn from_http(req: &HttpRequest) -> Result<Self, Error> {
        let value = req
            .headers()
            .get(DEVICE_IDENTIFIER_HEADER)
            .ok_or_else(|| missing_header_error(DEVICE_IDENTIFIER_HEADER))?;
        let raw = value.to_str().map_err(|_| {
            Error::invalid_request(format!("{DEVICE_IDENTIFIER_HEADER} must be visible ASCII"))
        })?;
        DeviceIdentifier::new(raw)
            .map(Self)
            .map_err(|err| invalid_device_identifier_error(DEVICE_IDENTIFIER_HEADER, &err))
    }
}

impl FromRequest for DeviceContext {
    type Error = Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        ready(Self::from_http(req))
    }
}
