//! Domain-level error types.
//!
//! These errors are transport agnostic. Inbound adapters map them to HTTP
//! responses; the domain only decides the failure category and the message.

use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

use crate::domain::TraceId;

/// Stable machine-readable error code describing the failure category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[non_exhaustive]
#[serde(rename_all = "snake_case")]
pub enum ErrorCode {
    /// The request is malformed or fails validation.
    InvalidRequest,
    /// The requested resource does not exist.
    NotFound,
    /// The request collides with existing state.
    Conflict,
    /// The object storage gateway failed while storing or deleting a blob.
    ExternalIo,
    /// A backing service is temporarily unavailable.
    ServiceUnavailable,
    /// An unexpected error occurred inside the domain.
    InternalError,
}

/// Machine-readable reason attached to not-found errors.
///
/// Clients use the reason to tell an unknown device apart from a missing
/// draft without parsing messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotFoundReason {
    /// No user exists for the supplied device identifier.
    UnknownDevice,
    /// The template id is not in the catalogue.
    UnknownTemplate,
    /// The user has no invitation draft for the template.
    NoDraft,
    /// No invitation carries the supplied share code.
    UnknownHashCode,
    /// No invitation image exists for the supplied id.
    UnknownImage,
    /// An invitation references a template that no longer exists.
    TemplateMissing,
}

impl NotFoundReason {
    /// Stable string used in error details.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::UnknownDevice => "unknown_device",
            Self::UnknownTemplate => "unknown_template",
            Self::NoDraft => "no_draft",
            Self::UnknownHashCode => "unknown_hash_code",
            Self::UnknownImage => "unknown_image",
            Self::TemplateMissing => "template_missing",
        }
    }
}

/// Domain error payload.
///
/// Captures the active [`TraceId`] on construction so that log lines and
/// responses can be correlated.
///
/// # Examples
/// ```
/// use invitation_backend::domain::{Error, ErrorCode};
///
/// let err = Error::not_found("missing");
/// assert_eq!(err.code(), ErrorCode::NotFound);
/// assert_eq!(err.message(), "missing");
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Error {
    code: ErrorCode,
    message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[serde(default)]
    trace_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[serde(default)]
    details: Option<Value>,
}

impl Error {
    /// Create a new error, capturing the trace identifier in scope.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            trace_id: TraceId::current().map(|id| id.to_string()),
            details: None,
        }
    }

    /// Stable machine-readable error code.
    pub fn code(&self) -> ErrorCode {
        self.code
    }

    /// Human-readable message returned to adapters.
    pub fn message(&self) -> &str {
        self.message.as_str()
    }

    /// Correlation identifier captured when the error was created.
    pub fn trace_id(&self) -> Option<&str> {
        self.trace_id.as_deref()
    }

    /// Supplementary error details for adapters.
    pub fn details(&self) -> Option<&Value> {
        self.details.as_ref()
    }

    /// Attach a trace identifier to the error.
    pub fn with_trace_id(mut self, id: impl Into<String>) -> Self {
        self.trace_id = Some(id.into());
        self
    }

    /// Attach structured details to the error.
    ///
    /// # Examples
    /// ```
    /// use invitation_backend::domain::Error;
    /// use serde_json::json;
    ///
    /// let err = Error::invalid_request("bad").with_details(json!({ "field": "x" }));
    /// assert!(err.details().is_some());
    /// ```
    pub fn with_details(mut self, details: Value) -> Self {
        self.details = Some(details);
        self
    }

    /// Convenience constructor for [`ErrorCode::InvalidRequest`].
    pub fn invalid_request(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InvalidRequest, message)
    }

    /// Convenience constructor for [`ErrorCode::NotFound`].
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::NotFound, message)
    }

    /// Not-found error tagged with a machine-readable reason.
    ///
    /// # Examples
    /// ```
    /// use invitation_backend::domain::{Error, NotFoundReason};
    ///
    /// let err = Error::not_found_because(NotFoundReason::NoDraft, "no draft");
    /// assert_eq!(err.not_found_reason(), Some("no_draft"));
    /// ```
    pub fn not_found_because(reason: NotFoundReason, message: impl Into<String>) -> Self {
        Self::not_found(message).with_details(json!({ "code": reason.as_str() }))
    }

    /// Convenience constructor for [`ErrorCode::Conflict`].
    pub fn conflict(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::Conflict, message)
    }

    /// Convenience constructor for [`ErrorCode::ExternalIo`].
    pub fn external_io(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::ExternalIo, message)
    }

    /// Convenience constructor for [`ErrorCode::ServiceUnavailable`].
    pub fn service_unavailable(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::ServiceUnavailable, message)
    }

    /// Convenience constructor for [`ErrorCode::InternalError`].
    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InternalError, message)
    }

    /// Reason code recorded by [`Error::not_found_because`], if any.
    pub fn not_found_reason(&self) -> Option<&str> {
        if self.code != ErrorCode::NotFound {
            return None;
        }
        self.details
            .as_ref()
            .and_then(|details| details.get("code"))
            .and_then(Value::as_str)
    }
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for Error {}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use rstest::rstest;
    use uuid::Uuid;

    #[rstest]
    #[case(Error::invalid_request("x"), ErrorCode::InvalidRequest)]
    #[case(Error::not_found("x"), ErrorCode::NotFound)]
    #[case(Error::conflict("x"), ErrorCode::Conflict)]
    #[case(Error::external_io("x"), ErrorCode::ExternalIo)]
    #[case(Error::service_unavailable("x"), ErrorCode::ServiceUnavailable)]
    #[case(Error::internal("x"), ErrorCode::InternalError)]
    fn constructors_set_codes(#[case] error: Error, #[case] expected: ErrorCode) {
        assert_eq!(error.code(), expected);
    }

    #[rstest]
    fn trace_id_is_none_out_of_scope() {
        assert!(Error::internal("boom").trace_id().is_none());
    }

    #[tokio::test]
    async fn trace_id_is_captured_in_scope() {
        let trace_id = TraceId::from_uuid(Uuid::nil());
        let error = TraceId::scope(trace_id, async { Error::not_found("gone") }).await;
        assert_eq!(error.trace_id(), Some(Uuid::nil().to_string().as_str()));
    }

    #[rstest]
    fn not_found_reason_is_exposed() {
        let error = Error::not_found_because(NotFoundReason::UnknownDevice, "who?");
        assert_eq!(error.not_found_reason(), Some("unknown_device"));
        assert_eq!(error.message(), "who?");
    }

    #[rstest]
    fn not_found_reason_ignores_other_codes() {
        let error = Error::conflict("dup").with_details(json!({ "code": "no_draft" }));
        assert!(error.not_found_reason().is_none());
    }

    #[rstest]
    fn serialises_in_camel_case_without_empty_fields() {
        let error = Error::invalid_request("bad");
        let value = serde_json::to_value(&error).expect("serialise error");
        assert_eq!(value, json!({ "code": "invalid_request", "message": "bad" }));
    }
}
