//! Tests for HTTP error mapping.

use super::*;
use actix_web::ResponseError;
use actix_web::body::to_bytes;
use actix_web::http::StatusCode;
use rstest::{fixture, rstest};
use serde_json::json;

use crate::domain::NotFoundReason;

const TRACE_ID: &str = "00000000-0000-0000-0000-000000000000";

#[fixture]
fn expected_trace_id() -> String {
    TRACE_ID.to_owned()
}

#[rstest]
#[case(Error::invalid_request("bad"), StatusCode::BAD_REQUEST)]
#[case(Error::not_found("missing"), StatusCode::NOT_FOUND)]
#[case(Error::conflict("dup"), StatusCode::CONFLICT)]
#[case(Error::external_io("s3 down"), StatusCode::BAD_GATEWAY)]
#[case(Error::service_unavailable("db down"), StatusCode::SERVICE_UNAVAILABLE)]
#[case(Error::internal("boom"), StatusCode::INTERNAL_SERVER_ERROR)]
fn status_code_matches_error_code(#[case] error: Error, #[case] status: StatusCode) {
    assert_eq!(ResponseError::status_code(&error), status);
}

async fn render(error: &Error) -> (StatusCode, Option<String>, Error) {
    let response = ResponseError::error_response(error);
    let status = response.status();
    let header = response
        .headers()
        .get(TRACE_ID_HEADER)
        .map(|value| value.to_str().expect("ascii header").to_owned());
    let bytes = to_bytes(response.into_body())
        .await
        .expect("reading response body succeeds");
    let body = serde_json::from_slice(&bytes).expect("Error JSON deserialisation succeeds");
    (status, header, body)
}

#[rstest]
#[actix_web::test]
async fn internal_errors_are_redacted(expected_trace_id: String) {
    let error = Error::internal("connection string leaked")
        .with_trace_id(expected_trace_id.clone())
        .with_details(json!({ "secret": "x" }));

    let (status, header, body) = render(&error).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(header.as_deref(), Some(TRACE_ID));
    assert_eq!(body.message(), "Internal server error");
    assert!(body.details().is_none());
    assert_eq!(body.trace_id(), Some(TRACE_ID));
}

#[rstest]
#[actix_web::test]
async fn not_found_reasons_reach_the_client(expected_trace_id: String) {
    let error = Error::not_found_because(NotFoundReason::NoDraft, "no draft for template 3")
        .with_trace_id(expected_trace_id);

    let (status, header, body) = render(&error).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(header.as_deref(), Some(TRACE_ID));
    assert_eq!(body.message(), "no draft for template 3");
    assert_eq!(body.not_found_reason(), Some("no_draft"));
}

#[rstest]
#[actix_web::test]
async fn errors_without_trace_id_omit_header() {
    let (status, header, body) = render(&Error::external_io("bucket offline")).await;

    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert!(header.is_none());
    assert_eq!(body.message(), "bucket offline");
}
