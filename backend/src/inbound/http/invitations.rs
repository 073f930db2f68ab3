//! Invitation API handlers.
//!
//! ```text
//! PATCH  /api/v1/invitations/{templateId}/words
//! PATCH  /api/v1/invitations/{templateId}/time
//! PATCH  /api/v1/invitations/{templateId}/address
//! POST   /api/v1/invitations/{templateId}/images
//! GET    /api/v1/invitations/{templateId}/hash-code
//! GET    /api/v1/invitations/by-hash/{hashCode}
//! PUT    /api/v1/invitation-images/{imageId}
//! DELETE /api/v1/invitation-images/{imageId}
//! ```
//!
//! Every route except the public view names the caller through the
//! `Device-Identifier` header.

use actix_web::http::header::CONTENT_TYPE;
use actix_web::{HttpRequest, HttpResponse, delete, get, patch, post, put, web};

use crate::domain::ports::{
    DraftTarget, UpdateAddressRequest, UpdateTimeRequest, UpdateWordsRequest, UploadImageRequest,
};
use crate::domain::{HashCode, ImageUpload};
use crate::inbound::http::ApiResult;
use crate::inbound::http::device::DeviceContext;
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::empty_image_error;

use super::invitations_dto::{
    HashCodePath, ImagePath, TemplatePath, parse_address_body, parse_image_id,
    parse_template_id, parse_time_body,
};
pub use super::invitations_dto::{
    HashCodeResponse, InvitationImageResponse, InvitationViewResponse, MapInfoResponse,
    UpdateAddressBody, UpdateTimeBody, UpdateWordsBody,
};

/// Upper bound on raw image request bodies.
pub const MAX_IMAGE_BYTES: usize = 10 * 1024 * 1024;

fn draft_target(device: DeviceContext, path: &TemplatePath) -> ApiResult<DraftTarget> {
    Ok(DraftTarget {
        device: device.into_inner(),
        template_id: parse_template_id(path)?,
    })
}

fn image_upload(req: &HttpRequest, body: web::Bytes) -> ApiResult<ImageUpload> {
    let content_type = req
        .headers()
        .get(CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.split(';').next())
        .map(|value| value.trim().to_ascii_lowercase())
        .filter(|value| !value.is_empty());
    ImageUpload::new(body.to_vec(), content_type).map_err(empty_image_error)
}

/// Replace the title and body of the caller's draft for a template.
#[utoipa::path(
    patch,
    path = "/api/v1/invitations/{templateId}/words",
    params(
        ("templateId" = i64, Path, description = "Template the draft customises"),
        ("Device-Identifier" = String, Header, description = "Calling device")
    ),
    request_body = UpdateWordsBody,
    responses(
        (status = 204, description = "Words updated"),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 404, description = "Unknown device or no draft", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["invitations"],
    operation_id = "updateInvitationWords"
)]
#[patch("/invitations/{templateId}/words")]
pub async fn update_words(
    state: web::Data<HttpState>,
    device: DeviceContext,
    path: web::Path<TemplatePath>,
    payload: web::Json<UpdateWordsBody>,
) -> ApiResult<HttpResponse> {
    let request = UpdateWordsRequest {
        target: draft_target(device, &path)?,
        words: payload.into_inner().into(),
    };
    state.invitations.update_words(request).await?;
    Ok(HttpResponse::NoContent().finish())
}

/// Replace the event time of the caller's draft for a template.
#[utoipa::path(
    patch,
    path = "/api/v1/invitations/{templateId}/time",
    params(
        ("templateId" = i64, Path, description = "Template the draft customises"),
        ("Device-Identifier" = String, Header, description = "Calling device")
    ),
    request_body = UpdateTimeBody,
    responses(
        (status = 204, description = "Time updated"),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 404, description = "Unknown device or no draft", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["invitations"],
    operation_id = "updateInvitationTime"
)]
#[patch("/invitations/{templateId}/time")]
pub async fn update_time(
    state: web::Data<HttpState>,
    device: DeviceContext,
    path: web::Path<TemplatePath>,
    payload: web::Json<UpdateTimeBody>,
) -> ApiResult<HttpResponse> {
    let time = parse_time_body(payload.into_inner())?;
    let request = UpdateTimeRequest {
        target: draft_target(device, &path)?,
        time,
    };
    state.invitations.update_time(request).await?;
    Ok(HttpResponse::NoContent().finish())
}

/// Replace all address fields of the caller's draft for a template.
///
/// `x` and `y` travel together; sending exactly one of them is rejected.
#[utoipa::path(
    patch,
    path = "/api/v1/invitations/{templateId}/address",
    params(
        ("templateId" = i64, Path, description = "Template the draft customises"),
        ("Device-Identifier" = String, Header, description = "Calling device")
    ),
    request_body = UpdateAddressBody,
    responses(
        (status = 204, description = "Address updated"),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 404, description = "Unknown device or no draft", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["invitations"],
    operation_id = "updateInvitationAddress"
)]
#[patch("/invitations/{templateId}/address")]
pub async fn update_address(
    state: web::Data<HttpState>,
    device: DeviceContext,
    path: web::Path<TemplatePath>,
    payload: web::Json<UpdateAddressBody>,
) -> ApiResult<HttpResponse> {
    let address = parse_address_body(payload.into_inner())?;
    let request = UpdateAddressRequest {
        target: draft_target(device, &path)?,
        address,
    };
    state.invitations.update_address(request).await?;
    Ok(HttpResponse::NoContent().finish())
}

/// Attach an image to the caller's draft for a template.
#[utoipa::path(
    post,
    path = "/api/v1/invitations/{templateId}/images",
    params(
        ("templateId" = i64, Path, description = "Template the draft customises"),
        ("Device-Identifier" = String, Header, description = "Calling device")
    ),
    request_body(content = String, description = "Raw image bytes", content_type = "application/octet-stream"),
    responses(
        (status = 201, description = "Image stored", body = InvitationImageResponse),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 404, description = "Unknown device or no draft", body = ErrorSchema),
        (status = 502, description = "Object storage failed", body = ErrorSchema)
    ),
    tags = ["invitation-images"],
    operation_id = "uploadInvitationImage"
)]
#[post("/invitations/{templateId}/images")]
pub async fn upload_image(
    state: web::Data<HttpState>,
    device: DeviceContext,
    path: web::Path<TemplatePath>,
    req: HttpRequest,
    body: web::Bytes,
) -> ApiResult<HttpResponse> {
    let request = UploadImageRequest {
        target: draft_target(device, &path)?,
        upload: image_upload(&req, body)?,
    };
    let image = state.invitations.upload_image(request).await?;
    Ok(HttpResponse::Created().json(InvitationImageResponse::from(image)))
}

/// Swap the blob behind an existing image.
///
/// Images are addressed by id alone; no device header is read.
#[utoipa::path(
    put,
    path = "/api/v1/invitation-images/{imageId}",
    params(
        ("imageId" = i64, Path, description = "Image to replace")
    ),
    request_body(content = String, description = "Raw image bytes", content_type = "application/octet-stream"),
    responses(
        (status = 200, description = "Image replaced", body = InvitationImageResponse),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 404, description = "Unknown image", body = ErrorSchema),
        (status = 502, description = "Object storage failed", body = ErrorSchema)
    ),
    tags = ["invitation-images"],
    operation_id = "replaceInvitationImage"
)]
#[put("/invitation-images/{imageId}")]
pub async fn replace_image(
    state: web::Data<HttpState>,
    path: web::Path<ImagePath>,
    req: HttpRequest,
    body: web::Bytes,
) -> ApiResult<web::Json<InvitationImageResponse>> {
    let image_id = parse_image_id(&path)?;
    let upload = image_upload(&req, body)?;
    let image = state.invitations.replace_image(image_id, upload).await?;
    Ok(web::Json(image.into()))
}

/// Delete an image and its blob.
///
/// The row survives when the blob cannot be deleted.
#[utoipa::path(
    delete,
    path = "/api/v1/invitation-images/{imageId}",
    params(
        ("imageId" = i64, Path, description = "Image to delete")
    ),
    responses(
        (status = 204, description = "Image deleted"),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 404, description = "Unknown image", body = ErrorSchema),
        (status = 502, description = "Object storage failed", body = ErrorSchema)
    ),
    tags = ["invitation-images"],
    operation_id = "deleteInvitationImage"
)]
#[delete("/invitation-images/{imageId}")]
pub async fn delete_image(
    state: web::Data<HttpState>,
    path: web::Path<ImagePath>,
) -> ApiResult<HttpResponse> {
    let image_id = parse_image_id(&path)?;
    state.invitations.delete_image(image_id).await?;
    Ok(HttpResponse::NoContent().finish())
}

/// Share code of the caller's draft for a template.
#[utoipa::path(
    get,
    path = "/api/v1/invitations/{templateId}/hash-code",
    params(
        ("templateId" = i64, Path, description = "Template the draft customises"),
        ("Device-Identifier" = String, Header, description = "Calling device")
    ),
    responses(
        (status = 200, description = "Share code", body = HashCodeResponse),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 404, description = "Unknown device, template or draft", body = ErrorSchema)
    ),
    tags = ["invitations"],
    operation_id = "getInvitationHashCode"
)]
#[get("/invitations/{templateId}/hash-code")]
pub async fn get_hash_code(
    state: web::Data<HttpState>,
    device: DeviceContext,
    path: web::Path<TemplatePath>,
) -> ApiResult<web::Json<HashCodeResponse>> {
    let template_id = parse_template_id(&path)?;
    let code = state
        .invitations_query
        .get_hash_code(device.device(), template_id)
        .await?;
    Ok(web::Json(code.into()))
}

/// Public view of an invitation, addressed by its share code.
#[utoipa::path(
    get,
    path = "/api/v1/invitations/by-hash/{hashCode}",
    params(("hashCode" = String, Path, description = "Share code from the invitation link")),
    responses(
        (status = 200, description = "Invitation view", body = InvitationViewResponse),
        (status = 404, description = "Unknown share code", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["invitations"],
    operation_id = "getInvitationByHashCode"
)]
#[get("/invitations/by-hash/{hashCode}")]
pub async fn get_public_view(
    state: web::Data<HttpState>,
    path: web::Path<HashCodePath>,
) -> ApiResult<web::Json<InvitationViewResponse>> {
    let code = HashCode::new(path.into_inner().hash_code);
    let view = state.invitations_query.get_public_view(&code).await?;
    Ok(web::Json(view.into()))
}

#[cfg(test)]
#[path = "invitations_tests.rs"]
mod tests;
