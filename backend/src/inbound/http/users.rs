//! Users API handlers.
//!
//! ```text
//! POST /api/v1/users   (Device-Identifier: <device>)
//! ```

use actix_web::{HttpResponse, post, web};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::Invitation;
use crate::domain::ports::ProvisioningOutcome;
use crate::inbound::http::ApiResult;
use crate::inbound::http::device::DeviceContext;
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::state::HttpState;

/// Draft created for a newly provisioned device.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DraftSummary {
    pub template_id: i64,
    #[schema(example = "q3Zb0_Lx1aQ")]
    pub hash_code: Option<String>,
}

impl From<Invitation> for DraftSummary {
    fn from(invitation: Invitation) -> Self {
        Self {
            template_id: invitation.template_id.get(),
            hash_code: invitation.hash_code.map(|code| code.as_str().to_owned()),
        }
    }
}

/// Response payload for `POST /api/v1/users`.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProvisionResponse {
    pub user_id: i64,
    pub device_identifier: String,
    /// Whether this call created the user.
    pub created: bool,
    /// Drafts created by this call; empty for repeat calls.
    pub invitations: Vec<DraftSummary>,
}

impl From<ProvisioningOutcome> for ProvisionResponse {
    fn from(outcome: ProvisioningOutcome) -> Self {
        let created = outcome.is_created();
        let (user, invitations) = match outcome {
            ProvisioningOutcome::Created { user, invitations } => (user, invitations),
            ProvisioningOutcome::AlreadyProvisioned { user } => (user, Vec::new()),
        };
        Self {
            user_id: user.id().get(),
            device_identifier: user.device_identifier().as_str().to_owned(),
            created,
            invitations: invitations.into_iter().map(DraftSummary::from).collect(),
        }
    }
}

/// Ensure the calling device has a user and one draft per template.
///
/// Repeat calls are no-ops and answer `200`; the first call answers `201`.
#[utoipa::path(
    post,
    path = "/api/v1/users",
    params(("Device-Identifier" = String, Header, description = "Calling device")),
    responses(
        (status = 201, description = "User and drafts created", body = ProvisionResponse),
        (status = 200, description = "Device already provisioned", body = ProvisionResponse),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 409, description = "Concurrent provisioning for the same device", body = ErrorSchema),
        (status = 503, description = "Database unavailable", body = ErrorSchema)
    ),
    tags = ["users"],
    operation_id = "provisionUser"
)]
#[post("/users")]
pub async fn provision_user(
    state: web::Data<HttpState>,
    device: DeviceContext,
) -> ApiResult<HttpResponse> {
    let outcome = state
        .provisioning
        .ensure_user_and_invitations(device.device())
        .await?;
    let mut response = if outcome.is_created() {
        HttpResponse::Created()
    } else {
        HttpResponse::Ok()
    };
    Ok(response.json(ProvisionResponse::from(outcome)))
}
