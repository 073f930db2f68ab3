//! OpenAPI documentation configuration.
//!
//! This module defines the [`ApiDoc`] struct which generates the OpenAPI
//! specification for the REST API. It registers:
//!
//! - **Paths**: every HTTP endpoint from the inbound layer
//! - **Schemas**: domain type wrappers ([`ErrorSchema`], [`ErrorCodeSchema`])
//!   that describe domain errors without coupling domain types to utoipa.
//!   Request and response bodies are collected from the paths.
//!
//! The generated specification is used by Swagger UI (debug builds) and
//! exported via `cargo run --bin openapi-dump` for external tooling.

use crate::inbound::http::schemas::{ErrorCodeSchema, ErrorSchema};
use crate::inbound::http::templates::TemplateResponse;
use crate::inbound::http::users::{DraftSummary, ProvisionResponse};
use utoipa::OpenApi;

/// OpenAPI document for the REST API.
/// Swagger UI is enabled in debug builds only and used by tooling.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Invitation backend API",
        description = "Device-scoped invitation drafting and public share-code views."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    paths(
        crate::inbound::http::users::provision_user,
        crate::inbound::http::templates::list_templates,
        crate::inbound::http::invitations::update_words,
        crate::inbound::http::invitations::update_time,
        crate::inbound::http::invitations::update_address,
        crate::inbound::http::invitations::upload_image,
        crate::inbound::http::invitations::replace_image,
        crate::inbound::http::invitations::delete_image,
        crate::inbound::http::invitations::get_hash_code,
        crate::inbound::http::invitations::get_public_view,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        ErrorSchema,
        ErrorCodeSchema,
        ProvisionResponse,
        DraftSummary,
        TemplateResponse
    )),
    tags(
        (name = "users", description = "Device provisioning"),
        (name = "templates", description = "Template catalogue"),
        (name = "invitations", description = "Draft customisation and share codes"),
        (name = "invitation-images", description = "Images attached to drafts"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;
