//! Template catalogue handlers.
//!
//! ```text
//! GET /api/v1/templates
//! ```

use actix_web::{get, web};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::Template;
use crate::inbound::http::ApiResult;
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::state::HttpState;

/// Catalogue entry as served to clients.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TemplateResponse {
    pub id: i64,
    pub background_image_url: String,
    #[schema(example = "birthday")]
    pub type_description: String,
}

impl From<Template> for TemplateResponse {
    fn from(template: Template) -> Self {
        Self {
            id: template.id.get(),
            background_image_url: template.background_image_url,
            type_description: template.type_description,
        }
    }
}

/// List the template catalogue in id order.
#[utoipa::path(
    get,
    path = "/api/v1/templates",
    responses(
        (status = 200, description = "Templates", body = [TemplateResponse]),
        (status = 503, description = "Database unavailable", body = ErrorSchema)
    ),
    tags = ["templates"],
    operation_id = "listTemplates"
)]
#[get("/templates")]
pub async fn list_templates(
    state: web::Data<HttpState>,
) -> ApiResult<web::Json<Vec<TemplateResponse>>> {
    let templates = state.templates.list_templates().await?;
    Ok(web::Json(
        templates.into_iter().map(TemplateResponse::from).collect(),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::TemplateId;
    use crate::domain::ports::MockTemplateQuery;
    use crate::inbound::http::test_utils::{StateBuilder, test_app};
    use actix_web::http::StatusCode;
    use actix_web::test;
    use serde_json::{Value, json};

    #[actix_web::test]
    async fn lists_templates_as_camel_case() {
        let mut templates = MockTemplateQuery::new();
        templates.expect_list_templates().times(1).return_once(|| {
            Ok(vec![Template::new(
                TemplateId::new(1),
                "https://cdn/bg.png",
                "birthday",
            )])
        });
        let state = StateBuilder::default().templates(templates).build();
        let app = test::init_service(test_app(state)).await;

        let response = test::call_service(
            &app,
            test::TestRequest::get().uri("/api/v1/templates").to_request(),
        )
        .await;

        assert_eq!(response.status(), StatusCode::OK);
        let body: Value = test::read_body_json(response).await;
        assert_eq!(
            body,
            json!([{
                "id": 1,
                "backgroundImageUrl": "https://cdn/bg.png",
                "typeDescription": "birthday"
            }])
        );
    }
}
