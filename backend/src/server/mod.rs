//! Server construction and middleware wiring.

mod config;
mod state_builders;

pub use config::{Persistence, ServerConfig};

use state_builders::build_http_state;

use actix_web::dev::{Server, ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, HttpServer, web};

use invitation_backend::Trace;
#[cfg(debug_assertions)]
use invitation_backend::doc::ApiDoc;
use invitation_backend::inbound::http::configure_api;
use invitation_backend::inbound::http::health::{HealthState, live, ready};
use invitation_backend::inbound::http::state::HttpState;
#[cfg(debug_assertions)]
use utoipa::OpenApi;
#[cfg(debug_assertions)]
use utoipa_swagger_ui::SwaggerUi;

#[derive(Clone)]
struct AppDependencies {
    health_state: web::Data<HealthState>,
    http_state: web::Data<HttpState>,
}

fn build_app(
    deps: AppDependencies,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    let AppDependencies {
        health_state,
        http_state,
    } = deps;

    let app = App::new()
        .app_data(health_state)
        .app_data(http_state)
        .wrap(Trace)
        .configure(configure_api)
        .service(ready)
        .service(live);

    #[cfg(debug_assertions)]
    let app = app.service(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()));
    #[cfg(not(debug_assertions))]
    let app = app;

    app
}

/// Construct an Actix HTTP server using the provided health state and configuration.
///
/// # Errors
/// Propagates [`std::io::Error`] when binding the socket fails.
pub fn create_server(
    health_state: web::Data<HealthState>,
    config: ServerConfig,
) -> std::io::Result<Server> {
    let server_health_state = health_state.clone();
    let http_state = build_http_state(&config);
    let ServerConfig {
        bind_addr,
        #[cfg(feature = "metrics")]
        prometheus,
        ..
    } = config;

    let server = HttpServer::new(move || {
        let app = build_app(AppDependencies {
            health_state: server_health_state.clone(),
            http_state: http_state.clone(),
        });

        #[cfg(feature = "metrics")]
        let app = app.wrap(actix_web::middleware::Condition::from_option(
            prometheus.clone(),
        ));

        app
    })
    .bind(bind_addr)?
    .run();

    health_state.mark_ready();
    Ok(server)
}

#[cfg(test)]
mod tests {
    //! Wiring checks for the assembled application.

    use std::sync::Arc;

    use actix_web::http::StatusCode;
    use actix_web::test as actix_test;
    use rstest::rstest;
    use serde_json::Value;

    use invitation_backend::domain::{FeistelHashAssigner, Template, TemplateId};
    use invitation_backend::outbound::memory::InMemoryStore;
    use invitation_backend::outbound::storage::InMemoryObjectStorage;

    use super::*;

    fn in_memory_config() -> ServerConfig {
        let store = InMemoryStore::with_templates(vec![
            Template::new(TemplateId::new(1), "https://cdn/party.png", "party"),
            Template::new(TemplateId::new(2), "https://cdn/wedding.png", "wedding"),
        ]);
        ServerConfig::new(
            "127.0.0.1:0".parse().expect("socket address"),
            Persistence::InMemory(Arc::new(store)),
            Arc::new(InMemoryObjectStorage::new("/images")),
            Arc::new(FeistelHashAssigner::default()),
        )
    }

    fn dependencies() -> AppDependencies {
        let health_state = web::Data::new(HealthState::new());
        health_state.mark_ready();
        AppDependencies {
            health_state,
            http_state: build_http_state(&in_memory_config()),
        }
    }

    #[rstest]
    #[case("/health/live")]
    #[case("/health/ready")]
    #[actix_web::test]
    async fn health_routes_are_mounted(#[case] path: &str) {
        let app = actix_test::init_service(build_app(dependencies())).await;
        let res =
            actix_test::call_service(&app, actix_test::TestRequest::get().uri(path).to_request())
                .await;
        assert_eq!(res.status(), StatusCode::OK);
    }

    #[actix_web::test]
    async fn provisioned_drafts_are_publicly_viewable() {
        let app = actix_test::init_service(build_app(dependencies())).await;

        let provision = actix_test::TestRequest::post()
            .uri("/api/v1/users")
            .insert_header(("Device-Identifier", "device-1"))
            .to_request();
        let body: Value = actix_test::call_and_read_body_json(&app, provision).await;
        let drafts = body["invitations"].as_array().expect("drafts listed");
        assert_eq!(drafts.len(), 2);

        let hash_code = drafts[0]["hashCode"].as_str().expect("hash code");
        let view = actix_test::TestRequest::get()
            .uri(&format!("/api/v1/invitations/by-hash/{hash_code}"))
            .to_request();
        let res = actix_test::call_service(&app, view).await;
        assert_eq!(res.status(), StatusCode::OK);
        assert!(res.headers().contains_key("trace-id"));
    }
}
