//! Invitation backend library modules.
//!
//! Hexagonal layout: [`domain`] holds entities, services and ports;
//! [`outbound`] implements the driven ports; [`inbound`] exposes the HTTP
//! adapter. The binary wires them together from [`AppSettings`].

pub mod doc;
pub mod domain;
pub mod inbound;
pub mod middleware;
pub mod outbound;
pub mod settings;
pub mod template_seed;
#[cfg(any(test, feature = "test-support"))]
pub mod test_support;

/// Public OpenAPI surface used by Swagger UI and tooling.
pub use doc::ApiDoc;
pub use domain::TraceId;
pub use middleware::Trace;
pub use settings::AppSettings;
