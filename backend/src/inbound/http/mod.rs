//! HTTP inbound adapter exposing REST endpoints.

pub mod device;
pub mod error;
pub mod health;
pub mod invitations;
mod invitations_dto;
pub mod schemas;
pub mod state;
pub mod templates;
#[cfg(test)]
pub mod test_utils;
pub mod users;
pub(crate) mod validation;

use actix_web::web;

use crate::domain::Error;

pub use error::ApiResult;

/// Route every JSON body error through the domain error payload.
fn json_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(|err, _req| {
        Error::invalid_request(format!("malformed JSON body: {err}")).into()
    })
}

/// Register the `/api/v1` routes and their extractor configuration.
///
/// Callers provide [`state::HttpState`] as `web::Data`.
///
/// # Examples
/// ```
/// use actix_web::App;
/// use invitation_backend::inbound::http::configure_api;
///
/// let _app = App::new().configure(configure_api);
/// ```
pub fn configure_api(cfg: &mut web::ServiceConfig) {
    cfg.app_data(json_config())
        .app_data(web::PayloadConfig::new(invitations::MAX_IMAGE_BYTES))
        .service(
            web::scope("/api/v1")
                .service(users::provision_user)
                .service(templates::list_templates)
                .service(invitations::get_public_view)
                .service(invitations::get_hash_code)
                .service(invitations::update_words)
                .service(invitations::update_time)
                .service(invitations::update_address)
                .service(invitations::upload_image)
                .service(invitations::replace_image)
                .service(invitations::delete_image),
        );
}
