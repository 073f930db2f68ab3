//! Test helpers for inbound HTTP components.

use std::sync::Arc;

use actix_web::dev::{ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, web};

use crate::domain::ports::{
    MockInvitationCommand, MockInvitationQuery, MockTemplateQuery, MockUserProvisioning,
};
use crate::inbound::http::configure_api;
use crate::inbound::http::state::{HttpState, HttpStatePorts};
use crate::middleware::Trace;

/// Builds [`HttpState`] from mocks; ports left unset reject every call.
#[derive(Default)]
pub struct StateBuilder {
    provisioning: Option<MockUserProvisioning>,
    templates: Option<MockTemplateQuery>,
    invitations: Option<MockInvitationCommand>,
    invitations_query: Option<MockInvitationQuery>,
}

impl StateBuilder {
    pub fn provisioning(mut self, mock: MockUserProvisioning) -> Self {
        self.provisioning = Some(mock);
        self
    }

    pub fn templates(mut self, mock: MockTemplateQuery) -> Self {
        self.templates = Some(mock);
        self
    }

    pub fn invitations(mut self, mock: MockInvitationCommand) -> Self {
        self.invitations = Some(mock);
        self
    }

    pub fn invitations_query(mut self, mock: MockInvitationQuery) -> Self {
        self.invitations_query = Some(mock);
        self
    }

    pub fn build(self) -> HttpState {
        HttpState::new(HttpStatePorts {
            provisioning: Arc::new(self.provisioning.unwrap_or_default()),
            templates: Arc::new(self.templates.unwrap_or_default()),
            invitations: Arc::new(self.invitations.unwrap_or_default()),
            invitations_query: Arc::new(self.invitations_query.unwrap_or_default()),
        })
    }
}

/// Application wired like production, minus health probes and docs.
pub fn test_app(
    state: HttpState,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    App::new()
        .app_data(web::Data::new(state))
        .wrap(Trace)
        .configure(configure_api)
}
