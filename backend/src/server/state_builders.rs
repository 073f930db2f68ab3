//! Builders wiring repository adapters into the HTTP state.

use std::sync::Arc;

use actix_web::web;

use invitation_backend::domain::ports::{
    InvitationCommand, InvitationQuery, TemplateQuery, UserProvisioning,
};
use invitation_backend::domain::{
    InvitationPorts, InvitationService, TemplateCatalogueService, UserProvisioningService,
};
use invitation_backend::inbound::http::state::{HttpState, HttpStatePorts};
use invitation_backend::outbound::persistence::{
    DieselInvitationImageRepository, DieselInvitationRepository, DieselTemplateRepository,
    DieselUserProvisioningRepository, DieselUserRepository,
};

use super::{Persistence, ServerConfig};

/// Assemble the handler state for the configured persistence backend.
pub(super) fn build_http_state(config: &ServerConfig) -> web::Data<HttpState> {
    let ports = match &config.persistence {
        Persistence::Postgres(pool) => {
            let users = Arc::new(DieselUserRepository::new(pool.clone()));
            let templates = Arc::new(DieselTemplateRepository::new(pool.clone()));
            let provisioning = UserProvisioningService::new(
                users.clone(),
                Arc::new(DieselUserProvisioningRepository::new(pool.clone())),
                config.hash_assigner.clone(),
            );
            let invitations = InvitationService::new(InvitationPorts {
                users,
                templates: templates.clone(),
                invitations: Arc::new(DieselInvitationRepository::new(pool.clone())),
                images: Arc::new(DieselInvitationImageRepository::new(pool.clone())),
                storage: config.storage.clone(),
            });
            assemble(provisioning, TemplateCatalogueService::new(templates), invitations)
        }
        Persistence::InMemory(store) => {
            let provisioning = UserProvisioningService::new(
                store.clone(),
                store.clone(),
                config.hash_assigner.clone(),
            );
            let invitations = InvitationService::new(InvitationPorts {
                users: store.clone(),
                templates: store.clone(),
                invitations: store.clone(),
                images: store.clone(),
                storage: config.storage.clone(),
            });
            assemble(
                provisioning,
                TemplateCatalogueService::new(store.clone()),
                invitations,
            )
        }
    };
    web::Data::new(HttpState::new(ports))
}

fn assemble(
    provisioning: impl UserProvisioning + 'static,
    templates: impl TemplateQuery + 'static,
    invitations: InvitationService,
) -> HttpStatePorts {
    let invitations = Arc::new(invitations);
    let command: Arc<dyn InvitationCommand> = invitations.clone();
    let query: Arc<dyn InvitationQuery> = invitations;
    HttpStatePorts {
        provisioning: Arc::new(provisioning),
        templates: Arc::new(templates),
        invitations: command,
        invitations_query: query,
    }
}
