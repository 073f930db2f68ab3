//! Shared HTTP adapter state.
//!
//! HTTP handlers accept this state via `actix_web::web::Data` so they only
//! depend on domain ports (use-cases) and remain testable without I/O.

use std::sync::Arc;

use crate::domain::ports::{InvitationCommand, InvitationQuery, TemplateQuery, UserProvisioning};

/// Parameter object bundling all port implementations for HTTP handlers.
#[derive(Clone)]
pub struct HttpStatePorts {
    pub provisioning: Arc<dyn UserProvisioning>,
    pub templates: Arc<dyn TemplateQuery>,
    pub invitations: Arc<dyn InvitationCommand>,
    pub invitations_query: Arc<dyn InvitationQuery>,
}

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub provisioning: Arc<dyn UserProvisioning>,
    pub templates: Arc<dyn TemplateQuery>,
    pub invitations: Arc<dyn InvitationCommand>,
    pub invitations_query: Arc<dyn InvitationQuery>,
}

impl From<HttpStatePorts> for HttpState {
    fn from(ports: HttpStatePorts) -> Self {
        Self::new(ports)
    }
}

impl HttpState {
    /// Construct state from a ports bundle.
    ///
    /// # Examples
    /// ```no_run
    /// use std::sync::Arc;
    ///
    /// use invitation_backend::domain::ports::FixtureUserProvisioning;
    /// use invitation_backend::domain::{
    ///     FeistelHashAssigner, InvitationPorts, InvitationService, TemplateCatalogueService,
    /// };
    /// use invitation_backend::inbound::http::state::{HttpState, HttpStatePorts};
    /// use invitation_backend::outbound::memory::InMemoryStore;
    /// use invitation_backend::outbound::storage::InMemoryObjectStorage;
    ///
    /// let store = Arc::new(InMemoryStore::new());
    /// let invitations = Arc::new(InvitationService::new(InvitationPorts {
    ///     users: store.clone(),
    ///     templates: store.clone(),
    ///     invitations: store.clone(),
    ///     images: store.clone(),
    ///     storage: Arc::new(InMemoryObjectStorage::new("/images")),
    /// }));
    /// let state = HttpState::new(HttpStatePorts {
    ///     provisioning: Arc::new(FixtureUserProvisioning),
    ///     templates: Arc::new(TemplateCatalogueService::new(store)),
    ///     invitations: invitations.clone(),
    ///     invitations_query: invitations,
    /// });
    /// let _templates = state.templates.clone();
    /// ```
    pub fn new(ports: HttpStatePorts) -> Self {
        let HttpStatePorts {
            provisioning,
            templates,
            invitations,
            invitations_query,
        } = ports;
        Self {
            provisioning,
            templates,
            invitations,
            invitations_query,
        }
    }
}
