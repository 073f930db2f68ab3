//! HTTP server configuration object and helpers.

use std::net::SocketAddr;
use std::sync::Arc;

#[cfg(feature = "metrics")]
use actix_web_prom::PrometheusMetrics;

use invitation_backend::domain::HashAssigner;
use invitation_backend::domain::ports::ObjectStorage;
use invitation_backend::outbound::memory::InMemoryStore;
use invitation_backend::outbound::persistence::DbPool;

/// Where repository ports are served from.
#[derive(Clone)]
pub enum Persistence {
    /// PostgreSQL through the Diesel adapters.
    Postgres(DbPool),
    /// Process-local store; data is lost on restart.
    InMemory(Arc<InMemoryStore>),
}

/// Builder-style configuration for creating the HTTP server.
pub struct ServerConfig {
    pub(crate) bind_addr: SocketAddr,
    pub(crate) persistence: Persistence,
    pub(crate) storage: Arc<dyn ObjectStorage>,
    pub(crate) hash_assigner: Arc<dyn HashAssigner>,
    #[cfg(feature = "metrics")]
    pub(crate) prometheus: Option<PrometheusMetrics>,
}

impl ServerConfig {
    /// Construct a server configuration from its adapters.
    #[must_use]
    pub fn new(
        bind_addr: SocketAddr,
        persistence: Persistence,
        storage: Arc<dyn ObjectStorage>,
        hash_assigner: Arc<dyn HashAssigner>,
    ) -> Self {
        Self {
            bind_addr,
            persistence,
            storage,
            hash_assigner,
            #[cfg(feature = "metrics")]
            prometheus: None,
        }
    }

    #[cfg(feature = "metrics")]
    /// Attach Prometheus middleware to the configuration.
    #[must_use]
    pub fn with_metrics(mut self, prometheus: Option<PrometheusMetrics>) -> Self {
        self.prometheus = prometheus;
        self
    }
}
