//! Backend entry-point: loads configuration, prepares adapters and serves HTTP.

mod server;

use std::sync::Arc;

use actix_web::web;
#[cfg(feature = "metrics")]
use actix_web_prom::{PrometheusMetrics, PrometheusMetricsBuilder};
use color_eyre::eyre::{Context, Result, eyre};
use ortho_config::OrthoConfig;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use invitation_backend::AppSettings;
use invitation_backend::domain::FeistelHashAssigner;
use invitation_backend::domain::ports::TemplateCatalogueSeeder;
use invitation_backend::inbound::http::health::HealthState;
use invitation_backend::outbound::memory::InMemoryStore;
use invitation_backend::outbound::persistence::{
    DbPool, DieselTemplateRepository, PoolConfig, run_pending_migrations,
};
use invitation_backend::outbound::storage::FilesystemObjectStorage;
use invitation_backend::template_seed::seed_templates_on_startup;

use server::{Persistence, ServerConfig, create_server};

/// Application bootstrap.
#[actix_web::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let settings = AppSettings::load_from_iter(std::env::args_os())
        .map_err(|err| eyre!("failed to load configuration: {err}"))?;

    let persistence = connect_persistence(&settings).await?;
    let seeder: Arc<dyn TemplateCatalogueSeeder> = match &persistence {
        Persistence::Postgres(pool) => Arc::new(DieselTemplateRepository::new(pool.clone())),
        Persistence::InMemory(store) => store.clone(),
    };
    seed_templates_on_startup(settings.templates_path(), seeder.as_ref()).await?;

    let storage = FilesystemObjectStorage::open(
        settings.storage_root(),
        settings.storage_public_base_url(),
    )
    .with_context(|| {
        format!(
            "failed to open storage root {}",
            settings.storage_root().display()
        )
    })?;

    let config = ServerConfig::new(
        settings.bind_addr(),
        persistence,
        Arc::new(storage),
        Arc::new(FeistelHashAssigner::new(settings.hash_salt())),
    );
    #[cfg(feature = "metrics")]
    let config = config.with_metrics(Some(make_metrics()?));

    let health_state = web::Data::new(HealthState::new());
    let server = create_server(health_state, config)?;
    info!(bind_addr = %settings.bind_addr(), "invitation server listening");
    server.await?;
    Ok(())
}

async fn connect_persistence(settings: &AppSettings) -> Result<Persistence> {
    let Some(database_url) = settings.database_url() else {
        warn!("INVITATION_DATABASE_URL is not set; using the in-process store");
        return Ok(Persistence::InMemory(Arc::new(InMemoryStore::new())));
    };

    run_pending_migrations(database_url).await?;
    let pool = DbPool::new(
        PoolConfig::new(database_url).with_max_size(settings.db_max_connections()),
    )
    .await?;
    Ok(Persistence::Postgres(pool))
}

#[cfg(feature = "metrics")]
fn make_metrics() -> Result<PrometheusMetrics> {
    PrometheusMetricsBuilder::new("invitation")
        .endpoint("/metrics")
        .build()
        .map_err(|err| eyre!("failed to configure Prometheus metrics: {err}"))
}
