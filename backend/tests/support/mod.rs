//! Shared helpers for the Diesel adapter suites.
//!
//! Integration tests compile as separate crates, so each suite pulls this
//! module in with `mod support;`.

pub mod cluster_skip;
pub mod embedded_postgres;

use invitation_backend::outbound::persistence::{DbPool, PoolConfig};
use pg_embedded_setup_unpriv::TemporaryDatabase;
use postgres::{Client, NoTls};
use rstest::fixture;
use tokio::runtime::Runtime;

pub use cluster_skip::handle_cluster_setup_failure;
pub use embedded_postgres::{provision_template_database, shared_cluster};

/// Render a `postgres` error with its SQLSTATE and message.
///
/// `postgres::Error`'s `Display` collapses server errors to `db error`.
pub fn format_postgres_error(error: &postgres::Error) -> String {
    let Some(db_error) = error.as_db_error() else {
        return error.to_string();
    };
    let mut summary = format!(
        "postgres error {:?}: {}",
        db_error.code(),
        db_error.message()
    );
    if let Some(detail) = db_error.detail() {
        summary.push_str("; detail: ");
        summary.push_str(detail);
    }
    summary
}

/// A migrated database with a pool and the runtime driving it.
///
/// Tests stay synchronous and enter the runtime with `block_on`, so raw SQL
/// set-up through the blocking `postgres` client never runs inside it.
pub struct DieselContext {
    /// Runtime owning the pool's connections.
    pub runtime: Runtime,
    /// Pool over the test database.
    pub pool: DbPool,
    /// URL of the test database, for raw SQL set-up.
    pub database_url: String,
    _database: TemporaryDatabase,
}

impl DieselContext {
    fn setup() -> Result<Self, String> {
        let runtime = Runtime::new().map_err(|err| err.to_string())?;
        let cluster = shared_cluster()?;
        let database = provision_template_database(cluster)?;
        let database_url = database.url().to_string();

        let config = PoolConfig::new(database_url.as_str())
            .with_max_size(2)
            .with_min_idle(Some(1));
        let pool = runtime
            .block_on(async { DbPool::new(config).await })
            .map_err(|err| err.to_string())?;

        Ok(Self {
            runtime,
            pool,
            database_url,
            _database: database,
        })
    }

    /// Run `sql` against the test database outside any Diesel transaction.
    pub fn execute(&self, sql: &str) -> Result<(), String> {
        let mut client =
            Client::connect(&self.database_url, NoTls).map_err(|err| format_postgres_error(&err))?;
        client
            .batch_execute(sql)
            .map_err(|err| format_postgres_error(&err))
    }

    /// Number of rows in `table`.
    pub fn count_rows(&self, table: &str) -> Result<i64, String> {
        let mut client =
            Client::connect(&self.database_url, NoTls).map_err(|err| format_postgres_error(&err))?;
        let escaped = table.replace('"', "\"\"");
        client
            .query_one(format!(r#"SELECT COUNT(*) FROM "{escaped}""#).as_str(), &[])
            .map(|row| row.get::<_, i64>(0))
            .map_err(|err| format_postgres_error(&err))
    }
}

/// Fresh database per test, or `None` when the cluster is skipped.
#[fixture]
pub fn diesel_context() -> Option<DieselContext> {
    match DieselContext::setup() {
        Ok(context) => Some(context),
        Err(reason) => handle_cluster_setup_failure(reason),
    }
}
