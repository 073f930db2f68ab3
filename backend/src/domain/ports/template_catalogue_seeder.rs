//! Port abstraction for loading the template catalogue at startup.

use async_trait::async_trait;

use crate::domain::Template;

use super::define_port_error;

define_port_error! {
    /// Errors raised while seeding the template catalogue.
    pub enum TemplateCatalogueSeedError {
        /// Repository connection could not be established.
        Connection { message: String } => "template seeding connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "template seeding query failed: {message}",
    }
}

/// Counts reported after a seeding pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TemplateSeedSummary {
    /// Templates newly inserted.
    pub inserted: usize,
    /// Templates skipped because their id already existed.
    pub skipped: usize,
}

/// Port for inserting catalogue templates that are not yet present.
///
/// Existing ids are left untouched, so reseeding is idempotent.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TemplateCatalogueSeeder: Send + Sync {
    /// Insert every template whose id is not yet catalogued.
    async fn seed(
        &self,
        templates: &[Template],
    ) -> Result<TemplateSeedSummary, TemplateCatalogueSeedError>;
}
