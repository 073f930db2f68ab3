//! Read-side port for the template catalogue.

use async_trait::async_trait;

use crate::domain::{Template, TemplateId};

use super::define_port_error;

define_port_error! {
    /// Errors raised when reading the template catalogue.
    pub enum TemplateRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } =>
            "template read connection failed: {message}",
        /// Query failed during execution or row conversion.
        Query { message: String } =>
            "template read query failed: {message}",
    }
}

/// Port for reading catalogue templates.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TemplateRepository: Send + Sync {
    /// Fetch one template by id.
    async fn find_by_id(&self, id: TemplateId) -> Result<Option<Template>, TemplateRepositoryError>;

    /// Whether `id` is present in the catalogue.
    async fn exists_by_id(&self, id: TemplateId) -> Result<bool, TemplateRepositoryError>;

    /// Every catalogued template, ordered by id.
    async fn find_all(&self) -> Result<Vec<Template>, TemplateRepositoryError>;
}

/// Fixture implementation backed by a fixed list of templates.
#[derive(Debug, Default, Clone)]
pub struct FixtureTemplateRepository {
    templates: Vec<Template>,
}

impl FixtureTemplateRepository {
    /// Serve `templates` in id order.
    pub fn new(mut templates: Vec<Template>) -> Self {
        templates.sort_by_key(|template| template.id);
        Self { templates }
    }
}

#[async_trait]
impl TemplateRepository for FixtureTemplateRepository {
    async fn find_by_id(&self, id: TemplateId) -> Result<Option<Template>, TemplateRepositoryError> {
        Ok(self.templates.iter().find(|template| template.id == id).cloned())
    }

    async fn exists_by_id(&self, id: TemplateId) -> Result<bool, TemplateRepositoryError> {
        Ok(self.templates.iter().any(|template| template.id == id))
    }

    async fn find_all(&self) -> Result<Vec<Template>, TemplateRepositoryError> {
        Ok(self.templates.clone())
    }
}
