//! Catalogue listing service.

use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::ports::{TemplateQuery, TemplateRepository};
use crate::domain::service_errors::map_template_error;
use crate::domain::{Error, Template};

/// Template service implementing [`TemplateQuery`].
#[derive(Clone)]
pub struct TemplateCatalogueService<T> {
    templates: Arc<T>,
}

impl<T> TemplateCatalogueService<T> {
    /// Create a new service over the template repository.
    pub fn new(templates: Arc<T>) -> Self {
        Self { templates }
    }
}

#[async_trait]
impl<T> TemplateQuery for TemplateCatalogueService<T>
where
    T: TemplateRepository,
{
    async fn list_templates(&self) -> Result<Vec<Template>, Error> {
        self.templates.find_all().await.map_err(map_template_error)
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use crate::domain::ports::{
        FixtureTemplateRepository, MockTemplateRepository, TemplateRepositoryError,
    };
    use crate::domain::{ErrorCode, TemplateId};

    #[tokio::test]
    async fn lists_catalogue_in_id_order() {
        let service = TemplateCatalogueService::new(Arc::new(FixtureTemplateRepository::new(
            vec![
                Template::new(TemplateId::new(3), "c.png", "wedding"),
                Template::new(TemplateId::new(1), "a.png", "party"),
            ],
        )));

        let templates = service.list_templates().await.expect("listing succeeds");

        assert_eq!(
            templates.iter().map(|t| t.id.get()).collect::<Vec<_>>(),
            vec![1, 3]
        );
    }

    #[tokio::test]
    async fn connection_failure_is_unavailable() {
        let mut repo = MockTemplateRepository::new();
        repo.expect_find_all()
            .times(1)
            .return_once(|| Err(TemplateRepositoryError::connection("refused")));

        let error = TemplateCatalogueService::new(Arc::new(repo))
            .list_templates()
            .await
            .expect_err("unavailable");

        assert_eq!(error.code(), ErrorCode::ServiceUnavailable);
    }
}
