//! Driving port for catalogue listing.

use async_trait::async_trait;

use crate::domain::{Error, Template};

/// Driving port listing the template catalogue to clients.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TemplateQuery: Send + Sync {
    /// Every catalogued template, ordered by id.
    async fn list_templates(&self) -> Result<Vec<Template>, Error>;
}
