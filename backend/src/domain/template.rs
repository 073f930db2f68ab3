//! Invitation template catalogue entries.
//!
//! Templates are seeded outside the invitation workflow and are read-only
//! from its perspective.

use serde::{Deserialize, Serialize};

use super::ids::define_numeric_id;

define_numeric_id! {
    /// Catalogue identifier of a template.
    pub struct TemplateId;
}

/// Static catalogue entry an invitation is customised from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Template {
    /// Catalogue identifier.
    pub id: TemplateId,
    /// Reference to the background artwork.
    pub background_image_url: String,
    /// Short description of the invitation type (party, wedding, ...).
    pub type_description: String,
}

impl Template {
    /// Build a catalogue entry.
    pub fn new(
        id: TemplateId,
        background_image_url: impl Into<String>,
        type_description: impl Into<String>,
    ) -> Self {
        Self {
            id,
            background_image_url: background_image_url.into(),
            type_description: type_description.into(),
        }
    }
}
