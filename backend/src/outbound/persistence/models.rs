//! Internal Diesel row structs for database operations.
//!
//! These types are implementation details of the persistence layer and must
//! never be exposed to the domain. Conversions into domain types live here so
//! every repository decodes rows the same way.

use chrono::{DateTime, Utc};
use diesel::prelude::*;

use crate::domain::{
    Coordinates, DeviceIdentifier, HashCode, ImageUrl, Invitation, InvitationAddress,
    InvitationId, InvitationImage, InvitationImageId, InvitationWords, MapLocation, Template,
    TemplateId, User, UserId,
};

use super::schema::{invitation_images, invitations, templates, users};

// ---------------------------------------------------------------------------
// Users
// ---------------------------------------------------------------------------

/// Row struct for reading from the users table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = users)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct UserRow {
    pub id: i64,
    pub device_identifier: String,
}

impl UserRow {
    /// Decode the row, rejecting identifiers that no longer validate.
    pub(crate) fn into_domain(self) -> Result<User, String> {
        let device = DeviceIdentifier::new(self.device_identifier)
            .map_err(|err| format!("stored device identifier is invalid: {err}"))?;
        Ok(User::new(UserId::new(self.id), device))
    }
}

/// Insertable struct for creating new user records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = users)]
pub(crate) struct NewUserRow<'a> {
    pub device_identifier: &'a str,
}

// ---------------------------------------------------------------------------
// Templates
// ---------------------------------------------------------------------------

/// Row struct for reading and seeding the templates table.
#[derive(Debug, Clone, Queryable, Selectable, Insertable)]
#[diesel(table_name = templates)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct TemplateRow {
    pub id: i64,
    pub background_image_url: String,
    pub type_description: String,
}

impl From<TemplateRow> for Template {
    fn from(row: TemplateRow) -> Self {
        Self::new(
            TemplateId::new(row.id),
            row.background_image_url,
            row.type_description,
        )
    }
}

impl From<&Template> for TemplateRow {
    fn from(template: &Template) -> Self {
        Self {
            id: template.id.get(),
            background_image_url: template.background_image_url.clone(),
            type_description: template.type_description.clone(),
        }
    }
}

// ---------------------------------------------------------------------------
// Invitations
// ---------------------------------------------------------------------------

/// Row struct for reading from the invitations table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = invitations)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct InvitationRow {
    pub id: i64,
    pub user_id: i64,
    pub template_id: i64,
    pub title: Option<String>,
    pub contents: Option<String>,
    pub event_time: Option<DateTime<Utc>>,
    pub place_name: Option<String>,
    pub address_name: Option<String>,
    pub road_address_name: Option<String>,
    pub x: Option<f64>,
    pub y: Option<f64>,
    pub hash_code: Option<String>,
}

impl From<InvitationRow> for Invitation {
    fn from(row: InvitationRow) -> Self {
        // A map location exists only when both coordinates are stored.
        let location = match (row.x, row.y) {
            (Some(x), Some(y)) => Some(MapLocation {
                address_name: row.address_name.unwrap_or_default(),
                road_address_name: row.road_address_name.unwrap_or_default(),
                coordinates: Coordinates { x, y },
            }),
            _ => None,
        };

        Self {
            id: InvitationId::new(row.id),
            user_id: UserId::new(row.user_id),
            template_id: TemplateId::new(row.template_id),
            words: InvitationWords {
                title: row.title,
                contents: row.contents,
            },
            time: row.event_time,
            address: InvitationAddress {
                place_name: row.place_name,
                location,
            },
            hash_code: row.hash_code.map(HashCode::new),
        }
    }
}

/// Insertable struct for creating empty drafts.
#[derive(Debug, Clone, Copy, Insertable)]
#[diesel(table_name = invitations)]
pub(crate) struct NewInvitationRow {
    pub user_id: i64,
    pub template_id: i64,
}

/// Changeset replacing title and body; `None` clears a column.
#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = invitations)]
#[diesel(treat_none_as_null = true)]
pub(crate) struct InvitationWordsUpdate<'a> {
    pub title: Option<&'a str>,
    pub contents: Option<&'a str>,
}

impl<'a> From<&'a InvitationWords> for InvitationWordsUpdate<'a> {
    fn from(words: &'a InvitationWords) -> Self {
        Self {
            title: words.title.as_deref(),
            contents: words.contents.as_deref(),
        }
    }
}

/// Changeset replacing every address column at once.
#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = invitations)]
#[diesel(treat_none_as_null = true)]
pub(crate) struct InvitationAddressUpdate<'a> {
    pub place_name: Option<&'a str>,
    pub address_name: Option<&'a str>,
    pub road_address_name: Option<&'a str>,
    pub x: Option<f64>,
    pub y: Option<f64>,
}

impl<'a> From<&'a InvitationAddress> for InvitationAddressUpdate<'a> {
    fn from(address: &'a InvitationAddress) -> Self {
        let location = address.location.as_ref();
        Self {
            place_name: address.place_name.as_deref(),
            address_name: location.map(|loc| loc.address_name.as_str()),
            road_address_name: location.map(|loc| loc.road_address_name.as_str()),
            x: location.map(|loc| loc.coordinates.x),
            y: location.map(|loc| loc.coordinates.y),
        }
    }
}

// ---------------------------------------------------------------------------
// Invitation images
// ---------------------------------------------------------------------------

/// Row struct for reading from the invitation_images table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = invitation_images)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct InvitationImageRow {
    pub id: i64,
    pub invitation_id: i64,
    pub image_url: String,
}

impl From<InvitationImageRow> for InvitationImage {
    fn from(row: InvitationImageRow) -> Self {
        Self {
            id: InvitationImageId::new(row.id),
            invitation_id: InvitationId::new(row.invitation_id),
            image_url: ImageUrl::new(row.image_url),
        }
    }
}

/// Insertable struct for creating image rows.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = invitation_images)]
pub(crate) struct NewInvitationImageRow<'a> {
    pub invitation_id: i64,
    pub image_url: &'a str,
}
