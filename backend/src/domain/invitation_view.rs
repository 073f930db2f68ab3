//! Public read-only projection of an invitation.
//!
//! The projection flattens template display fields and invitation
//! customisation into one structure served to guests holding a share code.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{Invitation, InvitationImage, InvitationImageId, MapLocation, Template};

/// Structured map payload surfaced only for named places.
///
/// The place name is deliberately absent: it is exposed as the invitation's
/// own field so custom places can show it too.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MapInfo {
    /// Display name of the address.
    pub invitation_address_name: String,
    /// Road address of the place.
    pub invitation_road_address_name: String,
    /// Horizontal coordinate.
    pub x: f64,
    /// Vertical coordinate.
    pub y: f64,
}

impl From<&MapLocation> for MapInfo {
    fn from(location: &MapLocation) -> Self {
        Self {
            invitation_address_name: location.address_name.clone(),
            invitation_road_address_name: location.road_address_name.clone(),
            x: location.coordinates.x,
            y: location.coordinates.y,
        }
    }
}

/// Image entry of the public view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InvitationImageView {
    /// Image row identifier.
    pub id: InvitationImageId,
    /// Where the image can be fetched.
    pub image_url: String,
}

impl From<InvitationImage> for InvitationImageView {
    fn from(image: InvitationImage) -> Self {
        Self {
            id: image.id,
            image_url: image.image_url.as_str().to_owned(),
        }
    }
}

/// Flattened public view of an invitation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InvitationView {
    /// Template background artwork.
    pub template_background_image_url: String,
    /// Template type description.
    pub template_type_description: String,
    /// Invitation headline.
    pub invitation_title: Option<String>,
    /// Invitation body text.
    pub invitation_contents: Option<String>,
    /// Event time.
    pub invitation_time: Option<DateTime<Utc>>,
    /// Venue name.
    pub invitation_place_name: Option<String>,
    /// Map payload; present only when both coordinates are set.
    pub map_info: Option<MapInfo>,
    /// Uploaded images, in no particular order.
    pub invitation_images: Vec<InvitationImageView>,
}

impl InvitationView {
    /// Assemble the projection from its three sources.
    pub fn assemble(
        template: Template,
        invitation: Invitation,
        images: Vec<InvitationImage>,
    ) -> Self {
        let map_info = invitation.address.location.as_ref().map(MapInfo::from);
        Self {
            template_background_image_url: template.background_image_url,
            template_type_description: template.type_description,
            invitation_title: invitation.words.title,
            invitation_contents: invitation.words.contents,
            invitation_time: invitation.time,
            invitation_place_name: invitation.address.place_name,
            map_info,
            invitation_images: images.into_iter().map(InvitationImageView::from).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{
        Coordinates, ImageUrl, InvitationAddress, InvitationId, TemplateId, UserId,
    };
    use rstest::{fixture, rstest};

    #[fixture]
    fn template() -> Template {
        Template::new(TemplateId::new(1), "https://cdn/bg.png", "birthday")
    }

    #[fixture]
    fn draft() -> Invitation {
        Invitation::draft(InvitationId::new(10), UserId::new(1), TemplateId::new(1))
    }

    #[rstest]
    fn custom_place_has_no_map_info(template: Template, mut draft: Invitation) {
        draft.address = InvitationAddress {
            place_name: Some("our garden".into()),
            location: None,
        };
        let view = InvitationView::assemble(template, draft, Vec::new());
        assert!(view.map_info.is_none());
        assert_eq!(view.invitation_place_name.as_deref(), Some("our garden"));
    }

    #[rstest]
    fn named_place_surfaces_exact_coordinates(template: Template, mut draft: Invitation) {
        draft.address = InvitationAddress {
            place_name: Some("City Hall".into()),
            location: Some(MapLocation {
                address_name: "1 Main St".into(),
                road_address_name: "Main-ro 1".into(),
                coordinates: Coordinates { x: 37.5, y: 127.0 },
            }),
        };
        let view = InvitationView::assemble(template, draft, Vec::new());
        let map_info = view.map_info.expect("map info present");
        assert_eq!(map_info.x, 37.5);
        assert_eq!(map_info.y, 127.0);
        assert_eq!(map_info.invitation_address_name, "1 Main St");
    }

    #[rstest]
    fn flattens_template_and_images(template: Template, draft: Invitation) {
        let image = InvitationImage {
            id: InvitationImageId::new(5),
            invitation_id: draft.id,
            image_url: ImageUrl::new("https://cdn/a.png"),
        };
        let view = InvitationView::assemble(template, draft, vec![image]);
        assert_eq!(view.template_type_description, "birthday");
        assert_eq!(view.template_background_image_url, "https://cdn/bg.png");
        assert_eq!(
            view.invitation_images,
            vec![InvitationImageView {
                id: InvitationImageId::new(5),
                image_url: "https://cdn/a.png".into(),
            }]
        );
    }

    #[rstest]
    fn serialises_map_info_as_null_when_absent(template: Template, draft: Invitation) {
        let view = InvitationView::assemble(template, draft, Vec::new());
        let value = serde_json::to_value(&view).expect("serialise view");
        assert!(value.get("mapInfo").is_some_and(serde_json::Value::is_null));
    }
}
