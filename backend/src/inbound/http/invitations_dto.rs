//! Invitation DTOs and parsing helpers.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::{
    Error, HashCode, InvitationAddress, InvitationImage, InvitationImageId, InvitationImageView,
    InvitationView, InvitationWords, MapInfo, TemplateId,
};
use crate::inbound::http::validation::{
    AddressFields, FieldName, parse_address, parse_id, parse_optional_rfc3339_timestamp,
};

pub(super) const TEMPLATE_ID_FIELD: FieldName = FieldName::new("templateId");
pub(super) const IMAGE_ID_FIELD: FieldName = FieldName::new("imageId");
const INVITATION_TIME_FIELD: FieldName = FieldName::new("invitationTime");

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct TemplatePath {
    pub(super) template_id: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct ImagePath {
    pub(super) image_id: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct HashCodePath {
    pub(super) hash_code: String,
}

/// Request payload replacing an invitation's title and body.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateWordsBody {
    #[schema(example = "Join us for dinner")]
    pub invitation_title: Option<String>,
    pub invitation_contents: Option<String>,
}

/// Request payload replacing an invitation's event time.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateTimeBody {
    /// RFC 3339 timestamp; `null` clears the time.
    #[schema(example = "2026-05-01T18:30:00+09:00")]
    pub invitation_time: Option<String>,
}

/// Request payload replacing all five address fields at once.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateAddressBody {
    pub invitation_place_name: Option<String>,
    pub invitation_address_name: Option<String>,
    pub invitation_road_address_name: Option<String>,
    #[schema(example = 37.5)]
    pub x: Option<f64>,
    #[schema(example = 127.0)]
    pub y: Option<f64>,
}

/// Response payload describing one stored image.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct InvitationImageResponse {
    pub id: i64,
    pub image_url: String,
}

impl From<InvitationImage> for InvitationImageResponse {
    fn from(image: InvitationImage) -> Self {
        Self {
            id: image.id.get(),
            image_url: image.image_url.as_str().to_owned(),
        }
    }
}

impl From<InvitationImageView> for InvitationImageResponse {
    fn from(image: InvitationImageView) -> Self {
        Self {
            id: image.id.get(),
            image_url: image.image_url,
        }
    }
}

/// Response payload carrying an invitation's share code.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct HashCodeResponse {
    #[schema(example = "q3Zb0_Lx1aQ")]
    pub hash_code: String,
}

impl From<HashCode> for HashCodeResponse {
    fn from(code: HashCode) -> Self {
        Self {
            hash_code: code.as_str().to_owned(),
        }
    }
}

/// Map payload of the public view.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MapInfoResponse {
    pub invitation_address_name: String,
    pub invitation_road_address_name: String,
    pub x: f64,
    pub y: f64,
}

impl From<MapInfo> for MapInfoResponse {
    fn from(info: MapInfo) -> Self {
        Self {
            invitation_address_name: info.invitation_address_name,
            invitation_road_address_name: info.invitation_road_address_name,
            x: info.x,
            y: info.y,
        }
    }
}

/// Public, read-only view of an invitation served by share code.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct InvitationViewResponse {
    pub template_background_image_url: String,
    pub template_type_description: String,
    pub invitation_title: Option<String>,
    pub invitation_contents: Option<String>,
    pub invitation_time: Option<String>,
    pub invitation_place_name: Option<String>,
    /// Present only when the invitation points at a named place.
    pub map_info: Option<MapInfoResponse>,
    pub invitation_images: Vec<InvitationImageResponse>,
}

impl From<InvitationView> for InvitationViewResponse {
    fn from(view: InvitationView) -> Self {
        Self {
            template_background_image_url: view.template_background_image_url,
            template_type_description: view.template_type_description,
            invitation_title: view.invitation_title,
            invitation_contents: view.invitation_contents,
            invitation_time: view.invitation_time.map(|time| time.to_rfc3339()),
            invitation_place_name: view.invitation_place_name,
            map_info: view.map_info.map(MapInfoResponse::from),
            invitation_images: view
                .invitation_images
                .into_iter()
                .map(InvitationImageResponse::from)
                .collect(),
        }
    }
}

pub(super) fn parse_template_id(path: &TemplatePath) -> Result<TemplateId, Error> {
    parse_id(&path.template_id, TEMPLATE_ID_FIELD).map(TemplateId::new)
}

pub(super) fn parse_image_id(path: &ImagePath) -> Result<InvitationImageId, Error> {
    parse_id(&path.image_id, IMAGE_ID_FIELD).map(InvitationImageId::new)
}

impl From<UpdateWordsBody> for InvitationWords {
    fn from(body: UpdateWordsBody) -> Self {
        Self {
            title: body.invitation_title,
            contents: body.invitation_contents,
        }
    }
}

pub(super) fn parse_time_body(body: UpdateTimeBody) -> Result<Option<DateTime<Utc>>, Error> {
    parse_optional_rfc3339_timestamp(body.invitation_time, INVITATION_TIME_FIELD)
}

pub(super) fn parse_address_body(body: UpdateAddressBody) -> Result<InvitationAddress, Error> {
    parse_address(AddressFields {
        place_name: body.invitation_place_name,
        address_name: body.invitation_address_name,
        road_address_name: body.invitation_road_address_name,
        x: body.x,
        y: body.y,
    })
}
