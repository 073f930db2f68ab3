//! Diesel table definitions for the PostgreSQL schema.
//!
//! These definitions must match `backend/migrations` exactly. When a migration
//! changes the schema, regenerate them with `diesel print-schema` or update
//! them by hand.

diesel::table! {
    /// Provisioned device installations.
    users (id) {
        id -> Int8,
        /// Unique opaque identifier supplied by the client app.
        device_identifier -> Varchar,
        created_at -> Timestamptz,
    }
}

diesel::table! {
    /// Template catalogue, seeded outside the invitation workflow.
    templates (id) {
        id -> Int8,
        background_image_url -> Text,
        type_description -> Text,
    }
}

diesel::table! {
    /// Invitation drafts, one or more per `(user, template)` pair.
    ///
    /// `x` and `y` are either both set (named place) or both null.
    invitations (id) {
        id -> Int8,
        user_id -> Int8,
        template_id -> Int8,
        title -> Nullable<Text>,
        contents -> Nullable<Text>,
        event_time -> Nullable<Timestamptz>,
        place_name -> Nullable<Text>,
        address_name -> Nullable<Text>,
        road_address_name -> Nullable<Text>,
        x -> Nullable<Float8>,
        y -> Nullable<Float8>,
        /// Public share code; unique once assigned.
        hash_code -> Nullable<Varchar>,
        created_at -> Timestamptz,
    }
}

diesel::table! {
    /// Uploaded images referencing object storage blobs.
    invitation_images (id) {
        id -> Int8,
        invitation_id -> Int8,
        image_url -> Text,
        created_at -> Timestamptz,
    }
}

diesel::joinable!(invitations -> users (user_id));
diesel::joinable!(invitations -> templates (template_id));
diesel::joinable!(invitation_images -> invitations (invitation_id));

diesel::allow_tables_to_appear_in_same_query!(users, templates, invitations, invitation_images);
