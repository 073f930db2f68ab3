//! Integration tests for the Diesel invitation and invitation image
//! repositories against embedded PostgreSQL.
//!
//! Every test starts from one provisioned device with two templates, so each
//! template has exactly one stamped draft until a test adds more.

use chrono::{TimeZone, Utc};
use invitation_backend::domain::ports::{
    InvitationImageRepository, InvitationImageRepositoryError, InvitationRepository,
    InvitationRepositoryError, TemplateCatalogueSeeder, UserProvisioningRepository,
};
use invitation_backend::domain::{
    Coordinates, DeviceIdentifier, FeistelHashAssigner, HashCode, ImageUrl, Invitation,
    InvitationAddress, InvitationId, InvitationImageId, InvitationWords, MapLocation, Template,
    TemplateId, UserId,
};
use invitation_backend::outbound::persistence::{
    DieselInvitationImageRepository, DieselInvitationRepository, DieselTemplateRepository,
    DieselUserProvisioningRepository,
};
use rstest::{fixture, rstest};

mod support;

use support::{DieselContext, diesel_context};

struct Provisioned {
    context: DieselContext,
    user_id: UserId,
    drafts: Vec<Invitation>,
}

impl Provisioned {
    fn draft_for(&self, template: i64) -> &Invitation {
        self.drafts
            .iter()
            .find(|draft| draft.template_id == TemplateId::new(template))
            .expect("draft for template")
    }

    fn invitations(&self) -> DieselInvitationRepository {
        DieselInvitationRepository::new(self.context.pool.clone())
    }

    fn images(&self) -> DieselInvitationImageRepository {
        DieselInvitationImageRepository::new(self.context.pool.clone())
    }
}

fn provision(context: DieselContext) -> Provisioned {
    let templates = [
        Template::new(TemplateId::new(1), "https://cdn.test/1.png", "party"),
        Template::new(TemplateId::new(2), "https://cdn.test/2.png", "wedding"),
    ];
    let seeder = DieselTemplateRepository::new(context.pool.clone());
    let provisioning = DieselUserProvisioningRepository::new(context.pool.clone());
    let device = DeviceIdentifier::new("phone-1").expect("valid device");

    let provisioned = context.runtime.block_on(async {
        seeder.seed(&templates).await.expect("catalogue seeds");
        provisioning
            .provision(&device, &FeistelHashAssigner::new("diesel-invitations"))
            .await
            .expect("provisioning succeeds")
    });

    Provisioned {
        user_id: provisioned.user.id(),
        drafts: provisioned.invitations,
        context,
    }
}

#[fixture]
fn provisioned(diesel_context: Option<DieselContext>) -> Option<Provisioned> {
    diesel_context.map(provision)
}

#[rstest]
fn latest_draft_is_the_most_recently_created(provisioned: Option<Provisioned>) {
    let Some(world) = provisioned else {
        eprintln!("SKIP-TEST-CLUSTER: latest_draft_is_the_most_recently_created skipped");
        return;
    };
    world
        .context
        .execute(&format!(
            "INSERT INTO invitations (user_id, template_id, hash_code) \
             VALUES ({}, 2, 'newer-draft')",
            world.user_id.get()
        ))
        .expect("second draft inserted");
    let repository = world.invitations();

    let (latest, untouched, absent) = world.context.runtime.block_on(async {
        (
            repository
                .find_latest_for(world.user_id, TemplateId::new(2))
                .await
                .expect("lookup"),
            repository
                .find_latest_for(world.user_id, TemplateId::new(1))
                .await
                .expect("lookup"),
            repository
                .find_latest_for(world.user_id, TemplateId::new(9))
                .await
                .expect("lookup"),
        )
    });

    let latest = latest.expect("template 2 has drafts");
    assert_eq!(latest.hash_code, Some(HashCode::new("newer-draft")));
    assert!(latest.id.get() > world.draft_for(2).id.get());
    assert_eq!(untouched.as_ref(), Some(world.draft_for(1)));
    assert!(absent.is_none());
}

#[rstest]
fn updates_leave_the_share_code_untouched(provisioned: Option<Provisioned>) {
    let Some(world) = provisioned else {
        eprintln!("SKIP-TEST-CLUSTER: updates_leave_the_share_code_untouched skipped");
        return;
    };
    let draft = world.draft_for(1).clone();
    let code = draft.hash_code.clone().expect("stamped draft");
    let repository = world.invitations();
    let words = InvitationWords {
        title: Some("Housewarming".into()),
        contents: Some("Bring snacks".into()),
    };
    let when = Utc.with_ymd_and_hms(2026, 5, 1, 9, 30, 0).single();
    let address = InvitationAddress {
        place_name: Some("City Hall".into()),
        location: Some(MapLocation {
            address_name: "1 Main St".into(),
            road_address_name: "Main-ro 1".into(),
            coordinates: Coordinates {
                x: 126.978,
                y: 37.566,
            },
        }),
    };

    let stored = world.context.runtime.block_on(async {
        repository
            .update_words(draft.id, &words)
            .await
            .expect("words");
        repository.update_time(draft.id, when).await.expect("time");
        repository
            .update_address(draft.id, &address)
            .await
            .expect("address");
        repository
            .find_by_hash_code(&code)
            .await
            .expect("lookup")
            .expect("code still resolves")
    });

    assert_eq!(stored.id, draft.id);
    assert_eq!(stored.hash_code, Some(code));
    assert_eq!(stored.words, words);
    assert_eq!(stored.time, when);
    assert_eq!(stored.address, address);
}

#[rstest]
fn clearing_the_address_drops_the_map_location(provisioned: Option<Provisioned>) {
    let Some(world) = provisioned else {
        eprintln!("SKIP-TEST-CLUSTER: clearing_the_address_drops_the_map_location skipped");
        return;
    };
    let draft = world.draft_for(2).clone();
    let code = draft.hash_code.clone().expect("stamped draft");
    let repository = world.invitations();
    let custom_place = InvitationAddress {
        place_name: Some("our garden".into()),
        location: None,
    };

    let stored = world.context.runtime.block_on(async {
        repository
            .update_address(
                draft.id,
                &InvitationAddress {
                    place_name: Some("City Hall".into()),
                    location: Some(MapLocation {
                        address_name: "1 Main St".into(),
                        road_address_name: "Main-ro 1".into(),
                        coordinates: Coordinates { x: 1.5, y: 2.5 },
                    }),
                },
            )
            .await
            .expect("named place");
        repository
            .update_address(draft.id, &custom_place)
            .await
            .expect("custom place");
        repository
            .find_by_hash_code(&code)
            .await
            .expect("lookup")
            .expect("code resolves")
    });

    assert_eq!(stored.address, custom_place);
}

#[rstest]
fn updating_a_missing_invitation_is_reported(provisioned: Option<Provisioned>) {
    let Some(world) = provisioned else {
        eprintln!("SKIP-TEST-CLUSTER: updating_a_missing_invitation_is_reported skipped");
        return;
    };
    let repository = world.invitations();

    let error = world
        .context
        .runtime
        .block_on(repository.update_time(InvitationId::new(999_999), None))
        .expect_err("no such row");

    assert_eq!(error, InvitationRepositoryError::missing(999_999_i64));
}

#[rstest]
fn unknown_share_code_finds_nothing(provisioned: Option<Provisioned>) {
    let Some(world) = provisioned else {
        eprintln!("SKIP-TEST-CLUSTER: unknown_share_code_finds_nothing skipped");
        return;
    };
    let repository = world.invitations();

    let found = world
        .context
        .runtime
        .block_on(repository.find_by_hash_code(&HashCode::new("AAAAAAAAAAA")))
        .expect("lookup");

    assert!(found.is_none());
}

#[rstest]
fn image_rows_follow_insert_repoint_and_delete(provisioned: Option<Provisioned>) {
    let Some(world) = provisioned else {
        eprintln!("SKIP-TEST-CLUSTER: image_rows_follow_insert_repoint_and_delete skipped");
        return;
    };
    let draft_id = world.draft_for(1).id;
    let images = world.images();

    world.context.runtime.block_on(async {
        let first = images
            .insert(draft_id, &ImageUrl::new("/images/a.png"))
            .await
            .expect("insert first");
        let second = images
            .insert(draft_id, &ImageUrl::new("/images/b.png"))
            .await
            .expect("insert second");
        assert_eq!(first.invitation_id, draft_id);

        let repointed = images
            .update_url(first.id, &ImageUrl::new("/images/c.png"))
            .await
            .expect("repoint");
        assert_eq!(repointed.id, first.id);
        assert_eq!(repointed.image_url, ImageUrl::new("/images/c.png"));

        let urls: Vec<String> = images
            .find_all_by_invitation_id(draft_id)
            .await
            .expect("list")
            .into_iter()
            .map(|image| image.image_url.as_str().to_owned())
            .collect();
        assert_eq!(urls, vec!["/images/c.png", "/images/b.png"]);

        images.delete_by_id(second.id).await.expect("delete");
        assert!(images.find_by_id(second.id).await.expect("lookup").is_none());
        assert_eq!(
            images.delete_by_id(second.id).await,
            Err(InvitationImageRepositoryError::missing(second.id.get()))
        );
    });
}

#[rstest]
fn repointing_a_missing_image_is_reported(provisioned: Option<Provisioned>) {
    let Some(world) = provisioned else {
        eprintln!("SKIP-TEST-CLUSTER: repointing_a_missing_image_is_reported skipped");
        return;
    };
    let images = world.images();

    let error = world
        .context
        .runtime
        .block_on(images.update_url(InvitationImageId::new(404), &ImageUrl::new("/images/x.png")))
        .expect_err("no such image");

    assert_eq!(error, InvitationImageRepositoryError::missing(404_i64));
}

#[rstest]
fn image_for_unknown_invitation_is_a_query_error(provisioned: Option<Provisioned>) {
    let Some(world) = provisioned else {
        eprintln!("SKIP-TEST-CLUSTER: image_for_unknown_invitation_is_a_query_error skipped");
        return;
    };
    let images = world.images();

    let error = world
        .context
        .runtime
        .block_on(images.insert(InvitationId::new(999_999), &ImageUrl::new("/images/x.png")))
        .expect_err("foreign key rejects the row");

    assert!(
        matches!(error, InvitationImageRepositoryError::Query { .. }),
        "expected Query, got: {error:?}"
    );
}
