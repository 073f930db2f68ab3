//! Integration tests for `DieselTemplateRepository` against embedded
//! PostgreSQL: catalogue reads and startup seeding.

use invitation_backend::domain::ports::{
    TemplateCatalogueSeeder, TemplateRepository, TemplateSeedSummary,
};
use invitation_backend::domain::{Template, TemplateId};
use invitation_backend::outbound::persistence::DieselTemplateRepository;
use rstest::rstest;

mod support;

use support::{DieselContext, diesel_context};

fn template(id: i64, description: &str) -> Template {
    Template::new(
        TemplateId::new(id),
        format!("https://cdn.test/templates/{id}.png"),
        description,
    )
}

#[rstest]
fn seeding_inserts_missing_templates_and_keeps_existing_ones(
    diesel_context: Option<DieselContext>,
) {
    let Some(context) = diesel_context else {
        eprintln!(
            "SKIP-TEST-CLUSTER: seeding_inserts_missing_templates_and_keeps_existing_ones skipped"
        );
        return;
    };
    let repository = DieselTemplateRepository::new(context.pool.clone());

    let (first, second, catalogue) = context.runtime.block_on(async {
        let first = repository
            .seed(&[template(2, "wedding"), template(1, "party")])
            .await
            .expect("first seed");
        let second = repository
            .seed(&[template(1, "renamed party"), template(3, "birthday")])
            .await
            .expect("second seed");
        let catalogue = repository.find_all().await.expect("list");
        (first, second, catalogue)
    });

    assert_eq!(
        first,
        TemplateSeedSummary {
            inserted: 2,
            skipped: 0,
        }
    );
    assert_eq!(
        second,
        TemplateSeedSummary {
            inserted: 1,
            skipped: 1,
        }
    );
    assert_eq!(
        catalogue,
        vec![
            template(1, "party"),
            template(2, "wedding"),
            template(3, "birthday")
        ]
    );
}

#[rstest]
fn lookups_by_id_distinguish_known_and_unknown_templates(diesel_context: Option<DieselContext>) {
    let Some(context) = diesel_context else {
        eprintln!(
            "SKIP-TEST-CLUSTER: lookups_by_id_distinguish_known_and_unknown_templates skipped"
        );
        return;
    };
    let repository = DieselTemplateRepository::new(context.pool.clone());

    context.runtime.block_on(async {
        repository
            .seed(&[template(7, "party")])
            .await
            .expect("seed");

        assert_eq!(
            repository
                .find_by_id(TemplateId::new(7))
                .await
                .expect("lookup"),
            Some(template(7, "party"))
        );
        assert!(
            repository
                .find_by_id(TemplateId::new(8))
                .await
                .expect("lookup")
                .is_none()
        );
        assert!(
            repository
                .exists_by_id(TemplateId::new(7))
                .await
                .expect("exists")
        );
        assert!(
            !repository
                .exists_by_id(TemplateId::new(8))
                .await
                .expect("exists")
        );
    });
}

#[rstest]
fn seeding_nothing_touches_nothing(diesel_context: Option<DieselContext>) {
    let Some(context) = diesel_context else {
        eprintln!("SKIP-TEST-CLUSTER: seeding_nothing_touches_nothing skipped");
        return;
    };
    let repository = DieselTemplateRepository::new(context.pool.clone());

    let summary = context
        .runtime
        .block_on(repository.seed(&[]))
        .expect("empty seed");

    assert_eq!(summary, TemplateSeedSummary::default());
    assert_eq!(context.count_rows("templates").expect("count"), 0);
}
