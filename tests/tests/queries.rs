//! Listing, filtering, sorting, paging, and search through the service.

use chronicle_tests::prelude::*;

fn seed_people(svc: &mut MutationService, count: usize) -> Vec<Entity> {
    (1..=count)
        .map(|n| create_person(svc, &format!("p{:02}", n), "Tester"))
        .collect()
}

#[test]
fn test_filter_sort_page_round_trip() {
    // GIVEN - 25 matching rows, one non-matching, one soft-deleted
    let mut svc = service();
    seed_people(&mut svc, 25);
    create_person(&mut svc, "zz", "Other");
    let doomed = create_person(&mut svc, "p00", "Tester");
    svc.delete(doomed.id, &MutationPayload::new()).unwrap();

    // WHEN - second page of ten, sorted ascending
    let filters = vec![FilterClause::eq("last_name", "Tester")];
    let sorts = vec![SortKey::asc("first_name")];
    let result = svc
        .all(EntityType::Person, &filters, &sorts, Page::new(10, 2))
        .unwrap();

    // THEN - rows 11..=20 of the filtered set, total counted pre-page
    assert_eq!(result.total, 25);
    assert_eq!(result.entities.len(), 10);
    assert_eq!(result.entities[0].field("first_name"), Some(Value::from("p11")));
    assert_eq!(result.entities[9].field("first_name"), Some(Value::from("p20")));
}

#[test]
fn test_sort_descending() {
    // GIVEN
    let mut svc = service();
    seed_people(&mut svc, 3);

    // WHEN
    let sorts = vec![SortKey::desc("first_name")];
    let result = svc
        .all(EntityType::Person, &[], &sorts, Page::none())
        .unwrap();

    // THEN
    assert_eq!(result.entities[0].field("first_name"), Some(Value::from("p03")));
    assert_eq!(result.entities[2].field("first_name"), Some(Value::from("p01")));
}

#[test]
fn test_like_is_case_insensitive() {
    // GIVEN
    let mut svc = service();
    create_person(&mut svc, "Ada", "Lovelace");
    create_person(&mut svc, "Grace", "Hopper");

    // WHEN
    let rows = svc
        .find_by(
            EntityType::Person,
            &[FilterClause::like("last_name", "LOVE")],
        )
        .unwrap();

    // THEN
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].field("first_name"), Some(Value::from("Ada")));
}

#[test]
fn test_in_and_null_operators() {
    // GIVEN
    let mut svc = service();
    create_person(&mut svc, "Ada", "Lovelace");
    create_person(&mut svc, "Grace", "Hopper");
    svc.create(
        EntityType::Person,
        &person_payload("Alan", "Turing").attribute("email", json!("alan@example.org")),
    )
    .unwrap();

    // WHEN/THEN - membership
    let rows = svc
        .find_by(
            EntityType::Person,
            &[FilterClause::is_in(
                "first_name",
                [Value::from("Ada"), Value::from("Alan")],
            )],
        )
        .unwrap();
    assert_eq!(rows.len(), 2);

    // WHEN/THEN - null check: only Alan has an email
    let rows = svc
        .find_by(EntityType::Person, &[FilterClause::null("email")])
        .unwrap();
    assert_eq!(rows.len(), 2);
}

#[test]
fn test_or_combination_folds_left_to_right() {
    // GIVEN
    let mut svc = service();
    create_person(&mut svc, "Ada", "Lovelace");
    create_person(&mut svc, "Grace", "Hopper");
    create_person(&mut svc, "Alan", "Turing");

    // WHEN - first_name eq Ada OR last_name eq Turing
    let filters = vec![
        FilterClause::eq("first_name", "Ada"),
        FilterClause::eq("last_name", "Turing").or(),
    ];
    let rows = svc.find_by(EntityType::Person, &filters).unwrap();

    // THEN
    assert_eq!(rows.len(), 2);
}

#[test]
fn test_search_spans_fields_and_terms() {
    // GIVEN
    let mut svc = service();
    create_person(&mut svc, "Ada", "Lovelace");
    create_person(&mut svc, "Grace", "Hopper");
    create_person(&mut svc, "Alan", "Turing");

    // WHEN - one term hits a first name, the other a last name
    let result = svc
        .search(
            EntityType::Person,
            &["first_name", "last_name"],
            &["ada", "hopper"],
            &[SortKey::asc("first_name")],
            Page::none(),
        )
        .unwrap();

    // THEN
    assert_eq!(result.total, 2);
    assert_eq!(result.entities[0].field("first_name"), Some(Value::from("Ada")));
}

#[test]
fn test_private_field_rejected_per_offender() {
    // GIVEN - neither field exists on Tag
    let svc = service();
    let filters = vec![
        FilterClause::eq("first_name", "Ada"),
        FilterClause::eq("label", "ok"),
    ];
    let sorts = vec![SortKey::asc("last_name")];

    // WHEN
    let result = svc.all(EntityType::Tag, &filters, &sorts, Page::none());

    // THEN - one error per unknown field, the valid one passes silently
    let errors = result.unwrap_err();
    assert_eq!(errors.len(), 2);
    assert!(errors.contains_code(ErrorCode::ValidationInvalidQueryParameter));
}

#[test]
fn test_builtin_fields_are_queryable() {
    // GIVEN
    let mut svc = service();
    let tag = create_tag(&mut svc, "vip");
    create_tag(&mut svc, "emea");

    // WHEN - id and version are in the public-field set
    let rows = svc
        .find_by(EntityType::Tag, &[FilterClause::eq("id", tag.id.to_string())])
        .unwrap();

    // THEN
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].field("version"), Some(Value::Int(1)));
}

#[test]
fn test_mistyped_filter_operand_matches_no_rows() {
    // GIVEN - two tags at versions 1 and 2
    let mut svc = service();
    create_tag(&mut svc, "vip");
    let bumped = create_tag(&mut svc, "emea");
    svc.update(bumped.id, &tag_payload("emea-2")).unwrap();

    // WHEN - the Int version field filtered with a String operand
    let rows = svc
        .find_by(EntityType::Tag, &[FilterClause::eq("version", "2")])
        .unwrap();

    // THEN - incomparable types never match, not even partially
    assert!(rows.is_empty());

    // WHEN/THEN - the correctly typed operand finds the bumped row
    let rows = svc
        .find_by(EntityType::Tag, &[FilterClause::eq("version", 2)])
        .unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].id, bumped.id);
}

#[test]
fn test_reads_do_not_touch_version_or_audit() {
    // GIVEN
    let mut svc = service();
    let tag = create_tag(&mut svc, "vip");
    let transactions_before = svc.audit_log().len();

    // WHEN
    svc.all(EntityType::Tag, &[], &[], Page::none()).unwrap();
    svc.search(EntityType::Tag, &["label"], &["v"], &[], Page::none())
        .unwrap();
    let found = svc.find(tag.id, false).unwrap();

    // THEN
    assert_eq!(found.version, 1);
    assert_eq!(svc.audit_log().len(), transactions_before);
}
