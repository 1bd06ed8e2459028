//! Entity lifecycle end to end: create, update, delete, and the versioning
//! and validation rules that bind them.

use chronicle_tests::prelude::*;

#[test]
fn test_create_starts_at_version_one() {
    // GIVEN
    let mut svc = service();

    // WHEN
    let user = create_user(&mut svc, "alice");

    // THEN
    assert_eq!(user.version, 1);
    assert!(!user.deleted);
    assert_eq!(user.field("username"), Some(Value::from("alice")));
}

#[test]
fn test_update_bumps_version_by_exactly_one() {
    // GIVEN
    let mut svc = service();
    let user = create_user(&mut svc, "alice");

    // WHEN - two consecutive updates
    let payload = MutationPayload::new().attribute("display_name", json!("Alice A."));
    let second = svc.update(user.id, &payload).unwrap();
    let payload = MutationPayload::new().attribute("display_name", json!("Alice B."));
    let third = svc.update(user.id, &payload).unwrap();

    // THEN
    assert_eq!(second.version, 2);
    assert_eq!(third.version, 3);
}

#[test]
fn test_client_supplied_version_and_id_are_discarded() {
    // GIVEN
    let mut svc = service();
    let user = create_user(&mut svc, "alice");

    // WHEN - the payload tries to jump the version and swap the id
    let payload = MutationPayload::new()
        .attribute("version", json!(99))
        .attribute("id", json!("01ARZ3NDEKTSV4RRFFQ69G5FAV"))
        .attribute("display_name", json!("Mallory"));
    let updated = svc.update(user.id, &payload).unwrap();

    // THEN - the tamper keys are silently dropped, no validation error
    assert_eq!(updated.version, 2);
    assert_eq!(updated.id, user.id);
    assert_eq!(updated.field("display_name"), Some(Value::from("Mallory")));
}

#[test]
fn test_invalid_user_create_reports_both_errors_and_persists_nothing() {
    // GIVEN - missing locale_code, timezone_code outside its code domain
    let mut svc = service();
    let payload = MutationPayload::new()
        .attribute("username", json!("alice"))
        .attribute("timezone_code", json!("INVALID"));

    // WHEN
    let result = svc.create(EntityType::User, &payload);

    // THEN - exactly the two expected errors, in one response
    let errors = result.unwrap_err();
    assert_eq!(errors.len(), 2);
    assert!(errors.contains_code(ErrorCode::ValidationMandatoryFieldMissing));
    assert!(errors.contains_code(ErrorCode::ValidationInvalidCodeValue));

    // ... and no entity, no audit transaction
    assert!(svc.store().is_empty());
    assert!(svc.audit_log().is_empty());
}

#[test]
fn test_validation_and_linkage_errors_accumulate_together() {
    // GIVEN - two missing mandatory fields plus a list payload aimed at the
    // single-cardinality person relationship
    let mut svc = service();
    let payload = MutationPayload::new()
        .attribute("username", json!("alice"))
        .relationship("person", json!([{"id": "01A", "type": "person"}]));

    // WHEN
    let result = svc.create(EntityType::User, &payload);

    // THEN - exactly three errors
    let errors = result.unwrap_err();
    assert_eq!(errors.len(), 3);
    assert!(errors.contains_code(ErrorCode::ValidationMandatoryFieldMissing));
    assert!(errors.contains_code(ErrorCode::RelationshipInvalidType));
    assert!(svc.store().is_empty());
}

#[test]
fn test_unknown_attribute_is_rejected() {
    // GIVEN
    let mut svc = service();
    let payload = tag_payload("vip").attribute("color", json!("red"));

    // WHEN
    let result = svc.create(EntityType::Tag, &payload);

    // THEN
    let errors = result.unwrap_err();
    assert_eq!(errors.len(), 1);
    assert!(errors.contains_code(ErrorCode::ValidationInvalidAttributeValue));
}

#[test]
fn test_email_pattern_is_enforced() {
    // GIVEN
    let mut svc = service();
    let bad = person_payload("Ada", "Lovelace").attribute("email", json!("not-an-email"));
    let good = person_payload("Ada", "Lovelace").attribute("email", json!("ada@example.org"));

    // WHEN/THEN
    let errors = svc.create(EntityType::Person, &bad).unwrap_err();
    assert!(errors.contains_code(ErrorCode::ValidationInvalidAttributeValue));
    assert!(svc.create(EntityType::Person, &good).is_ok());
}

#[test]
fn test_delete_is_a_flagged_update() {
    // GIVEN
    let mut svc = service();
    let user = create_user(&mut svc, "alice");

    // WHEN
    let deleted = svc.delete(user.id, &MutationPayload::new()).unwrap();

    // THEN - version bumps and the flag flip is audited like any field change
    assert!(deleted.deleted);
    assert_eq!(deleted.version, 2);
    let history = svc.history(user.id);
    let flip = history.last().unwrap().field("deleted").unwrap();
    assert_eq!(flip.old_value.as_deref(), Some("false"));
    assert_eq!(flip.new_value.as_deref(), Some("true"));
}

#[test]
fn test_soft_delete_visibility() {
    // GIVEN
    let mut svc = service();
    let keep = create_tag(&mut svc, "keep");
    let drop = create_tag(&mut svc, "drop");
    svc.delete(drop.id, &MutationPayload::new()).unwrap();

    // THEN - default reads hide the deleted entity
    let errors = svc.find(drop.id, false).unwrap_err();
    assert!(errors.contains_code(ErrorCode::RecordNotFound));

    let listed = svc.all(EntityType::Tag, &[], &[], Page::none()).unwrap();
    assert_eq!(listed.total, 1);
    assert_eq!(listed.entities[0].id, keep.id);

    // ... but the override flag surfaces it, flag intact
    let raw = svc.find(drop.id, true).unwrap();
    assert!(raw.deleted);
}

#[test]
fn test_update_after_delete_is_record_not_found() {
    // GIVEN
    let mut svc = service();
    let tag = create_tag(&mut svc, "stale");
    svc.delete(tag.id, &MutationPayload::new()).unwrap();

    // WHEN
    let result = svc.update(tag.id, &tag_payload("revived"));

    // THEN
    let errors = result.unwrap_err();
    assert!(errors.contains_code(ErrorCode::RecordNotFound));
}

#[test]
fn test_update_unknown_id() {
    // GIVEN
    let mut svc = service();

    // WHEN
    let result = svc.update(EntityId::generate(), &tag_payload("x"));

    // THEN
    let errors = result.unwrap_err();
    assert!(errors.contains_code(ErrorCode::RecordNotFound));
    assert!(svc.audit_log().is_empty());
}
