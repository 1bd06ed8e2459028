//! The audit trail end to end: field rows, actor attribution, update
//! reasons, and history recovery.

use chronicle_tests::prelude::*;

#[test]
fn test_update_records_one_row_per_changed_auditable_field() {
    // GIVEN
    let mut svc = service();
    let user = create_user(&mut svc, "alice");

    // WHEN - two auditable fields change, one stays put
    let payload = MutationPayload::new()
        .attribute("username", json!("alice2"))
        .attribute("display_name", json!("Alice"))
        .attribute("timezone_code", json!("UTC"));
    svc.update(user.id, &payload).unwrap();

    // THEN
    let history = svc.history(user.id);
    assert_eq!(history.len(), 1);
    let transaction = history[0];
    assert_eq!(transaction.field_count(), 2);

    let row = transaction.field("username").unwrap();
    assert_eq!(row.old_value.as_deref(), Some("alice"));
    assert_eq!(row.new_value.as_deref(), Some("alice2"));

    let row = transaction.field("display_name").unwrap();
    assert_eq!(row.old_value, None);
    assert_eq!(row.new_value.as_deref(), Some("Alice"));
}

#[test]
fn test_non_auditable_change_records_nothing() {
    // GIVEN - Person.phone is not auditable
    let mut svc = service();
    let person = create_person(&mut svc, "Ada", "Lovelace");

    // WHEN
    let payload = MutationPayload::new().attribute("phone", json!("+44 20 7946 0958"));
    let updated = svc.update(person.id, &payload).unwrap();

    // THEN - the mutation persists and versions, but leaves no field rows
    assert_eq!(updated.version, 2);
    assert!(svc.history(person.id).is_empty());
    assert_eq!(
        updated.field("phone"),
        Some(Value::from("+44 20 7946 0958"))
    );
}

#[test]
fn test_actor_attribution_and_degradation() {
    // GIVEN
    let mut svc = service();
    let actor = create_user(&mut svc, "auditor");
    let tag = create_tag(&mut svc, "vip");

    // WHEN - a known actor
    let meta = MutationMeta::new()
        .with_user(actor.id.to_string())
        .with_client("crm-web");
    svc.update(tag.id, &tag_payload("gold").with_meta(meta))
        .unwrap();

    // THEN
    let history = svc.history(tag.id);
    let attributed = history.last().unwrap();
    assert_eq!(attributed.user, Some(actor.id));
    assert_eq!(attributed.client.as_deref(), Some("crm-web"));

    // WHEN - an unresolvable actor reference
    let meta = MutationMeta::new().with_user("not-a-ulid");
    svc.update(tag.id, &tag_payload("platinum").with_meta(meta))
        .unwrap();

    // THEN - the mutation still lands, the actor degrades to none
    let history = svc.history(tag.id);
    assert_eq!(history.last().unwrap().user, None);
}

#[test]
fn test_update_reason_defaults_per_operation() {
    // GIVEN
    let mut svc = service();
    let tag = create_tag(&mut svc, "vip");

    // WHEN
    svc.update(tag.id, &tag_payload("gold")).unwrap();
    svc.delete(tag.id, &MutationPayload::new()).unwrap();

    // THEN
    let history = svc.history(tag.id);
    assert_eq!(history[0].update_reason, "tag_update_existing_record");
    assert_eq!(history[1].update_reason, "tag_delete_existing_record");
}

#[test]
fn test_supplied_update_reason_wins() {
    // GIVEN
    let mut svc = service();
    let tag = create_tag(&mut svc, "vip");

    // WHEN
    let payload = tag_payload("gold").with_meta(MutationMeta::new().with_reason("bulk_import"));
    svc.update(tag.id, &payload).unwrap();

    // THEN
    assert_eq!(svc.history(tag.id)[0].update_reason, "bulk_import");
}

#[test]
fn test_entity_keeps_only_latest_transaction_reference() {
    // GIVEN
    let mut svc = service();
    let tag = create_tag(&mut svc, "vip");

    // WHEN
    let updated = svc.update(tag.id, &tag_payload("gold")).unwrap();

    // THEN - the back-reference moved to the newest transaction
    let history = svc.history(tag.id);
    assert_eq!(updated.transaction, history.last().unwrap().id);
    assert_ne!(updated.transaction, tag.transaction);
}

#[test]
fn test_history_recovered_across_interleaved_entities() {
    // GIVEN - two tags updated in interleaved order
    let mut svc = service();
    let a = create_tag(&mut svc, "a1");
    let b = create_tag(&mut svc, "b1");
    svc.update(a.id, &tag_payload("a2")).unwrap();
    svc.update(b.id, &tag_payload("b2")).unwrap();
    svc.update(a.id, &tag_payload("a3")).unwrap();

    // WHEN - recovering one entity's field rows across all transactions
    let rows = svc.audit_log().fields_for_entity(a.id);

    // THEN - the full label progression for a, in append order, nothing of b
    let new_values: Vec<_> = rows.iter().map(|r| r.new_value.as_deref()).collect();
    assert_eq!(new_values, vec![Some("a2"), Some("a3")]);
    assert!(rows.iter().all(|r| r.entity_id == a.id));
}

#[test]
fn test_create_transaction_has_no_field_rows() {
    // GIVEN - a pure create diffs None against None
    let mut svc = service();
    create_tag(&mut svc, "vip");

    // THEN
    assert_eq!(svc.audit_log().len(), 1);
    assert_eq!(svc.audit_log().transactions()[0].field_count(), 0);
}
