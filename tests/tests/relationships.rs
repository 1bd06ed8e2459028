//! Relationship linkage end to end: cardinality enforcement, member
//! mutations, and target existence checks.

use chronicle_tests::prelude::*;

#[test]
fn test_create_with_single_reference() {
    // GIVEN
    let mut svc = service();
    let person = create_person(&mut svc, "Ada", "Lovelace");

    // WHEN
    let payload = user_payload("ada").relationship("person", identifier(person.id, EntityType::Person));
    let user = svc.create(EntityType::User, &payload).unwrap();

    // THEN
    assert_eq!(user.relationship("person"), Some(LinkSlot::One(Some(person.id))));
}

#[test]
fn test_create_with_collection() {
    // GIVEN
    let mut svc = service();
    let ada = create_person(&mut svc, "Ada", "Lovelace");
    let grace = create_person(&mut svc, "Grace", "Hopper");

    // WHEN
    let payload = account_payload("Initech").relationship(
        "people",
        json!([
            identifier(ada.id, EntityType::Person),
            identifier(grace.id, EntityType::Person)
        ]),
    );
    let account = svc.create(EntityType::Account, &payload).unwrap();

    // THEN
    let slot = account.relationship("people").unwrap();
    assert_eq!(slot.len(), 2);
    assert!(slot.contains(ada.id));
    assert!(slot.contains(grace.id));
}

#[test]
fn test_cardinality_mismatch_persists_nothing() {
    // GIVEN - a single object aimed at the collection-cardinality people slot
    let mut svc = service();
    let ada = create_person(&mut svc, "Ada", "Lovelace");
    let before = svc.store().len();

    // WHEN
    let payload =
        account_payload("Initech").relationship("people", identifier(ada.id, EntityType::Person));
    let result = svc.create(EntityType::Account, &payload);

    // THEN
    let errors = result.unwrap_err();
    assert!(errors.contains_code(ErrorCode::RelationshipInvalidType));
    assert_eq!(svc.store().len(), before);
}

#[test]
fn test_undeclared_relationship_on_create() {
    // GIVEN - Tag declares no relationships at all
    let mut svc = service();
    let payload = tag_payload("vip").relationship(
        "person",
        identifier(EntityId::generate(), EntityType::Person),
    );

    // WHEN
    let errors = svc.create(EntityType::Tag, &payload).unwrap_err();

    // THEN
    assert!(errors.contains_code(ErrorCode::RelationshipNotAllowed));
}

#[test]
fn test_wrong_target_type() {
    // GIVEN - a Person identifier aimed at the owner slot, which wants a User
    let mut svc = service();
    let person = create_person(&mut svc, "Ada", "Lovelace");
    let payload =
        account_payload("Initech").relationship("owner", identifier(person.id, EntityType::Person));

    // WHEN
    let errors = svc.create(EntityType::Account, &payload).unwrap_err();

    // THEN
    assert!(errors.contains_code(ErrorCode::RelationshipInvalidEntityType));
}

#[test]
fn test_missing_target_and_soft_deleted_target() {
    // GIVEN
    let mut svc = service();
    let ghost = EntityId::generate();
    let gone = create_user(&mut svc, "gone");
    svc.delete(gone.id, &MutationPayload::new()).unwrap();

    // WHEN - referencing an id that was never persisted
    let payload = account_payload("A").relationship("owner", identifier(ghost, EntityType::User));
    let errors = svc.create(EntityType::Account, &payload).unwrap_err();
    assert!(errors.contains_code(ErrorCode::RecordNotFound));

    // WHEN - referencing a soft-deleted entity
    let payload = account_payload("B").relationship("owner", identifier(gone.id, EntityType::User));
    let errors = svc.create(EntityType::Account, &payload).unwrap_err();

    // THEN
    assert!(errors.contains_code(ErrorCode::RecordNotFound));
}

#[test]
fn test_null_clears_single_but_not_collection() {
    // GIVEN
    let mut svc = service();
    let owner = create_user(&mut svc, "owner");
    let payload =
        account_payload("Initech").relationship("owner", identifier(owner.id, EntityType::User));
    let account = svc.create(EntityType::Account, &payload).unwrap();

    // WHEN - null to the single slot clears it
    let cleared = svc
        .update(
            account.id,
            &MutationPayload::new().relationship("owner", json!(null)),
        )
        .unwrap();
    assert_eq!(cleared.relationship("owner"), Some(LinkSlot::One(None)));

    // WHEN - null to a collection slot is invalid data
    let errors = svc
        .update(
            account.id,
            &MutationPayload::new().relationship("people", json!(null)),
        )
        .unwrap_err();

    // THEN
    assert!(errors.contains_code(ErrorCode::RelationshipInvalidData));
}

#[test]
fn test_add_members_appends_without_duplicates() {
    // GIVEN
    let mut svc = service();
    let ada = create_person(&mut svc, "Ada", "Lovelace");
    let grace = create_person(&mut svc, "Grace", "Hopper");
    let account = svc
        .create(
            EntityType::Account,
            &account_payload("Initech")
                .relationship("people", json!([identifier(ada.id, EntityType::Person)])),
        )
        .unwrap();

    // WHEN - adding one new member and one already present
    let payload = RelationshipPayload::new(json!([
        identifier(ada.id, EntityType::Person),
        identifier(grace.id, EntityType::Person)
    ]));
    let updated = svc
        .add_relationship_members(account.id, "people", &payload)
        .unwrap();

    // THEN
    let slot = updated.relationship("people").unwrap();
    assert_eq!(slot.len(), 2);
    assert_eq!(updated.version, 2);
}

#[test]
fn test_replace_and_remove_members() {
    // GIVEN
    let mut svc = service();
    let ada = create_person(&mut svc, "Ada", "Lovelace");
    let grace = create_person(&mut svc, "Grace", "Hopper");
    let account = svc
        .create(
            EntityType::Account,
            &account_payload("Initech")
                .relationship("people", json!([identifier(ada.id, EntityType::Person)])),
        )
        .unwrap();

    // WHEN - wholesale replace
    let payload = RelationshipPayload::new(json!([identifier(grace.id, EntityType::Person)]));
    let replaced = svc
        .replace_relationship_members(account.id, "people", &payload)
        .unwrap();
    let slot = replaced.relationship("people").unwrap();
    assert_eq!(slot.len(), 1);
    assert!(slot.contains(grace.id));

    // WHEN - remove the remaining member
    let payload = RelationshipPayload::new(json!([identifier(grace.id, EntityType::Person)]));
    let emptied = svc
        .remove_relationship_members(account.id, "people", &payload)
        .unwrap();

    // THEN
    assert_eq!(emptied.relationship("people").unwrap().len(), 0);
    assert_eq!(emptied.version, 4);
}

#[test]
fn test_member_ops_on_unknown_relationship() {
    // GIVEN
    let mut svc = service();
    let tag = create_tag(&mut svc, "vip");
    let payload = RelationshipPayload::new(json!([]));

    // WHEN
    let errors = svc
        .add_relationship_members(tag.id, "people", &payload)
        .unwrap_err();

    // THEN - unknown names surface as not-found here, not not-allowed
    assert!(errors.contains_code(ErrorCode::RelationshipNotFound));
}

#[test]
fn test_tags_relationship_on_taggable_types() {
    // GIVEN
    let mut svc = service();
    let vip = create_tag(&mut svc, "vip");
    let emea = create_tag(&mut svc, "emea");

    // WHEN
    let payload = person_payload("Ada", "Lovelace").relationship(
        "tags",
        json!([
            identifier(vip.id, EntityType::Tag),
            identifier(emea.id, EntityType::Tag)
        ]),
    );
    let person = svc.create(EntityType::Person, &payload).unwrap();

    // THEN
    let slot = person.relationship("tags").unwrap();
    assert_eq!(slot.len(), 2);

    // ... and tags on a Tag stays undeclared
    let payload = tag_payload("meta").relationship("tags", json!([]));
    let errors = svc.create(EntityType::Tag, &payload).unwrap_err();
    assert!(errors.contains_code(ErrorCode::RelationshipNotAllowed));
}
