//! Business-entity structures.
//!
//! `Entity` is the persistence envelope shared by every variant: identity,
//! version, soft-delete flag, tag set, and the back-reference to the audit
//! transaction that produced the current state. `EntityBody` holds the typed
//! per-variant fields. Generic infrastructure (validation, audit diffing,
//! filter evaluation) reaches fields and relationships through the name-based
//! accessors; business code uses the typed structs directly.

use std::collections::BTreeSet;

use crate::{EntityId, EntityType, TransactionId, Value};

/// A relationship slot on an entity.
///
/// Cardinality is structural: a to-one relationship holds an optional
/// reference, a to-many relationship holds an ordered set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LinkSlot {
    /// A to-one reference.
    One(Option<EntityId>),
    /// A to-many reference set.
    Many(BTreeSet<EntityId>),
}

impl LinkSlot {
    /// An empty to-many slot.
    pub fn empty_many() -> Self {
        LinkSlot::Many(BTreeSet::new())
    }

    /// A cleared to-one slot.
    pub fn empty_one() -> Self {
        LinkSlot::One(None)
    }

    /// Number of references held.
    pub fn len(&self) -> usize {
        match self {
            LinkSlot::One(r) => usize::from(r.is_some()),
            LinkSlot::Many(set) => set.len(),
        }
    }

    /// True when no reference is held.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// True when the slot holds the given reference.
    pub fn contains(&self, id: EntityId) -> bool {
        match self {
            LinkSlot::One(r) => *r == Some(id),
            LinkSlot::Many(set) => set.contains(&id),
        }
    }

    /// All held references, in slot order.
    pub fn members(&self) -> Vec<EntityId> {
        match self {
            LinkSlot::One(r) => r.iter().copied().collect(),
            LinkSlot::Many(set) => set.iter().copied().collect(),
        }
    }
}

/// An organization-level account.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Account {
    pub name: Option<String>,
    pub account_type_code: Option<String>,
    pub website: Option<String>,
    /// To-one: the user responsible for this account.
    pub owner: Option<EntityId>,
    /// To-many: the people attached to this account.
    pub people: BTreeSet<EntityId>,
}

/// A person/contact record.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Person {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    /// To-one: the account this person belongs to.
    pub account: Option<EntityId>,
}

/// A login user.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct User {
    pub username: Option<String>,
    pub timezone_code: Option<String>,
    pub locale_code: Option<String>,
    pub display_name: Option<String>,
    /// To-one: the person record behind this user.
    pub person: Option<EntityId>,
}

/// A labeling tag.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Tag {
    pub label: Option<String>,
}

/// The typed body of a business entity.
#[derive(Debug, Clone, PartialEq)]
pub enum EntityBody {
    Account(Account),
    Person(Person),
    User(User),
    Tag(Tag),
}

// Scalar fields are all strings today; Null clears the slot.
fn read_opt(slot: &Option<String>) -> Value {
    match slot {
        Some(s) => Value::String(s.clone()),
        None => Value::Null,
    }
}

fn write_opt(slot: &mut Option<String>, value: &Value) {
    *slot = value.as_str().map(|s| s.to_string());
}

impl EntityBody {
    /// Create an empty body for the given entity type.
    pub fn empty(entity_type: EntityType) -> Self {
        match entity_type {
            EntityType::Account => EntityBody::Account(Account::default()),
            EntityType::Person => EntityBody::Person(Person::default()),
            EntityType::User => EntityBody::User(User::default()),
            EntityType::Tag => EntityBody::Tag(Tag::default()),
        }
    }

    /// The discriminator for this body.
    pub fn entity_type(&self) -> EntityType {
        match self {
            EntityBody::Account(_) => EntityType::Account,
            EntityBody::Person(_) => EntityType::Person,
            EntityBody::User(_) => EntityType::User,
            EntityBody::Tag(_) => EntityType::Tag,
        }
    }

    /// Read a scalar field by name. Unset fields read as `Value::Null`;
    /// unknown names return None.
    pub fn field(&self, name: &str) -> Option<Value> {
        match self {
            EntityBody::Account(a) => match name {
                "name" => Some(read_opt(&a.name)),
                "account_type_code" => Some(read_opt(&a.account_type_code)),
                "website" => Some(read_opt(&a.website)),
                _ => None,
            },
            EntityBody::Person(p) => match name {
                "first_name" => Some(read_opt(&p.first_name)),
                "last_name" => Some(read_opt(&p.last_name)),
                "email" => Some(read_opt(&p.email)),
                "phone" => Some(read_opt(&p.phone)),
                _ => None,
            },
            EntityBody::User(u) => match name {
                "username" => Some(read_opt(&u.username)),
                "timezone_code" => Some(read_opt(&u.timezone_code)),
                "locale_code" => Some(read_opt(&u.locale_code)),
                "display_name" => Some(read_opt(&u.display_name)),
                _ => None,
            },
            EntityBody::Tag(t) => match name {
                "label" => Some(read_opt(&t.label)),
                _ => None,
            },
        }
    }

    /// Write a scalar field by name. Returns false for unknown names.
    pub fn set_field(&mut self, name: &str, value: &Value) -> bool {
        let slot = match self {
            EntityBody::Account(a) => match name {
                "name" => &mut a.name,
                "account_type_code" => &mut a.account_type_code,
                "website" => &mut a.website,
                _ => return false,
            },
            EntityBody::Person(p) => match name {
                "first_name" => &mut p.first_name,
                "last_name" => &mut p.last_name,
                "email" => &mut p.email,
                "phone" => &mut p.phone,
                _ => return false,
            },
            EntityBody::User(u) => match name {
                "username" => &mut u.username,
                "timezone_code" => &mut u.timezone_code,
                "locale_code" => &mut u.locale_code,
                "display_name" => &mut u.display_name,
                _ => return false,
            },
            EntityBody::Tag(t) => match name {
                "label" => &mut t.label,
                _ => return false,
            },
        };
        write_opt(slot, value);
        true
    }

    /// Read a declared relationship slot by name. Unknown names return None.
    pub fn relationship(&self, name: &str) -> Option<LinkSlot> {
        match self {
            EntityBody::Account(a) => match name {
                "owner" => Some(LinkSlot::One(a.owner)),
                "people" => Some(LinkSlot::Many(a.people.clone())),
                _ => None,
            },
            EntityBody::Person(p) => match name {
                "account" => Some(LinkSlot::One(p.account)),
                _ => None,
            },
            EntityBody::User(u) => match name {
                "person" => Some(LinkSlot::One(u.person)),
                _ => None,
            },
            EntityBody::Tag(_) => None,
        }
    }

    /// Replace a declared relationship slot wholesale. Returns false when the
    /// name is unknown or the slot shape does not match the declared
    /// cardinality.
    pub fn set_relationship(&mut self, name: &str, slot: LinkSlot) -> bool {
        match self {
            EntityBody::Account(a) => match (name, slot) {
                ("owner", LinkSlot::One(r)) => {
                    a.owner = r;
                    true
                }
                ("people", LinkSlot::Many(set)) => {
                    a.people = set;
                    true
                }
                _ => false,
            },
            EntityBody::Person(p) => match (name, slot) {
                ("account", LinkSlot::One(r)) => {
                    p.account = r;
                    true
                }
                _ => false,
            },
            EntityBody::User(u) => match (name, slot) {
                ("person", LinkSlot::One(r)) => {
                    u.person = r;
                    true
                }
                _ => false,
            },
            EntityBody::Tag(_) => false,
        }
    }
}

/// A versioned, taggable, soft-deletable business entity.
#[derive(Debug, Clone, PartialEq)]
pub struct Entity {
    /// Unique identifier, immutable after creation.
    pub id: EntityId,
    /// Starts at 1, incremented by exactly 1 on every persisted update.
    pub version: u64,
    /// Soft-delete flag; false at creation.
    pub deleted: bool,
    /// Unordered set of tag references.
    pub tags: BTreeSet<EntityId>,
    /// The audit transaction that produced the current state. Replaced, not
    /// accumulated, on each update.
    pub transaction: TransactionId,
    /// The typed variant fields.
    pub body: EntityBody,
}

impl Entity {
    /// Create a fresh, unpersisted entity record.
    pub fn new(body: EntityBody, transaction: TransactionId) -> Self {
        Self {
            id: EntityId::generate(),
            version: 1,
            deleted: false,
            tags: BTreeSet::new(),
            transaction,
            body,
        }
    }

    /// The discriminator for this entity.
    pub fn entity_type(&self) -> EntityType {
        self.body.entity_type()
    }

    /// Read a field by name, covering the built-ins (`id`, `version`,
    /// `deleted`) and the variant scalars. Unknown names return None.
    pub fn field(&self, name: &str) -> Option<Value> {
        match name {
            "id" => Some(Value::String(self.id.to_string())),
            "version" => Some(Value::Int(self.version as i64)),
            "deleted" => Some(Value::Bool(self.deleted)),
            _ => self.body.field(name),
        }
    }

    /// Write a settable field by name: `deleted` plus the variant scalars.
    /// `id` and `version` are never writable through this path.
    pub fn set_field(&mut self, name: &str, value: &Value) -> bool {
        match name {
            "deleted" => match value.as_bool() {
                Some(b) => {
                    self.deleted = b;
                    true
                }
                None => false,
            },
            "id" | "version" => false,
            _ => self.body.set_field(name, value),
        }
    }

    /// Read a relationship slot by name, covering the built-in `tags` set on
    /// taggable variants.
    pub fn relationship(&self, name: &str) -> Option<LinkSlot> {
        if name == "tags" && self.entity_type() != EntityType::Tag {
            return Some(LinkSlot::Many(self.tags.clone()));
        }
        self.body.relationship(name)
    }

    /// Replace a relationship slot wholesale, covering the built-in `tags`
    /// set. Returns false when the name is unknown or the shape does not
    /// match the declared cardinality.
    pub fn set_relationship(&mut self, name: &str, slot: LinkSlot) -> bool {
        if name == "tags" && self.entity_type() != EntityType::Tag {
            return match slot {
                LinkSlot::Many(set) => {
                    self.tags = set;
                    true
                }
                LinkSlot::One(_) => false,
            };
        }
        self.body.set_relationship(name, slot)
    }
}
