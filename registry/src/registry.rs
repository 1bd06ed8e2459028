//! The Registry - immutable metadata lookup.

use crate::{CodeDomain, EntityDef, FieldDef, RelationshipDef};
use chronicle_core::EntityType;
use std::collections::{BTreeSet, HashMap};

/// Runtime lookup of entity metadata. Immutable after construction; built
/// once via [`crate::RegistryBuilder`] and passed by reference into every
/// component that needs it.
#[derive(Debug)]
pub struct Registry {
    /// Entity definitions by type.
    defs: HashMap<EntityType, EntityDef>,
    /// Code domains by name.
    code_domains: HashMap<String, CodeDomain>,
    /// Per-type public-field sets (filterable/sortable names).
    public_fields: HashMap<EntityType, BTreeSet<String>>,
}

impl Registry {
    pub(crate) fn new(
        defs: HashMap<EntityType, EntityDef>,
        code_domains: HashMap<String, CodeDomain>,
    ) -> Self {
        let public_fields = defs
            .iter()
            .map(|(entity_type, def)| {
                let names = def.fields.iter().map(|f| f.name.clone()).collect();
                (*entity_type, names)
            })
            .collect();
        Self {
            defs,
            code_domains,
            public_fields,
        }
    }

    // ==================== Entity Metadata ====================

    /// Get the definition for an entity type.
    pub fn entity_def(&self, entity_type: EntityType) -> Option<&EntityDef> {
        self.defs.get(&entity_type)
    }

    /// Get a field definition.
    pub fn field_def(&self, entity_type: EntityType, name: &str) -> Option<&FieldDef> {
        self.defs.get(&entity_type).and_then(|d| d.field(name))
    }

    /// Get a relationship definition.
    pub fn relationship_def(
        &self,
        entity_type: EntityType,
        name: &str,
    ) -> Option<&RelationshipDef> {
        self.defs
            .get(&entity_type)
            .and_then(|d| d.relationship(name))
    }

    /// All registered entity types.
    pub fn entity_types(&self) -> impl Iterator<Item = EntityType> + '_ {
        self.defs.keys().copied()
    }

    // ==================== Public Fields ====================

    /// The public-field set for an entity type: the names callers may filter
    /// and sort by (built-ins plus declared scalars).
    pub fn public_fields(&self, entity_type: EntityType) -> Option<&BTreeSet<String>> {
        self.public_fields.get(&entity_type)
    }

    /// True when the named field is filterable/sortable for the type.
    pub fn is_public_field(&self, entity_type: EntityType, name: &str) -> bool {
        self.public_fields
            .get(&entity_type)
            .is_some_and(|fields| fields.contains(name))
    }

    // ==================== Code Domains ====================

    /// Get a code domain by name.
    pub fn code_domain(&self, name: &str) -> Option<&CodeDomain> {
        self.code_domains.get(name)
    }

    /// True when `code` is a member of the named domain. Unknown domains
    /// admit nothing.
    pub fn is_valid_code(&self, domain: &str, code: &str) -> bool {
        self.code_domains
            .get(domain)
            .is_some_and(|d| d.contains(code))
    }
}
