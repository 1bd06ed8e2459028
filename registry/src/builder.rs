//! RegistryBuilder for constructing an immutable Registry.

use crate::registry::Registry;
use crate::{Cardinality, CodeDomain, EntityDef, FieldDef, RelationshipDef};
use chronicle_core::{DataType, EntityType};
use regex_lite::Regex;
use std::collections::HashMap;
use thiserror::Error;

/// Errors that can occur during registry construction.
#[derive(Debug, Error)]
pub enum RegistryError {
    #[error("Duplicate entity type: {0}")]
    DuplicateEntityType(EntityType),

    #[error("Duplicate field '{field}' on {entity_type}")]
    DuplicateField {
        entity_type: EntityType,
        field: String,
    },

    #[error("Duplicate relationship '{relationship}' on {entity_type}")]
    DuplicateRelationship {
        entity_type: EntityType,
        relationship: String,
    },

    #[error("Field name '{0}' is reserved for the entity envelope")]
    ReservedFieldName(String),

    #[error("Relationship name '{0}' is reserved")]
    ReservedRelationshipName(String),

    #[error("Duplicate code domain: {0}")]
    DuplicateCodeDomain(String),

    #[error("Unknown code domain '{domain}' referenced by {entity_type}.{field}")]
    UnknownCodeDomain {
        entity_type: EntityType,
        field: String,
        domain: String,
    },

    #[error("Invalid pattern on {entity_type}.{field}: {pattern}")]
    InvalidPattern {
        entity_type: EntityType,
        field: String,
        pattern: String,
    },
}

impl RegistryError {
    pub(crate) fn duplicate_field(entity_type: EntityType, field: &str) -> Self {
        RegistryError::DuplicateField {
            entity_type,
            field: field.to_string(),
        }
    }

    pub(crate) fn duplicate_relationship(entity_type: EntityType, relationship: &str) -> Self {
        RegistryError::DuplicateRelationship {
            entity_type,
            relationship: relationship.to_string(),
        }
    }

    pub(crate) fn unknown_code_domain(entity_type: EntityType, field: &str, domain: &str) -> Self {
        RegistryError::UnknownCodeDomain {
            entity_type,
            field: field.to_string(),
            domain: domain.to_string(),
        }
    }

    pub(crate) fn invalid_pattern(entity_type: EntityType, field: &str, pattern: &str) -> Self {
        RegistryError::InvalidPattern {
            entity_type,
            field: field.to_string(),
            pattern: pattern.to_string(),
        }
    }
}

/// Scalar field names owned by the entity envelope, never declarable.
const RESERVED_FIELDS: [&str; 3] = ["id", "version", "deleted"];

/// Relationship names owned by the entity envelope.
const RESERVED_RELATIONSHIPS: [&str; 2] = ["tags", "transaction"];

/// Builder for constructing an immutable [`Registry`].
#[derive(Debug, Default)]
pub struct RegistryBuilder {
    /// Entity definitions being built.
    defs: HashMap<EntityType, EntityDef>,
    /// Code domains being built.
    code_domains: HashMap<String, CodeDomain>,
}

impl RegistryBuilder {
    /// Create a new builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Begin declaring an entity type.
    pub fn add_entity_type(&mut self, entity_type: EntityType) -> EntityTypeBuilder<'_> {
        EntityTypeBuilder {
            builder: self,
            entity_type,
            fields: Vec::new(),
            relationships: Vec::new(),
            taggable: false,
        }
    }

    /// Register a code domain.
    pub fn add_code_domain(
        &mut self,
        name: impl Into<String>,
        codes: impl IntoIterator<Item = impl Into<String>>,
    ) -> Result<&mut Self, RegistryError> {
        let domain = CodeDomain::new(name, codes);
        if self.code_domains.contains_key(&domain.name) {
            return Err(RegistryError::DuplicateCodeDomain(domain.name));
        }
        self.code_domains.insert(domain.name.clone(), domain);
        Ok(self)
    }

    /// Finish building. Verifies every field's code-domain reference against
    /// the registered domains (domains may be registered after the types that
    /// use them).
    pub fn build(self) -> Result<Registry, RegistryError> {
        for def in self.defs.values() {
            for field in &def.fields {
                if let Some(domain) = &field.code_domain {
                    if !self.code_domains.contains_key(domain) {
                        return Err(RegistryError::unknown_code_domain(
                            def.entity_type,
                            &field.name,
                            domain,
                        ));
                    }
                }
            }
        }
        Ok(Registry::new(self.defs, self.code_domains))
    }
}

/// Builder for one entity type's metadata.
pub struct EntityTypeBuilder<'a> {
    builder: &'a mut RegistryBuilder,
    entity_type: EntityType,
    fields: Vec<FieldDef>,
    relationships: Vec<RelationshipDef>,
    taggable: bool,
}

impl<'a> EntityTypeBuilder<'a> {
    /// Add a scalar field.
    pub fn field(mut self, field: FieldDef) -> Self {
        self.fields.push(field);
        self
    }

    /// Add a relationship.
    pub fn relationship(
        mut self,
        name: impl Into<String>,
        target: EntityType,
        cardinality: Cardinality,
    ) -> Self {
        self.relationships
            .push(RelationshipDef::new(name, target, cardinality));
        self
    }

    /// Mark this type as taggable: the built-in `tags` relationship (target
    /// Tag, cardinality collection) is auto-declared.
    pub fn taggable(mut self) -> Self {
        self.taggable = true;
        self
    }

    /// Finish building this entity type.
    pub fn done(self) -> Result<EntityType, RegistryError> {
        if self.builder.defs.contains_key(&self.entity_type) {
            return Err(RegistryError::DuplicateEntityType(self.entity_type));
        }

        for field in &self.fields {
            if RESERVED_FIELDS.contains(&field.name.as_str()) {
                return Err(RegistryError::ReservedFieldName(field.name.clone()));
            }
            if let Some(pattern) = &field.pattern {
                if Regex::new(pattern).is_err() {
                    return Err(RegistryError::invalid_pattern(
                        self.entity_type,
                        &field.name,
                        pattern,
                    ));
                }
            }
        }
        for window in 0..self.fields.len() {
            let name = &self.fields[window].name;
            if self.fields[window + 1..].iter().any(|f| &f.name == name) {
                return Err(RegistryError::duplicate_field(self.entity_type, name));
            }
        }

        for rel in &self.relationships {
            if RESERVED_RELATIONSHIPS.contains(&rel.name.as_str()) {
                return Err(RegistryError::ReservedRelationshipName(rel.name.clone()));
            }
        }
        for window in 0..self.relationships.len() {
            let name = &self.relationships[window].name;
            if self.relationships[window + 1..]
                .iter()
                .any(|r| &r.name == name)
            {
                return Err(RegistryError::duplicate_relationship(self.entity_type, name));
            }
        }

        // Envelope metadata: id/version/deleted are always public; deleted is
        // a settable, auditable flag (delete-is-update shows in the audit
        // trail through it).
        let mut fields = vec![
            FieldDef::new("id", DataType::String).builtin_field(),
            FieldDef::new("version", DataType::Int).builtin_field(),
            FieldDef::new("deleted", DataType::Bool).auditable().builtin_field(),
        ];
        fields.extend(self.fields);

        let mut relationships = self.relationships;
        if self.taggable {
            relationships.push(RelationshipDef::new(
                "tags",
                EntityType::Tag,
                Cardinality::Collection,
            ));
        }

        let def = EntityDef {
            entity_type: self.entity_type,
            fields,
            relationships,
        };
        self.builder.defs.insert(self.entity_type, def);

        Ok(self.entity_type)
    }
}
