//! Metadata definition types.

use chronicle_core::{DataType, EntityType};
use std::collections::BTreeSet;

/// Whether a relationship holds one reference or a set of them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cardinality {
    /// Exactly zero or one reference.
    Single,
    /// Zero or more references.
    Collection,
}

impl Cardinality {
    /// The display name of this cardinality.
    pub fn name(&self) -> &'static str {
        match self {
            Cardinality::Single => "single",
            Cardinality::Collection => "collection",
        }
    }
}

/// Scalar field definition within an entity type.
#[derive(Debug, Clone)]
pub struct FieldDef {
    /// Field name.
    pub name: String,
    /// Declared data type.
    pub data_type: DataType,
    /// Whether changes to this field are captured in audit transactions.
    pub auditable: bool,
    /// Whether this field must be present and non-null.
    pub mandatory: bool,
    /// Name of the code domain this field's values must belong to, if any.
    pub code_domain: Option<String>,
    /// Regex pattern string values must match, if any.
    pub pattern: Option<String>,
    /// Whether this is a built-in envelope field (`id`, `version`, `deleted`)
    /// rather than a declared variant scalar.
    pub builtin: bool,
}

impl FieldDef {
    /// Create a field definition with no constraints.
    pub fn new(name: impl Into<String>, data_type: DataType) -> Self {
        Self {
            name: name.into(),
            data_type,
            auditable: false,
            mandatory: false,
            code_domain: None,
            pattern: None,
            builtin: false,
        }
    }

    /// Mark changes to this field as audit-captured.
    pub fn auditable(mut self) -> Self {
        self.auditable = true;
        self
    }

    /// Mark this field as mandatory.
    pub fn mandatory(mut self) -> Self {
        self.mandatory = true;
        self
    }

    /// Constrain values to members of the named code domain.
    pub fn code_domain(mut self, domain: impl Into<String>) -> Self {
        self.code_domain = Some(domain.into());
        self
    }

    /// Constrain string values to match the given regex pattern.
    pub fn pattern(mut self, pattern: impl Into<String>) -> Self {
        self.pattern = Some(pattern.into());
        self
    }

    pub(crate) fn builtin_field(mut self) -> Self {
        self.builtin = true;
        self
    }
}

/// Relationship definition within an entity type.
#[derive(Debug, Clone)]
pub struct RelationshipDef {
    /// Relationship name.
    pub name: String,
    /// The entity type referenced entities must have.
    pub target: EntityType,
    /// Single reference or reference set.
    pub cardinality: Cardinality,
}

impl RelationshipDef {
    /// Create a relationship definition.
    pub fn new(name: impl Into<String>, target: EntityType, cardinality: Cardinality) -> Self {
        Self {
            name: name.into(),
            target,
            cardinality,
        }
    }
}

/// Full metadata for one entity type: its fields (declaration order preserved)
/// and its relationships.
#[derive(Debug, Clone)]
pub struct EntityDef {
    /// The entity type being described.
    pub entity_type: EntityType,
    /// Scalar fields, built-ins first, then declaration order.
    pub fields: Vec<FieldDef>,
    /// Declared relationships, declaration order.
    pub relationships: Vec<RelationshipDef>,
}

impl EntityDef {
    /// Look up a field by name.
    pub fn field(&self, name: &str) -> Option<&FieldDef> {
        self.fields.iter().find(|f| f.name == name)
    }

    /// Look up a relationship by name.
    pub fn relationship(&self, name: &str) -> Option<&RelationshipDef> {
        self.relationships.iter().find(|r| r.name == name)
    }

    /// Auditable fields, in declaration order.
    pub fn auditable_fields(&self) -> impl Iterator<Item = &FieldDef> {
        self.fields.iter().filter(|f| f.auditable)
    }

    /// Mandatory fields, in declaration order.
    pub fn mandatory_fields(&self) -> impl Iterator<Item = &FieldDef> {
        self.fields.iter().filter(|f| f.mandatory)
    }
}

/// A named set of valid code values (timezones, locales, account types).
#[derive(Debug, Clone)]
pub struct CodeDomain {
    /// Domain name.
    pub name: String,
    /// The valid codes.
    pub codes: BTreeSet<String>,
}

impl CodeDomain {
    /// Create a code domain from a list of codes.
    pub fn new(name: impl Into<String>, codes: impl IntoIterator<Item = impl Into<String>>) -> Self {
        Self {
            name: name.into(),
            codes: codes.into_iter().map(Into::into).collect(),
        }
    }

    /// True when the given code is a member of this domain.
    pub fn contains(&self, code: &str) -> bool {
        self.codes.contains(code)
    }
}
