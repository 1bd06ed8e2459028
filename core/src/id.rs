//! Identity types for chronicle entities.

use std::fmt;
use std::str::FromStr;

use ulid::Ulid;

use crate::error::{IdParseError, TypeParseError};

/// Unique identifier for a business entity.
///
/// Backed by a ULID: globally unique, lexicographically time-sortable, and
/// immutable after creation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EntityId(Ulid);

impl EntityId {
    /// Generate a fresh identifier.
    pub fn generate() -> Self {
        Self(Ulid::new())
    }

    /// Parse an identifier from its canonical string form.
    pub fn parse(text: &str) -> Result<Self, IdParseError> {
        Ulid::from_string(text)
            .map(Self)
            .map_err(|_| IdParseError::invalid(text))
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

// Audit records serialize ids in their canonical string form.
impl serde::Serialize for EntityId {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl FromStr for EntityId {
    type Err = IdParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

/// Unique identifier for an audit transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TransactionId(Ulid);

impl TransactionId {
    /// Generate a fresh identifier.
    pub fn generate() -> Self {
        Self(Ulid::new())
    }

    /// Parse an identifier from its canonical string form.
    pub fn parse(text: &str) -> Result<Self, IdParseError> {
        Ulid::from_string(text)
            .map(Self)
            .map_err(|_| IdParseError::invalid(text))
    }
}

impl fmt::Display for TransactionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl serde::Serialize for TransactionId {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl FromStr for TransactionId {
    type Err = IdParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

/// Discriminator identifying the concrete business-entity variant.
///
/// The wire form (used in resource identifiers and payloads) is the lowercase
/// singular name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum EntityType {
    /// An organization-level account.
    Account,
    /// A person/contact record.
    Person,
    /// A login user.
    User,
    /// A labeling tag.
    Tag,
}

impl EntityType {
    /// All known entity types, in declaration order.
    pub const ALL: [EntityType; 4] = [
        EntityType::Account,
        EntityType::Person,
        EntityType::User,
        EntityType::Tag,
    ];

    /// The wire name for this type.
    pub fn as_str(&self) -> &'static str {
        match self {
            EntityType::Account => "account",
            EntityType::Person => "person",
            EntityType::User => "user",
            EntityType::Tag => "tag",
        }
    }
}

impl fmt::Display for EntityType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl serde::Serialize for EntityType {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl FromStr for EntityType {
    type Err = TypeParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "account" => Ok(EntityType::Account),
            "person" => Ok(EntityType::Person),
            "user" => Ok(EntityType::User),
            "tag" => Ok(EntityType::Tag),
            _ => Err(TypeParseError::unknown(s)),
        }
    }
}
