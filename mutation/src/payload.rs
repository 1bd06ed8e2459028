//! Mutation payload ingestion.
//!
//! The documented JSON shape:
//! `{data: {attributes: {..}, relationships: {..}}, meta: {userId, clientId,
//! updateReason}}`. Attributes and relationship linkage stay raw JSON here;
//! validation and linkage resolution convert and check them downstream so
//! every problem is reported with a pointer instead of failing
//! deserialization.

use std::collections::BTreeMap;

use chronicle_core::MutationMeta;
use serde::Deserialize;

/// A create/update/delete payload.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct MutationPayload {
    /// The resource document: attributes and relationship linkage.
    pub data: PayloadData,
    /// The actor context.
    pub meta: MutationMeta,
}

/// The `data` member of a mutation payload.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct PayloadData {
    /// Raw attribute values by field name.
    pub attributes: BTreeMap<String, serde_json::Value>,
    /// Raw relationship linkage by relationship name.
    pub relationships: BTreeMap<String, serde_json::Value>,
}

impl MutationPayload {
    /// An empty payload.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a payload from its JSON document form.
    pub fn from_json(json: serde_json::Value) -> Result<Self, serde_json::Error> {
        serde_json::from_value(json)
    }

    /// Set one attribute.
    pub fn attribute(mut self, name: impl Into<String>, value: serde_json::Value) -> Self {
        self.data.attributes.insert(name.into(), value);
        self
    }

    /// Set one relationship's linkage.
    pub fn relationship(mut self, name: impl Into<String>, linkage: serde_json::Value) -> Self {
        self.data.relationships.insert(name.into(), linkage);
        self
    }

    /// Set the actor context.
    pub fn with_meta(mut self, meta: MutationMeta) -> Self {
        self.meta = meta;
        self
    }
}

/// A relationship-member mutation payload: the linkage under `data`, plus
/// the actor context.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RelationshipPayload {
    /// Raw resource linkage: a single identifier, a list, or null.
    pub data: serde_json::Value,
    /// The actor context.
    pub meta: MutationMeta,
}

impl RelationshipPayload {
    /// Create a payload from raw linkage.
    pub fn new(data: serde_json::Value) -> Self {
        Self {
            data,
            meta: MutationMeta::default(),
        }
    }

    /// Parse a payload from its JSON document form.
    pub fn from_json(json: serde_json::Value) -> Result<Self, serde_json::Error> {
        serde_json::from_value(json)
    }

    /// Set the actor context.
    pub fn with_meta(mut self, meta: MutationMeta) -> Self {
        self.meta = meta;
        self
    }
}
