//! Attribute validation against registry metadata.
//!
//! Converts raw JSON attribute values to typed [`Value`]s per the declared
//! data type and checks every constraint the registry declares: mandatory
//! presence, code-domain membership, and pattern shape. Violations
//! accumulate; a payload with three bad fields reports three errors.

use std::collections::BTreeMap;

use chronicle_core::{ApiError, Attributes, DataType, EntityType, ErrorCollection, Value};
use chronicle_registry::{FieldDef, Registry};
use regex_lite::Regex;

/// Which rule group applies alongside the defaults.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RuleGroup {
    /// Creating a new entity: mandatory fields must be supplied.
    Create,
    /// Updating an existing entity: mandatory fields may be absent, but not
    /// nulled out.
    Update,
}

/// Attribute names the payload may carry but never sets directly.
/// `id` and `version` are server-owned (anti-tamper); `type` is derived.
const DISCARDED_ATTRIBUTES: [&str; 3] = ["id", "version", "type"];

/// Validate and convert a raw attribute map.
///
/// Returns the cleanly converted attributes alongside every violation found;
/// fields that failed a check are absent from the clean map.
pub fn validate_attributes(
    registry: &Registry,
    entity_type: EntityType,
    raw: &BTreeMap<String, serde_json::Value>,
    group: RuleGroup,
) -> (Attributes, ErrorCollection) {
    let mut clean = Attributes::new();
    let mut errors = ErrorCollection::new();

    let Some(def) = registry.entity_def(entity_type) else {
        // Registered catalogs cover every EntityType variant; an empty def
        // would reject everything below anyway.
        return (clean, errors);
    };

    for (name, json) in raw {
        if DISCARDED_ATTRIBUTES.contains(&name.as_str()) {
            continue;
        }

        let Some(field) = def.field(name) else {
            errors.push(ApiError::invalid_attribute_value(
                name,
                format!("Unknown attribute '{}' for type {}", name, entity_type),
            ));
            continue;
        };

        let value = match convert_value(json, field.data_type) {
            Ok(value) => value,
            Err(detail) => {
                errors.push(ApiError::invalid_attribute_value(name, detail));
                continue;
            }
        };

        if value.is_null() && field.mandatory {
            errors.push(ApiError::mandatory_field_missing(name));
            continue;
        }

        if let Some(violation) = check_constraints(registry, field, &value) {
            errors.push(violation);
            continue;
        }

        clean.insert(name.clone(), value);
    }

    if group == RuleGroup::Create {
        for field in def.mandatory_fields() {
            // Supplied-but-invalid fields already carry their own error.
            if !raw.contains_key(&field.name) {
                errors.push(ApiError::mandatory_field_missing(&field.name));
            }
        }
    }

    (clean, errors)
}

fn convert_value(json: &serde_json::Value, data_type: DataType) -> Result<Value, String> {
    if json.is_null() {
        return Ok(Value::Null);
    }
    let converted = match (data_type, json) {
        (DataType::String, serde_json::Value::String(s)) => Some(Value::String(s.clone())),
        (DataType::Bool, serde_json::Value::Bool(b)) => Some(Value::Bool(*b)),
        (DataType::Int, serde_json::Value::Number(n)) => n.as_i64().map(Value::Int),
        (DataType::Float, serde_json::Value::Number(n)) => n.as_f64().map(Value::Float),
        (DataType::Timestamp, serde_json::Value::String(s)) => {
            chrono::DateTime::parse_from_rfc3339(s)
                .ok()
                .map(|t| Value::Timestamp(t.with_timezone(&chrono::Utc)))
        }
        _ => None,
    };
    converted.ok_or_else(|| format!("Expected a {} value, got {}", data_type, json))
}

fn check_constraints(registry: &Registry, field: &FieldDef, value: &Value) -> Option<ApiError> {
    let Some(text) = value.as_str() else {
        return None;
    };

    if let Some(domain) = &field.code_domain {
        if !registry.is_valid_code(domain, text) {
            return Some(ApiError::invalid_code_value(&field.name, text));
        }
    }

    if let Some(pattern) = &field.pattern {
        // Patterns were compile-checked at registry build time.
        if let Ok(regex) = Regex::new(pattern) {
            if !regex.is_match(text) {
                return Some(ApiError::invalid_attribute_value(
                    &field.name,
                    format!("Value '{}' does not match the expected format", text),
                ));
            }
        }
    }

    None
}
