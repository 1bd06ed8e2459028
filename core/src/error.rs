//! The expected-failure vocabulary.
//!
//! Chronicle separates two error channels. Expected business outcomes
//! (validation failures, missing records, bad relationship payloads) travel as
//! [`ApiError`] values accumulated into an [`ErrorCollection`] and returned to
//! the caller. Infrastructure faults use per-crate `thiserror` enums and `?`
//! propagation. The two never mix.

use std::fmt;

use thiserror::Error;

/// Application-level error codes surfaced to callers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    /// The requested record does not exist (or is soft-deleted and hidden).
    RecordNotFound,
    /// A mandatory attribute is missing or null.
    ValidationMandatoryFieldMissing,
    /// An attribute value is unknown, of the wrong type, or fails its pattern.
    ValidationInvalidAttributeValue,
    /// An attribute value is not a member of its declared code domain.
    ValidationInvalidCodeValue,
    /// A filter or sort references a field outside the public-field set.
    ValidationInvalidQueryParameter,
    /// The relationship name is not declared on the entity type.
    RelationshipNotAllowed,
    /// The relationship payload is structurally malformed.
    RelationshipInvalidData,
    /// The payload cardinality does not match the declared cardinality.
    RelationshipInvalidType,
    /// The resource identifier's type does not match the declared target.
    RelationshipInvalidEntityType,
    /// The named relationship does not exist on the entity type.
    RelationshipNotFound,
}

impl ErrorCode {
    /// The wire name for this code.
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::RecordNotFound => "record_not_found",
            ErrorCode::ValidationMandatoryFieldMissing => "validation_mandatory_field_missing",
            ErrorCode::ValidationInvalidAttributeValue => "validation_invalid_attribute_value",
            ErrorCode::ValidationInvalidCodeValue => "validation_invalid_code_value",
            ErrorCode::ValidationInvalidQueryParameter => "validation_invalid_query_parameter",
            ErrorCode::RelationshipNotAllowed => "relationship_not_allowed",
            ErrorCode::RelationshipInvalidData => "relationship_invalid_data",
            ErrorCode::RelationshipInvalidType => "relationship_invalid_type",
            ErrorCode::RelationshipInvalidEntityType => "relationship_invalid_entity_type",
            ErrorCode::RelationshipNotFound => "relationship_not_found",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A single expected-failure report.
///
/// Carries enough structure (code + source pointer) for a caller to map the
/// failure back to the originating input field or relationship.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiError {
    /// The application error code.
    pub code: ErrorCode,
    /// Short human-readable title.
    pub title: String,
    /// Longer human-readable detail, where one helps.
    pub detail: Option<String>,
    /// JSON source pointer (`/data/attributes/<field>` or
    /// `/data/relationships/<name>`), where applicable.
    pub pointer: Option<String>,
}

impl ApiError {
    /// Create a new error.
    pub fn new(code: ErrorCode, title: impl Into<String>) -> Self {
        Self {
            code,
            title: title.into(),
            detail: None,
            pointer: None,
        }
    }

    /// Attach a human-readable detail.
    pub fn with_detail(mut self, detail: impl Into<String>) -> Self {
        self.detail = Some(detail.into());
        self
    }

    /// Attach a source pointer.
    pub fn with_pointer(mut self, pointer: impl Into<String>) -> Self {
        self.pointer = Some(pointer.into());
        self
    }

    /// Pointer to a payload attribute.
    pub fn at_attribute(self, field: &str) -> Self {
        self.with_pointer(format!("/data/attributes/{}", field))
    }

    /// Pointer to a payload relationship.
    pub fn at_relationship(self, name: &str) -> Self {
        self.with_pointer(format!("/data/relationships/{}", name))
    }

    /// A record lookup failed.
    pub fn record_not_found(detail: impl Into<String>) -> Self {
        Self::new(ErrorCode::RecordNotFound, "Record not found").with_detail(detail)
    }

    /// A mandatory attribute is missing or null.
    pub fn mandatory_field_missing(field: &str) -> Self {
        Self::new(
            ErrorCode::ValidationMandatoryFieldMissing,
            "Mandatory field missing",
        )
        .with_detail(format!("Field '{}' is mandatory", field))
        .at_attribute(field)
    }

    /// An attribute value is unknown or malformed.
    pub fn invalid_attribute_value(field: &str, detail: impl Into<String>) -> Self {
        Self::new(
            ErrorCode::ValidationInvalidAttributeValue,
            "Invalid attribute value",
        )
        .with_detail(detail)
        .at_attribute(field)
    }

    /// An attribute value is outside its code domain.
    pub fn invalid_code_value(field: &str, value: impl fmt::Display) -> Self {
        Self::new(ErrorCode::ValidationInvalidCodeValue, "Invalid code value")
            .with_detail(format!("Value {} is not a known code for '{}'", value, field))
            .at_attribute(field)
    }

    /// A filter/sort field is outside the public-field set.
    pub fn invalid_query_parameter(field: &str) -> Self {
        Self::new(
            ErrorCode::ValidationInvalidQueryParameter,
            "Invalid query parameter",
        )
        .with_detail(format!("Field '{}' is not queryable", field))
    }

    /// The relationship name is not declared for payload use.
    pub fn relationship_not_allowed(name: &str) -> Self {
        Self::new(ErrorCode::RelationshipNotAllowed, "Relationship not allowed")
            .with_detail(format!("Relationship '{}' is not declared", name))
            .at_relationship(name)
    }

    /// The relationship payload is structurally malformed.
    pub fn relationship_invalid_data(name: &str, detail: impl Into<String>) -> Self {
        Self::new(ErrorCode::RelationshipInvalidData, "Invalid relationship data")
            .with_detail(detail)
            .at_relationship(name)
    }

    /// The payload cardinality does not match the declared cardinality.
    pub fn relationship_invalid_type(name: &str, detail: impl Into<String>) -> Self {
        Self::new(ErrorCode::RelationshipInvalidType, "Invalid relationship type")
            .with_detail(detail)
            .at_relationship(name)
    }

    /// The resource identifier's type does not match the declared target.
    pub fn relationship_invalid_entity_type(name: &str, expected: &str, actual: &str) -> Self {
        Self::new(
            ErrorCode::RelationshipInvalidEntityType,
            "Invalid relationship entity type",
        )
        .with_detail(format!("Expected type '{}', got '{}'", expected, actual))
        .at_relationship(name)
    }

    /// The named relationship does not exist on the entity type.
    pub fn relationship_not_found(name: &str) -> Self {
        Self::new(ErrorCode::RelationshipNotFound, "Relationship not found")
            .with_detail(format!("Relationship '{}' does not exist", name))
            .at_relationship(name)
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.code, self.title)?;
        if let Some(detail) = &self.detail {
            write!(f, ": {}", detail)?;
        }
        if let Some(pointer) = &self.pointer {
            write!(f, " (at {})", pointer)?;
        }
        Ok(())
    }
}

/// Accumulated expected failures from one call.
///
/// Operations gather every violation they can detect before returning, so one
/// response reports all simultaneous failures rather than the first.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ErrorCollection {
    errors: Vec<ApiError>,
}

impl ErrorCollection {
    /// Create an empty collection.
    pub fn new() -> Self {
        Self::default()
    }

    /// A collection holding a single error.
    pub fn single(error: ApiError) -> Self {
        Self {
            errors: vec![error],
        }
    }

    /// Add an error.
    pub fn push(&mut self, error: ApiError) {
        self.errors.push(error);
    }

    /// Absorb another collection.
    pub fn merge(&mut self, other: ErrorCollection) {
        self.errors.extend(other.errors);
    }

    /// True when no errors have accumulated.
    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    /// Number of accumulated errors.
    pub fn len(&self) -> usize {
        self.errors.len()
    }

    /// All accumulated errors, in detection order.
    pub fn all(&self) -> &[ApiError] {
        &self.errors
    }

    /// The codes of all accumulated errors, in detection order.
    pub fn codes(&self) -> Vec<ErrorCode> {
        self.errors.iter().map(|e| e.code).collect()
    }

    /// True when any accumulated error carries the given code.
    pub fn contains_code(&self, code: ErrorCode) -> bool {
        self.errors.iter().any(|e| e.code == code)
    }

    /// Finish an accumulation phase: `Ok(value)` when empty, `Err(self)`
    /// otherwise.
    pub fn into_result<T>(self, value: T) -> Result<T, ErrorCollection> {
        if self.is_empty() {
            Ok(value)
        } else {
            Err(self)
        }
    }
}

impl fmt::Display for ErrorCollection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} error(s)", self.errors.len())?;
        for error in &self.errors {
            write!(f, "; {}", error)?;
        }
        Ok(())
    }
}

impl From<ApiError> for ErrorCollection {
    fn from(error: ApiError) -> Self {
        Self::single(error)
    }
}

impl IntoIterator for ErrorCollection {
    type Item = ApiError;
    type IntoIter = std::vec::IntoIter<ApiError>;

    fn into_iter(self) -> Self::IntoIter {
        self.errors.into_iter()
    }
}

impl<'a> IntoIterator for &'a ErrorCollection {
    type Item = &'a ApiError;
    type IntoIter = std::slice::Iter<'a, ApiError>;

    fn into_iter(self) -> Self::IntoIter {
        self.errors.iter()
    }
}

/// An identifier string could not be parsed.
#[derive(Debug, Error)]
pub enum IdParseError {
    /// Not a valid ULID string.
    #[error("Invalid identifier: {0}")]
    Invalid(String),
}

impl IdParseError {
    /// The given text is not a valid identifier.
    pub fn invalid(text: &str) -> Self {
        IdParseError::Invalid(text.to_string())
    }
}

/// An entity-type string could not be parsed.
#[derive(Debug, Error)]
pub enum TypeParseError {
    /// Not a known entity type name.
    #[error("Unknown entity type: {0}")]
    Unknown(String),
}

impl TypeParseError {
    /// The given name is not a known entity type.
    pub fn unknown(name: &str) -> Self {
        TypeParseError::Unknown(name.to_string())
    }
}
