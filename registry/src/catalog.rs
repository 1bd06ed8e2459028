//! The seeded business catalog.
//!
//! Field, relationship, and code-domain metadata for the concrete entity
//! variants (Account, Person, User, Tag). The catalog is the one place the
//! business schema is declared; everything else consults it through the
//! [`Registry`].

use crate::{Cardinality, FieldDef, Registry, RegistryBuilder, RegistryError};
use chronicle_core::{DataType, EntityType};

/// Email shape check for Person.email. Deliverability is not our problem;
/// structure is.
const EMAIL_PATTERN: &str = r"^[^@\s]+@[^@\s]+\.[^@\s]+$";

/// Build the seeded registry for the business catalog.
pub fn business_catalog() -> Result<Registry, RegistryError> {
    let mut builder = RegistryBuilder::new();

    builder.add_code_domain(
        "timezone",
        [
            "UTC",
            "Europe/London",
            "Europe/Berlin",
            "Europe/Paris",
            "America/New_York",
            "America/Chicago",
            "America/Los_Angeles",
            "Asia/Tokyo",
            "Asia/Singapore",
            "Australia/Sydney",
        ],
    )?;
    builder.add_code_domain(
        "locale",
        [
            "en_US", "en_GB", "de_DE", "fr_FR", "es_ES", "it_IT", "ja_JP", "pt_BR",
        ],
    )?;
    builder.add_code_domain("account_type", ["customer", "partner", "prospect", "vendor"])?;

    builder
        .add_entity_type(EntityType::Account)
        .field(FieldDef::new("name", DataType::String).auditable().mandatory())
        .field(
            FieldDef::new("account_type_code", DataType::String)
                .auditable()
                .code_domain("account_type"),
        )
        .field(FieldDef::new("website", DataType::String).auditable())
        .relationship("owner", EntityType::User, Cardinality::Single)
        .relationship("people", EntityType::Person, Cardinality::Collection)
        .taggable()
        .done()?;

    builder
        .add_entity_type(EntityType::Person)
        .field(FieldDef::new("first_name", DataType::String).auditable().mandatory())
        .field(FieldDef::new("last_name", DataType::String).auditable().mandatory())
        .field(
            FieldDef::new("email", DataType::String)
                .auditable()
                .pattern(EMAIL_PATTERN),
        )
        .field(FieldDef::new("phone", DataType::String))
        .relationship("account", EntityType::Account, Cardinality::Single)
        .taggable()
        .done()?;

    builder
        .add_entity_type(EntityType::User)
        .field(FieldDef::new("username", DataType::String).auditable().mandatory())
        .field(
            FieldDef::new("timezone_code", DataType::String)
                .auditable()
                .mandatory()
                .code_domain("timezone"),
        )
        .field(
            FieldDef::new("locale_code", DataType::String)
                .auditable()
                .mandatory()
                .code_domain("locale"),
        )
        .field(FieldDef::new("display_name", DataType::String).auditable())
        .relationship("person", EntityType::Person, Cardinality::Single)
        .taggable()
        .done()?;

    builder
        .add_entity_type(EntityType::Tag)
        .field(FieldDef::new("label", DataType::String).auditable().mandatory())
        .done()?;

    builder.build()
}
