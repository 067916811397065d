//! Typed configuration model for palaver endpoints.
//!
//! A configuration file holds one section per endpoint. Each section is
//! validated against field-spec tables (the universal keys every endpoint
//! accepts, plus the resolved connector type's own keys) and normalized into
//! an [`EndpointConfig`]. A misconfigured section is reported and skipped;
//! it never prevents other sections from starting.

pub mod error;
pub mod loader;
pub mod parse;
pub mod spec;
pub mod value;

pub use {
    error::{ConfigError, LoadError},
    loader::Section,
    parse::{ConnectorCatalog, parse_section},
    spec::{FieldSpec, FieldSpecs, FieldSubtype, UNIVERSAL_FIELD_SPECS},
    value::{ConfigValue, EndpointConfig},
};
