//! Section validation: raw key/value text in, normalized [`EndpointConfig`]
//! out.
//!
//! Two passes run per section: first the universal field specs (which also
//! resolve the connector type), then the resolved type's own specs. Either
//! pass failing aborts the section with no partial record.

use std::collections::HashMap;

use {secrecy::Secret, tracing::debug};

use crate::{
    error::{ConfigError, Result},
    spec::{FieldSpec, FieldSpecs, FieldSubtype, UNIVERSAL_FIELD_SPECS},
    value::{ConfigValue, EndpointConfig},
};

/// Section names that collide with the yes/no literals used elsewhere in the
/// format.
pub const RESERVED_NAMES: [&str; 2] = ["yes", "no"];

const TYPE_KEY: &str = "type";
const FILTER_ARROW: &str = "->";

/// Source of known connector types and their extra field specs.
///
/// Implemented by the relay's connector-type registry; the parser only needs
/// the names and per-type spec tables, not the constructors.
pub trait ConnectorCatalog {
    /// The extra field specs of a connector type, or `None` for an unknown
    /// name.
    fn field_specs(&self, kind: &str) -> Option<FieldSpecs>;
}

/// Validate and normalize one configuration section.
pub fn parse_section(
    raw: &HashMap<String, String>,
    name: &str,
    catalog: &dyn ConnectorCatalog,
) -> Result<EndpointConfig> {
    if RESERVED_NAMES.contains(&name) {
        return Err(ConfigError::reserved_name(name));
    }

    let mut section = SectionRecord::default();
    apply_specs(&mut section, raw, name, UNIVERSAL_FIELD_SPECS, Some(catalog))?;

    // `type` is required in the universal pass, so the kind is set here.
    let kind = section.kind.clone().unwrap_or_default();
    if let Some(specs) = catalog.field_specs(&kind) {
        apply_specs(&mut section, raw, name, specs, None)?;
    }

    debug!(section = name, %kind, "parsed configuration section");
    Ok(section.into_config(name, kind))
}

/// Working state for one section while the field-spec tables are applied.
#[derive(Default)]
struct SectionRecord {
    kind: Option<String>,
    flags: HashMap<&'static str, bool>,
    values: Vec<(String, ConfigValue)>,
    receive_filter: HashMap<String, String>,
    broadcast_filter: HashMap<String, String>,
}

impl SectionRecord {
    fn into_config(mut self, name: &str, kind: String) -> EndpointConfig {
        let mut config = EndpointConfig::new(name, kind);
        config.active = self.flags.remove("active").unwrap_or(true);
        config.receiver = self.flags.remove("receiver").unwrap_or(true);
        config.broadcaster = self.flags.remove("broadcaster").unwrap_or(false);
        config.hide_channels = self.flags.remove("hide_channels").unwrap_or(false);
        config.receive_filter = self.receive_filter;
        config.broadcast_filter = self.broadcast_filter;
        for (key, value) in self.values {
            config.insert_value(key, value);
        }
        config
    }
}

fn apply_specs(
    section: &mut SectionRecord,
    raw: &HashMap<String, String>,
    name: &str,
    specs: FieldSpecs,
    catalog: Option<&dyn ConnectorCatalog>,
) -> Result<()> {
    for (key, spec) in specs {
        let Some(raw_value) = raw.get(*key) else {
            if spec.required {
                return Err(ConfigError::missing_required(name, *key));
            }
            if let Some(default) = spec.default {
                store(section, name, key, spec, default)?;
            }
            continue;
        };

        if *key == TYPE_KEY {
            let catalog = catalog.expect("the type key only appears in the universal pass");
            let kind = raw_value.trim();
            if catalog.field_specs(kind).is_none() {
                return Err(ConfigError::unknown_type(name, kind));
            }
            section.kind = Some(kind.to_string());
            continue;
        }

        store(section, name, key, spec, raw_value)?;
    }
    Ok(())
}

/// Apply the multi-value split and the subtype transform, then record the
/// value.
fn store(
    section: &mut SectionRecord,
    name: &str,
    key: &'static str,
    spec: &FieldSpec,
    raw_value: &str,
) -> Result<()> {
    let lines = if spec.multi_value {
        Some(split_lines(raw_value))
    } else {
        None
    };

    let value = match spec.subtype {
        FieldSubtype::YesNo => match raw_value.trim() {
            "yes" => ConfigValue::Flag(true),
            "no" => ConfigValue::Flag(false),
            _ => return Err(ConfigError::invalid_boolean(name, key)),
        },
        FieldSubtype::LoginInfo => ConfigValue::Secret(Secret::new(raw_value.trim().to_string())),
        FieldSubtype::Basic => match lines {
            Some(lines) => ConfigValue::List(lines),
            None => ConfigValue::Text(raw_value.trim().to_string()),
        },
        FieldSubtype::ReceiveFilter | FieldSubtype::BroadcastFilter => {
            let lines = lines.unwrap_or_else(|| split_lines(raw_value));
            ConfigValue::List(collect_filter_lines(section, spec.subtype, lines))
        },
    };

    match section.flags_key(key) {
        Some(flag_key) => {
            if let ConfigValue::Flag(flag) = value {
                section.flags.insert(flag_key, flag);
            }
        },
        None => section.values.push((key.to_string(), value)),
    }
    Ok(())
}

impl SectionRecord {
    /// Universal yes/no keys land on the typed record, not in the value map.
    fn flags_key(&self, key: &str) -> Option<&'static str> {
        ["active", "receiver", "broadcaster", "hide_channels"]
            .into_iter()
            .find(|k| *k == key)
    }
}

/// Split a multi-value field: one entry per line, trimmed, blanks dropped,
/// order preserved.
fn split_lines(raw: &str) -> Vec<String> {
    raw.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}

/// Keep the channel side of each `->` line in the channel list and record
/// the filter entry it derives.
///
/// Receive side: `channel -> endpoint` restricts that channel's messages to
/// the named endpoint. Broadcast side: `channel -> endpoint` admits only the
/// named endpoint into that channel, so the map is keyed by the endpoint.
fn collect_filter_lines(
    section: &mut SectionRecord,
    subtype: FieldSubtype,
    lines: Vec<String>,
) -> Vec<String> {
    let mut channels = Vec::with_capacity(lines.len());
    for line in lines {
        match line.split_once(FILTER_ARROW) {
            Some((left, right)) => {
                let channel = left.trim().to_string();
                let endpoint = right.trim().to_string();
                match subtype {
                    FieldSubtype::ReceiveFilter => {
                        section.receive_filter.insert(channel.clone(), endpoint);
                    },
                    _ => {
                        section.broadcast_filter.insert(endpoint, channel.clone());
                    },
                }
                channels.push(channel);
            },
            None => channels.push(line),
        }
    }
    channels
}
