use std::collections::HashMap;

use {
    secrecy::{ExposeSecret, Secret},
    serde::{Serialize, ser::SerializeSeq},
};

/// One parsed configuration value.
#[derive(Clone)]
pub enum ConfigValue {
    Text(String),
    Flag(bool),
    List(Vec<String>),
    /// Credential material; never printed or serialized in clear.
    Secret(Secret<String>),
}

impl std::fmt::Debug for ConfigValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Text(s) => f.debug_tuple("Text").field(s).finish(),
            Self::Flag(b) => f.debug_tuple("Flag").field(b).finish(),
            Self::List(v) => f.debug_tuple("List").field(v).finish(),
            Self::Secret(_) => f.write_str("Secret([REDACTED])"),
        }
    }
}

impl PartialEq for ConfigValue {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Text(a), Self::Text(b)) => a == b,
            (Self::Flag(a), Self::Flag(b)) => a == b,
            (Self::List(a), Self::List(b)) => a == b,
            (Self::Secret(a), Self::Secret(b)) => a.expose_secret() == b.expose_secret(),
            _ => false,
        }
    }
}

impl Serialize for ConfigValue {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Text(s) => serializer.serialize_str(s),
            Self::Flag(b) => serializer.serialize_bool(*b),
            Self::List(v) => {
                let mut seq = serializer.serialize_seq(Some(v.len()))?;
                for item in v {
                    seq.serialize_element(item)?;
                }
                seq.end()
            },
            Self::Secret(_) => serializer.serialize_str("[REDACTED]"),
        }
    }
}

/// The validated, normalized record for one configuration section.
///
/// Created once at startup and owned exclusively by its endpoint; immutable
/// thereafter.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EndpointConfig {
    /// Section identifier; unique across the registry.
    pub name: String,
    /// Resolved connector type name.
    pub kind: String,
    pub active: bool,
    /// Whether native traffic from this endpoint enters the relay.
    pub receiver: bool,
    /// Whether relayed traffic is delivered to this endpoint.
    pub broadcaster: bool,
    /// Show the literal label `hidden` instead of the source channel.
    pub hide_channels: bool,
    /// Source channel → the sole endpoint its messages may reach.
    pub receive_filter: HashMap<String, String>,
    /// Source endpoint name → the one channel it may post to here.
    pub broadcast_filter: HashMap<String, String>,
    /// Connector-specific values, keyed by config key.
    values: HashMap<String, ConfigValue>,
}

impl EndpointConfig {
    /// A record with the universal defaults (active receiver, not a
    /// broadcaster, channels visible) and no connector-specific values.
    #[must_use]
    pub fn new(name: impl Into<String>, kind: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: kind.into(),
            active: true,
            receiver: true,
            broadcaster: false,
            hide_channels: false,
            receive_filter: HashMap::new(),
            broadcast_filter: HashMap::new(),
            values: HashMap::new(),
        }
    }

    pub(crate) fn insert_value(&mut self, key: impl Into<String>, value: ConfigValue) {
        self.values.insert(key.into(), value);
    }

    #[must_use]
    pub fn text(&self, key: &str) -> Option<&str> {
        match self.values.get(key) {
            Some(ConfigValue::Text(s)) => Some(s),
            _ => None,
        }
    }

    #[must_use]
    pub fn list(&self, key: &str) -> Option<&[String]> {
        match self.values.get(key) {
            Some(ConfigValue::List(v)) => Some(v),
            _ => None,
        }
    }

    #[must_use]
    pub fn flag(&self, key: &str) -> Option<bool> {
        match self.values.get(key) {
            Some(ConfigValue::Flag(b)) => Some(*b),
            _ => None,
        }
    }

    #[must_use]
    pub fn secret(&self, key: &str) -> Option<&Secret<String>> {
        match self.values.get(key) {
            Some(ConfigValue::Secret(s)) => Some(s),
            _ => None,
        }
    }

    /// Destination-side gate: may `source` post to `target_channel` here?
    ///
    /// A non-empty broadcast filter is an allowlist: sources without an entry
    /// are rejected outright, sources with one only reach their mapped
    /// channel. An empty filter imposes no restriction.
    #[must_use]
    pub fn allows_broadcast_from(&self, source: &str, target_channel: &str) -> bool {
        if self.broadcast_filter.is_empty() {
            return true;
        }
        self.broadcast_filter
            .get(source)
            .is_some_and(|channel| channel == target_channel)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn secret_values_are_redacted_in_debug() {
        let value = ConfigValue::Secret(Secret::new("hunter2".into()));
        let rendered = format!("{value:?}");
        assert!(!rendered.contains("hunter2"));
        assert!(rendered.contains("REDACTED"));
    }

    #[test]
    fn secret_values_are_redacted_in_json() {
        let mut config = EndpointConfig::new("work", "Console");
        config.insert_value("token", ConfigValue::Secret(Secret::new("hunter2".into())));
        let json = serde_json::to_string(&config).unwrap();
        assert!(!json.contains("hunter2"));
        assert!(json.contains("[REDACTED]"));
    }

    #[test]
    fn empty_broadcast_filter_allows_everything() {
        let config = EndpointConfig::new("dest", "Console");
        assert!(config.allows_broadcast_from("anyone", "anywhere"));
    }

    #[test]
    fn broadcast_filter_is_an_allowlist() {
        let mut config = EndpointConfig::new("dest", "Console");
        config
            .broadcast_filter
            .insert("relayA".into(), "general".into());
        assert!(config.allows_broadcast_from("relayA", "general"));
        assert!(!config.allows_broadcast_from("relayA", "random"));
        // Unlisted sources are rejected once the filter is non-empty.
        assert!(!config.allows_broadcast_from("relayB", "general"));
    }

    #[test]
    fn typed_accessors_reject_mismatched_variants() {
        let mut config = EndpointConfig::new("x", "Console");
        config.insert_value("rooms", ConfigValue::List(vec!["a".into()]));
        assert!(config.text("rooms").is_none());
        assert_eq!(config.list("rooms"), Some(&["a".to_string()][..]));
        assert!(config.flag("rooms").is_none());
    }
}
