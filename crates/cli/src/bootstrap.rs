//! Turn a loaded configuration into a running relay.
//!
//! Section-granular fault handling: a section that fails to parse, build, or
//! start is reported with one warning line and skipped; the remaining
//! sections proceed.

use tracing::warn;

use {
    palaver_config::{EndpointConfig, Section, parse_section},
    palaver_console::ConsoleEndpoint,
    palaver_relay::{ConnectorTypes, Relay},
};

/// The connector types linked into this build.
///
/// Other connectors (Discord-like, Slack-like, XMPP-like) live in their own
/// crates and register themselves here when compiled in; a section naming an
/// absent type is skipped like any other config fault.
#[must_use]
pub fn connector_types() -> ConnectorTypes {
    let mut types = ConnectorTypes::new();
    types.register(ConsoleEndpoint::connector_type());
    types
}

/// Validate every section, skipping the faulty ones with a diagnostic.
#[must_use]
pub fn parse_all(sections: &[Section], types: &ConnectorTypes) -> Vec<EndpointConfig> {
    sections
        .iter()
        .filter_map(|section| match parse_section(&section.entries, &section.name, types) {
            Ok(config) => Some(config),
            Err(error) => {
                warn!(section = %section.name, %error, "skipping section");
                None
            },
        })
        .collect()
}

/// Build and spawn an endpoint per valid section; returns how many made it
/// into the registry.
pub async fn start_endpoints(
    relay: &Relay,
    types: &ConnectorTypes,
    sections: &[Section],
) -> usize {
    let mut started = 0;
    for config in parse_all(sections, types) {
        let name = config.name.clone();
        let endpoint = match types.build(config, relay.router()) {
            Ok(endpoint) => endpoint,
            Err(error) => {
                warn!(section = %name, %error, "skipping endpoint");
                continue;
            },
        };
        match relay.spawn(endpoint).await {
            Ok(()) => started += 1,
            Err(error) => warn!(section = %name, %error, "endpoint failed to start"),
        }
    }
    started
}

#[cfg(test)]
mod tests {
    use {super::*, palaver_config::loader};

    const CONFIG: &str = "\
[term]
type = Console
broadcaster = yes

[bad bool]
type = Console
active = maybe

[unlinked]
type = Discord
token = abc

[yes]
type = Console
";

    #[test]
    fn faulty_sections_are_skipped_not_fatal() {
        let sections = loader::parse_str(CONFIG).unwrap();
        let configs = parse_all(&sections, &connector_types());
        assert_eq!(configs.len(), 1);
        assert_eq!(configs[0].name, "term");
        assert!(configs[0].broadcaster);
    }

    #[tokio::test]
    async fn start_endpoints_spawns_only_the_valid_sections() {
        let sections = loader::parse_str(CONFIG).unwrap();
        let relay = Relay::new();
        let started = start_endpoints(&relay, &connector_types(), &sections).await;
        assert_eq!(started, 1);
        assert_eq!(relay.registry().names(), vec!["term"]);
    }

    #[tokio::test]
    async fn duplicate_sections_do_not_start_twice() {
        let sections =
            loader::parse_str("[term]\ntype = Console\n\n[term]\ntype = Console\n").unwrap();
        let relay = Relay::new();
        let started = start_endpoints(&relay, &connector_types(), &sections).await;
        assert_eq!(started, 1);
        assert_eq!(relay.registry().len(), 1);
    }

    #[tokio::test]
    async fn config_file_on_disk_boots_the_relay() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.ini");
        std::fs::write(&path, CONFIG).unwrap();

        let sections = loader::load(&path).unwrap();
        let relay = Relay::new();
        let started = start_endpoints(&relay, &connector_types(), &sections).await;
        assert_eq!(started, 1);
    }

    #[test]
    fn check_output_names_the_valid_endpoints() {
        let sections = loader::parse_str("[term]\ntype = Console\n").unwrap();
        let configs = parse_all(&sections, &connector_types());
        let json = serde_json::to_string(&configs).unwrap();
        assert!(json.contains("\"name\":\"term\""));
    }
}
