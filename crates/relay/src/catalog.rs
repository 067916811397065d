//! The static connector-type registry.
//!
//! Config sections select a connector implementation by name through the
//! `type` key. Resolution happens once, at parse time: the parser consults
//! this catalog through [`ConnectorCatalog`], so an unknown name is a
//! configuration fault for that section, never a runtime fault deep in
//! dispatch.

use std::{collections::HashMap, sync::Arc};

use anyhow::Result;

use palaver_config::{ConnectorCatalog, EndpointConfig, FieldSpecs};

use crate::{endpoint::Endpoint, router::RouterHandle};

/// Constructor signature for a connector type.
pub type BuildFn =
    dyn Fn(EndpointConfig, RouterHandle) -> Result<Arc<dyn Endpoint>> + Send + Sync;

/// One registered connector implementation.
pub struct ConnectorType {
    name: &'static str,
    field_specs: FieldSpecs,
    build: Box<BuildFn>,
}

impl ConnectorType {
    /// `field_specs` are the keys this connector accepts beyond the
    /// universal ones; `build` constructs the endpoint from an
    /// already-validated config record.
    #[must_use]
    pub fn new(
        name: &'static str,
        field_specs: FieldSpecs,
        build: impl Fn(EndpointConfig, RouterHandle) -> Result<Arc<dyn Endpoint>>
        + Send
        + Sync
        + 'static,
    ) -> Self {
        Self {
            name,
            field_specs,
            build: Box::new(build),
        }
    }

    #[must_use]
    pub fn name(&self) -> &'static str {
        self.name
    }
}

/// Name → connector type table, fixed at startup.
#[derive(Default)]
pub struct ConnectorTypes {
    types: HashMap<&'static str, ConnectorType>,
}

impl ConnectorTypes {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, connector: ConnectorType) {
        self.types.insert(connector.name, connector);
    }

    #[must_use]
    pub fn names(&self) -> Vec<&'static str> {
        let mut names: Vec<_> = self.types.keys().copied().collect();
        names.sort_unstable();
        names
    }

    /// Construct the endpoint for a validated config record.
    pub fn build(
        &self,
        config: EndpointConfig,
        router: RouterHandle,
    ) -> Result<Arc<dyn Endpoint>> {
        let connector = self
            .types
            .get(config.kind.as_str())
            .ok_or_else(|| crate::error::Error::UnknownConnectorType(config.kind.clone()))?;
        (connector.build)(config, router)
    }
}

impl ConnectorCatalog for ConnectorTypes {
    fn field_specs(&self, kind: &str) -> Option<FieldSpecs> {
        self.types.get(kind).map(|c| c.field_specs)
    }
}

#[cfg(test)]
mod tests {
    use {
        super::*,
        crate::{registry::Registry, router::Router, testing::RecordingEndpoint},
    };

    fn catalog() -> ConnectorTypes {
        let mut types = ConnectorTypes::new();
        types.register(ConnectorType::new("Recording", &[], |config, _router| {
            let name = config.name.clone();
            Ok(RecordingEndpoint::with_config(&name, move |cfg| *cfg = config)
                as Arc<dyn Endpoint>)
        }));
        types
    }

    fn router() -> RouterHandle {
        Arc::new(Router::new(Arc::new(Registry::new())))
    }

    #[test]
    fn registered_types_resolve_their_field_specs() {
        let types = catalog();
        assert!(types.field_specs("Recording").is_some());
        assert!(types.field_specs("Discord").is_none());
        assert_eq!(types.names(), vec!["Recording"]);
    }

    #[tokio::test]
    async fn build_dispatches_to_the_registered_constructor() {
        let types = catalog();
        let endpoint = types
            .build(EndpointConfig::new("a", "Recording"), router())
            .unwrap();
        assert_eq!(endpoint.name(), "a");
    }

    #[tokio::test]
    async fn build_rejects_unregistered_kinds() {
        let types = catalog();
        let err = types
            .build(EndpointConfig::new("a", "Discord"), router())
            .unwrap_err();
        assert!(err.to_string().contains("Discord"));
    }
}
