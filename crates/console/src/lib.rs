//! Console connector: prints relayed messages to stdout.
//!
//! The one connector with no third-party protocol behind it. It is send-only
//! — a terminal has no inbound events to relay — which also makes it the
//! reference implementation of the [`Endpoint`] contract and a convenient
//! sink when trying out a configuration.

use std::sync::{
    Arc,
    atomic::{AtomicBool, Ordering},
};

use {anyhow::Result, async_trait::async_trait, tracing::info};

use {
    palaver_config::EndpointConfig,
    palaver_relay::{ConnectorType, Endpoint},
};

/// Connector type name used in the `type` config key.
pub const CONNECTOR_NAME: &str = "Console";

pub struct ConsoleEndpoint {
    config: EndpointConfig,
    started: AtomicBool,
}

impl ConsoleEndpoint {
    #[must_use]
    pub fn new(config: EndpointConfig) -> Self {
        Self {
            config,
            started: AtomicBool::new(false),
        }
    }

    /// Catalog entry for this connector. No field specs beyond the
    /// universal ones.
    #[must_use]
    pub fn connector_type() -> ConnectorType {
        ConnectorType::new(CONNECTOR_NAME, &[], |config, _router| {
            Ok(Arc::new(Self::new(config)) as Arc<dyn Endpoint>)
        })
    }

    #[must_use]
    pub fn is_started(&self) -> bool {
        self.started.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Endpoint for ConsoleEndpoint {
    fn config(&self) -> &EndpointConfig {
        &self.config
    }

    /// The console never feeds the relay, whatever the section says.
    fn is_receiver(&self) -> bool {
        false
    }

    async fn start(&self) -> Result<()> {
        self.started.store(true, Ordering::SeqCst);
        info!(endpoint = self.name(), "console ready");
        Ok(())
    }

    async fn stop(&self) -> Result<()> {
        self.started.store(false, Ordering::SeqCst);
        Ok(())
    }

    async fn send(&self, text: &str, _source: Option<&str>) -> Result<()> {
        // Stdout is this connector's native protocol; diagnostics go to
        // tracing like everywhere else.
        if self.is_started() {
            println!("{text}");
        }
        Ok(())
    }
}
