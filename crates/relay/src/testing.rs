//! Test doubles shared across the crate's unit tests.

use std::sync::{
    Arc, Mutex,
    atomic::{AtomicBool, AtomicUsize, Ordering},
};

use {anyhow::Result, async_trait::async_trait};

use palaver_config::EndpointConfig;

use crate::endpoint::Endpoint;

/// An endpoint that records every delivery instead of talking to a network.
pub struct RecordingEndpoint {
    config: EndpointConfig,
    sent: Mutex<Vec<String>>,
    started: AtomicBool,
    stop_calls: AtomicUsize,
    fail_start: AtomicBool,
    fail_send: AtomicBool,
}

impl RecordingEndpoint {
    #[must_use]
    pub fn new(name: &str) -> Arc<Self> {
        Self::with_config(name, |_| {})
    }

    /// A receiver that is also a broadcaster, the common relay peer shape.
    #[must_use]
    pub fn broadcaster(name: &str) -> Arc<Self> {
        Self::with_config(name, |cfg| {
            cfg.broadcaster = true;
        })
    }

    #[must_use]
    pub fn with_config(name: &str, tweak: impl FnOnce(&mut EndpointConfig)) -> Arc<Self> {
        let mut config = EndpointConfig::new(name, "Recording");
        tweak(&mut config);
        Arc::new(Self {
            config,
            sent: Mutex::new(Vec::new()),
            started: AtomicBool::new(false),
            stop_calls: AtomicUsize::new(0),
            fail_start: AtomicBool::new(false),
            fail_send: AtomicBool::new(false),
        })
    }

    #[must_use]
    pub fn arc(name: &str) -> Arc<dyn Endpoint> {
        Self::new(name) as Arc<dyn Endpoint>
    }

    pub fn fail_next_start(&self) {
        self.fail_start.store(true, Ordering::SeqCst);
    }

    pub fn fail_sends(&self) {
        self.fail_send.store(true, Ordering::SeqCst);
    }

    #[must_use]
    pub fn sent(&self) -> Vec<String> {
        self.sent.lock().unwrap().clone()
    }

    #[must_use]
    pub fn is_started(&self) -> bool {
        self.started.load(Ordering::SeqCst)
    }

    #[must_use]
    pub fn stop_calls(&self) -> usize {
        self.stop_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Endpoint for RecordingEndpoint {
    fn config(&self) -> &EndpointConfig {
        &self.config
    }

    async fn start(&self) -> Result<()> {
        if self.fail_start.load(Ordering::SeqCst) {
            anyhow::bail!("simulated login failure");
        }
        self.started.store(true, Ordering::SeqCst);
        Ok(())
    }

    async fn stop(&self) -> Result<()> {
        self.stop_calls.fetch_add(1, Ordering::SeqCst);
        self.started.store(false, Ordering::SeqCst);
        Ok(())
    }

    async fn send(&self, text: &str, _source: Option<&str>) -> Result<()> {
        if self.fail_send.load(Ordering::SeqCst) {
            anyhow::bail!("simulated delivery failure");
        }
        self.sent.lock().unwrap().push(text.to_string());
        Ok(())
    }
}

/// Let spawned dispatch tasks run to completion.
pub async fn settle() {
    for _ in 0..8 {
        tokio::task::yield_now().await;
    }
}
