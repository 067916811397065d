use std::sync::Arc;

use {
    anyhow::{Context, Result},
    tracing::{info, warn},
};

use crate::{
    endpoint::Endpoint,
    error::Error,
    registry::Registry,
    router::{Router, RouterHandle},
};

/// Process-wide relay context: owns the registry and the router.
///
/// Explicit and injectable rather than ambient global state, so tests get a
/// disposable relay per case.
pub struct Relay {
    registry: Arc<Registry>,
    router: RouterHandle,
}

impl Relay {
    #[must_use]
    pub fn new() -> Self {
        let registry = Arc::new(Registry::new());
        let router = Arc::new(Router::new(Arc::clone(&registry)));
        Self { registry, router }
    }

    #[must_use]
    pub fn registry(&self) -> &Arc<Registry> {
        &self.registry
    }

    #[must_use]
    pub fn router(&self) -> RouterHandle {
        Arc::clone(&self.router)
    }

    /// Register an endpoint and, when active, start it.
    ///
    /// A failed start deregisters the endpoint again: it never counts as
    /// started and never stays eligible for dispatch. Inactive endpoints are
    /// registered without being started.
    pub async fn spawn(&self, endpoint: Arc<dyn Endpoint>) -> Result<()> {
        let name = endpoint.name().to_string();
        self.registry.insert(Arc::clone(&endpoint))?;

        if !endpoint.is_active() {
            info!(endpoint = %name, "registered inactive endpoint");
            return Ok(());
        }

        info!(
            endpoint = %name,
            kind = %endpoint.config().kind,
            "starting endpoint"
        );
        if let Err(error) = endpoint.start().await {
            self.registry.remove(&name);
            return Err(error).with_context(|| format!("failed to start endpoint '{name}'"));
        }
        Ok(())
    }

    /// Stop an endpoint and remove it from the registry, exactly once.
    pub async fn stop(&self, name: &str) -> Result<()> {
        let endpoint = self
            .registry
            .get(name)
            .ok_or_else(|| Error::UnknownEndpoint(name.to_string()))?;
        info!(endpoint = name, "stopping endpoint");
        let result = endpoint.stop().await;
        self.registry.remove(name);
        result
    }

    /// Stop every endpoint, newest first. Endpoints that were registered
    /// inactive are removed without a stop call.
    pub async fn shutdown(&self) {
        for endpoint in self.registry.snapshot().into_iter().rev() {
            if !endpoint.is_active() {
                self.registry.remove(endpoint.name());
                continue;
            }
            if let Err(error) = self.stop(endpoint.name()).await {
                warn!(endpoint = endpoint.name(), %error, "endpoint shutdown failed");
            }
        }
    }
}

impl Default for Relay {
    fn default() -> Self {
        Self::new()
    }
}
