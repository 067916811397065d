use std::sync::{Arc, Mutex};

use crate::{
    endpoint::Endpoint,
    error::{Error, Result},
};

/// Live set of constructed endpoints, in startup order.
///
/// The one mutable structure shared across endpoints: appended on
/// construction, removed on stop. Dispatch iterates a [`snapshot`]
/// (clone of the `Arc` list) so the lock is never held across a send.
///
/// [`snapshot`]: Registry::snapshot
#[derive(Default)]
pub struct Registry {
    endpoints: Mutex<Vec<Arc<dyn Endpoint>>>,
}

impl Registry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a freshly constructed endpoint.
    ///
    /// Names are unique across the registry; a collision leaves the registry
    /// unchanged.
    pub fn insert(&self, endpoint: Arc<dyn Endpoint>) -> Result<()> {
        let mut endpoints = self.endpoints.lock().unwrap();
        if endpoints.iter().any(|e| e.name() == endpoint.name()) {
            return Err(Error::DuplicateName(endpoint.name().to_string()));
        }
        endpoints.push(endpoint);
        Ok(())
    }

    /// Remove an endpoint by name; reports whether it was present.
    pub fn remove(&self, name: &str) -> bool {
        let mut endpoints = self.endpoints.lock().unwrap();
        let before = endpoints.len();
        endpoints.retain(|e| e.name() != name);
        endpoints.len() != before
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<Arc<dyn Endpoint>> {
        self.endpoints
            .lock()
            .unwrap()
            .iter()
            .find(|e| e.name() == name)
            .map(Arc::clone)
    }

    /// Clone the current endpoint list out, oldest first.
    #[must_use]
    pub fn snapshot(&self) -> Vec<Arc<dyn Endpoint>> {
        self.endpoints.lock().unwrap().clone()
    }

    #[must_use]
    pub fn names(&self) -> Vec<String> {
        self.endpoints
            .lock()
            .unwrap()
            .iter()
            .map(|e| e.name().to_string())
            .collect()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.endpoints.lock().unwrap().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
