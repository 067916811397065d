//! Core relay engine.
//!
//! The [`Endpoint`] trait is the capability contract every connector
//! implements to join the relay; the [`Registry`] is the live set of
//! constructed endpoints; the [`Router`] decides, for each inbound message,
//! which other endpoints receive it and under what channel label. The
//! [`Relay`] context ties the three together and owns endpoint lifecycle.

pub mod catalog;
pub mod endpoint;
pub mod error;
pub mod message;
pub mod registry;
pub mod relay;
pub mod router;

#[cfg(test)]
pub(crate) mod testing;

pub use {
    catalog::{ConnectorType, ConnectorTypes},
    endpoint::Endpoint,
    error::{Error, Result},
    message::{MessageEvent, RelayedMessage},
    registry::Registry,
    relay::Relay,
    router::{HIDDEN_CHANNEL_LABEL, Router, RouterHandle},
};
