use {anyhow::Result, async_trait::async_trait};

use palaver_config::EndpointConfig;

use crate::message::RelayedMessage;

/// The capability contract every connector implements to join the relay.
///
/// Lifecycle: the relay calls [`start`](Endpoint::start) only for active
/// endpoints and [`stop`](Endpoint::stop) at most once per started instance.
/// Outbound: the router calls [`send_relayed`](Endpoint::send_relayed) only
/// for broadcasters. Inbound traffic flows the other way — connectors hold a
/// [`RouterHandle`](crate::RouterHandle) and call
/// [`Router::receive`](crate::Router::receive) for every native event they
/// decide is relay-eligible, passing the protocol-native channel/user id
/// unmodified.
#[async_trait]
pub trait Endpoint: Send + Sync {
    /// The validated configuration section this endpoint was built from.
    fn config(&self) -> &EndpointConfig;

    /// Establish the connector session.
    ///
    /// Long-running work (polling loops, socket readers) is spawned
    /// internally; this returns once the session is launched. A successful
    /// login is logged as ready exactly once.
    async fn start(&self) -> Result<()>;

    /// Tear down the connector session.
    ///
    /// In-flight sends for this endpoint may be abandoned; they must not
    /// crash or corrupt shared state.
    async fn stop(&self) -> Result<()>;

    /// Deliver already-formatted text into the native protocol.
    ///
    /// `source` is the originating endpoint name. Connectors with several
    /// native destination channels evaluate
    /// [`EndpointConfig::allows_broadcast_from`] against it per channel.
    async fn send(&self, text: &str, source: Option<&str>) -> Result<()>;

    /// Deliver one relayed message.
    ///
    /// The default renders the flat-text template and hands it to
    /// [`send`](Endpoint::send); connectors override this to use richer
    /// native formatting (markdown, embeds) without changing the router.
    async fn send_relayed(&self, msg: &RelayedMessage) -> Result<()> {
        self.send(&msg.render(), Some(&msg.source_name)).await
    }

    fn name(&self) -> &str {
        &self.config().name
    }

    fn is_active(&self) -> bool {
        self.config().active
    }

    /// Whether native traffic from this endpoint enters the relay.
    fn is_receiver(&self) -> bool {
        self.config().receiver
    }

    /// Whether relayed traffic is delivered to this endpoint.
    fn is_broadcaster(&self) -> bool {
        self.config().broadcaster
    }
}

impl std::fmt::Debug for dyn Endpoint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Endpoint").field("name", &self.name()).finish_non_exhaustive()
    }
}
