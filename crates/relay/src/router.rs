use std::sync::Arc;

use tracing::{debug, trace, warn};

use crate::{
    endpoint::Endpoint,
    message::{MessageEvent, RelayedMessage},
    registry::Registry,
};

/// Label shown in place of the source channel when the source endpoint is
/// configured with `hide_channels`.
pub const HIDDEN_CHANNEL_LABEL: &str = "hidden";

/// Shared handle connectors use to feed inbound events into the router.
pub type RouterHandle = Arc<Router>;

/// The broadcast decision engine.
///
/// A pure, synchronous function over in-memory configuration: it performs no
/// I/O of its own and never suspends. Each eligible delivery is dispatched
/// as its own task, fired without waiting for completion; one destination's
/// failure never blocks or fails the others and never propagates back to the
/// source connector.
pub struct Router {
    registry: Arc<Registry>,
}

impl Router {
    #[must_use]
    pub fn new(registry: Arc<Registry>) -> Self {
        Self { registry }
    }

    #[must_use]
    pub fn registry(&self) -> &Arc<Registry> {
        &self.registry
    }

    /// Entry point for connectors: called for every relay-eligible native
    /// event, with the protocol-native channel/user id as `source_channel`.
    ///
    /// Events from endpoints not configured as receivers are discarded here,
    /// whatever the connector chose to forward.
    pub fn receive(
        &self,
        source: &Arc<dyn Endpoint>,
        text: &str,
        source_channel: &str,
        source_nick: &str,
        readable_channel: Option<&str>,
    ) {
        if !source.is_receiver() {
            trace!(
                endpoint = source.name(),
                "discarding event from non-receiver"
            );
            return;
        }
        self.fan_out(&MessageEvent {
            text: text.trim().to_string(),
            source: Arc::clone(source),
            source_channel: source_channel.to_string(),
            source_nick: source_nick.to_string(),
            readable_channel: readable_channel.map(str::to_string),
        });
    }

    /// Deliver one event to every eligible destination.
    ///
    /// Self-delivery is not special-cased: connectors suppress true
    /// self-echo at the protocol layer before calling
    /// [`receive`](Router::receive).
    fn fan_out(&self, evt: &MessageEvent) {
        let source_cfg = evt.source.config();
        // Destination filters match on the real channel; hiding only
        // replaces the displayed label.
        let channel = evt.channel();
        let display_channel = if source_cfg.hide_channels {
            HIDDEN_CHANNEL_LABEL
        } else {
            channel
        };

        let restricted_to = source_cfg.receive_filter.get(&evt.source_channel);

        for dest in self.registry.snapshot() {
            if !dest.is_broadcaster() {
                continue;
            }
            if let Some(target) = restricted_to
                && dest.name() != target
            {
                continue;
            }
            if !dest.config().allows_broadcast_from(&source_cfg.name, channel) {
                continue;
            }

            let msg = RelayedMessage {
                text: evt.text.clone(),
                source_name: source_cfg.name.clone(),
                display_channel: display_channel.to_string(),
                display_nick: evt.source_nick.clone(),
            };
            debug!(
                from = %msg.source_name,
                to = dest.name(),
                channel = %msg.display_channel,
                "relaying message"
            );
            tokio::spawn(async move {
                if let Err(error) = dest.send_relayed(&msg).await {
                    warn!(endpoint = dest.name(), %error, "relay delivery failed");
                }
            });
        }
    }
}
