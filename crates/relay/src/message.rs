use std::sync::Arc;

use crate::endpoint::Endpoint;

/// A message event observed by a source connector, on its way into the
/// router. Transient: built on receipt, consumed by the fan-out, discarded.
#[derive(Clone)]
pub struct MessageEvent {
    pub text: String,
    pub source: Arc<dyn Endpoint>,
    /// Protocol-native channel/user identifier, passed through unmodified.
    pub source_channel: String,
    /// Display name of the author.
    pub source_nick: String,
    /// Human-friendly channel label; `None` falls back to `source_channel`.
    pub readable_channel: Option<String>,
}

impl MessageEvent {
    /// The channel destination filters match on: the readable label when the
    /// connector provided one, the native identifier otherwise.
    #[must_use]
    pub fn channel(&self) -> &str {
        self.readable_channel
            .as_deref()
            .unwrap_or(&self.source_channel)
    }
}

impl std::fmt::Debug for MessageEvent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MessageEvent")
            .field("source", &self.source.name())
            .field("source_channel", &self.source_channel)
            .field("source_nick", &self.source_nick)
            .field("readable_channel", &self.readable_channel)
            .finish_non_exhaustive()
    }
}

/// One relayed message as presented to a destination connector.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RelayedMessage {
    pub text: String,
    pub source_name: String,
    pub display_channel: String,
    pub display_nick: String,
}

impl RelayedMessage {
    /// The default flat-text rendering, used unless a connector overrides
    /// [`Endpoint::send_relayed`] with richer native formatting.
    #[must_use]
    pub fn render(&self) -> String {
        format!(
            "[{} ({})] {}: {}",
            self.source_name, self.display_channel, self.display_nick, self.text
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_template() {
        let msg = RelayedMessage {
            text: "hello".into(),
            source_name: "relayA".into(),
            display_channel: "general".into(),
            display_nick: "ada".into(),
        };
        assert_eq!(msg.render(), "[relayA (general)] ada: hello");
    }
}
