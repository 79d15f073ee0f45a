use super::OutboundMessage;

/// Requests from the UI loop to the channel service.
pub enum Action {
    ChannelClose(),
    ChannelOpen(),
    ChannelSend(OutboundMessage),
}
