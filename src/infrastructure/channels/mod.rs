mod websocket;

use std::time::Duration;

use anyhow::bail;
use anyhow::Result;

pub use websocket::*;

use crate::configuration::Config;
use crate::configuration::ConfigKey;
use crate::domain::models::ChannelBox;

pub struct ChannelManager {}

impl ChannelManager {
    pub fn get() -> Result<ChannelBox> {
        let url = Config::get(ConfigKey::ServerURL);
        if !url.starts_with("ws://") && !url.starts_with("wss://") {
            bail!(format!(
                "Server URL must use the ws:// or wss:// scheme, got '{url}'"
            ));
        }

        let heartbeat = Config::get(ConfigKey::HeartbeatInterval).parse::<u64>()?;

        return Ok(Box::new(WebSocketChannel::new(
            &url,
            &Config::get(ConfigKey::CookieName),
            Duration::from_millis(heartbeat),
        )));
    }
}
