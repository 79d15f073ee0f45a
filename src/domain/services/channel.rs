#[cfg(test)]
#[path = "channel_test.rs"]
mod tests;

use anyhow::Result;
use tokio::sync::mpsc;

use super::CookieJar;
use crate::domain::models::Action;
use crate::domain::models::ChannelBox;
use crate::domain::models::Event;

/// Owns the connection to the assistant service. Actions from the UI are
/// written to the channel, payloads from the channel are forwarded as
/// events.
pub struct ChannelService {}

impl ChannelService {
    async fn open(
        channel: &mut ChannelBox,
        cookies: &CookieJar,
        tx: &mpsc::UnboundedSender<Event>,
    ) -> Result<()> {
        let cookie = match cookies.load().await {
            Ok(cookie) => cookie,
            Err(err) => {
                tracing::warn!(error = ?err, "Failed to read session cookie");
                None
            }
        };

        match channel.open(cookie).await {
            Ok(set_cookie) => {
                if let Some(value) = set_cookie {
                    if let Err(err) = cookies.save(&value).await {
                        tracing::warn!(error = ?err, "Failed to store session cookie");
                    }
                }

                tracing::info!("Channel opened");
                tx.send(Event::ChannelOpened())?;
            }
            Err(err) => {
                tracing::error!(error = ?err, "Failed to open channel");
                tx.send(Event::ChannelError(err.to_string()))?;
                tx.send(Event::ChannelClosed())?;
            }
        }

        return Ok(());
    }

    async fn handle_action(
        channel: &mut ChannelBox,
        cookies: &CookieJar,
        tx: &mpsc::UnboundedSender<Event>,
        action: Action,
    ) -> Result<()> {
        match action {
            Action::ChannelSend(msg) => {
                if !channel.is_open() {
                    tracing::warn!(outbound = ?msg, "Channel is closed, dropping message");
                    return Ok(());
                }

                let payload = msg.to_json()?;
                tracing::debug!(payload = payload.as_str(), "Sending message");
                if let Err(err) = channel.send(payload).await {
                    tracing::error!(error = ?err, "Failed to send message");
                    tx.send(Event::ChannelError(err.to_string()))?;
                    if !channel.is_open() {
                        tx.send(Event::ChannelClosed())?;
                    }
                }
            }
            Action::ChannelClose() => {
                if !channel.is_open() {
                    return Ok(());
                }

                if let Err(err) = channel.close().await {
                    tracing::warn!(error = ?err, "Failed to close channel cleanly");
                }
                tx.send(Event::ChannelClosed())?;
            }
            Action::ChannelOpen() => {
                if channel.is_open() {
                    return Ok(());
                }

                ChannelService::open(channel, cookies, tx).await?;
            }
        }

        return Ok(());
    }

    pub async fn start(
        mut channel: ChannelBox,
        cookies: CookieJar,
        tx: mpsc::UnboundedSender<Event>,
        rx: &mut mpsc::UnboundedReceiver<Action>,
    ) -> Result<()> {
        ChannelService::open(&mut channel, &cookies, &tx).await?;

        loop {
            let open = channel.is_open();

            tokio::select! {
                action = rx.recv() => {
                    match action {
                        Some(action) => {
                            ChannelService::handle_action(&mut channel, &cookies, &tx, action).await?;
                        }
                        None => {
                            if channel.is_open() {
                                channel.close().await?;
                            }
                            return Ok(());
                        }
                    }
                }
                payload = channel.recv(), if open => {
                    match payload {
                        Some(Ok(text)) => {
                            tx.send(Event::ChannelMessage(text))?;
                        }
                        Some(Err(err)) => {
                            tracing::error!(error = ?err, "Failed to read from channel");
                            tx.send(Event::ChannelError(err.to_string()))?;
                            if !channel.is_open() {
                                tx.send(Event::ChannelClosed())?;
                            }
                        }
                        None => {
                            tracing::info!("Channel closed by peer");
                            tx.send(Event::ChannelClosed())?;
                        }
                    }
                }
            }
        }
    }
}
