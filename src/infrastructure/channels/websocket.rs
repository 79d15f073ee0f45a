#[cfg(test)]
#[path = "websocket_test.rs"]
mod tests;

use std::time::Duration;

use anyhow::bail;
use anyhow::Result;
use async_trait::async_trait;
use futures::SinkExt;
use futures::StreamExt;
use tokio::net::TcpStream;
use tokio::time;
use tokio_tungstenite::connect_async;
use tokio_tungstenite::tungstenite::client::IntoClientRequest;
use tokio_tungstenite::tungstenite::http::header::COOKIE;
use tokio_tungstenite::tungstenite::http::header::SET_COOKIE;
use tokio_tungstenite::tungstenite::http::HeaderMap;
use tokio_tungstenite::tungstenite::http::HeaderValue;
use tokio_tungstenite::tungstenite::Message;
use tokio_tungstenite::MaybeTlsStream;
use tokio_tungstenite::WebSocketStream;

use crate::domain::models::Channel;

type Stream = WebSocketStream<MaybeTlsStream<TcpStream>>;

/// Pulls `name=value` out of a `Set-Cookie` header when the name matches.
pub fn parse_set_cookie(header: &str, cookie_name: &str) -> Option<String> {
    let pair = header.split(';').next()?.trim();
    let (name, value) = pair.split_once('=')?;
    if name.trim() != cookie_name || value.trim().is_empty() {
        return None;
    }

    return Some(format!("{}={}", name.trim(), value.trim()));
}

fn session_cookie(headers: &HeaderMap, cookie_name: &str) -> Option<String> {
    return headers
        .get_all(SET_COOKIE)
        .iter()
        .filter_map(|value| return value.to_str().ok())
        .find_map(|value| return parse_set_cookie(value, cookie_name));
}

pub struct WebSocketChannel {
    cookie_name: String,
    heartbeat: Option<time::Interval>,
    heartbeat_period: Duration,
    stream: Option<Stream>,
    url: String,
}

impl WebSocketChannel {
    /// A zero `heartbeat_period` disables pings.
    pub fn new(url: &str, cookie_name: &str, heartbeat_period: Duration) -> WebSocketChannel {
        return WebSocketChannel {
            cookie_name: cookie_name.to_string(),
            heartbeat: None,
            heartbeat_period,
            stream: None,
            url: url.to_string(),
        };
    }

    fn drop_stream(&mut self) {
        self.stream = None;
        self.heartbeat = None;
    }
}

#[async_trait]
impl Channel for WebSocketChannel {
    fn is_open(&self) -> bool {
        return self.stream.is_some();
    }

    async fn open(&mut self, cookie: Option<String>) -> Result<Option<String>> {
        let mut request = self.url.as_str().into_client_request()?;
        if let Some(value) = cookie {
            request
                .headers_mut()
                .insert(COOKIE, HeaderValue::from_str(&value)?);
        }

        tracing::debug!(url = self.url.as_str(), "Connecting to assistant service");
        let (stream, response) = connect_async(request).await?;

        self.stream = Some(stream);
        if !self.heartbeat_period.is_zero() {
            let start = time::Instant::now() + self.heartbeat_period;
            self.heartbeat = Some(time::interval_at(start, self.heartbeat_period));
        }

        return Ok(session_cookie(response.headers(), &self.cookie_name));
    }

    async fn send(&mut self, payload: String) -> Result<()> {
        let stream = match self.stream.as_mut() {
            Some(stream) => stream,
            None => bail!("WebSocket is not connected"),
        };

        if let Err(err) = stream.send(Message::Text(payload)).await {
            self.drop_stream();
            return Err(err.into());
        }

        return Ok(());
    }

    async fn recv(&mut self) -> Option<Result<String>> {
        loop {
            let stream = self.stream.as_mut()?;

            let frame = match self.heartbeat.as_mut() {
                Some(heartbeat) => {
                    tokio::select! {
                        frame = stream.next() => frame,
                        _ = heartbeat.tick() => {
                            tracing::trace!("Sending heartbeat");
                            if let Err(err) = stream.send(Message::Ping(vec![])).await {
                                self.drop_stream();
                                return Some(Err(err.into()));
                            }
                            continue;
                        }
                    }
                }
                None => stream.next().await,
            };

            match frame {
                Some(Ok(Message::Text(text))) => return Some(Ok(text)),
                Some(Ok(Message::Close(close_frame))) => {
                    tracing::debug!(frame = ?close_frame, "WebSocket closed by server");
                    self.drop_stream();
                    return None;
                }
                Some(Ok(_)) => continue,
                Some(Err(err)) => {
                    self.drop_stream();
                    return Some(Err(err.into()));
                }
                None => {
                    self.drop_stream();
                    return None;
                }
            }
        }
    }

    async fn close(&mut self) -> Result<()> {
        self.heartbeat = None;
        if let Some(mut stream) = self.stream.take() {
            stream.close(None).await?;
        }

        return Ok(());
    }
}
