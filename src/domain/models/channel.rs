use anyhow::Result;
use async_trait::async_trait;

pub type ChannelBox = Box<dyn Channel>;

/// Bidirectional text transport to the assistant service.
#[async_trait]
pub trait Channel: Send {
    fn is_open(&self) -> bool;

    /// Opens the connection. A stored `name=value` cookie is offered so the
    /// service can resume an existing session. Returns the cookie the
    /// service asked to be stored, if any.
    async fn open(&mut self, cookie: Option<String>) -> Result<Option<String>>;

    async fn send(&mut self, payload: String) -> Result<()>;

    /// Waits for the next text payload. `None` means the connection is
    /// gone, either closed by the peer or never opened.
    async fn recv(&mut self) -> Option<Result<String>>;

    async fn close(&mut self) -> Result<()>;
}
