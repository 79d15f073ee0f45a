use std::sync::Arc;
use std::sync::Mutex;

use anyhow::bail;
use anyhow::Result;
use async_trait::async_trait;
use tempfile::TempDir;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use super::ChannelService;
use crate::domain::models::Action;
use crate::domain::models::Channel;
use crate::domain::models::Event;
use crate::domain::models::OutboundMessage;
use crate::domain::services::CookieJar;

#[derive(Default)]
struct Recorded {
    offered_cookies: Vec<Option<String>>,
    sent: Vec<String>,
}

struct MemoryChannel {
    fail_open: bool,
    inbound: mpsc::UnboundedReceiver<String>,
    open: bool,
    recorded: Arc<Mutex<Recorded>>,
    set_cookie: Option<String>,
}

#[async_trait]
impl Channel for MemoryChannel {
    fn is_open(&self) -> bool {
        return self.open;
    }

    async fn open(&mut self, cookie: Option<String>) -> Result<Option<String>> {
        self.recorded.lock().unwrap().offered_cookies.push(cookie);
        if self.fail_open {
            bail!("Connection refused");
        }

        self.open = true;
        return Ok(self.set_cookie.clone());
    }

    async fn send(&mut self, payload: String) -> Result<()> {
        self.recorded.lock().unwrap().sent.push(payload);
        return Ok(());
    }

    async fn recv(&mut self) -> Option<Result<String>> {
        if !self.open {
            return None;
        }

        match self.inbound.recv().await {
            Some(text) => return Some(Ok(text)),
            None => {
                self.open = false;
                return None;
            }
        }
    }

    async fn close(&mut self) -> Result<()> {
        self.open = false;
        return Ok(());
    }
}

struct Harness {
    action_tx: mpsc::UnboundedSender<Action>,
    cookies: CookieJar,
    event_rx: mpsc::UnboundedReceiver<Event>,
    handle: JoinHandle<Result<()>>,
    inbound_tx: mpsc::UnboundedSender<String>,
    recorded: Arc<Mutex<Recorded>>,
    _dir: TempDir,
}

async fn start_service(fail_open: bool, set_cookie: Option<&str>) -> Result<Harness> {
    let dir = tempfile::tempdir()?;
    let cookies = CookieJar::new(dir.path().join("cookie"));
    cookies.save("Bot-Assistant=stored").await?;

    let recorded = Arc::new(Mutex::new(Recorded::default()));
    let (inbound_tx, inbound_rx) = mpsc::unbounded_channel::<String>();
    let channel = MemoryChannel {
        fail_open,
        inbound: inbound_rx,
        open: false,
        recorded: recorded.clone(),
        set_cookie: set_cookie.map(|cookie| return cookie.to_string()),
    };

    let (action_tx, mut action_rx) = mpsc::unbounded_channel::<Action>();
    let (event_tx, event_rx) = mpsc::unbounded_channel::<Event>();
    let service_cookies = cookies.clone();
    let handle = tokio::spawn(async move {
        return ChannelService::start(
            Box::new(channel),
            service_cookies,
            event_tx,
            &mut action_rx,
        )
        .await;
    });

    return Ok(Harness {
        action_tx,
        cookies,
        event_rx,
        handle,
        inbound_tx,
        recorded,
        _dir: dir,
    });
}

async fn next_event(rx: &mut mpsc::UnboundedReceiver<Event>) -> Result<Event> {
    match rx.recv().await {
        Some(event) => return Ok(event),
        None => bail!("Event channel closed"),
    }
}

#[tokio::test]
async fn it_opens_with_stored_cookie() -> Result<()> {
    let mut harness = start_service(false, Some("Bot-Assistant=fresh")).await?;

    assert!(matches!(next_event(&mut harness.event_rx).await?, Event::ChannelOpened()));
    assert_eq!(
        harness.recorded.lock().unwrap().offered_cookies,
        vec![Some("Bot-Assistant=stored".to_string())]
    );
    assert_eq!(
        harness.cookies.load().await?,
        Some("Bot-Assistant=fresh".to_string())
    );

    drop(harness.action_tx);
    harness.handle.await??;
    return Ok(());
}

#[tokio::test]
async fn it_forwards_inbound_payloads() -> Result<()> {
    let mut harness = start_service(false, None).await?;
    assert!(matches!(next_event(&mut harness.event_rx).await?, Event::ChannelOpened()));

    harness
        .inbound_tx
        .send(r#"{"kind":"BotText","content":"Hi"}"#.to_string())?;

    match next_event(&mut harness.event_rx).await? {
        Event::ChannelMessage(text) => {
            assert_eq!(text, r#"{"kind":"BotText","content":"Hi"}"#);
        }
        _ => bail!("Wrong enum"),
    }

    drop(harness.action_tx);
    harness.handle.await??;
    return Ok(());
}

#[tokio::test]
async fn it_writes_outbound_messages() -> Result<()> {
    let harness = start_service(false, None).await?;

    harness
        .action_tx
        .send(Action::ChannelSend(OutboundMessage::user_text("s1", "Hello")))?;
    drop(harness.action_tx);
    harness.handle.await??;

    assert_eq!(
        harness.recorded.lock().unwrap().sent,
        vec![r#"{"kind":"UserText","sessionId":"s1","content":"Hello"}"#.to_string()]
    );

    return Ok(());
}

#[tokio::test]
async fn it_reports_failed_open() -> Result<()> {
    let mut harness = start_service(true, None).await?;

    match next_event(&mut harness.event_rx).await? {
        Event::ChannelError(err) => assert_eq!(err, "Connection refused"),
        _ => bail!("Wrong enum"),
    }
    assert!(matches!(next_event(&mut harness.event_rx).await?, Event::ChannelClosed()));

    harness
        .action_tx
        .send(Action::ChannelSend(OutboundMessage::user_text("s1", "Hello")))?;
    drop(harness.action_tx);
    harness.handle.await??;

    assert!(harness.recorded.lock().unwrap().sent.is_empty());
    return Ok(());
}

#[tokio::test]
async fn it_closes_and_reopens_on_request() -> Result<()> {
    let mut harness = start_service(false, None).await?;
    assert!(matches!(next_event(&mut harness.event_rx).await?, Event::ChannelOpened()));

    harness.action_tx.send(Action::ChannelClose())?;
    assert!(matches!(next_event(&mut harness.event_rx).await?, Event::ChannelClosed()));

    harness.cookies.clear().await?;
    harness.action_tx.send(Action::ChannelOpen())?;
    assert!(matches!(next_event(&mut harness.event_rx).await?, Event::ChannelOpened()));
    assert_eq!(
        harness.recorded.lock().unwrap().offered_cookies,
        vec![Some("Bot-Assistant=stored".to_string()), None]
    );

    drop(harness.action_tx);
    harness.handle.await??;
    return Ok(());
}

#[tokio::test]
async fn it_reports_peer_close() -> Result<()> {
    let mut harness = start_service(false, None).await?;
    assert!(matches!(next_event(&mut harness.event_rx).await?, Event::ChannelOpened()));

    drop(harness.inbound_tx);
    assert!(matches!(next_event(&mut harness.event_rx).await?, Event::ChannelClosed()));

    drop(harness.action_tx);
    harness.handle.await??;
    return Ok(());
}
