#[cfg(test)]
#[path = "events_test.rs"]
mod tests;

use anyhow::Result;
use crossterm::event::Event as CrosstermEvent;
use crossterm::event::EventStream;
use crossterm::event::MouseEventKind;
use futures::StreamExt;
use tokio::sync::mpsc;
use tokio::time;
use tui_textarea::Input;
use tui_textarea::Key;

use crate::domain::models::Event;

const TICK_MS: u64 = 500;

/// Maps a key press to the hotkey it triggers. Anything that is not a hotkey
/// is passed on as `KeyboardCharInput`.
pub fn key_event(input: Input) -> Event {
    match (&input.key, input.ctrl) {
        (Key::Char('c'), true) => return Event::KeyboardCTRLC(),
        (Key::Char('n'), true) => return Event::KeyboardCTRLN(),
        (Key::Char('o'), true) => return Event::KeyboardCTRLO(),
        (Key::Char('r'), true) => return Event::KeyboardCTRLR(),
        (Key::Char('d'), true) | (Key::PageDown, _) => return Event::UIScrollPageDown(),
        (Key::Char('u'), true) | (Key::PageUp, _) => return Event::UIScrollPageUp(),
        (Key::Down, _) | (Key::MouseScrollDown, _) => return Event::UIScrollDown(),
        (Key::Up, _) | (Key::MouseScrollUp, _) => return Event::UIScrollUp(),
        (Key::Enter, _) => return Event::KeyboardEnter(),
        (Key::Esc, _) => return Event::KeyboardEsc(),
        (Key::Tab, _) => return Event::KeyboardTab(),
        _ => return Event::KeyboardCharInput(input),
    }
}

pub fn terminal_event(event: CrosstermEvent) -> Option<Event> {
    match event {
        CrosstermEvent::Key(keyevent) => return Some(key_event(keyevent.into())),
        CrosstermEvent::Paste(text) => return Some(Event::KeyboardPaste(text)),
        CrosstermEvent::Mouse(mouseevent) => match mouseevent.kind {
            MouseEventKind::ScrollUp => return Some(Event::UIScrollUp()),
            MouseEventKind::ScrollDown => return Some(Event::UIScrollDown()),
            _ => return None,
        },
        _ => return None,
    }
}

/// Merges terminal input with events pushed by the channel service.
pub struct EventsService {
    crossterm_events: EventStream,
    events: mpsc::UnboundedReceiver<Event>,
}

impl EventsService {
    pub fn new(events: mpsc::UnboundedReceiver<Event>) -> EventsService {
        return EventsService {
            crossterm_events: EventStream::new(),
            events,
        };
    }

    /// Waits for the next event. A tick is emitted every 500ms so the UI
    /// redraws even when nothing happens.
    pub async fn next(&mut self) -> Result<Event> {
        loop {
            let evt = tokio::select! {
                event = self.events.recv() => event,
                event = self.crossterm_events.next() => match event {
                    Some(Ok(input)) => terminal_event(input),
                    Some(Err(err)) => {
                        tracing::warn!(error = ?err, "Failed to read terminal event");
                        None
                    }
                    None => None
                },
                _ = time::sleep(time::Duration::from_millis(TICK_MS)) => Some(Event::UITick())
            };

            if let Some(event) = evt {
                return Ok(event);
            }
        }
    }
}
