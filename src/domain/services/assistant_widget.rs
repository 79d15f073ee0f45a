#[cfg(test)]
#[path = "assistant_widget_test.rs"]
mod tests;

use anyhow::Result;
use ratatui::prelude::Rect;
use tokio::sync::mpsc;

use super::BubbleList;
use super::CookieJar;
use super::MessageLog;
use super::Scroll;
use crate::domain::models::Action;
use crate::domain::models::Choice;
use crate::domain::models::EditorState;
use crate::domain::models::InboundMessage;
use crate::domain::models::OutboundMessage;
use crate::domain::models::SessionState;

pub struct AssistantWidget {
    pub bubble_list: BubbleList,
    pub last_known_height: u16,
    pub last_known_width: u16,
    pub scroll: Scroll,
    choice_focus: usize,
    connected: bool,
    cookies: CookieJar,
    editor: EditorState,
    log: MessageLog,
    open: bool,
    session: SessionState,
    tx: mpsc::UnboundedSender<Action>,
}

impl AssistantWidget {
    pub fn new(
        bot_name: &str,
        username: &str,
        cookies: CookieJar,
        tx: mpsc::UnboundedSender<Action>,
    ) -> AssistantWidget {
        return AssistantWidget {
            bubble_list: BubbleList::new(bot_name, username),
            last_known_height: 0,
            last_known_width: 0,
            scroll: Scroll::default(),
            choice_focus: 0,
            connected: false,
            cookies,
            editor: EditorState::default(),
            log: MessageLog::default(),
            open: true,
            session: SessionState::default(),
            tx,
        };
    }

    pub fn open(&mut self) {
        self.open = true;
    }

    pub fn close(&mut self) {
        self.open = false;
    }

    pub fn is_open(&self) -> bool {
        return self.open;
    }

    pub fn editor(&self) -> &EditorState {
        return &self.editor;
    }

    pub fn log(&self) -> &MessageLog {
        return &self.log;
    }

    pub fn session(&self) -> &SessionState {
        return &self.session;
    }

    pub fn is_connected(&self) -> bool {
        return self.connected;
    }

    pub fn set_connected(&mut self, connected: bool) {
        self.connected = connected;
    }

    /// Asks the channel service to open the connection if it is down.
    pub fn connect(&self) -> Result<()> {
        if self.connected {
            return Ok(());
        }

        self.tx.send(Action::ChannelOpen())?;
        return Ok(());
    }

    /// Forgets the session: the cookie is removed, the channel is closed and
    /// the log is emptied. The connection is not reopened.
    pub async fn reset(&mut self) -> Result<()> {
        if let Err(err) = self.cookies.clear().await {
            tracing::warn!(error = ?err, "Failed to clear session cookie");
        }

        self.log.clear();
        self.session.clear();
        self.editor.disable();
        self.choice_focus = 0;
        self.sync_dependants();
        self.scroll.last();

        if let Err(err) = self.tx.send(Action::ChannelClose()) {
            tracing::warn!(error = ?err, "Failed to request channel close");
        }

        return Ok(());
    }

    pub fn handle_inbound(&mut self, raw: &str) {
        let msg = match InboundMessage::parse(raw) {
            Ok(msg) => msg,
            Err(err) => {
                tracing::warn!(error = ?err, payload = raw, "Dropping malformed message");
                return;
            }
        };

        tracing::debug!(inbound = ?msg, "Received message");

        match msg {
            InboundMessage::BotText { content } => {
                self.log.push_bot_text(&content);
            }
            InboundMessage::UserText { content } => {
                self.log.push_user_text(&content);
            }
            InboundMessage::ChoiceRequest {
                question,
                group_id,
                choices,
            } => {
                self.log.push_bot_text(&question);
                if self.log.push_choice_group(&group_id, &choices) {
                    self.choice_focus = 0;
                }
            }
            InboundMessage::ChoiceResponse { group_id, content } => {
                if self.log.resolve_choice_group(&group_id, &content) {
                    self.choice_focus = 0;
                } else {
                    tracing::debug!(group_id = group_id.as_str(), "No open choice group to resolve");
                }
            }
            InboundMessage::StartChatSession {
                session_id,
                chat_prompt,
                chat_text,
            } => {
                self.session.start(&session_id);
                if let Some(text) = chat_text {
                    self.log.push_bot_text(&text);
                }
                self.editor.enable(chat_prompt.as_deref());
            }
            InboundMessage::EndChatSession => {
                self.editor.disable();
            }
            InboundMessage::Unknown => {
                tracing::debug!(payload = raw, "Ignoring message of unknown kind");
            }
        }

        self.sync_dependants();
        self.scroll.last();
    }

    /// Sends free text typed into the editor and echoes it into the log
    /// without waiting for the service.
    pub fn send_user_text(&mut self, content: &str) -> Result<()> {
        if content.is_empty() {
            return Ok(());
        }

        if !self.editor.is_editable() {
            tracing::debug!("Editor is read only, ignoring text");
            return Ok(());
        }

        self.send(OutboundMessage::user_text(self.session.id(), content))?;

        self.log.push_user_text(content);
        self.sync_dependants();
        self.scroll.last();

        return Ok(());
    }

    /// Handles Enter inside the open dialog. Typed text goes out when the
    /// editor accepts it, otherwise the highlighted choice is picked. Returns
    /// true when the typed text was consumed.
    pub fn submit(&mut self, typed: &str) -> Result<bool> {
        if self.editor.is_editable() && !typed.is_empty() {
            self.send_user_text(typed)?;
            return Ok(true);
        }

        self.pick_focused_choice()?;
        return Ok(false);
    }

    pub fn has_open_choices(&self) -> bool {
        return self.log.last_open_group().is_some();
    }

    /// Collapses the group to the picked button, then tells the service.
    pub fn pick_choice(&mut self, group_id: &str, item_id: &str, content: &str) -> Result<()> {
        if !self.log.resolve_choice_group(group_id, content) {
            tracing::warn!(group_id, item_id, "Picked choice of a group that is not open");
            return Ok(());
        }

        self.choice_focus = 0;
        self.sync_dependants();
        self.scroll.last();

        return self.send(OutboundMessage::choice_response(group_id, item_id, content));
    }

    /// Picks the highlighted button of the newest open group. Returns false
    /// when there is nothing to pick.
    pub fn pick_focused_choice(&mut self) -> Result<bool> {
        return self.pick_choice_at(self.choice_focus);
    }

    /// Picks by position in the newest open group.
    pub fn pick_choice_at(&mut self, idx: usize) -> Result<bool> {
        let (group_id, choice) = match self.log.last_open_group() {
            Some((group_id, choices)) if !choices.is_empty() => {
                let choice: Choice = match choices.get(idx) {
                    Some(choice) => choice.clone(),
                    None => return Ok(false),
                };
                (group_id.to_string(), choice)
            }
            _ => return Ok(false),
        };

        self.pick_choice(&group_id, &choice.item_id, &choice.content)?;
        return Ok(true);
    }

    pub fn focus_next_choice(&mut self) {
        if let Some((_, choices)) = self.log.last_open_group() {
            self.choice_focus = (self.focused_index(choices.len()) + 1) % choices.len();
            self.sync_dependants();
        }
    }

    pub fn focus_previous_choice(&mut self) {
        if let Some((_, choices)) = self.log.last_open_group() {
            let len = choices.len();
            self.choice_focus = (self.focused_index(len) + len - 1) % len;
            self.sync_dependants();
        }
    }

    /// Highlighted button as `(group_id, position)`.
    pub fn focused_choice(&self) -> Option<(&str, usize)> {
        return self
            .log
            .last_open_group()
            .map(|(group_id, choices)| return (group_id, self.focused_index(choices.len())));
    }

    fn focused_index(&self, len: usize) -> usize {
        return self.choice_focus.min(len.saturating_sub(1));
    }

    fn send(&self, msg: OutboundMessage) -> Result<()> {
        if !self.connected {
            tracing::warn!(outbound = ?msg, "Channel is not connected, dropping message");
            return Ok(());
        }

        self.tx.send(Action::ChannelSend(msg))?;
        return Ok(());
    }

    pub fn set_rect(&mut self, rect: Rect) {
        self.last_known_width = rect.width;
        self.last_known_height = rect.height;
        self.sync_dependants();
    }

    fn sync_dependants(&mut self) {
        let choice_focus = self.choice_focus;
        let focus = self.log.last_open_group().map(|(group_id, choices)| {
            return (group_id, choice_focus.min(choices.len().saturating_sub(1)));
        });

        self.bubble_list
            .set_entries(self.log.entries(), focus, self.last_known_width as usize);

        self.scroll
            .set_state(
                u16::try_from(self.bubble_list.len()).unwrap_or(u16::MAX),
                self.last_known_height,
            );
    }
}
