#[cfg(test)]
#[path = "message_log_test.rs"]
mod tests;

use crate::domain::models::Choice;
use crate::domain::models::Entry;

/// Ordered list of everything visible in the dialog body.
#[derive(Default)]
pub struct MessageLog {
    entries: Vec<Entry>,
}

impl MessageLog {
    pub fn entries(&self) -> &[Entry] {
        return &self.entries;
    }

    pub fn len(&self) -> usize {
        return self.entries.len();
    }

    pub fn is_empty(&self) -> bool {
        return self.entries.is_empty();
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Appends a bot bubble. Only the last bubble of a consecutive run of bot
    /// bubbles keeps its avatar.
    pub fn push_bot_text(&mut self, text: &str) -> bool {
        if text.is_empty() {
            return false;
        }

        if let Some(Entry::Bot { avatar, .. }) = self.entries.last_mut() {
            *avatar = false;
        }

        self.entries.push(Entry::Bot {
            text: text.to_string(),
            avatar: true,
        });

        return true;
    }

    pub fn push_user_text(&mut self, text: &str) -> bool {
        if text.is_empty() {
            return false;
        }

        self.entries.push(Entry::User {
            text: text.to_string(),
        });

        return true;
    }

    /// Appends a row of choice buttons. An earlier group still open under the
    /// same id is dropped so ids stay unique.
    pub fn push_choice_group(&mut self, group_id: &str, choices: &[Choice]) -> bool {
        if choices.is_empty() {
            return false;
        }

        if let Some(idx) = self.open_group_index(group_id) {
            tracing::warn!(group_id, "Replacing choice group that is still open");
            self.entries.remove(idx);
        }

        self.entries.push(Entry::ChoiceGroup {
            group_id: group_id.to_string(),
            choices: choices.to_vec(),
        });

        return true;
    }

    /// Swaps an open group for a single selected button. Returns false when
    /// no group with that id is open.
    pub fn resolve_choice_group(&mut self, group_id: &str, content: &str) -> bool {
        let idx = match self.open_group_index(group_id) {
            Some(idx) => idx,
            None => return false,
        };

        self.entries.remove(idx);
        self.entries.push(Entry::Selected {
            text: content.to_string(),
        });

        return true;
    }

    pub fn open_group(&self, group_id: &str) -> Option<&[Choice]> {
        return self
            .open_group_index(group_id)
            .and_then(|idx| match &self.entries[idx] {
                Entry::ChoiceGroup { choices, .. } => return Some(choices.as_slice()),
                _ => return None,
            });
    }

    /// Most recently added group that has not been resolved yet.
    pub fn last_open_group(&self) -> Option<(&str, &[Choice])> {
        return self.entries.iter().rev().find_map(|entry| match entry {
            Entry::ChoiceGroup { group_id, choices } => {
                return Some((group_id.as_str(), choices.as_slice()))
            }
            _ => return None,
        });
    }

    fn open_group_index(&self, id: &str) -> Option<usize> {
        return self.entries.iter().position(|entry| match entry {
            Entry::ChoiceGroup { group_id, .. } => return group_id == id,
            _ => return false,
        });
    }
}
