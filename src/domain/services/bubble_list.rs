#[cfg(test)]
#[path = "bubble_list_test.rs"]
mod tests;

use ratatui::prelude::Backend;
use ratatui::prelude::Rect;
use ratatui::style::Color;
use ratatui::style::Style;
use ratatui::text::Line;
use ratatui::widgets::Block;
use ratatui::widgets::Paragraph;
use ratatui::Frame;

use super::Bubble;
use super::ButtonRow;
use crate::domain::models::Entry;

struct BubbleCacheEntry {
    entry: Entry,
    focus: Option<usize>,
    lines: Vec<Line<'static>>,
}

/// Renders the message log into terminal lines, reusing the lines of entries
/// that did not change since the last pass.
pub struct BubbleList {
    bot_name: String,
    cache: Vec<BubbleCacheEntry>,
    line_width: usize,
    lines_len: usize,
    username: String,
}

impl BubbleList {
    pub fn new(bot_name: &str, username: &str) -> BubbleList {
        return BubbleList {
            bot_name: bot_name.to_string(),
            cache: vec![],
            line_width: 0,
            lines_len: 0,
            username: username.to_string(),
        };
    }

    /// `focus` is the highlighted button of the given choice group.
    pub fn set_entries(&mut self, entries: &[Entry], focus: Option<(&str, usize)>, line_width: usize) {
        if self.line_width != line_width {
            self.cache.clear();
            self.line_width = line_width;
        }

        self.cache.truncate(entries.len());

        for (idx, entry) in entries.iter().enumerate() {
            let entry_focus = match (entry, focus) {
                (Entry::ChoiceGroup { group_id, .. }, Some((focus_id, pos))) if group_id == focus_id => {
                    Some(pos)
                }
                _ => None,
            };

            if let Some(cache_entry) = self.cache.get(idx) {
                if &cache_entry.entry == entry && cache_entry.focus == entry_focus {
                    continue;
                }
            }

            let cache_entry = BubbleCacheEntry {
                entry: entry.clone(),
                focus: entry_focus,
                lines: self.entry_lines(entry, entry_focus),
            };

            if idx < self.cache.len() {
                self.cache[idx] = cache_entry;
            } else {
                self.cache.push(cache_entry);
            }
        }

        self.lines_len = self
            .cache
            .iter()
            .map(|cache_entry| {
                return cache_entry.lines.len();
            })
            .sum();
    }

    fn entry_lines(&self, entry: &Entry, focus: Option<usize>) -> Vec<Line<'static>> {
        let width = self.line_width;
        match entry {
            Entry::Bot { text, avatar } => {
                let mut bubble = Bubble::new(text, entry.alignment(), width);
                if *avatar {
                    bubble = bubble.label(&self.bot_name);
                }
                return bubble.as_lines();
            }
            Entry::User { text } => {
                return Bubble::new(text, entry.alignment(), width)
                    .label(&self.username)
                    .style(Style::default().fg(Color::Blue))
                    .as_lines();
            }
            Entry::ChoiceGroup { choices, .. } => {
                return ButtonRow::choices(choices, focus, width).as_lines();
            }
            Entry::Selected { text } => {
                return ButtonRow::selected(text, width).as_lines();
            }
        }
    }

    pub fn len(&self) -> usize {
        return self.lines_len;
    }

    pub fn render<B: Backend>(&self, frame: &mut Frame<B>, rect: Rect, scroll: u16) {
        let lines: Vec<Line<'static>> = self
            .cache
            .iter()
            .flat_map(|cache_entry| {
                return cache_entry.lines.to_owned();
            })
            .collect();

        frame.render_widget(
            Paragraph::new(lines)
                .block(Block::default())
                .scroll((scroll, 0)),
            rect,
        );
    }
}
