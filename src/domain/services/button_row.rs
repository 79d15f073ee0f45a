#[cfg(test)]
#[path = "button_row_test.rs"]
mod tests;

use ratatui::style::Color;
use ratatui::style::Modifier;
use ratatui::style::Style;
use ratatui::text::Line;
use ratatui::text::Span;

use super::bubble::char_len;
use super::bubble::repeat_from_subtractions;
use crate::domain::models::BubbleAlignment;
use crate::domain::models::Choice;

const BUTTON_GAP: &str = "  ";

/// Inline buttons for a choice group, or the single button left behind once
/// a choice was picked.
pub struct ButtonRow {
    alignment: BubbleAlignment,
    focus: Option<usize>,
    labels: Vec<String>,
    style: Style,
    window_max_width: usize,
}

impl ButtonRow {
    pub fn choices(choices: &[Choice], focus: Option<usize>, window_max_width: usize) -> ButtonRow {
        let labels = choices
            .iter()
            .enumerate()
            .map(|(idx, choice)| {
                return format!("[{}: {}]", idx + 1, choice.content);
            })
            .collect();

        return ButtonRow {
            alignment: BubbleAlignment::Left,
            focus,
            labels,
            style: Style::default().fg(Color::Cyan),
            window_max_width,
        };
    }

    pub fn selected(content: &str, window_max_width: usize) -> ButtonRow {
        return ButtonRow {
            alignment: BubbleAlignment::Right,
            focus: None,
            labels: vec![format!("[✔ {content}]")],
            style: Style::default().fg(Color::Green),
            window_max_width,
        };
    }

    fn rows(&self) -> Vec<Vec<usize>> {
        let mut rows: Vec<Vec<usize>> = vec![];
        let mut current: Vec<usize> = vec![];
        let mut current_len = 0;

        for (idx, label) in self.labels.iter().enumerate() {
            let label_len = char_len(label);
            if !current.is_empty()
                && current_len + BUTTON_GAP.len() + label_len > self.window_max_width
            {
                rows.push(current);
                current = vec![];
                current_len = 0;
            }

            if !current.is_empty() {
                current_len += BUTTON_GAP.len();
            }
            current_len += label_len;
            current.push(idx);
        }

        if !current.is_empty() {
            rows.push(current);
        }

        return rows;
    }

    pub fn as_lines(&self) -> Vec<Line<'static>> {
        return self
            .rows()
            .into_iter()
            .map(|row| {
                let mut spans: Vec<Span<'static>> = vec![];
                let mut row_len = 0;

                for (pos, idx) in row.into_iter().enumerate() {
                    if pos > 0 {
                        spans.push(Span::from(BUTTON_GAP));
                        row_len += BUTTON_GAP.len();
                    }

                    let mut style = self.style;
                    if self.focus == Some(idx) {
                        style = style.add_modifier(Modifier::REVERSED | Modifier::BOLD);
                    }

                    row_len += char_len(&self.labels[idx]);
                    spans.push(Span::styled(self.labels[idx].to_string(), style));
                }

                let padding = repeat_from_subtractions(" ", vec![self.window_max_width, row_len]);
                if self.alignment == BubbleAlignment::Right {
                    spans.insert(0, Span::from(padding));
                } else {
                    spans.push(Span::from(padding));
                }

                return Line::from(spans);
            })
            .collect();
    }
}
