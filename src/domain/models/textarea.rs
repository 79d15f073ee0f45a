#[cfg(test)]
#[path = "textarea_test.rs"]
mod tests;

use ratatui::widgets::Block;
use ratatui::widgets::BorderType;
use ratatui::widgets::Borders;
use ratatui::widgets::Padding;
use tui_textarea::Input;
use tui_textarea::Key;

pub struct TextArea {}

impl<'a> TextArea {
    /// Empty input box titled with the current placeholder.
    pub fn new(title: &str) -> tui_textarea::TextArea<'a> {
        let mut textarea = tui_textarea::TextArea::default();
        textarea.set_block(TextArea::block(title));

        return textarea;
    }

    pub fn block(title: &str) -> Block<'a> {
        return Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .title(title.to_string())
            .padding(Padding::new(1, 1, 0, 0));
    }

    /// Feeds pasted text through the regular key handling so newlines split
    /// lines.
    pub fn paste(textarea: &mut tui_textarea::TextArea<'a>, text: &str) {
        for char in text.chars() {
            let key = match char {
                '\n' => Key::Enter,
                '\r' => continue,
                _ => Key::Char(char),
            };

            textarea.input(Input {
                key,
                ctrl: false,
                alt: false,
            });
        }
    }
}
