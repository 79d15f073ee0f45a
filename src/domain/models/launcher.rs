use ratatui::prelude::Alignment;
use ratatui::prelude::Backend;
use ratatui::prelude::Rect;
use ratatui::style::Color;
use ratatui::style::Style;
use ratatui::widgets::Block;
use ratatui::widgets::BorderType;
use ratatui::widgets::Borders;
use ratatui::widgets::Clear;
use ratatui::widgets::Paragraph;
use ratatui::Frame;

/// Button shown in the bottom right corner while the dialog is closed.
pub struct Launcher {
    title: String,
}

impl Launcher {
    pub fn new(title: &str) -> Launcher {
        return Launcher {
            title: title.to_string(),
        };
    }

    pub fn area(&self, rect: Rect) -> Rect {
        let label_len = self.label().chars().count() as u16;
        let width = (label_len + 4).min(rect.width);
        let height = 3.min(rect.height);

        return Rect::new(
            rect.x + rect.width - width,
            rect.y + rect.height - height,
            width,
            height,
        );
    }

    fn label(&self) -> String {
        return format!("✉ {} (Enter)", self.title);
    }

    pub fn render<B: Backend>(&self, frame: &mut Frame<B>, rect: Rect) {
        let area = self.area(rect);
        frame.render_widget(Clear, area);
        frame.render_widget(
            Paragraph::new(self.label())
                .style(Style::default().fg(Color::Cyan))
                .block(
                    Block::default()
                        .borders(Borders::ALL)
                        .border_type(BorderType::Rounded),
                )
                .alignment(Alignment::Center),
            area,
        );
    }
}
