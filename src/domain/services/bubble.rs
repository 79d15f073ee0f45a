#[cfg(test)]
#[path = "bubble_test.rs"]
mod tests;

use ratatui::style::Modifier;
use ratatui::style::Style;
use ratatui::text::Line;
use ratatui::text::Span;

use crate::domain::models::BubbleAlignment;

pub struct Bubble<'a> {
    alignment: BubbleAlignment,
    label: Option<&'a str>,
    style: Style,
    text: &'a str,
    window_max_width: usize,
}

pub struct BubbleConfig {
    pub bubble_padding: usize,
    pub border_elements_length: usize,
    pub outer_padding_percentage: f32,
}

pub fn char_len(text: &str) -> usize {
    return text.chars().count();
}

pub fn repeat_from_subtractions(text: &str, subtractions: Vec<usize>) -> String {
    let mut iter = subtractions.into_iter();
    let first = iter.next().unwrap_or(0);
    let count = iter.fold(first, |acc, e| return acc.saturating_sub(e));

    return text.repeat(count);
}

/// Word wraps every line of `text` to `max_width` characters. Words longer
/// than a line are split.
pub fn wrap_text(text: &str, max_width: usize) -> Vec<String> {
    let max_width = max_width.max(1);
    let mut lines: Vec<String> = vec![];

    for full_line in text.lines() {
        let mut current = String::new();

        for word in full_line.split(' ') {
            let mut word = word.to_string();
            while char_len(&word) > max_width {
                if !current.is_empty() {
                    lines.push(current);
                    current = String::new();
                }
                lines.push(word.chars().take(max_width).collect());
                word = word.chars().skip(max_width).collect();
            }
            if word.is_empty() {
                continue;
            }

            if current.is_empty() {
                current = word;
            } else if char_len(&current) + 1 + char_len(&word) > max_width {
                lines.push(current);
                current = word;
            } else {
                current.push(' ');
                current.push_str(&word);
            }
        }

        lines.push(current.trim_end().to_string());
    }

    if lines.is_empty() {
        lines.push("".to_string());
    }

    return lines;
}

impl<'a> Bubble<'a> {
    pub fn new(text: &'a str, alignment: BubbleAlignment, window_max_width: usize) -> Bubble<'a> {
        return Bubble {
            alignment,
            label: None,
            style: Style::default(),
            text,
            window_max_width,
        };
    }

    pub fn label(mut self, label: &'a str) -> Bubble<'a> {
        if !label.is_empty() {
            self.label = Some(label);
        }
        return self;
    }

    pub fn style(mut self, style: Style) -> Bubble<'a> {
        self.style = style;
        return self;
    }

    pub fn style_config() -> BubbleConfig {
        return BubbleConfig {
            // "│ " + " │"
            bubble_padding: 4,
            // left border + left padding + (text, not counted) + right padding + right border +
            // scrollbar.
            border_elements_length: 5,
            outer_padding_percentage: 0.04,
        };
    }

    pub fn as_lines(&self) -> Vec<Line<'static>> {
        let max_line_length = self.get_max_line_length();
        let lines = wrap_text(self.text, max_line_length)
            .into_iter()
            .map(|line| {
                return self.text_to_line(line, max_line_length);
            })
            .collect::<Vec<Line>>();

        return self.wrap_lines_in_bubble(lines, max_line_length);
    }

    fn text_to_line(&self, text: String, max_line_length: usize) -> Line<'static> {
        let fill = repeat_from_subtractions(" ", vec![max_line_length, char_len(&text)]);
        let spans = vec![
            Span::styled("│ ".to_string(), self.style),
            Span::from(text),
            Span::styled(format!("{fill} │"), self.style),
        ];

        return self.align(spans, max_line_length);
    }

    fn align(&self, mut spans: Vec<Span<'static>>, max_line_length: usize) -> Line<'static> {
        let outer_bubble_padding = repeat_from_subtractions(
            " ",
            vec![
                self.window_max_width,
                max_line_length,
                Bubble::style_config().bubble_padding,
            ],
        );

        if self.alignment == BubbleAlignment::Left {
            spans.push(Span::from(outer_bubble_padding));
            return Line::from(spans);
        }

        let mut line_spans = vec![Span::from(outer_bubble_padding)];
        line_spans.extend(spans);

        return Line::from(line_spans);
    }

    fn get_max_line_length(&self) -> usize {
        let style_config = Bubble::style_config();
        // Add a minimum 4% of padding on the side.
        let min_bubble_padding_length = ((self.window_max_width as f32
            * style_config.outer_padding_percentage)
            .ceil()) as usize;

        // Border elements + minimum bubble padding.
        let line_border_width = style_config.border_elements_length + min_bubble_padding_length;
        let available = self.window_max_width.saturating_sub(line_border_width);

        let mut max_line_length = self.text.lines().map(char_len).max().unwrap_or(0);
        if max_line_length > available {
            max_line_length = available;
        }

        if let Some(label) = self.label {
            if max_line_length < char_len(label) {
                max_line_length = char_len(label);
            }
        }

        return max_line_length.max(1);
    }

    fn wrap_lines_in_bubble(
        &self,
        lines: Vec<Line<'static>>,
        max_line_length: usize,
    ) -> Vec<Line<'static>> {
        // Add 2 for the inner padding.
        let inner_width = max_line_length + 2;
        let top_bar = match self.label {
            Some(label) => {
                let rest = repeat_from_subtractions("─", vec![inner_width, char_len(label)]);
                vec![
                    Span::styled("╭".to_string(), self.style),
                    Span::styled(label.to_string(), self.style.add_modifier(Modifier::BOLD)),
                    Span::styled(format!("{rest}╮"), self.style),
                ]
            }
            None => vec![Span::styled(
                format!("╭{}╮", "─".repeat(inner_width)),
                self.style,
            )],
        };
        let bottom_bar = vec![Span::styled(
            format!("╰{}╯", "─".repeat(inner_width)),
            self.style,
        )];

        let mut res = vec![self.align(top_bar, max_line_length)];
        res.extend(lines);
        res.push(self.align(bottom_bar, max_line_length));

        return res;
    }
}
