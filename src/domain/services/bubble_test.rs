use ratatui::text::Line;

use super::repeat_from_subtractions;
use super::wrap_text;
use super::Bubble;
use crate::domain::models::BubbleAlignment;

fn lines_to_strings(lines: &[Line]) -> Vec<String> {
    return lines
        .iter()
        .map(|line| {
            return line
                .spans
                .iter()
                .map(|span| {
                    return span.content.to_string();
                })
                .collect::<Vec<String>>()
                .join("");
        })
        .collect();
}

fn trimmed(lines: &[Line]) -> Vec<String> {
    return lines_to_strings(lines)
        .iter()
        .map(|line| return line.trim().to_string())
        .collect();
}

#[test]
fn it_creates_bot_text_with_avatar() {
    let lines = Bubble::new("Hi there!", BubbleAlignment::Left, 30)
        .label("Bot")
        .as_lines();

    assert_eq!(
        trimmed(&lines),
        vec!["╭Bot────────╮", "│ Hi there! │", "╰───────────╯"]
    );
    for line in lines_to_strings(&lines) {
        assert_eq!(line.chars().count(), 30);
        assert!(line.starts_with('╭') || line.starts_with('│') || line.starts_with('╰'));
    }
}

#[test]
fn it_creates_bot_text_without_avatar() {
    let lines = Bubble::new("Hi there!", BubbleAlignment::Left, 30).as_lines();

    assert_eq!(
        trimmed(&lines),
        vec!["╭───────────╮", "│ Hi there! │", "╰───────────╯"]
    );
}

#[test]
fn it_creates_user_text_aligned_right() {
    let lines = Bubble::new("Hi", BubbleAlignment::Right, 30)
        .label("testuser")
        .as_lines();

    assert_eq!(
        trimmed(&lines),
        vec!["╭testuser──╮", "│ Hi       │", "╰──────────╯"]
    );
    for line in lines_to_strings(&lines) {
        assert!(line.starts_with(&" ".repeat(18)));
        assert_eq!(line.chars().count(), 30);
    }
}

#[test]
fn it_wraps_long_text() {
    let lines = Bubble::new(
        "Hi there! This is a really long line that wraps",
        BubbleAlignment::Left,
        30,
    )
    .as_lines();

    assert_eq!(
        trimmed(&lines),
        vec![
            "╭─────────────────────────╮",
            "│ Hi there! This is a     │",
            "│ really long line that   │",
            "│ wraps                   │",
            "╰─────────────────────────╯",
        ]
    );
}

#[test]
fn it_keeps_multiple_lines() {
    let lines = Bubble::new("First\nSecond line", BubbleAlignment::Left, 40).as_lines();

    assert_eq!(
        trimmed(&lines),
        vec![
            "╭─────────────╮",
            "│ First       │",
            "│ Second line │",
            "╰─────────────╯",
        ]
    );
}

#[test]
fn it_wraps_text() {
    assert_eq!(wrap_text("one two\nthree", 20), vec!["one two", "three"]);
    assert_eq!(wrap_text("one two three", 7), vec!["one two", "three"]);
    assert_eq!(wrap_text("abcdefghij", 4), vec!["abcd", "efgh", "ij"]);
    assert_eq!(wrap_text("abcdefgh", 4), vec!["abcd", "efgh"]);
    assert_eq!(wrap_text("", 10), vec![""]);
}

#[test]
fn it_repeats_from_subtractions() {
    assert_eq!(repeat_from_subtractions(" ", vec![5, 2]), "   ");
    assert_eq!(repeat_from_subtractions(" ", vec![5, 10]), "");
    assert_eq!(repeat_from_subtractions("─", vec![4]), "────");
}
