use super::TextArea;

#[test]
fn it_pastes_multiple_lines() {
    let mut textarea = TextArea::new("Ask me");
    TextArea::paste(&mut textarea, "first line\r\nsecond");

    assert_eq!(textarea.lines(), ["first line", "second"]);
}

#[test]
fn it_starts_empty() {
    let textarea = TextArea::new("Type question here ...");
    assert_eq!(textarea.lines(), [""]);
}
