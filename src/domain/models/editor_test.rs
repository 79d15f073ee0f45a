use super::EditorMode;
use super::EditorState;
use super::CHAT_PLACEHOLDER;
use super::CHOICE_PLACEHOLDER;

#[test]
fn it_defaults_to_read_only() {
    let editor = EditorState::default();
    assert_eq!(editor.mode(), EditorMode::ReadOnly);
    assert_eq!(editor.placeholder(), CHOICE_PLACEHOLDER);
}

#[test]
fn it_enables_with_prompt() {
    let mut editor = EditorState::default();
    editor.enable(Some("Ask me"));
    assert!(editor.is_editable());
    assert_eq!(editor.placeholder(), "Ask me");
}

#[test]
fn it_enables_with_fallback_prompt() {
    let mut editor = EditorState::default();
    editor.enable(None);
    assert_eq!(editor.placeholder(), CHAT_PLACEHOLDER);

    editor.enable(Some(""));
    assert_eq!(editor.placeholder(), CHAT_PLACEHOLDER);
}

#[test]
fn it_disables() {
    let mut editor = EditorState::default();
    editor.enable(Some("Ask me"));
    editor.disable();
    assert!(!editor.is_editable());
    assert_eq!(editor.placeholder(), "Choose an option");
}
