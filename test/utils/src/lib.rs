pub fn choice_request_fixture() -> &'static str {
    return r#"
{
    "kind": "ChoiceRequest",
    "groupId": "g1",
    "question": "Would you like to continue?",
    "choices": [
        { "itemId": "a", "content": "Yes" },
        { "itemId": "b", "content": "No" }
    ]
}
"#
    .trim();
}

pub fn start_chat_session_fixture() -> &'static str {
    return r#"
{
    "kind": "StartChatSession",
    "sessionId": "s1",
    "chatPrompt": "Ask me",
    "chatText": "Hi!"
}
"#
    .trim();
}

pub fn bot_text_fixture(content: &str) -> String {
    return format!(r#"{{"kind":"BotText","content":"{content}"}}"#);
}

pub fn user_text_fixture(content: &str) -> String {
    return format!(r#"{{"kind":"UserText","content":"{content}"}}"#);
}
