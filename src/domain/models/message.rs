#[cfg(test)]
#[path = "message_test.rs"]
mod tests;

use anyhow::Result;
use serde_derive::Deserialize;
use serde_derive::Serialize;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Choice {
    pub item_id: String,
    pub content: String,
}

impl Choice {
    pub fn new(item_id: &str, content: &str) -> Choice {
        return Choice {
            item_id: item_id.to_string(),
            content: content.to_string(),
        };
    }
}

/// Messages pushed by the assistant service. The `kind` field selects the
/// variant, anything unrecognised lands in `Unknown`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind")]
pub enum InboundMessage {
    BotText {
        #[serde(default)]
        content: String,
    },
    UserText {
        #[serde(default)]
        content: String,
    },
    #[serde(rename_all = "camelCase")]
    ChoiceRequest {
        #[serde(default)]
        question: String,
        #[serde(default)]
        group_id: String,
        #[serde(default)]
        choices: Vec<Choice>,
    },
    #[serde(rename_all = "camelCase")]
    ChoiceResponse {
        #[serde(default)]
        group_id: String,
        #[serde(default)]
        content: String,
    },
    #[serde(rename_all = "camelCase")]
    StartChatSession {
        #[serde(default)]
        session_id: String,
        #[serde(default)]
        chat_prompt: Option<String>,
        #[serde(default)]
        chat_text: Option<String>,
    },
    EndChatSession,
    #[serde(other)]
    Unknown,
}

impl InboundMessage {
    pub fn parse(raw: &str) -> Result<InboundMessage> {
        let msg: InboundMessage = serde_json::from_str(raw)?;
        return Ok(msg);
    }
}

/// Messages sent to the assistant service in response to user input.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind")]
pub enum OutboundMessage {
    #[serde(rename_all = "camelCase")]
    UserText { session_id: String, content: String },
    #[serde(rename_all = "camelCase")]
    ChoiceResponse {
        group_id: String,
        item_id: String,
        content: String,
    },
}

impl OutboundMessage {
    pub fn user_text(session_id: &str, content: &str) -> OutboundMessage {
        return OutboundMessage::UserText {
            session_id: session_id.to_string(),
            content: content.to_string(),
        };
    }

    pub fn choice_response(group_id: &str, item_id: &str, content: &str) -> OutboundMessage {
        return OutboundMessage::ChoiceResponse {
            group_id: group_id.to_string(),
            item_id: item_id.to_string(),
            content: content.to_string(),
        };
    }

    pub fn to_json(&self) -> Result<String> {
        return Ok(serde_json::to_string(self)?);
    }
}
