#[cfg(test)]
#[path = "editor_test.rs"]
mod tests;

pub const CHOICE_PLACEHOLDER: &str = "Choose an option";
pub const CHAT_PLACEHOLDER: &str = "Type question here ...";

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum EditorMode {
    /// Only the placeholder is shown, input goes to the choice buttons.
    ReadOnly,
    /// Free text is accepted and sent on Enter.
    Editable,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EditorState {
    mode: EditorMode,
    placeholder: String,
}

impl Default for EditorState {
    fn default() -> EditorState {
        return EditorState {
            mode: EditorMode::ReadOnly,
            placeholder: CHOICE_PLACEHOLDER.to_string(),
        };
    }
}

impl EditorState {
    pub fn enable(&mut self, prompt: Option<&str>) {
        self.mode = EditorMode::Editable;
        self.placeholder = match prompt {
            Some(text) if !text.is_empty() => text.to_string(),
            _ => CHAT_PLACEHOLDER.to_string(),
        };
    }

    pub fn disable(&mut self) {
        self.mode = EditorMode::ReadOnly;
        self.placeholder = CHOICE_PLACEHOLDER.to_string();
    }

    pub fn mode(&self) -> EditorMode {
        return self.mode;
    }

    pub fn is_editable(&self) -> bool {
        return self.mode == EditorMode::Editable;
    }

    pub fn placeholder(&self) -> &str {
        return &self.placeholder;
    }
}
