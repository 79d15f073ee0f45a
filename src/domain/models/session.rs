#[cfg(test)]
#[path = "session_test.rs"]
mod tests;

/// Chat session started by the assistant. Only the identifier is tracked, it
/// is echoed back on every outbound `UserText`.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SessionState {
    id: Option<String>,
}

impl SessionState {
    pub fn start(&mut self, id: &str) {
        self.id = Some(id.to_string());
    }

    pub fn clear(&mut self) {
        self.id = None;
    }

    pub fn is_active(&self) -> bool {
        return self.id.is_some();
    }

    /// Session identifier, or an empty string when no session was started.
    pub fn id(&self) -> &str {
        return self.id.as_deref().unwrap_or("");
    }
}
