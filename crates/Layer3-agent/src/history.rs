//! Message history for one agent run

use scout_provider::{Message, MessageRole, ToolCall};

/// Ordered conversation plus the system prompt it runs under
#[derive(Debug, Clone, Default)]
pub struct MessageHistory {
    messages: Vec<Message>,
    system_prompt: Option<String>,
}

impl MessageHistory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_system_prompt(prompt: impl Into<String>) -> Self {
        Self {
            messages: vec![],
            system_prompt: Some(prompt.into()),
        }
    }

    pub fn set_system_prompt(&mut self, prompt: impl Into<String>) {
        self.system_prompt = Some(prompt.into());
    }

    pub fn system_prompt(&self) -> Option<&str> {
        self.system_prompt.as_deref()
    }

    pub fn add_user(&mut self, content: impl Into<String>) {
        self.messages.push(Message::user(content));
    }

    pub fn add_assistant(&mut self, content: impl Into<String>) {
        self.messages.push(Message::assistant(content));
    }

    pub fn add_assistant_with_tools(
        &mut self,
        content: impl Into<String>,
        tool_calls: Vec<ToolCall>,
    ) {
        self.messages
            .push(Message::assistant_with_tools(content, tool_calls));
    }

    /// Answer a tool call; `is_error` marks rejected or failed calls
    pub fn add_tool_result(
        &mut self,
        tool_call_id: impl Into<String>,
        content: impl Into<String>,
        is_error: bool,
    ) {
        self.messages
            .push(Message::tool_result(tool_call_id, content, is_error));
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    /// Owned copy handed to the provider each turn
    pub fn to_messages(&self) -> Vec<Message> {
        self.messages.clone()
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    pub fn last(&self) -> Option<&Message> {
        self.messages.last()
    }

    /// Text of the most recent assistant message that said something
    pub fn last_assistant_text(&self) -> Option<&str> {
        self.messages
            .iter()
            .rev()
            .filter(|m| m.role == MessageRole::Assistant)
            .map(|m| m.content.as_str())
            .find(|content| !content.trim().is_empty())
    }

    /// Number of tool results recorded so far
    pub fn tool_result_count(&self) -> usize {
        self.messages
            .iter()
            .filter(|m| m.tool_result.is_some())
            .count()
    }
}
