//! Provider trait and common types

use crate::error::ProviderError;
use crate::{Message, ToolCall, ToolDef};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

pub use scout_foundation::TokenUsage;

/// Static facts about a model
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelInfo {
    pub id: String,
    pub provider: String,
    pub display_name: String,
    pub context_window: u32,
    pub max_output_tokens: u32,
    pub supports_tools: bool,
    /// o-series reasoning models
    pub supports_reasoning: bool,
}

impl ModelInfo {
    pub fn new(id: impl Into<String>, provider: impl Into<String>) -> Self {
        let id = id.into();
        Self {
            display_name: id.clone(),
            id,
            provider: provider.into(),
            context_window: 128_000,
            max_output_tokens: 16_384,
            supports_tools: true,
            supports_reasoning: false,
        }
    }
}

#[derive(Debug, Clone)]
pub struct ProviderMetadata {
    pub id: String,
    pub display_name: String,
    pub models: Vec<ModelInfo>,
    pub default_model: String,
    /// Environment variable holding the API key
    pub api_key_env: String,
    pub base_url: String,
}

/// Chat-completion backend
#[async_trait]
pub trait Provider: Send + Sync {
    fn metadata(&self) -> &ProviderMetadata;

    fn model(&self) -> &ModelInfo;

    /// Send the conversation and wait for the whole answer
    async fn complete(
        &self,
        messages: Vec<Message>,
        tools: Vec<ToolDef>,
        system_prompt: Option<String>,
    ) -> Result<ProviderResponse, ProviderError>;
}

/// One complete answer
#[derive(Debug, Clone, Default)]
pub struct ProviderResponse {
    pub content: String,
    pub tool_calls: Vec<ToolCall>,
    pub usage: TokenUsage,
    pub finish_reason: FinishReason,
    /// Model that actually answered
    pub model: String,
}

impl ProviderResponse {
    pub fn has_tool_calls(&self) -> bool {
        !self.tool_calls.is_empty()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum FinishReason {
    Stop,
    /// Hit the completion token limit
    MaxTokens,
    ToolUse,
    ContentFilter,
    #[default]
    Other,
}

impl FinishReason {
    /// OpenAI `finish_reason` string
    pub fn from_api(reason: Option<&str>) -> Self {
        match reason {
            Some("stop") => FinishReason::Stop,
            Some("length") => FinishReason::MaxTokens,
            Some("tool_calls") | Some("function_call") => FinishReason::ToolUse,
            Some("content_filter") => FinishReason::ContentFilter,
            _ => FinishReason::Other,
        }
    }
}
