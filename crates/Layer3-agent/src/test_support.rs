//! Scripted provider for agent tests

use async_trait::async_trait;
use scout_provider::{
    FinishReason, Message, ModelInfo, Provider, ProviderError, ProviderMetadata,
    ProviderResponse, TokenUsage, ToolCall, ToolDef,
};
use serde_json::Value;
use std::collections::VecDeque;
use tokio::sync::Mutex;

/// What the provider was asked on one turn
#[derive(Debug, Clone)]
pub struct RecordedCall {
    pub messages: Vec<Message>,
    pub tool_names: Vec<String>,
    pub system_prompt: String,
}

/// Replays canned responses in order and records every request
pub struct ScriptedProvider {
    metadata: ProviderMetadata,
    model: ModelInfo,
    script: Mutex<VecDeque<ProviderResponse>>,
    calls: Mutex<Vec<RecordedCall>>,
}

impl ScriptedProvider {
    pub fn new(script: Vec<ProviderResponse>) -> Self {
        let model = ModelInfo::new("o4-mini", "scripted");
        Self {
            metadata: ProviderMetadata {
                id: "scripted".into(),
                display_name: "Scripted".into(),
                models: vec![model.clone()],
                default_model: model.id.clone(),
                api_key_env: String::new(),
                base_url: String::new(),
            },
            model,
            script: Mutex::new(script.into()),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub async fn calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().await.clone()
    }
}

#[async_trait]
impl Provider for ScriptedProvider {
    fn metadata(&self) -> &ProviderMetadata {
        &self.metadata
    }

    fn model(&self) -> &ModelInfo {
        &self.model
    }

    async fn complete(
        &self,
        messages: Vec<Message>,
        tools: Vec<ToolDef>,
        system_prompt: Option<String>,
    ) -> Result<ProviderResponse, ProviderError> {
        self.calls.lock().await.push(RecordedCall {
            messages,
            tool_names: tools.into_iter().map(|t| t.name).collect(),
            system_prompt: system_prompt.unwrap_or_default(),
        });
        self.script
            .lock()
            .await
            .pop_front()
            .ok_or_else(|| ProviderError::Unknown("script exhausted".into()))
    }
}

pub fn text(content: &str, input_tokens: u64, output_tokens: u64) -> ProviderResponse {
    ProviderResponse {
        content: content.to_string(),
        usage: TokenUsage {
            input_tokens,
            output_tokens,
            ..Default::default()
        },
        finish_reason: FinishReason::Stop,
        model: "o4-mini-2025-04-16".into(),
        ..Default::default()
    }
}

/// A tool-calling turn costing 5 input and 2 output tokens
pub fn tool_calls(calls: Vec<(&str, &str, Value)>) -> ProviderResponse {
    ProviderResponse {
        tool_calls: calls
            .into_iter()
            .map(|(id, name, args)| ToolCall::new(id, name, args))
            .collect(),
        usage: TokenUsage {
            input_tokens: 5,
            output_tokens: 2,
            ..Default::default()
        },
        finish_reason: FinishReason::ToolUse,
        model: "o4-mini-2025-04-16".into(),
        ..Default::default()
    }
}
