//! OpenAI chat-completions provider

use crate::{
    error::ProviderError,
    r#trait::{FinishReason, ModelInfo, Provider, ProviderMetadata, ProviderResponse, TokenUsage},
    retry::{with_retry, RetryConfig},
    Message, MessageRole, ToolCall, ToolDef,
};
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, warn};

pub const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";
pub const API_KEY_ENV: &str = "OPENAI_API_KEY";
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(300);

pub struct OpenAiProvider {
    client: Client,
    api_key: String,
    model_info: ModelInfo,
    metadata: ProviderMetadata,
    /// `max_completion_tokens`; unset lets the API decide
    max_tokens: Option<u32>,
    retry: RetryConfig,
}

impl OpenAiProvider {
    pub fn new(api_key: impl Into<String>, model: impl Into<String>) -> Result<Self, ProviderError> {
        let model_id = model.into();
        Ok(Self {
            client: build_client(DEFAULT_TIMEOUT)?,
            api_key: api_key.into(),
            model_info: Self::get_model_info(&model_id),
            metadata: Self::create_metadata(DEFAULT_BASE_URL),
            max_tokens: None,
            retry: RetryConfig::default(),
        })
    }

    /// OpenAI-compatible endpoint, e.g. `http://localhost:8080/v1`
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.metadata.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Result<Self, ProviderError> {
        self.client = build_client(timeout)?;
        Ok(self)
    }

    pub fn with_max_tokens(mut self, max_tokens: Option<u32>) -> Self {
        self.max_tokens = max_tokens;
        self
    }

    pub fn with_retry(mut self, retry: RetryConfig) -> Self {
        self.retry = retry;
        self
    }

    fn endpoint(&self) -> String {
        format!("{}/chat/completions", self.metadata.base_url)
    }

    fn create_metadata(base_url: &str) -> ProviderMetadata {
        ProviderMetadata {
            id: "openai".to_string(),
            display_name: "OpenAI".to_string(),
            models: ["o4-mini", "o3", "gpt-4.1", "gpt-4o"]
                .into_iter()
                .map(Self::get_model_info)
                .collect(),
            default_model: "o4-mini".to_string(),
            api_key_env: API_KEY_ENV.to_string(),
            base_url: base_url.to_string(),
        }
    }

    fn get_model_info(model_id: &str) -> ModelInfo {
        let known = |display: &str, context_window: u32, max_output_tokens: u32, reasoning: bool| {
            ModelInfo {
                id: model_id.to_string(),
                provider: "openai".to_string(),
                display_name: display.to_string(),
                context_window,
                max_output_tokens,
                supports_tools: true,
                supports_reasoning: reasoning,
            }
        };

        match model_id {
            "o4-mini" => known("o4-mini", 200_000, 100_000, true),
            "o3" => known("o3", 200_000, 100_000, true),
            "gpt-4.1" => known("GPT-4.1", 1_047_576, 32_768, false),
            "gpt-4o" => known("GPT-4o", 128_000, 16_384, false),
            _ => ModelInfo::new(model_id, "openai"),
        }
    }

    fn build_request(
        &self,
        messages: &[Message],
        tools: &[ToolDef],
        system_prompt: Option<&str>,
    ) -> OpenAiRequest {
        let mut api_messages: Vec<OpenAiMessage> = Vec::with_capacity(messages.len() + 1);

        if let Some(system) = system_prompt {
            api_messages.push(OpenAiMessage::text("system", system));
        }
        api_messages.extend(
            messages
                .iter()
                .filter(|m| system_prompt.is_none() || m.role != MessageRole::System)
                .map(OpenAiMessage::from),
        );

        let api_tools: Vec<OpenAiTool> = tools.iter().map(OpenAiTool::from).collect();

        OpenAiRequest {
            model: self.model_info.id.clone(),
            messages: api_messages,
            max_completion_tokens: self.max_tokens,
            tools: if api_tools.is_empty() {
                None
            } else {
                Some(api_tools)
            },
        }
    }

    async fn send(&self, request: &OpenAiRequest) -> Result<OpenAiResponse, ProviderError> {
        let response = self
            .client
            .post(self.endpoint())
            .bearer_auth(&self.api_key)
            .json(request)
            .send()
            .await
            .map_err(|e| ProviderError::Network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(Self::parse_error_response(status, &body));
        }

        response
            .json()
            .await
            .map_err(|e| ProviderError::InvalidResponse(e.to_string()))
    }

    fn parse_error_response(status: reqwest::StatusCode, body: &str) -> ProviderError {
        if let Ok(error_response) = serde_json::from_str::<OpenAiErrorResponse>(body) {
            let error = error_response.error;
            let message = error.message;

            return match error.code.as_deref() {
                Some("rate_limit_exceeded") => {
                    ProviderError::from_http_status(429, &message)
                }
                Some("context_length_exceeded") => ProviderError::ContextLengthExceeded(message),
                Some("invalid_api_key") => ProviderError::Authentication(message),
                Some("insufficient_quota") => ProviderError::QuotaExceeded(message),
                Some("model_not_found") => ProviderError::ModelNotFound(message),
                Some("content_policy_violation") => ProviderError::ContentFiltered(message),
                _ => ProviderError::from_http_status(status.as_u16(), &message),
            };
        }

        ProviderError::from_http_status(status.as_u16(), body)
    }

    fn parse_response(&self, api_response: OpenAiResponse) -> Result<ProviderResponse, ProviderError> {
        let usage = api_response.usage.map(TokenUsage::from).unwrap_or_default();
        let model = api_response.model.unwrap_or_else(|| self.model_info.id.clone());

        let choice = api_response
            .choices
            .into_iter()
            .next()
            .ok_or_else(|| ProviderError::InvalidResponse("No choices in response".to_string()))?;

        let tool_calls = choice
            .message
            .tool_calls
            .unwrap_or_default()
            .into_iter()
            .map(|tc| {
                let args = tc.function.arguments_parsed();
                ToolCall::new(tc.id, tc.function.name, args)
            })
            .collect();

        Ok(ProviderResponse {
            content: choice.message.content.unwrap_or_default(),
            tool_calls,
            usage,
            finish_reason: FinishReason::from_api(choice.finish_reason.as_deref()),
            model,
        })
    }
}

fn build_client(timeout: Duration) -> Result<Client, ProviderError> {
    Client::builder()
        .timeout(timeout)
        .build()
        .map_err(|e| ProviderError::NotConfigured(format!("HTTP client: {}", e)))
}

#[async_trait]
impl Provider for OpenAiProvider {
    fn metadata(&self) -> &ProviderMetadata {
        &self.metadata
    }

    fn model(&self) -> &ModelInfo {
        &self.model_info
    }

    async fn complete(
        &self,
        messages: Vec<Message>,
        tools: Vec<ToolDef>,
        system_prompt: Option<String>,
    ) -> Result<ProviderResponse, ProviderError> {
        if self.api_key.trim().is_empty() {
            return Err(ProviderError::NotConfigured(format!("{} is empty", API_KEY_ENV)));
        }

        let request = self.build_request(&messages, &tools, system_prompt.as_deref());
        debug!(
            model = %request.model,
            messages = request.messages.len(),
            tools = tools.len(),
            "chat completion request"
        );

        let api_response = with_retry(&self.retry, "openai.complete", || self.send(&request)).await?;
        let response = self.parse_response(api_response)?;

        if response.finish_reason == FinishReason::MaxTokens {
            warn!("completion hit the token limit; answer may be cut short");
        }
        Ok(response)
    }
}

// ============================================================================
// Wire types
// ============================================================================

#[derive(Debug, Serialize)]
struct OpenAiRequest {
    model: String,
    messages: Vec<OpenAiMessage>,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_completion_tokens: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    tools: Option<Vec<OpenAiTool>>,
}

#[derive(Debug, Serialize)]
struct OpenAiMessage {
    role: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    content: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    tool_calls: Option<Vec<OpenAiToolCall>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    tool_call_id: Option<String>,
}

impl OpenAiMessage {
    fn text(role: &'static str, content: &str) -> Self {
        Self {
            role,
            content: Some(content.to_string()),
            tool_calls: None,
            tool_call_id: None,
        }
    }
}

impl From<&Message> for OpenAiMessage {
    fn from(msg: &Message) -> Self {
        if let Some(result) = &msg.tool_result {
            return OpenAiMessage {
                role: "tool",
                content: Some(result.content.clone()),
                tool_calls: None,
                tool_call_id: Some(result.tool_call_id.clone()),
            };
        }

        let role = match msg.role {
            MessageRole::User => "user",
            MessageRole::Assistant => "assistant",
            MessageRole::System => "system",
            MessageRole::Tool => "tool",
        };

        let tool_calls = msg
            .tool_calls
            .as_ref()
            .filter(|calls| !calls.is_empty())
            .map(|calls| {
                calls
                    .iter()
                    .map(|tc| OpenAiToolCall {
                        id: tc.id.clone(),
                        call_type: "function".to_string(),
                        function: OpenAiFunctionCall {
                            name: tc.name.clone(),
                            arguments: tc.arguments.to_string(),
                        },
                    })
                    .collect()
            });

        // assistant turns that only call tools carry no content
        let content = if msg.content.is_empty() && tool_calls.is_some() {
            None
        } else {
            Some(msg.content.clone())
        };

        OpenAiMessage {
            role,
            content,
            tool_calls,
            tool_call_id: None,
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
struct OpenAiToolCall {
    id: String,
    #[serde(rename = "type", default = "function_type")]
    call_type: String,
    function: OpenAiFunctionCall,
}

fn function_type() -> String {
    "function".to_string()
}

#[derive(Debug, Serialize, Deserialize)]
struct OpenAiFunctionCall {
    name: String,
    /// JSON text, as sent by the API
    arguments: String,
}

impl OpenAiFunctionCall {
    /// Unparseable arguments become `null`; the tool then rejects them
    fn arguments_parsed(&self) -> serde_json::Value {
        if self.arguments.trim().is_empty() {
            return serde_json::json!({});
        }
        serde_json::from_str(&self.arguments).unwrap_or_else(|e| {
            warn!(tool = %self.name, "unparseable tool arguments: {}", e);
            serde_json::Value::Null
        })
    }
}

#[derive(Debug, Serialize)]
struct OpenAiTool {
    #[serde(rename = "type")]
    tool_type: &'static str,
    function: OpenAiFunction,
}

#[derive(Debug, Serialize)]
struct OpenAiFunction {
    name: String,
    description: String,
    parameters: serde_json::Value,
}

impl From<&ToolDef> for OpenAiTool {
    fn from(tool: &ToolDef) -> Self {
        OpenAiTool {
            tool_type: "function",
            function: OpenAiFunction {
                name: tool.name.clone(),
                description: tool.description.clone(),
                parameters: tool.schema(),
            },
        }
    }
}

#[derive(Debug, Deserialize)]
struct OpenAiResponse {
    #[serde(default)]
    model: Option<String>,
    choices: Vec<OpenAiChoice>,
    #[serde(default)]
    usage: Option<OpenAiUsage>,
}

#[derive(Debug, Deserialize)]
struct OpenAiChoice {
    message: OpenAiResponseMessage,
    finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct OpenAiResponseMessage {
    content: Option<String>,
    tool_calls: Option<Vec<OpenAiToolCall>>,
}

#[derive(Debug, Deserialize)]
struct OpenAiUsage {
    prompt_tokens: u64,
    completion_tokens: u64,
    #[serde(default)]
    prompt_tokens_details: Option<PromptTokensDetails>,
    #[serde(default)]
    completion_tokens_details: Option<CompletionTokensDetails>,
}

#[derive(Debug, Deserialize)]
struct PromptTokensDetails {
    #[serde(default)]
    cached_tokens: u64,
}

#[derive(Debug, Deserialize)]
struct CompletionTokensDetails {
    #[serde(default)]
    reasoning_tokens: u64,
}

impl From<OpenAiUsage> for TokenUsage {
    fn from(usage: OpenAiUsage) -> Self {
        TokenUsage {
            input_tokens: usage.prompt_tokens,
            output_tokens: usage.completion_tokens,
            cache_read_tokens: usage.prompt_tokens_details.map_or(0, |d| d.cached_tokens),
            reasoning_tokens: usage.completion_tokens_details.map_or(0, |d| d.reasoning_tokens),
        }
    }
}

#[derive(Debug, Deserialize)]
struct OpenAiErrorResponse {
    error: OpenAiError,
}

#[derive(Debug, Deserialize)]
struct OpenAiError {
    message: String,
    #[serde(default)]
    code: Option<String>,
}
