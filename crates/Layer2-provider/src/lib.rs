//! # scout-provider
//!
//! Chat-completion layer for scout.
//!
//! ## Features
//! - One non-streaming `complete()` call per agent turn
//! - Function/tool calling
//! - Automatic retry with exponential backoff
//! - OpenAI-compatible endpoint with a configurable base URL

pub mod error;
pub mod message;
pub mod providers;
pub mod retry;
pub mod tool_def;
pub mod r#trait;

// Core traits and types
pub use message::{Message, MessageRole, ToolCall, ToolResult};
pub use r#trait::{FinishReason, ModelInfo, Provider, ProviderMetadata, ProviderResponse, TokenUsage};
pub use tool_def::{ToolDef, ToolParameters};

// Error and retry
pub use error::ProviderError;
pub use retry::{with_retry, RetryConfig};

// Provider implementations
pub use providers::openai::OpenAiProvider;
