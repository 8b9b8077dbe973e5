//! Core Traits - the tool interface
//!
//! Layer2-core implements [`Tool`] for every builtin operation and provides a
//! concrete [`ToolContext`]. The agent only ever talks to tools through these
//! two traits.

use crate::event::ToolObserver;
use crate::Result;
use async_trait::async_trait;
use serde_json::Value;
use std::collections::HashMap;
use std::path::Path;
use std::time::Duration;

// ============================================================================
// Tool Meta
// ============================================================================

/// Descriptive data about a tool, shown to the model and in logs
#[derive(Debug, Clone)]
pub struct ToolMeta {
    /// Unique identifier
    pub name: String,
    pub display_name: String,
    pub description: String,
    /// filesystem, vcs, ...
    pub category: String,
}

impl ToolMeta {
    pub fn new(name: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            display_name: name.clone(),
            name,
            description: String::new(),
            category: "general".to_string(),
        }
    }

    pub fn display_name(mut self, name: impl Into<String>) -> Self {
        self.display_name = name.into();
        self
    }

    pub fn description(mut self, desc: impl Into<String>) -> Self {
        self.description = desc.into();
        self
    }

    pub fn category(mut self, cat: impl Into<String>) -> Self {
        self.category = cat.into();
        self
    }
}

// ============================================================================
// Tool Execution Result
// ============================================================================

/// Outcome of `Tool::execute()`
///
/// A failed result is still ordinary data: its text is handed back to the
/// model, which may retry with different arguments.
#[derive(Debug, Clone)]
pub struct ToolExecutionResult {
    pub success: bool,
    pub output: String,
    /// Set when `success` is false
    pub error: Option<String>,
    pub metadata: HashMap<String, Value>,
}

/// Short alias used throughout the tool code
pub type ToolResult = ToolExecutionResult;

impl ToolExecutionResult {
    pub fn success(output: impl Into<String>) -> Self {
        Self {
            success: true,
            output: output.into(),
            error: None,
            metadata: HashMap::new(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            success: false,
            output: String::new(),
            error: Some(message.into()),
            metadata: HashMap::new(),
        }
    }

    pub fn with_metadata(mut self, key: impl Into<String>, value: Value) -> Self {
        self.metadata.insert(key.into(), value);
        self
    }

    /// The text the model sees for this result
    pub fn text(&self) -> &str {
        if self.success {
            &self.output
        } else {
            self.error.as_deref().unwrap_or("Unknown error")
        }
    }
}

// ============================================================================
// Tool Trait
// ============================================================================

/// A read-only operation the agent can call
#[async_trait]
pub trait Tool: Send + Sync {
    /// Unique name used by the registry and in the model's tool calls
    fn name(&self) -> &str;

    fn meta(&self) -> ToolMeta;

    /// JSON schema of the input object
    fn schema(&self) -> Value;

    /// Run the tool.
    ///
    /// Rejected input (unsafe path, missing file, bad pattern) comes back as
    /// `Ok` with a failed [`ToolResult`]; `Err` is reserved for faults the
    /// tool could not describe to the model.
    async fn execute(&self, input: Value, context: &dyn ToolContext) -> Result<ToolResult>;
}

// ============================================================================
// Tool Context
// ============================================================================

/// Execution environment handed to every tool call
pub trait ToolContext: Send + Sync {
    /// Root of the tree the tools may look at. Every path argument is
    /// resolved against it and must stay inside it.
    fn working_dir(&self) -> &Path;

    fn session_id(&self) -> &str;

    /// Upper bound for the git subprocess
    fn git_timeout(&self) -> Duration;

    fn observer(&self) -> &dyn ToolObserver;
}
