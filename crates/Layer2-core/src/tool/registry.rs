//! Tool Registry - the tool surface offered to the agent
//!
//! ```ignore
//! let registry = ToolRegistry::with_builtins();
//! let result = registry
//!     .execute("read_file", json!({"path": "src/main.rs"}), &ctx)
//!     .await;
//! ```

use super::builtin;
use scout_foundation::{Tool, ToolContext, ToolEvent, ToolResult};
use serde_json::Value;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Instant;
use tracing::debug;

/// Name, description and input schema of a registered tool
#[derive(Debug, Clone, PartialEq)]
pub struct ToolDefinition {
    pub name: String,
    pub description: String,
    pub parameters: Value,
}

pub struct ToolRegistry {
    tools: HashMap<String, Arc<dyn Tool>>,
}

impl ToolRegistry {
    pub fn new() -> Self {
        Self {
            tools: HashMap::new(),
        }
    }

    /// Registry with the five builtin tools
    pub fn with_builtins() -> Self {
        let mut registry = Self::new();
        registry.register_all(builtin::all_tools());
        registry
    }

    pub fn register(&mut self, tool: Arc<dyn Tool>) {
        let name = tool.name().to_string();
        self.tools.insert(name, tool);
    }

    pub fn register_all(&mut self, tools: Vec<Arc<dyn Tool>>) {
        for tool in tools {
            self.register(tool);
        }
    }

    pub fn get(&self, name: &str) -> Option<Arc<dyn Tool>> {
        self.tools.get(name).cloned()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.tools.contains_key(name)
    }

    /// Sorted tool names
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.tools.keys().map(|s| s.as_str()).collect();
        names.sort_unstable();
        names
    }

    pub fn len(&self) -> usize {
        self.tools.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }

    /// Definitions in name order, ready to be turned into provider tool specs
    pub fn definitions(&self) -> Vec<ToolDefinition> {
        self.names()
            .into_iter()
            .filter_map(|name| self.tools.get(name))
            .map(|tool| ToolDefinition {
                name: tool.name().to_string(),
                description: tool.meta().description,
                parameters: tool.schema(),
            })
            .collect()
    }

    /// Run one tool call and report it to the context's observer.
    ///
    /// Never fails: unknown tools and tool faults become failed results whose
    /// text is handed back to the model.
    pub async fn execute(&self, name: &str, input: Value, ctx: &dyn ToolContext) -> ToolResult {
        let start = Instant::now();
        let observer = ctx.observer();
        observer.on_event(ToolEvent::started(name, ctx.session_id(), input.clone()));

        let result = match self.get(name) {
            Some(tool) => match tool.execute(input, ctx).await {
                Ok(result) => result,
                Err(e) => ToolResult::error(format!("Error: {}", e)),
            },
            None => ToolResult::error(format!("Tool not found: {}", name)),
        };

        if result.success {
            observer.on_event(ToolEvent::finished(name, ctx.session_id(), result.output.len()));
        } else {
            observer.on_event(ToolEvent::rejected(name, ctx.session_id(), result.text()));
        }

        debug!(
            "Tool '{}' executed in {}ms, success: {}",
            name,
            start.elapsed().as_millis(),
            result.success
        );

        result
    }
}

impl Default for ToolRegistry {
    fn default() -> Self {
        Self::new()
    }
}
