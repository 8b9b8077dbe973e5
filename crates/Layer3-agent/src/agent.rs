//! Core agent loop
//!
//! One run is a flat `while (tool calls)` loop: ask the provider, execute the
//! requested tools one after another, feed the results back, repeat until the
//! model answers in plain text or the turn budget runs out.

use crate::history::MessageHistory;
use crate::mode::Mode;
use scout_core::{RuntimeContext, ToolDefinition, ToolRegistry};
use scout_foundation::config::DEFAULT_MAX_TURNS;
use scout_foundation::{Result, TokenUsage, ToolContext};
use scout_provider::{Provider, ToolCall, ToolDef};
use std::sync::Arc;
use std::time::Instant;
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

/// Events emitted by the agent during a run
#[derive(Debug, Clone, PartialEq)]
pub enum AgentEvent {
    /// A provider request for turn `turn` (1-based) is about to be sent
    Thinking { turn: usize },

    /// Text returned by the model in a turn
    Text(String),

    ToolStart {
        tool_name: String,
        tool_call_id: String,
    },

    ToolComplete {
        tool_name: String,
        tool_call_id: String,
        result: String,
        success: bool,
    },

    /// Usage of a single turn
    Usage(TokenUsage),

    Done {
        full_response: String,
        truncated: bool,
    },
}

#[derive(Debug, Clone)]
pub struct AgentConfig {
    /// Display name, e.g. "Docs Agent"
    pub name: String,
    pub system_prompt: String,
    /// Provider round trips allowed before the run is cut short
    pub max_turns: usize,
}

impl AgentConfig {
    pub fn new(name: impl Into<String>, system_prompt: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            system_prompt: system_prompt.into(),
            max_turns: DEFAULT_MAX_TURNS,
        }
    }

    pub fn for_mode(mode: Mode) -> Self {
        Self::new(mode.agent_name(), mode.system_prompt())
    }

    pub fn with_max_turns(mut self, max_turns: usize) -> Self {
        self.max_turns = max_turns;
        self
    }
}

/// Outcome of [`Agent::run`]
#[derive(Debug, Clone, Default)]
pub struct AgentRun {
    /// Final answer text
    pub output: String,
    /// Accumulated over every turn
    pub usage: TokenUsage,
    pub turns: usize,
    pub tool_calls: usize,
    /// The turn budget ran out before a plain-text answer
    pub truncated: bool,
    /// Model reported by the last response
    pub model: String,
}

pub struct Agent {
    provider: Arc<dyn Provider>,
    tools: Arc<ToolRegistry>,
    ctx: RuntimeContext,
    config: AgentConfig,
    events: Option<mpsc::Sender<AgentEvent>>,
}

impl Agent {
    pub fn new(
        provider: Arc<dyn Provider>,
        tools: Arc<ToolRegistry>,
        ctx: RuntimeContext,
        config: AgentConfig,
    ) -> Self {
        Self {
            provider,
            tools,
            ctx,
            config,
            events: None,
        }
    }

    /// Publish progress on `tx`; a closed receiver is ignored
    pub fn with_events(mut self, tx: mpsc::Sender<AgentEvent>) -> Self {
        self.events = Some(tx);
        self
    }

    pub fn config(&self) -> &AgentConfig {
        &self.config
    }

    /// Run the agent on a single request
    pub async fn run(&self, request: &str) -> Result<AgentRun> {
        let started = Instant::now();
        let mut history = MessageHistory::with_system_prompt(&self.config.system_prompt);
        history.add_user(request);

        let tools = tool_defs(&self.tools.definitions());
        let mut run = AgentRun {
            model: self.provider.model().id.clone(),
            ..Default::default()
        };

        info!(
            agent = %self.config.name,
            model = %run.model,
            session = %self.ctx.session_id(),
            "Starting agent run"
        );

        let mut answer = None;
        while run.turns < self.config.max_turns {
            run.turns += 1;
            self.emit(AgentEvent::Thinking { turn: run.turns }).await;

            let response = self
                .provider
                .complete(
                    history.to_messages(),
                    tools.clone(),
                    history.system_prompt().map(str::to_string),
                )
                .await?;

            run.usage += response.usage;
            if !response.model.is_empty() {
                run.model = response.model.clone();
            }
            self.emit(AgentEvent::Usage(response.usage)).await;

            if !response.content.is_empty() {
                self.emit(AgentEvent::Text(response.content.clone())).await;
            }

            if !response.has_tool_calls() {
                history.add_assistant(&response.content);
                answer = Some(response.content);
                break;
            }

            debug!(
                turn = run.turns,
                calls = response.tool_calls.len(),
                "Model requested tools"
            );
            history.add_assistant_with_tools(&response.content, response.tool_calls.clone());

            for call in &response.tool_calls {
                let (content, success) = self.execute_tool(call).await;
                history.add_tool_result(&call.id, content, !success);
                run.tool_calls += 1;
            }
        }

        run.output = match answer {
            Some(text) => text,
            None => {
                warn!(
                    max_turns = self.config.max_turns,
                    "Max turns reached, keeping the last assistant text"
                );
                run.truncated = true;
                history.last_assistant_text().unwrap_or_default().to_string()
            }
        };

        info!(
            turns = run.turns,
            tool_calls = run.tool_calls,
            input_tokens = run.usage.input_tokens,
            output_tokens = run.usage.output_tokens,
            elapsed_ms = started.elapsed().as_millis() as u64,
            "Agent finished"
        );

        self.emit(AgentEvent::Done {
            full_response: run.output.clone(),
            truncated: run.truncated,
        })
        .await;

        Ok(run)
    }

    /// Execute one tool call; failures come back as text for the model
    async fn execute_tool(&self, call: &ToolCall) -> (String, bool) {
        self.emit(AgentEvent::ToolStart {
            tool_name: call.name.clone(),
            tool_call_id: call.id.clone(),
        })
        .await;

        let result = self
            .tools
            .execute(&call.name, call.arguments.clone(), &self.ctx)
            .await;
        let content = result.text().to_string();

        self.emit(AgentEvent::ToolComplete {
            tool_name: call.name.clone(),
            tool_call_id: call.id.clone(),
            result: content.clone(),
            success: result.success,
        })
        .await;

        (content, result.success)
    }

    async fn emit(&self, event: AgentEvent) {
        if let Some(tx) = &self.events {
            let _ = tx.send(event).await;
        }
    }
}

fn tool_defs(definitions: &[ToolDefinition]) -> Vec<ToolDef> {
    definitions
        .iter()
        .map(|def| ToolDef::from_schema(&def.name, &def.description, &def.parameters))
        .collect()
}
