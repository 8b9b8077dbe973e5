//! Event Types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// What happened to a tool call
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ToolEventKind {
    /// The call was dispatched with these arguments
    Started { input: Value },
    /// The tool produced output
    Finished { output_len: usize },
    /// The tool turned the input down (unsafe path, missing file, bad pattern)
    Rejected { reason: String },
    /// Environment failure the tool degraded from (git missing, timeout)
    Degraded { reason: String },
}

/// A single observation about a tool call
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolEvent {
    pub tool: String,
    pub session_id: String,
    pub kind: ToolEventKind,
    pub timestamp: DateTime<Utc>,
}

impl ToolEvent {
    pub fn new(tool: impl Into<String>, session_id: impl Into<String>, kind: ToolEventKind) -> Self {
        Self {
            tool: tool.into(),
            session_id: session_id.into(),
            kind,
            timestamp: Utc::now(),
        }
    }

    pub fn started(tool: impl Into<String>, session_id: impl Into<String>, input: Value) -> Self {
        Self::new(tool, session_id, ToolEventKind::Started { input })
    }

    pub fn finished(tool: impl Into<String>, session_id: impl Into<String>, output_len: usize) -> Self {
        Self::new(tool, session_id, ToolEventKind::Finished { output_len })
    }

    pub fn rejected(
        tool: impl Into<String>,
        session_id: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        Self::new(
            tool,
            session_id,
            ToolEventKind::Rejected {
                reason: reason.into(),
            },
        )
    }

    pub fn degraded(
        tool: impl Into<String>,
        session_id: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        Self::new(
            tool,
            session_id,
            ToolEventKind::Degraded {
                reason: reason.into(),
            },
        )
    }

    pub fn is_rejection(&self) -> bool {
        matches!(self.kind, ToolEventKind::Rejected { .. })
    }
}
