//! Core Module - shared tool interfaces and types
//!
//! - `types.rs`: plain data (TokenUsage)
//! - `traits.rs`: interfaces implemented by higher layers (Tool, ToolContext)
//!
//! ```text
//! ┌──────────────────────────────────────────────┐
//! │  Layer3-agent: Agent loop                    │
//! │         │ execute(name, input, ctx)          │
//! │         ▼                                    │
//! │  Layer2-core: ToolRegistry ── builtin tools  │
//! │         │                                    │
//! │         ▼                                    │
//! │  PathGuard ── filesystem / git subprocess    │
//! └──────────────────────────────────────────────┘
//! ```

mod traits;
mod types;

pub use traits::{Tool, ToolContext, ToolExecutionResult, ToolMeta, ToolResult};
pub use types::TokenUsage;
