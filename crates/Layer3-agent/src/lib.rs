//! # scout-agent
//!
//! The agent driver for scout: a single flat tool loop over one provider.
//!
//! ## Components
//!
//! - **Agent**: turn-bounded loop; tools run sequentially through the registry
//! - **MessageHistory**: the conversation of one run
//! - **Mode**: docs / code / mermaid / testing, each with its own system prompt
//! - **Rewriter**: optional second pass that polishes the final report
//!
//! ## Usage
//!
//! ```ignore
//! use scout_agent::{Agent, AgentConfig, Mode};
//!
//! let agent = Agent::new(provider, Arc::new(ToolRegistry::with_builtins()), ctx,
//!     AgentConfig::for_mode(Mode::Code));
//!
//! let (tx, mut rx) = tokio::sync::mpsc::channel(100);
//! let run = agent.with_events(tx).run("Where is the login handled?").await?;
//! println!("{}", run.output);
//! ```

pub mod agent;
pub mod history;
pub mod mode;
pub mod prompts;
pub mod rewrite;

#[cfg(test)]
mod test_support;

pub use agent::{Agent, AgentConfig, AgentEvent, AgentRun};
pub use history::MessageHistory;
pub use mode::{resolve_request, Mode, DEFAULT_DOCS_REQUEST};
pub use rewrite::{strip_markdown, Rewrite, Rewriter};

pub use scout_foundation::{Error, Result};
