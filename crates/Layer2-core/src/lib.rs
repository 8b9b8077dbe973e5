//! scout-core: the read-only toolbox behind the documentation agent
//!
//! Layer2 - everything the agent can do to the codebase it documents.
//!
//! # Modules
//!
//! - `tool`: tool registry, runtime context, path guard, builtin tools
//! - `inspect`: list/read/search/git operations the tools wrap
//! - `structure`: project tree summary and language/framework estimate
//! - `diagram`: Mermaid block sanitizer for diagram output
//!
//! ```ignore
//! use scout_core::{RuntimeContext, ToolRegistry};
//!
//! let registry = ToolRegistry::with_builtins();
//! let ctx = RuntimeContext::new(".");
//! let result = registry
//!     .execute("search_file", json!({"path": "src/main.rs", "pattern": "fn main"}), &ctx)
//!     .await;
//! ```

pub mod diagram;
pub mod inspect;
pub mod structure;
pub mod tool;

// Re-exports: Tool
pub use tool::{
    all_tools, is_unsafe, GitRemotesTool, ListFilesTool, PathGuard, PathValidation,
    ProjectStructureTool, ReadFileTool, RuntimeContext, SearchFileTool, Tool, ToolContext,
    ToolDefinition, ToolRegistry,
};

// Re-exports: Inspector
pub use inspect::{InspectResult, Rejection};

// Re-exports: Structure
pub use structure::{
    summarize, ManifestDetector, ProjectDetector, ProjectSummary, ProjectType, StructureNode,
    SummaryEntry,
};

// Re-exports: Diagram
pub use diagram::sanitize;

// Layer1 re-exports
pub use scout_foundation::{Error, Result};

/// Layer2 version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
