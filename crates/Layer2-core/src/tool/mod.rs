//! Tool System - the surface the agent calls into
//!
//! ```text
//! ┌──────────────────────────────────────────────────────┐
//! │  ToolRegistry                                         │
//! │  ├── definitions() - name/description/schema triples  │
//! │  └── execute(name, input, ctx) - run + observe        │
//! ├──────────────────────────────────────────────────────┤
//! │  RuntimeContext (ToolContext)                         │
//! │  ├── working_dir / session_id / git_timeout           │
//! │  └── observer                                         │
//! ├──────────────────────────────────────────────────────┤
//! │  PathGuard - containment check for every path arg     │
//! ├──────────────────────────────────────────────────────┤
//! │  Builtin tools                                        │
//! │  list_files, read_file, search_file,                  │
//! │  get_git_remotes, get_project_structure               │
//! └──────────────────────────────────────────────────────┘
//! ```

pub mod builtin;
mod context;
mod registry;
pub mod security;

pub use scout_foundation::{Tool, ToolContext};

pub use builtin::{
    all_tools, GitRemotesTool, ListFilesTool, ProjectStructureTool, ReadFileTool, SearchFileTool,
};
pub use context::RuntimeContext;
pub use registry::{ToolDefinition, ToolRegistry};
pub use security::{is_unsafe, PathGuard, PathValidation};
