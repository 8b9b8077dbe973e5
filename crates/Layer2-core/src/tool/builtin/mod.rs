//! Builtin Tools
//!
//! The five read-only tools offered to the agent:
//!
//! - `list_files` - directory listing, optionally recursive
//! - `read_file` - whole file contents
//! - `search_file` - regex search within one file, with context
//! - `get_git_remotes` - `git remote -v`
//! - `get_project_structure` - tree summary plus a project-type guess
//!
//! Every path argument goes through [`PathGuard`] before the filesystem is
//! touched. Rejections come back as failed results carrying the rejection
//! sentence; the agent reads them and may try again.

mod git_remotes;
mod list_files;
mod project_structure;
mod read_file;
mod search_file;

pub use git_remotes::GitRemotesTool;
pub use list_files::ListFilesTool;
pub use project_structure::ProjectStructureTool;
pub use read_file::ReadFileTool;
pub use search_file::SearchFileTool;

use crate::inspect::Rejection;
use crate::tool::security::PathGuard;
use scout_foundation::{Error, Result, Tool, ToolContext, ToolResult};
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::sync::Arc;
use tracing::{debug, warn};

/// One instance of every builtin tool
pub fn all_tools() -> Vec<Arc<dyn Tool>> {
    vec![
        Arc::new(ListFilesTool::new()) as Arc<dyn Tool>,
        Arc::new(ReadFileTool::new()),
        Arc::new(SearchFileTool::new()),
        Arc::new(GitRemotesTool::new()),
        Arc::new(ProjectStructureTool::new()),
    ]
}

/// Decode tool arguments. A JSON `null` is treated as an empty object.
pub(crate) fn parse_input<T: DeserializeOwned>(tool: &str, input: Value) -> Result<T> {
    let input = if input.is_null() {
        Value::Object(Default::default())
    } else {
        input
    };
    serde_json::from_value(input)
        .map_err(|e| Error::InvalidInput(format!("{}: invalid arguments: {}", tool, e)))
}

/// Guard rooted at the context's working directory
pub(crate) fn guard_for(tool: &str, ctx: &dyn ToolContext) -> std::result::Result<PathGuard, ToolResult> {
    PathGuard::new(ctx.working_dir()).map_err(|e| {
        warn!(tool, "working directory {} unusable: {}", ctx.working_dir().display(), e);
        ToolResult::error(Rejection::FORBIDDEN)
    })
}

/// Turn a rejection into the failed result the agent sees
pub(crate) fn rejected(tool: &str, rejection: Rejection) -> ToolResult {
    debug!(tool, detail = %rejection.detail(), "input rejected");
    ToolResult::error(rejection.to_string())
}
