//! get_git_remotes - `git remote -v` of the working directory

use crate::inspect::git_remotes;
use async_trait::async_trait;
use scout_foundation::{Result, Tool, ToolContext, ToolEvent, ToolMeta, ToolResult};
use serde_json::{json, Value};

pub struct GitRemotesTool;

impl GitRemotesTool {
    pub const NAME: &'static str = "get_git_remotes";

    pub fn new() -> Self {
        Self
    }
}

impl Default for GitRemotesTool {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Tool for GitRemotesTool {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn meta(&self) -> ToolMeta {
        ToolMeta::new(Self::NAME)
            .display_name("Git Remotes")
            .description(
                "Show the git remotes of the project (output of `git remote -v`). \
                 Empty when the project is not a git repository.",
            )
            .category("vcs")
    }

    fn schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {}
        })
    }

    /// Any failure degrades to an empty result; the reason goes to the
    /// observer instead of the agent.
    async fn execute(&self, _input: Value, context: &dyn ToolContext) -> Result<ToolResult> {
        match git_remotes(context.working_dir(), context.git_timeout()).await {
            Ok(stdout) => Ok(ToolResult::success(stdout)),
            Err(e) => {
                context.observer().on_event(ToolEvent::degraded(
                    Self::NAME,
                    context.session_id(),
                    e.to_string(),
                ));
                Ok(ToolResult::success(""))
            }
        }
    }
}
