//! list_files - directory listing

use super::{guard_for, parse_input, rejected};
use crate::inspect::{list_files, render_entries};
use async_trait::async_trait;
use scout_foundation::{Result, Tool, ToolContext, ToolMeta, ToolResult};
use serde::Deserialize;
use serde_json::{json, Value};

#[derive(Debug, Deserialize)]
pub struct ListFilesInput {
    /// Relative to the working directory
    #[serde(default = "default_directory", alias = "dir", alias = "path")]
    pub directory: String,

    #[serde(default)]
    pub recursive: bool,
}

fn default_directory() -> String {
    ".".to_string()
}

pub struct ListFilesTool;

impl ListFilesTool {
    pub const NAME: &'static str = "list_files";

    pub fn new() -> Self {
        Self
    }
}

impl Default for ListFilesTool {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Tool for ListFilesTool {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn meta(&self) -> ToolMeta {
        ToolMeta::new(Self::NAME)
            .display_name("List Files")
            .description(
                "List the files in a directory of the project, one path per line. \
                 Directories end with '/'. Set recursive to walk the whole subtree \
                 (dependency and build output directories are skipped).",
            )
            .category("filesystem")
    }

    fn schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "directory": {
                    "type": "string",
                    "description": "Directory relative to the project root (default: \".\")"
                },
                "recursive": {
                    "type": "boolean",
                    "description": "Include nested files (default: false)"
                }
            }
        })
    }

    async fn execute(&self, input: Value, context: &dyn ToolContext) -> Result<ToolResult> {
        let input: ListFilesInput = parse_input(Self::NAME, input)?;
        let guard = match guard_for(Self::NAME, context) {
            Ok(guard) => guard,
            Err(result) => return Ok(result),
        };

        match list_files(&guard, &input.directory, input.recursive) {
            Ok(entries) => Ok(ToolResult::success(render_entries(&entries))
                .with_metadata("count", json!(entries.len()))),
            Err(rejection) => Ok(rejected(Self::NAME, rejection)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tool::RuntimeContext;
    use std::fs;
    use tempfile::TempDir;

    fn project() -> TempDir {
        let temp = TempDir::new().unwrap();
        fs::create_dir_all(temp.path().join("src/bin")).unwrap();
        fs::create_dir_all(temp.path().join("node_modules/left-pad")).unwrap();
        fs::write(temp.path().join("Cargo.toml"), "[package]").unwrap();
        fs::write(temp.path().join("src/main.rs"), "fn main() {}").unwrap();
        fs::write(temp.path().join("src/bin/tool.rs"), "").unwrap();
        fs::write(temp.path().join("node_modules/left-pad/index.js"), "").unwrap();
        fs::write(temp.path().join(".env"), "SECRET=1").unwrap();
        temp
    }

    #[tokio::test]
    async fn test_lists_top_level() {
        let temp = project();
        let ctx = RuntimeContext::new(temp.path());

        let result = ListFilesTool::new().execute(json!({}), &ctx).await.unwrap();
        assert!(result.success);
        assert_eq!(result.output, "Cargo.toml\nnode_modules/\nsrc/");
    }

    #[tokio::test]
    async fn test_recursive_skips_excluded_dirs() {
        let temp = project();
        let ctx = RuntimeContext::new(temp.path());

        let result = ListFilesTool::new()
            .execute(json!({"directory": "src", "recursive": true}), &ctx)
            .await
            .unwrap();
        assert_eq!(result.output, "src/bin/\nsrc/bin/tool.rs\nsrc/main.rs");

        let result = ListFilesTool::new()
            .execute(json!({"recursive": true}), &ctx)
            .await
            .unwrap();
        assert!(!result.output.contains("node_modules"));
        assert!(!result.output.contains(".env"));
    }

    #[tokio::test]
    async fn test_rejections() {
        let temp = project();
        let ctx = RuntimeContext::new(temp.path());
        let tool = ListFilesTool::new();

        let result = tool.execute(json!({"directory": "../"}), &ctx).await.unwrap();
        assert_eq!(result.text(), "Forbidden");

        let result = tool.execute(json!({"dir": "docs"}), &ctx).await.unwrap();
        assert_eq!(result.text(), "Directory not found: docs");

        let result = tool.execute(json!({"path": "Cargo.toml"}), &ctx).await.unwrap();
        assert_eq!(result.text(), "Not a valid directory: Cargo.toml");
    }

    #[tokio::test]
    async fn test_bad_arguments_are_errors() {
        let temp = project();
        let ctx = RuntimeContext::new(temp.path());

        let err = ListFilesTool::new()
            .execute(json!({"recursive": "yes please"}), &ctx)
            .await
            .unwrap_err();
        assert!(err.to_string().contains("list_files"));
    }
}
