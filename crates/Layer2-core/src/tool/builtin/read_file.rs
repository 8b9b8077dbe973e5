//! read_file - whole file contents

use super::{guard_for, parse_input, rejected};
use crate::inspect::read_file;
use async_trait::async_trait;
use scout_foundation::{Result, Tool, ToolContext, ToolMeta, ToolResult};
use serde::Deserialize;
use serde_json::{json, Value};

#[derive(Debug, Deserialize)]
pub struct ReadFileInput {
    #[serde(alias = "file_path", alias = "file")]
    pub path: String,
}

pub struct ReadFileTool;

impl ReadFileTool {
    pub const NAME: &'static str = "read_file";

    pub fn new() -> Self {
        Self
    }
}

impl Default for ReadFileTool {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Tool for ReadFileTool {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn meta(&self) -> ToolMeta {
        ToolMeta::new(Self::NAME)
            .display_name("Read File")
            .description("Read the full text of a file in the project.")
            .category("filesystem")
    }

    fn schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "path": {
                    "type": "string",
                    "description": "File path relative to the project root"
                }
            },
            "required": ["path"]
        })
    }

    async fn execute(&self, input: Value, context: &dyn ToolContext) -> Result<ToolResult> {
        let input: ReadFileInput = parse_input(Self::NAME, input)?;
        let guard = match guard_for(Self::NAME, context) {
            Ok(guard) => guard,
            Err(result) => return Ok(result),
        };

        Ok(match read_file(&guard, &input.path) {
            Ok(content) => ToolResult::success(content),
            Err(rejection) => rejected(Self::NAME, rejection),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::inspect::README_STUB;
    use crate::tool::RuntimeContext;
    use std::fs;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_read_and_alias() {
        let temp = TempDir::new().unwrap();
        fs::create_dir(temp.path().join("src")).unwrap();
        fs::write(temp.path().join("src/lib.rs"), "pub fn f() {}\n").unwrap();
        let ctx = RuntimeContext::new(temp.path());

        let result = ReadFileTool::new()
            .execute(json!({"path": "src/lib.rs"}), &ctx)
            .await
            .unwrap();
        assert_eq!(result.output, "pub fn f() {}\n");

        let result = ReadFileTool::new()
            .execute(json!({"file_path": "./src/lib.rs"}), &ctx)
            .await
            .unwrap();
        assert_eq!(result.output, "pub fn f() {}\n");
    }

    #[tokio::test]
    async fn test_readme_stub() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("README.md"), "# Real readme").unwrap();
        let ctx = RuntimeContext::new(temp.path());

        let result = ReadFileTool::new()
            .execute(json!({"path": "README.md"}), &ctx)
            .await
            .unwrap();
        assert_eq!(result.output, README_STUB);
    }

    #[tokio::test]
    async fn test_rejections() {
        let temp = TempDir::new().unwrap();
        let ctx = RuntimeContext::new(temp.path());
        let tool = ReadFileTool::new();

        let result = tool.execute(json!({"path": "/etc/passwd"}), &ctx).await.unwrap();
        assert_eq!(result.text(), "Forbidden");

        let result = tool.execute(json!({"path": "missing.rs"}), &ctx).await.unwrap();
        assert_eq!(result.text(), "Not a valid file: missing.rs");

        fs::write(temp.path().join("main.rs"), "fn main() {}\n").unwrap();
        let result = tool.execute(json!({"path": "main.rs/x"}), &ctx).await.unwrap();
        assert_eq!(result.text(), "Not a valid file: main.rs/x");

        assert!(tool.execute(json!({}), &ctx).await.is_err());
    }
}
