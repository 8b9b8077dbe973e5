//! search_file - regex search inside one file

use super::{guard_for, parse_input, rejected};
use crate::inspect::{context_lines, search_file};
use async_trait::async_trait;
use scout_foundation::{Result, Tool, ToolContext, ToolMeta, ToolResult};
use serde::Deserialize;
use serde_json::{json, Value};

#[derive(Debug, Deserialize)]
pub struct SearchFileInput {
    #[serde(alias = "file_path", alias = "file")]
    pub path: String,

    #[serde(alias = "regex", alias = "query")]
    pub pattern: String,

    /// Lines shown before each match; negative counts as zero
    #[serde(default, alias = "before")]
    pub before_context: Option<i64>,

    #[serde(default, alias = "after")]
    pub after_context: Option<i64>,
}

pub struct SearchFileTool;

impl SearchFileTool {
    pub const NAME: &'static str = "search_file";

    pub fn new() -> Self {
        Self
    }
}

impl Default for SearchFileTool {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Tool for SearchFileTool {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn meta(&self) -> ToolMeta {
        ToolMeta::new(Self::NAME)
            .display_name("Search File")
            .description(
                "Search one file for lines matching a regular expression. Each match \
                 is shown with its line number and optional surrounding lines; \
                 matches are separated by '---'.",
            )
            .category("filesystem")
    }

    fn schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "path": {
                    "type": "string",
                    "description": "File path relative to the project root"
                },
                "pattern": {
                    "type": "string",
                    "description": "Regular expression applied to each line"
                },
                "before_context": {
                    "type": "integer",
                    "description": "Lines to include before each match (default: 0)"
                },
                "after_context": {
                    "type": "integer",
                    "description": "Lines to include after each match (default: 0)"
                }
            },
            "required": ["path", "pattern"]
        })
    }

    async fn execute(&self, input: Value, context: &dyn ToolContext) -> Result<ToolResult> {
        let input: SearchFileInput = parse_input(Self::NAME, input)?;
        let guard = match guard_for(Self::NAME, context) {
            Ok(guard) => guard,
            Err(result) => return Ok(result),
        };

        let before = context_lines(input.before_context);
        let after = context_lines(input.after_context);

        Ok(
            match search_file(&guard, &input.path, &input.pattern, before, after) {
                Ok(matches) => ToolResult::success(matches.to_string())
                    .with_metadata("matches", json!(matches.len())),
                Err(rejection) => rejected(Self::NAME, rejection),
            },
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tool::RuntimeContext;
    use std::fs;
    use tempfile::TempDir;

    fn setup() -> TempDir {
        let temp = TempDir::new().unwrap();
        fs::write(
            temp.path().join("app.py"),
            "import os\n\ndef main():\n    run()\n\ndef run():\n    pass\n",
        )
        .unwrap();
        temp
    }

    #[tokio::test]
    async fn test_matches_with_context() {
        let temp = setup();
        let ctx = RuntimeContext::new(temp.path());

        let result = SearchFileTool::new()
            .execute(
                json!({"path": "app.py", "pattern": "^def ", "after_context": 1}),
                &ctx,
            )
            .await
            .unwrap();

        assert_eq!(
            result.output,
            "Line: 3 - def main():\nLine: 4 -     run()\n---\nLine: 6 - def run():\nLine: 7 -     pass"
        );
        assert_eq!(result.metadata["matches"], 2);
    }

    #[tokio::test]
    async fn test_negative_context_and_aliases() {
        let temp = setup();
        let ctx = RuntimeContext::new(temp.path());

        let result = SearchFileTool::new()
            .execute(
                json!({"file_path": "app.py", "regex": "import", "before": -4}),
                &ctx,
            )
            .await
            .unwrap();
        assert_eq!(result.output, "Line: 1 - import os");
    }

    #[tokio::test]
    async fn test_no_match_is_empty() {
        let temp = setup();
        let ctx = RuntimeContext::new(temp.path());

        let result = SearchFileTool::new()
            .execute(json!({"path": "app.py", "pattern": "class"}), &ctx)
            .await
            .unwrap();
        assert!(result.success);
        assert_eq!(result.output, "");
    }

    #[tokio::test]
    async fn test_rejections() {
        let temp = setup();
        let ctx = RuntimeContext::new(temp.path());
        let tool = SearchFileTool::new();

        let result = tool
            .execute(json!({"path": "app.py", "pattern": "(unclosed"}), &ctx)
            .await
            .unwrap();
        assert!(!result.success);
        assert!(result.text().starts_with("Invalid pattern '(unclosed': "));

        let result = tool
            .execute(json!({"path": "../app.py", "pattern": "x"}), &ctx)
            .await
            .unwrap();
        assert_eq!(result.text(), "Forbidden");

        let result = tool
            .execute(json!({"path": ".", "pattern": "x"}), &ctx)
            .await
            .unwrap();
        assert_eq!(result.text(), "Not a valid file: .");
    }
}
