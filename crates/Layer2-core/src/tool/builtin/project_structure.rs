//! get_project_structure - tree summary with a project-type estimate

use crate::structure::{summarize, ManifestDetector, ProjectDetector};
use async_trait::async_trait;
use scout_foundation::{Result, Tool, ToolContext, ToolMeta, ToolResult};
use serde_json::{json, Value};
use std::sync::Arc;

pub struct ProjectStructureTool {
    detector: Arc<dyn ProjectDetector>,
}

impl ProjectStructureTool {
    pub const NAME: &'static str = "get_project_structure";

    pub fn new() -> Self {
        Self::with_detector(Arc::new(ManifestDetector::new()))
    }

    /// Use a different language/framework heuristic
    pub fn with_detector(detector: Arc<dyn ProjectDetector>) -> Self {
        Self { detector }
    }
}

impl Default for ProjectStructureTool {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Tool for ProjectStructureTool {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn meta(&self) -> ToolMeta {
        ToolMeta::new(Self::NAME)
            .display_name("Project Structure")
            .description(
                "Summarize the project layout: top-level files, directories with \
                 their file counts, the estimated language and framework, and the \
                 total number of files. A good first call.",
            )
            .category("filesystem")
    }

    fn schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {}
        })
    }

    async fn execute(&self, _input: Value, context: &dyn ToolContext) -> Result<ToolResult> {
        let summary = summarize(context.working_dir(), self.detector.as_ref());
        Ok(ToolResult::success(summary.to_string())
            .with_metadata("total_files", json!(summary.total_files)))
    }
}
