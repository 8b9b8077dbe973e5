//! Rewrite pass - polish a finished report with a second model

use crate::prompts::{rewrite_request, REWRITE_INSTRUCTIONS};
use scout_foundation::{Result, TokenUsage};
use scout_provider::{Message, Provider};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{info, warn};

/// Result of one rewrite call
#[derive(Debug, Clone)]
pub struct Rewrite {
    pub text: String,
    pub usage: TokenUsage,
    pub model: String,
    pub elapsed: Duration,
}

/// Sends a report to a model without tools and returns the reworded text
pub struct Rewriter {
    provider: Arc<dyn Provider>,
}

impl Rewriter {
    pub fn new(provider: Arc<dyn Provider>) -> Self {
        Self { provider }
    }

    pub async fn rewrite(&self, original: &str) -> Result<Rewrite> {
        let started = Instant::now();
        let model = self.provider.model().id.clone();
        info!(model = %model, "Rewriting output");

        let response = self
            .provider
            .complete(
                vec![Message::user(rewrite_request(original))],
                Vec::new(),
                Some(REWRITE_INSTRUCTIONS.to_string()),
            )
            .await?;

        if response.has_tool_calls() {
            warn!("Rewrite model asked for tools, ignoring them");
        }

        Ok(Rewrite {
            text: strip_markdown(&response.content),
            usage: response.usage,
            model: if response.model.is_empty() {
                model
            } else {
                response.model
            },
            elapsed: started.elapsed(),
        })
    }
}

/// Drop an opening code fence on the first line and a closing fence on the last
pub fn strip_markdown(text: &str) -> String {
    let mut lines: Vec<&str> = text.split('\n').collect();
    if lines.first().map_or(false, |l| l.starts_with("```")) {
        lines.remove(0);
    }
    if lines.last().map_or(false, |l| l.ends_with("```")) {
        lines.pop();
    }
    lines.join("\n")
}
