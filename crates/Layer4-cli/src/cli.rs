//! One non-interactive run: agent, optional post-processing, report

use crate::cost::estimate_cost;
use crate::report;
use chrono::Local;
use scout_agent::{Agent, AgentConfig, AgentEvent, Mode, Rewriter};
use scout_core::{sanitize, RuntimeContext, ToolRegistry};
use scout_foundation::{ScoutConfig, TokenUsage};
use scout_provider::OpenAiProvider;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::mpsc;

/// Everything resolved from the command line for one run
#[derive(Debug, Clone)]
pub struct RunRequest {
    pub mode: Mode,
    pub request: String,
    pub api_key: String,
    pub rewrite_output: bool,
    pub output_file: Option<PathBuf>,
}

/// Run the agent over `working_dir` and write the report. Returns the report path.
pub async fn run_once(
    config: &ScoutConfig,
    working_dir: &Path,
    run: RunRequest,
) -> anyhow::Result<PathBuf> {
    let model = config.model().to_string();
    eprintln!("\n\n- Starting agent using {}...", model);
    let started = Instant::now();

    let provider = build_provider(config, &run.api_key, &model)?;
    let ctx = RuntimeContext::new(working_dir).with_git_timeout(config.git_timeout());
    let agent = Agent::new(
        Arc::new(provider),
        Arc::new(ToolRegistry::with_builtins()),
        ctx,
        AgentConfig::for_mode(run.mode).with_max_turns(config.max_turns()),
    );

    let (tx, rx) = mpsc::channel(100);
    let printer = tokio::spawn(print_events(rx));
    let result = agent.with_events(tx).run(&run.request).await;
    let _ = printer.await;
    let outcome = result?;

    eprintln!("\n\n- Agent finished");
    eprint!("{}", usage_report(&outcome.usage, &model, started.elapsed()));

    let mut output = outcome.output;
    if run.mode.sanitizes_diagrams() {
        output = sanitize(&output);
    }

    if run.rewrite_output {
        let rewrite_model = config.rewrite_model();
        eprintln!("\n\n- Rewriting output ...");
        let provider = build_provider(config, &run.api_key, rewrite_model)?;
        let rewrite = Rewriter::new(Arc::new(provider)).rewrite(&output).await?;
        eprintln!(
            "\n\n- Rewriting finished in {:.2} seconds",
            rewrite.elapsed.as_secs_f64()
        );
        eprint!("{}", usage_report(&rewrite.usage, rewrite_model, rewrite.elapsed));
        output = rewrite.text;
    }

    eprintln!("\n\n- Final output:\n");
    println!("{}", output);

    let path = report::output_path(
        working_dir,
        run.output_file.as_deref(),
        run.mode,
        &Local::now(),
    );
    report::write_report(&path, &output)?;
    eprintln!("\n- Report written to {}", path.display());
    Ok(path)
}

fn build_provider(
    config: &ScoutConfig,
    api_key: &str,
    model: &str,
) -> anyhow::Result<OpenAiProvider> {
    Ok(OpenAiProvider::new(api_key, model)?
        .with_base_url(config.base_url())
        .with_timeout(config.request_timeout())?
        .with_max_tokens(config.max_tokens))
}

async fn print_events(mut rx: mpsc::Receiver<AgentEvent>) {
    while let Some(event) = rx.recv().await {
        if let Some(line) = event_line(&event) {
            eprintln!("{}", line);
        }
    }
}

/// Progress line for an event, `None` for events that stay quiet
fn event_line(event: &AgentEvent) -> Option<String> {
    match event {
        AgentEvent::Thinking { turn } => Some(format!("- Turn {}", turn)),
        AgentEvent::ToolStart { tool_name, .. } => Some(format!("  [{}] Running...", tool_name)),
        AgentEvent::ToolComplete {
            tool_name,
            success,
            result,
            ..
        } => {
            let status = if *success { "✓" } else { "✗" };
            Some(format!("  [{}] {} {}", tool_name, status, truncate(result, 100)))
        }
        AgentEvent::Done {
            truncated: true, ..
        } => Some("- Turn limit reached, the answer may be incomplete".to_string()),
        AgentEvent::Text(_) | AgentEvent::Usage(_) | AgentEvent::Done { .. } => None,
    }
}

/// Usage block printed after each model pass
fn usage_report(usage: &TokenUsage, model: &str, elapsed: Duration) -> String {
    format!(
        "\n\n- Usage:\n  - Total input tokens: {}\n  - Total output tokens: {}\n  - Total cost: {}\n  - Total time taken: {:.2} seconds\n",
        usage.input_tokens,
        usage.output_tokens,
        estimate_cost(usage, model),
        elapsed.as_secs_f64()
    )
}

/// Single-line preview of at most `max_chars` characters
fn truncate(s: &str, max_chars: usize) -> String {
    let s = s.replace('\n', " ");
    if s.chars().count() <= max_chars {
        s
    } else {
        let head: String = s.chars().take(max_chars).collect();
        format!("{}...", head)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("a\nb", 10), "a b");
        assert_eq!(truncate("abcdef", 3), "abc...");
        assert_eq!(truncate("ééé", 2), "éé...");
    }

    #[test]
    fn test_event_lines() {
        assert_eq!(
            event_line(&AgentEvent::Thinking { turn: 2 }).as_deref(),
            Some("- Turn 2")
        );
        assert_eq!(
            event_line(&AgentEvent::ToolComplete {
                tool_name: "read_file".into(),
                tool_call_id: "call_1".into(),
                result: "Forbidden".into(),
                success: false,
            })
            .as_deref(),
            Some("  [read_file] ✗ Forbidden")
        );
        assert_eq!(event_line(&AgentEvent::Text("hi".into())), None);
        assert_eq!(
            event_line(&AgentEvent::Done {
                full_response: String::new(),
                truncated: false
            }),
            None
        );
        assert!(event_line(&AgentEvent::Done {
            full_response: String::new(),
            truncated: true
        })
        .is_some());
    }

    #[test]
    fn test_usage_report() {
        let usage = TokenUsage {
            input_tokens: 12_000,
            output_tokens: 3_000,
            ..Default::default()
        };
        assert_eq!(
            usage_report(&usage, "o4-mini", Duration::from_millis(4_250)),
            "\n\n- Usage:\n  - Total input tokens: 12000\n  - Total output tokens: 3000\n  - Total cost: $0.0480\n  - Total time taken: 4.25 seconds\n"
        );
        assert!(usage_report(&usage, "llama3", Duration::ZERO).contains("Total cost: Unknown model"));
    }
}
