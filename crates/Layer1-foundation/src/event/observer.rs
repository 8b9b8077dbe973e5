//! Tool observers

use super::types::{ToolEvent, ToolEventKind};
use parking_lot::Mutex;
use tracing::{info, warn};

/// Receives every [`ToolEvent`] emitted while tools run
pub trait ToolObserver: Send + Sync {
    fn on_event(&self, event: ToolEvent);
}

/// Forwards events to `tracing`
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingObserver;

impl ToolObserver for TracingObserver {
    fn on_event(&self, event: ToolEvent) {
        let tool = event.tool.as_str();
        match &event.kind {
            ToolEventKind::Started { input } => {
                info!(tool, session = %event.session_id, %input, "tool call");
            }
            ToolEventKind::Finished { output_len } => {
                info!(tool, output_len, "tool finished");
            }
            ToolEventKind::Rejected { reason } => {
                info!(tool, %reason, "tool rejected input");
            }
            ToolEventKind::Degraded { reason } => {
                warn!(tool, %reason, "tool degraded");
            }
        }
    }
}

/// Drops everything
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopObserver;

impl ToolObserver for NoopObserver {
    fn on_event(&self, _event: ToolEvent) {}
}

/// Keeps events in memory
#[derive(Debug, Default)]
pub struct RecordingObserver {
    events: Mutex<Vec<ToolEvent>>,
}

impl RecordingObserver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> Vec<ToolEvent> {
        self.events.lock().clone()
    }

    /// Tool names in call order, one entry per `Started` event
    pub fn tool_names(&self) -> Vec<String> {
        self.events
            .lock()
            .iter()
            .filter(|e| matches!(e.kind, ToolEventKind::Started { .. }))
            .map(|e| e.tool.clone())
            .collect()
    }

    pub fn rejections(&self) -> Vec<String> {
        self.events
            .lock()
            .iter()
            .filter_map(|e| match &e.kind {
                ToolEventKind::Rejected { reason } => Some(reason.clone()),
                _ => None,
            })
            .collect()
    }

    pub fn clear(&self) {
        self.events.lock().clear();
    }
}

impl ToolObserver for RecordingObserver {
    fn on_event(&self, event: ToolEvent) {
        self.events.lock().push(event);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_recording_observer_keeps_order() {
        let observer = RecordingObserver::new();
        observer.on_event(ToolEvent::started("list_files", "s1", json!({"directory": "."})));
        observer.on_event(ToolEvent::finished("list_files", "s1", 12));
        observer.on_event(ToolEvent::started("read_file", "s1", json!({"path": "../etc"})));
        observer.on_event(ToolEvent::rejected("read_file", "s1", "parent traversal"));

        assert_eq!(observer.tool_names(), vec!["list_files", "read_file"]);
        assert_eq!(observer.rejections(), vec!["parent traversal"]);
        assert_eq!(observer.events().len(), 4);
        assert!(observer.events()[3].is_rejection());

        observer.clear();
        assert!(observer.events().is_empty());
    }

    #[test]
    fn test_event_serializes_with_kind_tag() {
        let event = ToolEvent::degraded("get_git_remotes", "s1", "git not found");
        let value = serde_json::to_value(&event).unwrap();
        assert_eq!(value["kind"]["kind"], "degraded");
        assert_eq!(value["tool"], "get_git_remotes");
    }
}
