//! Tool Context - runtime implementation of Layer1 `ToolContext`
//!
//! ```ignore
//! let observer = Arc::new(RecordingObserver::new());
//! let ctx = RuntimeContext::new(temp.path())
//!     .with_observer(observer.clone())
//!     .with_git_timeout(Duration::from_secs(2));
//! ```

use scout_foundation::{ToolContext, ToolObserver, TracingObserver};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

const DEFAULT_GIT_TIMEOUT: Duration = Duration::from_secs(10);

/// Concrete [`ToolContext`] handed to every tool call of a run
#[derive(Clone)]
pub struct RuntimeContext {
    session_id: String,
    working_dir: PathBuf,
    git_timeout: Duration,
    observer: Arc<dyn ToolObserver>,
}

impl RuntimeContext {
    /// New context with a fresh session id and the tracing observer
    pub fn new(working_dir: impl Into<PathBuf>) -> Self {
        Self {
            session_id: uuid::Uuid::new_v4().to_string(),
            working_dir: working_dir.into(),
            git_timeout: DEFAULT_GIT_TIMEOUT,
            observer: Arc::new(TracingObserver),
        }
    }

    pub fn with_session_id(mut self, session_id: impl Into<String>) -> Self {
        self.session_id = session_id.into();
        self
    }

    pub fn with_git_timeout(mut self, timeout: Duration) -> Self {
        self.git_timeout = timeout;
        self
    }

    pub fn with_observer(mut self, observer: Arc<dyn ToolObserver>) -> Self {
        self.observer = observer;
        self
    }
}

impl ToolContext for RuntimeContext {
    fn working_dir(&self) -> &Path {
        &self.working_dir
    }

    fn session_id(&self) -> &str {
        &self.session_id
    }

    fn git_timeout(&self) -> Duration {
        self.git_timeout
    }

    fn observer(&self) -> &dyn ToolObserver {
        self.observer.as_ref()
    }
}

impl std::fmt::Debug for RuntimeContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RuntimeContext")
            .field("session_id", &self.session_id)
            .field("working_dir", &self.working_dir)
            .field("git_timeout", &self.git_timeout)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use scout_foundation::{RecordingObserver, ToolEvent};

    #[test]
    fn test_builder() {
        let observer = Arc::new(RecordingObserver::new());
        let ctx = RuntimeContext::new("/work")
            .with_session_id("s-1")
            .with_git_timeout(Duration::from_secs(1))
            .with_observer(observer.clone());

        assert_eq!(ctx.working_dir(), Path::new("/work"));
        assert_eq!(ctx.session_id(), "s-1");
        assert_eq!(ctx.git_timeout(), Duration::from_secs(1));

        ctx.observer()
            .on_event(ToolEvent::finished("list_files", ctx.session_id(), 0));
        assert_eq!(observer.events().len(), 1);
    }

    #[test]
    fn test_session_ids_are_unique() {
        let a = RuntimeContext::new(".");
        let b = RuntimeContext::new(".");
        assert_ne!(a.session_id(), b.session_id());
    }
}
