//! Event System - observation of tool calls
//!
//! Tool calls are reported to a [`ToolObserver`] instead of being printed.
//! The CLI installs [`TracingObserver`]; tests install [`RecordingObserver`]
//! and assert on the recorded sequence.
//!
//! ```ignore
//! use scout_foundation::event::{RecordingObserver, ToolEventKind};
//!
//! let observer = RecordingObserver::new();
//! // ... run tools with a context that hands out `&observer` ...
//! assert_eq!(observer.tool_names(), vec!["get_project_structure", "read_file"]);
//! ```

mod observer;
mod types;

pub use observer::{NoopObserver, RecordingObserver, ToolObserver, TracingObserver};
pub use types::{ToolEvent, ToolEventKind};
