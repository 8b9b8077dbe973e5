//! Project Structure Summarizer
//!
//! - `tree`: bounded directory tree with per-directory counts
//! - `detect`: pluggable language / framework guess

mod detect;
mod tree;

pub use detect::{ManifestDetector, ProjectDetector, ProjectType};
pub use tree::{summarize, ProjectSummary, StructureNode, SummaryEntry, STRUCTURE_EXCLUDES};
