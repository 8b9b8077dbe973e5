//! Filesystem Inspector - read-only operations behind the tool surface
//!
//! Each operation takes a [`PathGuard`] and the raw path string the agent
//! supplied, and returns either data or a [`Rejection`]. Rejections are the
//! agent-visible failure sentences; the builtin tools collapse them to text.
//!
//! - `list`: directory listing, plain or recursive
//! - `read`: whole-file read with the README stub rule
//! - `search`: per-line regex search with context
//! - `git`: `git remote -v` with a bounded timeout
//!
//! [`PathGuard`]: crate::tool::security::PathGuard

mod git;
mod list;
mod read;
mod search;

pub use git::{git_remotes, GitError};
pub use list::{list_files, render_entries, DirectoryEntry, EntryKind, LISTING_EXCLUDES};
pub use read::{read_file, README_STUB};
pub use search::{context_lines, search_file, MatchBlock, MatchLine, SearchMatches, BLOCK_SEPARATOR};

use crate::tool::security::{PathGuard, PathValidation};
use std::fmt;
use std::path::PathBuf;

/// Result of an inspector operation
pub type InspectResult<T> = std::result::Result<T, Rejection>;

/// Why an operation turned its input down
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Rejection {
    /// The path failed the containment check. The detail is for logs only;
    /// the agent sees the bare sentinel.
    Forbidden { detail: String },
    DirectoryNotFound { directory: String },
    NotADirectory { directory: String },
    NotAFile { path: String },
    InvalidPattern { pattern: String, reason: String },
    Unreadable { path: String, reason: String },
}

impl Rejection {
    /// Text handed to the agent for a rejected path
    pub const FORBIDDEN: &'static str = "Forbidden";

    pub fn is_forbidden(&self) -> bool {
        matches!(self, Rejection::Forbidden { .. })
    }

    /// Log-side explanation (more detailed than `Display` for `Forbidden`)
    pub fn detail(&self) -> String {
        match self {
            Rejection::Forbidden { detail } => detail.clone(),
            other => other.to_string(),
        }
    }
}

impl fmt::Display for Rejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Rejection::Forbidden { .. } => f.write_str(Self::FORBIDDEN),
            Rejection::DirectoryNotFound { directory } => {
                write!(f, "Directory not found: {}", directory)
            }
            Rejection::NotADirectory { directory } => {
                write!(f, "Not a valid directory: {}", directory)
            }
            Rejection::NotAFile { path } => write!(f, "Not a valid file: {}", path),
            Rejection::InvalidPattern { pattern, reason } => {
                write!(f, "Invalid pattern '{}': {}", pattern, reason)
            }
            Rejection::Unreadable { path, reason } => {
                write!(f, "Unable to read file {}: {}", path, reason)
            }
        }
    }
}

impl std::error::Error for Rejection {}

/// Run the guard and turn a refusal into [`Rejection::Forbidden`]
pub(crate) fn guarded(guard: &PathGuard, raw: &str) -> InspectResult<PathBuf> {
    match guard.validate(raw) {
        PathValidation::Valid { resolved } => Ok(resolved),
        other => Err(Rejection::Forbidden {
            detail: other
                .error_message()
                .unwrap_or_else(|| format!("'{}' rejected", raw)),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_forbidden_hides_detail() {
        let rejection = Rejection::Forbidden {
            detail: "'../x' has a parent traversal".into(),
        };
        assert_eq!(rejection.to_string(), "Forbidden");
        assert!(rejection.detail().contains("parent traversal"));
        assert!(rejection.is_forbidden());
    }

    #[test]
    fn test_rejection_sentences() {
        assert_eq!(
            Rejection::NotAFile { path: "src/x.rs".into() }.to_string(),
            "Not a valid file: src/x.rs"
        );
        assert_eq!(
            Rejection::DirectoryNotFound {
                directory: "docs".into()
            }
            .to_string(),
            "Directory not found: docs"
        );
        assert_eq!(
            Rejection::InvalidPattern {
                pattern: "(".into(),
                reason: "unclosed group".into()
            }
            .to_string(),
            "Invalid pattern '(': unclosed group"
        );
    }
}
