//! Tool Security - path containment
//!
//! Every path an agent passes to a tool goes through [`PathGuard`] before any
//! filesystem access. A path is accepted only if it is relative, has no `..`
//! segment, and its symlink-resolved location stays inside the guard root.

use std::io;
use std::path::{Component, Path, PathBuf};

/// Outcome of a path check
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PathValidation {
    /// Accepted; `resolved` is the canonical location (or, for a missing
    /// target, the canonical parent joined with the remaining segments)
    Valid { resolved: PathBuf },

    /// Absolute path, root marker or drive prefix
    Absolute { path: PathBuf },

    /// Contains a `..` segment
    ParentTraversal { path: PathBuf },

    /// Resolves (through symlinks) to a location outside the root
    OutsideRoot { path: PathBuf, resolved: PathBuf },

    /// The filesystem refused to resolve the path
    Unresolvable { path: PathBuf, reason: String },
}

impl PathValidation {
    pub fn is_valid(&self) -> bool {
        matches!(self, PathValidation::Valid { .. })
    }

    pub fn resolved(&self) -> Option<&Path> {
        match self {
            PathValidation::Valid { resolved } => Some(resolved),
            _ => None,
        }
    }

    pub fn error_message(&self) -> Option<String> {
        match self {
            PathValidation::Valid { .. } => None,
            PathValidation::Absolute { path } => {
                Some(format!("Absolute path '{}' is not allowed", path.display()))
            }
            PathValidation::ParentTraversal { path } => Some(format!(
                "Parent traversal in '{}' is not allowed",
                path.display()
            )),
            PathValidation::OutsideRoot { path, resolved } => Some(format!(
                "'{}' resolves to '{}', outside the working directory",
                path.display(),
                resolved.display()
            )),
            PathValidation::Unresolvable { path, reason } => {
                Some(format!("Cannot resolve '{}': {}", path.display(), reason))
            }
        }
    }
}

/// Containment check against a canonical root
#[derive(Debug, Clone)]
pub struct PathGuard {
    root: PathBuf,
}

impl PathGuard {
    /// Canonicalizes `root`; fails if it does not exist
    pub fn new(root: impl AsRef<Path>) -> io::Result<Self> {
        Ok(Self {
            root: root.as_ref().canonicalize()?,
        })
    }

    /// Guard rooted at the process working directory
    pub fn current_dir() -> io::Result<Self> {
        Self::new(std::env::current_dir()?)
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn validate(&self, raw: &str) -> PathValidation {
        let path = Path::new(raw);

        // Lexical checks first: these reject regardless of what exists on disk.
        if path.is_absolute() || path.has_root() {
            return PathValidation::Absolute {
                path: path.to_path_buf(),
            };
        }
        for component in path.components() {
            match component {
                Component::Prefix(_) | Component::RootDir => {
                    return PathValidation::Absolute {
                        path: path.to_path_buf(),
                    }
                }
                Component::ParentDir => {
                    return PathValidation::ParentTraversal {
                        path: path.to_path_buf(),
                    }
                }
                Component::CurDir | Component::Normal(_) => {}
            }
        }

        match resolve_under(&self.root, path) {
            Ok(resolved) if resolved.starts_with(&self.root) => PathValidation::Valid { resolved },
            Ok(resolved) => PathValidation::OutsideRoot {
                path: path.to_path_buf(),
                resolved,
            },
            Err(e) => PathValidation::Unresolvable {
                path: path.to_path_buf(),
                reason: e.to_string(),
            },
        }
    }

    pub fn is_unsafe(&self, raw: &str) -> bool {
        !self.validate(raw).is_valid()
    }
}

/// Process-cwd form of the check. Fails closed when the cwd is unusable.
pub fn is_unsafe(path: &str) -> bool {
    PathGuard::current_dir()
        .map(|guard| guard.is_unsafe(path))
        .unwrap_or(true)
}

/// Walk `path` one segment at a time, canonicalizing after each step so a
/// symlink anywhere along the way is followed. Once a segment is missing, or
/// the prefix so far is a file (ENOTDIR), the rest is appended verbatim; it
/// contains no `..` so it cannot climb back out.
fn resolve_under(root: &Path, path: &Path) -> io::Result<PathBuf> {
    let mut resolved = root.to_path_buf();
    let mut segments = path.components().filter_map(|c| match c {
        Component::Normal(s) => Some(s),
        _ => None,
    });

    while let Some(segment) = segments.next() {
        let candidate = resolved.join(segment);
        match candidate.canonicalize() {
            Ok(canonical) => resolved = canonical,
            Err(e) if e.kind() == io::ErrorKind::NotFound || !resolved.is_dir() => {
                resolved = candidate;
                resolved.extend(segments.by_ref());
                break;
            }
            Err(e) => return Err(e),
        }
    }

    Ok(resolved)
}
