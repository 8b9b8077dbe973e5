//! Directory listing

use super::{guarded, InspectResult, Rejection};
use crate::tool::security::PathGuard;
use ignore::WalkBuilder;
use std::ffi::OsStr;
use std::fmt;
use std::fs;
use std::path::{Component, Path};
use tracing::warn;

/// Directories skipped by a recursive listing
pub const LISTING_EXCLUDES: &[&str] = &["node_modules", "vendor", "dist", "build", "public"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntryKind {
    File,
    Directory,
}

/// One listed path, relative to the working directory
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DirectoryEntry {
    /// `/`-separated, prefixed with the requested directory
    pub path: String,
    pub kind: EntryKind,
}

impl DirectoryEntry {
    pub fn is_dir(&self) -> bool {
        self.kind == EntryKind::Directory
    }
}

/// Directories render with a trailing `/`
impl fmt::Display for DirectoryEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_dir() {
            write!(f, "{}/", self.path)
        } else {
            f.write_str(&self.path)
        }
    }
}

/// List `directory`.
///
/// Hidden entries are always skipped. A recursive listing also skips the
/// [`LISTING_EXCLUDES`] directories and everything under them. Results are
/// sorted by their rendered form and deduplicated.
pub fn list_files(
    guard: &PathGuard,
    directory: &str,
    recursive: bool,
) -> InspectResult<Vec<DirectoryEntry>> {
    let resolved = guarded(guard, directory)?;

    if !resolved.exists() {
        return Err(Rejection::DirectoryNotFound {
            directory: directory.to_string(),
        });
    }
    if !resolved.is_dir() {
        return Err(Rejection::NotADirectory {
            directory: directory.to_string(),
        });
    }

    let prefix = display_prefix(directory);
    let mut entries = if recursive {
        walk(&resolved, &prefix)
    } else {
        children(&resolved, &prefix, directory)?
    };

    entries.sort_by_cached_key(|e| e.to_string());
    entries.dedup();
    Ok(entries)
}

/// One path per line
pub fn render_entries(entries: &[DirectoryEntry]) -> String {
    entries
        .iter()
        .map(|e| e.to_string())
        .collect::<Vec<_>>()
        .join("\n")
}

fn children(dir: &Path, prefix: &str, directory: &str) -> InspectResult<Vec<DirectoryEntry>> {
    let read_dir = fs::read_dir(dir).map_err(|e| Rejection::Unreadable {
        path: directory.to_string(),
        reason: e.to_string(),
    })?;

    let mut entries = Vec::new();
    for item in read_dir {
        let item = match item {
            Ok(item) => item,
            Err(e) => {
                warn!("Skipping unreadable entry in {}: {}", dir.display(), e);
                continue;
            }
        };
        let name = item.file_name();
        if is_hidden(&name) {
            continue;
        }
        entries.push(DirectoryEntry {
            path: join_display(prefix, &name.to_string_lossy()),
            kind: kind_of(&item.path()),
        });
    }
    Ok(entries)
}

fn walk(root: &Path, prefix: &str) -> Vec<DirectoryEntry> {
    let walker = WalkBuilder::new(root)
        .hidden(true)
        .ignore(false)
        .git_ignore(false)
        .git_global(false)
        .git_exclude(false)
        .parents(false)
        .follow_links(false)
        .filter_entry(|entry| entry.depth() == 0 || !is_excluded(entry.file_name()))
        .build();

    let mut entries = Vec::new();
    for result in walker {
        let entry = match result {
            Ok(entry) => entry,
            Err(e) => {
                warn!("Skipping entry during walk of {}: {}", root.display(), e);
                continue;
            }
        };
        if entry.depth() == 0 {
            continue;
        }
        let Ok(relative) = entry.path().strip_prefix(root) else {
            continue;
        };
        entries.push(DirectoryEntry {
            path: join_display(prefix, &slash_path(relative)),
            kind: kind_of(entry.path()),
        });
    }
    entries
}

fn kind_of(path: &Path) -> EntryKind {
    if path.is_dir() {
        EntryKind::Directory
    } else {
        EntryKind::File
    }
}

fn is_hidden(name: &OsStr) -> bool {
    name.to_string_lossy().starts_with('.')
}

fn is_excluded(name: &OsStr) -> bool {
    let name = name.to_string_lossy();
    LISTING_EXCLUDES.contains(&name.as_ref())
}

/// `"./src/"` -> `"src"`, `"."` -> `""`
fn display_prefix(directory: &str) -> String {
    slash_path(Path::new(directory))
}

fn slash_path(path: &Path) -> String {
    path.components()
        .filter_map(|c| match c {
            Component::Normal(s) => Some(s.to_string_lossy().into_owned()),
            _ => None,
        })
        .collect::<Vec<_>>()
        .join("/")
}

fn join_display(prefix: &str, name: &str) -> String {
    if prefix.is_empty() {
        name.to_string()
    } else {
        format!("{}/{}", prefix, name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn touch(root: &Path, rel: &str) {
        let path = root.join(rel);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, "x").unwrap();
    }

    fn setup() -> (TempDir, PathGuard) {
        let temp = TempDir::new().unwrap();
        let root = temp.path();
        touch(root, "README.md");
        touch(root, ".env");
        touch(root, "src/main.rs");
        touch(root, "src/lib/util.rs");
        touch(root, ".git/config");
        touch(root, "node_modules/react/index.js");
        touch(root, "vendor/autoload.php");
        touch(root, "dist/app.js");
        touch(root, "build/out.o");
        touch(root, "public/index.html");
        touch(root, "src/.hidden/secret.rs");
        touch(root, "src/vendor/shim.rs");
        let guard = PathGuard::new(root).unwrap();
        (temp, guard)
    }

    fn render(guard: &PathGuard, dir: &str, recursive: bool) -> String {
        render_entries(&list_files(guard, dir, recursive).unwrap())
    }

    #[test]
    fn test_non_recursive_lists_children() {
        let (_temp, guard) = setup();
        assert_eq!(
            render(&guard, ".", false),
            "README.md\nbuild/\ndist/\nnode_modules/\npublic/\nsrc/\nvendor/"
        );
        assert_eq!(render(&guard, "src", false), "src/lib/\nsrc/main.rs\nsrc/vendor/");
        assert_eq!(render(&guard, "./src/", false), "src/lib/\nsrc/main.rs\nsrc/vendor/");
    }

    #[test]
    fn test_recursive_excludes_hidden_and_vendored() {
        let (_temp, guard) = setup();
        let listing = render(&guard, ".", true);

        assert_eq!(
            listing,
            "README.md\nsrc/\nsrc/lib/\nsrc/lib/util.rs\nsrc/main.rs"
        );
        for excluded in LISTING_EXCLUDES {
            assert!(!listing.contains(excluded), "{} leaked", excluded);
        }
        assert!(!listing.contains(".git"));
        assert!(!listing.contains(".hidden"));
    }

    #[test]
    fn test_recursive_subdirectory_prefix() {
        let (_temp, guard) = setup();
        assert_eq!(render(&guard, "src/lib", true), "src/lib/util.rs");
    }

    #[test]
    fn test_empty_directory() {
        let temp = TempDir::new().unwrap();
        let guard = PathGuard::new(temp.path()).unwrap();
        assert_eq!(render(&guard, ".", false), "");
        assert_eq!(render(&guard, ".", true), "");
    }

    #[test]
    fn test_failures_are_rejections() {
        let (_temp, guard) = setup();

        assert!(list_files(&guard, "../", false).unwrap_err().is_forbidden());
        assert!(list_files(&guard, "/tmp", true).unwrap_err().is_forbidden());
        assert_eq!(
            list_files(&guard, "docs", false).unwrap_err(),
            Rejection::DirectoryNotFound {
                directory: "docs".into()
            }
        );
        assert_eq!(
            list_files(&guard, "README.md", false)
                .unwrap_err()
                .to_string(),
            "Not a valid directory: README.md"
        );
    }

    #[test]
    fn test_display_prefix() {
        assert_eq!(display_prefix("."), "");
        assert_eq!(display_prefix(""), "");
        assert_eq!(display_prefix("./a/b/"), "a/b");
    }
}
