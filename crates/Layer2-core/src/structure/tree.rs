//! Directory tree summary
//!
//! Only top-level files are listed by name; deeper files show up as their
//! parent's count. The total is accumulated while the tree is built.

use super::detect::{ProjectDetector, ProjectType};
use std::fmt;
use std::fs;
use std::path::Path;
use tracing::warn;

/// Directories never descended into
pub const STRUCTURE_EXCLUDES: &[&str] = &[
    "node_modules",
    "vendor",
    "dist",
    "storage",
    "build",
    "public",
    "cache",
    "logs",
];

/// A directory and its summarized subtree
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StructureNode {
    pub name: String,
    /// Direct non-hidden children, files and directories combined
    pub file_count: usize,
    /// Subdirectories, sorted by name
    pub children: Vec<StructureNode>,
}

/// A top-level item
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SummaryEntry {
    File(String),
    Directory(StructureNode),
}

impl SummaryEntry {
    pub fn name(&self) -> &str {
        match self {
            SummaryEntry::File(name) => name,
            SummaryEntry::Directory(node) => &node.name,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectSummary {
    /// Top-level files and directories in name order
    pub entries: Vec<SummaryEntry>,
    pub project_type: ProjectType,
    /// Sum of every directory's `file_count` plus the top-level files
    pub total_files: usize,
}

impl ProjectSummary {
    pub fn top_level_files(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().filter_map(|e| match e {
            SummaryEntry::File(name) => Some(name.as_str()),
            SummaryEntry::Directory(_) => None,
        })
    }

    pub fn directories(&self) -> impl Iterator<Item = &StructureNode> {
        self.entries.iter().filter_map(|e| match e {
            SummaryEntry::Directory(node) => Some(node),
            SummaryEntry::File(_) => None,
        })
    }
}

/// Summarize the tree under `root`.
///
/// Hidden entries and [`STRUCTURE_EXCLUDES`] are skipped. Symlinks are
/// counted but never followed. Unreadable directories count as empty.
pub fn summarize(root: &Path, detector: &dyn ProjectDetector) -> ProjectSummary {
    let mut total_files = 0;
    let mut entries = Vec::new();

    for item in visible_children(root) {
        if is_excluded(&item.name) {
            continue;
        }
        if item.is_dir {
            entries.push(SummaryEntry::Directory(build_node(
                &root.join(&item.name),
                item.name,
                &mut total_files,
            )));
        } else {
            total_files += 1;
            entries.push(SummaryEntry::File(item.name));
        }
    }

    ProjectSummary {
        entries,
        project_type: detector.detect(root),
        total_files,
    }
}

fn build_node(dir: &Path, name: String, total: &mut usize) -> StructureNode {
    let items = visible_children(dir);
    *total += items.len();

    let children = items
        .iter()
        .filter(|item| item.is_dir && !is_excluded(&item.name))
        .map(|item| build_node(&dir.join(&item.name), item.name.clone(), total))
        .collect();

    StructureNode {
        name,
        file_count: items.len(),
        children,
    }
}

struct Child {
    name: String,
    /// Real directory, not a symlink to one
    is_dir: bool,
}

fn visible_children(dir: &Path) -> Vec<Child> {
    let read_dir = match fs::read_dir(dir) {
        Ok(read_dir) => read_dir,
        Err(e) => {
            warn!("Cannot read {}: {}", dir.display(), e);
            return Vec::new();
        }
    };

    let mut children: Vec<Child> = read_dir
        .flatten()
        .filter_map(|entry| {
            let name = entry.file_name().to_string_lossy().into_owned();
            if name.starts_with('.') {
                return None;
            }
            let is_dir = entry.file_type().map(|t| t.is_dir()).unwrap_or(false);
            Some(Child { name, is_dir })
        })
        .collect();
    children.sort_by(|a, b| a.name.cmp(&b.name));
    children
}

fn is_excluded(name: &str) -> bool {
    STRUCTURE_EXCLUDES.contains(&name)
}

fn count_label(count: usize) -> &'static str {
    if count == 1 {
        "file"
    } else {
        "files"
    }
}

fn write_node(f: &mut fmt::Formatter<'_>, node: &StructureNode, depth: usize) -> fmt::Result {
    write!(
        f,
        "\n{}- {}/ ({} {})",
        "  ".repeat(depth),
        node.name,
        node.file_count,
        count_label(node.file_count)
    )?;
    for child in &node.children {
        write_node(f, child, depth + 1)?;
    }
    Ok(())
}

/// ```text
/// .
/// - Cargo.toml
/// - src/ (2 files)
///   - bin/ (1 file)
///
/// ## Estimated project type : Rust
///
/// ## Total files: 3
/// ```
impl fmt::Display for ProjectSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(".")?;
        for entry in &self.entries {
            match entry {
                SummaryEntry::File(name) => write!(f, "\n- {}", name)?,
                SummaryEntry::Directory(node) => write_node(f, node, 0)?,
            }
        }
        write!(
            f,
            "\n\n## Estimated project type : {}\n\n## Total files: {}\n",
            self.project_type, self.total_files
        )
    }
}
