//! Regex search inside one file

use super::{guarded, InspectResult, Rejection};
use crate::tool::security::PathGuard;
use regex::Regex;
use std::fmt;
use std::fs;

/// Line placed between two match blocks
pub const BLOCK_SEPARATOR: &str = "---";

/// A numbered line of a match block
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchLine {
    /// 1-based
    pub number: usize,
    pub text: String,
}

impl fmt::Display for MatchLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Line: {} - {}", self.number, self.text)
    }
}

/// The context window around one matching line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchBlock {
    /// 1-based number of the line that matched
    pub matched: usize,
    pub lines: Vec<MatchLine>,
}

/// All blocks for one search, in file order. Blocks whose windows overlap
/// are kept separate.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchMatches {
    pub blocks: Vec<MatchBlock>,
}

impl SearchMatches {
    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    pub fn len(&self) -> usize {
        self.blocks.len()
    }
}

/// Blocks joined by a [`BLOCK_SEPARATOR`] line; empty when nothing matched
impl fmt::Display for SearchMatches {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, block) in self.blocks.iter().enumerate() {
            if i > 0 {
                write!(f, "\n{}\n", BLOCK_SEPARATOR)?;
            }
            for (j, line) in block.lines.iter().enumerate() {
                if j > 0 {
                    f.write_str("\n")?;
                }
                write!(f, "{}", line)?;
            }
        }
        Ok(())
    }
}

/// Clamp a caller-supplied context count; negative or missing means zero
pub fn context_lines(requested: Option<i64>) -> usize {
    requested
        .filter(|n| *n > 0)
        .map(|n| usize::try_from(n).unwrap_or(usize::MAX))
        .unwrap_or(0)
}

/// Apply `pattern` to each line of `path` and collect context windows
pub fn search_file(
    guard: &PathGuard,
    path: &str,
    pattern: &str,
    before: usize,
    after: usize,
) -> InspectResult<SearchMatches> {
    let resolved = guarded(guard, path)?;

    if !resolved.is_file() {
        return Err(Rejection::NotAFile {
            path: path.to_string(),
        });
    }

    let regex = Regex::new(pattern).map_err(|e| Rejection::InvalidPattern {
        pattern: pattern.to_string(),
        reason: first_line(&e.to_string()),
    })?;

    let content = fs::read_to_string(&resolved).map_err(|e| Rejection::Unreadable {
        path: path.to_string(),
        reason: e.to_string(),
    })?;
    let lines: Vec<&str> = content.lines().collect();

    let blocks = lines
        .iter()
        .enumerate()
        .filter(|(_, line)| regex.is_match(line))
        .map(|(idx, _)| {
            let start = idx.saturating_sub(before);
            let end = idx.saturating_add(after).saturating_add(1).min(lines.len());
            MatchBlock {
                matched: idx + 1,
                lines: (start..end)
                    .map(|i| MatchLine {
                        number: i + 1,
                        text: lines[i].to_string(),
                    })
                    .collect(),
            }
        })
        .collect();

    Ok(SearchMatches { blocks })
}

/// regex errors are multi-line diagrams; keep the summary line
fn first_line(message: &str) -> String {
    message
        .lines()
        .rev()
        .find(|l| l.trim_start().starts_with("error:"))
        .or_else(|| message.lines().next())
        .unwrap_or(message)
        .trim()
        .to_string()
}
