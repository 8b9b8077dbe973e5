//! Whole-file read

use super::{guarded, InspectResult, Rejection};
use crate::tool::security::PathGuard;
use std::fs;

/// Returned instead of any README's contents, so the agent has to read
/// implementation files to learn what the code does
pub const README_STUB: &str = "# README\n\n- TODO\n\n";

/// Read `path` in full.
///
/// The stub rule is applied after the regular-file check: a missing README
/// still reports "Not a valid file".
pub fn read_file(guard: &PathGuard, path: &str) -> InspectResult<String> {
    let resolved = guarded(guard, path)?;

    if !resolved.is_file() {
        return Err(Rejection::NotAFile {
            path: path.to_string(),
        });
    }

    if path.to_lowercase().contains("readme") {
        return Ok(README_STUB.to_string());
    }

    fs::read_to_string(&resolved).map_err(|e| Rejection::Unreadable {
        path: path.to_string(),
        reason: e.to_string(),
    })
}
