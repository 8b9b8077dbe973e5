//! Git remotes
//!
//! The one subprocess the tool surface runs. The invocation is fixed
//! (`git remote -v`); nothing from the agent reaches the command line.

use std::path::Path;
use std::process::Stdio;
use std::time::Duration;
use thiserror::Error;
use tokio::process::Command;
use tokio::time::timeout;
use tracing::debug;

#[derive(Debug, Error)]
pub enum GitError {
    #[error("git executable not found on PATH")]
    NotInstalled,

    #[error("git remote -v failed ({status}): {stderr}")]
    CommandFailed { status: String, stderr: String },

    #[error("git remote -v timed out after {0:?}")]
    TimedOut(Duration),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Run `git remote -v` in `dir` and return stdout verbatim.
///
/// The child is killed if it outlives `limit`.
pub async fn git_remotes(dir: &Path, limit: Duration) -> Result<String, GitError> {
    let git = which::which("git").map_err(|_| GitError::NotInstalled)?;

    let mut cmd = Command::new(git);
    cmd.args(["remote", "-v"])
        .current_dir(dir)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .kill_on_drop(true);

    debug!("Running git remote -v in {}", dir.display());

    let output = match timeout(limit, cmd.output()).await {
        Ok(result) => result?,
        Err(_) => return Err(GitError::TimedOut(limit)),
    };

    if !output.status.success() {
        return Err(GitError::CommandFailed {
            status: output.status.to_string(),
            stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
        });
    }

    Ok(String::from_utf8_lossy(&output.stdout).into_owned())
}
