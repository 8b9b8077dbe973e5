//! Agent modes and request resolution

use crate::prompts;
use scout_foundation::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Request used by `docs` mode unless disabled
pub const DEFAULT_DOCS_REQUEST: &str = "Please provide a GitHub style Readme.md for the codebase.";

/// What the agent is asked to produce
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    Docs,
    #[default]
    Code,
    Mermaid,
    Testing,
}

impl Mode {
    pub const ALL: [Mode; 4] = [Mode::Docs, Mode::Code, Mode::Mermaid, Mode::Testing];

    pub fn as_str(&self) -> &'static str {
        match self {
            Mode::Docs => "docs",
            Mode::Code => "code",
            Mode::Mermaid => "mermaid",
            Mode::Testing => "testing",
        }
    }

    /// Display name, e.g. "Mermaid Agent"
    pub fn agent_name(&self) -> String {
        let name = self.as_str();
        let mut chars = name.chars();
        match chars.next() {
            Some(first) => format!("{}{} Agent", first.to_ascii_uppercase(), chars.as_str()),
            None => "Agent".to_string(),
        }
    }

    pub fn system_prompt(&self) -> String {
        let prompt = match self {
            Mode::Docs => prompts::DOCS_PROMPT,
            Mode::Code => prompts::CODE_PROMPT,
            Mode::Mermaid => prompts::MERMAID_PROMPT,
            Mode::Testing => prompts::TESTING_PROMPT,
        };
        prompts::with_tools(prompt)
    }

    /// Whether the final answer goes through the diagram sanitizer
    pub fn sanitizes_diagrams(&self) -> bool {
        matches!(self, Mode::Mermaid)
    }

    /// Whether the mode can run without a user request
    pub fn has_default_request(&self) -> bool {
        matches!(self, Mode::Docs)
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Mode {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "docs" => Ok(Mode::Docs),
            "code" => Ok(Mode::Code),
            "mermaid" => Ok(Mode::Mermaid),
            "testing" => Ok(Mode::Testing),
            _ => Err(Error::InvalidMode(s.to_string())),
        }
    }
}

/// Final request sent to the agent, or `None` when nothing can be inferred.
///
/// `docs` starts from [`DEFAULT_DOCS_REQUEST`] (unless `no_readme`) and appends
/// the user's request as a note. Other modes use the request as given.
pub fn resolve_request(mode: Mode, request: Option<&str>, no_readme: bool) -> Option<String> {
    let request = request.map(str::trim).filter(|r| !r.is_empty());

    if mode.has_default_request() && !no_readme {
        return Some(match request {
            Some(note) => format!("{}\n\n## User note\n\n{}", DEFAULT_DOCS_REQUEST, note),
            None => DEFAULT_DOCS_REQUEST.to_string(),
        });
    }

    request.map(str::to_string)
}
