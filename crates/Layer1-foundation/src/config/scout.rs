//! ScoutConfig - merged global/project settings
//!
//! Resolution order, later wins:
//! 1. built-in defaults
//! 2. `<config_dir>/scout/config.json`
//! 3. `<project>/.scout/config.json`
//! 4. environment (`OPENAI_BASE_URL`, `SCOUT_MODEL`)
//! 5. command-line flags (applied by the CLI)

use crate::storage::JsonStore;
use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;
use tracing::debug;

pub const SCOUT_CONFIG_FILE: &str = "config.json";

pub const DEFAULT_MODEL: &str = "o4-mini";
pub const DEFAULT_REWRITE_MODEL: &str = "gpt-4o";
pub const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";
pub const DEFAULT_API_KEY_ENV: &str = "OPENAI_API_KEY";
pub const DEFAULT_MAX_TURNS: usize = 50;
pub const DEFAULT_GIT_TIMEOUT_SECS: u64 = 10;
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 300;

/// Settings file content. Every field is optional so layers merge cleanly.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoutConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,

    /// Model used by the rewrite pass
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rewrite_model: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,

    /// Name of the environment variable holding the API key
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key_env: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_turns: Option<usize>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_tokens: Option<u32>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub git_timeout_secs: Option<u64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub request_timeout_secs: Option<u64>,
}

impl ScoutConfig {
    pub fn new() -> Self {
        Self::default()
    }

    // ========================================================================
    // Load
    // ========================================================================

    /// Global + project files, then environment overrides
    pub fn load(project_root: &Path) -> Result<Self> {
        let mut config = Self::new();

        if let Ok(global) = JsonStore::global() {
            if let Some(global_config) = global.load_optional::<ScoutConfig>(SCOUT_CONFIG_FILE)? {
                debug!(path = %global.file_path(SCOUT_CONFIG_FILE).display(), "loaded global config");
                config.merge(global_config);
            }
        }

        let project = JsonStore::project(project_root);
        if let Some(project_config) = project.load_optional::<ScoutConfig>(SCOUT_CONFIG_FILE)? {
            debug!(path = %project.file_path(SCOUT_CONFIG_FILE).display(), "loaded project config");
            config.merge(project_config);
        }

        config.apply_env(|key| std::env::var(key).ok());
        Ok(config)
    }

    /// Overlay `other` on top of `self`
    pub fn merge(&mut self, other: ScoutConfig) {
        if other.model.is_some() {
            self.model = other.model;
        }
        if other.rewrite_model.is_some() {
            self.rewrite_model = other.rewrite_model;
        }
        if other.base_url.is_some() {
            self.base_url = other.base_url;
        }
        if other.api_key_env.is_some() {
            self.api_key_env = other.api_key_env;
        }
        if other.max_turns.is_some() {
            self.max_turns = other.max_turns;
        }
        if other.max_tokens.is_some() {
            self.max_tokens = other.max_tokens;
        }
        if other.git_timeout_secs.is_some() {
            self.git_timeout_secs = other.git_timeout_secs;
        }
        if other.request_timeout_secs.is_some() {
            self.request_timeout_secs = other.request_timeout_secs;
        }
    }

    /// Environment overrides, read through `lookup`
    pub fn apply_env(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(url) = lookup("OPENAI_BASE_URL").filter(|v| !v.is_empty()) {
            self.base_url = Some(url);
        }
        if let Some(model) = lookup("SCOUT_MODEL").filter(|v| !v.is_empty()) {
            self.model = Some(model);
        }
    }

    // ========================================================================
    // Effective values
    // ========================================================================

    pub fn model(&self) -> &str {
        self.model.as_deref().unwrap_or(DEFAULT_MODEL)
    }

    pub fn rewrite_model(&self) -> &str {
        self.rewrite_model.as_deref().unwrap_or(DEFAULT_REWRITE_MODEL)
    }

    pub fn base_url(&self) -> &str {
        self.base_url.as_deref().unwrap_or(DEFAULT_BASE_URL)
    }

    pub fn api_key_env(&self) -> &str {
        self.api_key_env.as_deref().unwrap_or(DEFAULT_API_KEY_ENV)
    }

    pub fn max_turns(&self) -> usize {
        self.max_turns.unwrap_or(DEFAULT_MAX_TURNS)
    }

    pub fn git_timeout(&self) -> Duration {
        Duration::from_secs(self.git_timeout_secs.unwrap_or(DEFAULT_GIT_TIMEOUT_SECS))
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(
            self.request_timeout_secs
                .unwrap_or(DEFAULT_REQUEST_TIMEOUT_SECS),
        )
    }

    /// API key from the configured environment variable
    pub fn api_key(&self, lookup: impl Fn(&str) -> Option<String>) -> Result<String> {
        let var = self.api_key_env();
        lookup(var)
            .map(|key| key.trim().to_string())
            .filter(|key| !key.is_empty())
            .ok_or_else(|| Error::MissingApiKey(var.to_string()))
    }
}
