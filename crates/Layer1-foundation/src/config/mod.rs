//! Config - layered settings
//!
//! - `scout.rs` - ScoutConfig (global + project JSON, environment overrides)

mod scout;

pub use scout::{
    ScoutConfig, DEFAULT_API_KEY_ENV, DEFAULT_BASE_URL, DEFAULT_GIT_TIMEOUT_SECS,
    DEFAULT_MAX_TURNS, DEFAULT_MODEL, DEFAULT_REQUEST_TIMEOUT_SECS, DEFAULT_REWRITE_MODEL,
    SCOUT_CONFIG_FILE,
};
