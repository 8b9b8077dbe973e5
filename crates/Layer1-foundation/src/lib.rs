//! # scout-foundation
//!
//! Foundation layer for scout:
//! - Error: crate-wide error type
//! - Core: the `Tool` / `ToolContext` traits and shared types
//! - Event: tool-call observation (`ToolObserver`)
//! - Config: layered `ScoutConfig`
//! - Storage: `JsonStore` for config files

pub mod config;
pub mod core;
pub mod error;
pub mod event;
pub mod storage;

// ============================================================================
// Error
// ============================================================================
pub use error::{Error, Result};

// ============================================================================
// Core
// ============================================================================
pub use core::{TokenUsage, Tool, ToolContext, ToolExecutionResult, ToolMeta, ToolResult};

// ============================================================================
// Event
// ============================================================================
pub use event::{
    NoopObserver, RecordingObserver, ToolEvent, ToolEventKind, ToolObserver, TracingObserver,
};

// ============================================================================
// Config / Storage
// ============================================================================
pub use config::ScoutConfig;
pub use storage::JsonStore;
