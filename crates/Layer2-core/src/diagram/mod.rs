//! Diagram Sanitizer
//!
//! Post-processing for diagram text produced by the agent. Only fenced
//! Mermaid blocks are touched; everything else passes through.

mod mermaid;

pub use mermaid::{normalize_id, sanitize, sanitize_block, strip_label, LABEL_FORBIDDEN};
