//! Storage module for scout
//!
//! Only JSON configuration files are stored; runs keep no other state.

mod json;

pub use json::JsonStore;
