//! State management module
//!
//! Handles incremental cursor tracking between sync runs. State is a
//! per-stream cursor mapping persisted as JSON.
//!
//! # Overview
//!
//! The state module provides:
//! - `State` - Core state structure with per-stream cursors
//! - `StateManager` - File-based state persistence with explicit commits

mod manager;
mod types;

pub use manager::StateManager;
pub use types::{State, StreamState};
