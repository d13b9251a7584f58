//! State types for tracking sync progress
//!
//! These types are serialized to JSON and persisted between runs. The
//! shape is a per-stream mapping holding the incremental cursor value.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Complete state for a connector
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct State {
    /// Per-stream state
    #[serde(default)]
    pub streams: HashMap<String, StreamState>,
}

impl State {
    /// Create a new empty state
    pub fn new() -> Self {
        Self::default()
    }

    /// Get state for a stream
    pub fn get_stream(&self, stream: &str) -> Option<&StreamState> {
        self.streams.get(stream)
    }

    /// Get mutable state for a stream, creating if needed
    pub fn get_stream_mut(&mut self, stream: &str) -> &mut StreamState {
        self.streams.entry(stream.to_string()).or_default()
    }

    /// Get cursor for a stream
    pub fn get_cursor(&self, stream: &str) -> Option<&str> {
        self.streams.get(stream)?.cursor.as_deref()
    }

    /// Set cursor for a stream
    pub fn set_cursor(&mut self, stream: &str, cursor: String) {
        self.get_stream_mut(stream).cursor = Some(cursor);
    }
}

/// State for a single stream
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StreamState {
    /// Current cursor value (for incremental sync)
    #[serde(default)]
    pub cursor: Option<String>,
}

impl StreamState {
    /// Create a new empty stream state
    pub fn new() -> Self {
        Self::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_state_default() {
        let state = State::new();
        assert!(state.streams.is_empty());
    }

    #[test]
    fn test_state_cursor() {
        let mut state = State::new();
        assert!(state.get_cursor("candidates").is_none());

        state.set_cursor("candidates", "2024-05-01T00:00:00Z".to_string());
        assert_eq!(
            state.get_cursor("candidates"),
            Some("2024-05-01T00:00:00Z")
        );
    }

    #[test]
    fn test_state_serialization() {
        let mut state = State::new();
        state.set_cursor("candidates", "cursor123".to_string());
        state.set_cursor("jobs", "cursor456".to_string());

        let json = serde_json::to_string(&state).unwrap();
        let restored: State = serde_json::from_str(&json).unwrap();

        assert_eq!(restored.get_cursor("candidates"), Some("cursor123"));
        assert_eq!(restored.get_cursor("jobs"), Some("cursor456"));
    }

    #[test]
    fn test_state_deserializes_missing_streams() {
        let state: State = serde_json::from_str("{}").unwrap();
        assert!(state.streams.is_empty());
    }
}
