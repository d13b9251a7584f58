//! Partition types and traits
//!
//! Defines the core partition abstractions. A stream is read as a sequence
//! of slices; most streams have exactly one, while substreams fan out into
//! one slice per parent record.

use crate::error::Result;
use serde_json::Value;
use std::collections::HashMap;

/// A single partition value
#[derive(Debug, Clone)]
pub struct PartitionValue {
    /// Unique identifier for this partition
    pub id: String,
    /// Values to inject into request templates
    pub values: HashMap<String, Value>,
}

impl PartitionValue {
    /// Create a new partition value
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            values: HashMap::new(),
        }
    }

    /// Add a value to the partition
    #[must_use]
    pub fn with_value(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.values.insert(key.into(), value.into());
        self
    }

    /// Add a string value
    #[must_use]
    pub fn with_string(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.values.insert(key.into(), Value::String(value.into()));
        self
    }

    /// Get a value by key
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.values.get(key)
    }

    /// Get a string value by key
    pub fn get_string(&self, key: &str) -> Option<&str> {
        self.values.get(key).and_then(Value::as_str)
    }
}

/// Configuration for partition routing
#[derive(Debug, Clone, Default)]
pub enum PartitionConfig {
    /// No partitioning - single slice per stream
    #[default]
    None,

    /// Partition based on parent stream records (e.g., Greenhouse
    /// `job_openings` fanning out over `jobs`)
    Parent {
        /// Name of the parent stream
        parent_stream: String,
        /// Field to extract from parent records
        parent_key: String,
        /// Field name exposed to templates as `{{ partition.<field> }}`
        partition_field: String,
    },

    /// Partition based on a static list
    List {
        /// List of values
        values: Vec<String>,
        /// Field name exposed to templates
        partition_field: String,
    },
}

impl PartitionConfig {
    /// Create parent-based partition config
    pub fn parent(
        parent_stream: impl Into<String>,
        parent_key: impl Into<String>,
        partition_field: impl Into<String>,
    ) -> Self {
        Self::Parent {
            parent_stream: parent_stream.into(),
            parent_key: parent_key.into(),
            partition_field: partition_field.into(),
        }
    }

    /// Create list-based partition config
    pub fn list(values: Vec<String>, partition_field: impl Into<String>) -> Self {
        Self::List {
            values,
            partition_field: partition_field.into(),
        }
    }
}

/// Trait for partition routers
pub trait PartitionRouter: Send + Sync {
    /// Generate partition values
    fn partitions(&self) -> Result<Vec<PartitionValue>>;

    /// Get the partition field name (for template interpolation)
    fn partition_field(&self) -> &str;
}
