//! Partition router implementations
//!
//! Each router handles a specific partitioning strategy.

use super::types::{PartitionRouter, PartitionValue};
use crate::error::Result;
use serde_json::Value;

// ============================================================================
// Single Slice Router
// ============================================================================

/// Router for unpartitioned streams: exactly one slice with no values.
#[derive(Debug, Clone, Default)]
pub struct SingleSliceRouter;

impl PartitionRouter for SingleSliceRouter {
    fn partitions(&self) -> Result<Vec<PartitionValue>> {
        Ok(vec![PartitionValue::new("")])
    }

    fn partition_field(&self) -> &str {
        ""
    }
}

// ============================================================================
// List Router
// ============================================================================

/// List-based partition router
///
/// Creates partitions from a static list of values.
#[derive(Debug, Clone)]
pub struct ListRouter {
    /// List of partition values
    values: Vec<String>,
    /// Field name for partition
    partition_field: String,
}

impl ListRouter {
    /// Create a new list router
    pub fn new(values: Vec<String>, partition_field: impl Into<String>) -> Self {
        Self {
            values,
            partition_field: partition_field.into(),
        }
    }
}

impl PartitionRouter for ListRouter {
    fn partitions(&self) -> Result<Vec<PartitionValue>> {
        Ok(self
            .values
            .iter()
            .map(|v| {
                PartitionValue::new(v.clone()).with_string(self.partition_field.clone(), v.clone())
            })
            .collect())
    }

    fn partition_field(&self) -> &str {
        &self.partition_field
    }
}

// ============================================================================
// Parent Router
// ============================================================================

/// Parent stream-based partition router
///
/// Creates partitions from records in a parent stream. Duplicate parent
/// keys collapse into a single slice, so each unique parent is requested
/// at most once per sync.
#[derive(Debug, Clone)]
pub struct ParentRouter {
    /// Records from parent stream
    parent_records: Vec<Value>,
    /// Key to extract from parent records
    parent_key: String,
    /// Field name for partition
    partition_field: String,
}

impl ParentRouter {
    /// Create a new parent router
    pub fn new(
        parent_records: Vec<Value>,
        parent_key: impl Into<String>,
        partition_field: impl Into<String>,
    ) -> Self {
        Self {
            parent_records,
            parent_key: parent_key.into(),
            partition_field: partition_field.into(),
        }
    }

    /// Create an empty parent router (records filled in once the parent
    /// stream has been read)
    pub fn empty(parent_key: impl Into<String>, partition_field: impl Into<String>) -> Self {
        Self {
            parent_records: Vec::new(),
            parent_key: parent_key.into(),
            partition_field: partition_field.into(),
        }
    }

    /// Set parent records
    pub fn set_records(&mut self, records: Vec<Value>) {
        self.parent_records = records;
    }

    /// Extract value from a record using the parent key
    fn extract_key(&self, record: &Value) -> Option<String> {
        // Handle nested keys like "id" or "data.id"
        let parts: Vec<&str> = self.parent_key.split('.').collect();
        let mut current = record;

        for part in parts {
            current = current.get(part)?;
        }

        match current {
            Value::String(s) => Some(s.clone()),
            Value::Number(n) => Some(n.to_string()),
            _ => None,
        }
    }
}

impl PartitionRouter for ParentRouter {
    fn partitions(&self) -> Result<Vec<PartitionValue>> {
        let mut partitions = Vec::new();
        let mut seen = std::collections::HashSet::new();

        for record in &self.parent_records {
            if let Some(key_value) = self.extract_key(record) {
                // Records missing the key are skipped; duplicates collapse
                if seen.insert(key_value.clone()) {
                    partitions.push(
                        PartitionValue::new(&key_value)
                            .with_string(self.partition_field.clone(), &key_value),
                    );
                }
            }
        }

        Ok(partitions)
    }

    fn partition_field(&self) -> &str {
        &self.partition_field
    }
}
