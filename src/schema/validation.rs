//! Record validation against stream schemas
//!
//! Each stream declares a JSON Schema in its definition; records are
//! checked against it before emission. What happens to an invalid record
//! depends on the stream's validation policy: dropped with a warning, or
//! a fatal error for the stream.

use crate::error::{Error, Result};
use crate::types::ValidationPolicy;
use jsonschema::Validator;
use serde_json::{json, Value};

/// Compiled schema validator for one stream
pub struct SchemaValidator {
    /// Stream name (for error reporting)
    stream: String,
    /// Compiled validator
    validator: Validator,
    /// What to do with invalid records
    policy: ValidationPolicy,
}

impl std::fmt::Debug for SchemaValidator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SchemaValidator")
            .field("stream", &self.stream)
            .field("policy", &self.policy)
            .finish_non_exhaustive()
    }
}

impl SchemaValidator {
    /// Compile a schema for a stream
    pub fn new(stream: impl Into<String>, schema: &Value, policy: ValidationPolicy) -> Result<Self> {
        let stream = stream.into();
        let validator = jsonschema::validator_for(schema).map_err(|e| Error::SchemaCompile {
            stream: stream.clone(),
            message: e.to_string(),
        })?;

        Ok(Self {
            stream,
            validator,
            policy,
        })
    }

    /// Stream name this validator belongs to
    pub fn stream(&self) -> &str {
        &self.stream
    }

    /// Validation policy for this stream
    pub fn policy(&self) -> ValidationPolicy {
        self.policy
    }

    /// Check whether a record conforms to the schema
    pub fn is_valid(&self, record: &Value) -> bool {
        self.validator.is_valid(record)
    }

    /// Validate a record, returning all violations as one error
    pub fn validate(&self, record: &Value) -> Result<()> {
        let errors: Vec<String> = self
            .validator
            .iter_errors(record)
            .map(|e| format!("{} at {}", e, e.instance_path))
            .collect();

        if errors.is_empty() {
            Ok(())
        } else {
            Err(Error::validation(&self.stream, errors.join("; ")))
        }
    }

    /// Apply the stream's validation policy to a record.
    ///
    /// Returns `Ok(true)` when the record should be emitted, `Ok(false)`
    /// when it should be dropped, and an error under the fail policy.
    pub fn check(&self, record: &Value) -> Result<bool> {
        if self.is_valid(record) {
            return Ok(true);
        }

        match self.policy {
            ValidationPolicy::Drop => {
                if let Err(e) = self.validate(record) {
                    tracing::warn!(stream = %self.stream, "Dropping invalid record: {e}");
                }
                Ok(false)
            }
            ValidationPolicy::Fail => self.validate(record).map(|()| true),
        }
    }
}

/// Permissive fallback schema for streams without a declared one
pub fn default_schema() -> Value {
    json!({
        "$schema": "http://json-schema.org/draft-07/schema#",
        "type": "object",
        "additionalProperties": true
    })
}
