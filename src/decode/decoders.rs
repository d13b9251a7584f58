//! Decoder implementations
//!
//! Each decoder handles a specific response format.

use super::types::RecordDecoder;
use crate::error::{Error, Result};
use serde_json::{Map, Value};

// ============================================================================
// JSON Decoder
// ============================================================================

/// JSON decoder with optional record path extraction.
///
/// Most vendor responses are either a bare array (`[...]` from Greenhouse
/// and Lever) or an envelope with the records under a field (`{"data": [...]}`
/// from Lattice, `{"Report_Entry": [...]}` from Workday). The record path
/// selects the latter; no path treats the whole body as the record list.
#[derive(Debug, Clone, Default)]
pub struct JsonDecoder {
    /// Field path to the record array
    record_path: Option<String>,
}

impl JsonDecoder {
    /// Create a new JSON decoder
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a JSON decoder with a record path
    pub fn with_path(path: impl Into<String>) -> Self {
        Self {
            record_path: Some(path.into()),
        }
    }

    /// Extract records from a JSON value using a path
    fn extract_records(&self, value: &Value) -> Result<Vec<Value>> {
        match &self.record_path {
            Some(path) => {
                // Simple dot-notation handles everything the manifests use;
                // jsonpath-rust only kicks in for wildcard selectors
                if path.contains('*') && !path.contains("[-") {
                    extract_with_jsonpath(value, path)
                } else {
                    match extract_simple_path(value, path) {
                        Some(Value::Array(arr)) => Ok(arr),
                        Some(v) => Ok(vec![v]),
                        None => Ok(vec![]),
                    }
                }
            }
            None => {
                // No path - treat entire response as records
                match value {
                    Value::Array(arr) => Ok(arr.clone()),
                    _ => Ok(vec![value.clone()]),
                }
            }
        }
    }
}

impl RecordDecoder for JsonDecoder {
    fn decode(&self, body: &str) -> Result<Vec<Value>> {
        let value: Value = serde_json::from_str(body).map_err(|e| Error::Decode {
            message: format!("Failed to parse JSON: {e}"),
        })?;
        self.extract_records(&value)
    }

    fn decode_raw(&self, body: &str) -> Result<Value> {
        serde_json::from_str(body).map_err(|e| Error::Decode {
            message: format!("Failed to parse JSON: {e}"),
        })
    }
}

// ============================================================================
// CSV Decoder
// ============================================================================

/// CSV decoder with configurable delimiter and header handling.
///
/// Workday base snapshot reports arrive as CSV; each row becomes one JSON
/// record keyed by the header row (or `column_N` without one).
#[derive(Debug, Clone)]
pub struct CsvDecoder {
    /// Field delimiter
    delimiter: char,
    /// Whether the first row is a header
    has_header: bool,
}

impl Default for CsvDecoder {
    fn default() -> Self {
        Self {
            delimiter: ',',
            has_header: true,
        }
    }
}

impl CsvDecoder {
    /// Create a new CSV decoder with default settings
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a CSV decoder with custom settings
    pub fn with_options(delimiter: char, has_header: bool) -> Self {
        Self {
            delimiter,
            has_header,
        }
    }
}

impl RecordDecoder for CsvDecoder {
    fn decode(&self, body: &str) -> Result<Vec<Value>> {
        let mut reader = csv::ReaderBuilder::new()
            .delimiter(self.delimiter as u8)
            .has_headers(self.has_header)
            .flexible(true)
            .from_reader(body.as_bytes());

        let headers: Vec<String> = if self.has_header {
            reader
                .headers()
                .map_err(|e| Error::CsvParse {
                    message: format!("Failed to read CSV header: {e}"),
                })?
                .iter()
                .map(|h| h.trim().to_string())
                .collect()
        } else {
            Vec::new()
        };

        let mut records = Vec::new();
        for result in reader.records() {
            let row = result.map_err(|e| Error::CsvParse {
                message: format!("Failed to parse CSV row: {e}"),
            })?;

            let mut obj = Map::new();
            for (i, field) in row.iter().enumerate() {
                let key = headers
                    .get(i)
                    .cloned()
                    .unwrap_or_else(|| format!("column_{i}"));
                obj.insert(key, parse_csv_value(field.trim()));
            }
            records.push(Value::Object(obj));
        }

        Ok(records)
    }

    fn decode_raw(&self, body: &str) -> Result<Value> {
        let records = self.decode(body)?;
        Ok(Value::Array(records))
    }
}

/// Parse a CSV field into a typed JSON value
fn parse_csv_value(value: &str) -> Value {
    // Try integer
    if let Ok(n) = value.parse::<i64>() {
        return Value::Number(n.into());
    }

    // Try float
    if let Ok(n) = value.parse::<f64>() {
        if let Some(num) = serde_json::Number::from_f64(n) {
            return Value::Number(num);
        }
    }

    // Try boolean
    match value.to_lowercase().as_str() {
        "true" | "yes" => return Value::Bool(true),
        "false" | "no" => return Value::Bool(false),
        _ => {}
    }

    // Null/empty
    if value.is_empty() || value.eq_ignore_ascii_case("null") || value.eq_ignore_ascii_case("none")
    {
        return Value::Null;
    }

    Value::String(value.to_string())
}

// ============================================================================
// Helper Functions
// ============================================================================

/// Extract a value using simple dot-notation path
pub(crate) fn extract_simple_path(value: &Value, path: &str) -> Option<Value> {
    let path = path.strip_prefix("$.").unwrap_or(path);
    let parts: Vec<&str> = path.split('.').collect();

    let mut current = value;
    for part in parts {
        // Handle array indexing like "data[0]" or "items[-1]"
        if let Some(bracket_pos) = part.find('[') {
            // Malformed segment like "data[" or "data[0"
            if !part.ends_with(']') || bracket_pos + 1 >= part.len() {
                return None;
            }
            let name = &part[..bracket_pos];
            let index_str = &part[bracket_pos + 1..part.len() - 1];

            if !name.is_empty() {
                current = current.get(name)?;
            }

            if index_str == "*" {
                return Some(current.clone());
            } else if let Ok(index) = index_str.parse::<i64>() {
                if let Value::Array(arr) = current {
                    #[allow(
                        clippy::cast_possible_truncation,
                        clippy::cast_sign_loss,
                        clippy::cast_possible_wrap
                    )]
                    let idx = if index < 0 {
                        (arr.len() as i64 + index) as usize
                    } else {
                        index as usize
                    };
                    current = arr.get(idx)?;
                } else {
                    return None;
                }
            } else {
                return None;
            }
        } else {
            current = current.get(part)?;
        }
    }

    Some(current.clone())
}

/// Extract records using jsonpath-rust
fn extract_with_jsonpath(value: &Value, path: &str) -> Result<Vec<Value>> {
    use jsonpath_rust::JsonPath;

    let jp = JsonPath::try_from(path).map_err(|e| Error::JsonPath {
        message: format!("Invalid JSONPath: {e}"),
    })?;

    let result = jp.find(value);

    match result {
        Value::Array(arr) => Ok(arr),
        Value::Null => Ok(vec![]),
        other => Ok(vec![other]),
    }
}
