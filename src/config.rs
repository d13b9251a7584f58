//! User configuration and catalog types
//!
//! The CLI takes a JSON config object (`--config`) holding credentials and
//! per-connector settings, and for `read` a configured catalog selecting
//! the streams to sync. This module loads and validates both, and builds
//! the discoverable catalog from a connector definition.

use crate::error::{Error, Result};
use crate::loader::{ConnectorDefinition, PropertyDefinition};
use crate::schema::default_schema;
use crate::types::{JsonObject, PropertyType, SyncMode};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::path::Path;

// ============================================================================
// User Config
// ============================================================================

/// Load a config JSON object from a file
pub fn load_config(path: impl AsRef<Path>) -> Result<JsonObject> {
    let path = path.as_ref();
    let contents = std::fs::read_to_string(path).map_err(|e| {
        Error::config(format!(
            "Failed to read config file '{}': {}",
            path.display(),
            e
        ))
    })?;
    parse_config(&contents)
}

/// Parse a config JSON object from a string
pub fn parse_config(json: &str) -> Result<JsonObject> {
    let value: Value = serde_json::from_str(json)
        .map_err(|e| Error::config(format!("Failed to parse config JSON: {e}")))?;

    match value {
        Value::Object(map) => Ok(map),
        _ => Err(Error::config("Config must be a JSON object")),
    }
}

/// Check a config object against the connector's declared properties.
///
/// Missing or empty required fields are configuration errors reported
/// before any request is made.
pub fn validate_config(def: &ConnectorDefinition, config: &JsonObject) -> Result<()> {
    for name in def.spec.required_properties() {
        match config.get(name) {
            None | Some(Value::Null) => return Err(Error::missing_field(name)),
            Some(Value::String(s)) if s.is_empty() => {
                return Err(Error::invalid_value(name, "must not be empty"));
            }
            Some(_) => {}
        }
    }
    Ok(())
}

// ============================================================================
// Connector Specification
// ============================================================================

/// Specification emitted by the `spec` command
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConnectorSpecification {
    /// Documentation URL
    #[serde(rename = "documentationUrl", skip_serializing_if = "Option::is_none")]
    pub documentation_url: Option<String>,
    /// JSON Schema describing the config object
    #[serde(rename = "connectionSpecification")]
    pub connection_specification: Value,
}

impl ConnectorSpecification {
    /// Build the specification from a connector definition
    pub fn from_definition(def: &ConnectorDefinition) -> Self {
        let mut properties = serde_json::Map::new();
        for (name, prop) in &def.spec.properties {
            properties.insert(name.clone(), property_schema(prop));
        }

        let required: Vec<&str> = def.spec.required_properties();

        let connection_specification = json!({
            "$schema": "http://json-schema.org/draft-07/schema#",
            "title": format!("{} Source Spec", def.name),
            "type": "object",
            "properties": Value::Object(properties),
            "required": required,
            "additionalProperties": true
        });

        Self {
            documentation_url: def.spec.documentation_url.clone(),
            connection_specification,
        }
    }
}

fn property_schema(prop: &PropertyDefinition) -> Value {
    let type_name = match prop.property_type {
        PropertyType::String => "string",
        PropertyType::Integer => "integer",
        PropertyType::Number => "number",
        PropertyType::Boolean => "boolean",
        PropertyType::Array => "array",
        PropertyType::Object => "object",
    };

    let mut schema = serde_json::Map::new();
    schema.insert("type".to_string(), json!(type_name));
    if let Some(title) = &prop.title {
        schema.insert("title".to_string(), json!(title));
    }
    if let Some(description) = &prop.description {
        schema.insert("description".to_string(), json!(description));
    }
    if prop.secret {
        schema.insert("airbyte_secret".to_string(), json!(true));
    }
    if let Some(default) = &prop.default {
        schema.insert("default".to_string(), default.clone());
    }
    Value::Object(schema)
}

// ============================================================================
// Catalog Types
// ============================================================================

/// Discovered catalog (available streams)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Catalog {
    /// Available streams
    pub streams: Vec<CatalogStream>,
}

impl Catalog {
    /// Build the catalog from a connector definition
    pub fn from_definition(def: &ConnectorDefinition) -> Self {
        let streams = def
            .streams
            .iter()
            .map(|s| CatalogStream {
                name: s.name.clone(),
                json_schema: s.schema.clone().unwrap_or_else(default_schema),
                supported_sync_modes: s.supported_sync_modes(),
                default_cursor_field: s.cursor_field.clone().map(|f| vec![f]),
                source_defined_primary_key: if s.primary_key.is_empty() {
                    None
                } else {
                    Some(s.primary_key.iter().map(|k| vec![k.clone()]).collect())
                },
            })
            .collect();

        Self { streams }
    }
}

/// Stream in the catalog
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogStream {
    /// Stream name
    pub name: String,

    /// JSON schema for the stream
    #[serde(default)]
    pub json_schema: Value,

    /// Supported sync modes
    #[serde(default)]
    pub supported_sync_modes: Vec<SyncMode>,

    /// Default cursor field
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_cursor_field: Option<Vec<String>>,

    /// Source-defined primary key
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_defined_primary_key: Option<Vec<Vec<String>>>,
}

/// Configured catalog (selected streams for sync)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ConfiguredCatalog {
    /// Selected streams
    pub streams: Vec<ConfiguredStream>,
}

impl ConfiguredCatalog {
    /// Load a configured catalog from a file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path).map_err(|e| {
            Error::config(format!(
                "Failed to read catalog file '{}': {}",
                path.display(),
                e
            ))
        })?;
        Self::from_json(&contents)
    }

    /// Parse a configured catalog from a JSON string
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json)
            .map_err(|e| Error::config(format!("Failed to parse catalog JSON: {e}")))
    }

    /// Select every stream of a connector with its default sync mode
    pub fn all_streams(def: &ConnectorDefinition) -> Self {
        let catalog = Catalog::from_definition(def);
        let streams = catalog
            .streams
            .into_iter()
            .map(|stream| {
                let sync_mode = if stream.supported_sync_modes.contains(&SyncMode::Incremental) {
                    SyncMode::Incremental
                } else {
                    SyncMode::FullRefresh
                };
                ConfiguredStream {
                    cursor_field: stream.default_cursor_field.clone(),
                    stream,
                    sync_mode,
                }
            })
            .collect();
        Self { streams }
    }
}

/// Configured stream for sync
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConfiguredStream {
    /// Stream reference
    pub stream: CatalogStream,

    /// Selected sync mode
    #[serde(default)]
    pub sync_mode: SyncMode,

    /// Cursor field to use
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cursor_field: Option<Vec<String>>,
}
