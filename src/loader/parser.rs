//! YAML parser for connector definitions
//!
//! Parses and validates connector YAML files.
//! Supports both built-in connectors (by name) and custom YAML files (by path).

use crate::connectors;
use crate::error::{Error, Result};
use crate::loader::types::{ConnectorDefinition, PaginationDefinition, PartitionDefinition};
use std::fs;
use std::path::Path;

/// Load a connector definition from a name or file path
///
/// This function first checks if the input is a built-in connector name
/// (e.g., "greenhouse"), then falls back to loading from a file path.
///
/// # Examples
///
/// ```ignore
/// // Load built-in connector by name
/// let connector = load_connector("greenhouse")?;
///
/// // Load custom connector from file
/// let connector = load_connector("./my-connector.yaml")?;
/// ```
pub fn load_connector(path: impl AsRef<Path>) -> Result<ConnectorDefinition> {
    let path = path.as_ref();
    let path_str = path.to_string_lossy();

    // A bare name with no path separators resolves to a built-in first
    if !path_str.contains('/')
        && !path_str.contains('\\')
        && !path_str.ends_with(".yaml")
        && !path_str.ends_with(".yml")
    {
        if let Some(yaml) = connectors::get_builtin(&path_str) {
            return load_connector_from_str(yaml);
        }
    }

    // Fall back to loading from file
    let content = fs::read_to_string(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            let builtin_list = connectors::list_builtin().join(", ");
            Error::config(format!(
                "Connector '{}' not found. Built-in connectors: {}. Or provide a path to a YAML file.",
                path.display(),
                builtin_list
            ))
        } else {
            Error::config(format!(
                "Failed to read connector file '{}': {}",
                path.display(),
                e
            ))
        }
    })?;
    load_connector_from_str(&content)
}

/// Load a connector definition from a YAML string
pub fn load_connector_from_str(yaml: &str) -> Result<ConnectorDefinition> {
    let def: ConnectorDefinition = serde_yaml::from_str(yaml)
        .map_err(|e| Error::config(format!("Failed to parse connector YAML: {e}")))?;

    validate_connector(&def)?;
    Ok(def)
}

/// Validate a connector definition
fn validate_connector(def: &ConnectorDefinition) -> Result<()> {
    if def.name.is_empty() {
        return Err(Error::config("Connector name cannot be empty"));
    }

    if def.base_url.is_empty() {
        return Err(Error::config("Connector base_url cannot be empty"));
    }

    if def.streams.is_empty() {
        return Err(Error::config("Connector must have at least one stream"));
    }

    let stream_names: std::collections::HashSet<_> = def.streams.iter().map(|s| &s.name).collect();

    if stream_names.len() != def.streams.len() {
        return Err(Error::config("Duplicate stream names found"));
    }

    for stream in &def.streams {
        validate_stream(def, stream)?;
    }

    Ok(())
}

/// Validate a stream definition
fn validate_stream(
    def: &ConnectorDefinition,
    stream: &crate::loader::types::StreamDefinition,
) -> Result<()> {
    if stream.name.is_empty() {
        return Err(Error::config("Stream name cannot be empty"));
    }

    if stream.path.is_empty() {
        return Err(Error::config(format!(
            "Stream '{}' path cannot be empty",
            stream.name
        )));
    }

    if let PaginationDefinition::Cursor {
        cursor_path,
        cursor_header,
        ..
    } = &stream.pagination
    {
        match (cursor_path, cursor_header) {
            (Some(_), Some(_)) => {
                return Err(Error::config(format!(
                    "Stream '{}' pagination declares both cursor_path and cursor_header",
                    stream.name
                )));
            }
            (None, None) => {
                return Err(Error::config(format!(
                    "Stream '{}' cursor pagination needs cursor_path or cursor_header",
                    stream.name
                )));
            }
            _ => {}
        }
    }

    if let PartitionDefinition::Parent { parent_stream, .. } = &stream.partition {
        if def.stream(parent_stream).is_none() {
            return Err(Error::config(format!(
                "Stream '{}' references unknown parent stream '{}'",
                stream.name, parent_stream
            )));
        }
        if parent_stream == &stream.name {
            return Err(Error::config(format!(
                "Stream '{}' cannot be its own parent",
                stream.name
            )));
        }
    }

    if stream.cursor_param.is_some() && stream.cursor_field.is_none() {
        return Err(Error::config(format!(
            "Stream '{}' sets cursor_param without cursor_field",
            stream.name
        )));
    }

    Ok(())
}
