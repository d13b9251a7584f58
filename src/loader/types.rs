//! Loader types
//!
//! Declarative connector definition types for YAML parsing. A connector
//! definition names the vendor API, how to authenticate, and the streams
//! to extract; the engine interprets it at sync time.

use crate::types::{PropertyType, SyncMode, ValidationPolicy};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};

// ============================================================================
// Connector Definition
// ============================================================================

/// Top-level connector definition
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct ConnectorDefinition {
    /// Connector name
    pub name: String,
    /// Connector version
    #[serde(default = "default_version")]
    pub version: String,
    /// Base URL for all requests
    pub base_url: String,
    /// Authentication configuration
    #[serde(default)]
    pub auth: AuthDefinition,
    /// HTTP client configuration
    #[serde(default)]
    pub http: HttpDefinition,
    /// User-facing configuration specification
    #[serde(default)]
    pub spec: SpecDefinition,
    /// Connection check configuration
    #[serde(default)]
    pub check: Option<CheckDefinition>,
    /// Global headers
    #[serde(default)]
    pub headers: HashMap<String, String>,
    /// Stream definitions
    pub streams: Vec<StreamDefinition>,
}

impl ConnectorDefinition {
    /// Look up a stream by name
    pub fn stream(&self, name: &str) -> Option<&StreamDefinition> {
        self.streams.iter().find(|s| s.name == name)
    }
}

/// Connection check configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct CheckDefinition {
    /// URL path for check endpoint
    pub path: String,
    /// Query parameters
    #[serde(default)]
    pub params: HashMap<String, String>,
}

fn default_version() -> String {
    "0.1.0".to_string()
}

// ============================================================================
// Spec Definition
// ============================================================================

/// User-facing configuration specification.
///
/// Describes the config keys a connector needs (API key, tenant, etc.);
/// rendered as a JSON Schema by the `spec` command.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct SpecDefinition {
    /// Documentation URL
    #[serde(default)]
    pub documentation_url: Option<String>,
    /// Configuration properties, keyed by config field name
    #[serde(default)]
    pub properties: BTreeMap<String, PropertyDefinition>,
}

impl SpecDefinition {
    /// Names of required config properties
    pub fn required_properties(&self) -> Vec<&str> {
        self.properties
            .iter()
            .filter(|(_, p)| p.required)
            .map(|(name, _)| name.as_str())
            .collect()
    }
}

/// Single configuration property
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct PropertyDefinition {
    /// Property type
    #[serde(rename = "type", default)]
    pub property_type: PropertyType,
    /// Human-readable title
    #[serde(default)]
    pub title: Option<String>,
    /// Property description
    #[serde(default)]
    pub description: Option<String>,
    /// Whether this is a secret (masked in UIs)
    #[serde(default)]
    pub secret: bool,
    /// Whether this property is required
    #[serde(default)]
    pub required: bool,
    /// Default value
    #[serde(default)]
    pub default: Option<serde_json::Value>,
}

// ============================================================================
// Auth Definition
// ============================================================================

/// Authentication definition
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum AuthDefinition {
    /// No authentication
    #[default]
    None,
    /// API key in a header or query parameter
    ApiKey {
        /// Location: header or query
        #[serde(default = "default_auth_location")]
        location: String,
        /// Header name (for header location)
        #[serde(default)]
        header_name: Option<String>,
        /// Query parameter name (for query location)
        #[serde(default)]
        query_param: Option<String>,
        /// Prefix to add before the value
        #[serde(default)]
        prefix: Option<String>,
        /// Value (usually a template like `{{ config.api_key }}`)
        value: String,
    },
    /// Basic authentication
    Basic {
        /// Username (template)
        username: String,
        /// Password (template)
        #[serde(default)]
        password: String,
    },
    /// Bearer token authentication
    Bearer {
        /// Token value (template)
        token: String,
    },
}

fn default_auth_location() -> String {
    "header".to_string()
}

// ============================================================================
// HTTP Definition
// ============================================================================

/// HTTP client configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct HttpDefinition {
    /// Request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
    /// Maximum retries
    #[serde(default = "default_retries")]
    pub max_retries: u32,
    /// Rate limit (requests per second)
    #[serde(default)]
    pub rate_limit_rps: Option<u32>,
    /// Rate limit burst size
    #[serde(default)]
    pub rate_limit_burst: Option<u32>,
    /// User agent override
    #[serde(default)]
    pub user_agent: Option<String>,
}

impl Default for HttpDefinition {
    fn default() -> Self {
        Self {
            timeout_secs: default_timeout(),
            max_retries: default_retries(),
            rate_limit_rps: None,
            rate_limit_burst: None,
            user_agent: None,
        }
    }
}

fn default_timeout() -> u64 {
    30
}

fn default_retries() -> u32 {
    5
}

// ============================================================================
// Stream Definition
// ============================================================================

/// Stream definition
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct StreamDefinition {
    /// Stream name
    pub name: String,
    /// URL path (can contain templates)
    pub path: String,
    /// Query parameters
    #[serde(default)]
    pub params: HashMap<String, String>,
    /// Stream-specific headers
    #[serde(default)]
    pub headers: HashMap<String, String>,
    /// Response decoder
    #[serde(default)]
    pub decoder: DecoderDefinition,
    /// Pagination configuration
    #[serde(default)]
    pub pagination: PaginationDefinition,
    /// Partition router
    #[serde(default)]
    pub partition: PartitionDefinition,
    /// Primary key fields
    #[serde(default)]
    pub primary_key: Vec<String>,
    /// Record field used as incremental cursor
    #[serde(default)]
    pub cursor_field: Option<String>,
    /// Query parameter for server-side cursor filtering (e.g.,
    /// Greenhouse `updated_after`, Lever `updated_at_start`)
    #[serde(default)]
    pub cursor_param: Option<String>,
    /// HTTP statuses treated as an empty slice instead of an error
    /// (403/404 on per-parent endpoints)
    #[serde(default)]
    pub ignorable_statuses: Vec<u16>,
    /// Inline JSON Schema for records
    #[serde(default)]
    pub schema: Option<serde_json::Value>,
    /// What to do with records failing schema validation
    #[serde(default)]
    pub validation: ValidationPolicy,
}

impl StreamDefinition {
    /// Whether this stream supports incremental sync
    pub fn is_incremental(&self) -> bool {
        self.cursor_field.is_some()
    }

    /// Sync modes this stream supports
    pub fn supported_sync_modes(&self) -> Vec<SyncMode> {
        if self.is_incremental() {
            vec![SyncMode::FullRefresh, SyncMode::Incremental]
        } else {
            vec![SyncMode::FullRefresh]
        }
    }
}

// ============================================================================
// Decoder Definition
// ============================================================================

/// Response decoder configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum DecoderDefinition {
    /// JSON decoder
    Json {
        /// Field path to the record array (e.g., "data", "Report_Entry")
        #[serde(default)]
        records_path: Option<String>,
    },
    /// CSV decoder
    Csv {
        /// Delimiter character
        #[serde(default = "default_csv_delimiter")]
        delimiter: char,
        /// Whether first row is header
        #[serde(default = "default_true")]
        has_header: bool,
    },
}

impl Default for DecoderDefinition {
    fn default() -> Self {
        Self::Json { records_path: None }
    }
}

fn default_csv_delimiter() -> char {
    ','
}

fn default_true() -> bool {
    true
}

// ============================================================================
// Pagination Definition
// ============================================================================

/// Pagination configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum PaginationDefinition {
    /// No pagination
    #[default]
    None,
    /// Cursor-based pagination
    Cursor {
        /// Cursor query parameter name (unused when `as_url`)
        #[serde(default)]
        cursor_param: String,
        /// Path to next cursor in the response body
        #[serde(default)]
        cursor_path: Option<String>,
        /// Response header carrying the next cursor
        #[serde(default)]
        cursor_header: Option<String>,
        /// Treat the extracted value as a full next-page URL
        #[serde(default)]
        as_url: bool,
        /// Stop condition
        #[serde(default)]
        stop: StopConditionDefinition,
    },
    /// Page number pagination
    PageNumber {
        /// Page parameter name
        page_param: String,
        /// Start page (usually 0 or 1)
        #[serde(default = "default_start_page")]
        start_page: u32,
        /// Page size parameter name
        #[serde(default)]
        page_size_param: Option<String>,
        /// Page size
        #[serde(default)]
        page_size: Option<u32>,
        /// Stop condition
        #[serde(default)]
        stop: StopConditionDefinition,
    },
    /// Link header pagination (RFC 5988)
    LinkHeader {
        /// Relation to follow (usually "next")
        #[serde(default = "default_link_rel")]
        rel: String,
    },
}

fn default_start_page() -> u32 {
    1
}

fn default_link_rel() -> String {
    "next".to_string()
}

/// Stop condition for pagination
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum StopConditionDefinition {
    /// Stop when page is empty
    #[default]
    EmptyPage,
    /// Stop when field equals value (e.g., `hasMore == false`)
    Field {
        /// JSON path to field
        path: String,
        /// Value to match
        value: serde_json::Value,
    },
}

// ============================================================================
// Partition Definition
// ============================================================================

/// Partition router configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum PartitionDefinition {
    /// Single slice per stream
    #[default]
    None,
    /// Parent stream partition
    Parent {
        /// Parent stream name
        parent_stream: String,
        /// Field to extract from parent records
        parent_key: String,
        /// Field name in partition context
        partition_field: String,
    },
    /// List of static values
    List {
        /// List of values
        values: Vec<String>,
        /// Field name in partition context
        partition_field: String,
    },
}
