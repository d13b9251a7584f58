// Allow common clippy pedantic lints that aren't critical for this codebase
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::cast_lossless)]
#![allow(clippy::too_many_lines)]
#![allow(clippy::ref_option)]
#![allow(clippy::unused_self)]
#![allow(clippy::struct_excessive_bools)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::items_after_statements)]
#![allow(clippy::unnecessary_wraps)]
#![allow(clippy::match_same_arms)]
#![allow(clippy::match_wildcard_for_single_variants)]
#![allow(clippy::needless_pass_by_value)]
#![allow(clippy::unused_async)]

//! # peoplestream
//!
//! Declarative connectors for HR and recruiting SaaS APIs (Greenhouse,
//! Lever, Lattice, Workday custom reports). A connector is a YAML
//! definition - auth, pagination, partitioning, incremental cursors -
//! interpreted by a generic extraction engine.
//!
//! ## Features
//!
//! - **Declarative streams**: each vendor endpoint is a YAML stream entry
//! - **Auth**: basic (key-as-username), bearer token, API key
//! - **Pagination**: cursor token, page number, RFC 5988 link header
//! - **Parent fan-out**: per-parent substreams with 403/404 skip policy
//! - **Incremental sync**: record cursors committed after stream success
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use peoplestream::engine::{Message, SyncEngine};
//! use peoplestream::config::ConfiguredCatalog;
//! use peoplestream::state::StateManager;
//! use peoplestream::{load_connector, Result};
//!
//! #[tokio::main]
//! async fn main() -> Result<()> {
//!     let definition = load_connector("greenhouse")?;
//!     let config = peoplestream::config::parse_config(r#"{"api_key": "..."}"#)?;
//!     let catalog = ConfiguredCatalog::all_streams(&definition);
//!
//!     let mut engine = SyncEngine::new(definition, &config, StateManager::in_memory())?;
//!     let mut sink = |message: Message| println!("{message:?}");
//!     engine.sync(&catalog, &mut sink).await?;
//!     Ok(())
//! }
//! ```
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                       CLI (NDJSON protocol)                     │
//! │   spec      check      discover      read      validate/list    │
//! └─────────────────────────────────────────────────────────────────┘
//!                                │
//! ┌──────────┬───────────┬───────┴───────┬───────────┬─────────────┐
//! │   Auth   │   HTTP    │   Paginate    │ Partition │   Records   │
//! ├──────────┼───────────┼───────────────┼───────────┼─────────────┤
//! │ Basic    │ GET       │ Cursor        │ Parent    │ Decode      │
//! │ Bearer   │ Retry     │ Page Number   │ List      │ Validate    │
//! │ API Key  │ Rate Limit│ Link Header   │ Single    │ Cursor      │
//! └──────────┴───────────┴───────────────┴───────────┴─────────────┘
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::doc_markdown)]
#![allow(missing_docs)]

// ============================================================================
// Module declarations
// ============================================================================

/// Error types
pub mod error;

/// Common types and type aliases
pub mod types;

/// Authentication implementations
pub mod auth;

/// HTTP client with retry and rate limiting
pub mod http;

/// Pagination strategies
pub mod pagination;

/// Partition routing
pub mod partition;

/// Response decoders (JSON, CSV)
pub mod decode;

/// Stream cursor state management
pub mod state;

/// Main execution engine
pub mod engine;

/// User config handling and catalog types
pub mod config;

/// YAML loader for connector definitions
pub mod loader;

/// Template interpolation
pub mod template;

/// Command-line interface
pub mod cli;

/// Record validation against stream schemas
pub mod schema;

/// Built-in connector definitions
pub mod connectors;

// ============================================================================
// Re-exports
// ============================================================================

pub use error::{Error, Result};
pub use types::*;

// Re-export commonly used types
pub use loader::{load_connector, load_connector_from_str, ConnectorDefinition};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Crate name
pub const NAME: &str = env!("CARGO_PKG_NAME");
