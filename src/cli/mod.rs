//! CLI module
//!
//! Command-line interface for running connectors.
//!
//! # Commands
//!
//! - `spec` - Emit the connector specification
//! - `check` - Test connection to the API
//! - `discover` - List available streams and schemas
//! - `read` - Extract data from streams
//! - `validate` - Validate a connector definition offline
//! - `list` - List built-in connectors

mod commands;
mod runner;

pub use commands::{Cli, Commands};
pub use runner::Runner;
