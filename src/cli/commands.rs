//! CLI commands and argument parsing

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Declarative HR data source connectors
#[derive(Parser, Debug)]
#[command(name = "peoplestream")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Connector: a built-in name (greenhouse, lever, lattice,
    /// knoetic-workday) or a path to a definition YAML
    #[arg(short = 'n', long, global = true)]
    pub connector: Option<String>,

    /// Verbose output (debug-level logging)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// CLI subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Emit the connector specification (required config fields)
    Spec,

    /// Test the connection with the given config
    Check {
        /// Configuration file (JSON)
        #[arg(long)]
        config: Option<PathBuf>,

        /// Inline config JSON
        #[arg(long)]
        config_json: Option<String>,
    },

    /// Discover available streams and their schemas
    Discover {
        /// Configuration file (JSON)
        #[arg(long)]
        config: Option<PathBuf>,

        /// Inline config JSON
        #[arg(long)]
        config_json: Option<String>,
    },

    /// Read records from the configured streams
    Read {
        /// Configuration file (JSON)
        #[arg(long)]
        config: Option<PathBuf>,

        /// Inline config JSON
        #[arg(long)]
        config_json: Option<String>,

        /// Configured catalog file (every stream when omitted)
        #[arg(long)]
        catalog: Option<PathBuf>,

        /// State file (loaded at start, committed per stream)
        #[arg(long)]
        state: Option<PathBuf>,

        /// Inline state JSON
        #[arg(long)]
        state_json: Option<String>,

        /// Streams to sync (comma-separated, narrows the catalog)
        #[arg(long)]
        streams: Option<String>,

        /// Maximum records per stream
        #[arg(long)]
        max_records: Option<usize>,

        /// Abort the run on the first failed stream
        #[arg(long)]
        fail_fast: bool,
    },

    /// Validate a connector definition without contacting the API
    Validate,

    /// List built-in connectors
    List,
}
