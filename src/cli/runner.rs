//! CLI runner - executes commands
//!
//! Every data-bearing command writes newline-delimited JSON messages to
//! stdout (SPEC, CONNECTION_STATUS, CATALOG, RECORD, STATE, LOG); logs go
//! to stderr through tracing.

use crate::cli::commands::{Cli, Commands};
use crate::config::{self, Catalog, ConfiguredCatalog, ConnectorSpecification};
use crate::connectors::list_builtin_info;
use crate::engine::{LogLevel, Message, SyncConfig, SyncEngine};
use crate::error::{Error, Result};
use crate::loader::{load_connector, ConnectorDefinition};
use crate::state::StateManager;
use crate::types::JsonObject;
use serde_json::{json, Map, Value};
use std::path::Path;
use std::time::{SystemTime, UNIX_EPOCH};

/// CLI runner
pub struct Runner {
    cli: Cli,
}

impl Runner {
    /// Create a new runner
    pub fn new(cli: Cli) -> Self {
        Self { cli }
    }

    /// Run the CLI command
    pub async fn run(&self) -> Result<()> {
        match &self.cli.command {
            Commands::Spec => self.spec(),
            Commands::Check {
                config,
                config_json,
            } => {
                self.check(config.as_deref(), config_json.as_deref())
                    .await
            }
            Commands::Discover {
                config,
                config_json,
            } => self.discover(config.as_deref(), config_json.as_deref()),
            Commands::Read {
                config,
                config_json,
                catalog,
                state,
                state_json,
                streams,
                max_records,
                fail_fast,
            } => {
                self.read(ReadArgs {
                    config: config.as_deref(),
                    config_json: config_json.as_deref(),
                    catalog: catalog.as_deref(),
                    state: state.as_deref(),
                    state_json: state_json.as_deref(),
                    streams: streams.as_deref(),
                    max_records: *max_records,
                    fail_fast: *fail_fast,
                })
                .await
            }
            Commands::Validate => self.validate(),
            Commands::List => self.list_connectors(),
        }
    }

    /// Load the connector definition named on the command line
    fn load_definition(&self) -> Result<ConnectorDefinition> {
        let name = self
            .cli
            .connector
            .as_deref()
            .ok_or_else(|| Error::config("Connector not specified (use --connector)"))?;
        load_connector(name)
    }

    /// Load user config from a file or inline JSON (inline wins)
    fn load_config(&self, path: Option<&Path>, inline: Option<&str>) -> Result<JsonObject> {
        match (inline, path) {
            (Some(json), _) => config::parse_config(json),
            (None, Some(path)) => config::load_config(path),
            (None, None) => Ok(JsonObject::new()),
        }
    }

    /// Load state from a file or inline JSON (inline wins)
    fn load_state(&self, path: Option<&Path>, inline: Option<&str>) -> Result<StateManager> {
        match (inline, path) {
            (Some(json), _) => StateManager::from_json(json),
            (None, Some(path)) => StateManager::from_file(path),
            (None, None) => Ok(StateManager::in_memory()),
        }
    }

    /// Emit the connector specification
    fn spec(&self) -> Result<()> {
        let definition = self.load_definition()?;
        let spec = ConnectorSpecification::from_definition(&definition);
        emit(&json!({ "type": "SPEC", "spec": spec }));
        Ok(())
    }

    /// Probe the API and report connection status.
    ///
    /// A failed check is reported through the CONNECTION_STATUS message,
    /// not the exit code.
    async fn check(&self, config: Option<&Path>, config_json: Option<&str>) -> Result<()> {
        let definition = self.load_definition()?;
        let user_config = self.load_config(config, config_json)?;

        let status = match SyncEngine::new(definition, &user_config, StateManager::in_memory()) {
            Ok(engine) => engine.check().await,
            Err(e) => Err(e),
        };

        match status {
            Ok(()) => {
                emit(&json!({
                    "type": "CONNECTION_STATUS",
                    "connectionStatus": { "status": "SUCCEEDED" }
                }));
            }
            Err(e) => {
                emit(&json!({
                    "type": "CONNECTION_STATUS",
                    "connectionStatus": { "status": "FAILED", "message": e.to_string() }
                }));
            }
        }

        Ok(())
    }

    /// Emit the stream catalog
    fn discover(&self, config: Option<&Path>, config_json: Option<&str>) -> Result<()> {
        let definition = self.load_definition()?;
        // Schemas are static; the config is only validated when provided
        let user_config = self.load_config(config, config_json)?;
        if !user_config.is_empty() {
            config::validate_config(&definition, &user_config)?;
        }

        let catalog = Catalog::from_definition(&definition);
        emit(&json!({ "type": "CATALOG", "catalog": catalog }));
        Ok(())
    }

    /// Sync the configured streams, emitting RECORD/STATE/LOG messages.
    ///
    /// Streams sync sequentially in catalog order; a failed stream is
    /// skipped and the run exits non-zero after the remaining streams
    /// have finished.
    async fn read(&self, args: ReadArgs<'_>) -> Result<()> {
        let definition = self.load_definition()?;
        let user_config = self.load_config(args.config, args.config_json)?;
        let state = self.load_state(args.state, args.state_json)?;

        let mut catalog = match args.catalog {
            Some(path) => ConfiguredCatalog::from_file(path)?,
            None => ConfiguredCatalog::all_streams(&definition),
        };

        if let Some(names) = args.streams {
            let selected: Vec<&str> = names.split(',').map(str::trim).collect();
            catalog
                .streams
                .retain(|s| selected.contains(&s.stream.name.as_str()));
            if catalog.streams.is_empty() {
                return Err(Error::config(format!(
                    "No catalog streams match --streams {names}"
                )));
            }
        }

        let mut sync_config = SyncConfig::new().with_fail_fast(args.fail_fast);
        if let Some(max) = args.max_records {
            sync_config = sync_config.with_max_records(max);
        }

        let mut engine =
            SyncEngine::new(definition, &user_config, state)?.with_config(sync_config);

        let mut sink = |message: Message| emit(&airbyte_json(&message));
        let stats = engine.sync(&catalog, &mut sink).await?;

        emit(&json!({
            "type": "LOG",
            "log": {
                "level": "INFO",
                "message": format!(
                    "Sync finished: {} records, {} pages, {} stream(s) ok, {} failed in {}ms",
                    stats.records_synced,
                    stats.pages_fetched,
                    stats.streams_synced,
                    stats.streams_failed,
                    stats.duration_ms
                )
            }
        }));

        if stats.failed() {
            return Err(Error::Other(format!(
                "{} stream(s) failed to sync",
                stats.streams_failed
            )));
        }

        Ok(())
    }

    /// Validate the connector definition without contacting the API
    fn validate(&self) -> Result<()> {
        let definition = self.load_definition()?;
        println!(
            "Connector '{}' is valid: {} stream(s)",
            definition.name,
            definition.streams.len()
        );
        for stream in &definition.streams {
            let mode = if stream.is_incremental() {
                "incremental"
            } else {
                "full_refresh"
            };
            println!("  {} ({mode})", stream.name);
        }
        Ok(())
    }

    /// List built-in connectors
    fn list_connectors(&self) -> Result<()> {
        for info in list_builtin_info() {
            println!("{} [{}] - {}", info.name, info.category, info.description);
            for field in info.config_schema {
                let required = if field.required { "required" } else { "optional" };
                println!("    config: {} ({}, {required})", field.name, field.field_type);
            }
            println!("    streams: {}", info.streams.join(", "));
        }
        Ok(())
    }
}

/// Arguments for the read command
struct ReadArgs<'a> {
    config: Option<&'a Path>,
    config_json: Option<&'a str>,
    catalog: Option<&'a Path>,
    state: Option<&'a Path>,
    state_json: Option<&'a str>,
    streams: Option<&'a str>,
    max_records: Option<usize>,
    fail_fast: bool,
}

/// Print one message as a single JSON line on stdout
fn emit(value: &Value) {
    println!("{value}");
}

/// Convert an engine message to its wire representation
fn airbyte_json(message: &Message) -> Value {
    match message {
        Message::Record { stream, record } => json!({
            "type": "RECORD",
            "record": {
                "stream": stream,
                "data": record,
                "emitted_at": now_millis()
            }
        }),
        Message::State { stream, data } => {
            let mut streams = Map::new();
            streams.insert(stream.clone(), data.clone());
            json!({
                "type": "STATE",
                "state": { "data": { "streams": streams } }
            })
        }
        Message::Log { level, message } => json!({
            "type": "LOG",
            "log": {
                "level": level_name(*level),
                "message": message
            }
        }),
    }
}

fn level_name(level: LogLevel) -> &'static str {
    match level {
        LogLevel::Debug => "DEBUG",
        LogLevel::Info => "INFO",
        LogLevel::Warn => "WARN",
        LogLevel::Error => "ERROR",
    }
}

#[allow(clippy::cast_possible_truncation)]
fn now_millis() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}
