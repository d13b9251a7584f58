//! Execution engine module
//!
//! Interprets a connector definition: resolves slices, drives pagination,
//! validates records, and tracks incremental cursors.
//!
//! # Overview
//!
//! The engine module provides:
//! - `SyncEngine` - Orchestrates data sync with state management
//! - `SyncConfig` - Configuration for sync operations
//! - Message types for output (Record, State, Log)

mod types;

pub use types::{LogLevel, Message, SyncConfig, SyncStats};

use crate::auth::{AuthConfig, Location};
use crate::config::{validate_config, ConfiguredCatalog};
use crate::decode::{CsvDecoder, JsonDecoder, RecordDecoder};
use crate::error::{Error, Result};
use crate::http::{HttpClient, HttpClientConfig, RateLimiterConfig, RequestConfig};
use crate::loader::{
    AuthDefinition, ConnectorDefinition, DecoderDefinition, PaginationDefinition,
    PartitionDefinition, StopConditionDefinition, StreamDefinition,
};
use crate::pagination::{
    CursorPaginator, CursorSource, LinkHeaderPaginator, NextPage, NoPaginator, PageNumberPaginator,
    PaginationState, Paginator, StopCondition,
};
use crate::partition::{ListRouter, ParentRouter, PartitionRouter, SingleSliceRouter};
use crate::schema::{default_schema, SchemaValidator};
use crate::state::StateManager;
use crate::template::{self, TemplateContext};
use crate::types::{JsonObject, SyncMode};
use serde_json::{json, Value};
use std::time::Instant;

/// Sink for messages emitted during sync
pub type MessageSink<'a> = &'a mut (dyn FnMut(Message) + Send);

/// Sync engine interpreting one connector definition
pub struct SyncEngine {
    /// The connector definition being interpreted
    definition: ConnectorDefinition,
    /// HTTP client (authenticated, rate limited)
    client: HttpClient,
    /// State manager
    state: StateManager,
    /// Base template context (config values only)
    context: TemplateContext,
    /// Sync configuration
    config: SyncConfig,
    /// Statistics
    stats: SyncStats,
}

impl SyncEngine {
    /// Create an engine for a connector definition and user config.
    ///
    /// Validates the config against the definition's spec, renders the
    /// base URL and auth templates, and builds the HTTP client.
    pub fn new(
        definition: ConnectorDefinition,
        user_config: &JsonObject,
        state: StateManager,
    ) -> Result<Self> {
        validate_config(&definition, user_config)?;

        let context = TemplateContext::with_config(Value::Object(user_config.clone()));
        let base_url = template::render(&definition.base_url, &context)?;
        let auth = build_auth(&definition.auth, &context)?;

        let mut builder = HttpClientConfig::builder()
            .base_url(base_url)
            .timeout(std::time::Duration::from_secs(definition.http.timeout_secs))
            .max_retries(definition.http.max_retries);

        if let Some(rps) = definition.http.rate_limit_rps {
            let burst = definition.http.rate_limit_burst.unwrap_or(rps);
            builder = builder.rate_limit(RateLimiterConfig::new(rps, burst));
        }
        if let Some(agent) = &definition.http.user_agent {
            builder = builder.user_agent(agent);
        }

        let client = HttpClient::with_auth(builder.build(), auth);

        Ok(Self {
            definition,
            client,
            state,
            context,
            config: SyncConfig::default(),
            stats: SyncStats::default(),
        })
    }

    /// Set sync configuration
    #[must_use]
    pub fn with_config(mut self, config: SyncConfig) -> Self {
        self.config = config;
        self
    }

    /// Get the connector definition
    pub fn definition(&self) -> &ConnectorDefinition {
        &self.definition
    }

    /// Get the state manager
    pub fn state(&self) -> &StateManager {
        &self.state
    }

    /// Get statistics
    pub fn stats(&self) -> &SyncStats {
        &self.stats
    }

    /// Reset statistics
    pub fn reset_stats(&mut self) {
        self.stats = SyncStats::default();
    }

    /// Verify the connection by issuing a single probe request.
    ///
    /// Uses the definition's check endpoint when declared, the first
    /// stream otherwise. A 401 surfaces as an auth error.
    pub async fn check(&self) -> Result<()> {
        let (path, params) = match &self.definition.check {
            Some(check) => (check.path.clone(), check.params.clone()),
            None => {
                let first = self
                    .definition
                    .streams
                    .first()
                    .ok_or_else(|| Error::config("Connector defines no streams"))?;
                (first.path.clone(), first.params.clone())
            }
        };

        let rendered_path = template::render(&path, &self.context)?;
        let mut req = RequestConfig::new().context("connection check");
        for (key, value) in &params {
            let rendered = template::render(value, &self.context)?;
            if !rendered.is_empty() {
                req = req.query(key, rendered);
            }
        }

        self.client.get_with_config(&rendered_path, req).await?;
        Ok(())
    }

    /// Sync every stream in the configured catalog, in catalog order.
    ///
    /// A failed stream is logged and counted; the sync moves on to the
    /// next stream (unless `fail_fast` is set). Config and auth errors
    /// abort the whole run. Check `SyncStats::failed` afterwards to
    /// decide the exit code.
    pub async fn sync(
        &mut self,
        catalog: &ConfiguredCatalog,
        sink: MessageSink<'_>,
    ) -> Result<SyncStats> {
        let start = Instant::now();

        for configured in &catalog.streams {
            let name = configured.stream.name.clone();
            let Some(stream) = self.definition.stream(&name).cloned() else {
                sink(Message::error(format!(
                    "Stream '{name}' not defined by connector '{}'",
                    self.definition.name
                )));
                self.stats.add_failed_stream();
                continue;
            };

            match self.sync_stream(&stream, configured.sync_mode, sink).await {
                Ok(()) => self.stats.add_stream(),
                Err(e) if e.is_config_error() => return Err(e),
                Err(e) => {
                    self.stats.add_failed_stream();
                    sink(Message::error(format!("Stream '{name}' failed: {e}")));
                    if self.config.fail_fast {
                        return Err(e);
                    }
                }
            }
        }

        #[allow(clippy::cast_possible_truncation)]
        self.stats.set_duration(start.elapsed().as_millis() as u64);

        Ok(self.stats.clone())
    }

    /// Sync a single stream: resolve its slices, page through each, and
    /// commit the incremental cursor once every slice has succeeded.
    pub async fn sync_stream(
        &mut self,
        stream: &StreamDefinition,
        sync_mode: SyncMode,
        sink: MessageSink<'_>,
    ) -> Result<()> {
        sink(Message::info(format!(
            "Starting sync for stream: {}",
            stream.name
        )));

        let schema = stream.schema.clone().unwrap_or_else(default_schema);
        let validator = SchemaValidator::new(&stream.name, &schema, stream.validation)?;

        let incremental = sync_mode == SyncMode::Incremental && stream.is_incremental();
        let prior_cursor = if incremental {
            self.state.get_cursor(&stream.name).await
        } else {
            None
        };

        let slices = self.resolve_slices(stream).await?;
        sink(Message::debug(format!(
            "Stream '{}': {} slice(s)",
            stream.name,
            slices.len()
        )));

        let mut max_cursor: Option<String> = None;
        let mut emitted = 0usize;

        'slices: for slice in slices {
            let mut ctx = self.context.clone();
            if !slice.values.is_empty() {
                ctx.set_partition(serde_json::to_value(&slice.values)?);
            }
            if let Some(cursor) = &prior_cursor {
                ctx.set_state(json!({ "cursor": cursor }));
            }

            let label = if slice.id.is_empty() {
                stream.name.clone()
            } else {
                format!("{}[{}]", stream.name, slice.id)
            };

            let records = match self
                .read_slice(stream, &ctx, prior_cursor.as_deref(), &label)
                .await
            {
                Ok(records) => records,
                Err(e) if e.is_ignorable() => {
                    self.stats.add_skipped_slice();
                    sink(Message::warn(format!("Skipping slice: {e}")));
                    continue;
                }
                Err(e) => return Err(e),
            };

            for record in records {
                if !validator.check(&record)? {
                    self.stats.add_dropped(1);
                    continue;
                }

                if let Some(field) = stream.cursor_field.as_deref() {
                    if let Some(value) = record_cursor_value(&record, field) {
                        // Vendors with coarse server-side filters re-deliver
                        // rows at the boundary; drop anything at or below
                        // the prior cursor client-side
                        if incremental {
                            if let Some(prior) = &prior_cursor {
                                if !cursor_greater(&value, prior) {
                                    continue;
                                }
                            }
                        }
                        if max_cursor
                            .as_deref()
                            .map_or(true, |max| cursor_greater(&value, max))
                        {
                            max_cursor = Some(value);
                        }
                    }
                }

                sink(Message::record(&stream.name, record));
                emitted += 1;
                self.stats.add_records(1);

                if self.config.max_records > 0 && emitted >= self.config.max_records {
                    break 'slices;
                }
            }
        }

        // Commit the cursor only now that every slice has succeeded; a
        // failed stream keeps its previous persisted cursor untouched
        if incremental {
            let committed = match (max_cursor, prior_cursor) {
                (Some(new), Some(prior)) if cursor_greater(&prior, &new) => Some(prior),
                (Some(new), _) => Some(new),
                (None, prior) => prior,
            };
            if let Some(cursor) = committed {
                self.state.set_cursor(&stream.name, cursor.clone()).await;
                self.state.save().await?;
                sink(Message::state(&stream.name, json!({ "cursor": cursor })));
            }
        }

        sink(Message::info(format!(
            "Completed sync for {}: {emitted} records",
            stream.name
        )));

        Ok(())
    }

    /// Resolve the slices for a stream.
    ///
    /// Parent-partitioned streams read the parent stream in full first
    /// and fan out over its records; duplicate parent keys collapse in
    /// the router, so each unique parent is requested at most once.
    async fn resolve_slices(
        &mut self,
        stream: &StreamDefinition,
    ) -> Result<Vec<crate::partition::PartitionValue>> {
        match &stream.partition {
            PartitionDefinition::None => SingleSliceRouter.partitions(),
            PartitionDefinition::List {
                values,
                partition_field,
            } => ListRouter::new(values.clone(), partition_field).partitions(),
            PartitionDefinition::Parent {
                parent_stream,
                parent_key,
                partition_field,
            } => {
                let parent = self
                    .definition
                    .stream(parent_stream)
                    .cloned()
                    .ok_or_else(|| {
                        Error::partition(
                            &stream.name,
                            format!("unknown parent stream '{parent_stream}'"),
                        )
                    })?;
                let ctx = self.context.clone();
                let label = format!("{} (parent of {})", parent.name, stream.name);
                let records = self.read_slice(&parent, &ctx, None, &label).await?;
                ParentRouter::new(records, parent_key, partition_field).partitions()
            }
        }
    }

    /// Page through one slice and collect its records.
    ///
    /// An ignorable status (403/404 on a per-parent endpoint) surfaces as
    /// `Error::Ignorable` for the caller to skip.
    async fn read_slice(
        &mut self,
        stream: &StreamDefinition,
        ctx: &TemplateContext,
        prior_cursor: Option<&str>,
        label: &str,
    ) -> Result<Vec<Value>> {
        let decoder = build_decoder(&stream.decoder);
        let paginator = build_paginator(&stream.pagination);

        let mut pagination_state = PaginationState::new();
        let mut extra_params = paginator.initial_params(&pagination_state);
        let mut url = template::render(&stream.path, ctx)?;
        let mut follow_url = false;
        let mut records = Vec::new();

        loop {
            let mut req = RequestConfig::new()
                .ignorable(stream.ignorable_statuses.iter().copied())
                .context(label);

            for (key, value) in &self.definition.headers {
                req = req.header(key, template::render(value, ctx)?);
            }
            for (key, value) in &stream.headers {
                req = req.header(key, template::render(value, ctx)?);
            }

            // A full next-page URL already carries its query string
            if !follow_url {
                for (key, value) in &stream.params {
                    let rendered = template::render(value, ctx)?;
                    if !rendered.is_empty() {
                        req = req.query(key, rendered);
                    }
                }
                if let (Some(param), Some(cursor)) = (stream.cursor_param.as_deref(), prior_cursor)
                {
                    req = req.query(param, cursor);
                }
                for (key, value) in &extra_params {
                    req = req.query(key, value);
                }
            }

            let response = self.client.get_with_config(&url, req).await?;
            let headers = response.headers().clone();
            let body = response.text().await.map_err(Error::Http)?;

            self.stats.add_page();

            let page_records = decoder.decode(&body)?;
            let body_json = decoder.decode_raw(&body)?;
            let count = page_records.len();
            tracing::debug!(stream = %stream.name, slice = %label, count, "Fetched page");
            records.extend(page_records);

            match paginator.process_response(&body_json, &headers, count, &mut pagination_state) {
                NextPage::Done => break,
                NextPage::Continue {
                    query_params,
                    url: Some(next),
                } => {
                    url = next;
                    follow_url = true;
                    extra_params = query_params;
                }
                NextPage::Continue {
                    query_params,
                    url: None,
                } => {
                    extra_params = query_params;
                }
            }
        }

        Ok(records)
    }
}

impl std::fmt::Debug for SyncEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SyncEngine")
            .field("connector", &self.definition.name)
            .field("config", &self.config)
            .field("stats", &self.stats)
            .finish_non_exhaustive()
    }
}

// ============================================================================
// Definition -> runtime mapping
// ============================================================================

/// Build the runtime auth config, rendering credential templates
pub(crate) fn build_auth(def: &AuthDefinition, ctx: &TemplateContext) -> Result<AuthConfig> {
    Ok(match def {
        AuthDefinition::None => AuthConfig::None,
        AuthDefinition::Basic { username, password } => AuthConfig::Basic {
            username: template::render(username, ctx)?,
            password: template::render(password, ctx)?,
        },
        AuthDefinition::Bearer { token } => AuthConfig::Bearer {
            token: template::render(token, ctx)?,
        },
        AuthDefinition::ApiKey {
            location,
            header_name,
            query_param,
            prefix,
            value,
        } => AuthConfig::ApiKey {
            location: match location.as_str() {
                "query" => Location::Query,
                _ => Location::Header,
            },
            header_name: header_name.clone(),
            query_param: query_param.clone(),
            prefix: prefix.clone(),
            value: template::render(value, ctx)?,
        },
    })
}

/// Build the paginator for a stream's pagination definition
pub(crate) fn build_paginator(def: &PaginationDefinition) -> Box<dyn Paginator> {
    match def {
        PaginationDefinition::None => Box::new(NoPaginator),
        PaginationDefinition::Cursor {
            cursor_param,
            cursor_path,
            cursor_header,
            as_url,
            stop,
        } => {
            let source = match (cursor_path, cursor_header) {
                (_, Some(header)) => CursorSource::Header(header.clone()),
                (Some(path), None) => CursorSource::Body(path.clone()),
                (None, None) => CursorSource::Body("next".to_string()),
            };
            Box::new(CursorPaginator {
                cursor_param: cursor_param.clone(),
                source,
                as_url: *as_url,
                stop_condition: build_stop_condition(stop),
            })
        }
        PaginationDefinition::PageNumber {
            page_param,
            start_page,
            page_size_param,
            page_size,
            stop,
        } => Box::new(PageNumberPaginator {
            page_param: page_param.clone(),
            start_page: *start_page,
            page_size_param: page_size_param.clone(),
            page_size: *page_size,
            stop_condition: build_stop_condition(stop),
        }),
        PaginationDefinition::LinkHeader { rel } => Box::new(LinkHeaderPaginator::new(rel)),
    }
}

fn build_stop_condition(def: &StopConditionDefinition) -> StopCondition {
    match def {
        StopConditionDefinition::EmptyPage => StopCondition::EmptyPage,
        StopConditionDefinition::Field { path, value } => StopCondition::field(path, value.clone()),
    }
}

/// Build the decoder for a stream's decoder definition
pub(crate) fn build_decoder(def: &DecoderDefinition) -> Box<dyn RecordDecoder> {
    match def {
        DecoderDefinition::Json { records_path } => match records_path {
            Some(path) => Box::new(JsonDecoder::with_path(path)),
            None => Box::new(JsonDecoder::new()),
        },
        DecoderDefinition::Csv {
            delimiter,
            has_header,
        } => Box::new(CsvDecoder::with_options(*delimiter, *has_header)),
    }
}

// ============================================================================
// Cursor helpers
// ============================================================================

/// Extract the cursor value from a record (dot notation for nested fields)
pub(crate) fn record_cursor_value(record: &Value, cursor_field: &str) -> Option<String> {
    let mut current = record;
    for part in cursor_field.split('.') {
        current = current.get(part)?;
    }
    match current {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

/// Compare two cursor values: numeric when both sides parse as numbers
/// (Lever's epoch-millisecond timestamps), lexicographic otherwise
/// (ISO 8601 timestamps sort correctly as strings)
pub(crate) fn cursor_greater(a: &str, b: &str) -> bool {
    match (a.parse::<f64>(), b.parse::<f64>()) {
        (Ok(x), Ok(y)) => x > y,
        _ => a > b,
    }
}
