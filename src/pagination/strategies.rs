//! Pagination strategy implementations
//!
//! Each strategy handles a specific pagination pattern.

use super::types::{
    check_stop_condition, extract_field_string, CursorSource, NextPage, PaginationState, Paginator,
    StopCondition, StopResult,
};
use reqwest::header::HeaderMap;
use serde_json::Value;
use std::collections::HashMap;

// ============================================================================
// Cursor Pagination
// ============================================================================

/// Cursor-based pagination.
///
/// An opaque token from the response selects the next page. Lever returns
/// the token under `next` and stops via `hasNext`; Lattice returns
/// `endingCursor` and stops via `hasMore`. Some APIs hand back a full
/// next-page URL instead of a token; `as_url` covers those.
#[derive(Debug, Clone)]
pub struct CursorPaginator {
    /// Query parameter name for the cursor
    pub cursor_param: String,
    /// Where the next-page token comes from
    pub source: CursorSource,
    /// Treat the extracted token as a full next-page URL
    pub as_url: bool,
    /// Stop condition
    pub stop_condition: StopCondition,
}

impl CursorPaginator {
    /// Create a cursor paginator reading the token from a body field
    pub fn new(
        cursor_param: impl Into<String>,
        cursor_path: impl Into<String>,
        stop_condition: StopCondition,
    ) -> Self {
        Self {
            cursor_param: cursor_param.into(),
            source: CursorSource::Body(cursor_path.into()),
            as_url: false,
            stop_condition,
        }
    }

    /// Create a cursor paginator reading the token from a response header
    pub fn from_header(
        cursor_param: impl Into<String>,
        header: impl Into<String>,
        stop_condition: StopCondition,
    ) -> Self {
        Self {
            cursor_param: cursor_param.into(),
            source: CursorSource::Header(header.into()),
            as_url: false,
            stop_condition,
        }
    }

    /// Use the extracted token as a full next-page URL
    #[must_use]
    pub fn as_url(mut self) -> Self {
        self.as_url = true;
        self
    }

    fn extract_token(&self, body: &Value, headers: &HeaderMap) -> Option<String> {
        match &self.source {
            CursorSource::Body(path) => extract_field_string(body, path),
            CursorSource::Header(name) => headers
                .get(name.as_str())
                .and_then(|v| v.to_str().ok())
                .map(String::from),
        }
    }
}

impl Paginator for CursorPaginator {
    fn initial_params(&self, state: &PaginationState) -> HashMap<String, String> {
        let mut params = HashMap::new();
        if !self.as_url {
            if let Some(cursor) = &state.cursor {
                params.insert(self.cursor_param.clone(), cursor.clone());
            }
        }
        params
    }

    fn process_response(
        &self,
        body: &Value,
        headers: &HeaderMap,
        records_count: usize,
        state: &mut PaginationState,
    ) -> NextPage {
        state.add_fetched(records_count as u64);

        // Check stop condition first
        if check_stop_condition(&self.stop_condition, body, records_count) == StopResult::Stop {
            state.mark_done();
            return NextPage::Done;
        }

        // Extract the next-page token; absence means exhaustion
        match self.extract_token(body, headers) {
            Some(token) if !token.is_empty() => {
                state.set_cursor(token.clone());
                if self.as_url {
                    NextPage::with_url(token)
                } else {
                    NextPage::with_param(&self.cursor_param, token)
                }
            }
            _ => {
                state.mark_done();
                NextPage::Done
            }
        }
    }
}

// ============================================================================
// Page Number Pagination
// ============================================================================

/// Page number pagination.
///
/// Workday's tenant gateway takes `page`/`per_page` (default 200 per page)
/// and signals the last page by returning fewer records than requested.
#[derive(Debug, Clone)]
pub struct PageNumberPaginator {
    /// Query parameter name for page number
    pub page_param: String,
    /// First page number (usually 0 or 1)
    pub start_page: u32,
    /// Optional page size parameter name
    pub page_size_param: Option<String>,
    /// Page size value
    pub page_size: Option<u32>,
    /// Stop condition
    pub stop_condition: StopCondition,
}

impl PageNumberPaginator {
    /// Create a new page number paginator
    pub fn new(page_param: impl Into<String>, start_page: u32) -> Self {
        Self {
            page_param: page_param.into(),
            start_page,
            page_size_param: None,
            page_size: None,
            stop_condition: StopCondition::EmptyPage,
        }
    }

    /// Set page size parameter
    #[must_use]
    pub fn with_page_size(mut self, param: impl Into<String>, size: u32) -> Self {
        self.page_size_param = Some(param.into());
        self.page_size = Some(size);
        self
    }

    /// Set stop condition
    #[must_use]
    pub fn with_stop_condition(mut self, condition: StopCondition) -> Self {
        self.stop_condition = condition;
        self
    }
}

impl Paginator for PageNumberPaginator {
    fn initial_params(&self, state: &PaginationState) -> HashMap<String, String> {
        let mut params = HashMap::new();
        let page = if state.page == 0 {
            self.start_page
        } else {
            state.page
        };
        params.insert(self.page_param.clone(), page.to_string());
        if let (Some(param), Some(size)) = (&self.page_size_param, self.page_size) {
            params.insert(param.clone(), size.to_string());
        }
        params
    }

    fn process_response(
        &self,
        body: &Value,
        _headers: &HeaderMap,
        records_count: usize,
        state: &mut PaginationState,
    ) -> NextPage {
        state.add_fetched(records_count as u64);

        // Check stop condition
        if check_stop_condition(&self.stop_condition, body, records_count) == StopResult::Stop {
            state.mark_done();
            return NextPage::Done;
        }

        // A short page is the last page
        if let Some(size) = self.page_size {
            if records_count < size as usize {
                state.mark_done();
                return NextPage::Done;
            }
        }

        // Advance page
        if state.page == 0 {
            state.page = self.start_page;
        }
        state.next_page();

        let mut params = HashMap::new();
        params.insert(self.page_param.clone(), state.page.to_string());
        if let (Some(param), Some(size)) = (&self.page_size_param, self.page_size) {
            params.insert(param.clone(), size.to_string());
        }
        NextPage::with_params(params)
    }
}

// ============================================================================
// Link Header Pagination
// ============================================================================

/// Link header pagination (RFC 5988).
///
/// Greenhouse's Harvest API paginates exclusively through
/// `Link: <https://harvest.greenhouse.io/v1/...?page=2>; rel="next"`.
#[derive(Debug, Clone)]
pub struct LinkHeaderPaginator {
    /// Rel value to follow (default: "next")
    pub rel: String,
}

impl Default for LinkHeaderPaginator {
    fn default() -> Self {
        Self {
            rel: "next".to_string(),
        }
    }
}

impl LinkHeaderPaginator {
    /// Create a new link header paginator
    pub fn new(rel: impl Into<String>) -> Self {
        Self { rel: rel.into() }
    }
}

impl Paginator for LinkHeaderPaginator {
    fn initial_params(&self, _state: &PaginationState) -> HashMap<String, String> {
        HashMap::new()
    }

    fn process_response(
        &self,
        _body: &Value,
        headers: &HeaderMap,
        records_count: usize,
        state: &mut PaginationState,
    ) -> NextPage {
        state.add_fetched(records_count as u64);

        if let Some(link_header) = headers.get("link").and_then(|v| v.to_str().ok()) {
            if let Some(next_url) = parse_link_header(link_header, &self.rel) {
                state.next_page();
                return NextPage::with_url(next_url);
            }
        }

        state.mark_done();
        NextPage::Done
    }
}

/// Parse a Link header and extract the URL for the given rel
fn parse_link_header(header: &str, target_rel: &str) -> Option<String> {
    // Link header format: <url>; rel="next", <url>; rel="prev"
    for part in header.split(',') {
        let part = part.trim();
        let mut url = None;
        let mut rel = None;

        for segment in part.split(';') {
            let segment = segment.trim();
            if segment.starts_with('<') && segment.ends_with('>') {
                url = Some(&segment[1..segment.len() - 1]);
            } else if let Some(stripped) = segment.strip_prefix("rel=") {
                let rel_value = stripped.trim_matches('"').trim_matches('\'');
                rel = Some(rel_value);
            }
        }

        if let (Some(u), Some(r)) = (url, rel) {
            if r == target_rel {
                return Some(u.to_string());
            }
        }
    }

    None
}

// ============================================================================
// No Pagination
// ============================================================================

/// No pagination - one request per slice
#[derive(Debug, Clone, Default)]
pub struct NoPaginator;

impl Paginator for NoPaginator {
    fn initial_params(&self, _state: &PaginationState) -> HashMap<String, String> {
        HashMap::new()
    }

    fn process_response(
        &self,
        _body: &Value,
        _headers: &HeaderMap,
        records_count: usize,
        state: &mut PaginationState,
    ) -> NextPage {
        state.add_fetched(records_count as u64);
        state.mark_done();
        NextPage::Done
    }
}
