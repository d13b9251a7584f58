//! Pagination module
//!
//! Supports: Cursor (body or header token), Page Number, Link Header, None
//!
//! # Overview
//!
//! The pagination module provides a unified interface for handling the
//! pagination patterns the vendor APIs use. Each strategy extracts the next
//! page parameters from responses and tracks when pagination is complete.

mod strategies;
mod types;

pub use strategies::{CursorPaginator, LinkHeaderPaginator, NoPaginator, PageNumberPaginator};
pub use types::{
    check_stop_condition, CursorSource, NextPage, PaginationState, Paginator, StopCondition,
    StopResult,
};
