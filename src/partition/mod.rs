//! Partition routing module
//!
//! Supports: Parent stream, List, Single slice
//!
//! # Overview
//!
//! Partitions split a stream into multiple sequential sub-queries:
//! - Child resources that require a parent ID (Greenhouse `job_openings`
//!   over `jobs`)
//! - Static list of values
//! - Everything else gets a single empty slice

mod routers;
mod types;

pub use routers::{ListRouter, ParentRouter, SingleSliceRouter};
pub use types::{PartitionConfig, PartitionRouter, PartitionValue};

#[cfg(test)]
mod tests;
