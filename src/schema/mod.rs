//! Schema validation module
//!
//! Compiles each stream's declared JSON Schema and checks records against
//! it before emission.
//!
//! # Features
//!
//! - **Compilation**: Schemas compile once per stream at sync start
//! - **Policy**: Invalid records are dropped with a warning or fail the
//!   stream, per the stream's validation policy
//! - **Fallback**: Streams without a schema get a permissive object schema

mod validation;

pub use validation::{default_schema, SchemaValidator};

#[cfg(test)]
mod tests;
