//! Response decoder module
//!
//! Extracts record sequences out of raw response bodies. JSON (with a
//! configurable record selector) covers the vendor APIs; CSV exists for
//! Workday base snapshot reports.

mod decoders;
mod types;

pub use decoders::{CsvDecoder, JsonDecoder};
pub use types::{DecoderConfig, DecoderFormat, RecordDecoder};

#[cfg(test)]
mod tests;
