//! HTTP requester module
//!
//! One GET per page/slice, with retry, backoff, rate limiting, and the
//! response classification the sync engine's error policy depends on
//! (auth vs retriable vs ignorable).

mod client;
mod rate_limit;

pub use client::{HttpClient, HttpClientConfig, RequestConfig};
pub use rate_limit::{RateLimiter, RateLimiterConfig};

#[cfg(test)]
mod tests;
