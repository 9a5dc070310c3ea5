//! HTTP client module
//!
//! Provides the HTTP client shared by authentication and report fetching.
//!
//! # Features
//!
//! - **Timeouts**: Client-wide request timeout, overridable per request
//! - **Rate Limiting**: Optional token bucket rate limiter using governor
//! - **Status Checking**: Non-2xx responses become typed errors

mod client;
mod rate_limit;

pub use client::{HttpClient, HttpClientConfig, HttpClientConfigBuilder, RequestBody, RequestConfig};
pub use rate_limit::{RateLimiter, RateLimiterConfig};
