// Allow common clippy pedantic lints that aren't critical for this codebase
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::cast_lossless)]
#![allow(clippy::too_many_lines)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::items_after_statements)]
#![allow(clippy::unnecessary_wraps)]
#![allow(clippy::match_same_arms)]
#![allow(clippy::needless_pass_by_value)]

//! # linnworks-query
//!
//! Client for the Linnworks Query Data API. Authenticates with application
//! credentials, runs server-side report scripts page by page, and hands
//! back every row as one table.
//!
//! ## Features
//!
//! - **Session Auth**: Application id, secret and install token exchanged for a session token
//! - **Paged Scripts**: Every page of a script fetched with one token, rows kept in order
//! - **Predefined Reports**: Stock levels, orders, order totals and order details
//! - **Arrow Output**: RecordBatch conversion and Parquet files
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use linnworks_query::{Credentials, ReportFetcher, Result, Settings};
//! use chrono::NaiveDate;
//!
//! #[tokio::main]
//! async fn main() -> Result<()> {
//!     let settings = Settings::new(Credentials::new("app-id", "app-secret", "install-token"));
//!     let fetcher = ReportFetcher::from_settings(&settings)?;
//!
//!     let start = NaiveDate::from_ymd_opt(2022, 12, 1).unwrap();
//!     let end = NaiveDate::from_ymd_opt(2022, 12, 6).unwrap();
//!     let orders = fetcher.orders_between_dates(start, end).await?;
//!
//!     orders.write_parquet("orders.parquet")?;
//!     Ok(())
//! }
//! ```
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │                 Predefined Reports (8-11)                 │
//! │  stock_items_with_levels   orders / totals / details      │
//! └──────────────────────────────────────────────────────────┘
//!                              │
//! ┌──────────────────────────────────────────────────────────┐
//! │            ReportFetcher::fetch(script, params)           │
//! │  token → page 1 → TotalResults → pages 2..N → table       │
//! └──────────────────────────────────────────────────────────┘
//!                              │
//! ┌────────────┬──────────────┬──────────────┬──────────────┐
//! │    Auth    │     HTTP     │  Pagination  │    Output    │
//! ├────────────┼──────────────┼──────────────┼──────────────┤
//! │ App creds  │ JSON / form  │ Page plan    │ Arrow        │
//! │ Session    │ Timeout      │ ceil(total/  │ Parquet      │
//! │ token      │ Rate limit   │   size)      │              │
//! └────────────┴──────────────┴──────────────┴──────────────┘
//! ```

#![warn(clippy::all)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::doc_markdown)]

// ============================================================================
// Module declarations
// ============================================================================

/// Error types
pub mod error;

/// Common types and type aliases
pub mod types;

/// Settings from YAML or the environment
pub mod config;

/// Credentials and session tokens
pub mod auth;

/// HTTP client with timeout and rate limiting
pub mod http;

/// Page count arithmetic
pub mod pagination;

/// Paged script execution
pub mod report;

/// Script parameters and predefined reports
pub mod scripts;

/// Arrow/Parquet output
pub mod output;

// ============================================================================
// Re-exports
// ============================================================================

pub use error::{Error, Result};
pub use types::*;

// Re-export commonly used types
pub use auth::{Authenticator, Credentials, SessionProvider, SessionToken, StaticSession};
pub use config::Settings;
pub use report::{FetchOptions, ReportFetcher, ReportTable};
pub use scripts::{DateRange, ParameterType, Report, ScriptParameter};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Crate name
pub const NAME: &str = env!("CARGO_PKG_NAME");
