//! Report module
//!
//! Runs a server-side script page by page and flattens the pages into a
//! single [`ReportTable`].

mod fetcher;
mod types;

pub use fetcher::ReportFetcher;
pub use types::{FetchOptions, ReportTable, ScriptPage, ScriptRequest};
