//! Report request, page and table types

use crate::error::Result;
use crate::output::{json_to_arrow, write_batch_to_parquet, ParquetWriterConfig};
use crate::scripts::ScriptParameter;
use crate::types::{Record, DEFAULT_PAGE_SIZE};
use arrow::record_batch::RecordBatch;
use serde::{Deserialize, Serialize, Serializer};
use std::path::Path;

// ============================================================================
// Request
// ============================================================================

/// Body of one `ExecuteCustomPagedScript` call
///
/// Only `page_number` changes between the pages of one fetch.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScriptRequest {
    pub script_id: String,
    pub page_number: u32,
    pub entries_per_page: u32,
    /// Sent as a JSON-encoded string, not a nested array
    #[serde(serialize_with = "encode_parameters")]
    pub parameters: Vec<ScriptParameter>,
}

impl ScriptRequest {
    /// Request for page 1
    pub fn new(
        script_id: impl Into<String>,
        parameters: Vec<ScriptParameter>,
        entries_per_page: u32,
    ) -> Self {
        Self {
            script_id: script_id.into(),
            page_number: 1,
            entries_per_page,
            parameters,
        }
    }

    /// Same request for another page
    #[must_use]
    pub fn for_page(&self, page_number: u32) -> Self {
        Self {
            page_number,
            ..self.clone()
        }
    }
}

#[allow(clippy::ptr_arg)]
fn encode_parameters<S>(
    parameters: &Vec<ScriptParameter>,
    serializer: S,
) -> std::result::Result<S::Ok, S::Error>
where
    S: Serializer,
{
    let encoded = serde_json::to_string(parameters).map_err(serde::ser::Error::custom)?;
    serializer.serialize_str(&encoded)
}

// ============================================================================
// Response
// ============================================================================

/// One page of script output
///
/// Both fields are required; a body missing either one is malformed.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ScriptPage {
    #[serde(rename = "TotalResults")]
    pub total_results: u64,
    #[serde(rename = "Results")]
    pub results: Vec<Record>,
}

// ============================================================================
// Options
// ============================================================================

/// Per-call fetch options
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FetchOptions {
    /// Rows requested per page
    pub page_size: u32,
    /// Log progress at info instead of debug
    pub verbose: bool,
}

impl Default for FetchOptions {
    fn default() -> Self {
        Self {
            page_size: DEFAULT_PAGE_SIZE,
            verbose: false,
        }
    }
}

impl FetchOptions {
    /// Options with the default page size
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the page size
    #[must_use]
    pub fn page_size(mut self, page_size: u32) -> Self {
        self.page_size = page_size;
        self
    }

    /// Enable progress logging at info level
    #[must_use]
    pub fn verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }
}

// ============================================================================
// Table
// ============================================================================

/// Rows of every page, in page order then server order
///
/// The row count is what the pages actually contained, which need not
/// match the `TotalResults` the server declared.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ReportTable {
    rows: Vec<Record>,
    total_results: u64,
    pages_fetched: u32,
}

impl ReportTable {
    /// Empty table for a report declaring `total_results` rows
    pub fn new(total_results: u64) -> Self {
        Self {
            rows: Vec::new(),
            total_results,
            pages_fetched: 0,
        }
    }

    /// Append one page's rows
    pub fn push_page(&mut self, rows: Vec<Record>) {
        self.rows.extend(rows);
        self.pages_fetched += 1;
    }

    /// All rows
    pub fn rows(&self) -> &[Record] {
        &self.rows
    }

    /// Take ownership of the rows
    pub fn into_rows(self) -> Vec<Record> {
        self.rows
    }

    /// Number of rows actually received
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// True when no rows were received
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Row count the server declared
    pub fn total_results(&self) -> u64 {
        self.total_results
    }

    /// Pages requested and appended
    pub fn pages_fetched(&self) -> u32 {
        self.pages_fetched
    }

    /// Column names in first-seen order across all rows
    pub fn columns(&self) -> Vec<String> {
        let mut columns: Vec<String> = Vec::new();
        for row in &self.rows {
            for key in row.keys() {
                if !columns.iter().any(|c| c == key) {
                    columns.push(key.clone());
                }
            }
        }
        columns
    }

    /// Convert to an Arrow record batch with an inferred schema
    pub fn to_record_batch(&self) -> Result<RecordBatch> {
        json_to_arrow(&self.rows, None)
    }

    /// Write the table to a Parquet file, returning the rows written
    pub fn write_parquet(&self, path: impl AsRef<Path>) -> Result<usize> {
        let batch = self.to_record_batch()?;
        write_batch_to_parquet(path, &batch, Some(&ParquetWriterConfig::default()))
    }
}

impl IntoIterator for ReportTable {
    type Item = Record;
    type IntoIter = std::vec::IntoIter<Record>;

    fn into_iter(self) -> Self::IntoIter {
        self.rows.into_iter()
    }
}
