//! Output module
//!
//! Turns report rows into Arrow RecordBatches and Parquet files.
//!
//! # Overview
//!
//! This module provides utilities for:
//! - Inferring Arrow schemas from report rows
//! - Converting rows to Arrow RecordBatches
//! - Writing Parquet files

mod schema;
mod writer;

pub use schema::{infer_schema, json_to_arrow};
pub use writer::{write_batch_to_parquet, ParquetWriter, ParquetWriterConfig};
