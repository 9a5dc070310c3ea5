//! Parquet file writer
//!
//! Writes report tables, via Arrow RecordBatches, to Parquet files.

use crate::error::{Error, Result};
use arrow::datatypes::Schema;
use arrow::record_batch::RecordBatch;
use parquet::arrow::ArrowWriter;
use parquet::basic::Compression;
use parquet::file::properties::WriterProperties;
use std::fs::File;
use std::path::Path;
use std::sync::Arc;

/// Configuration for Parquet writer
#[derive(Debug, Clone)]
pub struct ParquetWriterConfig {
    compression: Compression,
    row_group_size: usize,
}

impl Default for ParquetWriterConfig {
    fn default() -> Self {
        Self {
            compression: Compression::SNAPPY,
            row_group_size: 1024 * 1024,
        }
    }
}

impl ParquetWriterConfig {
    /// Create a new config with default settings
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set compression algorithm
    #[must_use]
    pub fn with_compression(mut self, compression: Compression) -> Self {
        self.compression = compression;
        self
    }

    /// Set row group size
    #[must_use]
    pub fn with_row_group_size(mut self, size: usize) -> Self {
        self.row_group_size = size;
        self
    }

    /// Use no compression
    #[must_use]
    pub fn uncompressed(mut self) -> Self {
        self.compression = Compression::UNCOMPRESSED;
        self
    }

    /// Get row group size
    #[must_use]
    pub fn row_group_size(&self) -> usize {
        self.row_group_size
    }

    fn build_properties(&self) -> WriterProperties {
        WriterProperties::builder()
            .set_compression(self.compression)
            .set_max_row_group_size(self.row_group_size)
            .build()
    }
}

/// Parquet file writer
pub struct ParquetWriter {
    writer: ArrowWriter<File>,
    rows_written: usize,
}

impl ParquetWriter {
    /// Create a new Parquet writer, creating parent directories as needed
    pub fn new(
        path: impl AsRef<Path>,
        schema: &Schema,
        config: &ParquetWriterConfig,
    ) -> Result<Self> {
        let path = path.as_ref();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }

        let file = File::create(path)
            .map_err(|e| Error::output(format!("Failed to create {}: {e}", path.display())))?;

        let writer = ArrowWriter::try_new(
            file,
            Arc::new(schema.clone()),
            Some(config.build_properties()),
        )?;

        Ok(Self {
            writer,
            rows_written: 0,
        })
    }

    /// Write a RecordBatch to the file
    pub fn write(&mut self, batch: &RecordBatch) -> Result<()> {
        self.writer.write(batch)?;
        self.rows_written += batch.num_rows();
        Ok(())
    }

    /// Get the number of rows written so far
    #[must_use]
    pub fn rows_written(&self) -> usize {
        self.rows_written
    }

    /// Close the writer and finalize the file
    pub fn close(self) -> Result<usize> {
        let rows = self.rows_written;
        self.writer.close()?;
        Ok(rows)
    }
}

/// Write a single RecordBatch to a Parquet file
pub fn write_batch_to_parquet(
    path: impl AsRef<Path>,
    batch: &RecordBatch,
    config: Option<&ParquetWriterConfig>,
) -> Result<usize> {
    let default_config = ParquetWriterConfig::default();
    let config = config.unwrap_or(&default_config);

    let mut writer = ParquetWriter::new(path, batch.schema().as_ref(), config)?;
    writer.write(batch)?;
    writer.close()
}
