use crate::error::{ProcessingError, Result};
use crate::models::{ExpandedTable, OutputValue};
use crate::utils::constants::{
    DEFAULT_ROW_GROUP_SIZE, LATITUDE_DECIMAL_COLUMN, LONGITUDE_DECIMAL_COLUMN,
};
use arrow::array::{ArrayRef, Float64Array, StringArray};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use parquet::arrow::ArrowWriter;
use parquet::basic::{Compression, GzipLevel};
use parquet::file::properties::WriterProperties;
use std::fs::File;
use std::path::Path;
use std::sync::Arc;
use tracing::info;

/// Writes an expanded table to Parquet.
///
/// Decimal coordinates are stored as non-null `Float64`; every other column
/// is nullable `Utf8` with blank source cells written as nulls.
pub struct ParquetWriter {
    compression: Compression,
    row_group_size: usize,
}

impl ParquetWriter {
    pub fn new() -> Self {
        Self {
            compression: Compression::SNAPPY,
            row_group_size: DEFAULT_ROW_GROUP_SIZE,
        }
    }

    pub fn with_compression(mut self, compression: &str) -> Result<Self> {
        self.compression = match compression.to_lowercase().as_str() {
            "snappy" => Compression::SNAPPY,
            "gzip" => Compression::GZIP(GzipLevel::default()),
            "lz4" => Compression::LZ4,
            "zstd" => Compression::ZSTD(parquet::basic::ZstdLevel::default()),
            "none" => Compression::UNCOMPRESSED,
            _ => {
                return Err(ProcessingError::Config(format!(
                    "Unsupported compression: {}",
                    compression
                )))
            }
        };
        Ok(self)
    }

    pub fn with_row_group_size(mut self, size: usize) -> Self {
        self.row_group_size = size;
        self
    }

    /// Write the table to `path`. Nothing is written for an empty table.
    pub fn write_table(&self, table: &ExpandedTable, path: &Path) -> Result<()> {
        if table.is_empty() {
            return Ok(());
        }

        let batch = self.table_to_batch(table)?;

        let file = File::create(path)?;
        let props = WriterProperties::builder()
            .set_compression(self.compression)
            .set_max_row_group_size(self.row_group_size)
            .build();

        let mut writer = ArrowWriter::try_new(file, batch.schema(), Some(props))?;
        writer.write(&batch)?;
        writer.close()?;

        info!("Wrote {} rows to {}", table.len(), path.display());
        Ok(())
    }

    fn table_to_batch(&self, table: &ExpandedTable) -> Result<RecordBatch> {
        let columns = table.columns();
        let values = table.values();

        let mut fields = Vec::with_capacity(columns.len());
        let mut arrays: Vec<ArrayRef> = Vec::with_capacity(columns.len());

        for (idx, name) in columns.iter().enumerate() {
            if is_decimal_column(name) {
                let data: Vec<f64> = values
                    .iter()
                    .map(|row| match &row[idx] {
                        OutputValue::Decimal(v) => *v,
                        _ => f64::NAN,
                    })
                    .collect();
                fields.push(Field::new(name, DataType::Float64, false));
                arrays.push(Arc::new(Float64Array::from(data)));
            } else {
                let data: Vec<Option<String>> = values
                    .iter()
                    .map(|row| match &row[idx] {
                        OutputValue::Cell(cell) if cell.is_empty() => None,
                        OutputValue::Cell(cell) => Some(cell.to_string()),
                        OutputValue::Text(s) => Some(s.to_string()),
                        OutputValue::Decimal(v) => Some(v.to_string()),
                    })
                    .collect();
                fields.push(Field::new(name, DataType::Utf8, true));
                arrays.push(Arc::new(StringArray::from(data)));
            }
        }

        let schema = Arc::new(Schema::new(fields));
        Ok(RecordBatch::try_new(schema, arrays)?)
    }

    /// Get file statistics
    pub fn get_file_info(&self, path: &Path) -> Result<ParquetFileInfo> {
        use parquet::file::reader::{FileReader, SerializedFileReader};

        let file = File::open(path)?;
        let reader = SerializedFileReader::new(file)?;
        let metadata = reader.metadata();

        let file_metadata = metadata.file_metadata();
        let total_rows = file_metadata.num_rows();
        let num_columns = file_metadata.schema_descr().num_columns();
        let row_groups = metadata.num_row_groups();
        let file_size = std::fs::metadata(path)?.len();

        Ok(ParquetFileInfo {
            total_rows,
            num_columns,
            row_groups,
            file_size,
            compression: self.compression,
        })
    }
}

impl Default for ParquetWriter {
    fn default() -> Self {
        Self::new()
    }
}

fn is_decimal_column(name: &str) -> bool {
    name == LATITUDE_DECIMAL_COLUMN || name == LONGITUDE_DECIMAL_COLUMN
}

#[derive(Debug)]
pub struct ParquetFileInfo {
    pub total_rows: i64,
    pub num_columns: usize,
    pub row_groups: usize,
    pub file_size: u64,
    pub compression: Compression,
}

impl ParquetFileInfo {
    pub fn summary(&self) -> String {
        format!(
            "Parquet File Summary:\n\
            - Total rows: {}\n\
            - Columns: {}\n\
            - Row groups: {}\n\
            - File size: {:.2} KB\n\
            - Compression: {:?}",
            self.total_rows,
            self.num_columns,
            self.row_groups,
            self.file_size as f64 / 1024.0,
            self.compression
        )
    }
}
