use crate::error::{ProcessingError, Result};
use crate::processors::ExportTable;
use crate::utils::constants::UTF8_BOM;
use std::fs;
use std::path::Path;
use tracing::info;

/// Writes an export table as delimited UTF-8 text
pub struct CsvWriter {
    delimiter: u8,
    with_bom: bool,
}

impl CsvWriter {
    /// Comma separated, no byte order mark
    pub fn new() -> Self {
        Self {
            delimiter: b',',
            with_bom: false,
        }
    }

    /// Variant that Excel on Windows opens with the right encoding
    pub fn excel_compatible() -> Self {
        Self::new().with_bom(true)
    }

    pub fn with_bom(mut self, with_bom: bool) -> Self {
        self.with_bom = with_bom;
        self
    }

    pub fn with_delimiter(mut self, delimiter: u8) -> Self {
        self.delimiter = delimiter;
        self
    }

    pub fn to_bytes(&self, table: &ExportTable) -> Result<Vec<u8>> {
        let mut buffer = Vec::new();
        if self.with_bom {
            buffer.extend_from_slice(UTF8_BOM);
        }

        let mut writer = csv::WriterBuilder::new()
            .delimiter(self.delimiter)
            .from_writer(buffer);

        writer.write_record(&table.headers)?;
        for record in &table.records {
            writer.write_record(record)?;
        }

        writer
            .into_inner()
            .map_err(|e| ProcessingError::Io(e.into_error()))
    }

    pub fn write_table(&self, table: &ExportTable, path: &Path) -> Result<()> {
        let bytes = self.to_bytes(table)?;
        fs::write(path, bytes)?;

        info!("Wrote {} rows to {}", table.len(), path.display());
        Ok(())
    }
}

impl Default for CsvWriter {
    fn default() -> Self {
        Self::new()
    }
}
