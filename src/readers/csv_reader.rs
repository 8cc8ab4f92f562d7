use crate::error::Result;
use crate::models::{CellValue, Table};
use crate::readers::unique_headers;
use encoding_rs::{UTF_8, WINDOWS_1252};
use std::borrow::Cow;
use std::fs;
use std::path::Path;
use tracing::{debug, info, warn};

/// Reads delimited text files into a table. The first record is the header.
pub struct CsvReader {
    delimiter: Option<u8>,
}

impl CsvReader {
    /// Reader that detects `;` vs `,` from the header line
    pub fn new() -> Self {
        Self { delimiter: None }
    }

    pub fn with_delimiter(delimiter: u8) -> Self {
        Self {
            delimiter: Some(delimiter),
        }
    }

    pub fn read_table(&self, path: &Path) -> Result<Table> {
        info!("Reading CSV file {}", path.display());
        let bytes = fs::read(path)?;
        self.parse_bytes(&bytes)
    }

    /// Decode as UTF-8 (BOM removed), falling back to Windows-1252
    pub fn parse_bytes(&self, bytes: &[u8]) -> Result<Table> {
        let text = decode_text(bytes);
        let delimiter = self
            .delimiter
            .unwrap_or_else(|| detect_delimiter(text.lines().next().unwrap_or("")));

        let mut reader = csv::ReaderBuilder::new()
            .delimiter(delimiter)
            .flexible(true)
            .from_reader(text.as_bytes());

        let headers = unique_headers(reader.headers()?.iter().map(|h| h.trim().to_string()));
        let mut table = Table::new(headers);

        for record in reader.records() {
            let record = record?;
            let mut cells: Vec<CellValue> = record
                .iter()
                .map(|field| {
                    if field.is_empty() {
                        CellValue::Empty
                    } else {
                        CellValue::Text(field.to_string())
                    }
                })
                .collect();

            if cells.iter().all(CellValue::is_empty) {
                continue;
            }

            if cells.len() > table.columns().len() {
                warn!(
                    "Record at line {} has {} fields, truncating to {}",
                    record.position().map_or(0, |p| p.line()),
                    cells.len(),
                    table.columns().len()
                );
                cells.truncate(table.columns().len());
            }
            table.push_row(cells)?;
        }

        debug!("CSV table: {} columns, {} rows", table.columns().len(), table.len());
        Ok(table)
    }
}

impl Default for CsvReader {
    fn default() -> Self {
        Self::new()
    }
}

fn decode_text(bytes: &[u8]) -> Cow<'_, str> {
    let (text, had_errors) = UTF_8.decode_with_bom_removal(bytes);
    if !had_errors {
        return text;
    }

    debug!("Input is not valid UTF-8, decoding as Windows-1252");
    let (text, _, _) = WINDOWS_1252.decode(bytes);
    text
}

fn detect_delimiter(header_line: &str) -> u8 {
    let semicolons = header_line.matches(';').count();
    let commas = header_line.matches(',').count();
    if semicolons > commas {
        b';'
    } else {
        b','
    }
}
