pub mod csv_reader;
pub mod spreadsheet_reader;

pub use csv_reader::CsvReader;
pub use spreadsheet_reader::SpreadsheetReader;

use crate::error::{ProcessingError, Result};
use crate::models::Table;
use crate::utils::constants::UNNAMED_COLUMN_PREFIX;
use std::collections::HashSet;
use std::path::Path;

/// Input file kinds, detected from the file extension
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputFormat {
    Workbook,
    Csv,
}

impl InputFormat {
    pub fn from_path(path: &Path) -> Result<Self> {
        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_lowercase())
            .unwrap_or_default();

        match extension.as_str() {
            "xlsx" | "xlsm" | "xlsb" | "xls" | "ods" => Ok(InputFormat::Workbook),
            "csv" | "txt" => Ok(InputFormat::Csv),
            _ => Err(ProcessingError::UnsupportedInput(format!(
                "{} (expected .xlsx, .xls, .ods or .csv)",
                path.display()
            ))),
        }
    }
}

/// Load a table from a workbook sheet or a CSV file.
///
/// `sheet` only applies to workbooks and `delimiter` only to CSV input;
/// without a delimiter it is detected from the header line.
pub fn read_table(path: &Path, sheet: Option<&str>, delimiter: Option<u8>) -> Result<Table> {
    match InputFormat::from_path(path)? {
        InputFormat::Workbook => SpreadsheetReader::new().read_sheet(path, sheet),
        InputFormat::Csv => {
            let reader = match delimiter {
                Some(delimiter) => CsvReader::with_delimiter(delimiter),
                None => CsvReader::new(),
            };
            reader.read_table(path)
        }
    }
}

/// Name blank headers `Unnamed: {index}` and suffix repeats with `.1`, `.2`, ...
pub(crate) fn unique_headers(headers: impl Iterator<Item = String>) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut result = Vec::new();

    for (idx, header) in headers.enumerate() {
        let base = if header.is_empty() {
            format!("{}{}", UNNAMED_COLUMN_PREFIX, idx)
        } else {
            header
        };

        let mut name = base.clone();
        let mut suffix = 1;
        while !seen.insert(name.clone()) {
            name = format!("{}.{}", base, suffix);
            suffix += 1;
        }
        result.push(name);
    }

    result
}
