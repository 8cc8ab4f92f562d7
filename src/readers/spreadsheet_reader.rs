use crate::error::{ProcessingError, Result};
use crate::models::{CellValue, Table};
use crate::readers::unique_headers;
use calamine::{open_workbook_auto, Data, Range, Reader};
use std::path::Path;
use tracing::{debug, info};

/// Loads worksheets from `.xlsx`, `.xlsm`, `.xls` and `.ods` workbooks.
///
/// Workbook parsing is synchronous; async callers should use `spawn_blocking`.
pub struct SpreadsheetReader {
    skip_blank_rows: bool,
}

impl SpreadsheetReader {
    pub fn new() -> Self {
        Self {
            skip_blank_rows: true,
        }
    }

    pub fn with_skip_blank_rows(skip_blank_rows: bool) -> Self {
        Self { skip_blank_rows }
    }

    /// List the workbook's sheet names in workbook order
    pub fn sheet_names(&self, path: &Path) -> Result<Vec<String>> {
        let workbook = open_workbook_auto(path)?;
        Ok(workbook.sheet_names())
    }

    /// Read one sheet (the first one when `sheet` is `None`) into a table.
    ///
    /// The first row of the sheet is the header.
    pub fn read_sheet(&self, path: &Path, sheet: Option<&str>) -> Result<Table> {
        let mut workbook = open_workbook_auto(path)?;
        let sheet_names = workbook.sheet_names();

        let sheet_name = match sheet {
            Some(name) if sheet_names.iter().any(|s| s == name) => name.to_string(),
            Some(name) => {
                return Err(ProcessingError::SheetNotFound {
                    sheet: name.to_string(),
                    available: sheet_names,
                })
            }
            None => sheet_names.first().cloned().ok_or_else(|| {
                ProcessingError::InvalidFormat(format!(
                    "Workbook has no sheets: {}",
                    path.display()
                ))
            })?,
        };

        info!("Reading sheet '{}' from {}", sheet_name, path.display());
        let range = workbook.worksheet_range(&sheet_name)?;
        let table = self.range_to_table(&range)?;

        debug!(
            "Sheet '{}': {} columns, {} rows",
            sheet_name,
            table.columns().len(),
            table.len()
        );
        Ok(table)
    }

    fn range_to_table(&self, range: &Range<Data>) -> Result<Table> {
        let mut rows = range.rows();

        let headers = match rows.next() {
            Some(header_row) => unique_headers(header_row.iter().map(header_text)),
            None => return Ok(Table::default()),
        };

        let mut table = Table::new(headers);
        for row in rows {
            let cells: Vec<CellValue> = row.iter().map(cell_from_data).collect();

            if self.skip_blank_rows && cells.iter().all(CellValue::is_empty) {
                continue;
            }

            table.push_row(cells)?;
        }

        Ok(table)
    }
}

impl Default for SpreadsheetReader {
    fn default() -> Self {
        Self::new()
    }
}

fn header_text(cell: &Data) -> String {
    cell_from_data(cell).to_string().trim().to_string()
}

/// Convert a calamine cell, rendering dates as ISO text
pub fn cell_from_data(cell: &Data) -> CellValue {
    match cell {
        Data::Empty => CellValue::Empty,
        Data::String(s) => CellValue::Text(s.clone()),
        Data::Int(i) => CellValue::Integer(*i),
        Data::Float(f) => CellValue::Float(*f),
        Data::Bool(b) => CellValue::Bool(*b),
        Data::DateTime(dt) => match dt.as_datetime() {
            Some(datetime) => CellValue::Text(datetime.to_string()),
            None => CellValue::Float(dt.as_f64()),
        },
        Data::DateTimeIso(s) | Data::DurationIso(s) => CellValue::Text(s.clone()),
        Data::Error(e) => CellValue::Text(e.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn range_from(rows: Vec<Vec<Data>>) -> Range<Data> {
        let height = rows.len() as u32;
        let width = rows.iter().map(|r| r.len()).max().unwrap_or(0) as u32;
        let mut range = Range::new((0, 0), (height - 1, width - 1));
        for (r, row) in rows.into_iter().enumerate() {
            for (c, cell) in row.into_iter().enumerate() {
                range.set_value((r as u32, c as u32), cell);
            }
        }
        range
    }

    #[test]
    fn test_cell_from_data() {
        assert_eq!(cell_from_data(&Data::Empty), CellValue::Empty);
        assert_eq!(cell_from_data(&Data::Int(3)), CellValue::Integer(3));
        assert_eq!(cell_from_data(&Data::Float(2.5)), CellValue::Float(2.5));
        assert_eq!(
            cell_from_data(&Data::String("3º03'52\"S".to_string())),
            CellValue::from("3º03'52\"S")
        );
    }

    #[test]
    fn test_range_to_table() {
        let range = range_from(vec![
            vec![
                Data::String("PROCESSO".to_string()),
                Data::Empty,
                Data::String("COORDENADAS".to_string()),
            ],
            vec![
                Data::Int(1),
                Data::Empty,
                Data::String("3º03'52,9838\"S 59º54'46,6013\"W".to_string()),
            ],
            vec![Data::Empty, Data::Empty, Data::Empty],
            vec![
                Data::Int(2),
                Data::Bool(true),
                Data::String("NÃO CONSTA".to_string()),
            ],
        ]);

        let table = SpreadsheetReader::new().range_to_table(&range).unwrap();
        assert_eq!(table.columns(), &["PROCESSO", "Unnamed: 1", "COORDENADAS"]);
        assert_eq!(table.len(), 2);
        assert_eq!(table.rows()[1][1], CellValue::Bool(true));
    }

    #[test]
    fn test_blank_rows_kept_when_requested() {
        let range = range_from(vec![
            vec![Data::String("A".to_string())],
            vec![Data::Empty],
            vec![Data::Int(1)],
        ]);

        let table = SpreadsheetReader::with_skip_blank_rows(false)
            .range_to_table(&range)
            .unwrap();
        assert_eq!(table.len(), 2);
    }

    #[test]
    fn test_missing_workbook() {
        let result = SpreadsheetReader::new().sheet_names(Path::new("does/not/exist.xlsx"));
        assert!(result.is_err());
    }
}
