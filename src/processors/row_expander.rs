use crate::error::Result;
use crate::models::{CellValue, ExpandedRow, ExpandedTable, Table};
use crate::processors::CoordinateParser;
use tracing::{debug, info};

/// Counts gathered during one expansion pass
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExpansionReport {
    pub rows_read: usize,
    pub rows_with_points: usize,
    pub rows_without_points: usize,
    pub total_points: usize,
    pub max_points_per_row: usize,
}

impl ExpansionReport {
    fn record_row(&mut self, points: usize) {
        self.rows_read += 1;
        self.total_points += points;
        if points == 0 {
            self.rows_without_points += 1;
        } else {
            self.rows_with_points += 1;
        }
        self.max_points_per_row = self.max_points_per_row.max(points);
    }

    pub fn summary(&self) -> String {
        format!(
            "Expansion Summary:\n\
             - Rows read: {}\n\
             - Rows with coordinates: {}\n\
             - Rows without coordinates: {}\n\
             - Points extracted: {}\n\
             - Most points in one row: {}",
            self.rows_read,
            self.rows_with_points,
            self.rows_without_points,
            self.total_points,
            self.max_points_per_row
        )
    }
}

/// Replaces each table row with one row per coordinate pair found in a column
#[derive(Debug, Clone, Default)]
pub struct RowExpander {
    parser: CoordinateParser,
}

impl RowExpander {
    pub fn new() -> Self {
        Self {
            parser: CoordinateParser::new(),
        }
    }

    pub fn with_parser(parser: CoordinateParser) -> Self {
        Self { parser }
    }

    /// Expand `table` on `coordinate_column`.
    ///
    /// Fails with `ColumnNotFound` before touching any row when the column is
    /// unknown. Rows without coordinates are dropped; an empty result is not
    /// an error.
    pub fn expand(&self, table: &Table, coordinate_column: &str) -> Result<ExpandedTable> {
        self.expand_with_report(table, coordinate_column)
            .map(|(expanded, _)| expanded)
    }

    pub fn expand_with_report(
        &self,
        table: &Table,
        coordinate_column: &str,
    ) -> Result<(ExpandedTable, ExpansionReport)> {
        let column_idx = table.require_column(coordinate_column)?;
        let mut report = ExpansionReport::default();
        let mut rows = Vec::new();

        for (row_idx, row) in table.rows().iter().enumerate() {
            let text = cell_text(&row[column_idx]);
            let pairs = self.parser.parse(text.as_deref());
            report.record_row(pairs.len());

            if pairs.is_empty() {
                debug!("Row {} has no coordinates", row_idx + 1);
                continue;
            }

            for (idx, pair) in pairs.into_iter().enumerate() {
                rows.push(ExpandedRow::new(row.clone(), idx + 1, pair));
            }
        }

        info!(
            "Expanded {} rows into {} points using column '{}'",
            report.rows_read, report.total_points, coordinate_column
        );

        Ok((
            ExpandedTable::new(table.columns().to_vec(), rows),
            report,
        ))
    }
}

/// Expand with default options (no range validation)
pub fn expand_table(table: &Table, coordinate_column: &str) -> Result<ExpandedTable> {
    RowExpander::new().expand(table, coordinate_column)
}

/// Stringify a cell for the parser. Empty cells count as absent.
fn cell_text(cell: &CellValue) -> Option<String> {
    match cell {
        CellValue::Empty => None,
        other => Some(other.to_string()),
    }
}
