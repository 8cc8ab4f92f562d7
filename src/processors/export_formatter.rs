use crate::models::{CellValue, ExpandedTable, OutputValue};
use crate::utils::constants::{DEFAULT_DECIMAL_PRECISION, DEFAULT_PLACEHOLDER};

/// Expanded table rendered to strings, ready for a text writer
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ExportTable {
    pub headers: Vec<String>,
    pub records: Vec<Vec<String>>,
}

impl ExportTable {
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Aligned plain-text rendering of the first `limit` records
    pub fn preview(&self, limit: usize) -> String {
        let shown = &self.records[..limit.min(self.records.len())];
        let mut widths: Vec<usize> = self.headers.iter().map(|h| h.chars().count()).collect();
        for record in shown {
            for (width, value) in widths.iter_mut().zip(record) {
                *width = (*width).max(value.chars().count());
            }
        }

        let render = |cells: &[String]| -> String {
            cells
                .iter()
                .zip(&widths)
                .map(|(cell, width)| format!("{:<width$}", cell, width = *width))
                .collect::<Vec<_>>()
                .join(" | ")
                .trim_end()
                .to_string()
        };

        let mut lines = vec![render(self.headers.as_slice())];
        lines.extend(shown.iter().map(|record| render(record.as_slice())));
        lines.join("\n")
    }
}

/// Fixed-precision decimals and placeholder substitution for blank cells
#[derive(Debug, Clone)]
pub struct ExportFormatter {
    precision: usize,
    placeholder: String,
}

impl ExportFormatter {
    pub fn new() -> Self {
        Self {
            precision: DEFAULT_DECIMAL_PRECISION,
            placeholder: DEFAULT_PLACEHOLDER.to_string(),
        }
    }

    pub fn with_precision(mut self, precision: usize) -> Self {
        self.precision = precision;
        self
    }

    pub fn with_placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.placeholder = placeholder.into();
        self
    }

    pub fn format(&self, table: &ExpandedTable) -> ExportTable {
        if table.is_empty() {
            return ExportTable::default();
        }

        let records = table
            .values()
            .iter()
            .map(|row| row.iter().map(|value| self.format_value(value)).collect())
            .collect();

        ExportTable {
            headers: table.columns(),
            records,
        }
    }

    fn format_value(&self, value: &OutputValue<'_>) -> String {
        match value {
            OutputValue::Decimal(v) => format!("{:.*}", self.precision, v),
            OutputValue::Text(s) => s.to_string(),
            OutputValue::Cell(cell) if cell.is_empty() => self.placeholder.clone(),
            OutputValue::Cell(CellValue::Float(v)) if v.is_nan() => self.placeholder.clone(),
            OutputValue::Cell(cell) => cell.to_string(),
        }
    }
}

impl Default for ExportFormatter {
    fn default() -> Self {
        Self::new()
    }
}
