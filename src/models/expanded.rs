use serde::{Deserialize, Serialize};

use crate::models::{CellValue, CoordinatePair, Row};
use crate::utils::constants::DERIVED_COLUMNS;

/// One output record: a copy of the source row plus one extracted point
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExpandedRow {
    pub source: Row,
    pub point_label: String,
    pub coordinates: CoordinatePair,
}

impl ExpandedRow {
    pub fn new(source: Row, index: usize, coordinates: CoordinatePair) -> Self {
        Self {
            source,
            point_label: point_label(index),
            coordinates,
        }
    }
}

/// Sequence label for the 1-based `index`-th point of a row: P01, P02, ...
pub fn point_label(index: usize) -> String {
    format!("P{:02}", index)
}

/// A value of the expanded table, before any export formatting
#[derive(Debug, Clone, PartialEq)]
pub enum OutputValue<'a> {
    Cell(&'a CellValue),
    Text(&'a str),
    Decimal(f64),
}

/// Where the values of one output column come from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ColumnSource {
    Source(usize),
    PointLabel,
    LatitudeDecimal,
    LongitudeDecimal,
    LatitudeDms,
    LongitudeDms,
}

impl ColumnSource {
    fn derived(name: &str) -> Option<Self> {
        match DERIVED_COLUMNS.iter().position(|c| *c == name)? {
            0 => Some(ColumnSource::PointLabel),
            1 => Some(ColumnSource::LatitudeDecimal),
            2 => Some(ColumnSource::LongitudeDecimal),
            3 => Some(ColumnSource::LatitudeDms),
            _ => Some(ColumnSource::LongitudeDms),
        }
    }
}

/// Result of a row expansion
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ExpandedTable {
    source_columns: Vec<String>,
    rows: Vec<ExpandedRow>,
}

impl ExpandedTable {
    pub fn new(source_columns: Vec<String>, rows: Vec<ExpandedRow>) -> Self {
        Self {
            source_columns,
            rows,
        }
    }

    pub fn source_columns(&self) -> &[String] {
        &self.source_columns
    }

    pub fn rows(&self) -> &[ExpandedRow] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Source columns followed by the derived columns not already present
    pub fn columns(&self) -> Vec<String> {
        let mut columns = self.source_columns.clone();
        for derived in DERIVED_COLUMNS {
            if !columns.iter().any(|c| c == derived) {
                columns.push(derived.to_string());
            }
        }
        columns
    }

    fn column_sources(&self) -> Vec<ColumnSource> {
        self.columns()
            .iter()
            .enumerate()
            .map(|(idx, name)| {
                ColumnSource::derived(name).unwrap_or(ColumnSource::Source(idx))
            })
            .collect()
    }

    /// Values of every row in `columns()` order; derived values override
    /// source cells that share their column name
    pub fn values(&self) -> Vec<Vec<OutputValue<'_>>> {
        let sources = self.column_sources();
        self.rows
            .iter()
            .map(|row| {
                sources
                    .iter()
                    .map(|source| match *source {
                        ColumnSource::Source(idx) => OutputValue::Cell(&row.source[idx]),
                        ColumnSource::PointLabel => OutputValue::Text(&row.point_label),
                        ColumnSource::LatitudeDecimal => {
                            OutputValue::Decimal(row.coordinates.latitude_decimal)
                        }
                        ColumnSource::LongitudeDecimal => {
                            OutputValue::Decimal(row.coordinates.longitude_decimal)
                        }
                        ColumnSource::LatitudeDms => {
                            OutputValue::Text(&row.coordinates.latitude_dms)
                        }
                        ColumnSource::LongitudeDms => {
                            OutputValue::Text(&row.coordinates.longitude_dms)
                        }
                    })
                    .collect()
            })
            .collect()
    }
}
