pub mod cli;
pub mod error;
pub mod models;
pub mod processors;
pub mod readers;
pub mod settings;
pub mod utils;
pub mod writers;

pub use error::{ProcessingError, Result};
pub use models::{CoordinatePair, ExpandedRow, ExpandedTable, Table};
pub use processors::{expand_table, parse_coordinates, CoordinateParser, RowExpander};
