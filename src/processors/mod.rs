pub mod coordinate_parser;
pub mod export_formatter;
pub mod row_expander;

pub use coordinate_parser::{parse_coordinates, CoordinateParser};
pub use export_formatter::{ExportFormatter, ExportTable};
pub use row_expander::{expand_table, ExpansionReport, RowExpander};
