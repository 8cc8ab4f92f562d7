pub mod coordinate;
pub mod expanded;
pub mod table;

pub use coordinate::{CoordinatePair, DmsAngle, Hemisphere};
pub use expanded::{point_label, ExpandedRow, ExpandedTable, OutputValue};
pub use table::{CellValue, Row, Table};
