/// Cell values meaning "not recorded", compared after trim + upper-case
pub const SENTINEL_VALUES: [&str; 4] = ["NÃO CONSTA", "NAO CONSTA", "NOT INFORMED", ""];

/// Derived output column names
pub const POINT_LABEL_COLUMN: &str = "point_label";
pub const LATITUDE_DECIMAL_COLUMN: &str = "latitude_decimal";
pub const LONGITUDE_DECIMAL_COLUMN: &str = "longitude_decimal";
pub const LATITUDE_DMS_COLUMN: &str = "latitude_dms";
pub const LONGITUDE_DMS_COLUMN: &str = "longitude_dms";

/// Derived columns in output order
pub const DERIVED_COLUMNS: [&str; 5] = [
    POINT_LABEL_COLUMN,
    LATITUDE_DECIMAL_COLUMN,
    LONGITUDE_DECIMAL_COLUMN,
    LATITUDE_DMS_COLUMN,
    LONGITUDE_DMS_COLUMN,
];

/// Export defaults
pub const DEFAULT_DECIMAL_PRECISION: usize = 6;
pub const DEFAULT_PLACEHOLDER: &str = "N/A";
pub const DEFAULT_OUTPUT_DIR: &str = "output";
pub const DEFAULT_PREVIEW_ROWS: usize = 10;
pub const DEFAULT_ROW_GROUP_SIZE: usize = 10000;

/// Export file base names
pub const EXPORT_BASE_NAME: &str = "coordenadas_expandido";
pub const EXPORT_BASE_NAME_EN: &str = "coordinates_expanded";

/// UTF-8 byte order mark, lets Excel on Windows detect the encoding
pub const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

/// Header name for blank header cells, suffixed with the column index
pub const UNNAMED_COLUMN_PREFIX: &str = "Unnamed: ";
