pub mod constants;
pub mod coordinates;
pub mod filename;
pub mod progress;

pub use constants::*;
pub use coordinates::{format_dms_text, normalize_decimal_separator, parse_dms_tokens};
pub use filename::generate_timestamped_filename;
pub use progress::ProgressReporter;
