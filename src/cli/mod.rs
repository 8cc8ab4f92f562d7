pub mod args;
pub mod commands;
pub mod logging;

pub use args::{Cli, Commands, ExportFormat};
pub use commands::run;
