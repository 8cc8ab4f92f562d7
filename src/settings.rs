use crate::error::Result;
use crate::utils::constants::{
    DEFAULT_DECIMAL_PRECISION, DEFAULT_OUTPUT_DIR, DEFAULT_PLACEHOLDER, DEFAULT_PREVIEW_ROWS,
};
use config::{Config, Environment, File};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Settings file looked up in the working directory when `--config` is absent
pub const DEFAULT_CONFIG_FILE: &str = "coord-extractor.toml";

/// Prefix for environment overrides, e.g. `COORD_EXTRACTOR_PRECISION=4`
pub const ENV_PREFIX: &str = "COORD_EXTRACTOR";

/// Export and parsing settings.
///
/// Layered as defaults, then the settings file, then environment variables;
/// command-line flags are applied on top by the CLI.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Settings {
    pub precision: usize,
    pub placeholder: String,
    pub validate_ranges: bool,
    pub output_dir: PathBuf,
    pub preview_rows: usize,
}

impl Settings {
    pub fn load(config_file: Option<&Path>) -> Result<Self> {
        let file_source = match config_file {
            Some(path) => File::from(path).required(true),
            None => File::with_name(DEFAULT_CONFIG_FILE).required(false),
        };

        let settings: Settings = Config::builder()
            .set_default("precision", DEFAULT_DECIMAL_PRECISION as i64)?
            .set_default("placeholder", DEFAULT_PLACEHOLDER)?
            .set_default("validate_ranges", false)?
            .set_default("output_dir", DEFAULT_OUTPUT_DIR)?
            .set_default("preview_rows", DEFAULT_PREVIEW_ROWS as i64)?
            .add_source(file_source)
            .add_source(Environment::with_prefix(ENV_PREFIX).try_parsing(true))
            .build()?
            .try_deserialize()?;

        debug!("Loaded settings: {:?}", settings);
        Ok(settings)
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            precision: DEFAULT_DECIMAL_PRECISION,
            placeholder: DEFAULT_PLACEHOLDER.to_string(),
            validate_ranges: false,
            output_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
            preview_rows: DEFAULT_PREVIEW_ROWS,
        }
    }
}
