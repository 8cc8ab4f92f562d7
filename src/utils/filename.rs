use chrono::{DateTime, Local, TimeZone};
use std::path::{Path, PathBuf};

/// Generate a unique export filename: `{base}_{YYYYMMDD_HHMMSS}.{ext}` under `dir`
pub fn generate_timestamped_filename(dir: &Path, base_name: &str, extension: &str) -> PathBuf {
    timestamped_filename_at(dir, base_name, extension, &Local::now())
}

fn timestamped_filename_at<Tz: TimeZone>(
    dir: &Path,
    base_name: &str,
    extension: &str,
    at: &DateTime<Tz>,
) -> PathBuf
where
    Tz::Offset: std::fmt::Display,
{
    let timestamp = at.format("%Y%m%d_%H%M%S");
    dir.join(format!("{}_{}.{}", base_name, timestamp, extension))
}
