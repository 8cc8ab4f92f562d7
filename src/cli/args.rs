use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use crate::utils::constants::{EXPORT_BASE_NAME, EXPORT_BASE_NAME_EN};

#[derive(Parser)]
#[command(name = "coord-extractor")]
#[command(about = "Extract DMS coordinate pairs from spreadsheet columns into one row per point")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    #[arg(short, long, global = true, help = "Enable verbose logging")]
    pub verbose: bool,

    #[arg(long, global = true, help = "Log file path")]
    pub log_file: Option<PathBuf>,

    #[arg(
        long,
        global = true,
        help = "Settings file [default: ./coord-extractor.toml if present]"
    )]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Extract coordinates from a column and export one row per point
    Expand {
        #[arg(short, long, help = "Input workbook (.xlsx, .xls, .ods) or CSV file")]
        input: PathBuf,

        #[arg(short, long, help = "Sheet name [default: first sheet]")]
        sheet: Option<String>,

        #[arg(
            long,
            value_parser = parse_delimiter,
            help = "CSV field delimiter [default: detected from the header]"
        )]
        delimiter: Option<u8>,

        #[arg(short, long, help = "Column holding the coordinate text")]
        column: String,

        #[arg(short, long, help = "Output directory [default: output]")]
        output_dir: Option<PathBuf>,

        #[arg(
            short,
            long = "format",
            value_enum,
            value_delimiter = ',',
            help = "Export formats, comma separated",
            default_values_t = [ExportFormat::CsvBom, ExportFormat::Csv, ExportFormat::Parquet]
        )]
        formats: Vec<ExportFormat>,

        #[arg(long, help = "Decimal places for decimal coordinates [default: 6]")]
        precision: Option<usize>,

        #[arg(long, help = "Text written for blank cells [default: N/A]")]
        placeholder: Option<String>,

        #[arg(long, help = "Drop points with out-of-range minutes, seconds or degrees")]
        validate_ranges: bool,

        #[arg(long, help = "Rows shown after processing [default: 10]")]
        preview: Option<usize>,

        #[arg(
            long,
            default_value = "snappy",
            help = "Parquet compression (snappy, gzip, lz4, zstd, none)"
        )]
        compression: String,
    },

    /// List sheets and columns of an input file
    Inspect {
        #[arg(short, long, help = "Input workbook (.xlsx, .xls, .ods) or CSV file")]
        input: PathBuf,

        #[arg(short, long, help = "Sheet name [default: first sheet]")]
        sheet: Option<String>,

        #[arg(
            long,
            value_parser = parse_delimiter,
            help = "CSV field delimiter [default: detected from the header]"
        )]
        delimiter: Option<u8>,
    },

    /// Extract coordinates from a single piece of text
    Parse {
        text: String,

        #[arg(long, help = "Print pairs as JSON")]
        json: bool,

        #[arg(long, help = "Drop points with out-of-range minutes, seconds or degrees")]
        validate_ranges: bool,
    },
}

/// Accept a single ASCII character, or `\t` for tab
fn parse_delimiter(value: &str) -> Result<u8, String> {
    match value {
        "\\t" | "tab" => Ok(b'\t'),
        _ => match value.as_bytes() {
            [byte] if byte.is_ascii() => Ok(*byte),
            _ => Err(format!("expected a single ASCII character, got '{}'", value)),
        },
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ExportFormat {
    /// UTF-8 CSV with byte order mark (Excel on Windows)
    CsvBom,
    /// Plain UTF-8 CSV, comma separator, dot decimal
    Csv,
    /// Parquet with typed decimal columns
    Parquet,
}

impl ExportFormat {
    pub fn base_name(&self) -> &'static str {
        match self {
            ExportFormat::CsvBom | ExportFormat::Parquet => EXPORT_BASE_NAME,
            ExportFormat::Csv => EXPORT_BASE_NAME_EN,
        }
    }

    pub fn extension(&self) -> &'static str {
        match self {
            ExportFormat::CsvBom | ExportFormat::Csv => "csv",
            ExportFormat::Parquet => "parquet",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_expand_defaults() {
        let cli = Cli::try_parse_from([
            "coord-extractor",
            "expand",
            "--input",
            "pontos.xlsx",
            "--column",
            "COORDENADAS",
        ])
        .unwrap();

        match cli.command {
            Commands::Expand {
                formats,
                sheet,
                validate_ranges,
                ..
            } => {
                assert_eq!(
                    formats,
                    vec![ExportFormat::CsvBom, ExportFormat::Csv, ExportFormat::Parquet]
                );
                assert!(sheet.is_none());
                assert!(!validate_ranges);
            }
            _ => panic!("Expected expand command"),
        }
    }

    #[test]
    fn test_format_list() {
        let cli = Cli::try_parse_from([
            "coord-extractor",
            "-v",
            "expand",
            "-i",
            "pontos.csv",
            "-c",
            "COORDS",
            "--format",
            "csv,parquet",
        ])
        .unwrap();

        assert!(cli.verbose);
        match cli.command {
            Commands::Expand { formats, .. } => {
                assert_eq!(formats, vec![ExportFormat::Csv, ExportFormat::Parquet])
            }
            _ => panic!("Expected expand command"),
        }
    }

    #[test]
    fn test_delimiter_option() {
        let cli = Cli::try_parse_from([
            "coord-extractor",
            "inspect",
            "--input",
            "pontos.txt",
            "--delimiter",
            "|",
        ])
        .unwrap();

        match cli.command {
            Commands::Inspect { delimiter, .. } => assert_eq!(delimiter, Some(b'|')),
            _ => panic!("Expected inspect command"),
        }

        assert_eq!(parse_delimiter("\\t"), Ok(b'\t'));
        assert_eq!(parse_delimiter(";"), Ok(b';'));
        assert!(parse_delimiter(";;").is_err());
        assert!(parse_delimiter("º").is_err());
    }

    #[test]
    fn test_export_file_names() {
        assert_eq!(ExportFormat::CsvBom.base_name(), "coordenadas_expandido");
        assert_eq!(ExportFormat::Csv.base_name(), "coordinates_expanded");
        assert_eq!(ExportFormat::Parquet.extension(), "parquet");
    }
}
