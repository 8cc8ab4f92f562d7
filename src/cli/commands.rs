use crate::cli::args::{Cli, Commands, ExportFormat};
use crate::cli::logging::init_logging;
use crate::error::Result;
use crate::models::ExpandedTable;
use crate::processors::{
    CoordinateParser, ExportFormatter, ExportTable, RowExpander,
};
use crate::readers::{read_table, InputFormat, SpreadsheetReader};
use crate::settings::Settings;
use crate::utils::filename::generate_timestamped_filename;
use crate::utils::progress::ProgressReporter;
use crate::writers::{CsvWriter, ParquetWriter};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Options of one `expand` invocation after settings and flags are merged
struct ExpandOptions {
    input: PathBuf,
    sheet: Option<String>,
    delimiter: Option<u8>,
    column: String,
    output_dir: PathBuf,
    formats: Vec<ExportFormat>,
    precision: usize,
    placeholder: String,
    validate_ranges: bool,
    preview_rows: usize,
    compression: String,
}

pub async fn run(cli: Cli) -> Result<()> {
    init_logging(cli.verbose, cli.log_file.as_deref())?;
    let settings = Settings::load(cli.config.as_deref())?;

    match cli.command {
        Commands::Expand {
            input,
            sheet,
            delimiter,
            column,
            output_dir,
            formats,
            precision,
            placeholder,
            validate_ranges,
            preview,
            compression,
        } => {
            let options = ExpandOptions {
                input,
                sheet,
                delimiter,
                column,
                output_dir: output_dir.unwrap_or_else(|| settings.output_dir.clone()),
                formats: unique_formats(formats),
                precision: precision.unwrap_or(settings.precision),
                placeholder: placeholder.unwrap_or_else(|| settings.placeholder.clone()),
                validate_ranges: validate_ranges || settings.validate_ranges,
                preview_rows: preview.unwrap_or(settings.preview_rows),
                compression,
            };
            expand(options).await
        }

        Commands::Inspect {
            input,
            sheet,
            delimiter,
        } => inspect(input, sheet, delimiter).await,

        Commands::Parse {
            text,
            json,
            validate_ranges,
        } => parse(
            &text,
            json,
            validate_ranges || settings.validate_ranges,
            settings.precision,
        ),
    }
}

async fn expand(options: ExpandOptions) -> Result<()> {
    println!("Extracting coordinates...");
    println!("Input file: {}", options.input.display());
    if let Some(ref sheet) = options.sheet {
        println!("Sheet: {}", sheet);
    }
    println!("Coordinate column: {}", options.column);

    let progress = ProgressReporter::new_spinner("Reading input...", false);

    let input = options.input.clone();
    let sheet = options.sheet.clone();
    let delimiter = options.delimiter;
    let table =
        tokio::task::spawn_blocking(move || read_table(&input, sheet.as_deref(), delimiter))
            .await??;
    info!("Loaded {} rows", table.len());

    progress.set_message("Processing coordinates...");
    let expander = RowExpander::with_parser(
        CoordinateParser::new().with_range_validation(options.validate_ranges),
    );
    let expansion = expander.expand_with_report(&table, &options.column);
    progress.finish_and_clear();
    let (expanded, report) = expansion?;

    println!("\n{}", report.summary());

    if expanded.is_empty() {
        println!("⚠️  No coordinate points found for export.");
        return Ok(());
    }

    let export = ExportFormatter::new()
        .with_precision(options.precision)
        .with_placeholder(options.placeholder.clone())
        .format(&expanded);

    println!(
        "\n✅ Processing complete! {} points extracted.",
        export.len()
    );
    if options.preview_rows > 0 {
        println!(
            "\nPreview (first {} rows):\n{}",
            options.preview_rows.min(export.len()),
            export.preview(options.preview_rows)
        );
    }

    if options.formats.is_empty() {
        println!("No export format selected - nothing written");
        return Ok(());
    }

    std::fs::create_dir_all(&options.output_dir)?;

    let output_dir = options.output_dir.clone();
    let formats = options.formats.clone();
    let compression = options.compression.clone();
    let written = tokio::task::spawn_blocking(move || {
        write_exports(&expanded, &export, &formats, &output_dir, &compression)
    })
    .await??;

    println!("\nFiles written:");
    for path in &written {
        println!("  {}", path.display());
    }

    Ok(())
}

fn write_exports(
    expanded: &ExpandedTable,
    export: &ExportTable,
    formats: &[ExportFormat],
    output_dir: &Path,
    compression: &str,
) -> Result<Vec<PathBuf>> {
    let mut written = Vec::with_capacity(formats.len());

    for format in formats {
        let path = generate_timestamped_filename(output_dir, format.base_name(), format.extension());
        debug!("Writing {:?} export to {}", format, path.display());

        match format {
            ExportFormat::CsvBom => CsvWriter::excel_compatible().write_table(export, &path)?,
            ExportFormat::Csv => CsvWriter::new().write_table(export, &path)?,
            ExportFormat::Parquet => {
                let writer = ParquetWriter::new().with_compression(compression)?;
                writer.write_table(expanded, &path)?;
                debug!("{}", writer.get_file_info(&path)?.summary());
            }
        }

        written.push(path);
    }

    Ok(written)
}

async fn inspect(input: PathBuf, sheet: Option<String>, delimiter: Option<u8>) -> Result<()> {
    println!("Inspecting: {}", input.display());

    let table = tokio::task::spawn_blocking(move || -> Result<_> {
        if InputFormat::from_path(&input)? == InputFormat::Workbook {
            let sheet_names = SpreadsheetReader::new().sheet_names(&input)?;
            println!("\nSheets:");
            for (idx, name) in sheet_names.iter().enumerate() {
                println!("  {}. {}", idx + 1, name);
            }
        }
        read_table(&input, sheet.as_deref(), delimiter)
    })
    .await??;

    println!("\nColumns ({} rows):", table.len());
    for (idx, column) in table.columns().iter().enumerate() {
        let filled = table
            .rows()
            .iter()
            .filter(|row| !row[idx].is_empty())
            .count();
        println!("  {}. {} ({} non-empty)", idx + 1, column, filled);
    }

    Ok(())
}

fn parse(text: &str, json: bool, validate_ranges: bool, precision: usize) -> Result<()> {
    let parser = CoordinateParser::new().with_range_validation(validate_ranges);
    let pairs = parser.parse(Some(text));

    if json {
        println!("{}", serde_json::to_string_pretty(&pairs)?);
        return Ok(());
    }

    if pairs.is_empty() {
        println!("No coordinate pairs found");
        return Ok(());
    }

    for (idx, pair) in pairs.iter().enumerate() {
        println!(
            "{}: {:.prec$}, {:.prec$} ({} {})",
            crate::models::point_label(idx + 1),
            pair.latitude_decimal,
            pair.longitude_decimal,
            pair.latitude_dms,
            pair.longitude_dms,
            prec = precision
        );
    }

    Ok(())
}

/// Drop repeated formats, keeping first occurrence order
fn unique_formats(formats: Vec<ExportFormat>) -> Vec<ExportFormat> {
    let mut unique = Vec::with_capacity(formats.len());
    for format in formats {
        if !unique.contains(&format) {
            unique.push(format);
        }
    }
    unique
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{CellValue, Table};
    use crate::processors::expand_table;
    use tempfile::TempDir;

    #[test]
    fn test_unique_formats() {
        let formats = vec![
            ExportFormat::Csv,
            ExportFormat::Parquet,
            ExportFormat::Csv,
        ];
        assert_eq!(
            unique_formats(formats),
            vec![ExportFormat::Csv, ExportFormat::Parquet]
        );
    }

    #[test]
    fn test_write_exports() -> Result<()> {
        let table = Table::with_rows(
            vec!["ID".to_string(), "COORDS".to_string()],
            vec![vec![
                CellValue::from("A"),
                CellValue::from("3º03'52,9838\"S 59º54'46,6013\"W"),
            ]],
        )?;
        let expanded = expand_table(&table, "COORDS")?;
        let export = ExportFormatter::new().format(&expanded);
        let dir = TempDir::new()?;

        let written = write_exports(
            &expanded,
            &export,
            &[ExportFormat::CsvBom, ExportFormat::Csv, ExportFormat::Parquet],
            dir.path(),
            "snappy",
        )?;

        assert_eq!(written.len(), 3);
        for path in &written {
            assert!(path.exists(), "{} missing", path.display());
        }
        Ok(())
    }
}
