use std::fs::File;
use std::path::Path;

use polars::prelude::*;
use tracing::info;

use crate::config::InputConfig;
use crate::error::FlowError;
use crate::schema::input;

/// Load an observation CSV and type its columns.
///
/// Numeric fields become Float64, `date` becomes Date, everything else stays
/// a string. Empty cells and the configured null tokens are missing. Text
/// that does not parse as a number or date is an error.
pub fn load_observations(path: &Path, options: &InputConfig) -> Result<DataFrame, FlowError> {
    let raw = read_csv_as_strings(path, &options.null_values)?;
    require_columns(&raw, &input::REQUIRED)?;

    let df = parse_float_columns(raw, &input::NUMERIC, &options.null_values)?;
    let df = parse_date_column(df, input::DATE, &options.date_format, &options.null_values)?;

    info!(
        path = %path.display(),
        rows = df.height(),
        columns = df.width(),
        "loaded observations"
    );
    Ok(df)
}

/// Read a CSV file with all columns as String dtype.
/// Trims whitespace from column names.
pub fn read_csv_as_strings(path: &Path, null_values: &[String]) -> Result<DataFrame, FlowError> {
    let null_values = NullValues::AllColumns(null_values.iter().map(|s| s.as_str().into()).collect());
    let mut df = CsvReadOptions::default()
        .with_has_header(true)
        .with_infer_schema_length(Some(0)) // all columns as String
        .with_parse_options(CsvParseOptions::default().with_null_values(Some(null_values)))
        .try_into_reader_with_file_path(Some(path.to_path_buf()))?
        .finish()?;

    let trimmed: Vec<String> = df
        .get_column_names_str()
        .iter()
        .map(|c| c.trim().to_string())
        .collect();
    df.set_column_names(trimmed.as_slice())?;

    Ok(df)
}

/// Fail with every absent column named, in the order given.
pub fn require_columns(df: &DataFrame, required: &[&str]) -> Result<(), FlowError> {
    let schema = df.schema();
    let missing: Vec<&str> = required
        .iter()
        .copied()
        .filter(|name| !schema.contains(name))
        .collect();
    if missing.is_empty() {
        return Ok(());
    }
    Err(FlowError::MissingColumn(missing.join(", ")))
}

/// Trim a string column and read blank cells and `null_tokens` as missing.
///
/// The CSV reader only nulls exact matches, so `" "` or `"NA "` would
/// otherwise reach the cast as text.
fn blank_to_null(name: &str, null_tokens: &[String]) -> Expr {
    let stripped = col(name).str().strip_chars(lit(" \t\r\n"));
    let is_blank = null_tokens
        .iter()
        .fold(stripped.clone().eq(lit("")), |acc, token| {
            acc.or(stripped.clone().eq(lit(token.trim().to_string())))
        });
    when(is_blank)
        .then(lit(NULL).cast(DataType::String))
        .otherwise(stripped)
}

/// Parse the listed columns to Float64, skipping any the table lacks.
///
/// Already-numeric columns are widened. String columns are trimmed, and
/// blank cells or `null_tokens` become missing before the strict cast.
pub fn parse_float_columns(
    df: DataFrame,
    columns: &[&str],
    null_tokens: &[String],
) -> Result<DataFrame, FlowError> {
    let schema = df.schema().clone();
    let exprs: Vec<Expr> = columns
        .iter()
        .filter_map(|&name| {
            let expr = match schema.get(name)? {
                DataType::String => blank_to_null(name, null_tokens),
                _ => col(name),
            };
            Some(expr.strict_cast(DataType::Float64).alias(name))
        })
        .collect();

    if exprs.is_empty() {
        return Ok(df);
    }
    Ok(df.lazy().with_columns(exprs).collect()?)
}

/// Parse a string column to Date. Leaves non-string columns untouched.
pub fn parse_date_column(
    df: DataFrame,
    column: &str,
    format: &str,
    null_tokens: &[String],
) -> Result<DataFrame, FlowError> {
    if !matches!(df.schema().get(column), Some(DataType::String)) {
        return Ok(df);
    }
    let df = df
        .lazy()
        .with_columns([blank_to_null(column, null_tokens)
            .str()
            .to_date(StrptimeOptions {
                format: Some(format.into()),
                strict: true,
                ..Default::default()
            })
            .alias(column)])
        .collect()?;
    Ok(df)
}

/// Write a table as CSV or Parquet, chosen by the file extension.
pub fn write_table(df: &mut DataFrame, path: &Path) -> Result<(), FlowError> {
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase());

    match extension.as_deref() {
        Some("csv") => {
            let mut file = File::create(path)?;
            CsvWriter::new(&mut file).include_header(true).finish(df)?;
        }
        Some("parquet") => {
            let file = File::create(path)?;
            ParquetWriter::new(file).finish(df)?;
        }
        _ => {
            return Err(FlowError::UnsupportedFormat(path.display().to_string()));
        }
    }

    info!(
        path = %path.display(),
        rows = df.height(),
        columns = df.width(),
        "table written"
    );
    Ok(())
}
