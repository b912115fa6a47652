use std::io::Read;
use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result, bail};
use arrow::array::{Array, AsArray};
use arrow::datatypes::{DataType, Float32Type, Float64Type, Int32Type, Int64Type};
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
use serde_json::Value as JsonValue;
use thiserror::Error;

use super::model::{
    BudgetRow, BudgetTable, Categories, Level, PERCENT_CHANGE_COLUMN, YEAR_COLUMNS,
};

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Data-quality failures detected while reading a budget table.
#[derive(Debug, Error, PartialEq)]
pub enum LoadError {
    #[error("missing expected column '{0}'")]
    MissingColumn(String),

    #[error("record {row}: missing expected field '{column}'")]
    MissingField { row: usize, column: String },

    #[error("row {row}, column '{column}': '{value}' is not a number")]
    NotNumeric {
        row: usize,
        column: String,
        value: String,
    },

    #[error("unsupported file extension: .{0}")]
    UnsupportedExtension(String),
}

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Load a budget table from a file.  Dispatch by extension.
///
/// Supported formats:
/// * `.csv`     – header row with the category, year and percentage columns
/// * `.parquet` – same column names; string categories, numeric values
/// * `.json`    – `[{ "Hauptkategorie": "...", "Ist 2018": 1200, ... }, ...]`
///
/// Columns beyond the expected ones are ignored.
pub fn load_file(path: &Path) -> Result<BudgetTable> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    let table = match ext.as_str() {
        "csv" => {
            let file = std::fs::File::open(path)
                .with_context(|| format!("opening CSV file {}", path.display()))?;
            read_csv(file)
        }
        "parquet" | "pq" => load_parquet(path),
        "json" => load_json(path),
        other => return Err(LoadError::UnsupportedExtension(other.to_string()).into()),
    }
    .with_context(|| format!("loading {}", path.display()))?;

    log::info!("Loaded {} budget rows from {}", table.len(), path.display());
    Ok(table)
}

// ---------------------------------------------------------------------------
// Column layout shared by all formats
// ---------------------------------------------------------------------------

/// Positions of the expected columns within a source's column list.
struct ColumnLayout {
    levels: [(Level, usize); 5],
    years: Vec<usize>,
    percent_change: usize,
}

impl ColumnLayout {
    /// Resolve every expected column through `position`; the first absent one
    /// is reported.
    fn resolve(position: impl Fn(&str) -> Option<usize>) -> Result<Self, LoadError> {
        let find = |name: &str| {
            position(name).ok_or_else(|| LoadError::MissingColumn(name.to_string()))
        };

        let mut levels = [(Level::Hauptkategorie, 0); 5];
        for (slot, level) in levels.iter_mut().zip(Level::DISPLAY_ORDER) {
            *slot = (level, find(level.column_name())?);
        }

        let years = YEAR_COLUMNS
            .iter()
            .map(|&name| find(name))
            .collect::<Result<Vec<_>, _>>()?;
        let percent_change = find(PERCENT_CHANGE_COLUMN)?;

        Ok(Self {
            levels,
            years,
            percent_change,
        })
    }
}

/// Parse a numeric cell. Empty cells become NaN, like a missing value in a
/// DataFrame column.
fn parse_number(raw: &str, row: usize, column: &str) -> Result<f64, LoadError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Ok(f64::NAN);
    }
    trimmed.parse::<f64>().map_err(|_| LoadError::NotNumeric {
        row,
        column: column.to_string(),
        value: raw.to_string(),
    })
}

// ---------------------------------------------------------------------------
// CSV loader
// ---------------------------------------------------------------------------

/// Read a comma-delimited budget table with a header row.
pub fn read_csv<R: Read>(source: R) -> Result<BudgetTable> {
    let mut reader = csv::ReaderBuilder::new().from_reader(source);
    let headers: Vec<String> = reader
        .headers()
        .context("reading CSV headers")?
        .iter()
        .map(|h| h.to_string())
        .collect();

    let layout = ColumnLayout::resolve(|name| headers.iter().position(|h| h == name))?;

    let mut rows = Vec::new();

    for (row_no, result) in reader.records().enumerate() {
        let record = result.with_context(|| format!("CSV row {row_no}"))?;
        let cell = |idx: usize| record.get(idx).unwrap_or("");

        let mut categories = Categories::default();
        for &(level, idx) in &layout.levels {
            *categories.get_mut(level) = cell(idx).to_string();
        }

        let values = layout
            .years
            .iter()
            .zip(YEAR_COLUMNS)
            .map(|(&idx, name)| parse_number(cell(idx), row_no, name))
            .collect::<Result<Vec<_>, _>>()?;

        let percent_change =
            parse_number(cell(layout.percent_change), row_no, PERCENT_CHANGE_COLUMN)?;

        rows.push(BudgetRow {
            categories,
            values,
            percent_change,
        });
    }

    Ok(BudgetTable::new(rows))
}

// ---------------------------------------------------------------------------
// JSON loader
// ---------------------------------------------------------------------------

/// Expected JSON schema (records-oriented, the default `df.to_json(orient='records')`):
///
/// ```json
/// [
///   {
///     "Hauptkategorie": "Bildung",
///     "Subkategorie_1": "Schulen",
///     ...
///     "Ist 2018": 1200.0,
///     "Percentagechange Ist 2018 vs. Ist 2023": 12.5
///   },
///   ...
/// ]
/// ```
///
/// Fields are checked per record, so an empty array loads as an empty table:
/// without a record there is no schema to validate.
fn load_json(path: &Path) -> Result<BudgetTable> {
    let text = std::fs::read_to_string(path).context("reading JSON file")?;
    read_json(&text)
}

fn read_json(text: &str) -> Result<BudgetTable> {
    let root: JsonValue = serde_json::from_str(text).context("parsing JSON")?;

    let records = root.as_array().context("Expected top-level JSON array")?;

    let mut rows = Vec::with_capacity(records.len());

    for (i, rec) in records.iter().enumerate() {
        let obj = rec
            .as_object()
            .with_context(|| format!("Row {i} is not a JSON object"))?;
        let field = |name: &str| {
            obj.get(name)
                .ok_or_else(|| LoadError::MissingField {
                    row: i,
                    column: name.to_string(),
                })
        };

        let mut categories = Categories::default();
        for level in Level::FILTER_ORDER {
            *categories.get_mut(level) = json_to_category(field(level.column_name())?);
        }

        let values = YEAR_COLUMNS
            .iter()
            .map(|&name| json_to_number(field(name)?, i, name))
            .collect::<Result<Vec<_>, _>>()?;

        let percent_change = json_to_number(
            field(PERCENT_CHANGE_COLUMN)?,
            i,
            PERCENT_CHANGE_COLUMN,
        )?;

        rows.push(BudgetRow {
            categories,
            values,
            percent_change,
        });
    }

    Ok(BudgetTable::new(rows))
}

fn json_to_category(val: &JsonValue) -> String {
    match val {
        JsonValue::String(s) => s.clone(),
        JsonValue::Null => String::new(),
        other => other.to_string(),
    }
}

fn json_to_number(val: &JsonValue, row: usize, column: &str) -> Result<f64, LoadError> {
    match val {
        JsonValue::Number(n) => n.as_f64().ok_or_else(|| LoadError::NotNumeric {
            row,
            column: column.to_string(),
            value: n.to_string(),
        }),
        JsonValue::Null => Ok(f64::NAN),
        JsonValue::String(s) => parse_number(s, row, column),
        other => Err(LoadError::NotNumeric {
            row,
            column: column.to_string(),
            value: other.to_string(),
        }),
    }
}

// ---------------------------------------------------------------------------
// Parquet loader
// ---------------------------------------------------------------------------

/// Load a Parquet file containing the budget table.
///
/// Category columns must be Utf8 or LargeUtf8; value columns may be any of
/// Int32/Int64/Float32/Float64 (or numeric text). Works with files written by
/// both **Pandas** (`df.to_parquet()`) and **Polars** (`df.write_parquet()`).
fn load_parquet(path: &Path) -> Result<BudgetTable> {
    let file = std::fs::File::open(path).context("opening parquet file")?;
    let builder =
        ParquetRecordBatchReaderBuilder::try_new(file).context("reading parquet metadata")?;

    // Validate against the file schema up front so an empty file still fails.
    let layout = {
        let schema = builder.schema();
        ColumnLayout::resolve(|name| schema.index_of(name).ok())?
    };

    let reader = builder.build().context("building parquet reader")?;

    let mut rows = Vec::new();

    for batch_result in reader {
        let batch = batch_result.context("reading parquet record batch")?;
        let offset = rows.len();

        for row in 0..batch.num_rows() {
            let row_no = offset + row;

            let mut categories = Categories::default();
            for &(level, idx) in &layout.levels {
                *categories.get_mut(level) = extract_string(batch.column(idx), row)
                    .with_context(|| format!("Row {row_no}: failed to read '{level}'"))?;
            }

            let values = layout
                .years
                .iter()
                .zip(YEAR_COLUMNS)
                .map(|(&idx, name)| extract_number(batch.column(idx), row, row_no, name))
                .collect::<Result<Vec<_>>>()?;

            let percent_change = extract_number(
                batch.column(layout.percent_change),
                row,
                row_no,
                PERCENT_CHANGE_COLUMN,
            )?;

            rows.push(BudgetRow {
                categories,
                values,
                percent_change,
            });
        }
    }

    Ok(BudgetTable::new(rows))
}

// -- Parquet / Arrow helpers --

/// Extract a category string; nulls become the empty string.
fn extract_string(col: &Arc<dyn Array>, row: usize) -> Result<String> {
    if col.is_null(row) {
        return Ok(String::new());
    }
    match col.data_type() {
        DataType::Utf8 => Ok(col.as_string::<i32>().value(row).to_string()),
        DataType::LargeUtf8 => Ok(col.as_string::<i64>().value(row).to_string()),
        other => bail!("Expected Utf8 or LargeUtf8 column, got {other:?}"),
    }
}

/// Extract a numeric cell as `f64`; nulls become NaN.
fn extract_number(col: &Arc<dyn Array>, row: usize, row_no: usize, column: &str) -> Result<f64> {
    if col.is_null(row) {
        return Ok(f64::NAN);
    }
    let value = match col.data_type() {
        DataType::Int32 => col.as_primitive::<Int32Type>().value(row) as f64,
        DataType::Int64 => col.as_primitive::<Int64Type>().value(row) as f64,
        DataType::Float32 => col.as_primitive::<Float32Type>().value(row) as f64,
        DataType::Float64 => col.as_primitive::<Float64Type>().value(row),
        DataType::Utf8 => parse_number(col.as_string::<i32>().value(row), row_no, column)?,
        DataType::LargeUtf8 => parse_number(col.as_string::<i64>().value(row), row_no, column)?,
        other => {
            return Err(LoadError::NotNumeric {
                row: row_no,
                column: column.to_string(),
                value: format!("<{other:?}>"),
            }
            .into())
        }
    };
    Ok(value)
}
