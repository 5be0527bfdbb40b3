use std::collections::HashSet;
use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, bail};
use arrow::array::{Array, AsArray};
use arrow::datatypes::{DataType, Float32Type, Float64Type, Int32Type, Int64Type};
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
use serde_json::Value as JsonValue;

use super::model::{Column, Table, Value};
use crate::error::{Result, VizError};

/// Cell spellings treated as missing in text sources.
const MISSING_MARKERS: &[&str] = &["", "NA", "NaN", "nan", "null", "NULL"];

// ---------------------------------------------------------------------------
// Public entry-points
// ---------------------------------------------------------------------------

/// Read a table from disk and clean it. This is the loader used by the tool.
pub fn load(path: &Path) -> Result<Table> {
    let raw = read_table(path)?;
    log::info!(
        "Read {} rows x {} columns from {}",
        raw.len(),
        raw.columns().len(),
        path.display()
    );
    clean(&raw)
}

/// Read a table from a file without cleaning it.  Dispatch by extension.
///
/// Supported formats:
/// * `.csv`     – header row, one observation per line
/// * `.json`    – `[{ "E1": 58.7, "Q1": -1, ... }, ...]`
/// * `.parquet` – flat numeric / string / boolean columns
pub fn read_table(path: &Path) -> Result<Table> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    let parsed = match ext.as_str() {
        "csv" => read_csv(path),
        "json" => read_json(path),
        "parquet" | "pq" => read_parquet(path),
        other => Err(anyhow::anyhow!("unsupported file extension: .{other}")),
    };

    let table = parsed.map_err(|e| VizError::Load(format!("{}: {e:#}", path.display())))?;
    if table.columns().is_empty() || table.is_empty() {
        return Err(VizError::Load(format!("{}: no data", path.display())));
    }
    Ok(table)
}

// ---------------------------------------------------------------------------
// Cleaning
// ---------------------------------------------------------------------------

/// Impute missing numbers with the column mean, then drop duplicate rows.
///
/// Only numeric columns are imputed; text and all-missing columns keep their
/// gaps. Duplicates are rows that are bit-identical in every column, and the
/// first occurrence wins. Running `clean` on its own output changes nothing.
pub fn clean(table: &Table) -> Result<Table> {
    if table.columns().is_empty() || table.is_empty() {
        return Err(VizError::Load("table is empty".to_string()));
    }

    let columns: Vec<Column> = table.columns().iter().map(impute_mean).collect();
    let imputed = Table::new(columns)?;

    let keep = first_occurrences(&imputed);
    let dropped = imputed.len() - keep.len();
    if dropped > 0 {
        log::info!("Dropped {dropped} duplicate rows");
    }
    Ok(imputed.select_rows(&keep))
}

fn impute_mean(column: &Column) -> Column {
    let missing = column.missing_count();
    if missing == 0 {
        return column.clone();
    }
    if !column.is_numeric() {
        log::debug!(
            "Leaving {missing} missing cells in non-numeric column '{}'",
            column.name
        );
        return column.clone();
    }

    let (sum, count) = column
        .numbers_iter()
        .fold((0.0, 0usize), |(s, n), v| (s + v, n + 1));
    let mean = sum / count as f64;
    log::debug!(
        "Imputing {missing} missing cells in '{}' with mean {mean}",
        column.name
    );

    let cells = column
        .cells
        .iter()
        .map(|c| match c {
            Value::Missing => Value::Number(mean),
            other => other.clone(),
        })
        .collect();
    Column::new(column.name.clone(), cells)
}

/// Indices of the first occurrence of every distinct row, in row order.
fn first_occurrences(table: &Table) -> Vec<usize> {
    let mut seen: HashSet<Vec<&Value>> = HashSet::with_capacity(table.len());
    (0..table.len())
        .filter(|&i| seen.insert(table.row(i)))
        .collect()
}

// ---------------------------------------------------------------------------
// CSV reader
// ---------------------------------------------------------------------------

fn read_csv(path: &Path) -> anyhow::Result<Table> {
    let mut reader = csv::Reader::from_path(path).context("opening CSV")?;
    let headers: Vec<String> = reader
        .headers()
        .context("reading CSV headers")?
        .iter()
        .map(|h| h.trim().to_string())
        .collect();

    let mut rows = Vec::new();
    for (row_no, result) in reader.records().enumerate() {
        let record = result.with_context(|| format!("CSV row {row_no}"))?;
        rows.push(record.iter().map(guess_value).collect());
    }

    Ok(Table::from_rows(headers, rows)?)
}

fn guess_value(s: &str) -> Value {
    let s = s.trim();
    if MISSING_MARKERS.contains(&s) {
        return Value::Missing;
    }
    match s.parse::<f64>() {
        Ok(v) if v.is_nan() => Value::Missing,
        Ok(v) => Value::Number(v),
        Err(_) => Value::Text(s.to_string()),
    }
}

// ---------------------------------------------------------------------------
// JSON reader
// ---------------------------------------------------------------------------

/// Expected JSON schema (records-oriented, the default `df.to_json(orient='records')`):
///
/// ```json
/// [
///   { "Run": 147115, "E1": 58.71, "pt1": 9.84, "Q1": -1 },
///   ...
/// ]
/// ```
///
/// Columns are the union of keys in first-seen order; a key absent from a
/// record is a missing cell.
fn read_json(path: &Path) -> anyhow::Result<Table> {
    let text = std::fs::read_to_string(path).context("reading JSON file")?;
    let root: JsonValue = serde_json::from_str(&text).context("parsing JSON")?;

    let records = root
        .as_array()
        .context("Expected top-level JSON array")?;

    let mut names: Vec<String> = Vec::new();
    for (i, rec) in records.iter().enumerate() {
        let obj = rec
            .as_object()
            .with_context(|| format!("Row {i} is not a JSON object"))?;
        for key in obj.keys() {
            if !names.contains(key) {
                names.push(key.clone());
            }
        }
    }

    let rows = records
        .iter()
        .filter_map(JsonValue::as_object)
        .map(|obj| {
            names
                .iter()
                .map(|name| obj.get(name).map_or(Value::Missing, json_to_value))
                .collect()
        })
        .collect();

    Ok(Table::from_rows(names, rows)?)
}

fn json_to_value(val: &JsonValue) -> Value {
    match val {
        JsonValue::Number(n) => n.as_f64().map_or(Value::Missing, Value::Number),
        JsonValue::String(s) => guess_value(s),
        JsonValue::Bool(b) => Value::Text(b.to_string()),
        JsonValue::Null => Value::Missing,
        other => Value::Text(other.to_string()),
    }
}

// ---------------------------------------------------------------------------
// Parquet reader
// ---------------------------------------------------------------------------

/// Load a Parquet file holding one flat column per measurement.
///
/// Works with files written by both **Pandas** (`df.to_parquet()`) and
/// **Polars** (`df.write_parquet()`).
fn read_parquet(path: &Path) -> anyhow::Result<Table> {
    let file = std::fs::File::open(path).context("opening parquet file")?;
    let builder = ParquetRecordBatchReaderBuilder::try_new(file)
        .context("reading parquet metadata")?;

    let names: Vec<String> = builder
        .schema()
        .fields()
        .iter()
        .map(|f| f.name().clone())
        .collect();
    let mut columns: Vec<Column> = names
        .iter()
        .map(|name| Column::new(name.clone(), Vec::new()))
        .collect();

    let reader = builder.build().context("building parquet reader")?;
    for batch_result in reader {
        let batch = batch_result.context("reading parquet record batch")?;
        for (idx, column) in columns.iter_mut().enumerate() {
            let array = batch.column(idx);
            for row in 0..batch.num_rows() {
                let value = extract_value(array, row)
                    .with_context(|| format!("column '{}', row {row}", column.name))?;
                column.cells.push(value);
            }
        }
    }

    Ok(Table::new(columns)?)
}

/// Extract a single cell from an Arrow column at a given row.
fn extract_value(col: &Arc<dyn Array>, row: usize) -> anyhow::Result<Value> {
    if col.is_null(row) {
        return Ok(Value::Missing);
    }
    let value = match col.data_type() {
        DataType::Float64 => Value::Number(col.as_primitive::<Float64Type>().value(row)),
        DataType::Float32 => Value::Number(col.as_primitive::<Float32Type>().value(row) as f64),
        DataType::Int64 => Value::Number(col.as_primitive::<Int64Type>().value(row) as f64),
        DataType::Int32 => Value::Number(col.as_primitive::<Int32Type>().value(row) as f64),
        DataType::Utf8 => Value::Text(col.as_string::<i32>().value(row).to_string()),
        DataType::LargeUtf8 => Value::Text(col.as_string::<i64>().value(row).to_string()),
        DataType::Boolean => Value::Text(col.as_boolean().value(row).to_string()),
        other => bail!("unsupported column type {other:?}"),
    };
    Ok(match value {
        Value::Number(v) if v.is_nan() => Value::Missing,
        v => v,
    })
}
