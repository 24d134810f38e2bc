use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result, bail};
use arrow::array::{Array, AsArray, Int32Array, Int64Array, StringArray};
use arrow::datatypes::DataType;
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
use serde_json::{Map, Value as JsonValue};

use super::model::{Catalog, CatalogRecord, LoadReport, RawRow};

/// Columns without which a file cannot be a catalog at all.
const REQUIRED_COLUMNS: [&str; 2] = ["type", "release_year"];

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Load a catalog from a file.  Dispatch by extension.
///
/// Supported formats:
/// * `.csv`     – header row with at least `type` and `release_year`
/// * `.json`    – `[{ "title": ..., "type": ..., ... }, ...]`
/// * `.parquet` – one column per field, text or integer typed
///
/// Rows that fail validation are skipped with a warning; only an unreadable
/// file or missing required columns abort the load.
pub fn load_file(path: &Path) -> Result<(Catalog, LoadReport)> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    let (rows, unreadable) = match ext.as_str() {
        "csv" => read_csv(path)?,
        "json" => read_json(path)?,
        "parquet" | "pq" => read_parquet(path)?,
        other => bail!("Unsupported file extension: .{other}"),
    };

    let (catalog, mut report) = build_catalog(rows);
    report.skipped += unreadable;
    log::info!(
        "Loaded {} catalog records from {} ({} skipped)",
        report.loaded,
        path.display(),
        report.skipped
    );
    Ok((catalog, report))
}

/// Convenience wrapper when the report is not needed.
pub fn load(path: &Path) -> Result<Catalog> {
    load_file(path).map(|(catalog, _)| catalog)
}

/// Validate raw rows; rejects are logged and counted, never fatal.
pub fn build_catalog(rows: Vec<(usize, RawRow)>) -> (Catalog, LoadReport) {
    let mut records = Vec::with_capacity(rows.len());
    let mut report = LoadReport::default();

    for (row_no, raw) in rows {
        match CatalogRecord::from_raw(raw) {
            Ok(rec) => records.push(rec),
            Err(e) => {
                log::warn!("Skipping row {row_no}: {e}");
                report.skipped += 1;
            }
        }
    }
    report.loaded = records.len();
    (Catalog::from_records(records), report)
}

fn check_columns<'a>(columns: impl IntoIterator<Item = &'a str>, source: &str) -> Result<()> {
    let present: Vec<&str> = columns.into_iter().collect();
    for required in REQUIRED_COLUMNS {
        if !present.contains(&required) {
            bail!("{source} missing '{required}' column");
        }
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// CSV loader
// ---------------------------------------------------------------------------

/// Returns the parsed rows (numbered from 0) and the count of rows the CSV
/// reader could not decode.
fn read_csv(path: &Path) -> Result<(Vec<(usize, RawRow)>, usize)> {
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .trim(csv::Trim::Headers)
        .from_path(path)
        .context("opening CSV")?;
    let headers = reader.headers().context("reading CSV headers")?.clone();
    check_columns(headers.iter(), "CSV")?;

    let mut rows = Vec::new();
    let mut unreadable = 0;
    for (row_no, result) in reader.deserialize::<RawRow>().enumerate() {
        match result {
            Ok(raw) => rows.push((row_no, raw)),
            Err(e) => {
                log::warn!("Skipping malformed CSV row {row_no}: {e}");
                unreadable += 1;
            }
        }
    }
    Ok((rows, unreadable))
}

// ---------------------------------------------------------------------------
// JSON loader
// ---------------------------------------------------------------------------

/// Expected JSON schema (records-oriented, `df.to_json(orient='records')`):
///
/// ```json
/// [
///   { "title": "Dick Johnson Is Dead", "type": "Movie", "release_year": 2020, ... },
///   ...
/// ]
/// ```
fn read_json(path: &Path) -> Result<(Vec<(usize, RawRow)>, usize)> {
    let text = std::fs::read_to_string(path).context("reading JSON file")?;
    let root: JsonValue = serde_json::from_str(&text).context("parsing JSON")?;

    let records = root.as_array().context("Expected top-level JSON array")?;

    if let Some(first) = records.iter().find_map(|r| r.as_object()) {
        check_columns(first.keys().map(String::as_str), "JSON")?;
    }

    let mut rows = Vec::with_capacity(records.len());
    let mut unreadable = 0;
    for (i, rec) in records.iter().enumerate() {
        let Some(obj) = rec.as_object() else {
            log::warn!("Skipping JSON row {i}: not an object");
            unreadable += 1;
            continue;
        };
        rows.push((i, json_to_raw(obj)));
    }
    Ok((rows, unreadable))
}

fn json_to_raw(obj: &Map<String, JsonValue>) -> RawRow {
    let field = |key: &str| obj.get(key).and_then(json_to_text);
    RawRow {
        title: field("title"),
        kind: field("type"),
        director: field("director"),
        country: field("country"),
        date_added: field("date_added"),
        release_year: field("release_year"),
        rating: field("rating"),
        duration: field("duration"),
        listed_in: field("listed_in"),
    }
}

fn json_to_text(val: &JsonValue) -> Option<String> {
    match val {
        JsonValue::String(s) => Some(s.clone()),
        JsonValue::Number(n) => Some(n.to_string()),
        JsonValue::Bool(b) => Some(b.to_string()),
        JsonValue::Null => None,
        other => Some(other.to_string()),
    }
}

// ---------------------------------------------------------------------------
// Parquet loader
// ---------------------------------------------------------------------------

/// Load a Parquet file with one column per catalog field.
///
/// Text columns may be Utf8 or LargeUtf8; `release_year` may also be Int32 or
/// Int64. Works with files written by both **Pandas** (`df.to_parquet()`) and
/// **Polars** (`df.write_parquet()`).
fn read_parquet(path: &Path) -> Result<(Vec<(usize, RawRow)>, usize)> {
    let file = std::fs::File::open(path).context("opening parquet file")?;
    let builder =
        ParquetRecordBatchReaderBuilder::try_new(file).context("reading parquet metadata")?;
    check_columns(
        builder.schema().fields().iter().map(|f| f.name().as_str()),
        "Parquet file",
    )?;
    let reader = builder.build().context("building parquet reader")?;

    let mut rows = Vec::new();
    let mut row_no = 0;

    for batch_result in reader {
        let batch = batch_result.context("reading parquet record batch")?;
        let schema = batch.schema();
        let column = |name: &str| schema.index_of(name).ok().map(|i| batch.column(i));

        let title = column("title");
        let kind = column("type");
        let director = column("director");
        let country = column("country");
        let date_added = column("date_added");
        let release_year = column("release_year");
        let rating = column("rating");
        let duration = column("duration");
        let listed_in = column("listed_in");

        for row in 0..batch.num_rows() {
            let cell = |col: Option<&Arc<dyn Array>>| col.and_then(|c| extract_text(c, row));
            rows.push((
                row_no,
                RawRow {
                    title: cell(title),
                    kind: cell(kind),
                    director: cell(director),
                    country: cell(country),
                    date_added: cell(date_added),
                    release_year: cell(release_year),
                    rating: cell(rating),
                    duration: cell(duration),
                    listed_in: cell(listed_in),
                },
            ));
            row_no += 1;
        }
    }

    Ok((rows, 0))
}

// -- Parquet / Arrow helpers --

/// Extract a single cell as text. Nulls and unsupported types are absent.
fn extract_text(col: &Arc<dyn Array>, row: usize) -> Option<String> {
    if col.is_null(row) {
        return None;
    }
    match col.data_type() {
        DataType::Utf8 => col
            .as_any()
            .downcast_ref::<StringArray>()
            .map(|s| s.value(row).to_string()),
        DataType::LargeUtf8 => Some(col.as_string::<i64>().value(row).to_string()),
        DataType::Int32 => col
            .as_any()
            .downcast_ref::<Int32Array>()
            .map(|a| a.value(row).to_string()),
        DataType::Int64 => col
            .as_any()
            .downcast_ref::<Int64Array>()
            .map(|a| a.value(row).to_string()),
        other => {
            log::debug!("Ignoring parquet cell of type {other:?}");
            None
        }
    }
}
