use std::collections::HashSet;
use std::io::Read;
use std::path::Path;

use anyhow::{bail, Context, Result};
use arrow::array::Array;
use arrow::util::display::{ArrayFormatter, FormatOptions};
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
use serde_json::Value as JsonValue;

use super::model::Dataset;

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Load a tabular dataset from a file.  Dispatch by extension.
///
/// Supported formats:
/// * `.csv`     – comma-delimited, header row required, quoted fields allowed
/// * `.tsv`     – same, tab-delimited
/// * `.json`    – `[{ "text": "...", "labels": [...] }, ...]`
/// * `.parquet` – any flat schema; every column is read as display text
pub fn load_file(path: &Path) -> Result<Dataset> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    let dataset = match ext.as_str() {
        "csv" | "txt" => load_delimited(path, b',')?,
        "tsv" => load_delimited(path, b'\t')?,
        "json" => load_json(path)?,
        "parquet" | "pq" => load_parquet(path)?,
        other => bail!("Unsupported file extension: .{other}"),
    };
    log::debug!(
        "parsed {} rows x {} columns from {}",
        dataset.len(),
        dataset.headers.len(),
        path.display()
    );
    Ok(dataset)
}

// ---------------------------------------------------------------------------
// CSV / TSV loader
// ---------------------------------------------------------------------------

fn load_delimited(path: &Path, delimiter: u8) -> Result<Dataset> {
    let file = std::fs::File::open(path).context("opening delimited file")?;
    read_delimited(file, delimiter)
}

/// Parse delimited text held in memory.
pub fn parse_csv_str(text: &str, delimiter: u8) -> Result<Dataset> {
    read_delimited(text.as_bytes(), delimiter)
}

/// Header row first; short records are padded, long ones truncated.
fn read_delimited<R: Read>(source: R, delimiter: u8) -> Result<Dataset> {
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(delimiter)
        .flexible(true)
        .from_reader(source);

    let headers: Vec<String> = reader
        .headers()
        .context("reading header row")?
        .iter()
        .map(|h| h.trim().to_string())
        .collect();
    check_headers(&headers)?;

    let mut records: Vec<Vec<String>> = Vec::new();
    for (row_no, result) in reader.records().enumerate() {
        let record = result.with_context(|| format!("record {row_no}"))?;
        records.push(record.iter().map(str::to_string).collect());
    }

    Ok(Dataset::from_records(headers, records))
}

fn check_headers(headers: &[String]) -> Result<()> {
    if headers.is_empty() || headers.iter().all(|h| h.is_empty()) {
        bail!("missing header row");
    }
    let mut seen = HashSet::new();
    for h in headers {
        if !seen.insert(h.as_str()) {
            bail!("duplicate column name '{h}'");
        }
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// JSON loader
// ---------------------------------------------------------------------------

/// Expected JSON schema (records-oriented, `df.to_json(orient='records')`):
///
/// ```json
/// [
///   { "text": "the server is down", "labels": ["outage", "urgent"] },
///   { "text": "thanks!", "labels": "" }
/// ]
/// ```
///
/// Headers are the keys in first-seen order across all records.
fn load_json(path: &Path) -> Result<Dataset> {
    let text = std::fs::read_to_string(path).context("reading JSON file")?;
    parse_json_str(&text)
}

pub(crate) fn parse_json_str(text: &str) -> Result<Dataset> {
    let root: JsonValue = serde_json::from_str(text).context("parsing JSON")?;
    let records = root.as_array().context("Expected top-level JSON array")?;

    let mut headers: Vec<String> = Vec::new();
    for (i, rec) in records.iter().enumerate() {
        let obj = rec
            .as_object()
            .with_context(|| format!("Row {i} is not a JSON object"))?;
        for key in obj.keys() {
            if !headers.iter().any(|h| h == key) {
                headers.push(key.clone());
            }
        }
    }
    check_headers(&headers)?;

    let rows = records.iter().map(|rec| {
        headers
            .iter()
            .map(|h| rec.get(h).map(json_to_cell).unwrap_or_default())
            .collect::<Vec<String>>()
    });

    Ok(Dataset::from_records(headers.clone(), rows))
}

/// Strings stay raw; everything else keeps its JSON text so a list column
/// can be normalized later.
fn json_to_cell(val: &JsonValue) -> String {
    match val {
        JsonValue::String(s) => s.clone(),
        JsonValue::Null => String::new(),
        other => other.to_string(),
    }
}

// ---------------------------------------------------------------------------
// Parquet loader
// ---------------------------------------------------------------------------

/// Load a Parquet file written by Pandas (`df.to_parquet()`) or Polars.
///
/// Every column is rendered through arrow's display formatter; list columns
/// come out as `[a, b]`, which the label normalizer understands.
fn load_parquet(path: &Path) -> Result<Dataset> {
    let file = std::fs::File::open(path).context("opening parquet file")?;
    let builder =
        ParquetRecordBatchReaderBuilder::try_new(file).context("reading parquet metadata")?;
    let headers: Vec<String> = builder
        .schema()
        .fields()
        .iter()
        .map(|f| f.name().clone())
        .collect();
    check_headers(&headers)?;
    let reader = builder.build().context("building parquet reader")?;

    let options = FormatOptions::default();
    let mut records: Vec<Vec<String>> = Vec::new();

    for batch_result in reader {
        let batch = batch_result.context("reading parquet record batch")?;
        let formatters = batch
            .columns()
            .iter()
            .map(|col| ArrayFormatter::try_new(col.as_ref(), &options))
            .collect::<Result<Vec<_>, _>>()
            .context("preparing column formatters")?;

        for row in 0..batch.num_rows() {
            let cells: Vec<String> = batch
                .columns()
                .iter()
                .zip(&formatters)
                .map(|(col, fmt)| {
                    if col.is_null(row) {
                        String::new()
                    } else {
                        fmt.value(row).to_string()
                    }
                })
                .collect();
            records.push(cells);
        }
    }

    Ok(Dataset::from_records(headers, records))
}
