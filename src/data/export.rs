use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result};

use super::model::Dataset;
use crate::labels::RowLabelStore;

// ---------------------------------------------------------------------------
// Export table: original columns + one JSON label column
// ---------------------------------------------------------------------------

/// Records ready for the CSV writer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportTable {
    pub headers: Vec<String>,
    pub records: Vec<Vec<String>>,
}

/// One record per dataset row, in row order, regardless of any filter used
/// while labeling. Each record is the row's cells verbatim followed by its
/// labels as a JSON array.
pub fn build_export_rows(dataset: &Dataset, store: &RowLabelStore, column: &str) -> ExportTable {
    let mut headers = dataset.headers.clone();
    headers.push(unique_column_name(&dataset.headers, column));

    let records = dataset
        .rows
        .iter()
        .enumerate()
        .map(|(i, row)| {
            let mut record = row.cells.clone();
            let labels = store.get(i).map(|set| set.to_json());
            record.push(labels.unwrap_or_else(|| "[]".to_string()));
            record
        })
        .collect();

    ExportTable { headers, records }
}

/// `column`, or `column_1`, `column_2`, ... if the input already uses it.
fn unique_column_name(headers: &[String], column: &str) -> String {
    if !headers.iter().any(|h| h == column) {
        return column.to_string();
    }
    let name = (1..)
        .map(|n| format!("{column}_{n}"))
        .find(|candidate| !headers.iter().any(|h| h == candidate))
        .unwrap_or_else(|| column.to_string());
    log::warn!("input already has a '{column}' column; exporting labels as '{name}'");
    name
}

// ---------------------------------------------------------------------------
// CSV writer
// ---------------------------------------------------------------------------

/// Write every field double-quoted, `\n` line endings.
pub fn write_csv<W: Write>(table: &ExportTable, writer: W) -> Result<()> {
    let mut wtr = csv::WriterBuilder::new()
        .quote_style(csv::QuoteStyle::Always)
        .terminator(csv::Terminator::Any(b'\n'))
        .from_writer(writer);

    wtr.write_record(&table.headers).context("writing header row")?;
    for (i, record) in table.records.iter().enumerate() {
        wtr.write_record(record)
            .with_context(|| format!("writing record {i}"))?;
    }
    wtr.flush().context("flushing CSV output")?;
    Ok(())
}

pub fn export_to_path(table: &ExportTable, path: &Path) -> Result<()> {
    let file = std::fs::File::create(path).context("creating export file")?;
    write_csv(table, std::io::BufWriter::new(file))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::labels::normalize_cell;

    fn dataset() -> Dataset {
        Dataset::from_records(
            vec!["id".to_string(), "text".to_string()],
            vec![
                vec!["1".to_string(), "server \"down\"".to_string()],
                vec!["2".to_string(), "fine, thanks".to_string()],
                vec!["3".to_string(), String::new()],
            ],
        )
    }

    #[test]
    fn test_every_row_exported_in_order() {
        let ds = dataset();
        let mut store = RowLabelStore::new(ds.len());
        store.toggle(1, "ok").unwrap();
        let table = build_export_rows(&ds, &store, "classifications");
        assert_eq!(table.headers, vec!["id", "text", "classifications"]);
        assert_eq!(table.records.len(), 3);
        assert_eq!(table.records[0], vec!["1", "server \"down\"", "[]"]);
        assert_eq!(table.records[1], vec!["2", "fine, thanks", "[\"ok\"]"]);
    }

    #[test]
    fn test_label_field_normalizes_back() {
        let ds = dataset();
        let mut store = RowLabelStore::new(ds.len());
        store.set_labels(0, ["b", "a, c", "it's"]).unwrap();
        let table = build_export_rows(&ds, &store, "classifications");
        let field = &table.records[0][2];
        assert_eq!(normalize_cell(field), vec!["b", "a, c", "it's"]);
    }

    #[test]
    fn test_column_name_collision_gets_suffix() {
        let ds = Dataset::from_records(
            vec!["classifications".to_string(), "classifications_1".to_string()],
            vec![vec!["x".to_string(), "y".to_string()]],
        );
        let table = build_export_rows(&ds, &RowLabelStore::new(1), "classifications");
        assert_eq!(table.headers[2], "classifications_2");
    }

    #[test]
    fn test_write_csv_quotes_everything() {
        let ds = dataset();
        let mut store = RowLabelStore::new(ds.len());
        store.toggle(0, "urgent").unwrap();
        let table = build_export_rows(&ds, &store, "classifications");

        let mut out = Vec::new();
        write_csv(&table, &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 4);
        assert_eq!(lines[0], r#""id","text","classifications""#);
        assert_eq!(lines[1], r#""1","server ""down""","[""urgent""]""#);
        assert_eq!(lines[3], r#""3","","[]""#);
    }

    #[test]
    fn test_export_to_path_reloads() {
        let ds = dataset();
        let mut store = RowLabelStore::new(ds.len());
        store.set_labels(2, ["x", "y"]).unwrap();
        let table = build_export_rows(&ds, &store, "classifications");

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.csv");
        export_to_path(&table, &path).unwrap();

        let reloaded = crate::data::loader::load_file(&path).unwrap();
        assert_eq!(reloaded.len(), 3);
        assert_eq!(reloaded.cell(1, "text"), Some("fine, thanks"));
        let labels = normalize_cell(reloaded.cell(2, "classifications").unwrap());
        assert_eq!(labels, vec!["x", "y"]);
    }
}
