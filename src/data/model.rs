// ---------------------------------------------------------------------------
// Row – one record of the ingested table
// ---------------------------------------------------------------------------

/// A single record, positionally aligned with [`Dataset::headers`].
///
/// Rows are created once at ingestion and never rewritten; the row's identity
/// is its index in [`Dataset::rows`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Row {
    pub cells: Vec<String>,
}

impl Row {
    /// Raw value at a column position (`""` past the end).
    pub fn cell(&self, column: usize) -> &str {
        self.cells.get(column).map(String::as_str).unwrap_or("")
    }
}

// ---------------------------------------------------------------------------
// Dataset – the complete loaded table
// ---------------------------------------------------------------------------

/// The full parsed table: ordered headers plus ordered rows.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Dataset {
    /// Column names in file order.
    pub headers: Vec<String>,
    /// All rows; each has exactly `headers.len()` cells.
    pub rows: Vec<Row>,
}

impl Dataset {
    /// Build a dataset, padding short records with `""` and dropping surplus
    /// cells so every row carries exactly the header set.
    pub fn from_records<I>(headers: Vec<String>, records: I) -> Self
    where
        I: IntoIterator<Item = Vec<String>>,
    {
        let width = headers.len();
        let rows = records
            .into_iter()
            .map(|mut cells| {
                cells.resize(width, String::new());
                Row { cells }
            })
            .collect();
        Dataset { headers, rows }
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Whether the dataset has no rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Position of a column by name.
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.headers.iter().position(|h| h == name)
    }

    /// Raw cell text for `(row, column name)`.
    pub fn cell(&self, row: usize, column: &str) -> Option<&str> {
        let col = self.column_index(column)?;
        self.rows.get(row).map(|r| r.cell(col))
    }

    /// All values of one column in row order. Empty if the column is unknown.
    pub fn column_values<'a>(&'a self, column: &str) -> impl Iterator<Item = &'a str> + 'a {
        let col = self.column_index(column);
        self.rows
            .iter()
            .filter_map(move |r| col.map(|c| r.cell(c)))
    }
}
