//! Data source abstraction and metadata.

use std::path::PathBuf;

use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use super::value::RawValue;

/// Metadata about the source export file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceMetadata {
    /// File name without path.
    pub file: String,
    /// Full path to the file.
    pub path: PathBuf,
    /// SHA-256 hash of the file contents.
    pub hash: String,
    /// File size in bytes.
    pub size_bytes: u64,
    /// Detected format (csv, tsv, json, etc.).
    pub format: String,
    /// Number of data rows (excluding header).
    pub row_count: usize,
    /// Number of columns.
    pub column_count: usize,
    /// When the file was read.
    pub read_at: DateTime<Utc>,
}

impl SourceMetadata {
    /// Create metadata for a file that has been read.
    pub fn new(
        path: PathBuf,
        hash: String,
        size_bytes: u64,
        format: String,
        row_count: usize,
        column_count: usize,
    ) -> Self {
        let file = path
            .file_name()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default();

        Self {
            file,
            path,
            hash,
            size_bytes,
            format,
            row_count,
            column_count,
            read_at: Utc::now(),
        }
    }
}

/// One record from an instrument export: column name to raw cell value.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Row {
    index: usize,
    cells: IndexMap<String, RawValue>,
}

impl Row {
    /// Create a row with the given zero-based data-row index.
    pub fn new(index: usize, cells: IndexMap<String, RawValue>) -> Self {
        Self { index, cells }
    }

    /// Build a row from `(column, value)` pairs, in order.
    pub fn from_pairs<K, V>(index: usize, pairs: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<RawValue>,
    {
        let cells = pairs
            .into_iter()
            .map(|(k, v)| (k.into(), v.into()))
            .collect();
        Self { index, cells }
    }

    /// Zero-based position of this row among the table's data rows.
    pub fn index(&self) -> usize {
        self.index
    }

    /// Look up a cell by column name. `None` if the column does not exist.
    pub fn get(&self, column: &str) -> Option<&RawValue> {
        self.cells.get(column)
    }

    /// Returns true if the row has the given column, whatever its value.
    pub fn has_column(&self, column: &str) -> bool {
        self.cells.contains_key(column)
    }

    /// Column names in source order.
    pub fn columns(&self) -> impl Iterator<Item = &str> {
        self.cells.keys().map(|k| k.as_str())
    }

    /// Iterate over `(column, value)` pairs in source order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &RawValue)> {
        self.cells.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Number of cells in the row.
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Returns true if the row has no cells.
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}

/// Represents parsed tabular data: rows sharing one column schema.
#[derive(Debug, Clone, Default)]
pub struct Table {
    /// Column headers.
    pub headers: Vec<String>,
    /// Data rows, in source order.
    pub rows: Vec<Row>,
}

impl Table {
    /// Create a new table from headers and rows.
    pub fn new(headers: Vec<String>, rows: Vec<Row>) -> Self {
        Self { headers, rows }
    }

    /// Build a table from string records aligned with `headers` by position.
    ///
    /// Short records are padded with `Absent`; extra cells are dropped.
    /// Repeated header names get a `.N` suffix (`Note`, `Note.1`).
    pub fn from_records<R, S>(headers: Vec<String>, records: impl IntoIterator<Item = R>) -> Self
    where
        R: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let headers = dedupe_headers(headers);
        let rows = records
            .into_iter()
            .enumerate()
            .map(|(index, record)| {
                let mut record = record.into_iter();
                let cells: IndexMap<String, RawValue> = headers
                    .iter()
                    .map(|h| {
                        let value = record
                            .next()
                            .map_or(RawValue::Absent, |cell| RawValue::from_cell(cell.as_ref()));
                        (h.clone(), value)
                    })
                    .collect();
                Row::new(index, cells)
            })
            .collect();

        Self { headers, rows }
    }

    /// Get the number of columns.
    pub fn column_count(&self) -> usize {
        self.headers.len()
    }

    /// Get the number of rows (excluding header).
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Returns true if the table has a column with this name.
    pub fn has_column(&self, name: &str) -> bool {
        self.headers.iter().any(|h| h == name)
    }

    /// Get a specific row.
    pub fn row(&self, index: usize) -> Option<&Row> {
        self.rows.get(index)
    }
}

/// Make header names unique, suffixing repeats with `.1`, `.2`, ...
fn dedupe_headers(headers: Vec<String>) -> Vec<String> {
    let mut seen: IndexMap<String, usize> = IndexMap::with_capacity(headers.len());
    let mut unique = Vec::with_capacity(headers.len());

    for header in headers {
        let mut name = header.clone();
        let mut suffix = seen.get(&header).copied().unwrap_or(0);
        while seen.contains_key(&name) {
            suffix += 1;
            name = format!("{}.{}", header, suffix);
        }
        seen.insert(header.clone(), suffix);
        seen.entry(name.clone()).or_insert(0);
        unique.push(name);
    }

    unique
}
