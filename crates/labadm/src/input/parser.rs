//! CSV/TSV and JSON-records reader with delimiter detection.

use std::fs::File;
use std::io::{BufRead, BufReader, Read};
use std::path::Path;

use indexmap::IndexMap;
use log::debug;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use super::source::{Row, SourceMetadata, Table};
use super::value::RawValue;
use crate::error::{AdmError, Result};

/// Delimiters to try when auto-detecting.
const DELIMITERS: &[u8] = &[b'\t', b',', b';', b'|'];

/// Parser configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParserConfig {
    /// Delimiter to use (None = auto-detect).
    pub delimiter: Option<char>,
    /// Whether the file has a header row.
    pub has_header: bool,
    /// Maximum rows to read (None = all).
    pub max_rows: Option<usize>,
    /// Quote character.
    pub quote: char,
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            delimiter: None,
            has_header: true,
            max_rows: None,
            quote: '"',
        }
    }
}

/// Reads instrument export files into a [`Table`].
pub struct Parser {
    config: ParserConfig,
}

impl Parser {
    /// Create a new parser with default configuration.
    pub fn new() -> Self {
        Self {
            config: ParserConfig::default(),
        }
    }

    /// Create a parser with custom configuration.
    pub fn with_config(config: ParserConfig) -> Self {
        Self { config }
    }

    /// Parse a file and return the table and its source metadata.
    pub fn parse_file(&self, path: impl AsRef<Path>) -> Result<(Table, SourceMetadata)> {
        let path = path.as_ref();
        let io_err = |source| AdmError::Io {
            path: path.to_path_buf(),
            source,
        };

        let mut file = File::open(path).map_err(io_err)?;
        let size_bytes = file.metadata().map_err(io_err)?.len();

        let mut contents = Vec::new();
        file.read_to_end(&mut contents).map_err(io_err)?;

        let mut hasher = Sha256::new();
        hasher.update(&contents);
        let hash = format!("sha256:{:x}", hasher.finalize());

        let is_json = path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));

        let (table, format) = if is_json {
            (self.parse_json(&contents)?, "json".to_string())
        } else {
            let delimiter = self.resolve_delimiter(&contents)?;
            let format = match delimiter {
                b'\t' => "tsv",
                b',' => "csv",
                b';' => "csv-semicolon",
                b'|' => "psv",
                _ => "delimited",
            }
            .to_string();
            (self.parse_bytes(&contents, delimiter)?, format)
        };

        debug!(
            "Read {} rows x {} columns from {} ({})",
            table.row_count(),
            table.column_count(),
            path.display(),
            format
        );

        let source_metadata = SourceMetadata::new(
            path.to_path_buf(),
            hash,
            size_bytes,
            format,
            table.row_count(),
            table.column_count(),
        );

        Ok((table, source_metadata))
    }

    /// Parse delimited text held in memory, detecting the delimiter if unset.
    pub fn parse_str(&self, text: &str) -> Result<Table> {
        let bytes = text.as_bytes();
        let delimiter = self.resolve_delimiter(bytes)?;
        self.parse_bytes(bytes, delimiter)
    }

    /// Parse a JSON array of flat objects, one object per row.
    ///
    /// Column order follows first appearance across all records.
    pub fn parse_json(&self, bytes: &[u8]) -> Result<Table> {
        let records: Vec<IndexMap<String, serde_json::Value>> = serde_json::from_slice(bytes)?;

        let mut headers: Vec<String> = Vec::new();
        for record in &records {
            for key in record.keys() {
                if !headers.contains(key) {
                    headers.push(key.clone());
                }
            }
        }

        if headers.is_empty() {
            return Err(AdmError::EmptyData("No columns found".to_string()));
        }

        let limit = self.config.max_rows.unwrap_or(usize::MAX);
        let rows: Vec<Row> = records
            .iter()
            .take(limit)
            .enumerate()
            .map(|(index, record)| {
                let cells = headers
                    .iter()
                    .map(|h| {
                        let value = record.get(h).map_or(RawValue::Absent, RawValue::from_json);
                        (h.clone(), value)
                    })
                    .collect();
                Row::new(index, cells)
            })
            .collect();

        if rows.is_empty() {
            return Err(AdmError::EmptyData("No data rows found".to_string()));
        }

        Ok(Table::new(headers, rows))
    }

    fn quote_byte(&self) -> Result<u8> {
        let quote = self.config.quote;
        ascii_byte(quote).ok_or_else(|| {
            AdmError::Config(format!("quote '{}' is not a single ASCII character", quote))
        })
    }

    fn resolve_delimiter(&self, bytes: &[u8]) -> Result<u8> {
        match self.config.delimiter {
            Some(d) => ascii_byte(d).ok_or_else(|| {
                AdmError::InvalidDelimiter(format!("'{}' is not a single ASCII character", d))
            }),
            None => detect_delimiter(bytes, self.quote_byte()?),
        }
    }

    /// Parse bytes directly.
    fn parse_bytes(&self, bytes: &[u8], delimiter: u8) -> Result<Table> {
        let quote = self.quote_byte()?;
        let builder = || {
            let mut b = csv::ReaderBuilder::new();
            b.delimiter(delimiter)
                .has_headers(self.config.has_header)
                .quote(quote)
                .flexible(true);
            b
        };

        let mut reader = builder().from_reader(bytes);

        let headers: Vec<String> = if self.config.has_header {
            reader
                .headers()?
                .iter()
                .map(|s| s.trim().to_string())
                .collect()
        } else {
            // Generate column names
            match reader.records().next() {
                Some(Ok(record)) => (0..record.len())
                    .map(|i| format!("column_{}", i + 1))
                    .collect(),
                Some(Err(e)) => return Err(e.into()),
                None => return Err(AdmError::EmptyData("No data rows found".to_string())),
            }
        };

        if headers.is_empty() || headers.iter().all(|h| h.is_empty()) {
            return Err(AdmError::EmptyData("No columns found".to_string()));
        }

        // Re-create the reader: the header probe may have consumed a record
        let mut reader = builder().from_reader(bytes);
        let limit = self.config.max_rows.unwrap_or(usize::MAX);

        let mut records = Vec::new();
        for result in reader.records().take(limit) {
            let record = result?;
            records.push(record.iter().map(|s| s.to_string()).collect::<Vec<_>>());
        }

        if records.is_empty() {
            return Err(AdmError::EmptyData("No data rows found".to_string()));
        }

        Ok(Table::from_records(headers, records))
    }
}

impl Default for Parser {
    fn default() -> Self {
        Self::new()
    }
}

fn ascii_byte(c: char) -> Option<u8> {
    c.is_ascii().then_some(c as u8)
}

/// Detect the delimiter by analyzing the first few lines.
fn detect_delimiter(bytes: &[u8], quote: u8) -> Result<u8> {
    let reader = BufReader::new(bytes);
    let lines: Vec<String> = reader
        .lines()
        .take(10)
        .map_while(|l| l.ok())
        .filter(|l| !l.trim().is_empty())
        .collect();

    if lines.is_empty() {
        return Err(AdmError::EmptyData("No lines to analyze".to_string()));
    }

    let mut best_delimiter = b',';
    let mut best_score = 0;

    for &delim in DELIMITERS {
        let counts: Vec<usize> = lines
            .iter()
            .map(|line| count_delimiter_in_line(line, delim, quote))
            .collect();

        let first_count = counts[0];
        if first_count == 0 {
            continue;
        }

        let consistent = counts.iter().all(|&c| c == first_count);
        let variance: f64 = if counts.len() > 1 {
            let mean = counts.iter().sum::<usize>() as f64 / counts.len() as f64;
            counts.iter().map(|&c| (c as f64 - mean).powi(2)).sum::<f64>() / counts.len() as f64
        } else {
            0.0
        };

        // Higher count with lower variance wins; tab gets a slight bonus
        let score = if consistent {
            first_count * 1000 + (if delim == b'\t' { 100 } else { 0 })
        } else if variance < 1.0 {
            first_count * 100
        } else {
            first_count
        };

        if score > best_score {
            best_score = score;
            best_delimiter = delim;
        }
    }

    Ok(best_delimiter)
}

/// Count delimiter occurrences in a line, respecting quotes.
fn count_delimiter_in_line(line: &str, delimiter: u8, quote: u8) -> usize {
    let delim_char = delimiter as char;
    let quote_char = quote as char;
    let mut count = 0;
    let mut in_quotes = false;

    for ch in line.chars() {
        match ch {
            c if c == quote_char => in_quotes = !in_quotes,
            c if c == delim_char && !in_quotes => count += 1,
            _ => {}
        }
    }

    count
}
