//! Batch assembly: one measurement group per row, in row order.

use std::sync::Arc;

use log::{info, warn};
use serde::{Deserialize, Serialize};

use crate::adapters::InstrumentAdapter;
use crate::error::Result;
use crate::input::Table;
use crate::schema::{Data, Metadata};

/// What to do with a row that fails to convert.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RowPolicy {
    /// The first failing row aborts the whole batch.
    #[default]
    Strict,
    /// Failing rows are logged, recorded in the report and left out.
    SkipMalformed,
}

/// A row left out of a batch under [`RowPolicy::SkipMalformed`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkippedRow {
    /// Zero-based data-row index.
    pub row: usize,
    /// Offending field, when the failure is attributable to one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
    pub reason: String,
}

/// Outcome counts for one assembled batch.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BatchReport {
    pub rows_seen: usize,
    pub rows_converted: usize,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub skipped: Vec<SkippedRow>,
}

impl BatchReport {
    /// Returns true if every row was converted.
    pub fn is_complete(&self) -> bool {
        self.skipped.is_empty() && self.rows_seen == self.rows_converted
    }
}

/// Applies an adapter across a whole table.
pub struct BatchAssembler<'a, A: InstrumentAdapter + ?Sized> {
    adapter: &'a A,
    policy: RowPolicy,
}

impl<'a, A: InstrumentAdapter + ?Sized> BatchAssembler<'a, A> {
    /// Create an assembler using the adapter's own row policy.
    pub fn new(adapter: &'a A) -> Self {
        Self {
            adapter,
            policy: adapter.row_policy(),
        }
    }

    /// Override the row policy.
    pub fn with_policy(mut self, policy: RowPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// The row policy in effect.
    pub fn policy(&self) -> RowPolicy {
        self.policy
    }

    /// Convert every row of `table` and attach `metadata`.
    pub fn build(&self, table: &Table, metadata: Arc<Metadata>) -> Result<Data> {
        self.build_with_report(table, metadata).map(|(data, _)| data)
    }

    /// Like [`build`](Self::build), also returning per-batch counts.
    pub fn build_with_report(
        &self,
        table: &Table,
        metadata: Arc<Metadata>,
    ) -> Result<(Data, BatchReport)> {
        let mut groups = Vec::with_capacity(table.row_count());
        let mut report = BatchReport {
            rows_seen: table.row_count(),
            ..BatchReport::default()
        };

        for row in &table.rows {
            match self.adapter.build_group(row) {
                Ok(group) => groups.push(group),
                Err(e) if self.policy == RowPolicy::SkipMalformed => {
                    warn!(
                        "{}: skipping row {}: {}",
                        self.adapter.name(),
                        row.index(),
                        e
                    );
                    report.skipped.push(SkippedRow {
                        row: row.index(),
                        field: e.field().map(str::to_string),
                        reason: e.to_string(),
                    });
                }
                Err(e) => return Err(e),
            }
        }

        report.rows_converted = groups.len();
        info!(
            "{}: converted {} of {} rows",
            self.adapter.name(),
            report.rows_converted,
            report.rows_seen
        );

        Ok((Data::new(metadata, groups), report))
    }
}
