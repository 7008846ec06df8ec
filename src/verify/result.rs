//! Per-row outcomes and per-file aggregation.
//!
//! One [`Aggregator`] is created for each geofeed, receives every row outcome in
//! file order, and is consumed into a [`GeofeedReport`] at end of file.

use std::collections::BTreeMap;

use log::debug;

use crate::error_handling::RowInvalidity;

/// Result of checking one geofeed row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RowOutcome {
    /// The row was rejected and not compared.
    Invalid {
        /// Why the row was rejected
        kind: RowInvalidity,
        /// Human-readable reason, without the line number
        message: String,
    },
    /// The row was compared against the reference data.
    Valid {
        /// Diff fragment, empty when every compared field matches
        diff_text: String,
        /// AS number to count, set only for differing rows with a known ASN
        as_number: Option<u32>,
    },
}

impl RowOutcome {
    /// A valid row that matches the reference record.
    pub fn matching() -> Self {
        RowOutcome::Valid {
            diff_text: String::new(),
            as_number: None,
        }
    }

    /// Whether this row was rejected.
    pub fn is_invalid(&self) -> bool {
        matches!(self, RowOutcome::Invalid { .. })
    }
}

/// Counts for one geofeed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CheckResult {
    /// Rows read, including invalid ones
    pub total: usize,
    /// Valid rows that differ from the reference data
    pub differences: usize,
    /// Rows rejected as invalid
    pub invalid: usize,
    /// First message seen for each invalidity kind, prefixed with its line number
    pub sample_invalid_rows: BTreeMap<RowInvalidity, String>,
}

/// Occurrence count per AS number across differing rows.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AsnHistogram {
    counts: BTreeMap<u32, usize>,
}

impl AsnHistogram {
    /// Adds one occurrence of `as_number`.
    pub fn increment(&mut self, as_number: u32) {
        *self.counts.entry(as_number).or_insert(0) += 1;
    }

    /// Occurrences recorded for `as_number`.
    pub fn count(&self, as_number: u32) -> usize {
        self.counts.get(&as_number).copied().unwrap_or(0)
    }

    /// Number of distinct AS numbers.
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    /// Whether no AS number has been recorded.
    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// `(as_number, count)` pairs, most frequent first; ties by ascending AS number.
    pub fn by_count_desc(&self) -> Vec<(u32, usize)> {
        let mut entries: Vec<(u32, usize)> = self.counts.iter().map(|(&n, &c)| (n, c)).collect();
        // Stable sort keeps the ascending AS number order from the BTreeMap on ties.
        entries.sort_by(|a, b| b.1.cmp(&a.1));
        entries
    }
}

/// Everything produced by verifying one geofeed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GeofeedReport {
    /// Row counts and invalid-row samples
    pub check: CheckResult,
    /// One diff fragment per differing row, in file order
    pub diff_lines: Vec<String>,
    /// AS numbers of differing rows
    pub asn_counts: AsnHistogram,
}

/// Folds row outcomes into a [`GeofeedReport`].
#[derive(Debug, Default)]
pub struct Aggregator {
    report: GeofeedReport,
}

impl Aggregator {
    /// Creates an empty aggregator.
    pub fn new() -> Self {
        Self::default()
    }

    /// Records the outcome of the next row.
    ///
    /// Rows are numbered from 1 in the order they are recorded. Only the first
    /// message of each invalidity kind is kept.
    pub fn record_row(&mut self, outcome: RowOutcome) {
        let check = &mut self.report.check;
        check.total += 1;
        let line = check.total;

        match outcome {
            RowOutcome::Invalid { kind, message } => {
                debug!("line {}: {}: {}", line, kind, message);
                check.invalid += 1;
                check
                    .sample_invalid_rows
                    .entry(kind)
                    .or_insert_with(|| format!("line {line}: {message}"));
            }
            RowOutcome::Valid {
                diff_text,
                as_number,
            } => {
                if diff_text.is_empty() {
                    return;
                }
                check.differences += 1;
                self.report.diff_lines.push(diff_text);
                if let Some(as_number) = as_number.filter(|&n| n > 0) {
                    self.report.asn_counts.increment(as_number);
                }
            }
        }
    }

    /// Rows recorded so far.
    pub fn total(&self) -> usize {
        self.report.check.total
    }

    /// Consumes the aggregator and returns the report.
    pub fn finish(self) -> GeofeedReport {
        self.report
    }
}
