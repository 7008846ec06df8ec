//! Report rendering for the command-line output.

use std::fmt::Write;

use crate::verify::{CheckResult, GeofeedReport};

/// Renders the report printed to stdout after a successful run.
///
/// The diff fragments come first, separated by blank lines, followed by the
/// summary sentence and one `ASN: <n>, count: <c>` line per AS number, most
/// frequent first.
pub fn render_report(report: &GeofeedReport) -> String {
    let mut out = report.diff_lines.join("\n\n");
    let _ = write!(
        out,
        "\n\nOut of {} potential corrections, {} may be different than our current mappings\n\n",
        report.check.total, report.check.differences
    );
    for (as_number, count) in report.asn_counts.by_count_desc() {
        let _ = writeln!(out, "ASN: {as_number}, count: {count}");
    }
    out
}

/// Diagnostic lines for a geofeed with invalid rows: a header with the counts,
/// then one `<Kind>: '<sample>'` line per invalidity kind seen.
pub fn render_invalid_summary(check: &CheckResult) -> Vec<String> {
    let mut lines = Vec::with_capacity(check.sample_invalid_rows.len() + 1);
    lines.push(format!(
        "Found {} invalid rows out of {} rows in total, examples by type:",
        check.invalid, check.total
    ));
    lines.extend(
        check
            .sample_invalid_rows
            .iter()
            .map(|(kind, message)| format!("{kind}: '{message}'")),
    );
    lines
}
