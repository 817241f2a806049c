pub mod quantity;
pub mod stats;

pub use quantity::parse_quantity;
pub use stats::{IssueKind, RowIssue, Stats, MAX_ROW_ISSUES};

use serde::Serialize;
use std::collections::HashSet;

use crate::parse::ParsedTable;
use crate::schema::UploadSchema;

/// Summary suffix on a passed validation.
pub const STATUS_READY: &str = "ready";
/// Summary suffix when the file needs rework before submission.
pub const STATUS_FIX: &str = "fix and resubmit";

const EMPTY_MESSAGE: &str = "CSV is empty or unreadable.";

/// Outcome of validating one parsed table against an upload schema.
///
/// `stats` is present iff the header line was usable and every required
/// column was found; `issues` is a capped sample of defective rows and is
/// empty whenever `stats` is.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationResult {
    pub ok: bool,
    pub summary: String,
    pub stats: Option<Stats>,
    pub issues: Vec<RowIssue>,
}

impl ValidationResult {
    fn fail(summary: String) -> Self {
        Self {
            ok: false,
            summary,
            stats: None,
            issues: Vec::new(),
        }
    }
}

/// Validate a parsed table against the upload schema.
///
/// Pure: same table + schema always yields the same result, and nothing is
/// carried between calls. Structural failures (no header, missing required
/// columns) short-circuit with `stats = None`; otherwise every data row is
/// checked and the counters aggregated. Duplicate keys are reported but do
/// not fail the gate on their own; empty keys and invalid quantities do.
pub fn validate(table: &ParsedTable, schema: &UploadSchema) -> ValidationResult {
    if table.headers.is_empty() {
        return ValidationResult::fail(EMPTY_MESSAGE.to_string());
    }

    let headers: Vec<&str> = table.headers.iter().map(|h| h.trim()).collect();
    let required = schema.required();

    let missing: Vec<&str> = required
        .iter()
        .filter(|name| !headers.contains(&name.trim()))
        .copied()
        .collect();
    if !missing.is_empty() {
        return ValidationResult::fail(format!(
            "Missing required column(s): {}. Expected columns: {}.",
            missing.join(", "),
            required.join(", ")
        ));
    }

    // First occurrence wins if a header name is duplicated; upstream behavior
    // for duplicated headers is unspecified beyond that.
    let key_idx = position_of(&headers, &schema.key_column);
    let qty_idx = position_of(&headers, &schema.quantity_column);

    let mut stats = Stats {
        total_rows: table.rows.len(),
        ..Stats::default()
    };
    let mut seen: HashSet<&str> = HashSet::new();
    let mut issues: Vec<RowIssue> = Vec::new();

    for (i, row) in table.rows.iter().enumerate() {
        // Header is line 1, so data row i sits on line i + 2.
        let line = i + 2;
        let key = field_at(row, key_idx);
        let qty = field_at(row, qty_idx);

        if key.is_empty() {
            stats.empty_key_count += 1;
            stats.invalid_count += 1;
            push_issue(
                &mut issues,
                line,
                IssueKind::EmptyKey,
                format!("{} is empty", schema.key_column),
            );
            continue;
        }

        if seen.contains(key) {
            stats.duplicate_count += 1;
            push_issue(
                &mut issues,
                line,
                IssueKind::DuplicateKey,
                format!("duplicate {} '{}' inside this file", schema.key_column, key),
            );
            continue;
        }
        seen.insert(key);

        match parse_quantity(qty) {
            None => {
                stats.invalid_count += 1;
                push_issue(
                    &mut issues,
                    line,
                    IssueKind::NotAWholeNumber,
                    format!(
                        "{} must be a whole number, got '{}'",
                        schema.quantity_column, qty
                    ),
                );
            }
            Some(n) if n < 0 => {
                stats.negative_count += 1;
                stats.invalid_count += 1;
                push_issue(
                    &mut issues,
                    line,
                    IssueKind::NegativeQuantity,
                    format!("{} cannot be negative, got {}", schema.quantity_column, n),
                );
            }
            Some(_) => {}
        }
    }

    stats.unique_rows = seen.len();

    let ok = stats.invalid_count == 0 && stats.empty_key_count == 0;
    ValidationResult {
        ok,
        summary: summary_line(&stats, ok),
        stats: Some(stats),
        issues,
    }
}

/// Compose the one-line summary: always rows / unique / duplicates, then
/// invalid and negative clauses only when non-zero, then the status suffix.
fn summary_line(stats: &Stats, ok: bool) -> String {
    let mut clauses = vec![
        format!("{} rows", stats.total_rows),
        format!("{} unique keys", stats.unique_rows),
        format!("{} duplicates in file", stats.duplicate_count),
    ];
    if stats.invalid_count > 0 {
        clauses.push(format!("{} invalid rows", stats.invalid_count));
    }
    if stats.negative_count > 0 {
        clauses.push(format!("{} negative quantities", stats.negative_count));
    }
    clauses.push(if ok { STATUS_READY } else { STATUS_FIX }.to_string());
    clauses.join("; ")
}

fn position_of(headers: &[&str], name: &str) -> usize {
    headers
        .iter()
        .position(|h| *h == name.trim())
        .expect("required column was checked present")
}

fn field_at<'a>(row: &'a [String], idx: usize) -> &'a str {
    row.get(idx).map(|s| s.trim()).unwrap_or("")
}

fn push_issue(issues: &mut Vec<RowIssue>, line: usize, kind: IssueKind, detail: String) {
    if issues.len() < MAX_ROW_ISSUES {
        issues.push(RowIssue { line, kind, detail });
    }
}
