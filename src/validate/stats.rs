use serde::Serialize;

/// Row-issue detail entries are capped at this many; the counters in
/// [`Stats`] keep counting past the cap.
pub const MAX_ROW_ISSUES: usize = 15;

/// Aggregate counters over every data row of a file.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Stats {
    pub total_rows: usize,
    pub unique_rows: usize,
    pub duplicate_count: usize,
    pub invalid_count: usize,
    pub empty_key_count: usize,
    pub negative_count: usize,
}

/// What went wrong in a single row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum IssueKind {
    EmptyKey,
    DuplicateKey,
    NotAWholeNumber,
    NegativeQuantity,
}

impl IssueKind {
    pub fn as_str(&self) -> &str {
        match self {
            IssueKind::EmptyKey => "empty key",
            IssueKind::DuplicateKey => "duplicate key",
            IssueKind::NotAWholeNumber => "not a whole number",
            IssueKind::NegativeQuantity => "negative quantity",
        }
    }
}

/// One defective row, located by its line in the file.
///
/// `line` is 1-based counting the header line, so the first data row is
/// line 2, matching what a spreadsheet shows the user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RowIssue {
    pub line: usize,
    pub kind: IssueKind,
    pub detail: String,
}
