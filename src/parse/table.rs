use serde::{Deserialize, Serialize};

use super::line::split_fields;

/// Header row plus data rows, exactly as tokenized.
///
/// Rows are NOT rectangularized: a row may carry fewer or more fields than
/// the header line. Consumers align fields to headers by index and treat a
/// missing position as an empty field.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParsedTable {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl ParsedTable {
    pub fn is_empty(&self) -> bool {
        self.headers.is_empty()
    }
}

/// Tokenize raw CSV text into a header row and data rows.
///
/// Line endings are normalized (CR-LF and bare CR count as line breaks),
/// blank and whitespace-only lines are dropped, and the first surviving line
/// is the header. Quoted fields must not span lines; this is a lenient
/// tokenizer for simple exports, not a strict RFC 4180 reader, and it never
/// fails on malformed quoting.
pub fn parse_text(text: &str) -> ParsedTable {
    let mut lines = text
        .split(['\n', '\r'])
        .map(str::trim)
        .filter(|l| !l.is_empty());

    let headers = match lines.next() {
        Some(header_line) => split_fields(header_line),
        None => return ParsedTable::default(),
    };

    let rows = lines.map(split_fields).collect();

    ParsedTable { headers, rows }
}
