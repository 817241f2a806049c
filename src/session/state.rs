use serde::Serialize;

use crate::parse::ParsedTable;
use crate::validate::ValidationResult;

/// Why a file never reached the validator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ReadError {
    /// Declared size exceeds the upload ceiling; rejected before parsing.
    TooLarge { size: u64 },
    /// Bytes did not decode as UTF-8 text.
    Unreadable,
}

impl ReadError {
    /// User-facing remediation message. The two causes stay distinguishable
    /// both here and via the enum itself.
    pub fn message(&self) -> String {
        match self {
            ReadError::TooLarge { size } => format!(
                "File is {:.1} MiB, larger than the 10 MiB limit. Split it into smaller files and try again.",
                *size as f64 / (1024.0 * 1024.0)
            ),
            ReadError::Unreadable => {
                "Could not read the file as text. Re-export it as UTF-8 CSV and try again."
                    .to_string()
            }
        }
    }
}

/// Where one file-selection evaluation currently stands.
///
/// Every variant after `Idle` carries the sequence number of the evaluation
/// that produced it, so late completions of superseded reads can be told
/// apart from the current one.
#[derive(Debug, Clone, PartialEq)]
pub enum Phase {
    Idle,
    Reading {
        seq: u64,
    },
    ParseFailed {
        seq: u64,
        error: ReadError,
    },
    /// The table is kept alongside the verdict: row-level failures still
    /// render a preview, only read failures leave nothing to show.
    Validated {
        seq: u64,
        table: ParsedTable,
        result: ValidationResult,
    },
}

impl Phase {
    pub fn seq(&self) -> Option<u64> {
        match self {
            Phase::Idle => None,
            Phase::Reading { seq }
            | Phase::ParseFailed { seq, .. }
            | Phase::Validated { seq, .. } => Some(*seq),
        }
    }
}
