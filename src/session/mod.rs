pub mod read;
pub mod state;

pub use read::{check_size, decode_text, load_file, FilePayload, MAX_UPLOAD_BYTES};
pub use state::{Phase, ReadError};

use anyhow::Result;
use std::path::Path;
use tracing::debug;

use crate::parse::parse_text;
use crate::schema::UploadSchema;
use crate::validate::validate;

/// One upload control's evaluation state.
///
/// Each file selection goes through `begin` -> read/decode -> `complete` (or
/// `fail_read`). `begin` hands out a monotonically increasing sequence
/// number and resets the visible state before any await, so a new selection
/// supersedes an in-flight one; completions carrying a stale sequence number
/// are discarded instead of clobbering the latest outcome. The submit gate
/// opens only on a passed validation.
pub struct Session {
    schema: UploadSchema,
    next_seq: u64,
    phase: Phase,
}

impl Session {
    pub fn new(schema: UploadSchema) -> Self {
        Self {
            schema,
            next_seq: 0,
            phase: Phase::Idle,
        }
    }

    pub fn schema(&self) -> &UploadSchema {
        &self.schema
    }

    pub fn phase(&self) -> &Phase {
        &self.phase
    }

    /// Start a new evaluation: bumps the sequence number, clears any prior
    /// outcome. Everything previously shown (preview, verdict) is gone the
    /// moment a new file is selected.
    pub fn begin(&mut self) -> u64 {
        self.next_seq += 1;
        self.phase = Phase::Reading { seq: self.next_seq };
        self.next_seq
    }

    /// Record a read failure for evaluation `seq`. Returns false (and leaves
    /// state untouched) when `seq` is not the in-flight evaluation.
    pub fn fail_read(&mut self, seq: u64, error: ReadError) -> bool {
        if !self.is_current(seq) {
            return false;
        }
        self.phase = Phase::ParseFailed { seq, error };
        true
    }

    /// Tokenize + validate decoded text for evaluation `seq`. Returns false
    /// when `seq` has been superseded.
    pub fn complete(&mut self, seq: u64, text: &str) -> bool {
        if !self.is_current(seq) {
            return false;
        }
        let table = parse_text(text);
        let result = validate(&table, &self.schema);
        self.phase = Phase::Validated { seq, table, result };
        true
    }

    /// Run a whole evaluation synchronously over an in-memory payload:
    /// size ceiling, decode, tokenize, validate.
    pub fn evaluate(&mut self, payload: &FilePayload) -> u64 {
        let seq = self.begin();
        if let Err(error) = check_size(payload.size) {
            self.fail_read(seq, error);
            return seq;
        }
        match decode_text(&payload.bytes) {
            Ok(text) => self.complete(seq, &text),
            Err(error) => self.fail_read(seq, error),
        };
        seq
    }

    /// Load a file from disk and evaluate it. Host-level I/O faults (file
    /// missing, unreadable directory) propagate; domain failures land in the
    /// phase like everywhere else.
    pub async fn evaluate_file(&mut self, path: &Path) -> Result<u64> {
        let payload = load_file(path).await?;
        Ok(self.evaluate(&payload))
    }

    /// The gate: submission is allowed only while the latest evaluation
    /// passed. Every failure kind keeps it closed.
    pub fn submit_enabled(&self) -> bool {
        matches!(&self.phase, Phase::Validated { result, .. } if result.ok)
    }

    fn is_current(&self, seq: u64) -> bool {
        if seq != self.next_seq {
            debug!(seq, latest = self.next_seq, "discarding stale completion");
            return false;
        }
        matches!(self.phase, Phase::Reading { seq: s } if s == seq)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::DEFAULT_SCHEMA;

    fn session() -> Session {
        Session::new(DEFAULT_SCHEMA.clone())
    }

    fn payload(text: &str) -> FilePayload {
        FilePayload {
            name: "upload.csv".to_string(),
            size: text.len() as u64,
            bytes: text.as_bytes().to_vec(),
        }
    }

    #[test]
    fn passing_file_opens_the_gate() {
        let mut s = session();
        s.evaluate(&payload("NAT_EA_SN,HOUSEHOLD_COUNT\nEA1,3\n"));
        assert!(s.submit_enabled());
        match s.phase() {
            Phase::Validated { result, table, .. } => {
                assert!(result.ok);
                assert_eq!(table.rows.len(), 1);
            }
            other => panic!("unexpected phase {:?}", other),
        }
    }

    #[test]
    fn row_failures_close_the_gate_but_keep_the_table() {
        let mut s = session();
        s.evaluate(&payload("NAT_EA_SN,HOUSEHOLD_COUNT\nEA1,-3\n"));
        assert!(!s.submit_enabled());
        assert!(matches!(s.phase(), Phase::Validated { table, .. } if !table.is_empty()));
    }

    #[test]
    fn oversized_file_is_rejected_before_parsing() {
        let mut s = session();
        let mut p = payload("NAT_EA_SN,HOUSEHOLD_COUNT\nEA1,3\n");
        p.size = MAX_UPLOAD_BYTES + 1;
        s.evaluate(&p);
        assert!(!s.submit_enabled());
        assert!(matches!(
            s.phase(),
            Phase::ParseFailed {
                error: ReadError::TooLarge { .. },
                ..
            }
        ));
    }

    #[test]
    fn undecodable_file_is_unreadable() {
        let mut s = session();
        let p = FilePayload {
            name: "binary.csv".to_string(),
            size: 3,
            bytes: vec![0xFF, 0x00, 0xFE],
        };
        s.evaluate(&p);
        assert!(matches!(
            s.phase(),
            Phase::ParseFailed {
                error: ReadError::Unreadable,
                ..
            }
        ));
    }

    #[test]
    fn new_selection_resets_previous_outcome() {
        let mut s = session();
        s.evaluate(&payload("NAT_EA_SN,HOUSEHOLD_COUNT\nEA1,3\n"));
        assert!(s.submit_enabled());

        let seq = s.begin();
        assert!(!s.submit_enabled(), "gate must close while reading");
        assert_eq!(s.phase().seq(), Some(seq));
    }

    #[test]
    fn stale_completion_is_discarded() {
        let mut s = session();
        let first = s.begin();
        let second = s.begin();

        // The first read finishes late; its result must not land.
        assert!(!s.complete(first, "NAT_EA_SN,HOUSEHOLD_COUNT\nEA1,3\n"));
        assert!(matches!(s.phase(), Phase::Reading { seq } if *seq == second));
        assert!(!s.submit_enabled());

        assert!(s.complete(second, "NAT_EA_SN,HOUSEHOLD_COUNT\nEA2,4\n"));
        assert!(s.submit_enabled());
    }

    #[test]
    fn stale_read_failure_is_discarded() {
        let mut s = session();
        let first = s.begin();
        let second = s.begin();
        assert!(!s.fail_read(first, ReadError::Unreadable));
        assert!(s.complete(second, "NAT_EA_SN,HOUSEHOLD_COUNT\nEA1,1\n"));
        assert!(s.submit_enabled());
    }

    #[test]
    fn double_completion_is_ignored() {
        let mut s = session();
        let seq = s.begin();
        assert!(s.complete(seq, "NAT_EA_SN,HOUSEHOLD_COUNT\nEA1,1\n"));
        assert!(!s.complete(seq, "NAT_EA_SN,HOUSEHOLD_COUNT\nEA2,2\n"));
    }

    #[tokio::test]
    async fn evaluate_file_runs_the_whole_pipeline() -> Result<()> {
        let dir = tempfile::tempdir()?;
        let path = dir.path().join("frame.csv");
        tokio::fs::write(&path, "NAT_EA_SN,HOUSEHOLD_COUNT\nEA1,3\n").await?;

        let mut s = session();
        s.evaluate_file(&path).await?;
        assert!(s.submit_enabled());
        Ok(())
    }
}
