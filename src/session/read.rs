use anyhow::{Context, Result};
use std::path::Path;
use tracing::debug;

use super::state::ReadError;

/// Upload ceiling: files larger than this are rejected before parsing.
pub const MAX_UPLOAD_BYTES: u64 = 10 * 1024 * 1024;

const UTF8_BOM: &[u8] = &[0xEF, 0xBB, 0xBF];

/// Reject a file by its declared size before any bytes are parsed.
pub fn check_size(declared: u64) -> Result<(), ReadError> {
    if declared > MAX_UPLOAD_BYTES {
        Err(ReadError::TooLarge { size: declared })
    } else {
        Ok(())
    }
}

/// Decode file bytes as UTF-8 text, tolerating a leading BOM.
///
/// Spreadsheet exports commonly prepend a BOM; stripping it keeps the first
/// header name clean. Anything that is not valid UTF-8 is `Unreadable`.
pub fn decode_text(bytes: &[u8]) -> Result<String, ReadError> {
    let bytes = bytes.strip_prefix(UTF8_BOM).unwrap_or(bytes);
    match std::str::from_utf8(bytes) {
        Ok(text) => Ok(text.to_string()),
        Err(_) => Err(ReadError::Unreadable),
    }
}

/// A selected file, as the evaluation pipeline sees it: display name,
/// declared byte size, raw content.
#[derive(Debug, Clone)]
pub struct FilePayload {
    pub name: String,
    pub size: u64,
    pub bytes: Vec<u8>,
}

/// Load a file from disk for evaluation. The size comes from metadata so the
/// ceiling check can run against the declared size, mirroring how a browser
/// reports a selection before its content is read.
pub async fn load_file(path: &Path) -> Result<FilePayload> {
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_else(|| path.display().to_string());

    let meta = tokio::fs::metadata(path)
        .await
        .with_context(|| format!("reading metadata for `{}`", path.display()))?;
    let size = meta.len();

    // Oversized files short-circuit in the session; still read here only
    // when within bounds so a huge selection never lands in memory.
    let bytes = if size > MAX_UPLOAD_BYTES {
        Vec::new()
    } else {
        tokio::fs::read(path)
            .await
            .with_context(|| format!("reading `{}`", path.display()))?
    };

    debug!(name = %name, size, "loaded file for evaluation");
    Ok(FilePayload { name, size, bytes })
}
