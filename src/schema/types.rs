// src/schema/types.rs

use serde::{Deserialize, Serialize};

/// Column names an upload must carry.
///
/// `key_column` values must be unique across the file; `quantity_column`
/// values must be non-negative whole numbers. The names are configuration,
/// not validator logic, so the same pipeline serves other deployments.
#[derive(Debug, Serialize, Deserialize, PartialEq, Clone, Eq)]
pub struct UploadSchema {
    pub key_column: String,
    pub quantity_column: String,
}

impl UploadSchema {
    pub fn new(key_column: impl Into<String>, quantity_column: impl Into<String>) -> Self {
        Self {
            key_column: key_column.into(),
            quantity_column: quantity_column.into(),
        }
    }

    /// Required column names in canonical order (key first).
    pub fn required(&self) -> [&str; 2] {
        [&self.key_column, &self.quantity_column]
    }
}
