use anyhow::{Context, Result};
use once_cell::sync::Lazy;
use std::fs;
use std::path::Path;
use tracing::debug;

use super::types::UploadSchema;

/// Column set for the national EA frame deployment.
pub static DEFAULT_SCHEMA: Lazy<UploadSchema> =
    Lazy::new(|| UploadSchema::new("NAT_EA_SN", "HOUSEHOLD_COUNT"));

/// Load an upload schema from a YAML file.
///
/// ```yaml
/// key_column: NAT_EA_SN
/// quantity_column: HOUSEHOLD_COUNT
/// ```
pub fn load_schema<P: AsRef<Path>>(path: P) -> Result<UploadSchema> {
    let path = path.as_ref();
    let raw = fs::read_to_string(path)
        .with_context(|| format!("reading schema file `{}`", path.display()))?;
    let schema: UploadSchema = serde_yaml::from_str(&raw)
        .with_context(|| format!("parsing schema file `{}`", path.display()))?;
    debug!(
        "loaded schema: key={}, quantity={}",
        schema.key_column, schema.quantity_column
    );
    Ok(schema)
}

/// The header line of the CSV template users should start from.
pub fn template_header(schema: &UploadSchema) -> String {
    schema.required().join(",")
}
