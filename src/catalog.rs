use std::path::Path;

use anyhow::{Context, Result};
use serde::Serialize;

/// One product pulled off a listing page. Serialization keeps this field
/// order, which is the key order of the published catalog.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProductRecord {
    pub id: String,
    pub name: String,
    pub description: String,
    pub image: String,
    pub price: f64,
    pub brand: String,
    pub link: String,
}

/// Render the catalog as pretty JSON: one array, 2-space indent, non-ASCII
/// text kept literal.
pub fn to_json(records: &[ProductRecord]) -> Result<String> {
    serde_json::to_string_pretty(records).context("Failed to serialize catalog")
}

/// Write the whole catalog in one shot, replacing any previous file.
pub fn write(path: &Path, records: &[ProductRecord]) -> Result<()> {
    let json = to_json(records)?;
    std::fs::write(path, json)
        .with_context(|| format!("Failed to write catalog {}", path.display()))
}
