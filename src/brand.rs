use std::collections::HashMap;
use std::path::Path;

use anyhow::{Context, Result};

// ── Default brand table ──────────────────────────────────────────────────────

/// Brands sold on the site, keyed by the title-cased filename token.
/// Only `Lg` needs a spelling fix; the rest map to themselves.
const DEFAULT_BRANDS: &[(&str, &str)] = &[
    ("Apple", "Apple"),
    ("Bosch", "Bosch"),
    ("Electrolux", "Electrolux"),
    ("Haier", "Haier"),
    ("Lg", "LG"),
    ("Panasonic", "Panasonic"),
    ("Sony", "Sony"),
    ("Whirlpool", "Whirlpool"),
    ("Samsung", "Samsung"),
];

// ── Brand inference ──────────────────────────────────────────────────────────

/// Case-correction table for brand tokens derived from page filenames.
#[derive(Debug, Clone)]
pub struct BrandTable(HashMap<String, String>);

impl Default for BrandTable {
    fn default() -> Self {
        Self(
            DEFAULT_BRANDS
                .iter()
                .map(|&(token, brand)| (token.to_string(), brand.to_string()))
                .collect(),
        )
    }
}

impl BrandTable {
    /// Load a replacement table from a JSON object of token -> brand pairs.
    pub fn load(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read brand table {}", path.display()))?;
        let map: HashMap<String, String> = serde_json::from_str(&raw)
            .with_context(|| format!("Invalid brand table {}", path.display()))?;
        Ok(Self(map))
    }

    /// Derive the brand for a page: base name, token before the first hyphen,
    /// title-cased, then corrected through the table. Unknown tokens pass
    /// through title-cased.
    pub fn infer(&self, page: &Path) -> String {
        let base = page
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default();
        let token = base.split('-').next().unwrap_or("");
        let titled = title_case(token);
        match self.0.get(&titled) {
            Some(brand) => brand.clone(),
            None => titled,
        }
    }
}

/// Title-case a token: a letter is uppercased at the start of each letter run
/// and lowercased inside one, so `lg` -> `Lg` and `HOME.html` -> `Home.Html`.
fn title_case(token: &str) -> String {
    let mut out = String::with_capacity(token.len());
    let mut in_run = false;
    for ch in token.chars() {
        if ch.is_alphabetic() {
            if in_run {
                out.extend(ch.to_lowercase());
            } else {
                out.extend(ch.to_uppercase());
            }
            in_run = true;
        } else {
            out.push(ch);
            in_run = false;
        }
    }
    out
}

// ── Tests ────────────────────────────────────────────────────────────────────
