pub mod cards;
pub mod fields;

use std::path::Path;

use anyhow::{Context, Result};
use scraper::Html;

use crate::brand::BrandTable;
use crate::catalog::ProductRecord;

/// Pull every accepted product off one listing page.
pub fn extract_page(page: &Path, root: &Path, brands: &BrandTable) -> Result<Vec<ProductRecord>> {
    let html = std::fs::read_to_string(page)
        .with_context(|| format!("Failed to read {}", page.display()))?;
    let brand = brands.infer(page);
    let link = site_link(page, root);
    extract_from_html(&html, &brand, &link, page)
}

/// Three-pass pipeline: parse the document → locate accepted cards →
/// reconcile each card's fields into a record.
pub fn extract_from_html(
    html: &str,
    brand: &str,
    link: &str,
    page: &Path,
) -> Result<Vec<ProductRecord>> {
    let doc = Html::parse_document(html);
    cards::locate(&doc)
        .iter()
        .map(|card| fields::reconcile(card, brand, link, page))
        .collect()
}

/// Catalog link for a page: its path relative to the scan root, `./`-prefixed
/// so the static site can resolve it from its own root.
fn site_link(page: &Path, root: &Path) -> String {
    let rel = page.strip_prefix(root).unwrap_or(page);
    format!("./{}", rel.display())
}
