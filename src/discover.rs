use std::path::{Path, PathBuf};

use anyhow::Result;
use walkdir::WalkDir;

/// Listing pages picked up by the extractor besides `productpage`-named ones.
const EXTRA_LISTING_PAGES: &[&str] = &["HOME.html", "BRANDS.HTML", "product2.html"];

/// The one page the patcher never touches: it ships its own search UI.
const SEARCH_RESULTS_PAGE: &str = "search-results.html";

/// Pages the catalog extractor reads: every `.html` file whose name contains
/// `productpage`, plus the fixed listing pages.
pub fn listing_pages(root: &Path) -> Result<Vec<PathBuf>> {
    walk_html(root, |name| {
        name.contains("productpage") || EXTRA_LISTING_PAGES.contains(&name)
    })
}

/// Pages the navbar patcher visits: every `.html` file except the search
/// results page.
pub fn patchable_pages(root: &Path) -> Result<Vec<PathBuf>> {
    walk_html(root, |name| name != SEARCH_RESULTS_PAGE)
}

/// Walk `root` in sorted order and keep `.html` files passing `keep`.
/// The extension check is case sensitive, so `INDEX.HTML` never matches.
fn walk_html(root: &Path, keep: impl Fn(&str) -> bool) -> Result<Vec<PathBuf>> {
    let mut pages = Vec::new();
    for entry in WalkDir::new(root).sort_by_file_name() {
        let entry = entry?;
        if !entry.file_type().is_file() {
            continue;
        }
        let name = entry.file_name().to_string_lossy();
        if name.ends_with(".html") && keep(&name) {
            pages.push(entry.into_path());
        }
    }
    Ok(pages)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn seed_site(root: &Path) {
        fs::create_dir(root.join("pages")).unwrap();
        for name in [
            "HOME.html",
            "BRANDS.HTML",
            "product2.html",
            "about.html",
            "search-results.html",
            "lg-productpage-fridges.html",
            "INDEX.HTML",
            "notes.txt",
        ] {
            fs::write(root.join(name), "<html></html>").unwrap();
        }
        fs::write(root.join("pages/sony-productpage-tvs.html"), "<html></html>").unwrap();
    }

    fn names(pages: &[PathBuf], root: &Path) -> Vec<String> {
        pages
            .iter()
            .map(|p| p.strip_prefix(root).unwrap().to_string_lossy().into_owned())
            .collect()
    }

    #[test]
    fn test_listing_pages_filter() {
        let dir = tempfile::tempdir().unwrap();
        seed_site(dir.path());

        let pages = listing_pages(dir.path()).unwrap();
        assert_eq!(
            names(&pages, dir.path()),
            vec![
                "HOME.html",
                "lg-productpage-fridges.html",
                "pages/sony-productpage-tvs.html",
                "product2.html",
            ]
        );
    }

    #[test]
    fn test_patchable_pages_excludes_search_results() {
        let dir = tempfile::tempdir().unwrap();
        seed_site(dir.path());

        let pages = patchable_pages(dir.path()).unwrap();
        let names = names(&pages, dir.path());
        assert!(!names.iter().any(|n| n.contains("search-results")));
        assert!(!names.iter().any(|n| n.ends_with(".HTML")));
        assert!(names.contains(&"about.html".to_string()));
        assert_eq!(names.len(), 5);
    }

    #[test]
    fn test_walk_order_is_stable() {
        let dir = tempfile::tempdir().unwrap();
        seed_site(dir.path());

        let first = listing_pages(dir.path()).unwrap();
        let second = listing_pages(dir.path()).unwrap();
        assert_eq!(first, second);
    }
}
