use std::path::{Path, PathBuf};
use std::sync::LazyLock;

use anyhow::{Context, Result};
use regex::{Captures, Regex};
use tracing::warn;

// ── Patterns and templates ───────────────────────────────────────────────────

/// A page carrying both markers already has the search widget wired up.
const SEARCH_WIDGET_MARKER: &str = "navbar-search";
const SEARCH_SCRIPT_MARKER: &str = "search.js";

/// The commented navbar shape most pages share: nav comment, plain `<li>`
/// links, then the cart comment. Group 1 is the link list, group 2 the cart
/// comment; the search entry goes between them.
static NAVBAR_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?s)(<!-- Main navigation menu -->\s*<ul class="navbar">[^<]*<li>[^<]*<a[^>]*>.*?</a>\s*</li>(?:\s*<li>.*?</li>)*?)\s*(<!-- Cart icon moved OUTSIDE the main navbar list -->)"#).unwrap()
});

/// Looser match for pages whose navbar lost the comments along the way.
static NAVBAR_FALLBACK_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"(?s)<ul class="navbar">.*?</ul>"#).unwrap());

const SEARCH_LI: &str = r#"        <!-- Search bar in navbar -->
        <li class="navbar-search">
          <div class="search-form">
            <input type="text" id="navbar-search-input" class="form-control" placeholder="Search products...">
            <div id="navbar-autocomplete-suggestions" class="autocomplete-suggestions" style="display: none;"></div>
          </div>
        </li>"#;

/// Canonical navbar for the fallback path, search entry and cart icon
/// included.
const NAVBAR_TEMPLATE: &str = r#"<ul class="navbar">
        <li>
          <a href="BRANDS.HTML">Brands</a>
        </li>
        <li><a href="product2.html">Product</a></li>
        <li><a href="compare.html">Compare</a></li>
        <li><a href="Contact.html">Contact</a></li>
        <!-- Search bar in navbar -->
        <li class="navbar-search">
          <div class="search-form">
            <input type="text" id="navbar-search-input" class="form-control" placeholder="Search products...">
            <div id="navbar-autocomplete-suggestions" class="autocomplete-suggestions" style="display: none;"></div>
          </div>
        </li>
        <!-- Cart icon moved OUTSIDE the main navbar list -->
        <div class="cart-icon-container">
          <div class="cart-link">
            <i class="fa-solid fa-cart-shopping"></i>
            <span class="cart-count">0</span>
          </div>
        </div>
      </ul>"#;

const SEARCH_CSS: &str = "
    /* Search styles */
    .navbar-search {
      padding: 0 1rem;
    }
    
    .search-form {
      position: relative;
    }
    
    .autocomplete-suggestions {
      position: absolute;
      background: white;
      border: 1px solid #ced4da;
      border-top: none;
      max-height: 200px;
      overflow-y: auto;
      z-index: 1000;
      width: 100%;
      max-width: 300px;
      top: 100%;
      left: 0;
    }
    
    .autocomplete-suggestion {
      padding: 0.5rem;
      cursor: pointer;
      border-bottom: 1px solid #f0f0f0;
    }
    
    .autocomplete-suggestion:hover {
      background-color: #f8f9fa;
    }
";

const APP_SCRIPT_TAG: &str = r#"<script src="js/app.js" defer></script>"#;
const SEARCH_SCRIPT_TAG: &str = r#"<script src="js/search.js" defer></script>"#;

// ── Per-page rewrite ─────────────────────────────────────────────────────────

/// Why a page was left untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Skip {
    AlreadyPatched,
    NoNavbar,
    NoStyleAnchor,
    NoScriptAnchor,
}

impl Skip {
    pub fn message(self) -> &'static str {
        match self {
            Skip::AlreadyPatched => "Already updated",
            Skip::NoNavbar => "Could not update navbar",
            Skip::NoStyleAnchor => "Could not add CSS styles",
            Skip::NoScriptAnchor => "Could not add search.js script",
        }
    }
}

/// What happened to one page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Updated,
    Skipped(Skip),
}

/// Rewrite one page's markup to carry the search widget, or say why it stays
/// as-is. All three insertions must land before anything is returned, so a
/// page is never half-patched.
pub fn rewrite(content: &str) -> Result<String, Skip> {
    if content.contains(SEARCH_WIDGET_MARKER) && content.contains(SEARCH_SCRIPT_MARKER) {
        return Err(Skip::AlreadyPatched);
    }

    let with_navbar = if NAVBAR_RE.is_match(content) {
        NAVBAR_RE
            .replace_all(content, |caps: &Captures| {
                format!("{}\n{}\n        {}", &caps[1], SEARCH_LI, &caps[2])
            })
            .into_owned()
    } else if NAVBAR_FALLBACK_RE.is_match(content) {
        NAVBAR_FALLBACK_RE
            .replace_all(content, NAVBAR_TEMPLATE)
            .into_owned()
    } else {
        return Err(Skip::NoNavbar);
    };

    if !with_navbar.contains("</style>") {
        return Err(Skip::NoStyleAnchor);
    }
    let with_css = with_navbar.replace("</style>", &format!("{}</style>", SEARCH_CSS));

    if !with_css.contains("js/app.js") {
        return Err(Skip::NoScriptAnchor);
    }
    let patched = with_css.replace(
        APP_SCRIPT_TAG,
        &format!("{}\n  {}", APP_SCRIPT_TAG, SEARCH_SCRIPT_TAG),
    );

    Ok(patched)
}

/// Patch one file in place. The file is only rewritten when the full widget
/// lands.
pub fn patch_file(path: &Path) -> Result<Outcome> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    match rewrite(&content) {
        Ok(patched) => {
            std::fs::write(path, patched)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            Ok(Outcome::Updated)
        }
        Err(skip) => Ok(Outcome::Skipped(skip)),
    }
}

// ── Batch run ────────────────────────────────────────────────────────────────

/// Tally of one patch run.
#[derive(Debug, Default)]
pub struct PatchStats {
    pub updated: usize,
    pub skipped: usize,
    pub failed: usize,
}

/// Patch every page, one at a time. A page that cannot be read or written is
/// reported and the run moves on.
pub fn patch_pages(pages: &[PathBuf]) -> PatchStats {
    let mut stats = PatchStats::default();
    for page in pages {
        println!("Processing {}...", page.display());
        let name = page
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| page.display().to_string());
        match patch_file(page) {
            Ok(Outcome::Updated) => {
                println!("  - {}: Updated successfully", name);
                stats.updated += 1;
            }
            Ok(Outcome::Skipped(skip)) => {
                println!("  - {}: {}", name, skip.message());
                stats.skipped += 1;
            }
            Err(err) => {
                warn!("Failed to patch {}: {:#}", page.display(), err);
                stats.failed += 1;
            }
        }
    }
    stats
}

// ── Tests ────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn read_fixture(name: &str) -> String {
        std::fs::read_to_string(format!("tests/fixtures/{name}")).unwrap()
    }

    #[test]
    fn test_commented_navbar_gains_search_entry_before_cart() {
        let patched = rewrite(&read_fixture("lg-productpage-appliances.html")).unwrap();

        let li = patched.find(r#"<li class="navbar-search">"#).unwrap();
        let cart = patched
            .find("<!-- Cart icon moved OUTSIDE the main navbar list -->")
            .unwrap();
        assert!(li < cart);

        let app = patched.find(APP_SCRIPT_TAG).unwrap();
        let search = patched.find(SEARCH_SCRIPT_TAG).unwrap();
        assert!(app < search);

        assert!(patched.contains("/* Search styles */"));
        let css = patched.find(".autocomplete-suggestions {").unwrap();
        let style_close = patched.find("</style>").unwrap();
        assert!(css < style_close);
    }

    #[test]
    fn test_uncommented_navbar_is_replaced_wholesale() {
        let patched = rewrite(&read_fixture("contact-fallback.html")).unwrap();
        assert!(patched.contains(r#"<li><a href="compare.html">Compare</a></li>"#));
        assert!(patched.contains(r#"<li class="navbar-search">"#));
        assert!(patched.contains(r#"<div class="cart-icon-container">"#));
        // The old link list is gone with the old ul.
        assert!(!patched.contains(r#"<li><a href="HOME.html">Home</a></li>"#));
    }

    #[test]
    fn test_patched_page_is_detected_as_done() {
        let patched = rewrite(&read_fixture("lg-productpage-appliances.html")).unwrap();
        assert_eq!(rewrite(&patched), Err(Skip::AlreadyPatched));
    }

    #[test]
    fn test_page_without_navbar_is_skipped() {
        let content = "<html><head><style>body {}</style>\
                       <script src=\"js/app.js\" defer></script></head><body></body></html>";
        assert_eq!(rewrite(content), Err(Skip::NoNavbar));
    }

    #[test]
    fn test_page_without_script_anchor_is_skipped() {
        let content = r#"<html><head><style>body {}</style></head>
            <body><ul class="navbar"><li><a href="HOME.html">Home</a></li></ul></body></html>"#;
        assert_eq!(rewrite(content), Err(Skip::NoScriptAnchor));
    }

    #[test]
    fn test_css_lands_in_every_style_block() {
        let content = r#"<html><head>
            <style>body {}</style>
            <style>h1 {}</style>
            <script src="js/app.js" defer></script></head>
            <body><ul class="navbar"><li><a href="HOME.html">Home</a></li></ul></body></html>"#;
        let patched = rewrite(content).unwrap();
        assert_eq!(patched.matches("/* Search styles */").count(), 2);
    }

    #[test]
    fn test_missing_style_anchor_leaves_file_untouched() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("no-style.html");
        std::fs::write(&path, read_fixture("no-style.html")).unwrap();

        let outcome = patch_file(&path).unwrap();
        assert_eq!(outcome, Outcome::Skipped(Skip::NoStyleAnchor));
        assert_eq!(
            std::fs::read_to_string(&path).unwrap(),
            read_fixture("no-style.html")
        );
    }

    #[test]
    fn test_batch_run_is_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("lg-productpage-appliances.html");
        std::fs::write(&path, read_fixture("lg-productpage-appliances.html")).unwrap();
        let pages = vec![path.clone()];

        let first = patch_pages(&pages);
        assert_eq!((first.updated, first.skipped, first.failed), (1, 0, 0));
        let after_first = std::fs::read_to_string(&path).unwrap();

        let second = patch_pages(&pages);
        assert_eq!((second.updated, second.skipped, second.failed), (0, 1, 0));
        assert_eq!(std::fs::read_to_string(&path).unwrap(), after_first);
    }

    #[test]
    fn test_unreadable_page_counts_as_failed() {
        let dir = tempfile::tempdir().unwrap();
        let stats = patch_pages(&[dir.path().join("missing.html")]);
        assert_eq!((stats.updated, stats.skipped, stats.failed), (0, 0, 1));
    }
}
