use std::path::Path;
use std::sync::LazyLock;

use anyhow::{bail, Result};
use regex::Regex;
use scraper::ElementRef;

use super::cards::Card;
use crate::catalog::ProductRecord;

static PRICE_RUN: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\d+\.?\d*").unwrap());

/// Build the catalog record for one accepted card.
///
/// The cart button's `data-product-*` attributes win whenever present, even
/// when empty; the visible markup is the fallback. `brand` and `link` are
/// per-page constants supplied by the caller.
pub fn reconcile(card: &Card<'_>, brand: &str, link: &str, page: &Path) -> Result<ProductRecord> {
    let button = card.cart_button.value();

    let title = text_of(card.title);
    let img_src = card.image.value().attr("src").unwrap_or_default().to_string();
    let display_price = parse_display_price(&text_of(card.price));

    let id = button.attr("data-product-id").unwrap_or_default().to_string();
    let name = match button.attr("data-product-name") {
        Some(name) => name.to_string(),
        None => title,
    };
    let image = match button.attr("data-product-image") {
        Some(src) => src.to_string(),
        None => img_src,
    };
    let price = match button.attr("data-product-price") {
        Some(raw) => parse_cart_price(raw, &id, page)?,
        None => display_price,
    };

    Ok(ProductRecord {
        id,
        name,
        description: text_of(card.description),
        image,
        price,
        brand: brand.to_string(),
        link: link.to_string(),
    })
}

/// Visible text of an element, whitespace-trimmed.
fn text_of(el: ElementRef<'_>) -> String {
    el.text().collect::<String>().trim().to_string()
}

/// Price from display text: strip thousands separators, then take the first
/// run of digits with an optional decimal part. `$1,299.99` -> 1299.99,
/// `Contact us` -> 0.0.
pub fn parse_display_price(text: &str) -> f64 {
    let cleaned = text.replace(',', "");
    PRICE_RUN
        .find(&cleaned)
        .and_then(|m| m.as_str().parse::<f64>().ok())
        .filter(|price| price.is_finite())
        .unwrap_or(0.0)
}

/// The cart button's price attribute is authoritative and must parse as a
/// finite, non-negative number. Anything else is broken page data and fails
/// the whole run.
fn parse_cart_price(raw: &str, id: &str, page: &Path) -> Result<f64> {
    match raw.trim().parse::<f64>() {
        Ok(price) if price.is_finite() && price >= 0.0 => Ok(price),
        _ => bail!(
            "Malformed data-product-price {:?} on product {:?} in {}",
            raw,
            id,
            page.display()
        ),
    }
}
