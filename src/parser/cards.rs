use std::sync::LazyLock;

use scraper::{ElementRef, Html, Selector};

static CARD: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("div.product-card").unwrap());
static IMAGE: LazyLock<Selector> = LazyLock::new(|| Selector::parse("img").unwrap());
static TITLE: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse(".product-title").unwrap());
static DESC: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse(".product-desc").unwrap());
static PRICE: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse(".product-price").unwrap());
static CART_BUTTON: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("button.add-to-cart-btn").unwrap());

/// One accepted product card with all five required parts in hand. Each part
/// is the first matching descendant of the card element.
pub struct Card<'a> {
    pub image: ElementRef<'a>,
    pub title: ElementRef<'a>,
    pub description: ElementRef<'a>,
    pub price: ElementRef<'a>,
    pub cart_button: ElementRef<'a>,
}

/// Locate every accepted card in document order. Candidates missing any of
/// the five required descendants are skipped; brand pages carry decorative
/// `product-card` divs that are not products.
pub fn locate(doc: &Html) -> Vec<Card<'_>> {
    doc.select(&CARD).filter_map(accept).collect()
}

fn accept(card: ElementRef<'_>) -> Option<Card<'_>> {
    Some(Card {
        image: card.select(&IMAGE).next()?,
        title: card.select(&TITLE).next()?,
        description: card.select(&DESC).next()?,
        price: card.select(&PRICE).next()?,
        cart_button: card.select(&CART_BUTTON).next()?,
    })
}
