//! Search-listing parsing for lookups that did not land on a single page.

use std::sync::LazyLock;

use scraper::{Html, Selector};

use docbot_shared::{DocbotError, Result};

static RESULTS: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("#quickref_functions").expect("valid selector"));
static ITEM: LazyLock<Selector> = LazyLock::new(|| Selector::parse("li").expect("valid selector"));
static LINK: LazyLock<Selector> = LazyLock::new(|| Selector::parse("a").expect("valid selector"));

/// Link target of the first entry in the quick-reference results list.
///
/// The href is returned as written in the page; the caller resolves it.
pub fn first_result_href(html: &str) -> Result<String> {
    let doc = Html::parse_document(html);

    let container = doc
        .select(&RESULTS)
        .next()
        .ok_or_else(|| DocbotError::NoSearchResults("results container missing".into()))?;
    let item = container
        .select(&ITEM)
        .next()
        .ok_or_else(|| DocbotError::NoSearchResults("results list is empty".into()))?;
    let href = item
        .select(&LINK)
        .next()
        .and_then(|a| a.value().attr("href"))
        .filter(|href| !href.trim().is_empty())
        .ok_or_else(|| DocbotError::NoSearchResults("first result has no link".into()))?;

    Ok(href.trim().to_string())
}
