//! Extractor for `function.<name>.php` pages.

use std::sync::LazyLock;

use scraper::{Html, Selector};

use super::{ExtractionResult, Extractor, MissingHeading, first_h1, first_text};

/// Function reference pages: `<h1>` name plus the `.dc-title` one-liner.
pub struct FunctionExtractor;

impl Extractor for FunctionExtractor {
    fn extract(&self, doc: &Html) -> Result<ExtractionResult, MissingHeading> {
        static DC_TITLE: LazyLock<Selector> =
            LazyLock::new(|| Selector::parse(".dc-title").expect("valid selector"));

        let symbol = format!("{}()", first_h1(doc)?);
        let description =
            first_text(doc, &DC_TITLE).unwrap_or_else(|| format!("{symbol} function"));

        Ok(ExtractionResult {
            symbol,
            description,
        })
    }

    fn name(&self) -> &'static str {
        "function"
    }
}
