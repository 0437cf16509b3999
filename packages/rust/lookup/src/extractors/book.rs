//! Extractor for `book.<name>.php` pages.

use scraper::Html;

use super::{ExtractionResult, Extractor, MissingHeading, first_h1};

/// Extension overview pages; the title is all they offer.
pub struct BookExtractor;

impl Extractor for BookExtractor {
    fn extract(&self, doc: &Html) -> Result<ExtractionResult, MissingHeading> {
        let title = first_h1(doc)?;
        let description = format!("{title} book");

        Ok(ExtractionResult {
            symbol: title,
            description,
        })
    }

    fn name(&self) -> &'static str {
        "book"
    }
}
