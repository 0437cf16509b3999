//! Fallback extractor for pages with no recognised URL shape.
//!
//! Covers things like `control-structures.foreach.php`, where the useful
//! title is the first `<h2>`.

use scraper::Html;

use super::{ExtractionResult, Extractor, MissingHeading, first_h2, first_para};

/// Any other manual page.
pub struct GenericExtractor;

impl Extractor for GenericExtractor {
    fn extract(&self, doc: &Html) -> Result<ExtractionResult, MissingHeading> {
        let symbol = first_h2(doc)?;
        let description = first_para(doc).unwrap_or_else(|| symbol.clone());

        Ok(ExtractionResult {
            symbol,
            description,
        })
    }

    fn name(&self) -> &'static str {
        "generic"
    }
}
