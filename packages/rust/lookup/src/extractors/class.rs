//! Extractor for `class.<name>.php` pages.

use std::sync::LazyLock;

use regex::Regex;
use scraper::Html;

use super::{ExtractionResult, Extractor, MissingHeading, first_h1, first_para};

/// Class synopsis pages, titled "The Foo class".
pub struct ClassExtractor;

impl Extractor for ClassExtractor {
    fn extract(&self, doc: &Html) -> Result<ExtractionResult, MissingHeading> {
        static THE_X_CLASS_RE: LazyLock<Regex> = LazyLock::new(|| {
            Regex::new(r"(?i)^\s*the\s+(\S+)\s+class\s*$").expect("valid regex")
        });

        let title = first_h1(doc)?;
        let symbol = THE_X_CLASS_RE
            .captures(&title)
            .and_then(|caps| caps.get(1))
            .map_or_else(|| title.clone(), |m| m.as_str().to_string());
        let description = first_para(doc).unwrap_or_else(|| title.clone());

        Ok(ExtractionResult {
            symbol,
            description,
        })
    }

    fn name(&self) -> &'static str {
        "class"
    }
}
