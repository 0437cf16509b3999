//! Page classification and per-shape content extractors.
//!
//! The manual's final URL tells us what kind of page we landed on
//! (`function.strlen.php`, `class.datetime.php`, `book.array.php`, or
//! anything else). Each shape has its own extractor that pulls a symbol and a
//! one-line description out of the parsed HTML.

mod book;
mod class;
mod function;
mod generic;

use std::sync::LazyLock;

use regex::Regex;
use scraper::{Html, Selector};
use url::Url;

use crate::normalize::normalize_text;

pub use book::BookExtractor;
pub use class::ClassExtractor;
pub use function::FunctionExtractor;
pub use generic::GenericExtractor;

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// Structural category of a manual page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PageShape {
    Function,
    Class,
    Book,
    Generic,
}

impl PageShape {
    /// Classify a page by its final URL path.
    pub fn classify(url: &Url) -> Self {
        static SHAPE_RE: LazyLock<Regex> = LazyLock::new(|| {
            Regex::new(r"/(book|class|function)\.[^.]+\.php$").expect("valid regex")
        });

        let kind = SHAPE_RE
            .captures(url.path())
            .and_then(|caps| caps.get(1))
            .map(|m| m.as_str());

        match kind {
            Some("function") => Self::Function,
            Some("class") => Self::Class,
            Some("book") => Self::Book,
            _ => Self::Generic,
        }
    }

    /// The extractor responsible for this shape.
    pub fn extractor(self) -> &'static dyn Extractor {
        match self {
            Self::Function => &FunctionExtractor,
            Self::Class => &ClassExtractor,
            Self::Book => &BookExtractor,
            Self::Generic => &GenericExtractor,
        }
    }
}

/// Symbol and description lifted from a manual page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractionResult {
    pub symbol: String,
    pub description: String,
}

/// The page lacks the heading its extractor keys on.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("no {0} elements in HTML")]
pub struct MissingHeading(pub &'static str);

// ---------------------------------------------------------------------------
// Trait
// ---------------------------------------------------------------------------

/// Pulls a symbol and description out of one shape of manual page.
pub trait Extractor: Send + Sync {
    /// Extract from the parsed page, or report the missing heading.
    fn extract(&self, doc: &Html) -> Result<ExtractionResult, MissingHeading>;

    /// Extractor name for tracing.
    fn name(&self) -> &'static str;
}

// ---------------------------------------------------------------------------
// Shared DOM helpers
// ---------------------------------------------------------------------------

/// Normalized text of the first element matching `selector`.
fn first_text(doc: &Html, selector: &Selector) -> Option<String> {
    doc.select(selector)
        .next()
        .map(|el| normalize_text(&el.text().collect::<String>()))
}

/// Normalized text of the first `<h1>`.
fn first_h1(doc: &Html) -> Result<String, MissingHeading> {
    static H1: LazyLock<Selector> = LazyLock::new(|| Selector::parse("h1").expect("valid selector"));
    first_text(doc, &H1).ok_or(MissingHeading("h1"))
}

/// Normalized text of the first `<h2>`.
fn first_h2(doc: &Html) -> Result<String, MissingHeading> {
    static H2: LazyLock<Selector> = LazyLock::new(|| Selector::parse("h2").expect("valid selector"));
    first_text(doc, &H2).ok_or(MissingHeading("h2"))
}

/// Normalized text of the first element whose class list contains `para`.
fn first_para(doc: &Html) -> Option<String> {
    static PARA: LazyLock<Selector> =
        LazyLock::new(|| Selector::parse(".para").expect("valid selector"));
    first_text(doc, &PARA)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn classify(raw: &str) -> PageShape {
        PageShape::classify(&Url::parse(raw).unwrap())
    }

    #[test]
    fn classifies_by_final_url() {
        assert_eq!(classify("http://php.net/manual/en/function.strlen.php"), PageShape::Function);
        assert_eq!(classify("http://php.net/manual/en/class.datetime.php"), PageShape::Class);
        assert_eq!(classify("http://php.net/manual/en/book.array.php"), PageShape::Book);
        assert_eq!(
            classify("http://php.net/manual/en/control-structures.foreach.php"),
            PageShape::Generic
        );
    }

    #[test]
    fn dotted_names_are_generic() {
        // Method pages look like `datetime.format.php`, not `class.x.php`.
        assert_eq!(classify("http://php.net/manual/en/datetime.format.php"), PageShape::Generic);
        assert_eq!(classify("http://php.net/manual/en/class.a.b.php"), PageShape::Generic);
    }

    #[test]
    fn dispatch_table_covers_every_shape() {
        assert_eq!(PageShape::Function.extractor().name(), "function");
        assert_eq!(PageShape::Class.extractor().name(), "class");
        assert_eq!(PageShape::Book.extractor().name(), "book");
        assert_eq!(PageShape::Generic.extractor().name(), "generic");
    }

    #[test]
    fn first_para_matches_class_list_membership() {
        let doc = Html::parse_document(
            r#"<html><body><p class="simpara">no</p><p class="para  lead">
                 yes   please</p></body></html>"#,
        );
        assert_eq!(first_para(&doc).as_deref(), Some("yes please"));
    }

    #[test]
    fn missing_heading_message() {
        assert_eq!(MissingHeading("h1").to_string(), "no h1 elements in HTML");
    }
}
