//! Rendering of the single chat message a lookup produces.

use url::Url;

use crate::extractors::ExtractionResult;

/// Prefix of every generic failure message.
pub const FAILURE_PREFIX: &str = "Something went badly wrong with that lookup... ";

/// Summary line for a successfully extracted manual page.
pub fn summary(result: &ExtractionResult, url: &Url) -> String {
    format!("[ `{}` ]({url}) {}", result.symbol, result.description)
}

/// Apology for a page whose structure the extractors do not understand.
pub fn unrecognized_format(url: &Url) -> String {
    format!("That [manual page]({url}) seems to be in a format I don't understand")
}

/// Generic failure carrying a short description of the fault.
pub fn failure(fault: impl std::fmt::Display) -> String {
    format!("{FAILURE_PREFIX}{fault}")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn url() -> Url {
        Url::parse("http://php.net/manual/en/function.strlen.php").unwrap()
    }

    #[test]
    fn renders_summary() {
        let result = ExtractionResult {
            symbol: "strlen()".into(),
            description: "Get string length".into(),
        };
        assert_eq!(
            summary(&result, &url()),
            "[ `strlen()` ](http://php.net/manual/en/function.strlen.php) Get string length"
        );
    }

    #[test]
    fn renders_apology_and_failure() {
        assert_eq!(
            unrecognized_format(&url()),
            "That [manual page](http://php.net/manual/en/function.strlen.php) seems to be in a format I don't understand"
        );
        assert_eq!(
            failure("network error: timed out"),
            "Something went badly wrong with that lookup... network error: timed out"
        );
    }
}
