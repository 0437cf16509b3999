//! Remote manual access: URL construction and the HTTP fetch seam.

use std::future::Future;
use std::time::Duration;

use reqwest::Client;
use reqwest::header::LOCATION;
use tracing::{debug, instrument};
use url::Url;

use docbot_shared::{DocbotError, LookupConfig, Result};

/// HTTP status the manual returns for a page that does not exist.
pub const NOT_FOUND: u16 = 404;

// ---------------------------------------------------------------------------
// LookupResponse
// ---------------------------------------------------------------------------

/// Outcome of a single GET, after redirects have been followed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LookupResponse {
    /// URL of the last response in the redirect chain.
    pub final_url: Url,
    /// Whether at least one redirect was followed.
    pub redirected: bool,
    /// HTTP status of the final response.
    pub status: u16,
    /// Response body as text.
    pub body: String,
}

// ---------------------------------------------------------------------------
// Fetcher
// ---------------------------------------------------------------------------

/// Performs GET requests for the resolver.
///
/// Implementations follow redirects transparently and report whether any
/// happened, since that is how a direct manual hit is told apart from a
/// search listing.
pub trait Fetcher: Send + Sync {
    /// Fetch `url`, following redirects.
    fn fetch(&self, url: &Url) -> impl Future<Output = Result<LookupResponse>> + Send;
}

/// [`Fetcher`] backed by a `reqwest` client.
///
/// Redirects are followed here rather than by the client so every hop is
/// counted; a chain that lands back on the requested URL still reports
/// `redirected`.
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: Client,
    max_redirects: usize,
}

impl HttpFetcher {
    /// Build a client with the configured timeout, redirect limit and User-Agent.
    pub fn new(config: &LookupConfig) -> Result<Self> {
        let client = Client::builder()
            .user_agent(config.user_agent.as_str())
            .redirect(reqwest::redirect::Policy::none())
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| DocbotError::Network(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            client,
            max_redirects: config.max_redirects,
        })
    }
}

impl Fetcher for HttpFetcher {
    #[instrument(skip_all, fields(url = %url))]
    async fn fetch(&self, url: &Url) -> Result<LookupResponse> {
        let mut current = url.clone();
        let mut hops = 0usize;

        let response = loop {
            let response = self
                .client
                .get(current.as_str())
                .send()
                .await
                .map_err(|e| DocbotError::Network(format!("{current}: {e}")))?;

            let location = if response.status().is_redirection() {
                response
                    .headers()
                    .get(LOCATION)
                    .map(|value| value.to_str().map(str::to_owned))
            } else {
                None
            };
            let Some(location) = location else {
                break response;
            };

            if hops >= self.max_redirects {
                return Err(DocbotError::Network(format!(
                    "{url}: more than {} redirects",
                    self.max_redirects
                )));
            }

            let location = location
                .map_err(|e| DocbotError::Network(format!("{current}: bad Location header: {e}")))?;
            let next = current
                .join(&location)
                .map_err(|e| DocbotError::Network(format!("{current}: bad redirect target: {e}")))?;

            debug!(from = %current, to = %next, "following redirect");
            current = next;
            hops += 1;
        };

        let status = response.status().as_u16();
        let body = response
            .text()
            .await
            .map_err(|e| DocbotError::Network(format!("{current}: body read failed: {e}")))?;

        debug!(final_url = %current, hops, status, body_len = body.len(), "fetched");

        Ok(LookupResponse {
            final_url: current,
            redirected: hops > 0,
            status,
            body,
        })
    }
}

// ---------------------------------------------------------------------------
// URL construction
// ---------------------------------------------------------------------------

/// Builds the URLs the resolver requests.
#[derive(Debug, Clone)]
pub struct ManualUrls {
    site_root: Url,
    base_url: String,
    manual_base: String,
}

impl ManualUrls {
    /// Derive URLs from a validated lookup config.
    pub fn new(config: &LookupConfig) -> Result<Self> {
        config.validate()?;
        let site_root = Url::parse(&config.base_url)
            .map_err(|e| DocbotError::config(format!("invalid base_url: {e}")))?;

        Ok(Self {
            site_root,
            base_url: config.base_url.clone(),
            manual_base: config.manual_base(),
        })
    }

    /// Quick-reference lookup URL for `pattern`.
    pub fn lookup(&self, pattern: &str) -> Result<Url> {
        parse_url(&format!(
            "{}/manual-lookup.php?scope=quickref&pattern={}",
            self.base_url,
            encode_pattern(pattern)
        ))
    }

    /// Manual page of the class named `pattern`.
    pub fn class_page(&self, pattern: &str) -> Result<Url> {
        parse_url(&format!(
            "{}/class.{}.php",
            self.manual_base,
            encode_pattern(pattern)
        ))
    }

    /// Resolve a link found in a search listing against the site root.
    pub fn resolve_href(&self, href: &str) -> Result<Url> {
        self.site_root
            .join(href)
            .map_err(|e| DocbotError::parse(format!("bad result link '{href}': {e}")))
    }
}

/// Turn `Class::method` into the manual's `class.method` form and percent-encode it.
pub fn encode_pattern(pattern: &str) -> String {
    urlencoding::encode(&pattern.replace("::", ".")).into_owned()
}

fn parse_url(raw: &str) -> Result<Url> {
    Url::parse(raw).map_err(|e| DocbotError::validation(format!("invalid URL '{raw}': {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn urls() -> ManualUrls {
        ManualUrls::new(&LookupConfig::default()).unwrap()
    }

    #[test]
    fn encodes_scope_operator_and_spaces() {
        assert_eq!(encode_pattern("DateTime::format"), "DateTime.format");
        assert_eq!(encode_pattern("type declaration"), "type%20declaration");
        assert_eq!(encode_pattern("a&b"), "a%26b");
    }

    #[test]
    fn builds_lookup_and_class_urls() {
        let urls = urls();
        assert_eq!(
            urls.lookup("strlen").unwrap().as_str(),
            "http://php.net/manual-lookup.php?scope=quickref&pattern=strlen"
        );
        assert_eq!(
            urls.class_page("datetime").unwrap().as_str(),
            "http://php.net/manual/en/class.datetime.php"
        );
    }

    #[test]
    fn resolves_result_links_against_site_root() {
        let urls = urls();
        assert_eq!(
            urls.resolve_href("/manual/en/function.str-replace.php").unwrap().as_str(),
            "http://php.net/manual/en/function.str-replace.php"
        );
        assert_eq!(
            urls.resolve_href("https://secure.php.net/x.php").unwrap().as_str(),
            "https://secure.php.net/x.php"
        );
    }

    #[tokio::test]
    async fn http_fetcher_reports_redirects() {
        let server = wiremock::MockServer::start().await;

        wiremock::Mock::given(wiremock::matchers::path("/manual-lookup.php"))
            .respond_with(
                wiremock::ResponseTemplate::new(302)
                    .insert_header("Location", "/manual/en/function.strlen.php"),
            )
            .mount(&server)
            .await;

        wiremock::Mock::given(wiremock::matchers::path("/manual/en/function.strlen.php"))
            .respond_with(wiremock::ResponseTemplate::new(200).set_body_string("<h1>strlen</h1>"))
            .mount(&server)
            .await;

        let fetcher = HttpFetcher::new(&LookupConfig::default()).unwrap();
        let url = Url::parse(&format!(
            "{}/manual-lookup.php?scope=quickref&pattern=strlen",
            server.uri()
        ))
        .unwrap();
        let response = fetcher.fetch(&url).await.unwrap();

        assert!(response.redirected);
        assert_eq!(response.status, 200);
        assert!(response.final_url.path().ends_with("/function.strlen.php"));
        assert_eq!(response.body, "<h1>strlen</h1>");
    }

    #[tokio::test]
    async fn http_fetcher_without_redirect() {
        let server = wiremock::MockServer::start().await;

        wiremock::Mock::given(wiremock::matchers::path("/missing.php"))
            .respond_with(wiremock::ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let fetcher = HttpFetcher::new(&LookupConfig::default()).unwrap();
        let url = Url::parse(&format!("{}/missing.php", server.uri())).unwrap();
        let response = fetcher.fetch(&url).await.unwrap();

        assert!(!response.redirected);
        assert_eq!(response.status, NOT_FOUND);
    }

    #[tokio::test]
    async fn redirect_back_to_requested_url_still_counts() {
        let server = wiremock::MockServer::start().await;

        wiremock::Mock::given(wiremock::matchers::path("/manual/en/intro.php"))
            .respond_with(
                wiremock::ResponseTemplate::new(302).insert_header("Location", "/set-cookie.php"),
            )
            .up_to_n_times(1)
            .with_priority(1)
            .mount(&server)
            .await;

        wiremock::Mock::given(wiremock::matchers::path("/set-cookie.php"))
            .respond_with(
                wiremock::ResponseTemplate::new(301).insert_header("Location", "/manual/en/intro.php"),
            )
            .mount(&server)
            .await;

        wiremock::Mock::given(wiremock::matchers::path("/manual/en/intro.php"))
            .respond_with(wiremock::ResponseTemplate::new(200).set_body_string("<h1>Intro</h1>"))
            .mount(&server)
            .await;

        let fetcher = HttpFetcher::new(&LookupConfig::default()).unwrap();
        let url = Url::parse(&format!("{}/manual/en/intro.php", server.uri())).unwrap();
        let response = fetcher.fetch(&url).await.unwrap();

        assert!(response.redirected);
        assert_eq!(response.final_url, url);
        assert_eq!(response.body, "<h1>Intro</h1>");
    }

    #[tokio::test]
    async fn redirect_limit_is_enforced() {
        let server = wiremock::MockServer::start().await;

        wiremock::Mock::given(wiremock::matchers::path("/loop.php"))
            .respond_with(wiremock::ResponseTemplate::new(302).insert_header("Location", "/loop.php"))
            .expect(3)
            .mount(&server)
            .await;

        let config = LookupConfig {
            max_redirects: 2,
            ..LookupConfig::default()
        };
        let fetcher = HttpFetcher::new(&config).unwrap();
        let url = Url::parse(&format!("{}/loop.php", server.uri())).unwrap();
        let err = fetcher.fetch(&url).await.unwrap_err();

        assert!(err.to_string().contains("more than 2 redirects"));
    }

    #[tokio::test]
    async fn stalled_response_times_out() {
        let server = wiremock::MockServer::start().await;

        wiremock::Mock::given(wiremock::matchers::path("/slow.php"))
            .respond_with(
                wiremock::ResponseTemplate::new(200).set_delay(std::time::Duration::from_secs(5)),
            )
            .mount(&server)
            .await;

        let config = LookupConfig {
            timeout_secs: 1,
            ..LookupConfig::default()
        };
        let fetcher = HttpFetcher::new(&config).unwrap();
        let url = Url::parse(&format!("{}/slow.php", server.uri())).unwrap();
        let err = fetcher.fetch(&url).await.unwrap_err();

        assert!(matches!(err, DocbotError::Network(_)));
    }
}
