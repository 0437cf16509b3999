//! Term resolution: alias table, shortcut, remote lookup, extraction.
//!
//! A query runs through the cheap strategies first and only touches the
//! network when the static table and the shortcut both miss. At most two
//! sequential fetches happen per query: the lookup itself, plus either the
//! book→class check or the first search result. Every path ends in exactly one
//! message; faults become a failure message instead of an error.

use std::sync::Arc;

use scraper::Html;
use tracing::{debug, info, instrument, warn};

use docbot_shared::{DocbotError, LookupConfig, Result};

use crate::aliases::{AliasTable, candidates};
use crate::extractors::PageShape;
use crate::fetch::{Fetcher, HttpFetcher, LookupResponse, ManualUrls, NOT_FOUND};
use crate::message;
use crate::search;
use crate::shortcut::deprecated_api_advisory;

/// Resolves normalized queries into chat messages.
pub struct DocsResolver<F> {
    fetcher: F,
    aliases: Arc<AliasTable>,
    urls: ManualUrls,
}

impl DocsResolver<HttpFetcher> {
    /// Resolver over HTTP with the built-in alias table.
    pub fn from_config(config: &LookupConfig) -> Result<Self> {
        Ok(Self::new(HttpFetcher::new(config)?, ManualUrls::new(config)?))
    }
}

impl<F: Fetcher> DocsResolver<F> {
    /// Resolver over `fetcher` with the built-in alias table.
    pub fn new(fetcher: F, urls: ManualUrls) -> Self {
        Self {
            fetcher,
            aliases: AliasTable::builtin(),
            urls,
        }
    }

    /// Replace the alias table.
    pub fn with_aliases(mut self, aliases: Arc<AliasTable>) -> Self {
        self.aliases = aliases;
        self
    }

    /// Resolve `pattern` (lowercased, space-joined) into one message.
    #[instrument(skip(self))]
    pub async fn resolve(&self, pattern: &str) -> String {
        if let Some(answer) = self.aliases.resolve_first(&candidates(pattern)) {
            debug!("answered from alias table");
            return answer;
        }

        if let Some(advisory) = deprecated_api_advisory(pattern) {
            debug!("deprecated api shortcut");
            return advisory.to_string();
        }

        match self.lookup(pattern).await {
            Ok(message) => message,
            Err(e) => {
                warn!(error = %e, "lookup failed");
                message::failure(e)
            }
        }
    }

    async fn lookup(&self, pattern: &str) -> Result<String> {
        let url = self.urls.lookup(pattern)?;
        let response = self.fetcher.fetch(&url).await?;

        if response.redirected {
            debug!(final_url = %response.final_url, "direct match");
            let page = self.prefer_class_page(response, pattern).await?;
            Ok(render_page(&page))
        } else {
            debug!("no direct match, reading search results");
            self.first_search_result(&response).await
        }
    }

    /// Book pages lose to a same-named class page when the manual has one.
    async fn prefer_class_page(
        &self,
        response: LookupResponse,
        pattern: &str,
    ) -> Result<LookupResponse> {
        if PageShape::classify(&response.final_url) != PageShape::Book {
            return Ok(response);
        }

        let class_url = self.urls.class_page(pattern)?;
        let class_response = self.fetcher.fetch(&class_url).await?;

        if class_response.status == NOT_FOUND {
            debug!("no class page, keeping book");
            Ok(response)
        } else {
            debug!(class_url = %class_response.final_url, "using class page over book");
            Ok(class_response)
        }
    }

    async fn first_search_result(&self, listing: &LookupResponse) -> Result<String> {
        let href = search::first_result_href(&listing.body)?;
        let url = self.urls.resolve_href(&href)?;
        debug!(%url, "following first search result");

        let page = self.fetcher.fetch(&url).await?;
        Ok(render_page(&page))
    }
}

/// Classify and extract a fetched manual page into its message.
fn render_page(page: &LookupResponse) -> String {
    let url = &page.final_url;
    let shape = PageShape::classify(url);
    let extractor = shape.extractor();
    let doc = Html::parse_document(&page.body);

    match extractor.extract(&doc) {
        Ok(result) => {
            info!(%url, extractor = extractor.name(), symbol = %result.symbol, "page extracted");
            message::summary(&result, url)
        }
        Err(e) => {
            let err = DocbotError::unrecognized_page(url.as_str(), e.to_string());
            warn!(error = %err, extractor = extractor.name(), "page not understood");
            message::unrecognized_format(url)
        }
    }
}
