//! Paged report fetcher
//!
//! One `fetch` call authenticates once, reads page 1 to learn how many
//! rows exist, then requests the remaining pages with the same session
//! token and concatenates every page's rows in page order.

use super::types::{FetchOptions, ReportTable, ScriptPage, ScriptRequest};
use crate::auth::{Authenticator, SessionProvider, SessionToken};
use crate::config::Settings;
use crate::error::{Error, Result};
use crate::http::{HttpClient, RequestConfig};
use crate::pagination::PagePlan;
use crate::scripts::ScriptParameter;
use futures::stream::{self, StreamExt, TryStreamExt};
use reqwest::Method;
use tracing::debug;

/// Emit at info when the caller asked for verbose output, debug otherwise
macro_rules! progress {
    ($verbose:expr, $($arg:tt)+) => {
        if $verbose {
            tracing::info!($($arg)+)
        } else {
            tracing::debug!($($arg)+)
        }
    };
}

/// Runs paged scripts against the script endpoint
#[derive(Debug, Clone)]
pub struct ReportFetcher<S = Authenticator> {
    /// Shared HTTP client
    http_client: HttpClient,
    /// Source of the per-call session token
    session: S,
    /// Script endpoint URL
    script_url: String,
    /// Page requests allowed in flight after page 1
    concurrency: usize,
    /// Page size used by the predefined reports
    default_page_size: u32,
}

impl ReportFetcher<Authenticator> {
    /// Build a fetcher that authenticates with the settings' credentials
    pub fn from_settings(settings: &Settings) -> Result<Self> {
        settings.validate()?;
        let http_client = HttpClient::with_config(settings.http_config())?;
        let session = Authenticator::from_settings(settings, http_client.clone());

        Ok(Self {
            http_client,
            session,
            script_url: settings.script_url.clone(),
            concurrency: settings.concurrency,
            default_page_size: settings.page_size,
        })
    }
}

impl<S: SessionProvider> ReportFetcher<S> {
    /// Build a fetcher from parts
    pub fn new(http_client: HttpClient, session: S, script_url: impl Into<String>) -> Self {
        Self {
            http_client,
            session,
            script_url: script_url.into(),
            concurrency: 1,
            default_page_size: crate::types::DEFAULT_PAGE_SIZE,
        }
    }

    /// Allow up to `concurrency` page requests in flight after page 1
    ///
    /// Values below one are treated as one.
    #[must_use]
    pub fn with_concurrency(mut self, concurrency: usize) -> Self {
        self.concurrency = concurrency.max(1);
        self
    }

    /// Session provider
    pub fn session(&self) -> &S {
        &self.session
    }

    /// Mutable session provider, e.g. to update credentials between calls
    pub fn session_mut(&mut self) -> &mut S {
        &mut self.session
    }

    /// Script endpoint URL
    pub fn script_url(&self) -> &str {
        &self.script_url
    }

    /// Options the predefined reports use unless told otherwise
    pub fn default_options(&self) -> FetchOptions {
        FetchOptions::new().page_size(self.default_page_size)
    }

    /// Run a script and collect every page into one table
    ///
    /// Fails as a whole if any page fails; no partial table is returned.
    /// The row count is the sum of rows actually received, which may
    /// differ from the `TotalResults` the server declared.
    pub async fn fetch(
        &self,
        script_id: &str,
        parameters: Vec<ScriptParameter>,
        options: &FetchOptions,
    ) -> Result<ReportTable> {
        if options.page_size == 0 {
            return Err(Error::invalid_value("page_size", "must be at least 1"));
        }

        let token = self.session.session_token().await?;
        let request = ScriptRequest::new(script_id, parameters, options.page_size);

        let first = self.fetch_page(&token, &request).await?;
        let plan = PagePlan::new(first.total_results, options.page_size)
            .map_err(|e| Error::report_fetch(1, e))?;

        progress!(options.verbose, script_id, "Total results: {}", plan.total_results());
        progress!(options.verbose, script_id, "Total pages: {}", plan.total_pages());
        progress!(
            options.verbose,
            script_id,
            "Query: {}",
            serde_json::to_string(&request).unwrap_or_default()
        );

        let mut table = ReportTable::new(plan.total_results());
        table.push_page(first.results);

        // Pages complete in any order; the first error drops the rest
        let token = &token;
        let request = &request;
        let mut pages: Vec<(u32, ScriptPage)> = stream::iter(plan.remaining_pages())
            .map(move |page| async move {
                let fetched = self.fetch_page(token, &request.for_page(page)).await?;
                Ok::<_, Error>((page, fetched))
            })
            .buffer_unordered(self.concurrency)
            .try_collect()
            .await?;
        pages.sort_unstable_by_key(|(page, _)| *page);

        for (_, page) in pages {
            table.push_page(page.results);
        }

        if table.len() as u64 != plan.total_results() {
            debug!(
                script_id,
                declared = plan.total_results(),
                received = table.len(),
                "Row count differs from TotalResults"
            );
        }

        progress!(options.verbose, script_id, "Rows: {}", table.len());

        Ok(table)
    }

    /// Request one page, tagging any failure with its page number
    async fn fetch_page(&self, token: &SessionToken, request: &ScriptRequest) -> Result<ScriptPage> {
        let page = request.page_number;
        debug!(script_id = %request.script_id, page, "Requesting page");

        let body = serde_json::to_value(request).map_err(|e| Error::report_fetch(page, e.into()))?;
        let config = RequestConfig::new()
            .header("Authorization", token.as_str())
            .json(body);

        self.http_client
            .request_json(Method::POST, &self.script_url, config)
            .await
            .map_err(|e| Error::report_fetch(page, e))
    }
}
