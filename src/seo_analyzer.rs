use crate::extractor::PageExtractor;
use crate::http_client::build_http_client;
use crate::models::PageMetrics;
use anyhow::{Context, Result, anyhow, bail};
use scraper::Html;
use std::time::Instant;
use url::Url;

/// Default page fetch timeout in seconds
pub const DEFAULT_FETCH_TIMEOUT_SECS: u64 = 10;

/// Fetches a single page and scans it for SEO signals
pub struct SeoAnalyzer {
    client: reqwest::Client,
}

impl SeoAnalyzer {
    pub fn new(fetch_timeout_secs: u64) -> Result<Self> {
        Ok(Self {
            client: build_http_client(fetch_timeout_secs)?,
        })
    }

    pub async fn analyze_url(&self, url: &str) -> Result<PageMetrics> {
        self.fetch_and_extract(url)
            .await
            .context("Failed to analyze URL")
    }

    async fn fetch_and_extract(&self, url: &str) -> Result<PageMetrics> {
        let started = Instant::now();
        let page_url = Url::parse(url).map_err(|_| anyhow!("Invalid URL format"))?;

        match page_url.scheme() {
            "http" | "https" => {}
            scheme => bail!(
                "Invalid URL scheme '{}': only http and https are supported",
                scheme
            ),
        }

        let response = self.client.get(page_url.as_str()).send().await?;
        let status = response.status();
        if !status.is_success() {
            bail!("Request failed with status code {}", status.as_u16());
        }

        let content_type = response
            .headers()
            .get("content-type")
            .and_then(|v| v.to_str().ok())
            .map(|s| s.to_lowercase());

        if let Some(ct) = &content_type
            && !ct.contains("text/html")
            && !ct.contains("application/xhtml")
        {
            tracing::warn!(
                url = %url,
                content_type = %ct,
                "Non-HTML content type detected, parsing may be incomplete"
            );
        }

        let html_content = response.text().await?;
        let mut metrics = {
            let document = Html::parse_document(&html_content);
            PageExtractor::extract(url, &document)
        };
        metrics.loading_time = started.elapsed().as_millis() as u64;

        tracing::debug!(
            url = %url,
            loading_time_ms = metrics.loading_time,
            word_count = metrics.word_count,
            "Page scanned"
        );

        Ok(metrics)
    }
}
