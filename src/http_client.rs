use anyhow::Result;
use reqwest::{Client, ClientBuilder, header};
use std::time::Duration;

/// User agent sent when fetching pages to analyze
const PAGE_USER_AGENT: &str = "Mozilla/5.0 (compatible; SEO-Analyzer/1.0)";
const ACCEPT: &str = "text/html,application/xhtml+xml,*/*;q=0.8";
const ACCEPT_LANGUAGE: &str = "en-US,en;q=0.9";

/// User agent sent to the chat-completion API
const API_USER_AGENT: &str = concat!("seocheck/", env!("CARGO_PKG_VERSION"));

/// Creates a reqwest client for fetching the pages under analysis
pub fn build_http_client(timeout_secs: u64) -> Result<Client> {
    let mut headers = header::HeaderMap::new();
    headers.insert(header::ACCEPT, header::HeaderValue::from_static(ACCEPT));
    headers.insert(
        header::ACCEPT_LANGUAGE,
        header::HeaderValue::from_static(ACCEPT_LANGUAGE),
    );

    let client = ClientBuilder::new()
        .user_agent(PAGE_USER_AGENT)
        .default_headers(headers)
        .timeout(Duration::from_secs(timeout_secs))
        .redirect(reqwest::redirect::Policy::limited(10))
        .gzip(true)
        .brotli(true)
        .deflate(true)
        .build()?;

    Ok(client)
}

/// Creates a reqwest client for JSON APIs
pub fn build_api_client(timeout_secs: u64) -> Result<Client> {
    let client = ClientBuilder::new()
        .user_agent(API_USER_AGENT)
        .timeout(Duration::from_secs(timeout_secs))
        .build()?;

    Ok(client)
}
