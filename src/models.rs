use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::time::Duration;

/// SEO signals scanned from a single HTML document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageMetrics {
    pub url: String,
    pub word_count: usize,
    pub title: TextMetric,
    pub meta_description: TextMetric,
    pub images: ImageStats,
    pub headings: HeadingStats,
    pub links: LinkStats,
    /// Milliseconds spent fetching and parsing the page
    pub loading_time: u64,
    pub timestamp: String,
}

/// A text element whose length is checked against a recommended range
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TextMetric {
    pub content: String,
    pub length: usize,
    pub is_optimal: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageStats {
    pub total: usize,
    pub missing_alt: usize,
    pub with_alt: usize,
    pub alt_percentage: u8,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HeadingStats {
    /// Heading texts keyed by level ("h1" through "h6")
    pub structure: BTreeMap<String, Vec<String>>,
    pub h1_count: usize,
    pub total_count: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LinkStats {
    pub total: usize,
    pub internal: usize,
    pub external: usize,
    pub internal_links: Vec<LinkRef>,
    pub external_links: Vec<LinkRef>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinkRef {
    pub href: String,
    pub text: String,
}

/// How a set of suggestions was produced
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SuggestionSource {
    /// Parsed from a JSON answer of the chat-completion API
    Ai,
    /// Scraped line by line from a free-text answer of the API
    Heuristic,
    /// Computed locally from the page metrics
    Fallback,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Suggestions {
    pub seo_score: u8,
    pub score_explanation: String,
    pub improvements: Vec<String>,
    pub blog_ideas: Vec<String>,
    pub source: SuggestionSource,
}

/// The metric subset returned under `analysis` in an API response
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisSummary {
    pub word_count: usize,
    pub title: TextMetric,
    pub meta_description: TextMetric,
    pub images: ImageStats,
    pub headings: HeadingStats,
    pub links: LinkStats,
}

impl From<&PageMetrics> for AnalysisSummary {
    fn from(metrics: &PageMetrics) -> Self {
        Self {
            word_count: metrics.word_count,
            title: metrics.title.clone(),
            meta_description: metrics.meta_description.clone(),
            images: metrics.images.clone(),
            headings: metrics.headings.clone(),
            links: metrics.links.clone(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Performance {
    pub loading_time: u64,
    pub analysis_time: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisResult {
    pub success: bool,
    pub url: String,
    pub timestamp: String,
    pub analysis: AnalysisSummary,
    pub ai_suggestions: Suggestions,
    pub performance: Performance,
}

impl AnalysisResult {
    /// Combines page metrics with their suggestions. `analysis_time` is the time
    /// spent after the page was scanned.
    pub fn new(metrics: &PageMetrics, suggestions: Suggestions, analysis_time: Duration) -> Self {
        Self {
            success: true,
            url: metrics.url.clone(),
            timestamp: metrics.timestamp.clone(),
            analysis: AnalysisSummary::from(metrics),
            ai_suggestions: suggestions,
            performance: Performance {
                loading_time: metrics.loading_time,
                analysis_time: analysis_time.as_millis() as u64,
            },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub success: bool,
    pub error: String,
    pub message: String,
    pub timestamp: String,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            success: false,
            error: error.into(),
            message: message.into(),
            timestamp: now_timestamp(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthStatus {
    pub status: String,
    pub timestamp: String,
    pub version: String,
}

impl HealthStatus {
    pub fn healthy() -> Self {
        Self {
            status: "healthy".to_string(),
            timestamp: now_timestamp(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }
}

/// Current UTC time as an ISO-8601 string with millisecond precision
pub fn now_timestamp() -> String {
    chrono::Utc::now().to_rfc3339_opts(chrono::SecondsFormat::Millis, true)
}
