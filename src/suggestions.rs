use crate::extractor::{META_DESCRIPTION_RANGE, TITLE_RANGE};
use crate::llm::ChatClient;
use crate::models::{PageMetrics, SuggestionSource, Suggestions};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::Deserialize;
use serde_json::Value;

pub const MAX_IMPROVEMENTS: usize = 5;
pub const MAX_BLOG_IDEAS: usize = 2;

const SYSTEM_PROMPT: &str = "You are an SEO expert. Provide detailed, actionable SEO improvement suggestions based on website analysis data.";

const DEFAULT_SCORE: u8 = 75;
const DEFAULT_EXPLANATION: &str = "Based on standard SEO best practices analysis.";
const FALLBACK_EXPLANATION: &str =
    "Based on fundamental SEO best practices and common issues found.";

const RULE_PENALTY: u8 = 10;
const MIN_FALLBACK_SCORE: u8 = 50;

const DEFAULT_IMPROVEMENTS: [&str; 5] = [
    "Optimize title tag length to 30-60 characters for better search visibility",
    "Create compelling meta description (120-160 characters) to improve click-through rates",
    "Add descriptive alt attributes to all images for accessibility and SEO benefits",
    "Structure content with proper heading hierarchy (H1, H2, H3)",
    "Include relevant internal and external links to provide additional value",
];

const DEFAULT_BLOG_IDEAS: [&str; 2] = [
    "10 Essential SEO Best Practices for 2024: A Comprehensive Guide",
    "How to Optimize Your Website Content for Better Search Engine Rankings",
];

// Greedy: spans from the first '{' to the last '}'
static JSON_OBJECT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?s)\{.*\}").expect("JSON object pattern should be valid"));
static FIRST_NUMBER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\d+").expect("number pattern should be valid"));
static NUMBERED_ITEM: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\d+\.\s*").expect("numbered item pattern should be valid"));
static BULLET_ITEM: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[-*]\s*").expect("bullet item pattern should be valid"));

/// Produces suggestions for a page, asking the chat-completion API when one is
/// configured and falling back to local rules otherwise.
pub struct SuggestionGenerator {
    client: Option<ChatClient>,
}

impl SuggestionGenerator {
    pub fn new(client: Option<ChatClient>) -> Self {
        Self { client }
    }

    /// A generator that never leaves the process
    pub fn disabled() -> Self {
        Self { client: None }
    }

    pub fn is_ai_enabled(&self) -> bool {
        self.client.is_some()
    }

    /// Never fails: any API or parse problem yields the rule-based fallback.
    pub async fn generate(&self, metrics: &PageMetrics) -> Suggestions {
        let Some(client) = &self.client else {
            tracing::debug!("No chat client configured, using rule-based suggestions");
            return fallback_suggestions(metrics);
        };

        let prompt = build_prompt(metrics);
        match client.complete(SYSTEM_PROMPT, &prompt).await {
            Ok(answer) => {
                let suggestions = parse_ai_response(&answer);
                tracing::info!(
                    model = %client.model_name(),
                    source = ?suggestions.source,
                    score = suggestions.seo_score,
                    "AI suggestions generated"
                );
                suggestions
            }
            Err(e) => {
                tracing::warn!(error = %e, "AI service error, using rule-based suggestions");
                fallback_suggestions(metrics)
            }
        }
    }
}

pub fn build_prompt(metrics: &PageMetrics) -> String {
    format!(
        r#"Based on this SEO analysis data, provide comprehensive SEO improvement suggestions:

Website Analysis:
- URL: {url}
- Word Count: {words}
- Title: "{title}" (Length: {title_len} characters)
- Meta Description: "{desc}" (Length: {desc_len} characters)
- Images: {images} total, {missing_alt} missing alt attributes
- Headings: {headings} total headings, {h1} H1 tags
- Links: {links} total links ({internal} internal, {external} external)

Please provide:
1. An overall SEO score (0-100) with explanation
2. A prioritized checklist of 3-5 specific improvement suggestions
3. Two creative blog post ideas based on the page's content

Format your response as JSON with these keys:
{{
  "seoScore": number,
  "scoreExplanation": string,
  "improvements": [string],
  "blogIdeas": [string]
}}"#,
        url = metrics.url,
        words = metrics.word_count,
        title = metrics.title.content,
        title_len = metrics.title.length,
        desc = metrics.meta_description.content,
        desc_len = metrics.meta_description.length,
        images = metrics.images.total,
        missing_alt = metrics.images.missing_alt,
        headings = metrics.headings.total_count,
        h1 = metrics.headings.h1_count,
        links = metrics.links.total,
        internal = metrics.links.internal,
        external = metrics.links.external,
    )
}

/// Lenient view of the JSON object the model is asked to return. Fields are
/// kept as raw values so one oddly typed field does not discard the rest.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawSuggestions {
    seo_score: Option<Value>,
    score_explanation: Option<Value>,
    improvements: Option<Value>,
    blog_ideas: Option<Value>,
}

impl RawSuggestions {
    fn is_empty(&self) -> bool {
        self.seo_score.is_none()
            && self.score_explanation.is_none()
            && self.improvements.is_none()
            && self.blog_ideas.is_none()
    }

    fn into_suggestions(self) -> Suggestions {
        let seo_score = self
            .seo_score
            .as_ref()
            .and_then(score_from_value)
            .map_or(DEFAULT_SCORE, |score| score.round().clamp(0.0, 100.0) as u8);
        let score_explanation = self
            .score_explanation
            .as_ref()
            .and_then(Value::as_str)
            .map(str::trim)
            .filter(|text| !text.is_empty())
            .unwrap_or(DEFAULT_EXPLANATION)
            .to_string();

        Suggestions {
            seo_score,
            score_explanation,
            improvements: bounded_or_default(
                strings_from_value(self.improvements),
                MAX_IMPROVEMENTS,
                &DEFAULT_IMPROVEMENTS,
            ),
            blog_ideas: bounded_or_default(
                strings_from_value(self.blog_ideas),
                MAX_BLOG_IDEAS,
                &DEFAULT_BLOG_IDEAS,
            ),
            source: SuggestionSource::Ai,
        }
    }
}

/// Accepts `78`, `78.4` and `"78"`
fn score_from_value(value: &Value) -> Option<f64> {
    let score = match value {
        Value::Number(number) => number.as_f64(),
        Value::String(text) => text.trim().parse::<f64>().ok(),
        _ => None,
    };
    score.filter(|score| score.is_finite())
}

/// String and number entries of a JSON array; anything else is skipped.
fn strings_from_value(value: Option<Value>) -> Vec<String> {
    let Some(Value::Array(items)) = value else {
        return Vec::new();
    };

    items
        .into_iter()
        .filter_map(|item| match item {
            Value::String(text) => Some(text),
            Value::Number(number) => Some(number.to_string()),
            _ => None,
        })
        .collect()
}

/// Reads a model answer: the embedded JSON object when there is a usable one,
/// line heuristics otherwise.
pub fn parse_ai_response(response: &str) -> Suggestions {
    if let Some(found) = JSON_OBJECT.find(response) {
        match serde_json::from_str::<RawSuggestions>(found.as_str()) {
            Ok(raw) if !raw.is_empty() => return raw.into_suggestions(),
            Ok(_) => tracing::debug!("JSON in AI response has no suggestion keys"),
            Err(e) => tracing::debug!(error = %e, "Failed to parse JSON in AI response"),
        }
    }

    parse_structured_response(response)
}

/// Scrapes a free-text answer line by line.
pub fn parse_structured_response(response: &str) -> Suggestions {
    let mut seo_score = DEFAULT_SCORE;
    let mut improvements = Vec::new();
    let mut blog_ideas = Vec::new();

    for line in response.lines().map(str::trim).filter(|l| !l.is_empty()) {
        if (line.contains("SEO Score") || line.contains("Overall Score"))
            && let Some(score) = FIRST_NUMBER
                .find(line)
                .and_then(|m| m.as_str().parse::<u32>().ok())
        {
            seo_score = score.min(100) as u8;
        }

        if NUMBERED_ITEM.is_match(line) || BULLET_ITEM.is_match(line) {
            let item = NUMBERED_ITEM.replace(line, "");
            let item = BULLET_ITEM.replace(&item, "").trim().to_string();
            if !item.is_empty() && improvements.len() < MAX_IMPROVEMENTS {
                improvements.push(item);
            }
        }

        let lower = line.to_lowercase();
        if lower.contains("blog") || lower.contains("post") {
            let idea = BULLET_ITEM.replace(line, "").trim().to_string();
            if !idea.is_empty() && blog_ideas.len() < MAX_BLOG_IDEAS {
                blog_ideas.push(idea);
            }
        }
    }

    Suggestions {
        seo_score,
        score_explanation: DEFAULT_EXPLANATION.to_string(),
        improvements: bounded_or_default(improvements, MAX_IMPROVEMENTS, &DEFAULT_IMPROVEMENTS),
        blog_ideas: bounded_or_default(blog_ideas, MAX_BLOG_IDEAS, &DEFAULT_BLOG_IDEAS),
        source: SuggestionSource::Heuristic,
    }
}

/// Rule-based suggestions computed from the metrics alone.
pub fn fallback_suggestions(metrics: &PageMetrics) -> Suggestions {
    let mut improvements = Vec::new();

    if metrics.title.length < *TITLE_RANGE.start() {
        improvements.push("Title tag is too short. Aim for 30-60 characters for optimal display in search results.".to_string());
    }
    if metrics.title.length > *TITLE_RANGE.end() {
        improvements.push("Title tag is too long. Consider shortening to 30-60 characters for better visibility.".to_string());
    }
    if metrics.meta_description.length < *META_DESCRIPTION_RANGE.start() {
        improvements.push("Meta description is too short. Expand to 120-160 characters for better search result snippets.".to_string());
    }
    if metrics.meta_description.length > *META_DESCRIPTION_RANGE.end() {
        improvements.push(
            "Meta description is too long. Shorten to 120-160 characters to avoid truncation."
                .to_string(),
        );
    }
    if metrics.images.missing_alt > 0 {
        improvements.push(format!(
            "{} images are missing alt attributes. Add descriptive alt text for better accessibility and SEO.",
            metrics.images.missing_alt
        ));
    }
    if metrics.headings.h1_count == 0 {
        improvements.push(
            "No H1 heading found. Add a clear H1 heading that includes your main keyword."
                .to_string(),
        );
    }
    if metrics.headings.h1_count > 1 {
        improvements.push(
            "Multiple H1 headings detected. Use only one H1 per page for better SEO structure."
                .to_string(),
        );
    }

    let penalty = improvements.len().saturating_mul(RULE_PENALTY as usize);
    let seo_score = 100usize.saturating_sub(penalty).max(MIN_FALLBACK_SCORE as usize) as u8;
    improvements.truncate(MAX_IMPROVEMENTS);

    Suggestions {
        seo_score,
        score_explanation: FALLBACK_EXPLANATION.to_string(),
        improvements,
        blog_ideas: default_blog_ideas(),
        source: SuggestionSource::Fallback,
    }
}

pub fn default_improvements() -> Vec<String> {
    DEFAULT_IMPROVEMENTS.iter().map(|s| s.to_string()).collect()
}

pub fn default_blog_ideas() -> Vec<String> {
    DEFAULT_BLOG_IDEAS.iter().map(|s| s.to_string()).collect()
}

fn bounded_or_default(items: Vec<String>, max: usize, defaults: &[&str]) -> Vec<String> {
    let items: Vec<String> = items
        .into_iter()
        .map(|item| item.trim().to_string())
        .filter(|item| !item.is_empty())
        .take(max)
        .collect();

    if items.is_empty() {
        defaults.iter().map(|s| s.to_string()).collect()
    } else {
        items
    }
}
