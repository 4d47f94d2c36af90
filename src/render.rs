//! Server-side HTML for the analysis form and its results.
//!
//! Rendering is a pure function of a [`ViewState`]. Every piece of text that
//! originates from the analyzed page, the model or the visitor goes through
//! [`escape_html`] before it is placed in markup.

use crate::models::{AnalysisResult, AnalysisSummary, Performance, Suggestions};
use std::fmt::Write;

/// Score colour band
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScoreBand {
    Good,
    Fair,
    Poor,
}

impl ScoreBand {
    pub fn from_score(score: u8) -> Self {
        if score >= 80 {
            ScoreBand::Good
        } else if score >= 60 {
            ScoreBand::Fair
        } else {
            ScoreBand::Poor
        }
    }

    pub fn color(&self) -> &'static str {
        match self {
            ScoreBand::Good => "#28a745",
            ScoreBand::Fair => "#ffc107",
            ScoreBand::Poor => "#dc3545",
        }
    }
}

/// Badge shown next to a metric
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MetricStatus {
    Good,
    Warning,
    Bad,
}

impl MetricStatus {
    pub fn css_class(&self) -> &'static str {
        match self {
            MetricStatus::Good => "status-good",
            MetricStatus::Warning => "status-warning",
            MetricStatus::Bad => "status-bad",
        }
    }

    pub fn from_optimal(is_optimal: bool) -> Self {
        if is_optimal {
            MetricStatus::Good
        } else {
            MetricStatus::Warning
        }
    }

    pub fn from_alt_percentage(percentage: u8) -> Self {
        if percentage >= 90 {
            MetricStatus::Good
        } else if percentage >= 70 {
            MetricStatus::Warning
        } else {
            MetricStatus::Bad
        }
    }
}

/// The four mutually exclusive things the page can show below the form
#[derive(Debug, Clone, Copy)]
pub enum ViewState<'a> {
    Idle,
    Loading,
    Results(&'a AnalysisResult),
    Error(&'a str),
}

pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

/// Renders a complete HTML document. `url` pre-fills the form input.
pub fn render_page(state: &ViewState<'_>, url: Option<&str>) -> String {
    let mut html = String::new();
    html.push_str("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n");
    html.push_str("<meta charset=\"utf-8\">\n");
    html.push_str("<meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n");
    html.push_str("<title>SEO Checker</title>\n");
    html.push_str(STYLES);
    html.push_str("</head>\n<body>\n<main class=\"container\">\n");
    html.push_str("<h1>SEO Checker</h1>\n");
    html.push_str(&render_form(url));

    // The loading panel is always present so the submit handler can reveal it
    let loading = matches!(state, ViewState::Loading);
    let _ = write!(
        html,
        "<section id=\"loadingSection\"{}>{}</section>\n",
        if loading { "" } else { " class=\"hidden\"" },
        render_state(&ViewState::Loading)
    );
    let _ = write!(
        html,
        "<section id=\"stateSection\">{}</section>\n",
        if loading {
            String::new()
        } else {
            render_state(state)
        }
    );

    html.push_str(SUBMIT_SCRIPT);
    html.push_str("</main>\n</body>\n</html>\n");
    html
}

/// Renders only the part of the page that depends on the state.
pub fn render_state(state: &ViewState<'_>) -> String {
    match state {
        ViewState::Idle => {
            "<p class=\"hint\">Enter a website URL to get started.</p>".to_string()
        }
        ViewState::Loading => {
            "<div class=\"loading\"><div class=\"spinner\"></div><p>Analyzing website, this can take a few seconds...</p></div>".to_string()
        }
        ViewState::Results(result) => render_results(result),
        ViewState::Error(message) => format!(
            "<div class=\"error\" id=\"errorSection\"><h2>Analysis failed</h2><p id=\"errorMessage\">{}</p><a class=\"button\" href=\"/\">Try again</a></div>",
            escape_html(message)
        ),
    }
}

pub fn render_results(result: &AnalysisResult) -> String {
    let mut html = String::new();
    let _ = write!(
        html,
        "<div id=\"resultsSection\"><p class=\"analyzed-url\">Results for <strong>{}</strong></p>",
        escape_html(&result.url)
    );
    html.push_str(&render_score(&result.ai_suggestions));
    html.push_str(&render_metrics(&result.analysis));
    html.push_str(&render_improvements(&result.ai_suggestions.improvements));
    html.push_str(&render_blog_ideas(&result.ai_suggestions.blog_ideas));
    html.push_str(&render_performance(&result.performance));
    html.push_str("</div>");
    html
}

pub fn render_score(suggestions: &Suggestions) -> String {
    let band = ScoreBand::from_score(suggestions.seo_score);
    let explanation = if suggestions.score_explanation.trim().is_empty() {
        "SEO analysis completed."
    } else {
        suggestions.score_explanation.as_str()
    };

    format!(
        "<div class=\"card score\"><h2>SEO Score</h2><div class=\"score-number\" id=\"seoScore\" style=\"color: {}\">{}</div><p id=\"scoreExplanation\">{}</p></div>",
        band.color(),
        suggestions.seo_score,
        escape_html(explanation)
    )
}

pub fn render_metrics(analysis: &AnalysisSummary) -> String {
    let mut html = String::from("<div class=\"card\" id=\"structuredAnalysis\"><h2>Page Analysis</h2>");

    html.push_str(&metric_item(
        "Word Count",
        &format!("{} words", analysis.word_count),
        None,
    ));
    html.push_str(&metric_item(
        "Title Tag",
        &or_not_found(&analysis.title.content),
        Some((
            MetricStatus::from_optimal(analysis.title.is_optimal),
            format!("{} chars", analysis.title.length),
        )),
    ));
    html.push_str(&metric_item(
        "Meta Description",
        &or_not_found(&analysis.meta_description.content),
        Some((
            MetricStatus::from_optimal(analysis.meta_description.is_optimal),
            format!("{} chars", analysis.meta_description.length),
        )),
    ));
    html.push_str(&metric_item(
        "Images",
        &format!(
            "{} total, {} missing alt",
            analysis.images.total, analysis.images.missing_alt
        ),
        Some((
            MetricStatus::from_alt_percentage(analysis.images.alt_percentage),
            format!("{}% with alt", analysis.images.alt_percentage),
        )),
    ));

    let single_h1 = analysis.headings.h1_count == 1;
    html.push_str(&metric_item(
        "Headings",
        &format!(
            "{} total, {} H1 tags",
            analysis.headings.total_count, analysis.headings.h1_count
        ),
        Some((
            MetricStatus::from_optimal(single_h1),
            if single_h1 { "Optimal" } else { "Needs attention" }.to_string(),
        )),
    ));
    html.push_str(&metric_item(
        "Links",
        &format!(
            "{} total ({} internal, {} external)",
            analysis.links.total, analysis.links.internal, analysis.links.external
        ),
        None,
    ));

    html.push_str("</div>");
    html
}

pub fn render_improvements(improvements: &[String]) -> String {
    render_list(
        "aiSuggestions",
        "Improvement Checklist",
        "suggestions-list",
        improvements,
        "No specific suggestions available.",
    )
}

pub fn render_blog_ideas(ideas: &[String]) -> String {
    render_list(
        "blogIdeas",
        "Blog Post Ideas",
        "blog-ideas-list",
        ideas,
        "No blog post ideas available.",
    )
}

pub fn render_performance(performance: &Performance) -> String {
    format!(
        "<div class=\"card\" id=\"performanceStats\"><h2>Performance</h2>\
<div class=\"performance-stat\"><span class=\"performance-stat-value\">{}ms</span><span class=\"performance-stat-label\">Page Load Time</span></div>\
<div class=\"performance-stat\"><span class=\"performance-stat-value\">{}ms</span><span class=\"performance-stat-label\">Analysis Time</span></div></div>",
        performance.loading_time, performance.analysis_time
    )
}

fn render_list(id: &str, heading: &str, class: &str, items: &[String], empty: &str) -> String {
    let mut html = format!("<div class=\"card\" id=\"{id}\"><h2>{heading}</h2>");
    if items.is_empty() {
        let _ = write!(html, "<p>{empty}</p>");
    } else {
        let _ = write!(html, "<ul class=\"{class}\">");
        for item in items {
            let _ = write!(html, "<li>{}</li>", escape_html(item));
        }
        html.push_str("</ul>");
    }
    html.push_str("</div>");
    html
}

fn metric_item(label: &str, value: &str, badge: Option<(MetricStatus, String)>) -> String {
    let badge = badge
        .map(|(status, text)| {
            format!(
                " <span class=\"metric-status {}\">{}</span>",
                status.css_class(),
                escape_html(&text)
            )
        })
        .unwrap_or_default();

    format!(
        "<div class=\"metric-item\"><div class=\"metric-label\">{}</div><div class=\"metric-value\">{}{}</div></div>",
        label,
        escape_html(value),
        badge
    )
}

fn or_not_found(content: &str) -> String {
    if content.is_empty() {
        "Not found".to_string()
    } else {
        content.to_string()
    }
}

fn render_form(url: Option<&str>) -> String {
    format!(
        "<form id=\"analyzeForm\" method=\"post\" action=\"/\">\
<input id=\"urlInput\" type=\"url\" name=\"url\" required placeholder=\"https://example.com\" value=\"{}\">\
<button type=\"submit\">Analyze</button></form>\n",
        escape_html(url.unwrap_or_default())
    )
}

const STYLES: &str = r#"<style>
body { font-family: system-ui, sans-serif; background: #f5f7fa; color: #222; margin: 0; }
.container { max-width: 860px; margin: 0 auto; padding: 2rem 1rem; }
form { display: flex; gap: .5rem; margin-bottom: 1.5rem; }
input[type=url] { flex: 1; padding: .6rem; font-size: 1rem; }
button, .button { padding: .6rem 1.2rem; background: #4a6cf7; color: #fff; border: 0; border-radius: 4px; text-decoration: none; }
.card { background: #fff; border-radius: 8px; padding: 1rem 1.5rem; margin-bottom: 1rem; box-shadow: 0 1px 3px rgba(0,0,0,.1); }
.score-number { font-size: 3rem; font-weight: bold; }
.metric-item { display: flex; justify-content: space-between; padding: .4rem 0; border-bottom: 1px solid #eee; }
.metric-status { font-size: .8rem; padding: .1rem .5rem; border-radius: 10px; margin-left: .5rem; }
.status-good { background: #d4edda; color: #155724; }
.status-warning { background: #fff3cd; color: #856404; }
.status-bad { background: #f8d7da; color: #721c24; }
.performance-stat { display: inline-block; margin-right: 2rem; }
.performance-stat-value { display: block; font-size: 1.5rem; font-weight: bold; }
.error { background: #f8d7da; border-radius: 8px; padding: 1rem 1.5rem; }
.hidden { display: none; }
.spinner { width: 32px; height: 32px; border: 4px solid #ddd; border-top-color: #4a6cf7; border-radius: 50%; animation: spin 1s linear infinite; }
@keyframes spin { to { transform: rotate(360deg); } }
</style>
"#;

const SUBMIT_SCRIPT: &str = r#"<script>
document.getElementById('analyzeForm').addEventListener('submit', function () {
  document.getElementById('stateSection').classList.add('hidden');
  document.getElementById('loadingSection').classList.remove('hidden');
});
</script>
"#;
