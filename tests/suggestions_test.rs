use scraper::Html;
use seocheck::extractor::PageExtractor;
use seocheck::llm::ChatClient;
use seocheck::models::{PageMetrics, SuggestionSource};
use seocheck::suggestions::{
    MAX_BLOG_IDEAS, MAX_IMPROVEMENTS, SuggestionGenerator, build_prompt, default_blog_ideas,
    default_improvements, fallback_suggestions, parse_ai_response, parse_structured_response,
};
use serde_json::json;
use std::time::Duration;
use wiremock::matchers::{body_partial_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn metrics_for(html: &str) -> PageMetrics {
    let document = Html::parse_document(html);
    PageExtractor::extract("https://example.com/", &document)
}

fn optimal_page() -> PageMetrics {
    let html = format!(
        "<head><title>{}</title><meta name=\"description\" content=\"{}\"></head>\
         <body><h1>Main</h1><img src=\"a.png\" alt=\"A\"></body>",
        "t".repeat(45),
        "d".repeat(140)
    );
    metrics_for(&html)
}

fn completion(content: &str) -> serde_json::Value {
    json!({
        "id": "chatcmpl-1",
        "object": "chat.completion",
        "choices": [{
            "index": 0,
            "message": { "role": "assistant", "content": content },
            "finish_reason": "stop"
        }]
    })
}

fn client_for(server: &MockServer, timeout_secs: u64) -> ChatClient {
    ChatClient::new(server.uri(), "test-key", "test-model", timeout_secs)
        .expect("Failed to build chat client")
}

#[test]
fn test_fallback_for_title_only_page() {
    let metrics = metrics_for("<title>A</title>");
    let suggestions = fallback_suggestions(&metrics);

    // title too short, description too short, no H1
    assert_eq!(suggestions.improvements.len(), 3);
    assert!(suggestions.improvements[0].starts_with("Title tag is too short"));
    assert!(suggestions.improvements[1].starts_with("Meta description is too short"));
    assert!(suggestions.improvements[2].starts_with("No H1 heading found"));
    assert_eq!(suggestions.seo_score, 70);
    assert_eq!(suggestions.blog_ideas, default_blog_ideas());
    assert_eq!(suggestions.source, SuggestionSource::Fallback);
}

#[test]
fn test_fallback_for_optimal_page() {
    let suggestions = fallback_suggestions(&optimal_page());

    assert!(suggestions.improvements.is_empty());
    assert_eq!(suggestions.seo_score, 100);
    assert_eq!(suggestions.blog_ideas.len(), 2);
}

#[test]
fn test_fallback_long_texts_missing_alt_and_multiple_h1() {
    let html = format!(
        "<head><title>{}</title><meta name=\"description\" content=\"{}\"></head>\
         <body><h1>One</h1><h1>Two</h1><img src=\"a.png\"><img src=\"b.png\"></body>",
        "t".repeat(70),
        "d".repeat(170)
    );
    let suggestions = fallback_suggestions(&metrics_for(&html));

    assert_eq!(suggestions.improvements.len(), 4);
    assert!(suggestions.improvements[0].starts_with("Title tag is too long"));
    assert!(suggestions.improvements[1].starts_with("Meta description is too long"));
    assert!(
        suggestions.improvements[2]
            .starts_with("2 images are missing alt attributes")
    );
    assert!(suggestions.improvements[3].starts_with("Multiple H1 headings detected"));
    assert_eq!(suggestions.seo_score, 60);
}

#[test]
fn test_fallback_with_every_rule_group_triggered() {
    let mut metrics = metrics_for("<title>A</title><body><img src=\"x.png\"></body>");
    metrics.title.length = 100;
    metrics.headings.h1_count = 3;
    let suggestions = fallback_suggestions(&metrics);

    // title too long, description too short, missing alt, multiple H1
    assert_eq!(suggestions.improvements.len(), 4);
    assert!(suggestions.improvements[2].starts_with("1 images are missing"));
    assert_eq!(suggestions.seo_score, 60);
    assert!(suggestions.improvements.len() <= MAX_IMPROVEMENTS);
}

#[test]
fn test_parse_ai_response_with_json() {
    let answer = r#"Here is my analysis:
```json
{
  "seoScore": 82,
  "scoreExplanation": "Solid basics, thin content.",
  "improvements": ["Add more content", "Add internal links"],
  "blogIdeas": ["Idea one", "Idea two", "Idea three"]
}
```
Good luck!"#;

    let suggestions = parse_ai_response(answer);
    assert_eq!(suggestions.source, SuggestionSource::Ai);
    assert_eq!(suggestions.seo_score, 82);
    assert_eq!(suggestions.score_explanation, "Solid basics, thin content.");
    assert_eq!(
        suggestions.improvements,
        vec!["Add more content", "Add internal links"]
    );
    assert_eq!(suggestions.blog_ideas, vec!["Idea one", "Idea two"]);
}

#[test]
fn test_parse_ai_response_bounds_values() {
    let answer = json!({
        "seoScore": 140.6,
        "scoreExplanation": "  ",
        "improvements": ["a", "b", "", "c", "d", "e", "f", "g"],
        "blogIdeas": []
    })
    .to_string();

    let suggestions = parse_ai_response(&answer);
    assert_eq!(suggestions.seo_score, 100);
    assert_eq!(
        suggestions.score_explanation,
        "Based on standard SEO best practices analysis."
    );
    assert_eq!(suggestions.improvements, vec!["a", "b", "c", "d", "e"]);
    assert_eq!(suggestions.blog_ideas, default_blog_ideas());

    let negative = parse_ai_response(r#"{"seoScore": -5}"#);
    assert_eq!(negative.seo_score, 0);
    assert_eq!(negative.improvements, default_improvements());
}

#[test]
fn test_parse_ai_response_accepts_string_score() {
    let answer = r#"{"seoScore": "78", "scoreExplanation": "Good structure overall.", "improvements": ["Expand the meta description", "Add alt text"], "blogIdeas": ["Idea one", "Idea two"]}"#;

    let suggestions = parse_ai_response(answer);
    assert_eq!(suggestions.source, SuggestionSource::Ai);
    assert_eq!(suggestions.seo_score, 78);
    assert_eq!(suggestions.score_explanation, "Good structure overall.");
    assert_eq!(
        suggestions.improvements,
        vec!["Expand the meta description", "Add alt text"]
    );
    assert_eq!(suggestions.blog_ideas, vec!["Idea one", "Idea two"]);
}

#[test]
fn test_parse_ai_response_keeps_usable_entries_of_mixed_lists() {
    let answer = json!({
        "seoScore": "not a number",
        "scoreExplanation": 42,
        "improvements": [
            { "title": "Fix headings", "priority": "high" },
            "Shorten the title",
            null,
            7,
            ["nested"]
        ],
        "blogIdeas": "One idea as a plain string"
    })
    .to_string();

    let suggestions = parse_ai_response(&answer);
    assert_eq!(suggestions.source, SuggestionSource::Ai);
    assert_eq!(suggestions.seo_score, 75);
    assert_eq!(
        suggestions.score_explanation,
        "Based on standard SEO best practices analysis."
    );
    assert_eq!(suggestions.improvements, vec!["Shorten the title", "7"]);
    assert_eq!(suggestions.blog_ideas, default_blog_ideas());
}

#[test]
fn test_parse_ai_response_without_json_uses_heuristics() {
    let answer = "Overall Score: 64/100\n\
                  1. Lengthen the title\n\
                  2. Write a meta description\n\
                  - Add alt text\n\
                  Blog: Ten ways to speed up your site\n\
                  * Post about image optimization\n";

    let suggestions = parse_ai_response(answer);
    assert_eq!(suggestions.source, SuggestionSource::Heuristic);
    assert_eq!(suggestions.seo_score, 64);
    assert_eq!(
        suggestions.improvements,
        vec![
            "Lengthen the title",
            "Write a meta description",
            "Add alt text",
            "Post about image optimization"
        ]
    );
    assert_eq!(
        suggestions.blog_ideas,
        vec![
            "Blog: Ten ways to speed up your site",
            "Post about image optimization"
        ]
    );
}

#[test]
fn test_parse_ai_response_with_broken_json_uses_heuristics() {
    let suggestions = parse_ai_response("{ \"seoScore\": 90, oops }\nSEO Score: 55");

    assert_eq!(suggestions.source, SuggestionSource::Heuristic);
    assert_eq!(suggestions.seo_score, 55);
}

#[test]
fn test_parse_ai_response_with_unrelated_json_uses_heuristics() {
    let suggestions = parse_ai_response(r#"{"answer": "nothing useful"}"#);
    assert_eq!(suggestions.source, SuggestionSource::Heuristic);
}

#[test]
fn test_parse_structured_response_defaults() {
    let suggestions = parse_structured_response("Nothing structured in here at all.");

    assert_eq!(suggestions.seo_score, 75);
    assert_eq!(suggestions.improvements, default_improvements());
    assert_eq!(suggestions.blog_ideas, default_blog_ideas());
}

#[test]
fn test_parse_structured_response_limits() {
    let answer = (1..=9)
        .map(|i| format!("{}. Blog post improvement {}", i, i))
        .collect::<Vec<_>>()
        .join("\n");

    let suggestions = parse_structured_response(&answer);
    assert_eq!(suggestions.improvements.len(), MAX_IMPROVEMENTS);
    assert_eq!(suggestions.blog_ideas.len(), MAX_BLOG_IDEAS);
    assert_eq!(suggestions.improvements[0], "Blog post improvement 1");
}

#[test]
fn test_build_prompt_embeds_metrics() {
    let metrics = metrics_for(
        "<title>My Page</title><body><h1>Hi</h1><img src=\"a.png\"><a href=\"/x\">x</a></body>",
    );
    let prompt = build_prompt(&metrics);

    assert!(prompt.contains("- URL: https://example.com/"));
    assert!(prompt.contains("- Title: \"My Page\" (Length: 7 characters)"));
    assert!(prompt.contains("- Images: 1 total, 1 missing alt attributes"));
    assert!(prompt.contains("- Headings: 1 total headings, 1 H1 tags"));
    assert!(prompt.contains("- Links: 1 total links (1 internal, 0 external)"));
    assert!(prompt.contains("\"seoScore\": number"));
}

#[tokio::test]
async fn test_generator_without_client_uses_fallback() {
    let generator = SuggestionGenerator::disabled();
    assert!(!generator.is_ai_enabled());

    let suggestions = generator.generate(&metrics_for("<title>A</title>")).await;
    assert_eq!(suggestions.source, SuggestionSource::Fallback);
    assert!(suggestions.improvements.len() <= MAX_IMPROVEMENTS);
    assert!(suggestions.blog_ideas.len() <= MAX_BLOG_IDEAS);
    assert!(
        suggestions
            .improvements
            .iter()
            .any(|i| i.contains("No H1 heading"))
    );
}

#[tokio::test]
async fn test_generator_parses_ai_json_answer() {
    let server = MockServer::start().await;
    let answer = json!({
        "seoScore": 88,
        "scoreExplanation": "Great page.",
        "improvements": ["Add schema markup"],
        "blogIdeas": ["Why schema matters"]
    })
    .to_string();

    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .and(header("authorization", "Bearer test-key"))
        .and(body_partial_json(json!({
            "model": "test-model",
            "max_tokens": 2000
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(completion(&answer)))
        .expect(1)
        .mount(&server)
        .await;

    let generator = SuggestionGenerator::new(Some(client_for(&server, 5)));
    assert!(generator.is_ai_enabled());

    let suggestions = generator.generate(&optimal_page()).await;
    assert_eq!(suggestions.source, SuggestionSource::Ai);
    assert_eq!(suggestions.seo_score, 88);
    assert_eq!(suggestions.improvements, vec!["Add schema markup"]);
    assert_eq!(suggestions.blog_ideas, vec!["Why schema matters"]);
}

#[tokio::test]
async fn test_generator_sends_system_and_user_messages() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(completion("SEO Score: 71")))
        .mount(&server)
        .await;

    let generator = SuggestionGenerator::new(Some(client_for(&server, 5)));
    let suggestions = generator.generate(&optimal_page()).await;
    assert_eq!(suggestions.source, SuggestionSource::Heuristic);
    assert_eq!(suggestions.seo_score, 71);

    let requests = server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 1);
    let body: serde_json::Value = serde_json::from_slice(&requests[0].body).unwrap();
    assert_eq!(body["messages"][0]["role"], "system");
    assert_eq!(body["messages"][1]["role"], "user");
    assert!(
        body["messages"][1]["content"]
            .as_str()
            .unwrap()
            .contains("Website Analysis:")
    );
}

#[tokio::test]
async fn test_generator_falls_back_on_api_error() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(ResponseTemplate::new(401).set_body_string("invalid api key"))
        .mount(&server)
        .await;

    let generator = SuggestionGenerator::new(Some(client_for(&server, 5)));
    let suggestions = generator.generate(&metrics_for("<title>A</title>")).await;

    assert_eq!(suggestions.source, SuggestionSource::Fallback);
    assert_eq!(suggestions.seo_score, 70);
}

#[tokio::test]
async fn test_generator_falls_back_on_empty_choices() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "choices": [] })))
        .mount(&server)
        .await;

    let generator = SuggestionGenerator::new(Some(client_for(&server, 5)));
    let suggestions = generator.generate(&optimal_page()).await;

    assert_eq!(suggestions.source, SuggestionSource::Fallback);
    assert_eq!(suggestions.seo_score, 100);
}

#[tokio::test]
async fn test_generator_falls_back_on_malformed_body() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>gateway</html>"))
        .mount(&server)
        .await;

    let generator = SuggestionGenerator::new(Some(client_for(&server, 5)));
    let suggestions = generator.generate(&optimal_page()).await;

    assert_eq!(suggestions.source, SuggestionSource::Fallback);
}

#[tokio::test]
async fn test_generator_falls_back_on_timeout() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(completion(r#"{"seoScore": 99}"#))
                .set_delay(Duration::from_secs(3)),
        )
        .mount(&server)
        .await;

    let generator = SuggestionGenerator::new(Some(client_for(&server, 1)));
    let suggestions = generator.generate(&optimal_page()).await;

    assert_eq!(suggestions.source, SuggestionSource::Fallback);
    assert_eq!(suggestions.seo_score, 100);
}

#[tokio::test]
async fn test_chat_client_trims_trailing_slash_from_base_url() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(completion("hello")))
        .expect(1)
        .mount(&server)
        .await;

    let client = ChatClient::new(format!("{}/v1/", server.uri()), "k", "m", 5).unwrap();
    let answer = client.complete("system", "prompt").await.unwrap();
    assert_eq!(answer, "hello");
}
