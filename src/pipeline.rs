use crate::config::Settings;
use crate::llm::ChatClient;
use crate::models::AnalysisResult;
use crate::seo_analyzer::SeoAnalyzer;
use crate::suggestions::SuggestionGenerator;
use anyhow::Result;
use std::time::Instant;

/// fetch → extract → suggest, one request at a time
pub struct AnalysisPipeline {
    analyzer: SeoAnalyzer,
    suggestions: SuggestionGenerator,
}

impl AnalysisPipeline {
    pub fn new(analyzer: SeoAnalyzer, suggestions: SuggestionGenerator) -> Self {
        Self {
            analyzer,
            suggestions,
        }
    }

    pub fn from_settings(settings: &Settings) -> Result<Self> {
        let analyzer = SeoAnalyzer::new(settings.fetch_timeout_secs)?;

        let client = match &settings.llm {
            Some(llm) => Some(ChatClient::new(
                llm.base_url.clone(),
                llm.api_key.clone(),
                llm.model.clone(),
                settings.ai_timeout_secs,
            )?),
            None => {
                tracing::info!("No API key configured, suggestions will be rule-based");
                None
            }
        };

        Ok(Self::new(analyzer, SuggestionGenerator::new(client)))
    }

    pub fn is_ai_enabled(&self) -> bool {
        self.suggestions.is_ai_enabled()
    }

    pub async fn run(&self, url: &str) -> Result<AnalysisResult> {
        tracing::info!(url = %url, "Analyzing URL");

        let metrics = self.analyzer.analyze_url(url).await?;
        tracing::info!(url = %url, loading_time_ms = metrics.loading_time, "SEO analysis completed");

        let started = Instant::now();
        let suggestions = self.suggestions.generate(&metrics).await;

        Ok(AnalysisResult::new(&metrics, suggestions, started.elapsed()))
    }
}
