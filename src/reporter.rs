use crate::models::AnalysisResult;
use crate::render::{MetricStatus, ScoreBand};
use anyhow::Result;
use colored::*;
use std::fs::File;
use std::io::Write;

pub struct Reporter;

impl Reporter {
    pub fn print_text_report(result: &AnalysisResult) {
        println!("\n{}", "=".repeat(80).bright_blue());
        println!("{}", "SEO Checker - Page Report".bright_cyan().bold());
        println!("{}", "=".repeat(80).bright_blue());
        println!();

        println!("{}: {}", "URL".bright_white().bold(), result.url);
        println!("{}: {}", "Timestamp".bright_white().bold(), result.timestamp);
        println!();

        let suggestions = &result.ai_suggestions;
        println!("{}", "SEO Score".bright_yellow().bold().underline());
        println!(
            "  {} / 100",
            Self::colorize_score(suggestions.seo_score).bold()
        );
        println!("  {}", suggestions.score_explanation.dimmed());
        println!();

        let analysis = &result.analysis;
        println!("{}", "Page Analysis".bright_yellow().bold().underline());
        println!(
            "  Word Count:       {}",
            analysis.word_count.to_string().bright_green()
        );
        println!(
            "  Title:            {} {}",
            Self::or_not_found(&analysis.title.content),
            Self::colorize_status(
                MetricStatus::from_optimal(analysis.title.is_optimal),
                &format!("({} chars)", analysis.title.length)
            )
        );
        println!(
            "  Meta Description: {} {}",
            Self::or_not_found(&analysis.meta_description.content),
            Self::colorize_status(
                MetricStatus::from_optimal(analysis.meta_description.is_optimal),
                &format!("({} chars)", analysis.meta_description.length)
            )
        );
        println!(
            "  Images:           {} total, {} missing alt {}",
            analysis.images.total,
            analysis.images.missing_alt,
            Self::colorize_status(
                MetricStatus::from_alt_percentage(analysis.images.alt_percentage),
                &format!("({}% with alt)", analysis.images.alt_percentage)
            )
        );
        println!(
            "  Headings:         {} total, {} H1 {}",
            analysis.headings.total_count,
            analysis.headings.h1_count,
            if analysis.headings.h1_count == 1 {
                "(Optimal)".bright_green()
            } else {
                "(Needs attention)".yellow()
            }
        );
        println!(
            "  Links:            {} total ({} internal, {} external)",
            analysis.links.total, analysis.links.internal, analysis.links.external
        );
        println!();

        println!("{}", "Improvements".bright_yellow().bold().underline());
        if suggestions.improvements.is_empty() {
            println!("  No specific suggestions available.");
        }
        for (idx, improvement) in suggestions.improvements.iter().enumerate() {
            println!("  {}. {}", idx + 1, improvement);
        }
        println!();

        println!("{}", "Blog Post Ideas".bright_yellow().bold().underline());
        if suggestions.blog_ideas.is_empty() {
            println!("  No blog post ideas available.");
        }
        for idea in &suggestions.blog_ideas {
            println!("  - {}", idea.bright_white());
        }
        println!();

        println!("{}", "Performance".bright_yellow().bold().underline());
        println!(
            "  Page Load Time: {}ms",
            result.performance.loading_time.to_string().bright_cyan()
        );
        println!(
            "  Analysis Time:  {}ms",
            result.performance.analysis_time.to_string().bright_cyan()
        );

        println!();
        println!("{}", "=".repeat(80).bright_blue());
    }

    pub fn colorize_score(score: u8) -> ColoredString {
        let text = score.to_string();
        match ScoreBand::from_score(score) {
            ScoreBand::Good => text.bright_green(),
            ScoreBand::Fair => text.yellow(),
            ScoreBand::Poor => text.bright_red(),
        }
    }

    fn colorize_status(status: MetricStatus, text: &str) -> ColoredString {
        match status {
            MetricStatus::Good => text.bright_green(),
            MetricStatus::Warning => text.yellow(),
            MetricStatus::Bad => text.bright_red(),
        }
    }

    fn or_not_found(content: &str) -> ColoredString {
        if content.is_empty() {
            "Not found".dimmed()
        } else {
            content.bright_white()
        }
    }

    pub fn save_json_report(result: &AnalysisResult, filename: &str) -> Result<()> {
        let json = serde_json::to_string_pretty(result)?;
        let mut file = File::create(filename)?;
        file.write_all(json.as_bytes())?;
        println!("Report saved to: {}", filename.bright_green());
        Ok(())
    }
}
