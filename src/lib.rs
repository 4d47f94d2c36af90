pub mod cli;
pub mod config;
pub mod extractor;
pub mod http_client;
pub mod llm;
pub mod logging;
pub mod models;
pub mod pipeline;
pub mod render;
pub mod reporter;
pub mod seo_analyzer;
pub mod server;
pub mod suggestions;

use anyhow::Result;
use cli::{CheckArgs, Cli, Command};
use colored::*;
use config::{Config, Settings};
use pipeline::AnalysisPipeline;
use reporter::Reporter;

pub async fn run(args: Cli) -> Result<()> {
    let config = Config::load(&args)?;
    let settings = config.resolve(Some(&args));

    match &args.command {
        Command::Serve(_) => server::start_server(&settings).await,
        Command::Check(check) => run_check(check, &settings).await,
    }
}

async fn run_check(args: &CheckArgs, settings: &Settings) -> Result<()> {
    // Validate URL
    if !args.url.starts_with("http://") && !args.url.starts_with("https://") {
        anyhow::bail!("URL must start with http:// or https://");
    }

    if args.output != "json" {
        println!("{} {}", "Analyzing:".bright_white().bold(), args.url);
    }

    let pipeline = AnalysisPipeline::from_settings(settings)?;
    let result = pipeline.run(&args.url).await?;

    match args.output.as_str() {
        "json" => {
            let json = serde_json::to_string_pretty(&result)?;
            println!("{}", json);
        }
        _ => {
            Reporter::print_text_report(&result);
        }
    }

    if let Some(filename) = &args.save {
        Reporter::save_json_report(&result, filename)?;
    }

    Ok(())
}
