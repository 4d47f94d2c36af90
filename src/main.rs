use anyhow::Result;
use clap::Parser;
use colored::*;
use seocheck::cli::Cli;
use seocheck::logging::init_logging;
use seocheck::run;

#[tokio::main]
async fn main() -> Result<()> {
    let args = Cli::parse();
    init_logging(args.verbose);

    if let Err(e) = run(args).await {
        eprintln!("{} {:#}", "Error:".bright_red().bold(), e);
        std::process::exit(1);
    }

    Ok(())
}
