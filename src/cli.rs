use clap::{Args, Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "seocheck")]
#[command(version, about = "An on-page SEO checker with AI-assisted suggestions", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Path to configuration file (JSON, TOML, or YAML)
    #[arg(long, global = true)]
    pub config: Option<String>,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Page fetch timeout in seconds (default: 10)
    #[arg(long, global = true)]
    pub fetch_timeout: Option<u64>,

    /// Chat-completion timeout in seconds (default: 30)
    #[arg(long, global = true)]
    pub ai_timeout: Option<u64>,

    /// API key for the chat-completion service
    #[arg(long, global = true, env = "SILICON_FLOW_API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,

    /// Base URL of the chat-completion service
    #[arg(long, global = true, env = "SILICON_FLOW_BASE_URL")]
    pub base_url: Option<String>,

    /// Model name sent to the chat-completion service
    #[arg(long, global = true, env = "SILICON_FLOW_MODEL")]
    pub model: Option<String>,

    /// Skip the chat-completion service and use rule-based suggestions only
    #[arg(long, global = true)]
    pub no_ai: bool,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Run the web server
    Serve(ServeArgs),
    /// Analyze a single URL and print a report
    Check(CheckArgs),
}

#[derive(Args, Debug, Clone, Default)]
pub struct ServeArgs {
    /// Address to bind (default: 127.0.0.1)
    #[arg(long)]
    pub host: Option<String>,

    /// Port to listen on (default: 3000)
    #[arg(short, long, env = "PORT")]
    pub port: Option<u16>,
}

#[derive(Args, Debug, Clone)]
pub struct CheckArgs {
    /// The URL to analyze
    #[arg(value_name = "URL")]
    pub url: String,

    /// Output format: text or json
    #[arg(short, long, default_value = "text")]
    pub output: String,

    /// Save report to file
    #[arg(short, long)]
    pub save: Option<String>,
}
