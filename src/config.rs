use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::cli::{Cli, Command};
use crate::llm::{DEFAULT_AI_TIMEOUT_SECS, DEFAULT_BASE_URL, DEFAULT_MODEL};
use crate::seo_analyzer::DEFAULT_FETCH_TIMEOUT_SECS;

pub const DEFAULT_HOST: &str = "127.0.0.1";
pub const DEFAULT_PORT: u16 = 3000;

/// Configuration file structure that mirrors the CLI options
/// All fields are optional to allow partial configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    /// Address the web server binds to
    pub host: Option<String>,

    /// Port the web server listens on
    pub port: Option<u16>,

    /// Page fetch timeout in seconds
    pub fetch_timeout: Option<u64>,

    /// Chat-completion timeout in seconds
    pub ai_timeout: Option<u64>,

    /// Base URL of the chat-completion service
    pub llm_base_url: Option<String>,

    /// Model name sent to the chat-completion service
    pub llm_model: Option<String>,

    /// API key for the chat-completion service
    pub llm_api_key: Option<String>,

    /// Use rule-based suggestions only
    pub disable_ai: Option<bool>,
}

/// Configuration file format based on file extension
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigFormat {
    Json,
    Toml,
    Yaml,
}

impl ConfigFormat {
    /// Detect format from file extension
    pub fn from_path(path: &Path) -> Option<Self> {
        path.extension()
            .and_then(|ext| ext.to_str())
            .and_then(|ext| match ext.to_lowercase().as_str() {
                "json" => Some(ConfigFormat::Json),
                "toml" => Some(ConfigFormat::Toml),
                "yaml" | "yml" => Some(ConfigFormat::Yaml),
                _ => None,
            })
    }

    /// Get file extensions for this format
    pub fn extensions(&self) -> &[&str] {
        match self {
            ConfigFormat::Json => &["json"],
            ConfigFormat::Toml => &["toml"],
            ConfigFormat::Yaml => &["yaml", "yml"],
        }
    }
}

/// Chat-completion settings, present only when an API key is available
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LlmSettings {
    pub base_url: String,
    pub model: String,
    pub api_key: String,
}

/// Fully resolved runtime settings
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub host: String,
    pub port: u16,
    pub fetch_timeout_secs: u64,
    pub ai_timeout_secs: u64,
    pub llm: Option<LlmSettings>,
}

impl Default for Settings {
    fn default() -> Self {
        Config::default().resolve(None)
    }
}

impl Config {
    /// Load configuration from a file
    pub fn from_file(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let format = ConfigFormat::from_path(path)
            .with_context(|| format!("Unsupported config file format: {}", path.display()))?;

        let config = match format {
            ConfigFormat::Json => serde_json::from_str(&contents)
                .with_context(|| format!("Failed to parse JSON config: {}", path.display()))?,
            ConfigFormat::Toml => toml::from_str(&contents)
                .with_context(|| format!("Failed to parse TOML config: {}", path.display()))?,
            ConfigFormat::Yaml => serde_yaml::from_str(&contents)
                .with_context(|| format!("Failed to parse YAML config: {}", path.display()))?,
        };

        Ok(config)
    }

    /// Get the default configuration file paths to check (in order of priority)
    /// Returns paths in order: current directory, user config directory
    pub fn default_paths() -> Vec<PathBuf> {
        let mut paths = Vec::new();

        for format in &[ConfigFormat::Json, ConfigFormat::Toml, ConfigFormat::Yaml] {
            for ext in format.extensions() {
                paths.push(PathBuf::from(format!("seocheck.{}", ext)));
            }
        }

        // Use XDG_CONFIG_HOME if set, otherwise fall back to ~/.config
        let config_home = std::env::var("XDG_CONFIG_HOME")
            .ok()
            .filter(|p| !p.is_empty())
            .map(PathBuf::from)
            .or_else(|| dirs::home_dir().map(|home| home.join(".config")));

        if let Some(config_home) = config_home {
            let config_dir = config_home.join("seocheck");
            for format in &[ConfigFormat::Json, ConfigFormat::Toml, ConfigFormat::Yaml] {
                for ext in format.extensions() {
                    paths.push(config_dir.join(format!("config.{}", ext)));
                }
            }
        }

        paths
    }

    /// Try to load configuration from default paths
    /// Returns the first configuration file found, or None if no config exists
    pub fn from_default_paths() -> Result<Option<Self>> {
        for path in Self::default_paths() {
            if path.exists() {
                tracing::debug!(path = %path.display(), "Loading config file");
                return Ok(Some(Self::from_file(&path)?));
            }
        }
        Ok(None)
    }

    /// Loads the file named by `--config`, or the first default path found
    pub fn load(cli: &Cli) -> Result<Self> {
        match &cli.config {
            Some(path) => Self::from_file(Path::new(path)),
            None => Ok(Self::from_default_paths()?.unwrap_or_default()),
        }
    }

    /// Resolve the final settings
    /// CLI arguments and environment variables take precedence over config file values
    pub fn resolve(&self, cli: Option<&Cli>) -> Settings {
        let serve = cli.and_then(|cli| match &cli.command {
            Command::Serve(args) => Some(args),
            Command::Check(_) => None,
        });

        let host = serve
            .and_then(|args| args.host.clone())
            .or_else(|| self.host.clone())
            .unwrap_or_else(|| DEFAULT_HOST.to_string());
        let port = serve
            .and_then(|args| args.port)
            .or(self.port)
            .unwrap_or(DEFAULT_PORT);

        let fetch_timeout_secs = cli
            .and_then(|cli| cli.fetch_timeout)
            .or(self.fetch_timeout)
            .unwrap_or(DEFAULT_FETCH_TIMEOUT_SECS);
        let ai_timeout_secs = cli
            .and_then(|cli| cli.ai_timeout)
            .or(self.ai_timeout)
            .unwrap_or(DEFAULT_AI_TIMEOUT_SECS);

        let disable_ai = cli.is_some_and(|cli| cli.no_ai) || self.disable_ai.unwrap_or(false);
        let api_key = cli
            .and_then(|cli| cli.api_key.clone())
            .or_else(|| self.llm_api_key.clone())
            .filter(|key| !key.trim().is_empty());

        let llm = match api_key {
            Some(api_key) if !disable_ai => Some(LlmSettings {
                base_url: cli
                    .and_then(|cli| cli.base_url.clone())
                    .or_else(|| self.llm_base_url.clone())
                    .unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
                model: cli
                    .and_then(|cli| cli.model.clone())
                    .or_else(|| self.llm_model.clone())
                    .unwrap_or_else(|| DEFAULT_MODEL.to_string()),
                api_key,
            }),
            _ => None,
        };

        Settings {
            host,
            port,
            fetch_timeout_secs,
            ai_timeout_secs,
            llm,
        }
    }
}
