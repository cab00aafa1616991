//! Configuration file handling.
//!
//! This module handles loading and merging configuration from
//! `.seolens.toml` files.

use crate::agent::{ANALYSIS_DEADLINE, FACET_DEADLINE};
use crate::fetch::{default_proxies, FetchOptions, DEFAULT_USER_AGENT};
use crate::llm::ChatConfig;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Name of the per-directory configuration file.
pub const CONFIG_FILE: &str = ".seolens.toml";

/// Root configuration structure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub general: GeneralConfig,

    /// Text-generation model settings.
    #[serde(default)]
    pub model: ModelConfig,

    /// Page retrieval settings.
    #[serde(default)]
    pub fetch: FetchConfig,

    #[serde(default)]
    pub server: ServerConfig,

    /// Deadlines for analysis runs.
    #[serde(default)]
    pub analysis: AnalysisConfig,
}

/// General application settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneralConfig {
    /// Default report path.
    #[serde(default = "default_output")]
    pub output: String,

    /// Default report format: "markdown" or "json".
    #[serde(default = "default_format")]
    pub format: String,

    /// Enable verbose logging by default.
    #[serde(default)]
    pub verbose: bool,

    /// Where projects and the API key are stored. Defaults to the platform
    /// data directory.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data_dir: Option<PathBuf>,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            output: default_output(),
            format: default_format(),
            verbose: false,
            data_dir: None,
        }
    }
}

fn default_output() -> String {
    "seolens_report.md".to_string()
}

fn default_format() -> String {
    "markdown".to_string()
}

/// Text-generation model settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelConfig {
    #[serde(default = "default_model")]
    pub name: String,

    /// OpenAI-compatible API base, including the version segment.
    #[serde(default = "default_api_base")]
    pub api_base: String,

    #[serde(default = "default_temperature")]
    pub temperature: f32,

    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,

    /// Request timeout in seconds.
    #[serde(default = "default_model_timeout")]
    pub timeout_seconds: u64,
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            name: default_model(),
            api_base: default_api_base(),
            temperature: default_temperature(),
            max_tokens: default_max_tokens(),
            timeout_seconds: default_model_timeout(),
        }
    }
}

fn default_model() -> String {
    "gpt-4-turbo-preview".to_string()
}

fn default_api_base() -> String {
    "https://api.openai.com/v1".to_string()
}

fn default_temperature() -> f32 {
    0.3
}

fn default_max_tokens() -> u32 {
    2000
}

fn default_model_timeout() -> u64 {
    120
}

/// Page retrieval settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FetchConfig {
    /// Proxy prefixes tried in order.
    #[serde(default = "default_proxies")]
    pub proxies: Vec<String>,

    #[serde(default = "default_fallback_api")]
    pub fallback_api: String,

    #[serde(default = "default_user_agent")]
    pub user_agent: String,

    #[serde(default = "default_fetch_timeout")]
    pub timeout_seconds: u64,

    /// Raw HTML beyond this many characters is cut before it goes into a prompt.
    #[serde(default = "default_max_html_chars")]
    pub max_html_chars: usize,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            proxies: default_proxies(),
            fallback_api: default_fallback_api(),
            user_agent: default_user_agent(),
            timeout_seconds: default_fetch_timeout(),
            max_html_chars: default_max_html_chars(),
        }
    }
}

fn default_fallback_api() -> String {
    "https://api.codetabs.com/v1/proxy?quest=".to_string()
}

fn default_user_agent() -> String {
    DEFAULT_USER_AGENT.to_string()
}

fn default_fetch_timeout() -> u64 {
    10
}

fn default_max_html_chars() -> usize {
    50_000
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_bind")]
    pub bind: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self { bind: default_bind() }
    }
}

fn default_bind() -> String {
    "127.0.0.1:8888".to_string()
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisConfig {
    /// Limit for a single facet run.
    #[serde(default = "default_facet_timeout")]
    pub facet_timeout_seconds: u64,

    /// Limit for the full analysis.
    #[serde(default = "default_analysis_timeout")]
    pub analysis_timeout_seconds: u64,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            facet_timeout_seconds: default_facet_timeout(),
            analysis_timeout_seconds: default_analysis_timeout(),
        }
    }
}

fn default_facet_timeout() -> u64 {
    FACET_DEADLINE.as_secs()
}

fn default_analysis_timeout() -> u64 {
    ANALYSIS_DEADLINE.as_secs()
}

impl Config {
    /// Load configuration from a file path.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: Config = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(config)
    }

    /// Try to load configuration from the default location.
    ///
    /// Returns `Ok(None)` if the file doesn't exist, `Err` if it exists but can't be parsed.
    pub fn load_default() -> Result<Option<Self>> {
        let default_path = Path::new(CONFIG_FILE);

        if default_path.exists() {
            Ok(Some(Self::load(default_path)?))
        } else {
            Ok(None)
        }
    }

    /// Merge this configuration with CLI arguments.
    ///
    /// Only values the user actually passed override the file.
    pub fn merge_with_args(&mut self, args: &crate::cli::Args) {
        if let Some(ref model) = args.model {
            self.model.name = model.clone();
        }
        if let Some(ref api_base) = args.api_base {
            self.model.api_base = api_base.clone();
        }
        if args.verbose {
            self.general.verbose = true;
        }
    }

    pub fn chat_config(&self, api_key: Option<String>) -> ChatConfig {
        ChatConfig {
            api_base: self.model.api_base.clone(),
            api_key,
            model: self.model.name.clone(),
            temperature: self.model.temperature,
            max_tokens: self.model.max_tokens,
            timeout_seconds: self.model.timeout_seconds,
        }
    }

    pub fn fetch_options(&self) -> FetchOptions {
        FetchOptions {
            proxies: self.fetch.proxies.clone(),
            fallback_api: self.fetch.fallback_api.clone(),
            user_agent: self.fetch.user_agent.clone(),
            timeout_seconds: self.fetch.timeout_seconds,
        }
    }

    /// Generate a default configuration file content.
    pub fn default_toml() -> String {
        let config = Config::default();
        toml::to_string_pretty(&config).unwrap_or_else(|_| String::new())
    }
}
