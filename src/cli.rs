//! Command-line interface argument parsing.
//!
//! This module handles all CLI argument parsing using clap,
//! including validation and default values.

use crate::agent::FacetKind;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// SeoLens - LLM-powered SEO analysis for any web page
///
/// Fetches a page, runs eight analysis facets against an OpenAI-compatible
/// API and writes a Markdown or JSON report. Without an API key the canned
/// demo report is produced instead.
///
/// Examples:
///   seolens analyze example.com
///   seolens analyze https://example.com --keywords "bakery,sourdough" --format json
///   seolens facet keywords https://example.com
///   seolens serve --bind 0.0.0.0:8888
///   seolens project save https://example.com --name "Client site"
///   seolens init-config
#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Args {
    #[command(subcommand)]
    pub command: Command,

    /// Path to configuration file
    ///
    /// If not specified, looks for .seolens.toml in the current directory
    #[arg(short, long, value_name = "FILE", global = true)]
    pub config: Option<PathBuf>,

    /// Enable verbose logging output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Run in quiet mode (minimal output)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Model to use for analysis
    ///
    /// Can also be set via SEOLENS_MODEL env var or .seolens.toml config.
    #[arg(short, long, env = "SEOLENS_MODEL", global = true)]
    pub model: Option<String>,

    /// OpenAI-compatible API base URL (including /v1)
    #[arg(long, value_name = "URL", env = "SEOLENS_API_BASE", global = true)]
    pub api_base: Option<String>,

    /// API key for the text-generation service
    ///
    /// Falls back to the key saved with `seolens key set`.
    #[arg(long, value_name = "KEY", env = "OPENAI_API_KEY", hide_env_values = true, global = true)]
    pub api_key: Option<String>,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Run the full analysis for a URL and write a report
    Analyze(AnalyzeArgs),

    /// Fetch a page's HTML and print it
    Fetch {
        /// Page to fetch; https:// is added when no scheme is given
        url: String,

        /// Request the page directly with browser headers instead of via proxies
        #[arg(long)]
        direct: bool,
    },

    /// Run a single analysis facet and print its JSON
    Facet {
        #[arg(value_enum)]
        kind: FacetKind,

        url: String,

        /// Use this HTML file instead of fetching the page
        #[arg(long, value_name = "FILE")]
        html: Option<PathBuf>,
    },

    /// Serve the HTTP endpoints
    Serve {
        /// Address to listen on (default: from config or 127.0.0.1:8888)
        #[arg(long, value_name = "ADDR")]
        bind: Option<String>,
    },

    /// Manage saved projects
    #[command(subcommand)]
    Project(ProjectCommand),

    /// Manage the stored API key
    #[command(subcommand)]
    Key(KeyCommand),

    /// Generate a default .seolens.toml configuration file
    InitConfig,
}

#[derive(clap::Args, Debug, Clone)]
pub struct AnalyzeArgs {
    /// Website to analyze; https:// is added when no scheme is given
    pub url: String,

    /// Use this HTML file instead of fetching the page
    #[arg(long, value_name = "FILE")]
    pub html: Option<PathBuf>,

    /// Target keywords (comma-separated), listed in the report
    #[arg(long, value_name = "WORDS", value_delimiter = ',')]
    pub keywords: Option<Vec<String>>,

    /// Output file path for the report (default: from config)
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Output format (markdown, json)
    #[arg(long, value_name = "FORMAT")]
    pub format: Option<OutputFormat>,

    /// Skip the model and produce the demo report
    #[arg(long)]
    pub mock: bool,

    /// Fail if the overall score is below this value
    ///
    /// Useful for CI pipelines. Exit code 2 when the score is lower.
    #[arg(long, value_name = "SCORE")]
    pub fail_under: Option<f64>,
}

#[derive(Subcommand, Debug, Clone)]
pub enum ProjectCommand {
    /// Save a project
    Save {
        url: String,

        /// Project name (default: "Project N")
        #[arg(long)]
        name: Option<String>,

        /// HTML file whose content is stored with the project
        #[arg(long, value_name = "FILE")]
        html: Option<PathBuf>,

        /// Target keywords, comma-separated
        #[arg(long, value_name = "WORDS")]
        keywords: Option<String>,
    },

    /// List saved projects
    List,

    /// Show a saved project by name or id
    Load { project: String },

    /// Delete a saved project by id
    Delete { id: i64 },
}

#[derive(Subcommand, Debug, Clone)]
pub enum KeyCommand {
    /// Store an API key
    Set { key: String },

    /// Show the stored key, masked
    Show,

    /// Remove the stored key
    Clear,
}

/// Output format for the report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum OutputFormat {
    /// Markdown format (default)
    #[default]
    Markdown,
    /// JSON format
    Json,
}

impl OutputFormat {
    /// Parses the `format` value of a config file.
    pub fn from_config(value: &str) -> Option<Self> {
        match value.trim().to_lowercase().as_str() {
            "markdown" | "md" => Some(OutputFormat::Markdown),
            "json" => Some(OutputFormat::Json),
            _ => None,
        }
    }
}

impl Args {
    /// Parse command-line arguments.
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Validate the parsed arguments.
    pub fn validate(&self) -> Result<(), String> {
        if self.verbose && self.quiet {
            return Err("Cannot use both --verbose and --quiet".to_string());
        }

        if let Some(ref api_base) = self.api_base {
            if !api_base.starts_with("http://") && !api_base.starts_with("https://") {
                return Err("API base must start with 'http://' or 'https://'".to_string());
            }
        }

        match &self.command {
            Command::Analyze(analyze) => {
                if analyze.url.trim().is_empty() {
                    return Err("URL must not be empty".to_string());
                }
                if let Some(score) = analyze.fail_under {
                    if !(0.0..=100.0).contains(&score) {
                        return Err("--fail-under must be between 0 and 100".to_string());
                    }
                }
                check_file(analyze.html.as_ref())?;
            }
            Command::Facet { url, html, .. } => {
                if url.trim().is_empty() {
                    return Err("URL must not be empty".to_string());
                }
                check_file(html.as_ref())?;
            }
            Command::Project(ProjectCommand::Save { html, .. }) => check_file(html.as_ref())?,
            Command::Key(KeyCommand::Set { key }) => {
                if key.trim().is_empty() {
                    return Err("API key must not be empty".to_string());
                }
            }
            _ => {}
        }

        Ok(())
    }

    /// Returns the log level based on verbosity settings. `--quiet` wins over
    /// a config file that asks for verbose output.
    pub fn log_level(&self, config_verbose: bool) -> tracing::Level {
        if self.quiet {
            tracing::Level::ERROR
        } else if self.verbose || config_verbose {
            tracing::Level::DEBUG
        } else {
            tracing::Level::INFO
        }
    }
}

fn check_file(path: Option<&PathBuf>) -> Result<(), String> {
    match path {
        Some(path) if !path.is_file() => Err(format!("HTML file does not exist: {}", path.display())),
        _ => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_args(command: Command) -> Args {
        Args {
            command,
            config: None,
            verbose: false,
            quiet: false,
            model: None,
            api_base: None,
            api_key: None,
        }
    }

    fn analyze(url: &str) -> AnalyzeArgs {
        AnalyzeArgs {
            url: url.to_string(),
            html: None,
            keywords: None,
            output: None,
            format: None,
            mock: false,
            fail_under: None,
        }
    }

    #[test]
    fn test_parse_analyze_command() {
        let args = Args::try_parse_from([
            "seolens",
            "analyze",
            "example.com",
            "--keywords",
            "bakery,sourdough",
            "--format",
            "json",
            "--fail-under",
            "60",
            "-v",
        ])
        .unwrap();

        assert!(args.verbose);
        match args.command {
            Command::Analyze(a) => {
                assert_eq!(a.url, "example.com");
                assert_eq!(a.keywords, Some(vec!["bakery".to_string(), "sourdough".to_string()]));
                assert_eq!(a.format, Some(OutputFormat::Json));
                assert_eq!(a.fail_under, Some(60.0));
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_parse_facet_kind() {
        let args = Args::try_parse_from(["seolens", "facet", "on-page", "https://example.com"]).unwrap();
        assert!(matches!(
            args.command,
            Command::Facet {
                kind: FacetKind::OnPage,
                ..
            }
        ));
    }

    #[test]
    fn test_parse_project_subcommands() {
        let args = Args::try_parse_from(["seolens", "project", "delete", "1700000000000"]).unwrap();
        assert!(matches!(
            args.command,
            Command::Project(ProjectCommand::Delete { id: 1700000000000 })
        ));

        let args = Args::try_parse_from(["seolens", "key", "show"]).unwrap();
        assert!(matches!(args.command, Command::Key(KeyCommand::Show)));
    }

    #[test]
    fn test_validation_conflicting_options() {
        let mut args = make_args(Command::InitConfig);
        args.verbose = true;
        args.quiet = true;
        assert!(args.validate().is_err());
    }

    #[test]
    fn test_validation_fail_under_range() {
        let mut a = analyze("example.com");
        a.fail_under = Some(120.0);
        assert!(make_args(Command::Analyze(a)).validate().is_err());

        let mut a = analyze("example.com");
        a.fail_under = Some(70.0);
        assert!(make_args(Command::Analyze(a)).validate().is_ok());
    }

    #[test]
    fn test_validation_missing_html_file() {
        let mut a = analyze("example.com");
        a.html = Some(PathBuf::from("/definitely/not/here.html"));
        assert!(make_args(Command::Analyze(a)).validate().is_err());
    }

    #[test]
    fn test_validation_api_base() {
        let mut args = make_args(Command::Analyze(analyze("example.com")));
        args.api_base = Some("localhost:4000".to_string());
        assert!(args.validate().is_err());
    }

    #[test]
    fn test_output_format_from_config() {
        assert_eq!(OutputFormat::from_config("JSON"), Some(OutputFormat::Json));
        assert_eq!(OutputFormat::from_config("md"), Some(OutputFormat::Markdown));
        assert_eq!(OutputFormat::from_config("pdf"), None);
    }

    #[test]
    fn test_log_level() {
        let mut args = make_args(Command::InitConfig);
        assert_eq!(args.log_level(false), tracing::Level::INFO);

        args.verbose = true;
        assert_eq!(args.log_level(false), tracing::Level::DEBUG);

        args.verbose = false;
        args.quiet = true;
        assert_eq!(args.log_level(false), tracing::Level::ERROR);
    }

    #[test]
    fn test_config_verbose_raises_log_level() {
        let mut args = make_args(Command::InitConfig);
        assert_eq!(args.log_level(true), tracing::Level::DEBUG);

        args.quiet = true;
        assert_eq!(args.log_level(true), tracing::Level::ERROR);
    }
}
