//! SeoLens - LLM-powered SEO analysis
//!
//! A CLI tool that fetches a web page, runs eight analysis facets against an
//! OpenAI-compatible API and writes a Markdown or JSON report. It also serves
//! the `/analyze` and `/fetch-html` HTTP endpoints and keeps a small local
//! store of projects and the API key.
//!
//! Exit codes:
//!   0 - Success (score at or above --fail-under, or no --fail-under set)
//!   1 - Runtime error (fetch failure, rejected API key, config, etc.)
//!   2 - Overall score below the --fail-under threshold

mod agent;
mod analysis;
mod cli;
mod config;
mod fetch;
mod llm;
mod mock;
mod models;
mod report;
mod server;
mod store;

use agent::{AnalysisOutcome, AnalysisSource, FacetKind, MockReason};
use analysis::{priority_counts, weakest_sections};
use anyhow::{Context, Result};
use cli::{AnalyzeArgs, Args, Command, KeyCommand, OutputFormat, ProjectCommand};
use config::{Config, CONFIG_FILE};
use fetch::HtmlFetcher;
use indicatif::{ProgressBar, ProgressStyle};
use llm::{ChatClient, TextGenerator};
use models::Priority;
use report::scoring::Grade;
use report::ReportMetadata;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::{Duration, Instant};
use store::{mask_key, CredentialStore, LocalStore, ProjectDraft, ProjectStore};
use tracing::{debug, error, info, warn};
use tracing_subscriber::FmtSubscriber;

#[tokio::main]
async fn main() -> Result<()> {
    // Parse command-line arguments
    let args = Args::parse_args();

    // Validate arguments
    if let Err(e) = args.validate() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }

    // Handle init-config early (no logging needed)
    if matches!(args.command, Command::InitConfig) {
        return handle_init_config();
    }

    let (mut config, origin) = match load_config(&args) {
        Ok(loaded) => loaded,
        Err(e) => {
            eprintln!("❌ Error: {:#}", e);
            std::process::exit(1);
        }
    };
    config.merge_with_args(&args);

    init_logging(args.log_level(config.general.verbose));

    info!("SeoLens v{}", env!("CARGO_PKG_VERSION"));
    origin.log();
    debug!("Arguments: {:?}", args);

    match run(args, config).await {
        Ok(exit_code) => {
            std::process::exit(exit_code);
        }
        Err(e) => {
            error!("Command failed: {}", e);
            eprintln!("\n❌ Error: {}", e);
            std::process::exit(1);
        }
    }
}

/// Handle init-config: generate a default .seolens.toml.
fn handle_init_config() -> Result<()> {
    let path = Path::new(CONFIG_FILE);

    if path.exists() {
        eprintln!("⚠️  {} already exists. Remove it first or edit it manually.", CONFIG_FILE);
        std::process::exit(1);
    }

    let content = Config::default_toml();
    std::fs::write(path, &content).with_context(|| format!("Failed to write {}", CONFIG_FILE))?;

    println!("✅ Created {} with default settings.", CONFIG_FILE);
    println!("   Edit it to customize the model, proxies, deadlines, and more.");
    Ok(())
}

/// Initialize logging at `level`.
fn init_logging(level: tracing::Level) {
    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .compact()
        .finish();

    if let Err(e) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("Failed to set tracing subscriber: {}", e);
    }
}

/// Dispatch a subcommand. Returns the process exit code.
async fn run(args: Args, config: Config) -> Result<i32> {
    match args.command.clone() {
        Command::Analyze(analyze) => run_analysis(&args, &config, analyze).await,
        Command::Fetch { url, direct } => handle_fetch(&config, &url, direct).await,
        Command::Facet { kind, url, html } => handle_facet(&args, &config, kind, &url, html).await,
        Command::Serve { bind } => {
            let addr = bind.unwrap_or_else(|| config.server.bind.clone());
            let fetcher = HtmlFetcher::new(config.fetch_options())?;
            println!("🌐 Serving SeoLens endpoints on http://{}", addr);
            server::serve(
                &addr,
                server::AppState {
                    fetcher: Arc::new(fetcher),
                },
            )
            .await?;
            Ok(0)
        }
        Command::Project(project) => handle_project(&config, project),
        Command::Key(key) => handle_key(&config, key),
        Command::InitConfig => {
            handle_init_config()?;
            Ok(0)
        }
    }
}

/// Run the complete analysis workflow. Returns exit code (0 or 2).
async fn run_analysis(args: &Args, config: &Config, analyze: AnalyzeArgs) -> Result<i32> {
    let start_time = Instant::now();
    let url = fetch::normalize_url(&analyze.url);

    let progress = stage_progress(args.quiet);

    // Step 1: Get the page
    progress.set_message("Fetching page");
    let html = match analyze.html {
        Some(ref path) => read_html(path)?,
        None => {
            let fetcher = HtmlFetcher::new(config.fetch_options())?;
            fetcher.fetch(&url).await?
        }
    };
    let html = agent::truncate_chars(&html, config.fetch.max_html_chars).to_string();
    info!("Page HTML ready ({} chars)", html.len());
    progress.inc(1);

    // Step 2: Run the agents
    let outcome = if analyze.mock {
        AnalysisOutcome::mocked(&url, MockReason::Requested)
    } else {
        let generator = resolve_generator(args, config)?;
        progress.set_message(if generator.is_some() {
            "Running analysis facets"
        } else {
            "Preparing demo report"
        });

        let limit = Duration::from_secs(config.analysis.analysis_timeout_seconds);
        match agent::analyze_website(generator, &url, &html, limit).await {
            Ok(outcome) => outcome,
            Err(e) => {
                progress.abandon_with_message("Analysis stopped");
                eprintln!("\n🔑 {}", e);
                eprintln!("   Set a valid key with `seolens key set <KEY>` or --api-key.");
                return Ok(1);
            }
        }
    };
    progress.inc(1);

    let source = match outcome.source {
        AnalysisSource::Model => config.model.name.clone(),
        AnalysisSource::Mock(MockReason::NoApiKey) => "Demo data (no API key configured)".to_string(),
        AnalysisSource::Mock(MockReason::Requested) => "Demo data (--mock)".to_string(),
        AnalysisSource::Mock(MockReason::TimedOut) => "Demo data (analysis timed out)".to_string(),
        AnalysisSource::Mock(MockReason::Failed) => "Demo data (analysis failed)".to_string(),
    };
    let analysis = outcome.analysis;

    // Step 3: Render and save the report
    progress.set_message("Writing report");
    let format = analyze
        .format
        .or_else(|| OutputFormat::from_config(&config.general.format))
        .unwrap_or_default();
    let output_path = analyze
        .output
        .clone()
        .unwrap_or_else(|| PathBuf::from(&config.general.output));

    let duration = start_time.elapsed().as_secs_f64();
    let metadata = ReportMetadata {
        source,
        duration_seconds: duration,
        target_keywords: analyze.keywords.clone().unwrap_or_default(),
    };

    let output = match format {
        OutputFormat::Json => report::generate_json_report(&analysis)?,
        OutputFormat::Markdown => report::generate_markdown_report(&analysis, &metadata),
    };

    std::fs::write(&output_path, &output)
        .with_context(|| format!("Failed to write report to {}", output_path.display()))?;
    progress.inc(1);
    progress.finish_and_clear();

    // Print summary
    let grade = Grade::of(analysis.overall_score);
    let counts = priority_counts(&analysis.prioritized_recommendations);
    let count = |p: Priority| counts.get(&p).copied().unwrap_or(0);

    println!("\n📊 Analysis Summary for {}:", url);
    if matches!(outcome.source, AnalysisSource::Mock(_)) {
        println!("   ⚠️  {}", metadata.source);
    }
    println!("   Overall score: {:.0}/100 {} {}", analysis.overall_score, grade.emoji(), grade);
    for (section, score) in weakest_sections(&analysis, 2) {
        println!("   Needs attention: {} ({:.0})", section, score);
    }
    println!(
        "   Recommendations: 🔴 High: {} | 🟡 Medium: {} | 🟢 Low: {}",
        count(Priority::High),
        count(Priority::Medium),
        count(Priority::Low)
    );
    println!("   Duration: {:.1}s", duration);
    println!("\n✅ Analysis complete! Report saved to: {}", output_path.display());

    // Check --fail-under threshold
    if let Some(threshold) = analyze.fail_under {
        if analysis.overall_score < threshold {
            eprintln!(
                "\n⛔ Overall score {:.0} is below {:.0}. Failing (exit code 2).",
                analysis.overall_score, threshold
            );
            return Ok(2);
        }
    }

    Ok(0)
}

/// Print a page's HTML.
async fn handle_fetch(config: &Config, url: &str, direct: bool) -> Result<i32> {
    let fetcher = HtmlFetcher::new(config.fetch_options())?;
    let html = if direct {
        fetcher.fetch_direct(&fetch::normalize_url(url)).await?
    } else {
        fetcher.fetch(url).await?
    };
    println!("{}", html);
    Ok(0)
}

/// Run one facet and print its JSON.
async fn handle_facet(
    args: &Args,
    config: &Config,
    kind: FacetKind,
    url: &str,
    html_file: Option<PathBuf>,
) -> Result<i32> {
    let url = fetch::normalize_url(url);
    let Some(generator) = resolve_generator(args, config)? else {
        eprintln!("🔑 No API key configured. Set one with `seolens key set <KEY>` or --api-key.");
        return Ok(1);
    };

    let html = match html_file {
        Some(ref path) => read_html(path)?,
        None => HtmlFetcher::new(config.fetch_options())?.fetch(&url).await?,
    };
    let html = agent::truncate_chars(&html, config.fetch.max_html_chars);

    println!("🔬 Running {:?} analysis for {}...", kind, url);
    let limit = Duration::from_secs(config.analysis.facet_timeout_seconds);
    let value = agent::run_facet(generator, kind, &url, html, limit).await?;
    println!("{}", serde_json::to_string_pretty(&value)?);
    Ok(0)
}

fn handle_project(config: &Config, command: ProjectCommand) -> Result<i32> {
    let local = open_store(config)?;
    let projects = ProjectStore::new(&local);

    match command {
        ProjectCommand::Save {
            url,
            name,
            html,
            keywords,
        } => {
            let html_snippet = html.as_deref().map(read_html).transpose()?;
            let saved = projects.save(ProjectDraft {
                name,
                url,
                html_snippet,
                keywords,
            })?;
            println!("✅ Saved project \"{}\" (id {})", saved.name, saved.id);
        }
        ProjectCommand::List => {
            let all = projects.list()?;
            if all.is_empty() {
                println!("   No saved projects.");
            }
            for project in all {
                println!("   📁 {} - {} (id {}, saved {})", project.name, project.url, project.id, project.date);
            }
        }
        ProjectCommand::Load { project } => {
            let found = projects.find(&project)?;
            println!("{}", serde_json::to_string_pretty(&found)?);
        }
        ProjectCommand::Delete { id } => {
            if projects.delete(id)? {
                println!("🗑️  Deleted project {}", id);
            } else {
                eprintln!("⚠️  No project with id {}", id);
                return Ok(1);
            }
        }
    }

    Ok(0)
}

fn handle_key(config: &Config, command: KeyCommand) -> Result<i32> {
    let local = open_store(config)?;
    let credentials = CredentialStore::new(&local);

    match command {
        KeyCommand::Set { key } => {
            credentials.set_api_key(&key)?;
            println!("✅ API key saved ({})", mask_key(key.trim()));
        }
        KeyCommand::Show => match credentials.api_key()? {
            Some(key) => println!("🔑 {}", mask_key(&key)),
            None => println!("   No API key stored."),
        },
        KeyCommand::Clear => {
            credentials.clear_api_key()?;
            println!("🗑️  API key removed.");
        }
    }

    Ok(0)
}

/// Builds the chat client from --api-key / OPENAI_API_KEY or the stored key.
fn resolve_generator(args: &Args, config: &Config) -> Result<Option<Arc<dyn TextGenerator>>> {
    let key = match args.api_key.clone().filter(|k| !k.trim().is_empty()) {
        Some(key) => Some(key),
        None => match open_store(config) {
            Ok(local) => CredentialStore::new(&local).api_key()?,
            Err(e) => {
                warn!("Local store unavailable, no saved API key: {}", e);
                None
            }
        },
    };

    let Some(key) = key else {
        return Ok(None);
    };

    let client = ChatClient::new(config.chat_config(Some(key)))?;
    info!("Using model {} at {}", client.model(), config.model.api_base);
    let generator: Arc<dyn TextGenerator> = Arc::new(client);
    Ok(Some(generator))
}

fn open_store(config: &Config) -> Result<LocalStore> {
    let local = LocalStore::open_default(config.general.data_dir.as_deref())?;
    debug!("Local store at {}", local.root().display());
    Ok(local)
}

fn read_html(path: &Path) -> Result<String> {
    std::fs::read_to_string(path).with_context(|| format!("Failed to read HTML file: {}", path.display()))
}

/// A three-stage bar (fetch, analyze, report), hidden in quiet mode.
fn stage_progress(quiet: bool) -> ProgressBar {
    if quiet {
        return ProgressBar::hidden();
    }

    let pb = ProgressBar::new(3);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:30.cyan/blue}] {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("#>-"),
    );
    pb.enable_steady_tick(Duration::from_millis(120));
    pb
}

/// Where the active configuration came from, reported once logging is up.
enum ConfigOrigin {
    Explicit(PathBuf),
    Default,
    Builtin,
    Unreadable(anyhow::Error),
}

impl ConfigOrigin {
    fn log(&self) {
        match self {
            ConfigOrigin::Explicit(path) => info!("Loaded config from: {}", path.display()),
            ConfigOrigin::Default => info!("Loaded default config from {}", CONFIG_FILE),
            ConfigOrigin::Builtin => debug!("No config file found, using defaults"),
            ConfigOrigin::Unreadable(e) => warn!("Failed to load config: {}", e),
        }
    }
}

/// Load configuration from file or use defaults.
fn load_config(args: &Args) -> Result<(Config, ConfigOrigin)> {
    // Try explicit config path
    if let Some(ref config_path) = args.config {
        let config = Config::load(config_path)?;
        return Ok((config, ConfigOrigin::Explicit(config_path.clone())));
    }

    // Try default location
    match Config::load_default() {
        Ok(Some(config)) => Ok((config, ConfigOrigin::Default)),
        Ok(None) => Ok((Config::default(), ConfigOrigin::Builtin)),
        Err(e) => Ok((Config::default(), ConfigOrigin::Unreadable(e))),
    }
}
