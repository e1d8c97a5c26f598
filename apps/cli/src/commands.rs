//! CLI command definitions, routing, and tracing setup.

use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use color_eyre::eyre::{Result, WrapErr, eyre};
use contentlink_resolver::{CandidateOutcome, LinkResolver};
use contentlink_shared::{AppConfig, ResolverConfig, init_config, load_config, load_config_from};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tracing::{info, warn};

// ---------------------------------------------------------------------------
// CLI structure
// ---------------------------------------------------------------------------

/// ContentLink: turn links to your own articles into content references.
#[derive(Parser)]
#[command(
    name = "contentlink",
    version,
    about = "Resolve publisher links in XML content bodies into content references.",
    long_about = None,
)]
pub(crate) struct Cli {
    /// Log format: text (default) or json.
    #[arg(long, default_value = "text", global = true)]
    pub log_format: LogFormat,

    /// Verbosity level (-v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Config file to use instead of ~/.contentlink/contentlink.toml.
    #[arg(long, global = true, env = "CONTENTLINK_CONFIG")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

/// Log output format.
#[derive(Clone, Debug, clap::ValueEnum)]
pub(crate) enum LogFormat {
    Text,
    Json,
}

/// Top-level CLI subcommands.
#[derive(Subcommand)]
pub(crate) enum Command {
    /// Resolve links in a body and print the rewritten body.
    Process {
        /// Input file (reads stdin when omitted).
        #[arg(short, long)]
        input: Option<PathBuf>,

        /// Output file (writes stdout when omitted).
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Maximum number of links resolved per body.
        #[arg(long)]
        max_links: Option<usize>,

        /// Number of links resolved concurrently.
        #[arg(long)]
        pool_size: Option<usize>,
    },

    /// Configuration management.
    Config {
        /// Config subcommand.
        #[command(subcommand)]
        action: ConfigAction,
    },
}

/// Config subcommands.
#[derive(Subcommand)]
pub(crate) enum ConfigAction {
    /// Initialize config file with defaults.
    Init,
    /// Show resolved configuration.
    Show,
}

// ---------------------------------------------------------------------------
// Tracing setup
// ---------------------------------------------------------------------------

/// Initialize tracing based on CLI flags. Logs go to stderr so stdout carries
/// only the rewritten body.
pub(crate) fn init_tracing(cli: &Cli) {
    use tracing_subscriber::{EnvFilter, fmt};

    let filter = match cli.verbose {
        0 => "contentlink=info",
        1 => "contentlink=debug",
        _ => "contentlink=trace",
    };

    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(filter));

    match cli.log_format {
        LogFormat::Text => {
            fmt()
                .with_env_filter(env_filter)
                .with_writer(std::io::stderr)
                .with_target(false)
                .init();
        }
        LogFormat::Json => {
            fmt()
                .json()
                .with_env_filter(env_filter)
                .with_writer(std::io::stderr)
                .init();
        }
    }
}

// ---------------------------------------------------------------------------
// Command dispatch
// ---------------------------------------------------------------------------

/// Run the CLI command.
pub(crate) async fn run(cli: Cli) -> Result<()> {
    let config_path = cli.config;
    match cli.command {
        Command::Process {
            input,
            output,
            max_links,
            pool_size,
        } => {
            let app = app_config(config_path.as_deref())?;
            let config = resolver_config(&app, max_links, pool_size);
            cmd_process(&app, &config, input.as_deref(), output.as_deref()).await
        }
        Command::Config { action } => match action {
            ConfigAction::Init => cmd_config_init().await,
            ConfigAction::Show => cmd_config_show(config_path.as_deref()).await,
        },
    }
}

fn app_config(path: Option<&Path>) -> Result<AppConfig> {
    let config = match path {
        Some(path) => load_config_from(path)?,
        None => load_config()?,
    };
    Ok(config)
}

/// Merge CLI overrides over the file config.
fn resolver_config(
    app: &AppConfig,
    max_links: Option<usize>,
    pool_size: Option<usize>,
) -> ResolverConfig {
    let mut config = ResolverConfig::from(app);
    if let Some(max_links) = max_links {
        config.max_links = max_links;
    }
    if let Some(pool_size) = pool_size {
        config.pool_size = pool_size;
    }
    config
}

// ---------------------------------------------------------------------------
// Command handlers
// ---------------------------------------------------------------------------

async fn cmd_process(
    app: &AppConfig,
    config: &ResolverConfig,
    input: Option<&Path>,
    output: Option<&Path>,
) -> Result<()> {
    let body = match input {
        Some(path) => tokio::fs::read_to_string(path)
            .await
            .wrap_err_with(|| format!("failed to read {}", path.display()))?,
        None => {
            let mut body = String::new();
            tokio::io::stdin()
                .read_to_string(&mut body)
                .await
                .wrap_err("failed to read stdin")?;
            body
        }
    };

    if app.blogs.is_empty() {
        warn!("no [[blogs]] configured, article links cannot be qualified");
    }

    let resolver = LinkResolver::from_config(config, app.blogs.clone())?;
    let report = resolver.process_with_report(&body).await?;

    let failed = report
        .candidates
        .iter()
        .filter(|c| matches!(c.outcome, CandidateOutcome::Failed { .. }))
        .count();
    info!(
        candidates = report.candidates.len(),
        rewritten = report.rewritten_count(),
        failed,
        omitted = report.omitted.len(),
        "processing complete"
    );

    match output {
        Some(path) => tokio::fs::write(path, report.body.as_bytes())
            .await
            .wrap_err_with(|| format!("failed to write {}", path.display()))?,
        None => {
            let mut stdout = tokio::io::stdout();
            stdout.write_all(report.body.as_bytes()).await?;
            stdout.flush().await?;
        }
    }

    if report.service_unavailable().next().is_some() {
        return Err(eyre!(
            "content read service was unavailable for some links; output may be incomplete"
        ));
    }
    Ok(())
}

async fn cmd_config_init() -> Result<()> {
    let path = init_config()?;
    println!("Config initialized at: {}", path.display());
    Ok(())
}

async fn cmd_config_show(path: Option<&Path>) -> Result<()> {
    let config = app_config(path)?;
    let toml_str = toml::to_string_pretty(&config)?;
    println!("{toml_str}");
    Ok(())
}
