//! Ticketforge CLI entry point.
//!
//! This binary is the composition root for the entire system. Responsibilities:
//!
//! 1. **Parse configuration**: load `.ticketforge/config.toml` (only for
//!    commands that talk to the tracker) and validate it.
//! 2. **Wire observability**: configure `tracing-subscriber` with a text or
//!    JSON layer and an optional OpenTelemetry OTLP exporter.
//! 3. **Construct infrastructure**: create the [`tracker::TrackerClient`] (or
//!    the in-process dry-run creator) and inject it into
//!    [`workitems::CreationOrchestrator`].
//! 4. **Dispatch** the sub-command:
//!    - `encode`: markdown-flavoured text → rich-document JSON;
//!    - `decode`: rich-document JSON (or a JSON string, or `null`) → plain text;
//!    - `create`: create a draft tree and print the aggregate result;
//!    - `show`: fetch an issue and print its description as plain text.
//!
//! `FILE` arguments default to stdin; `-` also means stdin.

mod config;
mod drafts;
mod dry_run;
mod telemetry;

use std::io::Read;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::sync::Arc;

use anyhow::Context;
use clap::{Parser, Subcommand};
use tracker::TrackerClient;
use workitems::{Body, CreationOrchestrator, IssueKey, ItemCreator};

use crate::config::{Config, DEFAULT_CONFIG_PATH};
use crate::drafts::parse_drafts;
use crate::dry_run::DryRunCreator;
use crate::telemetry::LogFormat;

/// Key prefix used by `create --dry-run` when no config file is available.
const DRY_RUN_PREFIX: &str = "DRY";

#[derive(Parser)]
#[command(name = "ticketforge")]
#[command(about = "Turn narrative drafts into tracker work-item hierarchies")]
#[command(version)]
struct Cli {
    /// Path to the configuration file
    #[arg(long, global = true, default_value = DEFAULT_CONFIG_PATH)]
    config: PathBuf,

    /// Log output format (logs go to stderr)
    #[arg(long, global = true, value_enum, default_value_t = LogFormat::Text)]
    log_format: LogFormat,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Encode markdown-flavoured text into a rich-document JSON tree
    Encode {
        /// Input text file (default: stdin)
        file: Option<PathBuf>,
    },
    /// Decode rich-document JSON into plain text
    Decode {
        /// Input JSON file (default: stdin)
        file: Option<PathBuf>,
    },
    /// Create a draft ticket tree in the tracker
    Create {
        /// JSON file holding one draft ticket or an array of them
        drafts: PathBuf,

        /// Assign fake keys locally instead of calling the tracker
        #[arg(long)]
        dry_run: bool,
    },
    /// Print an existing issue's description as plain text
    Show {
        /// Issue key, e.g. PROJ-42
        key: String,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();
    let _telemetry = telemetry::init(cli.log_format)?;

    match cli.command {
        Commands::Encode { file } => {
            let text = read_input(file.as_deref())?;
            let document = workitems::encode(&text);
            println!("{}", serde_json::to_string_pretty(&document)?);
        }
        Commands::Decode { file } => {
            let json = read_input(file.as_deref())?;
            let body: Option<Body> =
                serde_json::from_str(&json).context("input is not a rich-document JSON value")?;
            println!("{}", workitems::decode(body.as_ref()));
        }
        Commands::Create { drafts, dry_run } => {
            let text = read_input(Some(&drafts))?;
            let roots = parse_drafts(&text)
                .with_context(|| format!("failed to parse drafts in {}", drafts.display()))?;

            let creator: Arc<dyn ItemCreator> = if dry_run {
                let prefix = match Config::load(&cli.config) {
                    Ok(config) => config.project_key()?.to_string(),
                    Err(error) => {
                        tracing::debug!(%error, "No usable config; using dry-run prefix");
                        DRY_RUN_PREFIX.to_string()
                    }
                };
                Arc::new(DryRunCreator::new(prefix))
            } else {
                Arc::new(tracker_client(&cli.config)?)
            };

            let result = CreationOrchestrator::new(creator).create(&roots).await?;
            println!("{}", serde_json::to_string_pretty(&result)?);
            if !result.success {
                return Ok(ExitCode::FAILURE);
            }
        }
        Commands::Show { key } => {
            let key = IssueKey::new(key).context("issue key must not be empty")?;
            let issue = tracker_client(&cli.config)?.fetch_issue(&key).await?;
            println!("{}: {}", issue.key, issue.summary);
            let description = workitems::decode(issue.description.as_ref());
            if !description.is_empty() {
                println!();
                println!("{description}");
            }
        }
    }

    Ok(ExitCode::SUCCESS)
}

fn tracker_client(config_path: &Path) -> anyhow::Result<TrackerClient> {
    let config = Config::load(config_path)?;
    let settings = config.tracker_settings(|name| std::env::var(name).ok())?;
    Ok(TrackerClient::new(settings)?)
}

fn read_input(path: Option<&Path>) -> anyhow::Result<String> {
    match path {
        Some(path) if path != Path::new("-") => std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display())),
        _ => {
            let mut text = String::new();
            std::io::stdin()
                .read_to_string(&mut text)
                .context("failed to read stdin")?;
            Ok(text)
        }
    }
}
