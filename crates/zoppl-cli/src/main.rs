mod presenter;

use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::Context;
use clap::{CommandFactory, Parser, Subcommand};
use tracing_subscriber::EnvFilter;
use zoppl_core::{AppConfig, ConfigError, FacetKind};
use zoppl_finder::{FinderClient, SearchSession, SearchState};

use crate::presenter::TerminalPresenter;

#[derive(Debug, Parser)]
#[command(name = "zoppl-cli")]
#[command(about = "Find shoppable matches for a clothing photo")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Upload a photo to the analysis service and list matching products
    Find {
        /// Image file (png, jpg, jpeg, gif or webp)
        image: PathBuf,
        /// Facet key to apply to the results, e.g. `zara`, `midi`, `black`
        #[arg(long)]
        filter: Option<String>,
    },
    /// Present a saved analysis response without contacting the service
    Replay {
        /// JSON file holding a response body
        response: PathBuf,
        #[arg(long)]
        filter: Option<String>,
    },
}

/// Used when the configuration cannot be loaded and `RUST_LOG` is unset.
const FALLBACK_LOG_LEVEL: &str = "info";

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();

    let config = zoppl_core::load_app_config();
    let log_level = config
        .as_ref()
        .map_or(FALLBACK_LOG_LEVEL, |config| config.log_level.as_str());
    let env_filter =
        EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new(log_level))?;
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    let Some(command) = cli.command else {
        Cli::command().print_help()?;
        return Ok(ExitCode::SUCCESS);
    };

    let mut presenter = TerminalPresenter::new(std::io::stdout().lock());
    let succeeded = run(command, config, &mut presenter).await?;
    Ok(if succeeded {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}

/// Executes one command against a fresh session and reports whether it
/// succeeded. Failures already shown through the presenter yield `Ok(false)`.
///
/// Only `find` needs a valid configuration; `replay` works offline whatever
/// the environment holds.
async fn run<W: Write>(
    command: Commands,
    config: Result<AppConfig, ConfigError>,
    presenter: &mut TerminalPresenter<W>,
) -> anyhow::Result<bool> {
    let mut session = SearchSession::new();

    let outcome = match command {
        Commands::Find { image, filter } => {
            let config = config?;
            let client = FinderClient::from_config(&config)?;
            tracing::info!(
                env = %config.env,
                endpoint = %client.endpoint(),
                image = %image.display(),
                "submitting image"
            );
            session
                .submit(&client, &image, config.max_image_bytes, presenter)
                .await
                .map(|()| filter)
        }
        Commands::Replay { response, filter } => {
            if let Err(err) = &config {
                tracing::debug!(error = %err, "configuration not needed for replay");
            }
            let data = read_response(&response)?;
            session.handle_response(&data, presenter).map(|()| filter)
        }
    };

    let succeeded = match outcome {
        Ok(filter) => {
            if let Some(term) = session.state().and_then(SearchState::search_term) {
                presenter.note(&format!("Search: {term}"));
            }
            if let Some(key) = filter {
                apply_filter(&mut session, &key, presenter);
            }
            true
        }
        Err(_) => false,
    };
    presenter.finish();
    Ok(succeeded)
}

fn read_response(path: &Path) -> anyhow::Result<serde_json::Value> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    serde_json::from_str(&raw).with_context(|| format!("{} is not valid JSON", path.display()))
}

/// Narrows non-empty results to `key`. An empty result set was already
/// reported as such and is left alone.
fn apply_filter<W: Write>(
    session: &mut SearchSession,
    key: &str,
    presenter: &mut TerminalPresenter<W>,
) {
    let Some(state) = session.state() else {
        return;
    };
    if state.is_empty() {
        return;
    }
    let retailer_key = matches!(FacetKind::from_key(key), Some(FacetKind::Retailer(_)) | None);
    if retailer_key && !state.offers(key) {
        tracing::warn!(filter = key, "filter is not offered for these results");
    }
    session.select_facet(key, presenter);
}
