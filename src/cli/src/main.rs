//! CLI for the badge fetcher.
//!
//! Resolves a GitHub folder or file URL and prints the badges found there as
//! JSON on stdout. Logs go to stderr.

use badge_fetcher::{
    load_settings, validate_token, BadgeFetcher, BadgeReport, ConfigError, FailurePolicy,
    FetcherConfig, FetcherError, RepositoryUrl, Settings,
};
use clap::{Parser, Subcommand};
use serde::Serialize;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::error;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};
use url::Url;

/// Badge Fetcher - Read `-badge.json` documents from a GitHub repository.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to a TOML settings file.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// GitHub Personal Access Token.
    #[arg(long, env = "GITHUB_TOKEN", global = true, hide_env_values = true)]
    token: Option<String>,

    /// REST API base URL (defaults to the one matching the URL host).
    #[arg(long, global = true)]
    api_base: Option<Url>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List candidate badge files under a folder URL.
    List {
        /// Folder URL, e.g. https://github.com/org/repo/tree/main/badges.
        url: String,

        /// Include files without the `-badge.json` suffix.
        #[arg(long)]
        all: bool,
    },

    /// Fetch and parse every badge under a folder URL.
    Fetch {
        /// Folder URL, e.g. https://github.com/org/repo/tree/main/badges.
        url: String,

        /// Record failing badge files and continue.
        #[arg(long)]
        keep_going: bool,
    },

    /// Fetch a single badge from its file URL.
    Get {
        /// File URL, e.g. https://github.com/org/repo/blob/main/badges/ci-badge.json.
        url: String,
    },
}

impl Command {
    fn url(&self) -> &str {
        match self {
            Self::List { url, .. } | Self::Fetch { url, .. } | Self::Get { url } => url,
        }
    }
}

/// Errors surfaced by the CLI.
#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error(transparent)]
    Fetcher(#[from] FetcherError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Locator(#[from] badge_fetcher::LocatorError),

    #[error("Failed to serialize output: {0}")]
    Output(#[from] serde_json::Error),
}

#[tokio::main]
async fn main() -> ExitCode {
    init_tracing();

    let args = Args::parse();

    match run(args).await {
        Ok(Some(report)) => {
            print_summary(&report);
            if report.summary.has_failures() {
                ExitCode::from(1)
            } else {
                ExitCode::from(0)
            }
        }
        Ok(None) => ExitCode::from(0),
        Err(e) => {
            error!(error = %e, "Critical failure");
            ExitCode::from(2)
        }
    }
}

/// Initializes tracing with environment filter support.
///
/// Output goes to stderr so stdout carries only JSON. The level is taken
/// from `RUST_LOG` and falls back to "info".
fn init_tracing() {
    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .compact()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();
}

/// Main execution logic. Returns the report for `fetch` so the caller can
/// pick an exit code.
async fn run(args: Args) -> Result<Option<BadgeReport>, CliError> {
    let settings = match &args.config {
        Some(path) => load_settings(path)?,
        None => Settings::default(),
    };
    let config = build_config(&args, settings)?;
    let fetcher = BadgeFetcher::new(config)?;

    match args.command {
        Command::List { url, all } => {
            let light_badges = fetcher.light_badges(&url).await?;
            let light_badges: Vec<_> = light_badges
                .into_iter()
                .filter(|light_badge| all || light_badge.is_badge_file())
                .collect();
            print_json(&light_badges)?;
            Ok(None)
        }
        Command::Fetch { url, .. } => {
            let report = fetcher.collect(&url).await?;
            print_json(&report.badges)?;
            Ok(Some(report))
        }
        Command::Get { url } => {
            let badge = fetcher.badge(&url).await?;
            print_json(&badge)?;
            Ok(None)
        }
    }
}

/// Merges the settings file with command line flags; flags win.
fn build_config(args: &Args, settings: Settings) -> Result<FetcherConfig, CliError> {
    let mut config = FetcherConfig::from_settings(settings)?;

    if let Some(token) = &args.token {
        validate_token(token).map_err(|message| ConfigError::Invalid {
            origin: "--token / GITHUB_TOKEN".to_string(),
            message,
        })?;
        config = config.with_token(token.clone());
    }

    if let Some(api_base) = &args.api_base {
        config = config.with_api_base(api_base.clone());
    } else if config.api_base().is_none() {
        let url = RepositoryUrl::parse(args.command.url())?;
        config = config.with_api_base(url.api_base().clone());
    }

    if let Command::Fetch {
        keep_going: true, ..
    } = args.command
    {
        config = config.with_failure_policy(FailurePolicy::KeepGoing);
    }

    Ok(config)
}

fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<(), CliError> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// Prints the fetch summary to stderr.
fn print_summary(report: &BadgeReport) {
    let summary = &report.summary;
    eprintln!("\nSummary:");
    eprintln!("  Files found: {}", summary.candidates);
    eprintln!("  Badges fetched: {}", summary.fetched);
    eprintln!("  Files skipped: {}", summary.skipped);
    eprintln!("  Badges failed: {}", summary.failed);

    for outcome in &report.outcomes {
        if let badge_fetcher::FetchOutcome::Failed { path, error } = outcome {
            eprintln!("    {path}: {error}");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FOLDER_URL: &str = "https://ghe.example.com/acme/site/tree/main/badges";

    fn args(extra: &[&str]) -> Args {
        let mut argv = vec!["badge-fetcher-cli"];
        argv.extend_from_slice(extra);
        Args::try_parse_from(argv).unwrap()
    }

    #[test]
    fn blank_token_flag_is_rejected() {
        let args = args(&["--token", "  ", "list", FOLDER_URL]);

        let result = build_config(&args, Settings::default());

        assert!(matches!(
            result,
            Err(CliError::Config(ConfigError::Invalid { .. }))
        ));
    }

    #[test]
    fn token_flag_overrides_settings() {
        let args = args(&["--token", "from-flag", "fetch", "--keep-going", FOLDER_URL]);
        let settings = Settings {
            token: Some("from-file".to_string()),
            ..Settings::default()
        };

        let config = build_config(&args, settings).unwrap();

        assert_eq!(config.token(), Some("from-flag"));
        assert_eq!(config.failure_policy(), FailurePolicy::KeepGoing);
    }

    #[test]
    fn api_base_is_derived_from_url_host() {
        let args = args(&["--token", "t", "get", FOLDER_URL]);

        let config = build_config(&args, Settings::default()).unwrap();

        assert_eq!(
            config.api_base().map(Url::as_str),
            Some("https://ghe.example.com/api/v3")
        );
    }
}
