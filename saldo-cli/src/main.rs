use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use saldo_core::RawTransaction;
use saldo_finance::{AnalyzeOptions, analyze};
use saldo_ingest::load_feed_file;
use std::path::PathBuf;
use std::time::Duration;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

mod client;
mod config;
mod report;
mod state;

use client::ReportClient;
use config::Config;

#[derive(Parser, Debug)]
#[command(
    name = "saldo",
    version,
    long_version = concat!(env!("CARGO_PKG_VERSION"), " (", env!("SALDO_BUILD_SHA"), ")"),
    about = "Bank statement analytics"
)]
struct Cli {
    /// Debug logging (RUST_LOG takes precedence)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Analyze a local JSON feed or master CSV report
    Analyze {
        /// Path to a .json feed or ';'-delimited .csv master report
        #[arg(long)]
        file: PathBuf,

        /// Year assigned to statement dates (default: config, then current year)
        #[arg(long)]
        year: Option<i32>,

        /// Print the summary as JSON
        #[arg(long)]
        json: bool,
    },

    /// Fetch the current report from the report service and analyze it
    Fetch {
        /// Service base URL (default: from config)
        #[arg(long)]
        url: Option<String>,

        #[arg(long)]
        year: Option<i32>,

        #[arg(long)]
        json: bool,
    },

    /// Ask the report service to rebuild its report, then fetch and analyze it
    Refresh {
        #[arg(long)]
        url: Option<String>,

        #[arg(long)]
        year: Option<i32>,

        #[arg(long)]
        json: bool,
    },

    /// Manage ~/.saldo/config.toml
    Config {
        #[command(subcommand)]
        command: ConfigCommand,
    },
}

#[derive(Subcommand, Debug)]
enum ConfigCommand {
    /// Write a default config if none exists
    Init,
    /// Print the effective config
    Show,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // RUST_LOG > --verbose > info
    let filter = if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };
    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr)
                .compact(),
        )
        .init();

    match cli.command {
        Command::Analyze { file, year, json } => {
            if !file.exists() {
                bail!("file not found: {}", file.display());
            }
            let cfg = config::load_config()?;
            let raw = load_feed_file(&file).with_context(|| format!("loading {}", file.display()))?;
            print_summary(&raw, resolve_year(year, &cfg), json)?;
        }

        Command::Fetch { url, year, json } => {
            let cfg = config::load_config()?;
            let client = build_client(url, &cfg)?;
            let raw = client.fetch_rows().await?;
            print_summary(&raw, resolve_year(year, &cfg), json)?;
        }

        Command::Refresh { url, year, json } => {
            let cfg = config::load_config()?;
            let client = build_client(url, &cfg)?;
            let raw = client.refresh_and_fetch().await?;
            print_summary(&raw, resolve_year(year, &cfg), json)?;
        }

        Command::Config { command } => match command {
            ConfigCommand::Init => config::init_config()?,
            ConfigCommand::Show => config::show_config()?,
        },
    }

    Ok(())
}

fn build_client(url: Option<String>, cfg: &Config) -> Result<ReportClient> {
    let base = url.unwrap_or_else(|| cfg.server.base_url.clone());
    ReportClient::new(&base, Duration::from_secs(cfg.server.timeout_secs))
}

/// Flag, then config, then the current local year.
fn resolve_year(flag: Option<i32>, cfg: &Config) -> AnalyzeOptions {
    match flag.or(cfg.analysis.year) {
        Some(year) => AnalyzeOptions::for_year(year),
        None => AnalyzeOptions::current(),
    }
}

fn print_summary(raw: &[RawTransaction], options: AnalyzeOptions, json: bool) -> Result<()> {
    let summary = analyze(raw, &options);
    tracing::info!(
        year = options.year,
        records = summary.record_count,
        invalid = summary.invalid_count,
        "analysis complete"
    );
    if json {
        println!("{}", report::render_json(&summary)?);
    } else {
        print!("{}", report::render_text(&summary));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_analyze() {
        let cli = Cli::try_parse_from(["saldo", "analyze", "--file", "feed.json", "--year", "2024", "--json"])
            .unwrap();
        match cli.command {
            Command::Analyze { file, year, json } => {
                assert_eq!(file, PathBuf::from("feed.json"));
                assert_eq!(year, Some(2024));
                assert!(json);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_verbose_is_global() {
        let cli = Cli::try_parse_from(["saldo", "fetch", "-v"]).unwrap();
        assert!(cli.verbose);
        assert!(matches!(cli.command, Command::Fetch { url: None, year: None, json: false }));
    }

    #[test]
    fn test_analyze_requires_file() {
        assert!(Cli::try_parse_from(["saldo", "analyze"]).is_err());
    }

    #[test]
    fn test_resolve_year_precedence() {
        let mut cfg = Config::default();
        cfg.analysis.year = Some(2023);
        assert_eq!(resolve_year(Some(2025), &cfg).year, 2025);
        assert_eq!(resolve_year(None, &cfg).year, 2023);
        cfg.analysis.year = None;
        assert_eq!(resolve_year(None, &cfg), AnalyzeOptions::current());
    }
}
