mod calendar;
mod commands;
mod config;
mod notion;
mod render;

use std::path::PathBuf;

use anyhow::Result;
use chrono::NaiveDate;
use clap::Parser;
use simplelog::{ColorChoice, Config as LogConfig, LevelFilter, TermLogger, TerminalMode};

use crate::config::Config;

#[derive(Parser)]
#[command(name = "agenda")]
#[command(about = "Fuzzy-search your task database and list the day's events")]
struct Cli {
    /// Free-text query ranked against your open tasks
    query: Option<String>,

    /// Number of search results to return
    #[arg(short, long, default_value_t = 3)]
    k: usize,

    /// Print tasks due by tomorrow and the day's calendar events
    #[arg(long)]
    today: bool,

    /// Reference date for --today (YYYY-MM-DD, defaults to the current day)
    #[arg(long, requires = "today")]
    date: Option<String>,

    /// Path to the config file
    #[arg(long, default_value = ".config.json")]
    config: PathBuf,

    /// Show adapter chatter (repeat for debug output)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(cli.verbose);

    if cli.query.is_none() && !cli.today {
        anyhow::bail!("Nothing to do. Pass a search query, --today, or both.");
    }

    let config = Config::load(&cli.config)?;

    if let Some(query) = &cli.query {
        commands::search::run(&config, query, cli.k).await?;
    }

    if cli.today {
        if cli.query.is_some() {
            println!();
        }
        let date = match &cli.date {
            Some(raw) => parse_date(raw)?,
            None => chrono::Local::now().date_naive(),
        };
        commands::today::run(&config, date).await?;
    }

    Ok(())
}

/// One-shot process-wide logging setup; never reconfigured afterwards.
fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        _ => LevelFilter::Debug,
    };
    let _ = TermLogger::init(
        level,
        LogConfig::default(),
        TerminalMode::Stderr,
        ColorChoice::Auto,
    );
}

fn parse_date(raw: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .map_err(|_| anyhow::anyhow!("Invalid date format '{}'. Expected YYYY-MM-DD", raw))
}
