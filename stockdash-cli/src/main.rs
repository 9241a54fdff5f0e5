//! StockDash CLI — batch ETL and analysis commands.
//!
//! Commands:
//! - `load` — download the configured symbols from Yahoo Finance and
//!   replace the SQLite table with the fresh unified table
//! - `analyze` — read the store, join reference metadata, filter one
//!   symbol and date window, and print the derived metrics

mod config;

use anyhow::{bail, Context, Result};
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use stockdash_core::analytics::analyze;
use stockdash_core::data::{load_all, StdoutProgress, YahooProvider};
use stockdash_core::enrich::{EnrichedRow, ReferenceTables};
use stockdash_core::news::HeadlineFetcher;
use stockdash_core::store::SqliteStore;

use config::AppConfig;

const TABLE_NAME: &str = "stock_data";

#[derive(Parser)]
#[command(name = "stockdash", about = "StockDash CLI — stock ETL and trend analysis")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Download configured symbols and replace the store table.
    Load {
        /// Path to the TOML config file.
        #[arg(long, default_value = "config.toml")]
        config: PathBuf,
    },
    /// Analyze one symbol over a date window from the store.
    Analyze {
        /// Path to the TOML config file.
        #[arg(long, default_value = "config.toml")]
        config: PathBuf,

        /// Symbol to analyze (e.g. AAPL).
        #[arg(long)]
        symbol: String,

        /// Window start (YYYY-MM-DD). Defaults to the earliest stored date.
        #[arg(long)]
        start: Option<String>,

        /// Window end (YYYY-MM-DD). Defaults to the latest stored date.
        #[arg(long)]
        end: Option<String>,

        /// Skip the headline fetch (no network access).
        #[arg(long, default_value_t = false)]
        no_news: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Load { config } => run_load(&config),
        Commands::Analyze {
            config,
            symbol,
            start,
            end,
            no_news,
        } => run_analyze(&config, &symbol, start.as_deref(), end.as_deref(), no_news),
    }
}

fn run_load(config_path: &PathBuf) -> Result<()> {
    let config = AppConfig::from_file(config_path)
        .with_context(|| format!("loading config from {}", config_path.display()))?;

    let provider = YahooProvider::new();
    let symbols: Vec<&str> = config.tickers.iter().map(|s| s.as_str()).collect();

    let table = load_all(
        &provider,
        &symbols,
        config.start_date,
        config.end_date,
        &StdoutProgress,
    )
    .context("batch download failed")?;

    let mut store = SqliteStore::open(&config.database_path)
        .with_context(|| format!("opening store at {}", config.database_path.display()))?;
    store
        .replace_table(TABLE_NAME, &table)
        .context("persisting unified table")?;

    println!();
    println!(
        "Data loaded into database: {}",
        config.database_path.display()
    );
    println!("Table: {TABLE_NAME} ({} rows)", table.len());

    Ok(())
}

fn run_analyze(
    config_path: &PathBuf,
    symbol: &str,
    start: Option<&str>,
    end: Option<&str>,
    no_news: bool,
) -> Result<()> {
    let config = AppConfig::from_file(config_path)
        .with_context(|| format!("loading config from {}", config_path.display()))?;

    let store = SqliteStore::open(&config.database_path)
        .with_context(|| format!("opening store at {}", config.database_path.display()))?;
    let table = store
        .load_table(TABLE_NAME)
        .context("reading the store — run `stockdash load` first")?;

    let enriched = ReferenceTables::default_universe().enrich(&table);
    let symbol_rows: Vec<&EnrichedRow> = enriched
        .iter()
        .filter(|e| e.row.symbol == symbol)
        .collect();

    if symbol_rows.is_empty() {
        bail!("no stored rows for symbol '{symbol}'");
    }

    // Window defaults to the full stored range for the symbol.
    let window_start = match start {
        Some(s) => parse_date(s)?,
        None => symbol_rows.iter().map(|e| e.row.date).min().unwrap(),
    };
    let window_end = match end {
        Some(s) => parse_date(s)?,
        None => symbol_rows.iter().map(|e| e.row.date).max().unwrap(),
    };

    let price_rows: Vec<_> = symbol_rows.iter().map(|e| e.row.clone()).collect();
    let result = analyze(&price_rows, window_start, window_end);

    let headline = if no_news {
        None
    } else {
        Some(HeadlineFetcher::new().fetch_headline(symbol).display_text())
    };

    let first = symbol_rows[0];
    println!();
    println!("=== {symbol} Stock Analysis ===");
    println!("Period:            {window_start} to {window_end}");
    println!(
        "Company:           {} | Sector: {}",
        first.company.as_deref().unwrap_or("(unknown)"),
        first.sector.as_deref().unwrap_or("(unknown)")
    );
    match first.avg_sector_return {
        Some(r) => println!("Avg Sector Return: {r:.4}"),
        None => println!("Avg Sector Return: (n/a)"),
    }
    println!("Volatility:        {:.4}", result.volatility);
    println!("Mean Return:       {:.4}", result.mean_return);
    println!("Risk Ratio:        {:.2}", result.risk_ratio);
    match &result.trend {
        Some(trend) => {
            println!("Regression Slope:  {:.4}", trend.slope);
            println!("R² Score:          {:.3}", trend.r_squared);
        }
        None => println!("Trend:             (window too small to fit)"),
    }
    if let Some(text) = headline {
        println!("Latest Headline:   {text}");
    }
    println!();

    Ok(())
}

fn parse_date(s: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .with_context(|| format!("invalid date '{s}', expected YYYY-MM-DD"))
}
