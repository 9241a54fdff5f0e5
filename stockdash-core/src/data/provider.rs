//! Quote provider trait and structured error types.
//!
//! The QuoteProvider trait abstracts over market-data sources so the
//! batch loader can be exercised against a mock in tests. The production
//! implementation is [`super::yahoo::YahooProvider`].

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Raw daily quote from a data provider, before normalization.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawQuote {
    pub date: NaiveDate,
    pub close: f64,
    pub volume: u64,
}

/// Structured error types for data operations.
///
/// All of these are fatal to the batch job: the loader makes no attempt
/// at retry or per-symbol salvage.
#[derive(Debug, Error)]
pub enum DataError {
    #[error("network unreachable: {0}")]
    NetworkUnreachable(String),

    #[error("provider rejected request: {0}")]
    ProviderError(String),

    #[error("response format changed: {0}")]
    ResponseFormatChanged(String),

    #[error("data error: {0}")]
    Other(String),
}

/// Trait for daily time-series providers.
///
/// `fetch` returns quotes ordered by trading date ascending, restricted
/// to actual trading days in `[start, end]`. An inverted range or an
/// unknown symbol yields an empty sequence, not an error; errors are
/// reserved for network and provider failures.
pub trait QuoteProvider {
    /// Human-readable name of this provider.
    fn name(&self) -> &str;

    /// Fetch daily (date, close, volume) quotes for a symbol.
    fn fetch(
        &self,
        symbol: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<RawQuote>, DataError>;
}

/// Progress callback for multi-symbol batch loads.
///
/// Informational only — not part of the loader's contract.
pub trait FetchProgress {
    /// Called before fetching a symbol.
    fn on_start(&self, symbol: &str, index: usize, total: usize);

    /// Called after a symbol has been fetched and normalized.
    fn on_complete(&self, symbol: &str, index: usize, total: usize, rows: usize);
}

/// Simple progress reporter that prints to stdout.
pub struct StdoutProgress;

impl FetchProgress for StdoutProgress {
    fn on_start(&self, symbol: &str, index: usize, total: usize) {
        println!("[{}/{}] Downloading {symbol}...", index + 1, total);
    }

    fn on_complete(&self, symbol: &str, _index: usize, _total: usize, rows: usize) {
        println!("  OK: {symbol} ({rows} rows)");
    }
}

/// No-op progress reporter for tests and embedding.
pub struct SilentProgress;

impl FetchProgress for SilentProgress {
    fn on_start(&self, _symbol: &str, _index: usize, _total: usize) {}
    fn on_complete(&self, _symbol: &str, _index: usize, _total: usize, _rows: usize) {}
}
