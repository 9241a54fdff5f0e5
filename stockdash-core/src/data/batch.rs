//! Batch loader — coordinates multi-symbol fetches into one unified table.

use super::normalize::normalize;
use super::provider::{DataError, FetchProgress, QuoteProvider};
use crate::domain::UnifiedTable;
use chrono::NaiveDate;

/// Fetch and normalize every symbol, concatenating the results in
/// caller-supplied order.
///
/// A failure fetching any one symbol is fatal to the entire batch: no
/// partial-success mode, no per-symbol error isolation. This is a
/// deliberate simplification, matching the all-or-nothing persistence
/// that follows.
pub fn load_all(
    provider: &dyn QuoteProvider,
    symbols: &[&str],
    start: NaiveDate,
    end: NaiveDate,
    progress: &dyn FetchProgress,
) -> Result<UnifiedTable, DataError> {
    let total = symbols.len();
    let mut table = UnifiedTable::new();

    for (i, symbol) in symbols.iter().enumerate() {
        progress.on_start(symbol, i, total);
        let raw = provider.fetch(symbol, start, end)?;
        let rows = normalize(&raw, symbol);
        progress.on_complete(symbol, i, total, rows.len());
        table.extend(rows);
    }

    Ok(table)
}
