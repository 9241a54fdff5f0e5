//! Canonical row types shared by the ETL pipeline and the analytics layer.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One (symbol, trading day) observation after normalization.
///
/// `ret` is the fractional change of `close` relative to the previous
/// trading day for the same symbol; it is `None` for each symbol's first
/// row because no prior close exists. Rows are immutable once produced by
/// the normalizer and are replaced wholesale on the next batch load.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceRow {
    pub date: NaiveDate,
    pub close: f64,
    pub volume: u64,
    pub symbol: String,
    #[serde(rename = "return")]
    pub ret: Option<f64>,
}

/// Ordered concatenation of [`PriceRow`]s across all requested symbols.
///
/// Symbol grouping is preserved (each symbol's rows are contiguous and
/// chronologically ordered); no cross-symbol sort is guaranteed.
pub type UnifiedTable = Vec<PriceRow>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn return_field_serializes_under_wire_name() {
        let row = PriceRow {
            date: NaiveDate::from_ymd_opt(2024, 1, 2).unwrap(),
            close: 101.5,
            volume: 1200,
            symbol: "AAPL".into(),
            ret: Some(0.015),
        };
        let json = serde_json::to_string(&row).unwrap();
        assert!(json.contains("\"return\":0.015"));
        assert!(!json.contains("\"ret\""));

        let back: PriceRow = serde_json::from_str(&json).unwrap();
        assert_eq!(back, row);
    }

    #[test]
    fn null_return_roundtrips() {
        let row = PriceRow {
            date: NaiveDate::from_ymd_opt(2024, 1, 2).unwrap(),
            close: 100.0,
            volume: 0,
            symbol: "MSFT".into(),
            ret: None,
        };
        let json = serde_json::to_string(&row).unwrap();
        let back: PriceRow = serde_json::from_str(&json).unwrap();
        assert_eq!(back.ret, None);
    }
}
