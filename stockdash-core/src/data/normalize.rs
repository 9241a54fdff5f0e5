//! Series normalization — raw provider quotes into canonical [`PriceRow`]s.

use super::provider::RawQuote;
use crate::domain::PriceRow;

/// Reshape one fetched series into canonical rows and compute the
/// period-over-period return.
///
/// `ret[i] = close[i] / close[i-1] - 1` against the immediately
/// preceding row of the same sequence; the first row has no prior value
/// and carries `None`. Pure function: deterministic, no I/O.
pub fn normalize(raw: &[RawQuote], symbol: &str) -> Vec<PriceRow> {
    let mut rows = Vec::with_capacity(raw.len());
    let mut prev_close: Option<f64> = None;

    for quote in raw {
        let ret = prev_close.map(|prev| quote.close / prev - 1.0);
        rows.push(PriceRow {
            date: quote.date,
            close: quote.close,
            volume: quote.volume,
            symbol: symbol.to_string(),
            ret,
        });
        prev_close = Some(quote.close);
    }

    rows
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn quote(day: u32, close: f64, volume: u64) -> RawQuote {
        RawQuote {
            date: NaiveDate::from_ymd_opt(2024, 1, day).unwrap(),
            close,
            volume,
        }
    }

    #[test]
    fn first_row_return_is_none() {
        let rows = normalize(&[quote(1, 100.0, 1000)], "X");
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].ret, None);
        assert_eq!(rows[0].symbol, "X");
    }

    #[test]
    fn returns_are_fractional_changes() {
        let rows = normalize(
            &[quote(1, 100.0, 1000), quote(2, 110.0, 1200), quote(3, 99.0, 900)],
            "X",
        );

        assert_eq!(rows[0].ret, None);
        assert!((rows[1].ret.unwrap() - 0.10).abs() < 1e-12);
        assert!((rows[2].ret.unwrap() - (-0.10)).abs() < 1e-12);
    }

    #[test]
    fn symbol_attached_to_every_row() {
        let rows = normalize(&[quote(1, 100.0, 0), quote(2, 101.0, 0)], "AAPL");
        assert!(rows.iter().all(|r| r.symbol == "AAPL"));
    }

    #[test]
    fn empty_input_yields_empty_output() {
        assert!(normalize(&[], "X").is_empty());
    }

    #[test]
    fn deterministic_given_identical_input() {
        let raw = vec![quote(1, 100.0, 10), quote(2, 103.5, 20)];
        assert_eq!(normalize(&raw, "X"), normalize(&raw, "X"));
    }
}
