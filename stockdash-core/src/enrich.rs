//! Reference joiner — static company/sector metadata and sector benchmarks.
//!
//! Two left joins on top of the persisted table: symbol → company/sector,
//! then sector → average sector return. The lookup tables are injected so
//! the joiner can be exercised against arbitrary universes; the benchmark
//! returns are constants, never recomputed from data.

use crate::domain::PriceRow;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Static metadata for one symbol.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompanyMeta {
    pub company: String,
    pub sector: String,
}

/// A [`PriceRow`] enriched with lookup metadata.
///
/// Unmatched symbols and sectors yield `None` fields; rows are never
/// dropped by the join.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnrichedRow {
    pub row: PriceRow,
    pub company: Option<String>,
    pub sector: Option<String>,
    pub avg_sector_return: Option<f64>,
}

/// Injectable lookup tables for the reference joiner.
#[derive(Debug, Clone, Default)]
pub struct ReferenceTables {
    companies: BTreeMap<String, CompanyMeta>,
    sector_returns: BTreeMap<String, f64>,
}

impl ReferenceTables {
    pub fn new(
        companies: BTreeMap<String, CompanyMeta>,
        sector_returns: BTreeMap<String, f64>,
    ) -> Self {
        Self {
            companies,
            sector_returns,
        }
    }

    /// The fixed five-symbol tech universe with its per-sector benchmark
    /// returns.
    pub fn default_universe() -> Self {
        let companies = [
            ("AAPL", "Apple", "Consumer Tech"),
            ("MSFT", "Microsoft", "Cloud & AI"),
            ("GOOG", "Google", "Internet"),
            ("AMZN", "Amazon", "E-commerce"),
            ("NVDA", "NVIDIA", "Semiconductors"),
        ]
        .into_iter()
        .map(|(sym, company, sector)| {
            (
                sym.to_string(),
                CompanyMeta {
                    company: company.to_string(),
                    sector: sector.to_string(),
                },
            )
        })
        .collect();

        let sector_returns = [
            ("Consumer Tech", 0.0011),
            ("Cloud & AI", 0.0014),
            ("Internet", 0.0009),
            ("E-commerce", 0.0012),
            ("Semiconductors", 0.0017),
        ]
        .into_iter()
        .map(|(sector, ret)| (sector.to_string(), ret))
        .collect();

        Self::new(companies, sector_returns)
    }

    /// Metadata for one symbol, if present.
    pub fn company(&self, symbol: &str) -> Option<&CompanyMeta> {
        self.companies.get(symbol)
    }

    /// Benchmark return for one sector, if present.
    pub fn sector_return(&self, sector: &str) -> Option<f64> {
        self.sector_returns.get(sector).copied()
    }

    /// Left-join every row against the lookup tables.
    ///
    /// Output row count always equals input row count.
    pub fn enrich(&self, rows: &[PriceRow]) -> Vec<EnrichedRow> {
        rows.iter()
            .map(|row| {
                let meta = self.companies.get(&row.symbol);
                let sector = meta.map(|m| m.sector.clone());
                let avg_sector_return = sector
                    .as_deref()
                    .and_then(|s| self.sector_returns.get(s).copied());
                EnrichedRow {
                    row: row.clone(),
                    company: meta.map(|m| m.company.clone()),
                    sector,
                    avg_sector_return,
                }
            })
            .collect()
    }
}
