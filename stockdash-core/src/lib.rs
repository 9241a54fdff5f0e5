//! StockDash Core — ETL + analytics for the stock dashboard.
//!
//! This crate contains the reusable core behind the batch job and the
//! dashboard:
//! - Canonical row types (price rows, the unified table)
//! - Quote provider boundary (Yahoo Finance, mockable trait)
//! - Series normalizer and sequential batch loader
//! - SQLite store with full-replace write semantics
//! - Reference joiner over injectable company/sector lookup tables
//! - Analytics engine (volatility, mean return, risk ratio, OLS trend)
//! - Best-effort headline fetcher with error-to-placeholder degradation
//!
//! Presentation concerns — charting, CSV export, page layout — live
//! outside this crate and consume its outputs.

pub mod analytics;
pub mod data;
pub mod domain;
pub mod enrich;
pub mod news;
pub mod store;
