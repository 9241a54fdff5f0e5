//! Data acquisition: provider boundary, normalization, batch loading.

pub mod batch;
pub mod normalize;
pub mod provider;
pub mod yahoo;

pub use batch::load_all;
pub use normalize::normalize;
pub use provider::{DataError, FetchProgress, QuoteProvider, RawQuote, SilentProgress, StdoutProgress};
pub use yahoo::YahooProvider;
