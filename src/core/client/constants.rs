//! Centralized constants for default endpoints and UA.

/// Identifies the client to the API.
pub(crate) const USER_AGENT: &str = concat!("iex-rs/", env!("CARGO_PKG_VERSION"));

/// IEX batch endpoint (market-wide; symbols go in the query string).
pub(crate) const DEFAULT_BASE_BATCH: &str = "https://api.iextrading.com/1.0/stock/market/batch";

/// IEX reference-data endpoint listing every supported symbol.
pub(crate) const DEFAULT_BASE_REF_DATA: &str = "https://api.iextrading.com/1.0/ref-data/symbols";

/// Largest number of symbols the batch endpoint accepts per request.
pub(crate) const DEFAULT_BATCH_SIZE: usize = 100;
