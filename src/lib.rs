//! iex-rs: batch client for the IEX market-data API.
//!
//! Symbols, company attributes, earnings, financial statements and closing
//! prices are fetched in batches of up to 100 tickers and merged into tables
//! keyed by ticker. [`market_table`] runs the whole pipeline and returns the
//! market-capitalization feature table.
//!
//! ```no_run
//! # async fn run() -> Result<(), iex_rs::IexError> {
//! let client = iex_rs::IexClient::default();
//! let table = iex_rs::market_table(&client).await?;
//! table.write_csv(std::io::stdout(), true)?;
//! # Ok(())
//! # }
//! ```

pub mod assemble;
pub mod company;
pub mod core;
pub mod earnings;
pub mod financials;
pub mod prices;
pub mod symbols;
pub mod table;

pub use assemble::{MarketTableBuilder, MarketTableParts, market_table};
pub use company::{CompanyInfoBuilder, company_info};
pub use crate::core::{
    BatchQuery, BatchResponse, Cell, ChartRange, IexClient, IexClientBuilder, IexError,
    InstrumentType, MissingReason, Period, Row, chunked,
};
pub use earnings::EarningsBuilder;
pub use financials::FinancialsBuilder;
pub use prices::{PriceHistoryBuilder, price_history};
pub use symbols::{SymbolEntry, SymbolUniverse, SymbolsBuilder, symbols};
pub use table::{AttributeTable, CompositeTable, PriceTable};

#[cfg(feature = "dataframe")]
pub use crate::core::dataframe::ToDataFrame;
