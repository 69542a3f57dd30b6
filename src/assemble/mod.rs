//! The market-capitalization feature table: every fetcher, joined on ticker.

use crate::company::CompanyInfoBuilder;
use crate::core::{Cell, ChartRange, IexClient, IexError, InstrumentType, Period};
use crate::financials::FinancialsBuilder;
use crate::prices::PriceHistoryBuilder;
use crate::symbols::{SymbolUniverse, SymbolsBuilder};
use crate::table::{AttributeTable, CompositeTable, PriceTable};

pub const SHARES_OUTSTANDING: &str = "sharesOutstanding";
pub const AVG_PRICE: &str = "avgPrice";
pub const MARKET_CAP: &str = "marketCap";

const TOTAL_DEBT: &str = "totalDebt";
const TOTAL_LIABILITIES: &str = "totalLiabilities";

/// Builds the market table with the default configuration.
///
/// # Errors
///
/// See [`MarketTableBuilder::build`].
pub async fn market_table(client: &IexClient) -> Result<CompositeTable, IexError> {
    MarketTableBuilder::new(client).build().await
}

/// The intermediate tables the market table is joined from.
#[derive(Debug, Clone)]
pub struct MarketTableParts {
    pub universe: SymbolUniverse,
    pub company: AttributeTable,
    pub shares: AttributeTable,
    pub financials: AttributeTable,
    pub prices: PriceTable,
}

impl MarketTableParts {
    /// Joins the parts into one ticker-indexed table.
    ///
    /// Company info (one-hot encoded on `categorical`), financials, shares and
    /// mean close are outer-joined in that order. `marketCap` is
    /// `sharesOutstanding * avgPrice` and both operands are dropped afterwards.
    ///
    /// # Errors
    ///
    /// Returns `IexError::UnknownColumn` / `IexError::DuplicateColumn` if the parts
    /// do not carry the expected columns.
    pub fn assemble(&self, categorical: &[&str]) -> Result<CompositeTable, IexError> {
        let avg = CompositeTable::from_series(AVG_PRICE, self.prices.mean_by_symbol());

        CompositeTable::from(&self.company)
            .one_hot(categorical)?
            .join_attributes(&self.financials)?
            .join_attributes(&self.shares)?
            .outer_join(&avg)?
            .derive_product(MARKET_CAP, SHARES_OUTSTANDING, AVG_PRICE)?
            .drop_columns(&[SHARES_OUTSTANDING, AVG_PRICE])
    }
}

/// A builder for the whole pipeline.
#[derive(Debug)]
pub struct MarketTableBuilder {
    client: IexClient,
    kind: InstrumentType,
    company_fields: Vec<String>,
    categorical: Vec<String>,
    shares_category: String,
    period: Period,
    range: ChartRange,
    combine_debt: bool,
}

impl MarketTableBuilder {
    pub fn new(client: &IexClient) -> Self {
        Self {
            client: client.clone(),
            kind: InstrumentType::CommonStock,
            company_fields: vec!["industry".into(), "sector".into()],
            categorical: vec!["industry".into(), "sector".into()],
            shares_category: "stats".into(),
            period: Period::Annual,
            range: ChartRange::Y1,
            combine_debt: false,
        }
    }

    /// Extra `company` fields carried as-is (e.g. `companyName`).
    #[must_use]
    pub fn extra_company_fields<I, S>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.company_fields.extend(fields.into_iter().map(Into::into));
        self
    }

    /// Financial-statement period. Default: annual.
    #[must_use]
    pub const fn period(mut self, period: Period) -> Self {
        self.period = period;
        self
    }

    /// Price look-back for the average close. Default: one year.
    #[must_use]
    pub const fn range(mut self, range: ChartRange) -> Self {
        self.range = range;
        self
    }

    /// Fold `totalLiabilities` into `totalDebt` and drop it. Missing liabilities
    /// count as zero; a missing `totalDebt` stays null.
    #[must_use]
    pub const fn combine_debt(mut self, yes: bool) -> Self {
        self.combine_debt = yes;
        self
    }

    /// Fetches every part sequentially, threading the universe's symbols through.
    ///
    /// # Errors
    ///
    /// Returns the first request error, or a strict company-info extraction error.
    #[cfg_attr(feature = "tracing", tracing::instrument(skip(self), err))]
    pub async fn fetch_parts(&self) -> Result<MarketTableParts, IexError> {
        let universe = SymbolsBuilder::new(&self.client)
            .kind(self.kind.clone())
            .fetch()
            .await?;
        let symbols = universe.symbols();

        let company = CompanyInfoBuilder::new(&self.client, symbols.iter().cloned())
            .fields(self.company_fields.iter().cloned())
            .fetch()
            .await?;
        let shares = CompanyInfoBuilder::new(&self.client, symbols.iter().cloned())
            .fields([SHARES_OUTSTANDING])
            .category(self.shares_category.as_str())
            .fetch()
            .await?;
        let financials = FinancialsBuilder::new(&self.client, symbols.iter().cloned(), &universe)
            .period(self.period)
            .fetch()
            .await?;
        let prices = PriceHistoryBuilder::new(&self.client, symbols.iter().cloned())
            .range(self.range)
            .fetch()
            .await?;

        #[cfg(feature = "tracing")]
        tracing::info!(
            symbols = symbols.len(),
            financials_missing = financials.missing().count(),
            prices_missing = prices.missing().len(),
            "fetched market table parts"
        );

        Ok(MarketTableParts {
            universe,
            company,
            shares,
            financials,
            prices,
        })
    }

    /// # Errors
    ///
    /// See [`Self::fetch_parts`] and [`MarketTableParts::assemble`].
    pub async fn build(self) -> Result<CompositeTable, IexError> {
        let parts = self.fetch_parts().await?;
        let categorical: Vec<&str> = self.categorical.iter().map(String::as_str).collect();
        let table = parts.assemble(&categorical)?;

        if self.combine_debt
            && table.columns().iter().any(|c| c == TOTAL_DEBT)
            && table.columns().iter().any(|c| c == TOTAL_LIABILITIES)
        {
            return table
                .fill_null(TOTAL_LIABILITIES, Cell::Int(0))?
                .sum_into(TOTAL_DEBT, TOTAL_LIABILITIES)?
                .drop_columns(&[TOTAL_LIABILITIES]);
        }
        Ok(table)
    }
}
