//! Daily closing prices over a look-back range, pivoted to one column per ticker.

use chrono::NaiveDate;
use serde_json::Value;

use crate::core::{BatchQuery, ChartRange, IexClient, IexError, MissingReason, chunked};
use crate::table::PriceTable;

const CATEGORY: &str = "chart";
const DATE_FORMAT: &str = "%Y-%m-%d";

/// Fetches closing prices for `symbols` over `range`.
///
/// # Errors
///
/// Returns `IexError` if a request fails.
pub async fn price_history<I, S>(
    client: &IexClient,
    symbols: I,
    range: ChartRange,
) -> Result<PriceTable, IexError>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    PriceHistoryBuilder::new(client, symbols).range(range).fetch().await
}

/// A builder for the `chart` category.
#[derive(Debug)]
pub struct PriceHistoryBuilder {
    client: IexClient,
    symbols: Vec<String>,
    range: ChartRange,
    batch_size: Option<usize>,
}

impl PriceHistoryBuilder {
    pub fn new<I, S>(client: &IexClient, symbols: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            client: client.clone(),
            symbols: symbols.into_iter().map(Into::into).collect(),
            range: ChartRange::Y1,
            batch_size: None,
        }
    }

    /// Look-back range. Default: one year.
    #[must_use]
    pub const fn range(mut self, range: ChartRange) -> Self {
        self.range = range;
        self
    }

    #[must_use]
    pub const fn batch_size(mut self, size: usize) -> Self {
        self.batch_size = Some(size);
        self
    }

    /// # Errors
    ///
    /// Returns request errors. A ticker with an empty or unreadable series keeps an
    /// all-null column and is listed in [`PriceTable::missing`].
    #[cfg_attr(feature = "tracing", tracing::instrument(skip(self), err, fields(symbols = self.symbols.len(), range = self.range.as_str())))]
    pub async fn fetch(self) -> Result<PriceTable, IexError> {
        let size = self.batch_size.unwrap_or_else(|| self.client.batch_size());
        let mut table = PriceTable::new();

        for group in chunked(&self.symbols, size)? {
            let query = BatchQuery::new(CATEGORY)
                .filter(["close", "date"])
                .symbols(group.iter().cloned())
                .range(self.range.as_str());
            let resp = self.client.batch(&query).await?;

            for sym in group {
                match resp.category(sym, CATEGORY).and_then(parse_series) {
                    Ok(series) => table.join_series(sym.as_str(), series),
                    Err(reason) => {
                        #[cfg(feature = "tracing")]
                        tracing::debug!(symbol = %sym, %reason, "substituting missing series");
                        table.join_missing(sym.as_str(), reason);
                    }
                }
            }
        }
        Ok(table)
    }
}

/// `payload` is `[{"date": "YYYY-MM-DD", "close": f64}, ...]`. A null close is an
/// absent observation on that date.
fn parse_series(payload: &Value) -> Result<Vec<(NaiveDate, Option<f64>)>, MissingReason> {
    let points = payload
        .as_array()
        .ok_or_else(|| MissingReason::NotAList(CATEGORY.to_string()))?;
    if points.is_empty() {
        return Err(MissingReason::Empty);
    }

    points
        .iter()
        .map(|p| {
            let raw_date = p
                .get("date")
                .and_then(Value::as_str)
                .ok_or_else(|| MissingReason::Field("date".to_string()))?;
            let date = NaiveDate::parse_from_str(raw_date, DATE_FORMAT)
                .map_err(|_| MissingReason::BadDate(raw_date.to_string()))?;
            let close = match p.get("close") {
                None => return Err(MissingReason::Field("close".to_string())),
                Some(Value::Null) => None,
                Some(v) => Some(v.as_f64().ok_or_else(|| MissingReason::BadNumber(v.to_string()))?),
            };
            Ok((date, close))
        })
        .collect()
}
