//! Historical earnings records flattened into fixed-width rows.

use serde_json::Value;

use crate::core::{BatchQuery, Cell, IexClient, IexError, MissingReason, Row, chunked};
use crate::table::AttributeTable;

const CATEGORY: &str = "earnings";

/// Default number of reporting periods kept per field.
pub const DEFAULT_PERIODS: usize = 4;

/// A builder for the `earnings` category.
///
/// Each requested field yields `periods` columns named `<field>_<n>`, newest
/// record first. Tickers with fewer records are padded with nulls and extra
/// records are ignored, so every row is `fields × periods` wide.
#[derive(Debug)]
pub struct EarningsBuilder {
    client: IexClient,
    symbols: Vec<String>,
    fields: Vec<String>,
    periods: usize,
    period: Option<crate::core::Period>,
    batch_size: Option<usize>,
}

impl EarningsBuilder {
    pub fn new<I, S>(client: &IexClient, symbols: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            client: client.clone(),
            symbols: symbols.into_iter().map(Into::into).collect(),
            fields: Vec::new(),
            periods: DEFAULT_PERIODS,
            period: None,
            batch_size: None,
        }
    }

    #[must_use]
    pub fn fields<I, S>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.fields = fields.into_iter().map(Into::into).collect();
        self
    }

    /// How many records per field become columns. Default: 4.
    #[must_use]
    pub const fn periods(mut self, n: usize) -> Self {
        self.periods = n;
        self
    }

    /// Reporting period sent with the request (`annual` / `quarter`). Default: API's choice.
    #[must_use]
    pub const fn period(mut self, period: crate::core::Period) -> Self {
        self.period = Some(period);
        self
    }

    #[must_use]
    pub const fn batch_size(mut self, size: usize) -> Self {
        self.batch_size = Some(size);
        self
    }

    /// Column names in row order.
    pub fn columns(&self) -> Vec<String> {
        self.fields
            .iter()
            .flat_map(|f| (1..=self.periods).map(move |n| format!("{f}_{n}")))
            .collect()
    }

    /// # Errors
    ///
    /// Returns `IexError::InvalidParams` for a zero period count, and request errors.
    /// Per-ticker extraction faults become sentinel rows.
    #[cfg_attr(feature = "tracing", tracing::instrument(skip(self), err, fields(symbols = self.symbols.len(), periods = self.periods)))]
    pub async fn fetch(self) -> Result<AttributeTable, IexError> {
        if self.periods == 0 {
            return Err(IexError::InvalidParams("periods must be at least 1".into()));
        }
        let size = self.batch_size.unwrap_or_else(|| self.client.batch_size());
        let mut table = AttributeTable::new(self.columns());

        for group in chunked(&self.symbols, size)? {
            let mut query = BatchQuery::new(CATEGORY)
                .filter(self.fields.iter().cloned())
                .symbols(group.iter().cloned());
            if let Some(p) = self.period {
                query = query.period(p.as_str());
            }
            let resp = self.client.batch(&query).await?;

            for sym in group {
                let row = resp
                    .category(sym, CATEGORY)
                    .and_then(|payload| flatten_records(payload, &self.fields, self.periods))
                    .map_or_else(
                        |reason| {
                            #[cfg(feature = "tracing")]
                            tracing::debug!(symbol = %sym, %reason, "substituting missing row");
                            Row::Missing(reason)
                        },
                        Row::Present,
                    );
                table.push(sym.as_str(), row)?;
            }
        }
        Ok(table)
    }
}

/// `payload` is `{"symbol": ..., "earnings": [record, ...]}`.
fn flatten_records(
    payload: &Value,
    fields: &[String],
    periods: usize,
) -> Result<Vec<Cell>, MissingReason> {
    let records = payload
        .get(CATEGORY)
        .ok_or_else(|| MissingReason::Field(CATEGORY.to_string()))?
        .as_array()
        .ok_or_else(|| MissingReason::NotAList(CATEGORY.to_string()))?;
    if records.is_empty() {
        return Err(MissingReason::Empty);
    }

    let kept = &records[..records.len().min(periods)];
    let mut out = Vec::with_capacity(fields.len() * periods);
    for field in fields {
        for rec in kept {
            let v = rec
                .get(field)
                .ok_or_else(|| MissingReason::Field(field.clone()))?;
            out.push(Cell::from_json(v));
        }
        out.extend(std::iter::repeat_n(Cell::Null, periods - kept.len()));
    }
    Ok(out)
}
