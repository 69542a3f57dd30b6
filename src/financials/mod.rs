//! Latest financial-statement record per ticker.

use serde_json::{Map, Value};

use crate::core::{BatchQuery, Cell, IexClient, IexError, MissingReason, Period, Row, chunked};
use crate::symbols::SymbolUniverse;
use crate::table::AttributeTable;

const CATEGORY: &str = "financials";

/// A builder for the `financials` category.
///
/// Only common stocks carry statements, so every requested symbol must be a
/// common stock in the supplied universe. The table's columns are the fields
/// of the first ticker (in request order) that returned a record; later
/// tickers are aligned to those names.
#[derive(Debug)]
pub struct FinancialsBuilder<'u> {
    client: IexClient,
    symbols: Vec<String>,
    universe: &'u SymbolUniverse,
    period: Period,
    batch_size: Option<usize>,
}

impl<'u> FinancialsBuilder<'u> {
    pub fn new<I, S>(client: &IexClient, symbols: I, universe: &'u SymbolUniverse) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            client: client.clone(),
            symbols: symbols.into_iter().map(Into::into).collect(),
            universe,
            period: Period::Annual,
            batch_size: None,
        }
    }

    /// Default: annual.
    #[must_use]
    pub const fn period(mut self, period: Period) -> Self {
        self.period = period;
        self
    }

    #[must_use]
    pub const fn batch_size(mut self, size: usize) -> Self {
        self.batch_size = Some(size);
        self
    }

    /// # Errors
    ///
    /// Returns `IexError::NotCommonStock` before any request if a symbol is not a
    /// common stock in the universe, and request errors. Per-ticker extraction
    /// faults become sentinel rows.
    #[cfg_attr(feature = "tracing", tracing::instrument(skip(self), err, fields(symbols = self.symbols.len(), period = self.period.as_str())))]
    pub async fn fetch(self) -> Result<AttributeTable, IexError> {
        let rejected: Vec<String> = self
            .symbols
            .iter()
            .filter(|s| !self.universe.is_common_stock(s))
            .cloned()
            .collect();
        if !rejected.is_empty() {
            return Err(IexError::NotCommonStock { symbols: rejected });
        }

        let size = self.batch_size.unwrap_or_else(|| self.client.batch_size());
        let mut records: Vec<(String, Result<Map<String, Value>, MissingReason>)> =
            Vec::with_capacity(self.symbols.len());

        for group in chunked(&self.symbols, size)? {
            let query = BatchQuery::new(CATEGORY)
                .symbols(group.iter().cloned())
                .period(self.period.as_str());
            let resp = self.client.batch(&query).await?;

            for sym in group {
                let rec = resp
                    .category(sym, CATEGORY)
                    .and_then(first_record)
                    .cloned();
                records.push((sym.clone(), rec));
            }
        }

        align(records)
    }
}

/// `payload` is `{"symbol": ..., "financials": [record, ...]}`; newest first.
fn first_record(payload: &Value) -> Result<&Map<String, Value>, MissingReason> {
    let list = payload
        .get(CATEGORY)
        .ok_or_else(|| MissingReason::Field(CATEGORY.to_string()))?
        .as_array()
        .ok_or_else(|| MissingReason::NotAList(CATEGORY.to_string()))?;
    list.first()
        .ok_or(MissingReason::Empty)?
        .as_object()
        .ok_or_else(|| MissingReason::NotAList(CATEGORY.to_string()))
}

/// Schema from the first successful record; every other record aligned by key.
fn align(
    records: Vec<(String, Result<Map<String, Value>, MissingReason>)>,
) -> Result<AttributeTable, IexError> {
    let columns: Vec<String> = records
        .iter()
        .find_map(|(_, r)| r.as_ref().ok())
        .map(|m| m.keys().cloned().collect())
        .unwrap_or_default();

    let mut table = AttributeTable::new(columns.iter().cloned());
    for (sym, rec) in records {
        let row = match rec {
            Ok(map) => Row::Present(
                columns
                    .iter()
                    .map(|c| map.get(c).map_or(Cell::Null, Cell::from_json))
                    .collect(),
            ),
            Err(reason) => {
                #[cfg(feature = "tracing")]
                tracing::debug!(symbol = %sym, %reason, "substituting missing row");
                Row::Missing(reason)
            }
        };
        table.push(sym, row)?;
    }
    Ok(table)
}
