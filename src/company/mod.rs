//! Per-ticker company attributes (`company`, `stats`, or any flat category).

use serde_json::Value;

use crate::core::{BatchQuery, Cell, IexClient, IexError, MissingReason, Row, chunked};
use crate::table::AttributeTable;

/// Fetches `fields` from the `company` category for `symbols`.
///
/// # Errors
///
/// Returns `IexError::MissingField` if any ticker lacks a field, or any request error.
pub async fn company_info<I, S>(
    client: &IexClient,
    symbols: I,
    fields: &[&str],
) -> Result<AttributeTable, IexError>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    CompanyInfoBuilder::new(client, symbols)
        .fields(fields.iter().copied())
        .fetch()
        .await
}

/// A builder for flat per-ticker attributes.
#[derive(Debug)]
pub struct CompanyInfoBuilder {
    client: IexClient,
    symbols: Vec<String>,
    fields: Vec<String>,
    category: String,
    batch_size: Option<usize>,
    lenient: bool,
}

impl CompanyInfoBuilder {
    pub fn new<I, S>(client: &IexClient, symbols: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            client: client.clone(),
            symbols: symbols.into_iter().map(Into::into).collect(),
            fields: Vec::new(),
            category: "company".to_string(),
            batch_size: None,
            lenient: false,
        }
    }

    /// Fields to extract; they become the table's columns in this order.
    #[must_use]
    pub fn fields<I, S>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.fields = fields.into_iter().map(Into::into).collect();
        self
    }

    /// Data category holding the fields. Default: `company`. Use `stats` for `sharesOutstanding`.
    #[must_use]
    pub fn category(mut self, category: impl Into<String>) -> Self {
        self.category = category.into();
        self
    }

    /// Overrides the client's batch size for this call.
    #[must_use]
    pub const fn batch_size(mut self, size: usize) -> Self {
        self.batch_size = Some(size);
        self
    }

    /// Record tickers with missing data as sentinel rows instead of failing the call.
    #[must_use]
    pub const fn lenient(mut self, yes: bool) -> Self {
        self.lenient = yes;
        self
    }

    /// # Errors
    ///
    /// Unless lenient, returns `IexError::MissingField` for the first ticker lacking
    /// data. Request and parse errors are always returned.
    #[cfg_attr(feature = "tracing", tracing::instrument(skip(self), err, fields(category = %self.category, symbols = self.symbols.len())))]
    pub async fn fetch(self) -> Result<AttributeTable, IexError> {
        let size = self.batch_size.unwrap_or_else(|| self.client.batch_size());
        let mut table = AttributeTable::new(self.fields.iter().cloned());

        for group in chunked(&self.symbols, size)? {
            let query = BatchQuery::new(self.category.as_str())
                .filter(self.fields.iter().cloned())
                .symbols(group.iter().cloned());
            let resp = self.client.batch(&query).await?;

            for sym in group {
                let row = match resp
                    .category(sym, &self.category)
                    .and_then(|payload| extract_fields(payload, &self.fields))
                {
                    Ok(cells) => Row::Present(cells),
                    Err(reason) if self.lenient => {
                        #[cfg(feature = "tracing")]
                        tracing::debug!(symbol = %sym, %reason, "substituting missing row");
                        Row::Missing(reason)
                    }
                    Err(reason) => {
                        return Err(IexError::MissingField {
                            symbol: sym.clone(),
                            field: match reason {
                                MissingReason::Field(f) | MissingReason::Category(f) => f,
                                _ => self.category.clone(),
                            },
                        });
                    }
                };
                table.push(sym.as_str(), row)?;
            }
        }
        Ok(table)
    }
}

fn extract_fields(payload: &Value, fields: &[String]) -> Result<Vec<Cell>, MissingReason> {
    fields
        .iter()
        .map(|f| {
            payload
                .get(f)
                .map(Cell::from_json)
                .ok_or_else(|| MissingReason::Field(f.clone()))
        })
        .collect()
}
