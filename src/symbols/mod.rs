//! The symbol universe from the reference-data endpoint.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::core::query::type_name;
use crate::{IexClient, IexError, InstrumentType};

/// One reference-data entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SymbolEntry {
    pub symbol: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub date: Option<String>,
    #[serde(rename = "isEnabled", default)]
    pub is_enabled: Option<bool>,
    /// Raw instrument type code (`cs`, `et`, ...). See [`SymbolEntry::instrument_type`].
    #[serde(rename = "type", default)]
    pub kind: Option<String>,
    #[serde(rename = "iexId", default)]
    pub iex_id: Option<Value>,
}

impl SymbolEntry {
    pub fn instrument_type(&self) -> Option<InstrumentType> {
        self.kind.as_deref().map(InstrumentType::from)
    }
}

/// The tradable symbols returned by one reference-data call, in source order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SymbolUniverse {
    entries: Vec<SymbolEntry>,
    filter: Option<InstrumentType>,
}

impl SymbolUniverse {
    /// Builds a universe from entries, keeping only those of `filter` when given.
    pub fn from_entries(entries: Vec<SymbolEntry>, filter: Option<InstrumentType>) -> Self {
        let entries = match &filter {
            Some(kind) => entries
                .into_iter()
                .filter(|e| e.instrument_type().as_ref() == Some(kind))
                .collect(),
            None => entries,
        };
        Self { entries, filter }
    }

    pub fn entries(&self) -> &[SymbolEntry] {
        &self.entries
    }

    /// The instrument type this universe was filtered by, if any.
    pub fn filter(&self) -> Option<&InstrumentType> {
        self.filter.as_ref()
    }

    /// Ticker symbols in source order.
    pub fn symbols(&self) -> Vec<String> {
        self.entries.iter().map(|e| e.symbol.clone()).collect()
    }

    pub fn contains(&self, symbol: &str) -> bool {
        self.entries.iter().any(|e| e.symbol == symbol)
    }

    pub fn is_common_stock(&self, symbol: &str) -> bool {
        self.entries
            .iter()
            .any(|e| e.symbol == symbol && e.instrument_type() == Some(InstrumentType::CommonStock))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Fetches the full symbol universe, optionally filtered by instrument type.
///
/// # Errors
///
/// Returns `IexError` if the request fails or the body is not a list of symbols.
pub async fn symbols(
    client: &IexClient,
    kind: Option<InstrumentType>,
) -> Result<SymbolUniverse, IexError> {
    let mut b = SymbolsBuilder::new(client);
    if let Some(k) = kind {
        b = b.kind(k);
    }
    b.fetch().await
}

/// A builder for the reference-data symbol list.
#[derive(Debug)]
pub struct SymbolsBuilder {
    client: IexClient,
    kind: Option<InstrumentType>,
}

impl SymbolsBuilder {
    pub fn new(client: &IexClient) -> Self {
        Self {
            client: client.clone(),
            kind: None,
        }
    }

    /// Keep only symbols of this instrument type (e.g. `"cs"` for common stock).
    #[must_use]
    pub fn kind(mut self, kind: impl Into<InstrumentType>) -> Self {
        self.kind = Some(kind.into());
        self
    }

    /// Sends the request. The endpoint returns the whole universe at once; nothing is batched.
    ///
    /// # Errors
    ///
    /// Returns `IexError` if the request fails or the body is not a list of symbols.
    #[cfg_attr(feature = "tracing", tracing::instrument(skip(self), err, fields(kind = ?self.kind)))]
    pub async fn fetch(self) -> Result<SymbolUniverse, IexError> {
        let body = self
            .client
            .get_json(self.client.base_ref_data().clone(), "ref_data", "symbols")
            .await?;
        if !body.is_array() {
            return Err(IexError::Data(format!(
                "symbol list is not an array: {}",
                type_name(&body)
            )));
        }
        let entries: Vec<SymbolEntry> = serde_json::from_value(body)?;
        Ok(SymbolUniverse::from_entries(entries, self.kind))
    }
}
