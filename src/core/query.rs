use serde_json::{Map, Value};
use url::Url;

use crate::core::{IexClient, IexError, MissingReason};

/// Separator the batch endpoint expects between symbols and filter fields.
pub(crate) const LIST_SEP: &str = ", ";

/// Query parameters for one call to the batch endpoint.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BatchQuery {
    types: Vec<String>,
    filter: Vec<String>,
    symbols: Vec<String>,
    period: Option<String>,
    range: Option<String>,
}

impl BatchQuery {
    /// A query for one data category (`company`, `stats`, `chart`, ...).
    pub fn new(category: impl Into<String>) -> Self {
        Self {
            types: vec![category.into()],
            ..Self::default()
        }
    }

    /// Adds another data category to the same request.
    #[must_use]
    pub fn also(mut self, category: impl Into<String>) -> Self {
        self.types.push(category.into());
        self
    }

    /// Restricts the response to these fields.
    #[must_use]
    pub fn filter<I, S>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.filter = fields.into_iter().map(Into::into).collect();
        self
    }

    #[must_use]
    pub fn symbols<I, S>(mut self, syms: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.symbols = syms.into_iter().map(Into::into).collect();
        self
    }

    /// Reporting period (`annual` / `quarter`).
    #[must_use]
    pub fn period(mut self, period: impl Into<String>) -> Self {
        self.period = Some(period.into());
        self
    }

    /// Chart look-back (`1y`, `6m`, ...).
    #[must_use]
    pub fn range(mut self, range: impl Into<String>) -> Self {
        self.range = Some(range.into());
        self
    }

    /// The key/value pairs sent in the query string, in a stable order.
    pub fn pairs(&self) -> Vec<(&'static str, String)> {
        let mut out = Vec::with_capacity(5);
        if !self.filter.is_empty() {
            out.push(("filter", self.filter.join(LIST_SEP)));
        }
        out.push(("types", self.types.join(",")));
        out.push(("symbols", self.symbols.join(LIST_SEP)));
        if let Some(p) = &self.period {
            out.push(("period", p.clone()));
        }
        if let Some(r) = &self.range {
            out.push(("range", r.clone()));
        }
        out
    }

    fn to_url(&self, base: &Url) -> Url {
        let mut url = base.clone();
        {
            let mut qp = url.query_pairs_mut();
            for (k, v) in self.pairs() {
                qp.append_pair(k, &v);
            }
        }
        url
    }
}

/// A batch response: one JSON object per requested symbol.
#[derive(Debug, Clone, Default)]
pub struct BatchResponse(Map<String, Value>);

impl BatchResponse {
    pub fn get(&self, symbol: &str) -> Option<&Value> {
        self.0.get(symbol)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// The `category` payload for `symbol`, or the reason it is unavailable.
    pub fn category(&self, symbol: &str, category: &str) -> Result<&Value, MissingReason> {
        let entry = self.get(symbol).ok_or(MissingReason::Ticker)?;
        match entry.get(category) {
            None | Some(Value::Null) => Err(MissingReason::Category(category.to_string())),
            Some(v) => Ok(v),
        }
    }

    pub fn into_inner(self) -> Map<String, Value> {
        self.0
    }
}

impl IexClient {
    /// Executes one batch request.
    ///
    /// # Errors
    ///
    /// Returns `IexError::Status` on a non-success status, `IexError::Json` if the body
    /// is not JSON, and `IexError::Data` if it is JSON but not an object keyed by symbol.
    pub async fn batch(&self, query: &BatchQuery) -> Result<BatchResponse, IexError> {
        let url = query.to_url(self.base_batch());
        let endpoint = format!("batch_{}", query.types.join("-"));
        match self
            .get_json(url, &endpoint, &query.symbols.join(","))
            .await?
        {
            Value::Object(map) => Ok(BatchResponse(map)),
            other => Err(IexError::Data(format!(
                "batch response is not an object: {}",
                type_name(&other)
            ))),
        }
    }
}

pub(crate) const fn type_name(v: &Value) -> &'static str {
    match v {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
