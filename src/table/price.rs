use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::Serialize;

use crate::core::MissingReason;

/// Closing prices indexed by date, one column per ticker.
///
/// Built by outer-joining per-ticker series: the index is the union of every
/// series' dates and a ticker with no observation on a date reads `None`.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct PriceTable {
    columns: Vec<String>,
    rows: BTreeMap<NaiveDate, Vec<Option<f64>>>,
    missing: Vec<(String, MissingReason)>,
}

impl PriceTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Outer-joins one ticker's series into the table as a new column.
    ///
    /// Joining a ticker that already has a column replaces that column in
    /// place; dates left without any close are dropped.
    pub fn join_series(
        &mut self,
        symbol: impl Into<String>,
        series: impl IntoIterator<Item = (NaiveDate, Option<f64>)>,
    ) {
        let symbol = symbol.into();
        let idx = match self.position(&symbol) {
            Some(idx) => {
                self.clear_column(idx);
                self.missing.retain(|(s, _)| *s != symbol);
                idx
            }
            None => {
                self.columns.push(symbol);
                for row in self.rows.values_mut() {
                    row.push(None);
                }
                self.columns.len() - 1
            }
        };
        let width = self.columns.len();
        for (date, close) in series {
            let row = self.rows.entry(date).or_insert_with(|| vec![None; width]);
            row[idx] = close.filter(|c| !c.is_nan());
        }
    }

    /// Adds an all-null column for a ticker whose series could not be read.
    pub fn join_missing(&mut self, symbol: impl Into<String>, reason: MissingReason) {
        let symbol = symbol.into();
        self.join_series(symbol.clone(), std::iter::empty());
        self.missing.push((symbol, reason));
    }

    fn clear_column(&mut self, idx: usize) {
        let mut orphaned = Vec::new();
        for (date, row) in &mut self.rows {
            if row[idx].take().is_some() && row.iter().all(Option::is_none) {
                orphaned.push(*date);
            }
        }
        for date in orphaned {
            self.rows.remove(&date);
        }
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn dates(&self) -> impl Iterator<Item = &NaiveDate> {
        self.rows.keys()
    }

    /// Number of dates in the index.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn close(&self, date: NaiveDate, symbol: &str) -> Option<f64> {
        let col = self.position(symbol)?;
        self.rows.get(&date).and_then(|row| row[col])
    }

    /// The ticker's column over the full date index.
    pub fn column(&self, symbol: &str) -> Option<Vec<Option<f64>>> {
        let col = self.position(symbol)?;
        Some(self.rows.values().map(|row| row[col]).collect())
    }

    /// Iterate `(date, closes)` in date order; closes follow [`Self::columns`].
    pub fn rows(&self) -> impl Iterator<Item = (&NaiveDate, &[Option<f64>])> {
        self.rows.iter().map(|(d, r)| (d, r.as_slice()))
    }

    /// Tickers whose series were replaced with the sentinel, with the reason.
    pub fn missing(&self) -> &[(String, MissingReason)] {
        &self.missing
    }

    /// Mean close per ticker, skipping nulls. `None` when a ticker has no observations.
    #[allow(clippy::cast_precision_loss)]
    pub fn mean_by_symbol(&self) -> Vec<(String, Option<f64>)> {
        self.columns
            .iter()
            .enumerate()
            .map(|(col, sym)| {
                let (sum, n) = self
                    .rows
                    .values()
                    .filter_map(|row| row[col])
                    .fold((0.0, 0usize), |(s, n), v| (s + v, n + 1));
                (sym.clone(), (n > 0).then(|| sum / n as f64))
            })
            .collect()
    }

    fn position(&self, symbol: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == symbol)
    }
}
