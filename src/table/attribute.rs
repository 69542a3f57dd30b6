use std::collections::HashMap;

use serde::Serialize;

use crate::core::{Cell, IexError, MissingReason, Row};

/// Per-ticker attribute values, one column per requested field.
///
/// Rows keep first-seen ticker order. Pushing a ticker twice replaces the
/// earlier row in place.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct AttributeTable {
    columns: Vec<String>,
    rows: Vec<(String, Row)>,
    #[serde(skip)]
    positions: HashMap<String, usize>,
}

impl AttributeTable {
    pub fn new<I, S>(columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            columns: columns.into_iter().map(Into::into).collect(),
            rows: Vec::new(),
            positions: HashMap::new(),
        }
    }

    /// Inserts or replaces a ticker's row.
    ///
    /// # Errors
    ///
    /// Returns `IexError::Data` if a present row is not exactly as wide as the table.
    pub fn push(&mut self, symbol: impl Into<String>, row: Row) -> Result<(), IexError> {
        let symbol = symbol.into();
        if let Row::Present(cells) = &row
            && cells.len() != self.columns.len()
        {
            return Err(IexError::Data(format!(
                "row for {symbol} has {} values, table declares {} columns",
                cells.len(),
                self.columns.len()
            )));
        }
        match self.positions.get(&symbol) {
            Some(&i) => self.rows[i].1 = row,
            None => {
                self.positions.insert(symbol.clone(), self.rows.len());
                self.rows.push((symbol, row));
            }
        }
        Ok(())
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn symbols(&self) -> impl Iterator<Item = &str> {
        self.rows.iter().map(|(s, _)| s.as_str())
    }

    pub fn row(&self, symbol: &str) -> Option<&Row> {
        self.positions.get(symbol).map(|&i| &self.rows[i].1)
    }

    /// The value at (`symbol`, `column`); sentinel rows read as `Cell::Null`.
    pub fn value(&self, symbol: &str, column: &str) -> Option<&Cell> {
        const NULL: &Cell = &Cell::Null;
        let col = self.columns.iter().position(|c| c == column)?;
        match self.row(symbol)? {
            Row::Present(cells) => cells.get(col),
            Row::Missing(_) => Some(NULL),
        }
    }

    /// Tickers whose rows are sentinels, with the reason.
    pub fn missing(&self) -> impl Iterator<Item = (&str, &MissingReason)> {
        self.rows.iter().filter_map(|(s, r)| match r {
            Row::Missing(reason) => Some((s.as_str(), reason)),
            Row::Present(_) => None,
        })
    }

    /// Rows with sentinels expanded to all-null cells of the declared width.
    pub fn expanded_rows(&self) -> impl Iterator<Item = (&str, Vec<Cell>)> {
        let width = self.columns.len();
        self.rows.iter().map(move |(s, r)| {
            let cells = match r {
                Row::Present(cells) => cells.clone(),
                Row::Missing(_) => vec![Cell::Null; width],
            };
            (s.as_str(), cells)
        })
    }
}
