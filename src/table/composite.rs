use std::collections::{BTreeSet, HashMap};
use std::io::Write;

use serde::Serialize;

use crate::core::{Cell, IexError};
use crate::table::AttributeTable;

/// Name of the index column in CSV exports.
pub const INDEX_NAME: &str = "symbol";

/// Wide table indexed by ticker, produced by outer joins.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CompositeTable {
    index: Vec<String>,
    columns: Vec<String>,
    cells: Vec<Vec<Cell>>,
    #[serde(skip)]
    positions: HashMap<String, usize>,
}

impl From<&AttributeTable> for CompositeTable {
    fn from(t: &AttributeTable) -> Self {
        let mut out = Self {
            columns: t.columns().to_vec(),
            ..Self::default()
        };
        for (sym, cells) in t.expanded_rows() {
            let row = out.row_or_insert(sym);
            out.cells[row] = cells;
        }
        out
    }
}

impl CompositeTable {
    /// A table with no rows and no columns.
    pub fn new() -> Self {
        Self::default()
    }

    /// A single-column table from `(symbol, value)` pairs.
    pub fn from_series<I, S, C>(name: impl Into<String>, values: I) -> Self
    where
        I: IntoIterator<Item = (S, C)>,
        S: Into<String>,
        C: Into<Cell>,
    {
        let mut out = Self {
            columns: vec![name.into()],
            ..Self::default()
        };
        for (sym, v) in values {
            let sym: String = sym.into();
            let row = out.row_or_insert(&sym);
            out.cells[row][0] = v.into();
        }
        out
    }

    pub fn index(&self) -> &[String] {
        &self.index
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// `(rows, columns)`
    pub fn shape(&self) -> (usize, usize) {
        (self.index.len(), self.columns.len())
    }

    pub fn value(&self, symbol: &str, column: &str) -> Option<&Cell> {
        let row = *self.positions.get(symbol)?;
        let col = self.column_position(column)?;
        Some(&self.cells[row][col])
    }

    pub fn column(&self, name: &str) -> Option<Vec<&Cell>> {
        let col = self.column_position(name)?;
        Some(self.cells.iter().map(|r| &r[col]).collect())
    }

    pub fn rows(&self) -> impl Iterator<Item = (&str, &[Cell])> {
        self.index
            .iter()
            .zip(&self.cells)
            .map(|(s, r)| (s.as_str(), r.as_slice()))
    }

    /// Outer join on the ticker index.
    ///
    /// Keeps this table's row order and appends tickers only `other` has. Cells
    /// a side has no row for are null.
    ///
    /// # Errors
    ///
    /// Returns `IexError::DuplicateColumn` if both tables share a column name.
    pub fn outer_join(mut self, other: &Self) -> Result<Self, IexError> {
        if let Some(dup) = other.columns.iter().find(|c| self.columns.contains(*c)) {
            return Err(IexError::DuplicateColumn(dup.clone()));
        }
        let left_width = self.columns.len();
        self.columns.extend(other.columns.iter().cloned());
        let width = self.columns.len();
        for row in &mut self.cells {
            row.resize(width, Cell::Null);
        }
        for (sym, cells) in other.rows() {
            let row = self.row_or_insert(sym);
            self.cells[row][left_width..].clone_from_slice(cells);
        }
        Ok(self)
    }

    /// Convenience for `outer_join(&CompositeTable::from(table))`.
    ///
    /// # Errors
    ///
    /// See [`Self::outer_join`].
    pub fn join_attributes(self, table: &AttributeTable) -> Result<Self, IexError> {
        self.outer_join(&Self::from(table))
    }

    /// One-hot encodes categorical columns.
    ///
    /// Each listed column is replaced by integer 0/1 columns named
    /// `<column>_<value>`, one per distinct non-null value in lexical order,
    /// appended after the remaining columns. A null encodes as all zeros.
    ///
    /// # Errors
    ///
    /// Returns `IexError::UnknownColumn` for a column that does not exist.
    pub fn one_hot(mut self, columns: &[&str]) -> Result<Self, IexError> {
        let mut dummies: Vec<(String, Vec<Cell>)> = Vec::new();
        for &name in columns {
            let col = self
                .column_position(name)
                .ok_or_else(|| IexError::UnknownColumn(name.to_string()))?;
            let values: BTreeSet<String> = self
                .cells
                .iter()
                .filter(|r| !r[col].is_null())
                .map(|r| r[col].to_string())
                .collect();
            for value in values {
                let flags = self
                    .cells
                    .iter()
                    .map(|r| Cell::Int(i64::from(!r[col].is_null() && r[col].to_string() == value)))
                    .collect();
                dummies.push((format!("{name}_{value}"), flags));
            }
        }

        self = self.drop_columns(columns)?;
        for (name, flags) in dummies {
            if self.columns.contains(&name) {
                return Err(IexError::DuplicateColumn(name));
            }
            self.columns.push(name);
            for (row, flag) in self.cells.iter_mut().zip(flags) {
                row.push(flag);
            }
        }
        Ok(self)
    }

    /// Adds `name = left * right`; a null or non-numeric operand gives null.
    ///
    /// # Errors
    ///
    /// Returns `IexError::UnknownColumn` if an operand is absent and
    /// `IexError::DuplicateColumn` if `name` already exists.
    pub fn derive_product(mut self, name: &str, left: &str, right: &str) -> Result<Self, IexError> {
        self.derive(name, left, right, |a, b| a * b)?;
        Ok(self)
    }

    /// Replaces `target` with `target + source`; a null or non-numeric operand
    /// gives null. Fill nulls first with [`Self::fill_null`] to count them as zero.
    ///
    /// # Errors
    ///
    /// Returns `IexError::UnknownColumn` if either column is absent.
    pub fn sum_into(mut self, target: &str, source: &str) -> Result<Self, IexError> {
        let t = self
            .column_position(target)
            .ok_or_else(|| IexError::UnknownColumn(target.to_string()))?;
        let s = self
            .column_position(source)
            .ok_or_else(|| IexError::UnknownColumn(source.to_string()))?;
        for row in &mut self.cells {
            row[t] = match (row[t].as_f64(), row[s].as_f64()) {
                (Some(a), Some(b)) => Cell::from(a + b),
                _ => Cell::Null,
            };
        }
        Ok(self)
    }

    /// Replaces nulls in `column` with `value`.
    ///
    /// # Errors
    ///
    /// Returns `IexError::UnknownColumn` if the column is absent.
    pub fn fill_null(mut self, column: &str, value: Cell) -> Result<Self, IexError> {
        let col = self
            .column_position(column)
            .ok_or_else(|| IexError::UnknownColumn(column.to_string()))?;
        for row in &mut self.cells {
            if row[col].is_null() {
                row[col] = value.clone();
            }
        }
        Ok(self)
    }

    /// Removes columns.
    ///
    /// # Errors
    ///
    /// Returns `IexError::UnknownColumn` if any listed column is absent; nothing is removed then.
    pub fn drop_columns(mut self, columns: &[&str]) -> Result<Self, IexError> {
        if let Some(unknown) = columns.iter().find(|c| self.column_position(c).is_none()) {
            return Err(IexError::UnknownColumn((*unknown).to_string()));
        }
        let keep: Vec<bool> = self
            .columns
            .iter()
            .map(|c| !columns.contains(&c.as_str()))
            .collect();
        self.columns = retain_by(std::mem::take(&mut self.columns), &keep);
        self.cells = std::mem::take(&mut self.cells)
            .into_iter()
            .map(|row| retain_by(row, &keep))
            .collect();
        Ok(self)
    }

    /// Removes every row that holds at least one null.
    #[must_use]
    pub fn drop_null_rows(self) -> Self {
        let mut out = Self {
            columns: self.columns,
            ..Self::default()
        };
        for (sym, row) in self.index.into_iter().zip(self.cells) {
            if row.iter().all(|c| !c.is_null()) {
                let i = out.row_or_insert(&sym);
                out.cells[i] = row;
            }
        }
        out
    }

    /// Writes the table as CSV, with the ticker index as the first column if `with_index`.
    ///
    /// # Errors
    ///
    /// Returns `IexError::Csv` if writing fails.
    pub fn write_csv<W: Write>(&self, writer: W, with_index: bool) -> Result<(), IexError> {
        let mut wtr = csv::Writer::from_writer(writer);

        let mut header: Vec<&str> = Vec::with_capacity(self.columns.len() + 1);
        if with_index {
            header.push(INDEX_NAME);
        }
        header.extend(self.columns.iter().map(String::as_str));
        wtr.write_record(&header)?;

        for (sym, row) in self.rows() {
            let mut record: Vec<String> = Vec::with_capacity(row.len() + 1);
            if with_index {
                record.push(sym.to_string());
            }
            record.extend(row.iter().map(ToString::to_string));
            wtr.write_record(&record)?;
        }
        wtr.flush()?;
        Ok(())
    }

    /// Renders the table as a CSV string.
    ///
    /// # Errors
    ///
    /// See [`Self::write_csv`].
    pub fn to_csv_string(&self, with_index: bool) -> Result<String, IexError> {
        let mut buf = Vec::new();
        self.write_csv(&mut buf, with_index)?;
        String::from_utf8(buf).map_err(|e| IexError::Data(e.to_string()))
    }

    fn derive(
        &mut self,
        name: &str,
        left: &str,
        right: &str,
        op: impl Fn(f64, f64) -> f64,
    ) -> Result<(), IexError> {
        let l = self
            .column_position(left)
            .ok_or_else(|| IexError::UnknownColumn(left.to_string()))?;
        let r = self
            .column_position(right)
            .ok_or_else(|| IexError::UnknownColumn(right.to_string()))?;
        if self.column_position(name).is_some() {
            return Err(IexError::DuplicateColumn(name.to_string()));
        }
        self.columns.push(name.to_string());
        for row in &mut self.cells {
            let v = match (row[l].as_f64(), row[r].as_f64()) {
                (Some(a), Some(b)) => Cell::from(op(a, b)),
                _ => Cell::Null,
            };
            row.push(v);
        }
        Ok(())
    }

    fn column_position(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }

    fn row_or_insert(&mut self, symbol: &str) -> usize {
        if let Some(&i) = self.positions.get(symbol) {
            return i;
        }
        let i = self.index.len();
        self.index.push(symbol.to_string());
        self.cells.push(vec![Cell::Null; self.columns.len()]);
        self.positions.insert(symbol.to_string(), i);
        i
    }
}

fn retain_by<T>(items: Vec<T>, keep: &[bool]) -> Vec<T> {
    items
        .into_iter()
        .zip(keep)
        .filter_map(|(v, &k)| k.then_some(v))
        .collect()
}
