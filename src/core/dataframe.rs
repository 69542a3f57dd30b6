use polars::prelude::*;

use crate::core::Cell;
use crate::table::{CompositeTable, INDEX_NAME, PriceTable};

/// Trait for converting tables into Polars DataFrames.
///
/// Column dtypes are inferred from the cells: all-integer columns become
/// `Int64`, mixed numeric `Float64`, boolean `Boolean`, anything else `String`.
/// Nulls stay nulls.
pub trait ToDataFrame {
    /// Converts the object into a Polars DataFrame.
    fn to_dataframe(&self) -> PolarsResult<DataFrame>;
}

impl ToDataFrame for CompositeTable {
    fn to_dataframe(&self) -> PolarsResult<DataFrame> {
        let mut columns = Vec::with_capacity(self.columns().len() + 1);
        columns.push(Column::new(INDEX_NAME.into(), self.index().to_vec()));
        for name in self.columns() {
            let cells = self.column(name).unwrap_or_default();
            columns.push(cells_to_column(name, &cells));
        }
        DataFrame::new(columns)
    }
}

impl ToDataFrame for PriceTable {
    fn to_dataframe(&self) -> PolarsResult<DataFrame> {
        let dates: Vec<chrono::NaiveDate> = self.dates().copied().collect();
        let mut columns = Vec::with_capacity(self.columns().len() + 1);
        columns.push(Column::new("date".into(), dates));
        for sym in self.columns() {
            let closes = self.column(sym).unwrap_or_default();
            columns.push(Column::new(sym.as_str().into(), closes));
        }
        DataFrame::new(columns)
    }
}

fn cells_to_column(name: &str, cells: &[&Cell]) -> Column {
    let all = |f: fn(&Cell) -> bool| cells.iter().all(|c| c.is_null() || f(c));

    if all(|c| matches!(c, Cell::Int(_))) {
        let v: Vec<Option<i64>> = cells
            .iter()
            .map(|c| match c {
                Cell::Int(i) => Some(*i),
                _ => None,
            })
            .collect();
        Column::new(name.into(), v)
    } else if all(|c| matches!(c, Cell::Int(_) | Cell::Float(_))) {
        let v: Vec<Option<f64>> = cells.iter().map(|c| c.as_f64()).collect();
        Column::new(name.into(), v)
    } else if all(|c| matches!(c, Cell::Bool(_))) {
        let v: Vec<Option<bool>> = cells
            .iter()
            .map(|c| match c {
                Cell::Bool(b) => Some(*b),
                _ => None,
            })
            .collect();
        Column::new(name.into(), v)
    } else {
        let v: Vec<Option<String>> = cells
            .iter()
            .map(|c| (!c.is_null()).then(|| c.to_string()))
            .collect();
        Column::new(name.into(), v)
    }
}
