//! Tabular results: per-attribute tables, the date-indexed price table, and
//! the ticker-indexed composite they are joined into.

mod attribute;
mod composite;
mod price;

pub use attribute::AttributeTable;
pub use composite::{CompositeTable, INDEX_NAME};
pub use price::PriceTable;
