use serde::Serialize;
use serde_json::Value;
use std::fmt;

/* ----- CELLS (shared by every table) ----- */

/// One value in a table.
///
/// `Null` is the missing-data sentinel. It is distinct from a valid zero.
#[derive(Debug, Clone, PartialEq, Serialize, Default)]
#[serde(untagged)]
pub enum Cell {
    #[default]
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Text(String),
}

impl Cell {
    /// Convert a JSON scalar into a cell. Arrays and objects are kept as their JSON text.
    pub fn from_json(v: &Value) -> Self {
        match v {
            Value::Null => Self::Null,
            Value::Bool(b) => Self::Bool(*b),
            Value::Number(n) => n
                .as_i64()
                .map(Self::Int)
                .or_else(|| n.as_f64().map(Self::Float))
                .unwrap_or(Self::Null),
            Value::String(s) => Self::Text(s.clone()),
            other => Self::Text(other.to_string()),
        }
    }

    pub const fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Numeric view of the cell; text and bools are not coerced.
    #[allow(clippy::cast_precision_loss)]
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Int(i) => Some(*i as f64),
            Self::Float(f) if !f.is_nan() => Some(*f),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            _ => None,
        }
    }
}

impl From<f64> for Cell {
    fn from(v: f64) -> Self {
        if v.is_nan() { Self::Null } else { Self::Float(v) }
    }
}

impl From<Option<f64>> for Cell {
    fn from(v: Option<f64>) -> Self {
        v.map_or(Self::Null, Self::from)
    }
}

impl From<i64> for Cell {
    fn from(v: i64) -> Self {
        Self::Int(v)
    }
}

impl From<&str> for Cell {
    fn from(v: &str) -> Self {
        Self::Text(v.to_string())
    }
}

/// Renders the cell as a CSV field; `Null` renders empty.
impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null => Ok(()),
            Self::Bool(b) => write!(f, "{b}"),
            Self::Int(i) => write!(f, "{i}"),
            Self::Float(x) => write!(f, "{x}"),
            Self::Text(s) => f.write_str(s),
        }
    }
}

/* ----- PER-TICKER OUTCOMES ----- */

/// Why a ticker's row was replaced with the missing-data sentinel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum MissingReason {
    /// The batch response had no entry for the ticker.
    Ticker,
    /// The ticker's entry lacked the requested data category.
    Category(String),
    /// A record lacked a requested field.
    Field(String),
    /// A value that should hold a list of records did not.
    NotAList(String),
    /// The ticker returned no records at all.
    Empty,
    /// A price record carried a date that could not be parsed.
    BadDate(String),
    /// A price record carried a non-numeric close.
    BadNumber(String),
}

impl fmt::Display for MissingReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Ticker => f.write_str("ticker absent from response"),
            Self::Category(c) => write!(f, "category `{c}` absent"),
            Self::Field(k) => write!(f, "field `{k}` absent"),
            Self::NotAList(k) => write!(f, "`{k}` is not a list"),
            Self::Empty => f.write_str("no records"),
            Self::BadDate(d) => write!(f, "unparsable date `{d}`"),
            Self::BadNumber(v) => write!(f, "non-numeric value `{v}`"),
        }
    }
}

/// One ticker's row in an attribute table.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum Row {
    /// Extracted values, exactly as wide as the table's declared columns.
    Present(Vec<Cell>),
    /// Sentinel row; reads back as all nulls.
    Missing(MissingReason),
}

impl Row {
    pub const fn is_missing(&self) -> bool {
        matches!(self, Self::Missing(_))
    }
}

/* ----- REQUEST PARAMS ----- */

/// Reporting period for earnings and financial statements.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Period {
    #[default]
    Annual,
    Quarter,
}

impl Period {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Annual => "annual",
            Self::Quarter => "quarter",
        }
    }
}

/// Look-back range accepted by the `chart` category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ChartRange {
    D1,
    M1,
    M3,
    M6,
    Ytd,
    #[default]
    Y1,
    Y2,
    Y5,
}

impl ChartRange {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::D1 => "1d",
            Self::M1 => "1m",
            Self::M3 => "3m",
            Self::M6 => "6m",
            Self::Ytd => "ytd",
            Self::Y1 => "1y",
            Self::Y2 => "2y",
            Self::Y5 => "5y",
        }
    }
}

/// Instrument type code used by the reference-data endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub enum InstrumentType {
    /// `cs`
    CommonStock,
    /// `et`
    Etf,
    /// `ps`
    PreferredStock,
    /// `ad`
    Adr,
    /// `re`
    Reit,
    /// `ce`
    ClosedEndFund,
    /// `si`
    SecondaryIssue,
    /// `lp`
    LimitedPartnership,
    /// `wt`
    Warrant,
    /// `ut`
    Unit,
    /// `rt`
    Right,
    /// Any code not listed above, kept verbatim.
    Other(String),
}

impl InstrumentType {
    pub fn code(&self) -> &str {
        match self {
            Self::CommonStock => "cs",
            Self::Etf => "et",
            Self::PreferredStock => "ps",
            Self::Adr => "ad",
            Self::Reit => "re",
            Self::ClosedEndFund => "ce",
            Self::SecondaryIssue => "si",
            Self::LimitedPartnership => "lp",
            Self::Warrant => "wt",
            Self::Unit => "ut",
            Self::Right => "rt",
            Self::Other(s) => s,
        }
    }
}

impl From<&str> for InstrumentType {
    fn from(code: &str) -> Self {
        match code {
            "cs" => Self::CommonStock,
            "et" => Self::Etf,
            "ps" => Self::PreferredStock,
            "ad" => Self::Adr,
            "re" => Self::Reit,
            "ce" => Self::ClosedEndFund,
            "si" => Self::SecondaryIssue,
            "lp" => Self::LimitedPartnership,
            "wt" => Self::Warrant,
            "ut" => Self::Unit,
            "rt" => Self::Right,
            other => Self::Other(other.to_string()),
        }
    }
}

impl fmt::Display for InstrumentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}
