use thiserror::Error;

/// The primary error type for all fallible operations in this crate.
#[derive(Debug, Error)]
pub enum IexError {
    /// An error occurred during an HTTP request.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// A provided URL could not be parsed.
    #[error("Invalid URL: {0}")]
    Url(#[from] url::ParseError),

    /// The response body was not valid JSON.
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    /// Writing a table as CSV failed.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// An I/O error while writing an export.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The server returned an unexpected or unsuccessful HTTP status code.
    #[error("Unexpected response status: {status} at {url}")]
    Status {
        /// The HTTP status code.
        status: u16,
        /// The URL that returned the error.
        url: String,
    },

    /// A strict extraction could not find a requested field for a symbol.
    #[error("missing field `{field}` for symbol {symbol}")]
    MissingField {
        /// The ticker whose payload lacked the field.
        symbol: String,
        /// The requested field (or the category that contains it).
        field: String,
    },

    /// Financial statements were requested for symbols outside the common-stock universe.
    #[error("financials require common stocks only; not common stock: {}", .symbols.join(", "))]
    NotCommonStock {
        /// Offending symbols, in request order.
        symbols: Vec<String>,
    },

    /// A table operation named a column that does not exist.
    #[error("unknown column: {0}")]
    UnknownColumn(String),

    /// A join or derivation would produce two columns with the same name.
    #[error("duplicate column: {0}")]
    DuplicateColumn(String),

    /// Invalid parameters were provided for a request or table operation.
    #[error("Invalid parameters: {0}")]
    InvalidParams(String),

    /// The data received from the API was in an unexpected format.
    #[error("Data format unexpected: {0}")]
    Data(String),
}
