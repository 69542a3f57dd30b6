#![allow(dead_code)]

use httpmock::{Method::GET, Mock, MockServer};
use iex_rs::IexClient;
use url::Url;

pub const BATCH_PATH: &str = "/1.0/stock/market/batch";
pub const REF_DATA_PATH: &str = "/1.0/ref-data/symbols";

pub fn setup_server() -> MockServer {
    MockServer::start()
}

/// A client pointed at the mock server for both endpoints.
pub fn client_for(server: &MockServer) -> IexClient {
    client_with_batch_size(server, 100)
}

pub fn client_with_batch_size(server: &MockServer, size: usize) -> IexClient {
    IexClient::builder()
        .base_batch(Url::parse(&server.url(BATCH_PATH)).unwrap())
        .base_ref_data(Url::parse(&server.url(REF_DATA_PATH)).unwrap())
        .batch_size(size)
        .build()
        .unwrap()
}

pub fn mock_symbols<'a>(server: &'a MockServer, body: &'a str) -> Mock<'a> {
    server.mock(|when, then| {
        when.method(GET).path(REF_DATA_PATH);
        then.status(200)
            .header("content-type", "application/json")
            .body(body);
    })
}

/// Mocks one batch request for `types`, matching the comma-space joined symbol list.
pub fn mock_batch<'a>(
    server: &'a MockServer,
    types: &'a str,
    symbols: &'a str,
    body: &'a str,
) -> Mock<'a> {
    server.mock(|when, then| {
        when.method(GET)
            .path(BATCH_PATH)
            .query_param("types", types)
            .query_param("symbols", symbols);
        then.status(200)
            .header("content-type", "application/json")
            .body(body);
    })
}

pub const UNIVERSE: &str = r#"[
  {"symbol":"AAA","name":"Alpha Corp","date":"2024-06-03","isEnabled":true,"type":"cs","iexId":"1"},
  {"symbol":"SPY","name":"SPDR S&P 500","date":"2024-06-03","isEnabled":true,"type":"et","iexId":"2"},
  {"symbol":"BBB","name":"Beta Inc","date":"2024-06-03","isEnabled":true,"type":"cs","iexId":"3"},
  {"symbol":"PFX","name":"Pref Series A","date":"2024-06-03","isEnabled":true,"type":"ps","iexId":"4"}
]"#;
