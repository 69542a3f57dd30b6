use crate::common::{UNIVERSE, client_for, mock_batch, mock_symbols, setup_server};
use httpmock::Method::GET;
use iex_rs::{Cell, FinancialsBuilder, IexError, MissingReason, Period, Row, SymbolsBuilder};

#[tokio::test]
async fn non_common_stock_is_rejected_before_any_request() {
    let server = setup_server();
    let _symbols = mock_symbols(&server, UNIVERSE);
    let batch = server.mock(|when, then| {
        when.method(GET).path(crate::common::BATCH_PATH);
        then.status(200).body("{}");
    });
    let client = client_for(&server);

    let universe = SymbolsBuilder::new(&client).kind("cs").fetch().await.unwrap();
    let err = FinancialsBuilder::new(&client, ["AAA", "SPY", "PFX"], &universe)
        .fetch()
        .await
        .unwrap_err();

    match err {
        IexError::NotCommonStock { symbols } => assert_eq!(symbols, ["SPY", "PFX"]),
        other => panic!("expected NotCommonStock, got {other:?}"),
    }
    assert_eq!(batch.calls(), 0);
}

#[tokio::test]
async fn columns_come_from_first_successful_record() {
    let server = setup_server();
    let _symbols = mock_symbols(&server, UNIVERSE);
    let body = r#"{
      "AAA": {"financials": {"symbol": "AAA", "financials": []}},
      "BBB": {"financials": {"symbol": "BBB", "financials": [
        {"reportDate": "2024-12-31", "totalRevenue": 500, "totalDebt": 120},
        {"reportDate": "2023-12-31", "totalRevenue": 450, "totalDebt": 100}
      ]}}
    }"#;
    let mock = server.mock(|when, then| {
        when.method(GET)
            .path(crate::common::BATCH_PATH)
            .query_param("types", "financials")
            .query_param("period", "annual");
        then.status(200)
            .header("content-type", "application/json")
            .body(body);
    });
    let client = client_for(&server);

    let universe = SymbolsBuilder::new(&client).kind("cs").fetch().await.unwrap();
    let t = FinancialsBuilder::new(&client, universe.symbols(), &universe)
        .period(Period::Annual)
        .fetch()
        .await
        .unwrap();
    mock.assert();

    assert_eq!(t.columns(), ["reportDate", "totalRevenue", "totalDebt"]);
    assert_eq!(t.row("AAA"), Some(&Row::Missing(MissingReason::Empty)));
    assert_eq!(t.value("BBB", "totalRevenue"), Some(&Cell::Int(500)));
}

#[tokio::test]
async fn quarterly_period_is_sent() {
    let server = setup_server();
    let _symbols = mock_symbols(&server, UNIVERSE);
    let mock = server.mock(|when, then| {
        when.method(GET)
            .path(crate::common::BATCH_PATH)
            .query_param("period", "quarter");
        then.status(200)
            .body(r#"{"AAA":{"financials":{"financials":[{"netIncome":3}]}}}"#);
    });
    let client = client_for(&server);

    let universe = SymbolsBuilder::new(&client).kind("cs").fetch().await.unwrap();
    let t = FinancialsBuilder::new(&client, ["AAA"], &universe)
        .period(Period::Quarter)
        .fetch()
        .await
        .unwrap();
    mock.assert();
    assert_eq!(t.value("AAA", "netIncome"), Some(&Cell::Int(3)));
}

#[tokio::test]
async fn batch_helper_matches_symbol_list() {
    let server = setup_server();
    let _symbols = mock_symbols(&server, UNIVERSE);
    let mock = mock_batch(
        &server,
        "financials",
        "BBB",
        r#"{"BBB":{"financials":{"financials":[{"cashFlow":9}]}}}"#,
    );
    let client = client_for(&server);

    let universe = SymbolsBuilder::new(&client).kind("cs").fetch().await.unwrap();
    let t = FinancialsBuilder::new(&client, ["BBB"], &universe)
        .fetch()
        .await
        .unwrap();
    mock.assert();
    assert_eq!(t.len(), 1);
}
