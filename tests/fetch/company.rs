use crate::common::{client_for, client_with_batch_size, mock_batch, setup_server};
use iex_rs::{Cell, CompanyInfoBuilder, IexError, MissingReason, Row};

#[tokio::test]
async fn company_fields_become_columns() {
    let server = setup_server();
    let body = r#"{
      "AAA": {"company": {"industry": "Software", "sector": "Technology"}},
      "BBB": {"company": {"industry": "Biotech", "sector": "Healthcare"}}
    }"#;
    let mock = mock_batch(&server, "company", "AAA, BBB", body);
    let client = client_for(&server);

    let t = iex_rs::company_info(&client, ["AAA", "BBB"], &["industry", "sector"])
        .await
        .unwrap();
    mock.assert();

    assert_eq!(t.columns(), ["industry", "sector"]);
    assert_eq!(t.value("BBB", "sector"), Some(&Cell::Text("Healthcare".into())));
    assert_eq!(t.missing().count(), 0);
}

#[tokio::test]
async fn symbols_are_sent_in_batches() {
    let server = setup_server();
    let first = mock_batch(
        &server,
        "stats",
        "AAA, BBB",
        r#"{"AAA":{"stats":{"sharesOutstanding":10}},"BBB":{"stats":{"sharesOutstanding":20}}}"#,
    );
    let second = mock_batch(
        &server,
        "stats",
        "CCC",
        r#"{"CCC":{"stats":{"sharesOutstanding":30}}}"#,
    );
    let client = client_with_batch_size(&server, 2);

    let t = CompanyInfoBuilder::new(&client, ["AAA", "BBB", "CCC"])
        .fields(["sharesOutstanding"])
        .category("stats")
        .fetch()
        .await
        .unwrap();
    first.assert();
    second.assert();

    assert_eq!(t.symbols().collect::<Vec<_>>(), ["AAA", "BBB", "CCC"]);
    assert_eq!(t.value("CCC", "sharesOutstanding"), Some(&Cell::Int(30)));
}

#[tokio::test]
async fn strict_extraction_fails_on_missing_field() {
    let server = setup_server();
    let _mock = mock_batch(
        &server,
        "company",
        "AAA, BBB",
        r#"{"AAA":{"company":{"industry":"Software"}},"BBB":{"company":{}}}"#,
    );
    let client = client_for(&server);

    let err = CompanyInfoBuilder::new(&client, ["AAA", "BBB"])
        .fields(["industry"])
        .fetch()
        .await
        .unwrap_err();

    match err {
        IexError::MissingField { symbol, field } => {
            assert_eq!(symbol, "BBB");
            assert_eq!(field, "industry");
        }
        other => panic!("expected MissingField, got {other:?}"),
    }
}

#[tokio::test]
async fn lenient_extraction_substitutes_sentinel_rows() {
    let server = setup_server();
    let _mock = mock_batch(
        &server,
        "company",
        "AAA, BBB",
        r#"{"AAA":{"company":{"industry":"Software"}}}"#,
    );
    let client = client_for(&server);

    let t = CompanyInfoBuilder::new(&client, ["AAA", "BBB"])
        .fields(["industry"])
        .lenient(true)
        .fetch()
        .await
        .unwrap();

    assert_eq!(t.row("BBB"), Some(&Row::Missing(MissingReason::Ticker)));
    assert_eq!(t.value("BBB", "industry"), Some(&Cell::Null));
}

#[tokio::test]
async fn strict_extraction_names_the_category_for_an_absent_ticker() {
    let server = setup_server();
    let _mock = mock_batch(
        &server,
        "stats",
        "AAA, BBB",
        r#"{"AAA":{"stats":{"sharesOutstanding":10}}}"#,
    );
    let client = client_for(&server);

    let err = CompanyInfoBuilder::new(&client, ["AAA", "BBB"])
        .fields(["sharesOutstanding"])
        .category("stats")
        .fetch()
        .await
        .unwrap_err();

    match err {
        IexError::MissingField { symbol, field } => {
            assert_eq!(symbol, "BBB");
            assert_eq!(field, "stats");
        }
        other => panic!("expected MissingField, got {other:?}"),
    }
}
