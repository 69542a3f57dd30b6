use crate::common::{client_for, mock_batch, setup_server};
use iex_rs::{Cell, EarningsBuilder, IexError, MissingReason, Row};

const BODY: &str = r#"{
  "AAA": {"earnings": {"symbol": "AAA", "earnings": [
    {"actualEPS": 2.1}, {"actualEPS": 1.9}, {"actualEPS": 1.7}, {"actualEPS": 1.5}
  ]}},
  "BBB": {"earnings": {"symbol": "BBB", "earnings": [
    {"actualEPS": 0.4}, {"consensusEPS": 0.3}
  ]}},
  "CCC": {"earnings": {"symbol": "CCC", "earnings": [{"actualEPS": 0.9}]}}
}"#;

#[tokio::test]
async fn failed_tickers_become_sentinels_without_erroring() {
    let server = setup_server();
    let mock = mock_batch(&server, "earnings", "AAA, BBB, CCC, DDD", BODY);
    let client = client_for(&server);

    let t = EarningsBuilder::new(&client, ["AAA", "BBB", "CCC", "DDD"])
        .fields(["actualEPS"])
        .fetch()
        .await
        .unwrap();
    mock.assert();

    assert_eq!(t.columns().len(), 4);
    assert_eq!(t.value("AAA", "actualEPS_4"), Some(&Cell::Float(1.5)));
    assert_eq!(
        t.row("BBB"),
        Some(&Row::Missing(MissingReason::Field("actualEPS".into())))
    );
    assert_eq!(t.row("DDD"), Some(&Row::Missing(MissingReason::Ticker)));
    assert_eq!(t.value("CCC", "actualEPS_1"), Some(&Cell::Float(0.9)));
    assert_eq!(t.value("CCC", "actualEPS_2"), Some(&Cell::Null));

    for (_, cells) in t.expanded_rows() {
        assert_eq!(cells.len(), t.columns().len());
    }
}

#[tokio::test]
async fn period_count_sets_the_width() {
    let server = setup_server();
    let _mock = mock_batch(&server, "earnings", "AAA, BBB, CCC", BODY);
    let client = client_for(&server);

    let t = EarningsBuilder::new(&client, ["AAA", "BBB", "CCC"])
        .fields(["actualEPS"])
        .periods(2)
        .fetch()
        .await
        .unwrap();

    assert_eq!(t.columns(), ["actualEPS_1", "actualEPS_2"]);
    assert_eq!(t.value("AAA", "actualEPS_2"), Some(&Cell::Float(1.9)));
}

#[tokio::test]
async fn zero_periods_is_rejected() {
    let client = iex_rs::IexClient::default();
    let err = EarningsBuilder::new(&client, ["AAA"])
        .fields(["actualEPS"])
        .periods(0)
        .fetch()
        .await
        .unwrap_err();
    assert!(matches!(err, IexError::InvalidParams(_)));
}
