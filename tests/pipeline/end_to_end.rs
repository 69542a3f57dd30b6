use crate::common::{client_for, mock_batch, mock_symbols, setup_server};
use iex_rs::{Cell, MarketTableBuilder};

const UNIVERSE: &str = r#"[
  {"symbol":"AAA","type":"cs"},
  {"symbol":"XYZ","type":"et"},
  {"symbol":"BBB","type":"cs"}
]"#;

const COMPANY: &str = r#"{
  "AAA": {"company": {"industry": "Tech", "sector": "Technology", "companyName": "Alpha"}},
  "BBB": {"company": {"industry": "Tech", "sector": "Technology", "companyName": "Beta"}}
}"#;

const STATS: &str = r#"{
  "AAA": {"stats": {"sharesOutstanding": 10}},
  "BBB": {"stats": {"sharesOutstanding": 20}}
}"#;

const FINANCIALS: &str = r#"{
  "AAA": {"financials": {"symbol": "AAA", "financials": [{"totalRevenue": 100, "totalDebt": 7, "totalLiabilities": null}]}},
  "BBB": {"financials": {"symbol": "BBB", "financials": [{"totalRevenue": 80, "totalDebt": 3, "totalLiabilities": 2}]}}
}"#;

const CHART: &str = r#"{
  "AAA": {"chart": [{"date": "2024-01-02", "close": 4.0}, {"date": "2024-01-03", "close": 6.0}]},
  "BBB": {"chart": [{"date": "2024-01-02", "close": 2.5}]}
}"#;

#[tokio::test]
async fn market_cap_table_from_mocked_endpoints() {
    let server = setup_server();
    let symbols = mock_symbols(&server, UNIVERSE);
    let company = mock_batch(&server, "company", "AAA, BBB", COMPANY);
    let stats = mock_batch(&server, "stats", "AAA, BBB", STATS);
    let financials = mock_batch(&server, "financials", "AAA, BBB", FINANCIALS);
    let chart = mock_batch(&server, "chart", "AAA, BBB", CHART);
    let client = client_for(&server);

    let t = iex_rs::market_table(&client).await.unwrap();
    for m in [&symbols, &company, &stats, &financials, &chart] {
        m.assert();
    }

    assert_eq!(t.index(), ["AAA", "BBB"]);
    assert_eq!(
        t.columns(),
        [
            "industry_Tech",
            "sector_Technology",
            "totalRevenue",
            "totalDebt",
            "totalLiabilities",
            "marketCap"
        ]
    );
    assert_eq!(t.value("AAA", "marketCap"), Some(&Cell::Float(50.0)));
    assert_eq!(t.value("BBB", "marketCap"), Some(&Cell::Float(50.0)));
    assert_eq!(t.value("BBB", "industry_Tech"), Some(&Cell::Int(1)));
}

#[tokio::test]
async fn legacy_export_steps() {
    let server = setup_server();
    let _symbols = mock_symbols(&server, UNIVERSE);
    let _company = mock_batch(&server, "company", "AAA, BBB", COMPANY);
    let _stats = mock_batch(&server, "stats", "AAA, BBB", STATS);
    let _financials = mock_batch(&server, "financials", "AAA, BBB", FINANCIALS);
    let _chart = mock_batch(&server, "chart", "AAA, BBB", CHART);
    let client = client_for(&server);

    let t = MarketTableBuilder::new(&client)
        .extra_company_fields(["companyName"])
        .combine_debt(true)
        .build()
        .await
        .unwrap();

    assert!(!t.columns().iter().any(|c| c == "totalLiabilities"));
    assert_eq!(t.value("AAA", "totalDebt"), Some(&Cell::Float(7.0)));
    assert_eq!(t.value("BBB", "totalDebt"), Some(&Cell::Float(5.0)));
    assert_eq!(t.value("BBB", "companyName"), Some(&Cell::Text("Beta".into())));

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("market.csv");
    t.write_csv(std::fs::File::create(&path).unwrap(), false).unwrap();
    let csv = std::fs::read_to_string(&path).unwrap();
    let mut lines = csv.lines();
    assert_eq!(
        lines.next(),
        Some("companyName,industry_Tech,sector_Technology,totalRevenue,totalDebt,marketCap")
    );
    assert_eq!(lines.next(), Some("Alpha,1,1,100,7,50"));
    assert_eq!(lines.count(), 1);
}
