use crate::common::{UNIVERSE, client_for, mock_symbols, setup_server};
use iex_rs::{IexError, InstrumentType, SymbolsBuilder};

#[tokio::test]
async fn common_stock_filter_keeps_source_order() {
    let server = setup_server();
    let mock = mock_symbols(&server, UNIVERSE);
    let client = client_for(&server);

    let universe = SymbolsBuilder::new(&client).kind("cs").fetch().await.unwrap();
    mock.assert();

    assert_eq!(universe.symbols(), ["AAA", "BBB"]);
    assert_eq!(universe.filter(), Some(&InstrumentType::CommonStock));
    assert_eq!(universe.entries()[0].name.as_deref(), Some("Alpha Corp"));
}

#[tokio::test]
async fn unfiltered_universe_is_complete() {
    let server = setup_server();
    let _mock = mock_symbols(&server, UNIVERSE);
    let client = client_for(&server);

    let universe = iex_rs::symbols(&client, None).await.unwrap();
    assert_eq!(universe.symbols(), ["AAA", "SPY", "BBB", "PFX"]);
    assert!(universe.filter().is_none());
}

#[tokio::test]
async fn non_array_body_is_a_data_error() {
    let server = setup_server();
    let _mock = mock_symbols(&server, r#"{"error":"nope"}"#);
    let client = client_for(&server);

    let err = SymbolsBuilder::new(&client).fetch().await.unwrap_err();
    assert!(matches!(err, IexError::Data(_)), "got {err:?}");
}
