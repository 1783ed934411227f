//! Public market data through the mock transport

mod common;

use common::*;
use kraken_rest::RestError;
use rust_decimal_macros::dec;

#[tokio::test]
async fn test_ticker() {
    let (client, transport) = public_client();
    transport.push_json(TICKER);

    let tickers = client.market().get_ticker(&["XBTUSD", "ETHUSD"]).await.unwrap();

    let ticker = &tickers["XXBTZUSD"];
    assert_eq!(ticker.bid_price(), Some(dec!(30300.0)));
    assert_eq!(ticker.t, vec![34619, 38907]);
    assert_eq!(transport.last_request().unwrap().body, "pair=XBTUSD%2CETHUSD");
}

#[tokio::test]
async fn test_recent_trades_under_canonical_pair() {
    let (client, transport) = public_client();
    transport.push_json(TRADES);

    let response = client.get_recent_trades("XBTUSD").await.unwrap();

    assert_eq!(response.pair, "XXBTZUSD");
    assert_eq!(response.last, 1688671969993150842);
    assert_eq!(response.trades.len(), 3);

    let first = &response.trades[0];
    assert!(first.is_buy() && first.is_market());
    assert_eq!(first.time, 1688669597);
    assert_eq!(first.trade_id, Some(55631));
    assert_eq!(first.price_decimal(), Some(dec!(30243.4)));

    let second = &response.trades[1];
    assert!(second.is_sell() && second.is_limit());

    let legacy = &response.trades[2];
    assert_eq!(legacy.price, 4000.0);
    assert_eq!(legacy.volume, 0.5);
    assert_eq!(legacy.time, 1600000000);
    assert_eq!(legacy.misc, "text");
    assert_eq!(legacy.trade_id, None);
}

#[tokio::test]
async fn test_recent_trades_with_since() {
    let (client, transport) = public_client();
    transport.push_json(TRADES);

    client
        .market()
        .get_recent_trades("XXBTZUSD", Some(1688669000))
        .await
        .unwrap();

    assert_eq!(
        transport.last_request().unwrap().body,
        "pair=XXBTZUSD&since=1688669000"
    );
}

#[tokio::test]
async fn test_ohlc() {
    let (client, transport) = public_client();
    transport.push_json(OHLC);

    let ohlc = client.get_ohlc("XBTUSD", 60).await.unwrap();

    assert_eq!(ohlc.candles.len(), 2);
    assert_eq!(ohlc.last, 1688672160);
    assert_eq!(ohlc.candles[1].close, 30300.0);
    assert_eq!(ohlc.candles[1].count, 18);
    assert_eq!(transport.last_request().unwrap().body, "pair=XBTUSD&interval=60");
}

#[tokio::test]
async fn test_ohlc_short_candle_fails_whole_call() {
    let (client, transport) = public_client();
    transport.push_json(
        r#"{"error": [], "result": {"XXBTZUSD": [[1688671200, "1", "1", "1", "1", "1", 23]], "last": 1}}"#,
    );

    let err = client.market().get_ohlc_minutes("XBTUSD").await.unwrap_err();
    assert!(matches!(err, RestError::Decode(_)));
}

#[tokio::test]
async fn test_spreads() {
    let (client, transport) = public_client();
    transport.push_json(SPREAD);

    let spreads = client.market().get_recent_spreads("XBTUSD", None).await.unwrap();

    assert_eq!(spreads.spreads.len(), 2);
    assert_eq!(spreads.spreads[1].ask, 30296.7);
    assert_eq!(spreads.last, 1688672106);
}

#[tokio::test]
async fn test_orderbook_keeps_every_returned_level() {
    let (client, transport) = public_client();
    transport.push_json(depth_response(15));

    let book = client.get_orderbook("XBTUSD", Some(10)).await.unwrap();

    assert_eq!(book.asks.len(), 15);
    assert_eq!(book.bids.len(), 2);
    assert_eq!(book.best_ask(), Some(30300.0));
    assert_eq!(book.best_bid(), Some(30299.9));
    assert_eq!(transport.last_request().unwrap().body, "pair=XBTUSD&count=10");
}

#[tokio::test]
async fn test_orderbook_for_missing_pair() {
    let (client, transport) = public_client();
    transport.push_json(r#"{"error": [], "result": {}}"#);

    let err = client.get_orderbook("XBTUSD", None).await.unwrap_err();
    assert!(matches!(err, RestError::Decode(_)));
}

#[tokio::test]
async fn test_decoding_is_idempotent() {
    let (client, transport) = public_client();
    transport.push_json(TRADES);
    transport.push_json(TRADES);

    let first = client.get_recent_trades("XBTUSD").await.unwrap();
    let second = client.get_recent_trades("XBTUSD").await.unwrap();
    assert_eq!(first, second);
}
