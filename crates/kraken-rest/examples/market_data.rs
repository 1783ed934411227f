//! Example: public market data
//!
//! Fetches server time, ticker, order book, recent trades and candles for
//! BTC/USD. No credentials needed.
//!
//! Run with: RUST_LOG=kraken_rest=debug cargo run -p kraken-rest --example market_data

use kraken_rest::KrakenRestClient;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let client = KrakenRestClient::new()?;

    let time = client.get_server_time().await?;
    println!("Server time: {} ({})", time.unixtime, time.rfc1123);

    let tickers = client.get_ticker("XBTUSD").await?;
    for (pair, ticker) in &tickers {
        println!(
            "{}: last {:?}, bid {:?}, ask {:?}",
            pair,
            ticker.last_price(),
            ticker.bid_price(),
            ticker.ask_price()
        );
    }

    let book = client.get_orderbook("XBTUSD", Some(5)).await?;
    println!("\nTop of book:");
    for (bid, ask) in book.bids.iter().zip(&book.asks) {
        println!(
            "  {:>12.1} x {:<10.4} | {:>12.1} x {:<10.4}",
            bid.price, bid.volume, ask.price, ask.volume
        );
    }
    if let Some(spread) = book.spread() {
        println!("  spread: {:.1}", spread);
    }

    let trades = client.get_recent_trades("XBTUSD").await?;
    println!("\nLast trades on {} (cursor {}):", trades.pair, trades.last);
    for trade in trades.trades.iter().rev().take(5) {
        println!(
            "  {} {} {} @ {} ({})",
            trade.time,
            if trade.is_buy() { "buy " } else { "sell" },
            trade.volume_raw,
            trade.price_raw,
            if trade.is_market() { "market" } else { "limit" }
        );
    }

    let ohlc = client.get_ohlc("XBTUSD", 60).await?;
    if let Some(candle) = ohlc.candles.last() {
        println!(
            "\nLatest hourly candle: O {} H {} L {} C {} V {:.4} ({} trades)",
            candle.open, candle.high, candle.low, candle.close, candle.volume, candle.count
        );
    }

    Ok(())
}
