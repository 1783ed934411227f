//! Example: private account queries
//!
//! Reads KRAKEN_API_KEY and KRAKEN_PRIVATE_KEY from the environment and
//! prints balances, trade balance and open orders. Nothing is traded.
//!
//! Run with: cargo run -p kraken-rest --example account_balance

use kraken_rest::{Credentials, KrakenRestClient, Options};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let credentials = match Credentials::from_env() {
        Ok(credentials) => credentials,
        Err(e) => {
            eprintln!("{}", e);
            eprintln!("Set KRAKEN_API_KEY and KRAKEN_PRIVATE_KEY to run this example.");
            return Ok(());
        }
    };

    let client = KrakenRestClient::with_credentials(credentials)?;
    let account = client.account()?;

    let balances = account.get_balance().await?;
    println!("Balances:");
    for (asset, amount) in balances.non_zero() {
        println!("  {:<8} {}", asset, amount);
    }

    let mut options = Options::new();
    options.insert("asset".to_string(), "ZUSD".to_string());
    let trade_balance = account.get_trade_balance(&options).await?;
    println!("\nEquivalent balance (USD): {}", trade_balance.eb);

    let open = account.get_open_orders(&Options::new()).await?;
    println!("\nOpen orders: {}", open.open.len());
    for (txid, order) in &open.open {
        println!("  {} {}", txid, order.descr.order);
    }

    match client.execute::<serde_json::Value>(kraken_rest::Method::TradeVolume, Default::default()).await {
        Ok(volume) => println!("\n30-day volume: {}", volume["volume"]),
        Err(e) if e.is_rate_limited() => println!("\nRate limited, try again later"),
        Err(e) => return Err(e.into()),
    }

    Ok(())
}
