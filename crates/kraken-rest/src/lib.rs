//! REST API client for Kraken cryptocurrency exchange
//!
//! This crate provides a REST API client for Kraken covering market data,
//! account queries, order placement and funding operations.
//!
//! # Features
//!
//! - **Market Data**: Server time, assets, ticker, orderbook, OHLC, recent trades and spreads
//! - **Account**: Balances, trade history, open/closed orders, ledgers
//! - **Trading**: Place and cancel orders
//! - **Funding**: Deposit/withdraw operations
//!
//! Every call is a single POST. Kraken's `{"error": [...], "result": ...}`
//! envelope is unwrapped before anything reaches the caller, and positional
//! market data arrays (trades, candles, book levels) come back as typed
//! records.
//!
//! # Authentication
//!
//! Private endpoints require API credentials. Requests are signed with
//! HMAC-SHA512 by the `kraken-auth` crate.
//!
//! # Example
//!
//! ```no_run
//! use kraken_rest::{Credentials, KrakenRestClient};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     // Public endpoints (no auth required)
//!     let client = KrakenRestClient::new()?;
//!     let book = client.get_orderbook("XBTUSD", Some(10)).await?;
//!     println!("Best bid: {:?}", book.best_bid());
//!
//!     // Private endpoints (auth required)
//!     let creds = Credentials::from_env()?;
//!     let auth_client = KrakenRestClient::with_credentials(creds)?;
//!     let balance = auth_client.get_balance().await?;
//!     println!("USD: {:?}", balance.get("ZUSD"));
//!
//!     Ok(())
//! }
//! ```
//!
//! # Rate Limiting
//!
//! Nothing here retries or throttles. Kraken's rate limit errors surface as
//! [`RestError::Api`]; see [`RestError::is_rate_limited`].

pub mod client;
pub mod dispatch;
pub mod endpoints;
pub mod envelope;
pub mod error;
pub mod method;
pub mod params;
pub mod parse;
pub mod transport;
pub mod types;

// Re-export main types
pub use client::{ClientConfig, KrakenRestClient};
pub use dispatch::Dispatcher;
pub use error::{ApiError, ErrorCategory, ErrorKind, RestError, RestResult};
pub use kraken_auth::Credentials;
pub use method::Method;
pub use params::{Options, Params};
pub use transport::{HttpRequest, HttpResponse, HttpTransport, ReqwestTransport, TransportError};

#[cfg(any(test, feature = "test-utils"))]
pub use transport::MockTransport;

// Re-export endpoint-specific types
pub use types::{
    // Market data
    AssetInfo, AssetPairInfo, Candle, OhlcResponse, OrderBook, OrderBookLevel, ServerTime,
    Spread, SpreadResponse, TickerInfo, Trade, TradeKind, TradesResponse,
    // Account
    Balances, ExtendedBalance, OrderInfo, TradeHistoryEntry,
    // Trading
    CancelOrderResult, OrderFlag, OrderRequest, OrderResponse, OrderSide, OrderType,
    // Funding
    DepositAddress, DepositMethod, WithdrawInfo,
};
