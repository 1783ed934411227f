//! Main REST client implementation

use kraken_auth::Credentials;
use serde::de::DeserializeOwned;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use tracing::info;

use crate::dispatch::Dispatcher;
use crate::endpoints::{AccountEndpoints, FundingEndpoints, MarketEndpoints, TradingEndpoints};
use crate::error::{RestError, RestResult};
use crate::method::Method;
use crate::params::Params;
use crate::transport::{HttpTransport, ReqwestTransport};
use crate::types::{
    Balances, CancelOrderResult, OhlcResponse, OrderBook, OrderRequest, OrderResponse,
    ServerTime, TickerInfo, TradesResponse,
};

/// Default request timeout
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Production API endpoint
pub const DEFAULT_BASE_URL: &str = "https://api.kraken.com";

/// Default User-Agent header
pub const DEFAULT_USER_AGENT: &str = concat!("kraken-rest/", env!("CARGO_PKG_VERSION"));

/// Kraken REST API client
///
/// Provides access to both public and private endpoints. Cloning is cheap;
/// clones share the transport and credentials.
///
/// # Example
///
/// ```no_run
/// use kraken_rest::{Credentials, KrakenRestClient};
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     // Public endpoints only
///     let client = KrakenRestClient::new()?;
///     let ticker = client.get_ticker("XBTUSD").await?;
///
///     // With authentication for private endpoints
///     let creds = Credentials::from_env()?;
///     let auth_client = KrakenRestClient::with_credentials(creds)?;
///     let balance = auth_client.get_balance().await?;
///
///     Ok(())
/// }
/// ```
#[derive(Clone)]
pub struct KrakenRestClient {
    dispatcher: Dispatcher,
}

impl KrakenRestClient {
    /// Create a new client without authentication
    ///
    /// Only public endpoints will be available.
    pub fn new() -> RestResult<Self> {
        Self::with_config(ClientConfig::default())
    }

    /// Create a new client with credentials
    ///
    /// All endpoints (public and private) will be available.
    pub fn with_credentials(credentials: Credentials) -> RestResult<Self> {
        Self::with_config(ClientConfig::new().with_credentials(credentials))
    }

    /// Create a new client with custom configuration
    pub fn with_config(config: ClientConfig) -> RestResult<Self> {
        let transport = ReqwestTransport::new(Duration::from_secs(config.timeout_secs))?;
        Ok(Self::with_transport(config, Arc::new(transport)))
    }

    /// Create a client that sends requests through `transport`
    ///
    /// `timeout_secs` is ignored; timeouts are the transport's business.
    pub fn with_transport(config: ClientConfig, transport: Arc<dyn HttpTransport>) -> Self {
        let ClientConfig {
            credentials,
            timeout_secs: _,
            user_agent,
            base_url,
        } = config;

        info!(
            base_url = %base_url,
            authenticated = credentials.is_some(),
            "Created Kraken REST client"
        );

        Self {
            dispatcher: Dispatcher::new(transport, credentials, base_url, user_agent),
        }
    }

    /// Check if the client has credentials for private endpoints
    pub fn has_credentials(&self) -> bool {
        self.dispatcher.has_credentials()
    }

    /// Call any method and decode its result into `T`
    ///
    /// Use `serde_json::Value` for `T` to get the raw result.
    pub async fn execute<T: DeserializeOwned>(&self, method: Method, params: Params) -> RestResult<T> {
        self.dispatcher.execute(method, params).await
    }

    // ========================================================================
    // Public Market Endpoints
    // ========================================================================

    /// Get market endpoints
    pub fn market(&self) -> MarketEndpoints<'_> {
        MarketEndpoints::new(&self.dispatcher)
    }

    /// Get server time
    pub async fn get_server_time(&self) -> RestResult<ServerTime> {
        self.market().get_server_time().await
    }

    /// Get ticker information for a trading pair
    ///
    /// # Arguments
    /// * `pair` - Trading pair (e.g., "XBTUSD", "ETHUSD")
    pub async fn get_ticker(&self, pair: &str) -> RestResult<HashMap<String, TickerInfo>> {
        self.market().get_ticker(&[pair]).await
    }

    /// Get OHLC candles at the given interval in minutes
    pub async fn get_ohlc(&self, pair: &str, interval: u32) -> RestResult<OhlcResponse> {
        self.market().get_ohlc(pair, Some(interval), None).await
    }

    /// Get recent trades for a trading pair
    pub async fn get_recent_trades(&self, pair: &str) -> RestResult<TradesResponse> {
        self.market().get_recent_trades(pair, None).await
    }

    /// Get orderbook depth for a trading pair
    pub async fn get_orderbook(&self, pair: &str, count: Option<u32>) -> RestResult<OrderBook> {
        self.market().get_orderbook(pair, count).await
    }

    // ========================================================================
    // Private Account Endpoints
    // ========================================================================

    /// Get account endpoints (requires credentials)
    pub fn account(&self) -> RestResult<AccountEndpoints<'_>> {
        self.require_credentials()?;
        Ok(AccountEndpoints::new(&self.dispatcher))
    }

    /// Get account balance
    pub async fn get_balance(&self) -> RestResult<Balances> {
        self.account()?.get_balance().await
    }

    // ========================================================================
    // Private Trading Endpoints
    // ========================================================================

    /// Get trading endpoints (requires credentials)
    pub fn trading(&self) -> RestResult<TradingEndpoints<'_>> {
        self.require_credentials()?;
        Ok(TradingEndpoints::new(&self.dispatcher))
    }

    /// Place a new order
    pub async fn add_order(&self, order: &OrderRequest) -> RestResult<OrderResponse> {
        self.trading()?.add_order(order).await
    }

    /// Cancel an order by transaction ID
    pub async fn cancel_order(&self, txid: &str) -> RestResult<CancelOrderResult> {
        self.trading()?.cancel_order(txid).await
    }

    // ========================================================================
    // Private Funding Endpoints
    // ========================================================================

    /// Get funding endpoints (requires credentials)
    pub fn funding(&self) -> RestResult<FundingEndpoints<'_>> {
        self.require_credentials()?;
        Ok(FundingEndpoints::new(&self.dispatcher))
    }

    fn require_credentials(&self) -> RestResult<()> {
        if self.has_credentials() {
            Ok(())
        } else {
            Err(RestError::AuthRequired)
        }
    }
}

impl std::fmt::Debug for KrakenRestClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("KrakenRestClient")
            .field("base_url", &self.dispatcher.base_url())
            .field("has_credentials", &self.has_credentials())
            .finish()
    }
}

/// Client configuration
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// API credentials (optional)
    pub credentials: Option<Credentials>,
    /// Request timeout in seconds
    pub timeout_secs: u64,
    /// User-Agent sent with every request
    pub user_agent: String,
    /// API base URL, without the version segment
    pub base_url: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            credentials: None,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            user_agent: DEFAULT_USER_AGENT.to_string(),
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }
}

impl ClientConfig {
    /// Create a new configuration builder
    pub fn new() -> Self {
        Self::default()
    }

    /// Set credentials
    pub fn with_credentials(mut self, credentials: Credentials) -> Self {
        self.credentials = Some(credentials);
        self
    }

    /// Set timeout
    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }

    /// Set user agent
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// Set base URL (e.g. a local test server)
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }
}
