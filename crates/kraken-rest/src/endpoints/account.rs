//! Private account endpoints
//!
//! These endpoints require authentication. Optional arguments are passed as
//! an [`Options`] map; keys a method does not understand are dropped.

use serde::Deserialize;
use std::collections::HashMap;
use tracing::instrument;

use crate::dispatch::Dispatcher;
use crate::error::RestResult;
use crate::method::Method;
use crate::params::{Options, Params};
use crate::parse;
use crate::types::{Balances, ExtendedBalance, OrderInfo, TradeHistoryEntry};

/// Private account endpoints
pub struct AccountEndpoints<'a> {
    dispatcher: &'a Dispatcher,
}

impl<'a> AccountEndpoints<'a> {
    pub fn new(dispatcher: &'a Dispatcher) -> Self {
        Self { dispatcher }
    }

    /// Get account balance
    #[instrument(skip(self))]
    pub async fn get_balance(&self) -> RestResult<Balances> {
        let raw: HashMap<String, String> = self.dispatcher.execute(Method::Balance, Params::new()).await?;
        parse::parse_balances(&raw)
    }

    /// Get extended balance with hold amounts
    #[instrument(skip(self))]
    pub async fn get_extended_balance(&self) -> RestResult<HashMap<String, ExtendedBalance>> {
        self.dispatcher.execute(Method::BalanceEx, Params::new()).await
    }

    /// Get trade balance (margin info)
    ///
    /// Options: `aclass`, `asset`
    #[instrument(skip(self))]
    pub async fn get_trade_balance(&self, options: &Options) -> RestResult<TradeBalance> {
        let mut params = Params::new();
        params.extend_from_options(options, &["aclass", "asset"]);
        self.dispatcher.execute(Method::TradeBalance, params).await
    }

    /// Get trade volume
    ///
    /// Options: `pair`, `fee-info`
    #[instrument(skip(self))]
    pub async fn get_trade_volume(&self, options: &Options) -> RestResult<TradeVolume> {
        let mut params = Params::new();
        params.extend_from_options(options, &["pair", "fee-info"]);
        self.dispatcher.execute(Method::TradeVolume, params).await
    }

    /// Get open orders
    ///
    /// Options: `trades`, `userref`
    #[instrument(skip(self))]
    pub async fn get_open_orders(&self, options: &Options) -> RestResult<OpenOrdersResult> {
        let mut params = Params::new();
        params.extend_from_options(options, &["trades", "userref"]);
        self.dispatcher.execute(Method::OpenOrders, params).await
    }

    /// Get closed orders
    ///
    /// Options: `trades`, `userref`, `start`, `end`, `ofs`, `closetime`
    #[instrument(skip(self))]
    pub async fn get_closed_orders(&self, options: &Options) -> RestResult<ClosedOrdersResult> {
        let mut params = Params::new();
        params.extend_from_options(
            options,
            &["trades", "userref", "start", "end", "ofs", "closetime"],
        );
        self.dispatcher.execute(Method::ClosedOrders, params).await
    }

    /// Query orders by transaction ID
    ///
    /// # Arguments
    /// * `txids` - Comma-separated transaction IDs
    ///
    /// Options: `trades`, `userref`
    #[instrument(skip(self))]
    pub async fn query_orders(
        &self,
        txids: &str,
        options: &Options,
    ) -> RestResult<HashMap<String, OrderInfo>> {
        let mut params = Params::new().with("txid", txids);
        params.extend_from_options(options, &["trades", "userref"]);
        self.dispatcher.execute(Method::QueryOrders, params).await
    }

    /// Get trade history between `start` and `end` (Unix seconds, 0 = unbounded)
    ///
    /// Options: `type`, `trades`, `ofs`
    #[instrument(skip(self))]
    pub async fn get_trades_history(
        &self,
        start: i64,
        end: i64,
        options: &Options,
    ) -> RestResult<TradesHistoryResult> {
        let mut params = Params::new();
        params.push_opt("start", Some(start).filter(|s| *s > 0));
        params.push_opt("end", Some(end).filter(|e| *e > 0));
        params.extend_from_options(options, &["type", "trades", "ofs"]);
        self.dispatcher.execute(Method::TradesHistory, params).await
    }

    /// Query specific trades
    ///
    /// Options: `trades`
    #[instrument(skip(self))]
    pub async fn query_trades(
        &self,
        txids: &str,
        options: &Options,
    ) -> RestResult<HashMap<String, TradeHistoryEntry>> {
        let mut params = Params::new().with("txid", txids);
        params.extend_from_options(options, &["trades"]);
        self.dispatcher.execute(Method::QueryTrades, params).await
    }

    /// Get open positions
    ///
    /// Options: `txid`, `docalcs`, `consolidation`
    #[instrument(skip(self))]
    pub async fn get_open_positions(
        &self,
        options: &Options,
    ) -> RestResult<HashMap<String, OpenPosition>> {
        let mut params = Params::new();
        params.extend_from_options(options, &["txid", "docalcs", "consolidation"]);
        self.dispatcher.execute(Method::OpenPositions, params).await
    }

    /// Get ledgers
    ///
    /// Options: `aclass`, `asset`, `type`, `start`, `end`, `ofs`
    #[instrument(skip(self))]
    pub async fn get_ledgers(&self, options: &Options) -> RestResult<LedgersResult> {
        let mut params = Params::new();
        params.extend_from_options(options, &["aclass", "asset", "type", "start", "end", "ofs"]);
        self.dispatcher.execute(Method::Ledgers, params).await
    }

    /// Query ledger entries by ID
    ///
    /// # Arguments
    /// * `ids` - Comma-separated ledger IDs
    #[instrument(skip(self))]
    pub async fn query_ledgers(&self, ids: &str) -> RestResult<HashMap<String, LedgerEntry>> {
        let params = Params::new().with("id", ids);
        self.dispatcher.execute(Method::QueryLedgers, params).await
    }

    /// Get a token for the authenticated WebSocket API
    #[instrument(skip(self))]
    pub async fn get_websockets_token(&self) -> RestResult<WebSocketsToken> {
        self.dispatcher.execute(Method::GetWebSocketsToken, Params::new()).await
    }
}

// Response types specific to account endpoints

/// Trade balance (margin info)
#[derive(Debug, Clone, Deserialize)]
pub struct TradeBalance {
    /// Equivalent balance (base currency)
    pub eb: String,
    /// Trade balance
    pub tb: String,
    /// Margin amount of open positions
    pub m: Option<String>,
    /// Unrealized P&L of open positions
    pub n: Option<String>,
    /// Cost basis of open positions
    pub c: Option<String>,
    /// Current floating valuation
    pub v: Option<String>,
    /// Equity
    pub e: Option<String>,
    /// Free margin
    pub mf: Option<String>,
    /// Margin level
    pub ml: Option<String>,
}

/// Open orders result
#[derive(Debug, Clone, Deserialize)]
pub struct OpenOrdersResult {
    /// Open orders keyed by transaction ID
    pub open: HashMap<String, OrderInfo>,
}

/// Closed orders result
#[derive(Debug, Clone, Deserialize)]
pub struct ClosedOrdersResult {
    /// Closed orders keyed by transaction ID
    pub closed: HashMap<String, OrderInfo>,
    /// Count of total results
    pub count: u32,
}

/// Trades history result
#[derive(Debug, Clone, Deserialize)]
pub struct TradesHistoryResult {
    /// Trades keyed by transaction ID
    pub trades: HashMap<String, TradeHistoryEntry>,
    /// Count of total results
    pub count: u32,
}

/// Open position
#[derive(Debug, Clone, Deserialize)]
pub struct OpenPosition {
    /// Order transaction ID
    pub ordertxid: String,
    /// Position status
    pub posstatus: String,
    /// Pair
    pub pair: String,
    /// Time of position
    pub time: f64,
    /// Type (buy/sell)
    #[serde(rename = "type")]
    pub side: String,
    /// Order type
    pub ordertype: String,
    /// Cost
    pub cost: String,
    /// Fee
    pub fee: String,
    /// Volume
    pub vol: String,
    /// Closed volume
    pub vol_closed: String,
    /// Margin
    pub margin: String,
    /// Current value (with `docalcs`)
    pub value: Option<String>,
    /// Unrealized P&L (with `docalcs`)
    pub net: Option<String>,
    /// Terms
    pub terms: Option<String>,
    /// Next rollover time
    pub rollovertm: Option<String>,
    /// Miscellaneous
    pub misc: String,
    /// Order flags
    pub oflags: String,
}

/// Ledgers result
#[derive(Debug, Clone, Deserialize)]
pub struct LedgersResult {
    /// Ledger entries keyed by ID
    pub ledger: HashMap<String, LedgerEntry>,
    /// Count of total results
    pub count: u32,
}

/// Ledger entry
#[derive(Debug, Clone, Deserialize)]
pub struct LedgerEntry {
    /// Reference ID
    pub refid: String,
    /// Time
    pub time: f64,
    /// Type
    #[serde(rename = "type")]
    pub entry_type: String,
    /// Sub-type
    pub subtype: Option<String>,
    /// Asset class
    pub aclass: String,
    /// Asset
    pub asset: String,
    /// Amount
    pub amount: String,
    /// Fee
    pub fee: String,
    /// Balance after
    pub balance: String,
}

/// Trade volume info
#[derive(Debug, Clone, Deserialize)]
pub struct TradeVolume {
    /// Currency for volume
    pub currency: String,
    /// Current 30-day volume
    pub volume: String,
    /// Fee tier info per pair
    pub fees: Option<HashMap<String, FeeInfo>>,
    /// Maker fee tier info per pair
    pub fees_maker: Option<HashMap<String, FeeInfo>>,
}

/// Fee tier info
#[derive(Debug, Clone, Deserialize)]
pub struct FeeInfo {
    /// Current fee
    pub fee: String,
    /// Minimum fee
    pub minfee: Option<String>,
    /// Maximum fee
    pub maxfee: Option<String>,
    /// Next tier volume
    pub nextvolume: Option<String>,
    /// Next tier fee
    pub nextfee: Option<String>,
    /// Tier volume
    pub tiervolume: Option<String>,
}

/// WebSocket authentication token
#[derive(Clone, Deserialize)]
pub struct WebSocketsToken {
    /// Token value
    pub token: String,
    /// Seconds until the token expires unless used
    pub expires: u64,
}

impl std::fmt::Debug for WebSocketsToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WebSocketsToken")
            .field("token", &"[REDACTED]")
            .field("expires", &self.expires)
            .finish()
    }
}
