//! Types for Kraken REST API requests and responses

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

// ============================================================================
// Market Data Types
// ============================================================================

/// Server time
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ServerTime {
    /// Unix timestamp
    pub unixtime: i64,
    /// RFC 1123 time string
    pub rfc1123: String,
}

/// Asset information
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct AssetInfo {
    /// Asset class
    pub aclass: String,
    /// Alternate name
    pub altname: String,
    /// Decimals
    pub decimals: u32,
    /// Display decimals
    pub display_decimals: u32,
}

/// Asset pair information
#[derive(Debug, Clone, Deserialize)]
pub struct AssetPairInfo {
    /// Alternate pair name
    pub altname: String,
    /// WebSocket pair name
    pub wsname: Option<String>,
    /// Asset class of base
    pub aclass_base: String,
    /// Base asset
    pub base: String,
    /// Asset class of quote
    pub aclass_quote: String,
    /// Quote asset
    pub quote: String,
    /// Pair decimals
    pub pair_decimals: u32,
    /// Lot decimals
    pub lot_decimals: u32,
    /// Lot multiplier
    pub lot_multiplier: u32,
    /// Fee schedule array [volume, percent fee]
    #[serde(default)]
    pub fees: Vec<(f64, f64)>,
    /// Maker fee schedule
    #[serde(default)]
    pub fees_maker: Vec<(f64, f64)>,
    /// Volume discount currency
    pub fee_volume_currency: Option<String>,
    /// Minimum order size
    pub ordermin: Option<String>,
    /// Cost minimum
    pub costmin: Option<String>,
    /// Margin call level
    pub margin_call: Option<u32>,
    /// Margin stop level
    pub margin_stop: Option<u32>,
}

/// Ticker information for a trading pair
#[derive(Debug, Clone, Deserialize)]
pub struct TickerInfo {
    /// Ask [price, whole lot volume, lot volume]
    pub a: Vec<String>,
    /// Bid [price, whole lot volume, lot volume]
    pub b: Vec<String>,
    /// Last trade closed [price, lot volume]
    pub c: Vec<String>,
    /// Volume [today, last 24 hours]
    pub v: Vec<String>,
    /// Volume weighted average price [today, last 24 hours]
    pub p: Vec<String>,
    /// Number of trades [today, last 24 hours]
    pub t: Vec<u64>,
    /// Low [today, last 24 hours]
    pub l: Vec<String>,
    /// High [today, last 24 hours]
    pub h: Vec<String>,
    /// Today's opening price
    pub o: String,
}

impl TickerInfo {
    /// Get the current ask price
    pub fn ask_price(&self) -> Option<Decimal> {
        self.a.first().and_then(|s| s.parse().ok())
    }

    /// Get the current bid price
    pub fn bid_price(&self) -> Option<Decimal> {
        self.b.first().and_then(|s| s.parse().ok())
    }

    /// Get the last trade price
    pub fn last_price(&self) -> Option<Decimal> {
        self.c.first().and_then(|s| s.parse().ok())
    }

    /// Get today's opening price
    pub fn opening_price(&self) -> Option<Decimal> {
        self.o.parse().ok()
    }

    /// Get the mid price (average of bid and ask)
    pub fn mid_price(&self) -> Option<Decimal> {
        let ask = self.ask_price()?;
        let bid = self.bid_price()?;
        Some((ask + bid) / Decimal::TWO)
    }
}

/// Aggressor side of a public trade
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TradeKind {
    /// Market order
    Market,
    /// Limit order
    Limit,
}

/// One public trade, from `[price, volume, time, side, kind, misc, trade_id?]`
#[derive(Debug, Clone, PartialEq)]
pub struct Trade {
    /// Price
    pub price: f64,
    /// Price as sent by Kraken
    pub price_raw: String,
    /// Volume
    pub volume: f64,
    /// Volume as sent by Kraken
    pub volume_raw: String,
    /// Unix time in whole seconds
    pub time: i64,
    /// Buy or sell
    pub side: OrderSide,
    /// Market or limit
    pub kind: TradeKind,
    /// Miscellaneous
    pub misc: String,
    /// Trade ID (newer responses only)
    pub trade_id: Option<u64>,
}

impl Trade {
    /// Buyer was the aggressor
    pub fn is_buy(&self) -> bool {
        self.side == OrderSide::Buy
    }

    /// Seller was the aggressor
    pub fn is_sell(&self) -> bool {
        self.side == OrderSide::Sell
    }

    /// Filled by a market order
    pub fn is_market(&self) -> bool {
        self.kind == TradeKind::Market
    }

    /// Filled by a limit order
    pub fn is_limit(&self) -> bool {
        self.kind == TradeKind::Limit
    }

    /// Exact price
    pub fn price_decimal(&self) -> Option<Decimal> {
        self.price_raw.parse().ok()
    }

    /// Exact volume
    pub fn volume_decimal(&self) -> Option<Decimal> {
        self.volume_raw.parse().ok()
    }
}

/// Recent trades for one pair
#[derive(Debug, Clone, PartialEq)]
pub struct TradesResponse {
    /// Pair the trades were returned under
    pub pair: String,
    /// Trades, oldest first
    pub trades: Vec<Trade>,
    /// Cursor for the next `since`
    pub last: i64,
}

/// OHLC candle
#[derive(Debug, Clone, PartialEq)]
pub struct Candle {
    /// Unix timestamp of the interval start
    pub time: i64,
    /// Open price
    pub open: f64,
    /// High price
    pub high: f64,
    /// Low price
    pub low: f64,
    /// Close price
    pub close: f64,
    /// Volume weighted average price
    pub vwap: f64,
    /// Volume
    pub volume: f64,
    /// Number of trades
    pub count: u64,
}

/// OHLC candles for one pair
#[derive(Debug, Clone, PartialEq)]
pub struct OhlcResponse {
    /// Pair the candles were returned under
    pub pair: String,
    /// Candles, oldest first
    pub candles: Vec<Candle>,
    /// Cursor for the next `since`
    pub last: i64,
}

/// Best bid/ask snapshot, from `[time, bid, ask]`
#[derive(Debug, Clone, PartialEq)]
pub struct Spread {
    /// Unix timestamp
    pub time: i64,
    /// Best bid
    pub bid: f64,
    /// Best ask
    pub ask: f64,
}

/// Recent spreads for one pair
#[derive(Debug, Clone, PartialEq)]
pub struct SpreadResponse {
    /// Pair the spreads were returned under
    pub pair: String,
    /// Spreads, oldest first
    pub spreads: Vec<Spread>,
    /// Cursor for the next `since`
    pub last: i64,
}

/// Order book level, from `[price, volume, timestamp]`
#[derive(Debug, Clone, PartialEq)]
pub struct OrderBookLevel {
    /// Price
    pub price: f64,
    /// Aggregated volume
    pub volume: f64,
    /// Unix timestamp of the last update
    pub timestamp: i64,
}

/// Order book snapshot
///
/// Levels are kept in server order. Kraken caps each side at the requested
/// count; that cap is not re-applied here.
#[derive(Debug, Clone, PartialEq)]
pub struct OrderBook {
    /// Ask levels
    pub asks: Vec<OrderBookLevel>,
    /// Bid levels
    pub bids: Vec<OrderBookLevel>,
}

impl OrderBook {
    /// Get the first ask price
    pub fn best_ask(&self) -> Option<f64> {
        self.asks.first().map(|level| level.price)
    }

    /// Get the first bid price
    pub fn best_bid(&self) -> Option<f64> {
        self.bids.first().map(|level| level.price)
    }

    /// Get the spread
    pub fn spread(&self) -> Option<f64> {
        Some(self.best_ask()? - self.best_bid()?)
    }
}

// ============================================================================
// Account Types
// ============================================================================

/// Account balances by asset code
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Balances(pub HashMap<String, f64>);

impl Balances {
    /// Get balance for a specific asset
    pub fn get(&self, asset: &str) -> Option<f64> {
        self.0.get(asset).copied()
    }

    /// Get all non-zero balances
    pub fn non_zero(&self) -> HashMap<String, f64> {
        self.0
            .iter()
            .filter(|(_, balance)| **balance != 0.0)
            .map(|(asset, balance)| (asset.clone(), *balance))
            .collect()
    }

    /// Iterate over all balances
    pub fn iter(&self) -> impl Iterator<Item = (&String, f64)> {
        self.0.iter().map(|(asset, balance)| (asset, *balance))
    }

    /// Number of assets
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// True if the account holds no assets
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Extended balance with hold amounts
#[derive(Debug, Clone, Deserialize)]
pub struct ExtendedBalance {
    /// Total balance
    pub balance: String,
    /// Amount on hold for open orders
    pub hold_trade: Option<String>,
    /// Credit available
    pub credit: Option<String>,
}

/// Order description
#[derive(Debug, Clone, Deserialize)]
pub struct OrderDescription {
    /// Asset pair
    pub pair: String,
    /// Type (buy/sell)
    #[serde(rename = "type")]
    pub side: String,
    /// Order type
    pub ordertype: String,
    /// Primary price
    pub price: String,
    /// Secondary price
    pub price2: String,
    /// Leverage
    pub leverage: String,
    /// Order description
    pub order: String,
    /// Close order description
    pub close: String,
}

/// Order information (open, closed or queried)
#[derive(Debug, Clone, Deserialize)]
pub struct OrderInfo {
    /// Referral order transaction ID
    pub refid: Option<String>,
    /// User reference ID
    pub userref: Option<i64>,
    /// Order status
    pub status: String,
    /// Open timestamp
    pub opentm: f64,
    /// Start timestamp
    pub starttm: Option<f64>,
    /// Expire timestamp
    pub expiretm: Option<f64>,
    /// Close timestamp (closed orders only)
    pub closetm: Option<f64>,
    /// Close reason (closed orders only)
    pub reason: Option<String>,
    /// Order description
    pub descr: OrderDescription,
    /// Volume
    pub vol: String,
    /// Executed volume
    pub vol_exec: String,
    /// Cost
    pub cost: String,
    /// Fee
    pub fee: String,
    /// Average price
    pub price: String,
    /// Stop price (if applicable)
    pub stopprice: Option<String>,
    /// Limit price (if applicable)
    pub limitprice: Option<String>,
    /// Miscellaneous
    pub misc: String,
    /// Order flags
    pub oflags: String,
    /// Trade IDs (when requested with `trades=true`)
    pub trades: Option<Vec<String>>,
}

/// Trade history entry
#[derive(Debug, Clone, Deserialize)]
pub struct TradeHistoryEntry {
    /// Order transaction ID
    pub ordertxid: String,
    /// Pair
    pub pair: String,
    /// Time of trade
    pub time: f64,
    /// Type (buy/sell)
    #[serde(rename = "type")]
    pub side: String,
    /// Order type (market/limit)
    pub ordertype: String,
    /// Price
    pub price: String,
    /// Cost
    pub cost: String,
    /// Fee
    pub fee: String,
    /// Volume
    pub vol: String,
    /// Margin
    pub margin: Option<String>,
    /// Miscellaneous
    pub misc: String,
    /// Position status (position trades only)
    pub posstatus: Option<String>,
}

// ============================================================================
// Trading Types
// ============================================================================

/// Order side (buy or sell)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderSide {
    /// Buy order
    Buy,
    /// Sell order
    Sell,
}

impl std::fmt::Display for OrderSide {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Buy => write!(f, "buy"),
            Self::Sell => write!(f, "sell"),
        }
    }
}

/// Order type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum OrderType {
    /// Market order
    Market,
    /// Limit order
    Limit,
    /// Stop loss
    StopLoss,
    /// Take profit
    TakeProfit,
    /// Stop loss limit
    StopLossLimit,
    /// Take profit limit
    TakeProfitLimit,
    /// Settle position
    SettlePosition,
}

impl std::fmt::Display for OrderType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Market => "market",
            Self::Limit => "limit",
            Self::StopLoss => "stop-loss",
            Self::TakeProfit => "take-profit",
            Self::StopLossLimit => "stop-loss-limit",
            Self::TakeProfitLimit => "take-profit-limit",
            Self::SettlePosition => "settle-position",
        };
        write!(f, "{}", s)
    }
}

/// Order flags
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrderFlag {
    /// Post-only order (maker only)
    PostOnly,
    /// Fee in base currency
    FeeInBase,
    /// Fee in quote currency
    FeeInQuote,
    /// Disable market price protection
    NoMarketPriceProtection,
    /// Order volume in quote currency
    VolumeInQuote,
}

impl OrderFlag {
    /// Get the API string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::PostOnly => "post",
            Self::FeeInBase => "fcib",
            Self::FeeInQuote => "fciq",
            Self::NoMarketPriceProtection => "nompp",
            Self::VolumeInQuote => "viqc",
        }
    }
}

/// Request to place an order
#[derive(Debug, Clone)]
pub struct OrderRequest {
    /// Trading pair
    pub pair: String,
    /// Order side
    pub side: OrderSide,
    /// Order type
    pub order_type: OrderType,
    /// Order volume
    pub volume: Decimal,
    /// Price (for limit orders)
    pub price: Option<Decimal>,
    /// Secondary price (for stop-loss-limit, take-profit-limit)
    pub price2: Option<Decimal>,
    /// Leverage (for margin)
    pub leverage: Option<String>,
    /// Order flags
    pub flags: Vec<OrderFlag>,
    /// Start time
    pub starttm: Option<String>,
    /// Expire time
    pub expiretm: Option<String>,
    /// User reference ID
    pub userref: Option<i32>,
    /// Validate only (don't submit)
    pub validate: bool,
    /// Close order type
    pub close_order_type: Option<OrderType>,
    /// Close order price
    pub close_price: Option<Decimal>,
    /// Close order price2
    pub close_price2: Option<Decimal>,
    /// Trading agreement (required for some jurisdictions)
    pub trading_agreement: Option<String>,
}

impl OrderRequest {
    fn base(pair: impl Into<String>, side: OrderSide, order_type: OrderType, volume: Decimal) -> Self {
        Self {
            pair: pair.into(),
            side,
            order_type,
            volume,
            price: None,
            price2: None,
            leverage: None,
            flags: Vec::new(),
            starttm: None,
            expiretm: None,
            userref: None,
            validate: false,
            close_order_type: None,
            close_price: None,
            close_price2: None,
            trading_agreement: None,
        }
    }

    /// Create a market order
    pub fn market(pair: impl Into<String>, side: OrderSide, volume: Decimal) -> Self {
        Self::base(pair, side, OrderType::Market, volume)
    }

    /// Create a limit order
    pub fn limit(pair: impl Into<String>, side: OrderSide, volume: Decimal, price: Decimal) -> Self {
        Self {
            price: Some(price),
            ..Self::base(pair, side, OrderType::Limit, volume)
        }
    }

    /// Create a stop loss order
    pub fn stop_loss(
        pair: impl Into<String>,
        side: OrderSide,
        volume: Decimal,
        stop_price: Decimal,
    ) -> Self {
        Self {
            price: Some(stop_price),
            ..Self::base(pair, side, OrderType::StopLoss, volume)
        }
    }

    /// Add an order flag
    pub fn with_flag(mut self, flag: OrderFlag) -> Self {
        self.flags.push(flag);
        self
    }

    /// Set as post-only (maker only)
    pub fn post_only(self) -> Self {
        self.with_flag(OrderFlag::PostOnly)
    }

    /// Set leverage for margin trading
    pub fn with_leverage(mut self, leverage: impl Into<String>) -> Self {
        self.leverage = Some(leverage.into());
        self
    }

    /// Set user reference ID
    pub fn with_userref(mut self, userref: i32) -> Self {
        self.userref = Some(userref);
        self
    }

    /// Set the expiry (`+<seconds>` or a Unix timestamp)
    pub fn expires(mut self, expiretm: impl Into<String>) -> Self {
        self.expiretm = Some(expiretm.into());
        self
    }

    /// Set as validate-only (don't actually submit)
    pub fn validate_only(mut self) -> Self {
        self.validate = true;
        self
    }

    /// Accept the trading agreement (`trading_agreement=agree`)
    pub fn agree(mut self) -> Self {
        self.trading_agreement = Some("agree".to_string());
        self
    }

    /// Add a close order
    pub fn with_close(mut self, order_type: OrderType, price: Decimal) -> Self {
        self.close_order_type = Some(order_type);
        self.close_price = Some(price);
        self
    }
}

/// Response from placing an order
#[derive(Debug, Clone, Deserialize)]
pub struct OrderResponse {
    /// Order description
    pub descr: OrderResponseDescription,
    /// Transaction IDs (absent for validate-only orders)
    pub txid: Option<Vec<String>>,
}

/// Order response description
#[derive(Debug, Clone, Deserialize)]
pub struct OrderResponseDescription {
    /// Order description
    pub order: String,
    /// Close order description (if applicable)
    pub close: Option<String>,
}

/// Cancel order result
#[derive(Debug, Clone, Deserialize)]
pub struct CancelOrderResult {
    /// Number of orders cancelled
    pub count: u32,
    /// Whether cancel is pending
    pub pending: Option<bool>,
}

// ============================================================================
// Funding Types
// ============================================================================

/// Deposit method
#[derive(Debug, Clone, Deserialize)]
pub struct DepositMethod {
    /// Method name
    pub method: String,
    /// Maximum net amount that can be deposited (`false` if unlimited)
    pub limit: Option<serde_json::Value>,
    /// Fee
    pub fee: Option<String>,
    /// Address setup fee
    #[serde(rename = "address-setup-fee")]
    pub address_setup_fee: Option<String>,
    /// Whether new addresses can be generated
    #[serde(rename = "gen-address")]
    pub gen_address: Option<bool>,
    /// Minimum deposit
    pub minimum: Option<String>,
}

/// Deposit address
#[derive(Debug, Clone, Deserialize)]
pub struct DepositAddress {
    /// Address
    pub address: String,
    /// Expiry time (0 if the address never expires)
    pub expiretm: Option<String>,
    /// Whether the address was never used
    pub new: Option<bool>,
}

/// Withdrawal info
#[derive(Debug, Clone, Deserialize)]
pub struct WithdrawInfo {
    /// Withdrawal method
    pub method: String,
    /// Maximum net amount that can be withdrawn
    pub limit: String,
    /// Net amount that will be sent, after fees
    pub amount: String,
    /// Fee
    pub fee: String,
}
