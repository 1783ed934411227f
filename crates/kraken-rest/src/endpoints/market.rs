//! Public market data endpoints
//!
//! These endpoints don't require authentication.

use serde_json::{Map, Value};
use std::collections::HashMap;
use tracing::{debug, instrument};

use crate::dispatch::Dispatcher;
use crate::error::{RestError, RestResult};
use crate::method::Method;
use crate::params::Params;
use crate::parse;
use crate::types::{
    AssetInfo, AssetPairInfo, OhlcResponse, OrderBook, ServerTime, SpreadResponse, TickerInfo,
    TradesResponse,
};

/// Candle intervals Kraken accepts, in minutes
pub const OHLC_INTERVALS: [u32; 9] = [1, 5, 15, 30, 60, 240, 1440, 10080, 21600];

/// Public market data endpoints
pub struct MarketEndpoints<'a> {
    dispatcher: &'a Dispatcher,
}

impl<'a> MarketEndpoints<'a> {
    pub fn new(dispatcher: &'a Dispatcher) -> Self {
        Self { dispatcher }
    }

    /// Get server time
    #[instrument(skip(self))]
    pub async fn get_server_time(&self) -> RestResult<ServerTime> {
        debug!("Fetching server time");
        self.dispatcher.execute(Method::Time, Params::new()).await
    }

    /// Get asset info for every asset
    #[instrument(skip(self))]
    pub async fn get_assets(&self) -> RestResult<HashMap<String, AssetInfo>> {
        self.dispatcher.execute(Method::Assets, Params::new()).await
    }

    /// Get every tradable asset pair
    #[instrument(skip(self))]
    pub async fn get_asset_pairs(&self) -> RestResult<HashMap<String, AssetPairInfo>> {
        self.dispatcher.execute(Method::AssetPairs, Params::new()).await
    }

    /// Get ticker information
    ///
    /// # Arguments
    /// * `pairs` - Trading pairs (e.g., ["XBTUSD", "ETHUSD"])
    #[instrument(skip(self))]
    pub async fn get_ticker(&self, pairs: &[&str]) -> RestResult<HashMap<String, TickerInfo>> {
        debug!("Fetching ticker for {} pairs", pairs.len());
        let params = Params::new().with("pair", pairs.join(","));
        self.dispatcher.execute(Method::Ticker, params).await
    }

    /// Get OHLC data
    ///
    /// # Arguments
    /// * `pair` - Trading pair (e.g., "XBTUSD")
    /// * `interval` - Minutes per candle, one of [`OHLC_INTERVALS`] (default 1)
    /// * `since` - Return candles after this cursor (optional)
    #[instrument(skip(self))]
    pub async fn get_ohlc(
        &self,
        pair: &str,
        interval: Option<u32>,
        since: Option<i64>,
    ) -> RestResult<OhlcResponse> {
        let interval = interval.unwrap_or(1);
        if !OHLC_INTERVALS.contains(&interval) {
            return Err(RestError::InvalidParameter(format!(
                "Unsupported value for interval: {}",
                interval
            )));
        }

        let mut params = Params::new().with("pair", pair);
        params.push_opt("since", since.filter(|s| *s > 0));
        params.push("interval", interval.to_string());

        let mut result: Map<String, Value> = self.dispatcher.execute(Method::Ohlc, params).await?;

        let last = parse::parse_last(result.get("last"))?;
        let (pair, candles) = parse::take_pair(&mut result, pair)?;

        Ok(OhlcResponse {
            candles: parse::parse_list(&candles, "candles", parse::parse_candle)?,
            pair,
            last,
        })
    }

    /// Get one-minute candles
    pub async fn get_ohlc_minutes(&self, pair: &str) -> RestResult<OhlcResponse> {
        self.get_ohlc(pair, Some(1), None).await
    }

    /// Get recent trades
    ///
    /// # Arguments
    /// * `pair` - Trading pair (e.g., "XBTUSD")
    /// * `since` - Return trades after this cursor (optional)
    #[instrument(skip(self))]
    pub async fn get_recent_trades(&self, pair: &str, since: Option<i64>) -> RestResult<TradesResponse> {
        let mut params = Params::new().with("pair", pair);
        params.push_opt("since", since.filter(|s| *s > 0));

        let mut result: Map<String, Value> = self.dispatcher.execute(Method::Trades, params).await?;

        let last = parse::parse_last(result.get("last"))?;
        let (pair, trades) = parse::take_pair(&mut result, pair)?;

        Ok(TradesResponse {
            trades: parse::parse_list(&trades, "trades", parse::parse_trade)?,
            pair,
            last,
        })
    }

    /// Get recent spread data
    ///
    /// # Arguments
    /// * `pair` - Trading pair (e.g., "XBTUSD")
    /// * `since` - Return spreads after this cursor (optional)
    #[instrument(skip(self))]
    pub async fn get_recent_spreads(
        &self,
        pair: &str,
        since: Option<i64>,
    ) -> RestResult<SpreadResponse> {
        let mut params = Params::new().with("pair", pair);
        params.push_opt("since", since.filter(|s| *s > 0));

        let mut result: Map<String, Value> = self.dispatcher.execute(Method::Spread, params).await?;

        let last = parse::parse_last(result.get("last"))?;
        let (pair, spreads) = parse::take_pair(&mut result, pair)?;

        Ok(SpreadResponse {
            spreads: parse::parse_list(&spreads, "spreads", parse::parse_spread)?,
            pair,
            last,
        })
    }

    /// Get orderbook depth
    ///
    /// # Arguments
    /// * `pair` - Trading pair (e.g., "XBTUSD")
    /// * `count` - Maximum number of asks/bids, passed through as-is
    #[instrument(skip(self))]
    pub async fn get_orderbook(&self, pair: &str, count: Option<u32>) -> RestResult<OrderBook> {
        debug!("Fetching orderbook for {}", pair);

        let mut params = Params::new().with("pair", pair);
        params.push_opt("count", count);

        let mut result: Map<String, Value> = self.dispatcher.execute(Method::Depth, params).await?;
        let (_, book) = parse::take_pair(&mut result, pair)?;

        parse::parse_order_book(&book)
    }
}
