//! Private trading endpoints
//!
//! These endpoints require authentication and trading permissions.

use tracing::{debug, instrument};

use crate::dispatch::Dispatcher;
use crate::error::RestResult;
use crate::method::Method;
use crate::params::Params;
use crate::types::{CancelOrderResult, OrderRequest, OrderResponse};

/// Private trading endpoints
pub struct TradingEndpoints<'a> {
    dispatcher: &'a Dispatcher,
}

impl<'a> TradingEndpoints<'a> {
    pub fn new(dispatcher: &'a Dispatcher) -> Self {
        Self { dispatcher }
    }

    /// Add a new order
    ///
    /// # Arguments
    /// * `order` - Order request with all parameters
    ///
    /// # Returns
    /// Order response with transaction ID(s)
    #[instrument(skip(self, order), fields(pair = %order.pair, side = ?order.side, order_type = ?order.order_type))]
    pub async fn add_order(&self, order: &OrderRequest) -> RestResult<OrderResponse> {
        debug!(
            "Placing {} {} order for {} {}",
            order.side, order.order_type, order.volume, order.pair
        );
        self.dispatcher.execute(Method::AddOrder, order_params(order)).await
    }

    /// Cancel an order
    ///
    /// # Arguments
    /// * `txid` - Transaction ID (or user reference) of the order to cancel
    #[instrument(skip(self))]
    pub async fn cancel_order(&self, txid: &str) -> RestResult<CancelOrderResult> {
        debug!("Cancelling order {}", txid);
        let params = Params::new().with("txid", txid);
        self.dispatcher.execute(Method::CancelOrder, params).await
    }
}

/// Request parameters for an order, in the order Kraken documents them
pub(crate) fn order_params(order: &OrderRequest) -> Params {
    let mut params = Params::new()
        .with("pair", order.pair.as_str())
        .with("type", order.side.to_string())
        .with("ordertype", order.order_type.to_string())
        .with("volume", order.volume.to_string());

    params.push_opt("price", order.price);
    params.push_opt("price2", order.price2);
    params.push_opt("leverage", order.leverage.as_deref());
    if !order.flags.is_empty() {
        let flags: Vec<&str> = order.flags.iter().map(|f| f.as_str()).collect();
        params.push("oflags", flags.join(","));
    }
    params.push_opt("starttm", order.starttm.as_deref());
    params.push_opt("expiretm", order.expiretm.as_deref());
    if order.validate {
        params.push("validate", "true");
    }
    params.push_opt("close[ordertype]", order.close_order_type);
    params.push_opt("close[price]", order.close_price);
    params.push_opt("close[price2]", order.close_price2);
    params.push_opt("trading_agreement", order.trading_agreement.as_deref());
    params.push_opt("userref", order.userref);

    params
}
