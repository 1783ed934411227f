//! Decoders for Kraken's positional and loosely-typed results
//!
//! Market data arrives as JSON arrays (`[price, volume, time, ...]`) and
//! balances as maps of numeric strings. Each decoder checks arity before
//! touching any field and rejects anything it cannot read exactly.

use serde_json::{Map, Value};
use std::collections::HashMap;

use crate::error::{RestError, RestResult};
use crate::types::{
    Balances, Candle, OrderBook, OrderBookLevel, OrderSide, Spread, Trade, TradeKind,
};

/// Decode one trade: `[price, volume, time, side, kind, misc, trade_id?]`
pub fn parse_trade(value: &Value) -> RestResult<Trade> {
    let fields = as_array(value, "trade")?;

    let [price, volume, time, side, kind, misc, rest @ ..] = fields else {
        return Err(RestError::decode(format!(
            "trade: expected at least 6 fields, got {}",
            fields.len()
        )));
    };

    let side = match as_str(side, "trade side")? {
        "b" => OrderSide::Buy,
        "s" => OrderSide::Sell,
        other => return Err(RestError::decode(format!("trade: unknown side '{}'", other))),
    };

    let kind = match as_str(kind, "trade kind")? {
        "m" => TradeKind::Market,
        "l" => TradeKind::Limit,
        other => return Err(RestError::decode(format!("trade: unknown order kind '{}'", other))),
    };

    let trade_id = match rest.first() {
        Some(id) => Some(
            id.as_u64()
                .ok_or_else(|| RestError::decode(format!("trade: bad trade id {}", id)))?,
        ),
        None => None,
    };

    let price_raw = as_str(price, "trade price")?;
    let volume_raw = as_str(volume, "trade volume")?;

    Ok(Trade {
        price: parse_f64(price_raw, "trade price")?,
        price_raw: price_raw.to_string(),
        volume: parse_f64(volume_raw, "trade volume")?,
        volume_raw: volume_raw.to_string(),
        time: as_timestamp(time, "trade time")?,
        side,
        kind,
        misc: as_str(misc, "trade misc")?.to_string(),
        trade_id,
    })
}

/// Decode one candle: `[time, open, high, low, close, vwap, volume, count]`
pub fn parse_candle(value: &Value) -> RestResult<Candle> {
    let fields = as_array(value, "candle")?;

    let [time, open, high, low, close, vwap, volume, count] = fields else {
        return Err(RestError::decode(format!(
            "candle: expected 8 fields, got {}",
            fields.len()
        )));
    };

    Ok(Candle {
        time: as_timestamp(time, "candle time")?,
        open: string_f64(open, "candle open")?,
        high: string_f64(high, "candle high")?,
        low: string_f64(low, "candle low")?,
        close: string_f64(close, "candle close")?,
        vwap: string_f64(vwap, "candle vwap")?,
        volume: string_f64(volume, "candle volume")?,
        count: count
            .as_u64()
            .ok_or_else(|| RestError::decode(format!("candle count: not an integer: {}", count)))?,
    })
}

/// Decode one book level: `[price, volume, timestamp]`
pub fn parse_book_level(value: &Value) -> RestResult<OrderBookLevel> {
    let fields = as_array(value, "book level")?;

    let [price, volume, timestamp] = fields else {
        return Err(RestError::decode(format!(
            "book level: expected 3 fields, got {}",
            fields.len()
        )));
    };

    Ok(OrderBookLevel {
        price: string_f64(price, "level price")?,
        volume: string_f64(volume, "level volume")?,
        timestamp: as_timestamp(timestamp, "level timestamp")?,
    })
}

/// Decode one spread entry: `[time, bid, ask]`
pub fn parse_spread(value: &Value) -> RestResult<Spread> {
    let fields = as_array(value, "spread")?;

    let [time, bid, ask] = fields else {
        return Err(RestError::decode(format!(
            "spread: expected 3 fields, got {}",
            fields.len()
        )));
    };

    Ok(Spread {
        time: as_timestamp(time, "spread time")?,
        bid: string_f64(bid, "spread bid")?,
        ask: string_f64(ask, "spread ask")?,
    })
}

/// Decode an order book object: `{"asks": [...], "bids": [...]}`
///
/// All levels are kept in the order the server sent them.
pub fn parse_order_book(value: &Value) -> RestResult<OrderBook> {
    let side = |name: &str| -> RestResult<Vec<OrderBookLevel>> {
        let levels = value
            .get(name)
            .ok_or_else(|| RestError::decode(format!("order book: missing '{}'", name)))?;
        parse_list(levels, name, parse_book_level)
    };

    Ok(OrderBook {
        asks: side("asks")?,
        bids: side("bids")?,
    })
}

/// Decode an asset-to-amount map; every amount must parse
pub fn parse_balances(raw: &HashMap<String, String>) -> RestResult<Balances> {
    raw.iter()
        .map(|(asset, amount)| {
            parse_f64(amount, asset).map(|amount| (asset.clone(), amount))
        })
        .collect::<RestResult<HashMap<_, _>>>()
        .map(Balances)
}

/// Decode an array with the given element decoder
pub fn parse_list<T>(
    value: &Value,
    what: &str,
    parse: impl Fn(&Value) -> RestResult<T>,
) -> RestResult<Vec<T>> {
    as_array(value, what)?.iter().map(parse).collect()
}

/// Read the `last` cursor, which Kraken sends as a string for some methods
/// and a number for others
pub fn parse_last(value: Option<&Value>) -> RestResult<i64> {
    match value {
        Some(Value::String(s)) => s
            .parse()
            .map_err(|_| RestError::decode(format!("last: not an integer: '{}'", s))),
        Some(Value::Number(n)) => n
            .as_i64()
            .ok_or_else(|| RestError::decode(format!("last: not an integer: {}", n))),
        Some(other) => Err(RestError::decode(format!("last: unexpected value {}", other))),
        None => Err(RestError::decode("last: missing")),
    }
}

/// Pick the entry for `pair` out of a pair-keyed result
///
/// Kraken answers under the canonical pair name (`XXBTZUSD` for `XBTUSD`), so
/// when the requested key is absent and exactly one pair-like key remains,
/// that entry is used. Pair-like means anything but `last`.
pub fn take_pair(result: &mut Map<String, Value>, pair: &str) -> RestResult<(String, Value)> {
    if let Some(value) = result.remove(pair) {
        return Ok((pair.to_string(), value));
    }

    let keys: Vec<String> = result
        .keys()
        .filter(|k| k.as_str() != "last")
        .cloned()
        .collect();

    match keys.as_slice() {
        [key] => {
            let value = result.remove(key).unwrap_or(Value::Null);
            Ok((key.clone(), value))
        }
        _ => Err(RestError::decode(format!("no result for pair '{}'", pair))),
    }
}

fn as_array<'a>(value: &'a Value, what: &str) -> RestResult<&'a [Value]> {
    value
        .as_array()
        .map(Vec::as_slice)
        .ok_or_else(|| RestError::decode(format!("{}: expected an array, got {}", what, value)))
}

fn as_str<'a>(value: &'a Value, what: &str) -> RestResult<&'a str> {
    value
        .as_str()
        .ok_or_else(|| RestError::decode(format!("{}: expected a string, got {}", what, value)))
}

fn parse_f64(s: &str, what: &str) -> RestResult<f64> {
    s.parse()
        .map_err(|_| RestError::decode(format!("{}: not a number: '{}'", what, s)))
}

fn string_f64(value: &Value, what: &str) -> RestResult<f64> {
    parse_f64(as_str(value, what)?, what)
}

/// Seconds since the epoch, possibly fractional; truncated to whole seconds
fn as_timestamp(value: &Value, what: &str) -> RestResult<i64> {
    if let Some(i) = value.as_i64() {
        return Ok(i);
    }
    value
        .as_f64()
        .map(|f| f.trunc() as i64)
        .ok_or_else(|| RestError::decode(format!("{}: expected a number, got {}", what, value)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_trade() {
        let trade = parse_trade(&json!(["4000.0", "0.5", 1600000000.0, "b", "m", "text"])).unwrap();

        assert_eq!(trade.price, 4000.0);
        assert_eq!(trade.volume, 0.5);
        assert_eq!(trade.time, 1_600_000_000);
        assert!(trade.is_buy() && !trade.is_sell());
        assert!(trade.is_market() && !trade.is_limit());
        assert_eq!(trade.misc, "text");
        assert_eq!(trade.trade_id, None);
    }

    #[test]
    fn test_parse_trade_with_id_and_fractional_time() {
        let trade =
            parse_trade(&json!(["30243.40000", "0.34507674", 1688669597.8277369, "s", "l", "", 55631]))
                .unwrap();

        assert_eq!(trade.time, 1_688_669_597);
        assert!(trade.is_sell());
        assert!(trade.is_limit());
        assert_eq!(trade.trade_id, Some(55631));
        assert_eq!(trade.price_raw, "30243.40000");
    }

    #[test]
    fn test_parse_trade_rejects_bad_input() {
        // Too short
        assert!(parse_trade(&json!(["4000.0", "0.5", 1600000000, "b", "m"])).is_err());
        // Unknown side
        assert!(parse_trade(&json!(["4000.0", "0.5", 1600000000, "x", "m", ""])).is_err());
        // Unknown order kind
        assert!(parse_trade(&json!(["4000.0", "0.5", 1600000000, "b", "z", ""])).is_err());
        // Volume is checked as strictly as price
        assert!(parse_trade(&json!(["4000.0", "lots", 1600000000, "b", "m", ""])).is_err());
        assert!(parse_trade(&json!(["cheap", "0.5", 1600000000, "b", "m", ""])).is_err());
        // Not an array
        assert!(parse_trade(&json!({"price": "4000.0"})).is_err());
    }

    #[test]
    fn test_parse_candle() {
        let candle = parse_candle(&json!([
            1688671200,
            "30306.1",
            "30306.2",
            "30305.7",
            "30305.7",
            "30306.1",
            "3.39243896",
            23
        ]))
        .unwrap();

        assert_eq!(candle.time, 1_688_671_200);
        assert_eq!(candle.open, 30306.1);
        assert_eq!(candle.low, 30305.7);
        assert_eq!(candle.count, 23);
    }

    #[test]
    fn test_parse_candle_arity() {
        let short = json!([1688671200, "1", "1", "1", "1", "1", "1"]);
        let err = parse_candle(&short).unwrap_err();
        assert!(matches!(err, RestError::Decode(_)));

        let long = json!([1688671200, "1", "1", "1", "1", "1", "1", 1, 1]);
        assert!(parse_candle(&long).is_err());
    }

    #[test]
    fn test_parse_candle_non_numeric_field() {
        let candle = json!([1688671200, "1", "high", "1", "1", "1", "1", 3]);
        assert!(parse_candle(&candle).is_err());
    }

    #[test]
    fn test_order_book_keeps_all_levels() {
        let asks: Vec<Value> = (0..15)
            .map(|i| json!([format!("{}.0", 100 + i), "1.000", 1688671834]))
            .collect();
        let book = json!({ "asks": asks, "bids": [["99.0", "2.5", 1688671834]] });

        let book = parse_order_book(&book).unwrap();

        assert_eq!(book.asks.len(), 15);
        assert_eq!(book.asks[0].price, 100.0);
        assert_eq!(book.asks[14].price, 114.0);
        assert_eq!(book.bids[0].volume, 2.5);
    }

    #[test]
    fn test_book_level_arity() {
        assert!(parse_book_level(&json!(["100.0", "1.0"])).is_err());
        assert!(parse_book_level(&json!(["100.0", "1.0", 1, 2])).is_err());
        assert!(parse_order_book(&json!({ "asks": [] })).is_err());
    }

    #[test]
    fn test_parse_spread() {
        let spread = parse_spread(&json!([1688671834, "30292.10000", "30297.50000"])).unwrap();
        assert_eq!(spread.bid, 30292.1);
        assert_eq!(spread.ask, 30297.5);
    }

    #[test]
    fn test_parse_balances() {
        let raw = HashMap::from([
            ("ZUSD".to_string(), "100.5000".to_string()),
            ("XXBT".to_string(), "0.0010".to_string()),
        ]);

        let balances = parse_balances(&raw).unwrap();
        assert_eq!(balances.get("ZUSD"), Some(100.5));
        assert_eq!(balances.get("XXBT"), Some(0.001));

        // Idempotent
        assert_eq!(parse_balances(&raw).unwrap(), balances);
    }

    #[test]
    fn test_parse_balances_rejects_any_bad_value() {
        let raw = HashMap::from([
            ("ZUSD".to_string(), "100.5000".to_string()),
            ("XXBT".to_string(), "n/a".to_string()),
        ]);
        assert!(parse_balances(&raw).is_err());
    }

    #[test]
    fn test_parse_last() {
        assert_eq!(parse_last(Some(&json!("1688671969993150842"))).unwrap(), 1688671969993150842);
        assert_eq!(parse_last(Some(&json!(1688671200))).unwrap(), 1688671200);
        assert!(parse_last(Some(&json!("soon"))).is_err());
        assert!(parse_last(None).is_err());
    }

    #[test]
    fn test_take_pair() {
        let mut result = json!({ "XBTUSD": [], "last": "1" }).as_object().unwrap().clone();
        let (pair, _) = take_pair(&mut result, "XBTUSD").unwrap();
        assert_eq!(pair, "XBTUSD");

        // Canonical name used when it is the only pair in the result
        let mut result = json!({ "XXBTZUSD": [], "last": "1" }).as_object().unwrap().clone();
        let (pair, _) = take_pair(&mut result, "XBTUSD").unwrap();
        assert_eq!(pair, "XXBTZUSD");

        let mut result = json!({ "XXBTZUSD": [], "XETHZUSD": [] }).as_object().unwrap().clone();
        assert!(take_pair(&mut result, "XBTUSD").is_err());

        let mut result = json!({ "last": "1" }).as_object().unwrap().clone();
        assert!(take_pair(&mut result, "XBTUSD").is_err());
    }
}
