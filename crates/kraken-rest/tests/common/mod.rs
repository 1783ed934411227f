//! Common test utilities and fixtures for integration tests
//!
//! Response bodies follow the shapes returned by api.kraken.com.
#![allow(dead_code)]

use kraken_rest::{ClientConfig, Credentials, KrakenRestClient, MockTransport};
use std::sync::Arc;

pub const BASE_URL: &str = "https://mock.kraken.test";
pub const API_KEY: &str = "test_api_key";
/// base64 of "test_secret"
pub const API_SECRET: &str = "dGVzdF9zZWNyZXQ=";

pub const SERVER_TIME: &str = r#"{
    "error": [],
    "result": {"unixtime": 1688669448, "rfc1123": "Thu, 06 Jul 23 18:50:48 +0000"}
}"#;

pub const TICKER: &str = r#"{
    "error": [],
    "result": {
        "XXBTZUSD": {
            "a": ["30300.10000", "1", "1.000"],
            "b": ["30300.00000", "1", "1.000"],
            "c": ["30303.20000", "0.00067643"],
            "v": ["4083.67001100", "4412.73601799"],
            "p": ["30706.77771", "30689.13205"],
            "t": [34619, 38907],
            "l": ["29868.30000", "29868.30000"],
            "h": ["31631.00000", "31631.00000"],
            "o": "30502.80000"
        }
    }
}"#;

pub const TRADES: &str = r#"{
    "error": [],
    "result": {
        "XXBTZUSD": [
            ["30243.40000", "0.34507674", 1688669597.8277369, "b", "m", "", 55631],
            ["30243.30000", "0.00100000", 1688669597.872758, "s", "l", "", 55632],
            ["4000.0", "0.5", 1600000000.0, "b", "m", "text"]
        ],
        "last": "1688671969993150842"
    }
}"#;

pub const OHLC: &str = r#"{
    "error": [],
    "result": {
        "XXBTZUSD": [
            [1688671200, "30306.1", "30306.2", "30305.7", "30305.7", "30306.1", "3.39243896", 23],
            [1688671260, "30304.5", "30304.5", "30300.0", "30300.0", "30300.7", "4.42996871", 18]
        ],
        "last": 1688672160
    }
}"#;

pub const SPREAD: &str = r#"{
    "error": [],
    "result": {
        "XXBTZUSD": [
            [1688671834, "30292.10000", "30297.50000"],
            [1688671834, "30292.10000", "30296.70000"]
        ],
        "last": 1688672106
    }
}"#;

pub const BALANCE: &str = r#"{
    "error": [],
    "result": {"ZUSD": "100.5000", "XXBT": "0.0010"}
}"#;

pub const TRADE_BALANCE: &str = r#"{
    "error": [],
    "result": {
        "eb": "1101.3425", "tb": "392.2264", "m": "7.0354", "n": "-10.0232",
        "c": "21.1063", "v": "31.1297", "e": "382.2032", "mf": "375.1678", "ml": "5432.57"
    }
}"#;

pub const OPEN_ORDERS: &str = r#"{
    "error": [],
    "result": {
        "open": {
            "OQCLML-BW3P3-BUCMWZ": {
                "refid": null,
                "userref": 0,
                "status": "open",
                "opentm": 1688666559.8974,
                "starttm": 0,
                "expiretm": 0,
                "descr": {
                    "pair": "XBTUSD", "type": "buy", "ordertype": "limit",
                    "price": "30010.0", "price2": "0", "leverage": "none",
                    "order": "buy 1.25000000 XBTUSD @ limit 30010.0", "close": ""
                },
                "vol": "1.25000000",
                "vol_exec": "0.37500000",
                "cost": "11253.7",
                "fee": "0.00000",
                "price": "30010.0",
                "stopprice": "0.00000",
                "limitprice": "0.00000",
                "misc": "",
                "oflags": "fciq",
                "trades": ["TCCCTY-WE2O6-P3NB37"]
            }
        }
    }
}"#;

pub const ADD_ORDER: &str = r#"{
    "error": [],
    "result": {
        "descr": {"order": "buy 1.25000000 XBTUSD @ limit 27500.0"},
        "txid": ["OU22CG-KLAF2-FWUDD7"]
    }
}"#;

pub const CANCEL_ORDER: &str = r#"{"error": [], "result": {"count": 1}}"#;

pub const WEBSOCKETS_TOKEN: &str = r#"{
    "error": [],
    "result": {"token": "1Dwc4lzSwNWOAwkMdqhssNNFhs1ed606d1WcF3XfEMw", "expires": 900}
}"#;

pub const DEPOSIT_METHODS: &str = r#"{
    "error": [],
    "result": [
        {"method": "Bitcoin", "limit": false, "fee": "0.0000000000", "gen-address": true, "minimum": "0.00010000"}
    ]
}"#;

pub const WITHDRAW: &str = r#"{"error": [], "result": {"refid": "FTQcuak-V6Za8qrWnhzTx67yYHz8Tg"}}"#;

pub const RATE_LIMITED: &str = r#"{"error": ["EAPI:Rate limit exceeded"]}"#;

pub const UNKNOWN_ORDER: &str = r#"{"error": ["EOrder:Unknown order"], "result": null}"#;

/// Order book with `asks` ask levels and two bid levels under `XXBTZUSD`
pub fn depth_response(asks: usize) -> String {
    let asks: Vec<String> = (0..asks)
        .map(|i| format!(r#"["{}.00000", "1.000", 1688671834]"#, 30300 + i))
        .collect();

    format!(
        r#"{{"error": [], "result": {{"XXBTZUSD": {{
            "asks": [{}],
            "bids": [["30299.90000", "0.500", 1688671834], ["30299.00000", "2.000", 1688671830]]
        }}}}}}"#,
        asks.join(",")
    )
}

pub fn credentials() -> Credentials {
    Credentials::new(API_KEY, API_SECRET)
}

/// Public-only client wired to a fresh mock transport
pub fn public_client() -> (KrakenRestClient, Arc<MockTransport>) {
    client_with(ClientConfig::new())
}

/// Authenticated client wired to a fresh mock transport
pub fn private_client() -> (KrakenRestClient, Arc<MockTransport>) {
    client_with(ClientConfig::new().with_credentials(credentials()))
}

fn client_with(config: ClientConfig) -> (KrakenRestClient, Arc<MockTransport>) {
    let transport = Arc::new(MockTransport::new());
    let client = KrakenRestClient::with_transport(
        config.with_base_url(BASE_URL).with_user_agent("kraken-rest-tests"),
        transport.clone(),
    );
    (client, transport)
}

/// Split a form body into key/value pairs
pub fn form_pairs(body: &str) -> Vec<(String, String)> {
    serde_urlencoded::from_str(body).expect("form body")
}
