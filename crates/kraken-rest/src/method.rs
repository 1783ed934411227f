//! The closed set of remote methods this client can call

use std::fmt;
use std::str::FromStr;

use crate::error::RestError;

/// Kraken REST API version segment
pub const API_VERSION: &str = "0";

/// A Kraken REST method
///
/// Whether a call is signed follows from the variant; there is no way to send
/// a private method unsigned or a public one with credentials.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Method {
    // Public market data
    Time,
    Assets,
    AssetPairs,
    Ticker,
    Depth,
    Trades,
    Spread,
    Ohlc,

    // Private account data
    Balance,
    BalanceEx,
    TradeBalance,
    TradeVolume,
    OpenOrders,
    ClosedOrders,
    QueryOrders,
    TradesHistory,
    QueryTrades,
    OpenPositions,
    Ledgers,
    QueryLedgers,
    GetWebSocketsToken,

    // Private trading
    AddOrder,
    CancelOrder,

    // Private funding
    DepositMethods,
    DepositAddresses,
    DepositStatus,
    WithdrawInfo,
    Withdraw,
    WithdrawStatus,
    WithdrawCancel,
    WalletTransfer,

    // Private data export
    AddExport,
    ExportStatus,
    RetrieveExport,
    RemoveExport,
}

impl Method {
    /// Every public method
    pub const PUBLIC: &'static [Method] = &[
        Self::Time,
        Self::Assets,
        Self::AssetPairs,
        Self::Ticker,
        Self::Depth,
        Self::Trades,
        Self::Spread,
        Self::Ohlc,
    ];

    /// Every private method
    pub const PRIVATE: &'static [Method] = &[
        Self::Balance,
        Self::BalanceEx,
        Self::TradeBalance,
        Self::TradeVolume,
        Self::OpenOrders,
        Self::ClosedOrders,
        Self::QueryOrders,
        Self::TradesHistory,
        Self::QueryTrades,
        Self::OpenPositions,
        Self::Ledgers,
        Self::QueryLedgers,
        Self::GetWebSocketsToken,
        Self::AddOrder,
        Self::CancelOrder,
        Self::DepositMethods,
        Self::DepositAddresses,
        Self::DepositStatus,
        Self::WithdrawInfo,
        Self::Withdraw,
        Self::WithdrawStatus,
        Self::WithdrawCancel,
        Self::WalletTransfer,
        Self::AddExport,
        Self::ExportStatus,
        Self::RetrieveExport,
        Self::RemoveExport,
    ];

    /// Name as it appears in the request path
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Time => "Time",
            Self::Assets => "Assets",
            Self::AssetPairs => "AssetPairs",
            Self::Ticker => "Ticker",
            Self::Depth => "Depth",
            Self::Trades => "Trades",
            Self::Spread => "Spread",
            Self::Ohlc => "OHLC",
            Self::Balance => "Balance",
            Self::BalanceEx => "BalanceEx",
            Self::TradeBalance => "TradeBalance",
            Self::TradeVolume => "TradeVolume",
            Self::OpenOrders => "OpenOrders",
            Self::ClosedOrders => "ClosedOrders",
            Self::QueryOrders => "QueryOrders",
            Self::TradesHistory => "TradesHistory",
            Self::QueryTrades => "QueryTrades",
            Self::OpenPositions => "OpenPositions",
            Self::Ledgers => "Ledgers",
            Self::QueryLedgers => "QueryLedgers",
            Self::GetWebSocketsToken => "GetWebSocketsToken",
            Self::AddOrder => "AddOrder",
            Self::CancelOrder => "CancelOrder",
            Self::DepositMethods => "DepositMethods",
            Self::DepositAddresses => "DepositAddresses",
            Self::DepositStatus => "DepositStatus",
            Self::WithdrawInfo => "WithdrawInfo",
            Self::Withdraw => "Withdraw",
            Self::WithdrawStatus => "WithdrawStatus",
            Self::WithdrawCancel => "WithdrawCancel",
            Self::WalletTransfer => "WalletTransfer",
            Self::AddExport => "AddExport",
            Self::ExportStatus => "ExportStatus",
            Self::RetrieveExport => "RetrieveExport",
            Self::RemoveExport => "RemoveExport",
        }
    }

    /// True if the method needs a signed request
    pub fn is_private(&self) -> bool {
        !matches!(
            self,
            Self::Time
                | Self::Assets
                | Self::AssetPairs
                | Self::Ticker
                | Self::Depth
                | Self::Trades
                | Self::Spread
                | Self::Ohlc
        )
    }

    /// Request path, e.g. `/0/private/Balance`
    ///
    /// This exact string is what gets signed.
    pub fn path(&self) -> String {
        let scope = if self.is_private() { "private" } else { "public" };
        format!("/{}/{}/{}", API_VERSION, scope, self.as_str())
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Method {
    type Err = RestError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::PUBLIC
            .iter()
            .chain(Self::PRIVATE)
            .find(|m| m.as_str() == s)
            .copied()
            .ok_or_else(|| RestError::InvalidParameter(format!("Unknown method: {}", s)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_paths() {
        assert_eq!(Method::Time.path(), "/0/public/Time");
        assert_eq!(Method::Ohlc.path(), "/0/public/OHLC");
        assert_eq!(Method::Balance.path(), "/0/private/Balance");
        assert_eq!(Method::GetWebSocketsToken.path(), "/0/private/GetWebSocketsToken");
    }

    #[test]
    fn test_lists_agree_with_is_private() {
        assert!(Method::PUBLIC.iter().all(|m| !m.is_private()));
        assert!(Method::PRIVATE.iter().all(|m| m.is_private()));
        assert_eq!(Method::PUBLIC.len() + Method::PRIVATE.len(), 35);
    }

    #[test]
    fn test_round_trip_through_wire_name() {
        for method in Method::PUBLIC.iter().chain(Method::PRIVATE) {
            assert_eq!(method.as_str().parse::<Method>().unwrap(), *method);
        }
        assert!("NotAMethod".parse::<Method>().is_err());
        assert!("ohlc".parse::<Method>().is_err());
    }
}
