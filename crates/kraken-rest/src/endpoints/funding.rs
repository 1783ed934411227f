//! Private funding endpoints
//!
//! Deposits, withdrawals and wallet transfers. Amounts are passed as strings
//! so they reach Kraken exactly as written.

use serde::Deserialize;
use tracing::{debug, instrument};

use crate::dispatch::Dispatcher;
use crate::error::RestResult;
use crate::method::Method;
use crate::params::Params;
use crate::types::{DepositAddress, DepositMethod, WithdrawInfo};

/// Private funding endpoints
pub struct FundingEndpoints<'a> {
    dispatcher: &'a Dispatcher,
}

impl<'a> FundingEndpoints<'a> {
    pub fn new(dispatcher: &'a Dispatcher) -> Self {
        Self { dispatcher }
    }

    /// Get deposit methods for an asset
    ///
    /// # Arguments
    /// * `asset` - Asset to get deposit methods for (e.g., "XBT", "ETH")
    #[instrument(skip(self))]
    pub async fn get_deposit_methods(&self, asset: &str) -> RestResult<Vec<DepositMethod>> {
        debug!("Getting deposit methods for {}", asset);
        let params = Params::new().with("asset", asset);
        self.dispatcher.execute(Method::DepositMethods, params).await
    }

    /// Get deposit addresses
    ///
    /// # Arguments
    /// * `asset` - Asset to get addresses for
    /// * `method` - Deposit method name
    /// * `new` - Generate new address
    #[instrument(skip(self))]
    pub async fn get_deposit_addresses(
        &self,
        asset: &str,
        method: &str,
        new: Option<bool>,
    ) -> RestResult<Vec<DepositAddress>> {
        debug!("Getting deposit addresses for {} via {}", asset, method);
        let mut params = Params::new().with("asset", asset).with("method", method);
        params.push_opt("new", new);
        self.dispatcher.execute(Method::DepositAddresses, params).await
    }

    /// Get status of recent deposits
    #[instrument(skip(self))]
    pub async fn get_deposit_status(
        &self,
        asset: Option<&str>,
        method: Option<&str>,
    ) -> RestResult<Vec<DepositStatus>> {
        let mut params = Params::new();
        params.push_opt("asset", asset);
        params.push_opt("method", method);
        self.dispatcher.execute(Method::DepositStatus, params).await
    }

    /// Get withdrawal info
    ///
    /// # Arguments
    /// * `asset` - Asset to withdraw
    /// * `key` - Withdrawal key name (from account settings)
    /// * `amount` - Amount to withdraw
    #[instrument(skip(self))]
    pub async fn get_withdraw_info(
        &self,
        asset: &str,
        key: &str,
        amount: &str,
    ) -> RestResult<WithdrawInfo> {
        let params = withdraw_params(asset, key, amount);
        self.dispatcher.execute(Method::WithdrawInfo, params).await
    }

    /// Withdraw funds
    ///
    /// # Arguments
    /// * `asset` - Asset to withdraw
    /// * `key` - Withdrawal key name
    /// * `amount` - Amount to withdraw
    #[instrument(skip(self))]
    pub async fn withdraw(&self, asset: &str, key: &str, amount: &str) -> RestResult<WithdrawResult> {
        debug!("Withdrawing {} {}", amount, asset);
        let params = withdraw_params(asset, key, amount);
        self.dispatcher.execute(Method::Withdraw, params).await
    }

    /// Get status of recent withdrawals
    #[instrument(skip(self))]
    pub async fn get_withdraw_status(&self, asset: &str) -> RestResult<Vec<WithdrawStatus>> {
        let params = Params::new().with("asset", asset);
        self.dispatcher.execute(Method::WithdrawStatus, params).await
    }

    /// Cancel a pending withdrawal
    ///
    /// Returns whether the cancellation went through.
    #[instrument(skip(self))]
    pub async fn cancel_withdraw(&self, asset: &str, refid: &str) -> RestResult<bool> {
        debug!("Cancelling withdrawal {}", refid);
        let params = Params::new().with("asset", asset).with("refid", refid);
        self.dispatcher.execute(Method::WithdrawCancel, params).await
    }

    /// Transfer between the spot and futures wallets
    ///
    /// # Arguments
    /// * `asset` - Asset to transfer
    /// * `from` - Source wallet
    /// * `to` - Destination wallet
    /// * `amount` - Amount to transfer
    #[instrument(skip(self))]
    pub async fn wallet_transfer(
        &self,
        asset: &str,
        from: &str,
        to: &str,
        amount: &str,
    ) -> RestResult<WalletTransferResult> {
        debug!("Transferring {} {} from {} to {}", amount, asset, from, to);
        let params = Params::new()
            .with("asset", asset)
            .with("from", from)
            .with("to", to)
            .with("amount", amount);
        self.dispatcher.execute(Method::WalletTransfer, params).await
    }
}

fn withdraw_params(asset: &str, key: &str, amount: &str) -> Params {
    Params::new()
        .with("asset", asset)
        .with("key", key)
        .with("amount", amount)
}

// Response types specific to funding endpoints

/// Deposit status
#[derive(Debug, Clone, Deserialize)]
pub struct DepositStatus {
    /// Deposit method
    pub method: String,
    /// Asset class
    pub aclass: String,
    /// Asset
    pub asset: String,
    /// Reference ID
    pub refid: String,
    /// Transaction ID
    pub txid: String,
    /// Info
    pub info: String,
    /// Amount
    pub amount: String,
    /// Fee
    pub fee: Option<String>,
    /// Time
    pub time: f64,
    /// Status
    pub status: String,
    /// Status property
    #[serde(rename = "status-prop")]
    pub status_prop: Option<String>,
}

/// Withdraw result
#[derive(Debug, Clone, Deserialize)]
pub struct WithdrawResult {
    /// Reference ID
    pub refid: String,
}

/// Withdrawal status
#[derive(Debug, Clone, Deserialize)]
pub struct WithdrawStatus {
    /// Withdrawal method
    pub method: String,
    /// Asset class
    pub aclass: String,
    /// Asset
    pub asset: String,
    /// Reference ID
    pub refid: String,
    /// Transaction ID
    pub txid: Option<String>,
    /// Info
    pub info: String,
    /// Amount
    pub amount: String,
    /// Fee
    pub fee: String,
    /// Time
    pub time: f64,
    /// Status
    pub status: String,
    /// Status property
    #[serde(rename = "status-prop")]
    pub status_prop: Option<String>,
}

/// Wallet transfer result
#[derive(Debug, Clone, Deserialize)]
pub struct WalletTransferResult {
    /// Reference ID
    pub refid: String,
}
