//! Account endpoints for balances, deposits and withdrawals
//!
//! These endpoints require authentication.

use crate::client::BittrexClient;
use crate::error::RestResult;
use crate::operation::Operation;
use crate::params::Params;
use crate::types::{Balance, Deposit, DepositAddress, Order, OrderHistoryEntry, OrderUuid, Withdrawal};
use rust_decimal::Decimal;
use tracing::{info, instrument};

/// Account endpoints
pub struct AccountEndpoints<'a> {
    client: &'a BittrexClient,
}

impl<'a> AccountEndpoints<'a> {
    pub fn new(client: &'a BittrexClient) -> Self {
        Self { client }
    }

    /// Get balances for all currencies
    pub fn balances(&self) -> RestResult<Vec<Balance>> {
        self.client.call_as(Operation::AccountBalances, &Params::new())
    }

    /// Get the balance of one currency (e.g. "BTC")
    pub fn balance(&self, currency: &str) -> RestResult<Balance> {
        self.client
            .call_as(Operation::AccountBalance, &Params::new().with("currency", currency))
    }

    /// Get or generate the deposit address for a currency
    ///
    /// While the exchange is still generating the address it answers with
    /// `ADDRESS_GENERATING`; retry later.
    pub fn deposit_address(&self, currency: &str) -> RestResult<DepositAddress> {
        self.client
            .call_as(Operation::DepositAddress, &Params::new().with("currency", currency))
    }

    /// Withdraw funds to an external address
    ///
    /// # Arguments
    /// * `currency` - Currency code (e.g., "BTC")
    /// * `quantity` - Amount to withdraw
    /// * `address` - Destination address
    /// * `payment_id` - Memo or payment id, for currencies that need one
    #[instrument(skip(self))]
    pub fn withdraw(
        &self,
        currency: &str,
        quantity: Decimal,
        address: &str,
        payment_id: Option<&str>,
    ) -> RestResult<OrderUuid> {
        let params = Params::new()
            .with("currency", currency)
            .with("quantity", quantity)
            .with("address", address)
            .with_opt("paymentid", payment_id);

        let withdrawal: OrderUuid = self.client.call_as(Operation::Withdraw, &params)?;
        info!(uuid = %withdrawal.uuid, "Withdrawal requested");
        Ok(withdrawal)
    }

    /// Get a single order by uuid
    pub fn order(&self, uuid: &str) -> RestResult<Order> {
        self.client
            .call_as(Operation::GetOrder, &Params::new().with("uuid", uuid))
    }

    /// Get completed orders, optionally for one market
    pub fn order_history(&self, market: Option<&str>) -> RestResult<Vec<OrderHistoryEntry>> {
        self.client
            .call_as(Operation::OrderHistory, &Params::new().with_opt("market", market))
    }

    /// Get deposit history, optionally for one currency
    pub fn deposit_history(&self, currency: Option<&str>) -> RestResult<Vec<Deposit>> {
        self.client
            .call_as(Operation::DepositHistory, &Params::new().with_opt("currency", currency))
    }

    /// Get withdrawal history, optionally for one currency
    pub fn withdrawal_history(&self, currency: Option<&str>) -> RestResult<Vec<Withdrawal>> {
        self.client.call_as(
            Operation::WithdrawalHistory,
            &Params::new().with_opt("currency", currency),
        )
    }
}
