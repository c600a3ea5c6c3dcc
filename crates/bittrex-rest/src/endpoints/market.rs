//! Trading endpoints for order management
//!
//! These endpoints require authentication.

use crate::client::BittrexClient;
use crate::error::RestResult;
use crate::operation::Operation;
use crate::params::Params;
use crate::types::{OpenOrder, OrderUuid};
use rust_decimal::Decimal;
use tracing::{info, instrument};

/// Trading endpoints for order management
pub struct MarketEndpoints<'a> {
    client: &'a BittrexClient,
}

impl<'a> MarketEndpoints<'a> {
    pub fn new(client: &'a BittrexClient) -> Self {
        Self { client }
    }

    /// Place a limit buy order
    ///
    /// # Arguments
    /// * `market` - Market name (e.g., "BTC-LTC")
    /// * `quantity` - Amount to buy
    /// * `rate` - Limit price
    #[instrument(skip(self))]
    pub fn buy_limit(&self, market: &str, quantity: Decimal, rate: Decimal) -> RestResult<OrderUuid> {
        self.limit_order(Operation::BuyLimit, market, quantity, rate)
    }

    /// Place a limit sell order
    #[instrument(skip(self))]
    pub fn sell_limit(&self, market: &str, quantity: Decimal, rate: Decimal) -> RestResult<OrderUuid> {
        self.limit_order(Operation::SellLimit, market, quantity, rate)
    }

    fn limit_order(
        &self,
        operation: Operation,
        market: &str,
        quantity: Decimal,
        rate: Decimal,
    ) -> RestResult<OrderUuid> {
        let params = Params::new()
            .with("market", market)
            .with("quantity", quantity)
            .with("rate", rate);

        let order: OrderUuid = self.client.call_as(operation, &params)?;
        info!(uuid = %order.uuid, "Order placed");
        Ok(order)
    }

    /// Cancel an open order
    #[instrument(skip(self))]
    pub fn cancel_order(&self, uuid: &str) -> RestResult<()> {
        self.client
            .call(Operation::CancelOrder, &Params::new().with("uuid", uuid))?;
        info!("Order cancelled");
        Ok(())
    }

    /// Get open orders, optionally for one market
    pub fn open_orders(&self, market: Option<&str>) -> RestResult<Vec<OpenOrder>> {
        self.client
            .call_as(Operation::OpenOrders, &Params::new().with_opt("market", market))
    }
}
