//! Public market data endpoints
//!
//! These endpoints don't require authentication.

use crate::client::BittrexClient;
use crate::error::{RestError, RestResult};
use crate::operation::Operation;
use crate::params::Params;
use crate::types::{BookType, Currency, Market, MarketSummary, MarketTrade, OrderBook, Ticker};
use tracing::{debug, instrument};

/// Public market data endpoints
pub struct PublicEndpoints<'a> {
    client: &'a BittrexClient,
}

impl<'a> PublicEndpoints<'a> {
    pub fn new(client: &'a BittrexClient) -> Self {
        Self { client }
    }

    /// Get all markets
    pub fn markets(&self) -> RestResult<Vec<Market>> {
        self.client.call_as(Operation::ListMarkets, &Params::new())
    }

    /// Get all supported currencies
    pub fn currencies(&self) -> RestResult<Vec<Currency>> {
        self.client.call_as(Operation::ListCurrencies, &Params::new())
    }

    /// Get bid, ask and last price for a market (e.g. "BTC-LTC")
    #[instrument(skip(self))]
    pub fn ticker(&self, market: &str) -> RestResult<Ticker> {
        debug!("Fetching ticker");
        self.client
            .call_as(Operation::Ticker, &Params::new().with("market", market))
    }

    /// Get the last 24 hour summary of every market
    pub fn market_summaries(&self) -> RestResult<Vec<MarketSummary>> {
        self.client.call_as(Operation::MarketSummaries, &Params::new())
    }

    /// Get the last 24 hour summary of one market
    ///
    /// The exchange wraps the single summary in a list.
    #[instrument(skip(self))]
    pub fn market_summary(&self, market: &str) -> RestResult<MarketSummary> {
        let summaries: Vec<MarketSummary> = self
            .client
            .call_as(Operation::MarketSummary, &Params::new().with("market", market))?;

        summaries
            .into_iter()
            .next()
            .ok_or_else(|| RestError::MalformedResponse {
                operation: Operation::MarketSummary,
                reason: format!("no summary returned for {}", market),
            })
    }

    /// Get the latest trades for a market
    pub fn market_history(&self, market: &str) -> RestResult<Vec<MarketTrade>> {
        self.client
            .call_as(Operation::MarketHistory, &Params::new().with("market", market))
    }

    /// Get the order book for a market
    ///
    /// # Arguments
    /// * `market` - Market name (e.g., "BTC-LTC")
    /// * `book_type` - Which side(s) to fetch
    #[instrument(skip(self))]
    pub fn order_book(&self, market: &str, book_type: BookType) -> RestResult<OrderBook> {
        let params = Params::new()
            .with("market", market)
            .with("type", book_type);
        let result = self.client.call(Operation::OrderBook, &params)?;

        OrderBook::from_result(book_type, result).map_err(|e| RestError::MalformedResponse {
            operation: Operation::OrderBook,
            reason: e.to_string(),
        })
    }
}


#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::ClientConfig;
    use crate::transport::MockTransport;
    use rust_decimal_macros::dec;
    use std::sync::Arc;

    fn client_with(body: &str) -> (BittrexClient, Arc<MockTransport>) {
        let mock = Arc::new(MockTransport::new());
        mock.push_json(body);
        (BittrexClient::with_transport(ClientConfig::new(), mock.clone()).unwrap(), mock)
    }

    #[test]
    fn test_order_book_one_side() {
        let (client, mock) = client_with(
            r#"{"success":true,"message":"","result":[{"Quantity":12.5,"Rate":0.5},{"Quantity":3,"Rate":0.25}]}"#,
        );

        let book = client.public().order_book("BTC-LTC", BookType::Buy).unwrap();
        assert_eq!(book.buy.len(), 2);
        assert!(book.sell.is_empty());
        assert_eq!(book.best_bid(), Some(dec!(0.5)));

        let sent = &mock.requests()[0];
        assert_eq!(sent.query(), "market=BTC-LTC&type=buy");
    }

    #[test]
    fn test_market_summary_unwraps_list() {
        let (client, _mock) = client_with(
            r#"{"success":true,"message":"","result":[{
                "MarketName":"BTC-LTC","High":0.5,"Low":0.25,"Volume":100,"Last":0.375,
                "BaseVolume":37.5,"TimeStamp":"2014-07-09T07:19:30.15","Bid":0.25,"Ask":0.5,
                "OpenBuyOrders":10,"OpenSellOrders":20,"PrevDay":0.25,"Created":"2014-02-13T00:00:00"
            }]}"#,
        );

        let summary = client.public().market_summary("BTC-LTC").unwrap();
        assert_eq!(summary.market_name, "BTC-LTC");
    }

    #[test]
    fn test_market_summary_empty_list() {
        let (client, _mock) = client_with(r#"{"success":true,"message":"","result":[]}"#);

        let err = client.public().market_summary("BTC-NOPE").unwrap_err();
        assert!(matches!(
            err,
            RestError::MalformedResponse { operation: Operation::MarketSummary, .. }
        ));
    }

    #[test]
    fn test_invalid_market_is_api_error() {
        let (client, _mock) =
            client_with(r#"{"success":false,"message":"INVALID_MARKET","result":null}"#);

        let err = client.public().market_history("BTC-NOPE").unwrap_err();
        assert_eq!(err.api_code(), Some(crate::error_codes::ApiErrorCode::InvalidMarket));
    }
}
