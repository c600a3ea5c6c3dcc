//! Types for Bittrex REST API responses
//!
//! Field names follow the exchange's PascalCase payloads. Prices and
//! quantities are [`Decimal`]; timestamps are kept as the ISO-8601 strings the
//! exchange sends.

use rust_decimal::Decimal;
use serde::Deserialize;
use std::fmt;

// ============================================================================
// API Response Wrapper
// ============================================================================

/// Standard Bittrex response envelope
#[derive(Debug, Clone, Deserialize)]
pub struct ApiResponse<T = serde_json::Value> {
    /// Whether the request succeeded
    pub success: bool,
    /// Failure reason (empty on success)
    pub message: Option<String>,
    /// Result payload (may be null even on success)
    pub result: Option<T>,
}

impl<T> ApiResponse<T> {
    /// Check if the response indicates success
    pub fn is_success(&self) -> bool {
        self.success
    }

    /// Get the result, or the failure message if the exchange rejected the request
    pub fn into_result(self) -> Result<Option<T>, String> {
        if self.success {
            Ok(self.result)
        } else {
            Err(self.message.unwrap_or_default())
        }
    }
}

// ============================================================================
// Public Market Data
// ============================================================================

/// Tradable market
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Market {
    /// Traded currency (e.g. "LTC")
    pub market_currency: String,
    /// Quote currency (e.g. "BTC")
    pub base_currency: String,
    pub market_currency_long: Option<String>,
    pub base_currency_long: Option<String>,
    /// Minimum order quantity
    pub min_trade_size: Decimal,
    /// Market name (e.g. "BTC-LTC")
    pub market_name: String,
    pub is_active: bool,
    pub created: Option<String>,
    pub notice: Option<String>,
}

/// Supported currency
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Currency {
    pub currency: String,
    pub currency_long: String,
    /// Confirmations required before a deposit is credited
    pub min_confirmation: u32,
    /// Withdrawal fee
    pub tx_fee: Decimal,
    pub is_active: bool,
    pub coin_type: String,
    pub base_address: Option<String>,
    pub notice: Option<String>,
}

/// Current tick values for a market
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Ticker {
    pub bid: Option<Decimal>,
    pub ask: Option<Decimal>,
    pub last: Option<Decimal>,
}

impl Ticker {
    /// Get the mid price (average of bid and ask)
    pub fn mid_price(&self) -> Option<Decimal> {
        Some((self.ask? + self.bid?) / Decimal::TWO)
    }

    /// Get the bid/ask spread
    pub fn spread(&self) -> Option<Decimal> {
        Some(self.ask? - self.bid?)
    }
}

/// Last 24 hour summary of a market
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct MarketSummary {
    pub market_name: String,
    pub high: Option<Decimal>,
    pub low: Option<Decimal>,
    pub volume: Option<Decimal>,
    pub last: Option<Decimal>,
    pub base_volume: Option<Decimal>,
    pub time_stamp: String,
    pub bid: Option<Decimal>,
    pub ask: Option<Decimal>,
    pub open_buy_orders: Option<u32>,
    pub open_sell_orders: Option<u32>,
    pub prev_day: Option<Decimal>,
    pub created: Option<String>,
}

/// Trade from the market history
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct MarketTrade {
    pub id: u64,
    pub time_stamp: String,
    pub quantity: Decimal,
    pub price: Decimal,
    pub total: Decimal,
    /// FILL or PARTIAL_FILL
    pub fill_type: String,
    /// BUY or SELL
    pub order_type: String,
}

/// Side(s) of the order book to request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BookType {
    Buy,
    Sell,
    #[default]
    Both,
}

impl BookType {
    /// Wire value of the `type` parameter
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Buy => "buy",
            Self::Sell => "sell",
            Self::Both => "both",
        }
    }
}

impl fmt::Display for BookType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Order book level
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct OrderBookEntry {
    pub quantity: Decimal,
    pub rate: Decimal,
}

/// Order book snapshot
///
/// For a one-sided request the exchange returns a bare list; the other side
/// is left empty.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct OrderBook {
    #[serde(default)]
    pub buy: Vec<OrderBookEntry>,
    #[serde(default)]
    pub sell: Vec<OrderBookEntry>,
}

impl OrderBook {
    /// Decode an order book result for the requested side(s)
    pub fn from_result(
        book_type: BookType,
        result: serde_json::Value,
    ) -> Result<Self, serde_json::Error> {
        match book_type {
            BookType::Both => serde_json::from_value(result),
            BookType::Buy => Ok(Self {
                buy: serde_json::from_value(result)?,
                sell: Vec::new(),
            }),
            BookType::Sell => Ok(Self {
                buy: Vec::new(),
                sell: serde_json::from_value(result)?,
            }),
        }
    }

    /// Get the best bid rate
    pub fn best_bid(&self) -> Option<Decimal> {
        self.buy.iter().map(|e| e.rate).max()
    }

    /// Get the best ask rate
    pub fn best_ask(&self) -> Option<Decimal> {
        self.sell.iter().map(|e| e.rate).min()
    }
}

// ============================================================================
// Trading
// ============================================================================

/// Identifier returned when an order or withdrawal is accepted
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct OrderUuid {
    pub uuid: String,
}

/// Open order
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct OpenOrder {
    pub uuid: Option<String>,
    pub order_uuid: String,
    /// Market name (e.g. "BTC-LTC")
    pub exchange: String,
    /// LIMIT_BUY or LIMIT_SELL
    pub order_type: String,
    pub quantity: Decimal,
    pub quantity_remaining: Decimal,
    pub limit: Decimal,
    pub commission_paid: Decimal,
    pub price: Decimal,
    pub price_per_unit: Option<Decimal>,
    pub opened: String,
    pub closed: Option<String>,
    pub cancel_initiated: bool,
    pub immediate_or_cancel: bool,
    pub is_conditional: bool,
    pub condition: Option<String>,
    pub condition_target: Option<Decimal>,
}

impl OpenOrder {
    /// Quantity filled so far
    pub fn filled(&self) -> Decimal {
        self.quantity - self.quantity_remaining
    }
}

// ============================================================================
// Account
// ============================================================================

/// Balance of one currency
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Balance {
    pub currency: String,
    /// Total balance
    pub balance: Decimal,
    /// Balance not reserved by open orders
    pub available: Decimal,
    /// Deposits awaiting confirmation
    pub pending: Decimal,
    pub crypto_address: Option<String>,
}

/// Deposit address for a currency
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct DepositAddress {
    pub currency: String,
    pub address: String,
}

/// Single order looked up by uuid
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Order {
    pub account_id: Option<String>,
    pub order_uuid: String,
    pub exchange: String,
    #[serde(rename = "Type")]
    pub order_type: String,
    pub quantity: Decimal,
    pub quantity_remaining: Decimal,
    pub limit: Decimal,
    pub reserved: Option<Decimal>,
    pub commission_paid: Option<Decimal>,
    pub price: Decimal,
    pub price_per_unit: Option<Decimal>,
    pub opened: String,
    pub closed: Option<String>,
    pub is_open: bool,
    pub cancel_initiated: bool,
    pub immediate_or_cancel: bool,
    pub is_conditional: bool,
    pub condition: Option<String>,
    pub condition_target: Option<Decimal>,
}

/// Completed order from the order history
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct OrderHistoryEntry {
    pub order_uuid: String,
    pub exchange: String,
    pub time_stamp: String,
    pub order_type: String,
    pub limit: Decimal,
    pub quantity: Decimal,
    pub quantity_remaining: Decimal,
    pub commission: Decimal,
    pub price: Decimal,
    pub price_per_unit: Option<Decimal>,
    pub is_conditional: bool,
    pub condition: Option<String>,
    pub condition_target: Option<Decimal>,
    pub immediate_or_cancel: bool,
}

/// Deposit history entry
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Deposit {
    pub id: u64,
    pub amount: Decimal,
    pub currency: String,
    pub confirmations: u32,
    pub last_updated: String,
    pub tx_id: String,
    pub crypto_address: String,
}

/// Withdrawal history entry
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Withdrawal {
    pub payment_uuid: String,
    pub currency: String,
    pub amount: Decimal,
    pub address: String,
    pub opened: String,
    pub authorized: bool,
    pub pending_payment: bool,
    pub tx_cost: Decimal,
    pub tx_id: Option<String>,
    pub canceled: bool,
    pub invalid_address: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use serde_json::json;

    #[test]
    fn test_envelope_success() {
        let response: ApiResponse =
            serde_json::from_str(r#"{"success":true,"message":"","result":{"Bid":1.5}}"#).unwrap();
        assert!(response.is_success());
        assert_eq!(
            response.into_result().unwrap(),
            Some(json!({"Bid": 1.5}))
        );
    }

    #[test]
    fn test_envelope_failure() {
        let response: ApiResponse = serde_json::from_str(
            r#"{"success":false,"message":"INSUFFICIENT_FUNDS","result":null}"#,
        )
        .unwrap();
        assert_eq!(response.into_result().unwrap_err(), "INSUFFICIENT_FUNDS");
    }

    #[test]
    fn test_envelope_null_message_and_missing_result() {
        let response: ApiResponse =
            serde_json::from_str(r#"{"success":false,"message":null}"#).unwrap();
        assert_eq!(response.into_result().unwrap_err(), "");
    }

    #[test]
    fn test_ticker_helpers() {
        let ticker: Ticker =
            serde_json::from_value(json!({"Bid": 0.5, "Ask": 0.75, "Last": 0.625})).unwrap();
        assert_eq!(ticker.spread(), Some(dec!(0.25)));
        assert_eq!(ticker.mid_price(), Some(dec!(0.625)));

        let empty: Ticker =
            serde_json::from_value(json!({"Bid": null, "Ask": 0.75, "Last": null})).unwrap();
        assert_eq!(empty.mid_price(), None);
    }

    #[test]
    fn test_market_deserialization() {
        let market: Market = serde_json::from_value(json!({
            "MarketCurrency": "LTC",
            "BaseCurrency": "BTC",
            "MarketCurrencyLong": "Litecoin",
            "BaseCurrencyLong": "Bitcoin",
            "MinTradeSize": 0.125,
            "MarketName": "BTC-LTC",
            "IsActive": true,
            "Created": "2014-02-13T00:00:00",
            "Notice": null,
            "IsSponsored": null,
            "LogoUrl": "https://example.invalid/ltc.png"
        }))
        .unwrap();
        assert_eq!(market.market_name, "BTC-LTC");
        assert_eq!(market.min_trade_size, dec!(0.125));
        assert!(market.notice.is_none());
    }

    #[test]
    fn test_order_book_both_sides() {
        let book = OrderBook::from_result(
            BookType::Both,
            json!({
                "buy": [{"Quantity": 2.0, "Rate": 0.5}, {"Quantity": 1.0, "Rate": 0.25}],
                "sell": [{"Quantity": 3.0, "Rate": 0.75}]
            }),
        )
        .unwrap();
        assert_eq!(book.best_bid(), Some(dec!(0.5)));
        assert_eq!(book.best_ask(), Some(dec!(0.75)));
    }

    #[test]
    fn test_order_book_single_side() {
        let book = OrderBook::from_result(
            BookType::Sell,
            json!([{"Quantity": 3.0, "Rate": 0.75}]),
        )
        .unwrap();
        assert!(book.buy.is_empty());
        assert_eq!(book.sell.len(), 1);
        assert_eq!(book.best_bid(), None);
    }

    #[test]
    fn test_balance_deserialization() {
        let balance: Balance = serde_json::from_value(json!({
            "Currency": "DOGE",
            "Balance": 4.5,
            "Available": 4.0,
            "Pending": 0.5,
            "CryptoAddress": "DLxcEt3AatMyr2NTatzjsfHNoB9NT62HiF",
            "Requested": false,
            "Uuid": null
        }))
        .unwrap();
        assert_eq!(balance.balance, dec!(4.5));
        assert_eq!(balance.available + balance.pending, balance.balance);
    }

    #[test]
    fn test_order_type_field_rename() {
        let order: Order = serde_json::from_value(json!({
            "AccountId": null,
            "OrderUuid": "0cb4c4e4-bdc7-4e13-8c13-430e587d2cc1",
            "Exchange": "BTC-SHLD",
            "Type": "LIMIT_BUY",
            "Quantity": 1000.0,
            "QuantityRemaining": 1000.0,
            "Limit": 0.5,
            "Reserved": 500.0,
            "CommissionPaid": 0.0,
            "Price": 0.0,
            "PricePerUnit": null,
            "Opened": "2014-07-13T07:45:46.27",
            "Closed": null,
            "IsOpen": true,
            "Sentinel": "6c454604-22e2-4fb4-892e-179eede20972",
            "CancelInitiated": false,
            "ImmediateOrCancel": false,
            "IsConditional": false,
            "Condition": "NONE",
            "ConditionTarget": null
        }))
        .unwrap();
        assert_eq!(order.order_type, "LIMIT_BUY");
        assert!(order.is_open);
    }

    #[test]
    fn test_open_order_filled() {
        let order: OpenOrder = serde_json::from_value(json!({
            "Uuid": null,
            "OrderUuid": "09aa5bb6-8232-41aa-9b78-a5a1093e0211",
            "Exchange": "BTC-LTC",
            "OrderType": "LIMIT_SELL",
            "Quantity": 5.0,
            "QuantityRemaining": 3.5,
            "Limit": 2.0,
            "CommissionPaid": 0.0,
            "Price": 0.0,
            "PricePerUnit": null,
            "Opened": "2014-07-09T03:55:48.77",
            "Closed": null,
            "CancelInitiated": false,
            "ImmediateOrCancel": false,
            "IsConditional": false,
            "Condition": null,
            "ConditionTarget": null
        }))
        .unwrap();
        assert_eq!(order.filled(), dec!(1.5));
    }
}
