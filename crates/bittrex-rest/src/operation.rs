//! Endpoint catalog
//!
//! Every call the client can make is an [`Operation`]. Each operation maps
//! to one fixed [`Endpoint`]: its path under the API base URL, whether it
//! must be signed, and its parameter names in transmission order.

use crate::error::RestError;
use std::fmt;
use std::str::FromStr;

/// Static description of one REST endpoint
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Endpoint {
    /// Path relative to the API base URL (e.g. `market/buylimit`)
    pub path: &'static str,
    /// Whether the request carries `apikey`, `nonce` and `apisign`
    pub private: bool,
    /// Required parameter names, in transmission order
    pub required: &'static [&'static str],
    /// Optional parameter names, in transmission order
    pub optional: &'static [&'static str],
}

impl Endpoint {
    const fn public(
        path: &'static str,
        required: &'static [&'static str],
        optional: &'static [&'static str],
    ) -> Self {
        Self {
            path,
            private: false,
            required,
            optional,
        }
    }

    const fn private(
        path: &'static str,
        required: &'static [&'static str],
        optional: &'static [&'static str],
    ) -> Self {
        Self {
            path,
            private: true,
            required,
            optional,
        }
    }

    /// Check whether `name` is a declared parameter of this endpoint
    pub fn accepts(&self, name: &str) -> bool {
        self.required.contains(&name) || self.optional.contains(&name)
    }

    /// All declared parameter names, required first
    pub fn parameters(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.required.iter().chain(self.optional.iter()).copied()
    }

    /// API group the endpoint belongs to (`public`, `market` or `account`)
    pub fn group(&self) -> &'static str {
        self.path.split('/').next().unwrap_or(self.path)
    }
}

/// Named operation from the endpoint catalog
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    // Public market data
    ListMarkets,
    ListCurrencies,
    Ticker,
    MarketSummaries,
    MarketSummary,
    MarketHistory,
    OrderBook,

    // Trading
    BuyLimit,
    SellLimit,
    CancelOrder,
    OpenOrders,

    // Account
    AccountBalances,
    AccountBalance,
    DepositAddress,
    Withdraw,
    GetOrder,
    OrderHistory,
    DepositHistory,
    WithdrawalHistory,
}

impl Operation {
    /// Every operation in catalog order
    pub const ALL: [Operation; 19] = [
        Self::ListMarkets,
        Self::ListCurrencies,
        Self::Ticker,
        Self::MarketSummaries,
        Self::MarketSummary,
        Self::MarketHistory,
        Self::OrderBook,
        Self::BuyLimit,
        Self::SellLimit,
        Self::CancelOrder,
        Self::OpenOrders,
        Self::AccountBalances,
        Self::AccountBalance,
        Self::DepositAddress,
        Self::Withdraw,
        Self::GetOrder,
        Self::OrderHistory,
        Self::DepositHistory,
        Self::WithdrawalHistory,
    ];

    /// Catalog entry for this operation
    pub fn endpoint(self) -> Endpoint {
        use Endpoint as E;

        match self {
            Self::ListMarkets => E::public("public/getmarkets", &[], &[]),
            Self::ListCurrencies => E::public("public/getcurrencies", &[], &[]),
            Self::Ticker => E::public("public/getticker", &[], &["market"]),
            Self::MarketSummaries => E::public("public/getmarketsummaries", &[], &[]),
            Self::MarketSummary => E::public("public/getmarketsummary", &[], &["market"]),
            Self::MarketHistory => E::public("public/getmarkethistory", &[], &["market"]),
            Self::OrderBook => E::public("public/getorderbook", &[], &["market", "type"]),

            Self::BuyLimit => E::private("market/buylimit", &["market", "quantity", "rate"], &[]),
            Self::SellLimit => {
                E::private("market/selllimit", &["market", "quantity", "rate"], &[])
            }
            Self::CancelOrder => E::private("market/cancel", &["uuid"], &[]),
            Self::OpenOrders => E::private("market/getopenorders", &[], &["market"]),

            Self::AccountBalances => E::private("account/getbalances", &[], &[]),
            Self::AccountBalance => E::private("account/getbalance", &[], &["currency"]),
            Self::DepositAddress => {
                E::private("account/getdepositaddress", &[], &["currency"])
            }
            Self::Withdraw => E::private(
                "account/withdraw",
                &["currency", "quantity", "address"],
                &["paymentid"],
            ),
            Self::GetOrder => E::private("account/getorder", &["uuid"], &[]),
            Self::OrderHistory => E::private("account/getorderhistory", &[], &["market"]),
            Self::DepositHistory => {
                E::private("account/getdeposithistory", &[], &["currency"])
            }
            Self::WithdrawalHistory => {
                E::private("account/getwithdrawalhistory", &[], &["currency"])
            }
        }
    }

    /// Human-readable name (e.g. `buy limit`)
    pub fn name(self) -> &'static str {
        match self {
            Self::ListMarkets => "list markets",
            Self::ListCurrencies => "list currencies",
            Self::Ticker => "ticker",
            Self::MarketSummaries => "market summaries",
            Self::MarketSummary => "market summary",
            Self::MarketHistory => "market history",
            Self::OrderBook => "order book",
            Self::BuyLimit => "buy limit",
            Self::SellLimit => "sell limit",
            Self::CancelOrder => "cancel order",
            Self::OpenOrders => "open orders",
            Self::AccountBalances => "account balances",
            Self::AccountBalance => "account balance",
            Self::DepositAddress => "deposit address",
            Self::Withdraw => "withdraw",
            Self::GetOrder => "get order",
            Self::OrderHistory => "order history",
            Self::DepositHistory => "deposit history",
            Self::WithdrawalHistory => "withdrawal history",
        }
    }

    /// Endpoint path
    pub fn path(self) -> &'static str {
        self.endpoint().path
    }

    /// Whether the operation must be signed
    pub fn is_private(self) -> bool {
        self.endpoint().private
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Operation {
    type Err = RestError;

    /// Parse from a name (`"buy limit"`, `"BUY_LIMIT"`, `"buy-limit"`) or a
    /// path (`"market/buylimit"`).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s
            .trim()
            .to_ascii_lowercase()
            .replace(['_', '-'], " ")
            .split_whitespace()
            .collect::<Vec<_>>()
            .join(" ");

        Self::ALL
            .into_iter()
            .find(|op| op.name() == normalized || op.path() == normalized)
            .ok_or_else(|| RestError::UnknownOperation(s.to_string()))
    }
}
