//! REST API client for the Bittrex cryptocurrency exchange (API v1.1)
//!
//! Every supported call is an entry in a fixed catalog ([`Operation`]) that
//! names its path, whether it is private, and which query parameters it
//! takes. The client validates caller parameters against that catalog,
//! builds the URL, signs private requests, sends one HTTP GET and unwraps
//! the `{success, message, result}` envelope.
//!
//! # Features
//!
//! - **Public**: Markets, currencies, ticker, summaries, history, order book
//! - **Market**: Limit buy/sell, cancel, open orders
//! - **Account**: Balances, deposit address, withdraw, order and transfer history
//!
//! # Authentication
//!
//! Private requests carry `apikey` and a strictly increasing `nonce` in the
//! query string. The full URL is signed with HMAC-SHA512 and the hex digest
//! is sent in the `apisign` header.
//!
//! # Example
//!
//! ```no_run
//! use bittrex_rest::{BittrexClient, Credentials, Operation, Params};
//! use rust_decimal::Decimal;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! // Public endpoints (no auth required)
//! let client = BittrexClient::new()?;
//! let ticker = client.ticker("BTC-LTC")?;
//! println!("BTC-LTC: {:?}", ticker);
//!
//! // Private endpoints (auth required)
//! let creds = Credentials::from_env()?;
//! let auth_client = BittrexClient::with_credentials(creds)?;
//! let order = auth_client.buy_limit("BTC-LTC", Decimal::new(15, 1), Decimal::new(25, 3))?;
//! println!("Placed {}", order.uuid);
//!
//! // Raw catalog dispatch
//! let raw = auth_client.call(Operation::OpenOrders, &Params::new().with("market", "BTC-LTC"))?;
//! println!("{}", raw);
//! # Ok(())
//! # }
//! ```
//!
//! # Concurrency
//!
//! [`BittrexClient`] is `Send + Sync` and cheap to clone. Calls from several
//! threads share one nonce source, so nonces stay unique per API key.

pub mod client;
pub mod endpoints;
pub mod error;
pub mod error_codes;
pub mod operation;
pub mod params;
pub mod request;
pub mod transport;
pub mod types;

// Re-export main types
pub use client::{BittrexClient, ClientConfig, BASE_URL_ENV, DEFAULT_BASE_URL};
pub use error::{RestError, RestResult};
pub use error_codes::{ApiErrorCode, RecoveryStrategy};
pub use operation::{Endpoint, Operation};
pub use params::Params;
pub use request::{PreparedRequest, SIGNATURE_HEADER};
pub use transport::{HttpResponse, HttpTransport, ReqwestTransport, TransportError};

#[cfg(any(test, feature = "test-utils"))]
pub use transport::MockTransport;

pub use bittrex_auth::{sign_url, Credentials, MonotonicNonce, NonceSource};

// Re-export response types
pub use types::{
    ApiResponse, Balance, BookType, Currency, Deposit, DepositAddress, Market, MarketSummary,
    MarketTrade, OpenOrder, Order, OrderBook, OrderBookEntry, OrderHistoryEntry, OrderUuid,
    Ticker, Withdrawal,
};
