//! Common test utilities and fixtures for HTTP integration tests
//!
//! Response bodies follow the Bittrex v1.1 envelope format.

#![allow(dead_code)]

use bittrex_rest::{BittrexClient, ClientConfig, Credentials, MonotonicNonce};
use std::sync::Arc;

pub const API_KEY: &str = "0b0b0b0b0b0b0b0b0b0b0b0b0b0b0b0b";
pub const API_SECRET: &str = "1c1c1c1c1c1c1c1c1c1c1c1c1c1c1c1c";
pub const FIXED_NONCE: u64 = 1_500_000_000;

/// Ticker for BTC-LTC
pub const TICKER_RESPONSE: &str = r#"{
    "success": true,
    "message": "",
    "result": {"Bid": 0.5, "Ask": 0.75, "Last": 0.625}
}"#;

/// Balances for two currencies
pub const BALANCES_RESPONSE: &str = r#"{
    "success": true,
    "message": "",
    "result": [
        {"Currency": "BTC", "Balance": 4.25, "Available": 4.0, "Pending": 0.25, "CryptoAddress": null},
        {"Currency": "LTC", "Balance": 10, "Available": 10, "Pending": 0, "CryptoAddress": null}
    ]
}"#;

/// Accepted limit order
pub const ORDER_PLACED_RESPONSE: &str = r#"{
    "success": true,
    "message": "",
    "result": {"uuid": "e606d53c-8d70-11e3-94b5-425861b86ab6"}
}"#;

/// Order rejected for lack of funds
pub const INSUFFICIENT_FUNDS_RESPONSE: &str = r#"{
    "success": false,
    "message": "INSUFFICIENT_FUNDS",
    "result": null
}"#;

/// Install a fmt subscriber once per test binary; controlled by `RUST_LOG`
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// Base URL for a local mock server, in the same shape as the live API
pub fn api_base(server_url: &str) -> String {
    format!("{}/api/v1.1/", server_url)
}

/// Unauthenticated client pointed at `base_url`
pub fn public_client(base_url: &str) -> BittrexClient {
    init_tracing();
    BittrexClient::with_config(ClientConfig::new().with_base_url(base_url).with_timeout(5))
        .expect("client builds")
}

/// Authenticated client with a frozen clock, so nonces start at [`FIXED_NONCE`]
pub fn private_client(base_url: &str) -> BittrexClient {
    init_tracing();
    let credentials = Credentials::new(API_KEY, API_SECRET).expect("valid credentials");
    let config = ClientConfig::new()
        .with_credentials(credentials)
        .with_base_url(base_url)
        .with_timeout(5);

    BittrexClient::with_config(config)
        .expect("client builds")
        .with_nonce_source(Arc::new(MonotonicNonce::with_clock(|| FIXED_NONCE)))
}
