//! Bittrex API failure messages mapped to codes and recovery strategies
//!
//! A rejected request comes back as `{"success": false, "message": "..."}`.
//! The message is a SCREAMING_SNAKE_CASE token such as `INSUFFICIENT_FUNDS`.
//! This module recognizes the known tokens so callers can decide what to do
//! without string matching. The client itself never retries.

use std::time::Duration;

/// Recovery strategy hint for a failed request
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum RecoveryStrategy {
    /// Fixed delay retry
    Retry { delay_ms: u64, max_attempts: u32 },
    /// Credentials, signature or nonce were rejected
    Reauthenticate,
    /// Requires user intervention (e.g., add funds)
    UserAction { message: &'static str },
    /// The request itself is wrong; do not resend it unchanged
    Skip,
    /// Cannot recover programmatically
    Fatal,
    /// Manual investigation needed
    #[default]
    Manual,
}

impl RecoveryStrategy {
    /// Default retry for transient failures
    pub fn transient_retry() -> Self {
        Self::Retry {
            delay_ms: 1000,
            max_attempts: 3,
        }
    }

    /// Get the initial delay duration
    pub fn initial_delay(&self) -> Option<Duration> {
        match self {
            Self::Retry { delay_ms, .. } => Some(Duration::from_millis(*delay_ms)),
            _ => None,
        }
    }

    /// Check if this strategy allows retry
    pub fn allows_retry(&self) -> bool {
        matches!(self, Self::Retry { .. } | Self::Reauthenticate)
    }
}

/// Known Bittrex v1.1 failure messages
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ApiErrorCode {
    // === Authentication ===
    /// APIKEY_NOT_PROVIDED
    ApiKeyNotProvided,
    /// APIKEY_INVALID
    ApiKeyInvalid,
    /// APISIGN_NOT_PROVIDED
    ApiSignNotProvided,
    /// INVALID_SIGNATURE
    InvalidSignature,
    /// NONCE_NOT_PROVIDED
    NonceNotProvided,
    /// NONCE_USED: nonce not greater than the last one seen for the key
    NonceUsed,
    /// INVALID_PERMISSION
    InvalidPermission,

    // === Market / trading ===
    /// MARKET_NOT_PROVIDED
    MarketNotProvided,
    /// INVALID_MARKET
    InvalidMarket,
    /// MARKET_OFFLINE
    MarketOffline,
    /// QUANTITY_NOT_PROVIDED
    QuantityNotProvided,
    /// RATE_NOT_PROVIDED
    RateNotProvided,
    /// MIN_TRADE_REQUIREMENT_NOT_MET
    MinTradeRequirementNotMet,
    /// DUST_TRADE_DISALLOWED_MIN_VALUE_50K_SAT
    DustTradeDisallowed,
    /// INSUFFICIENT_FUNDS
    InsufficientFunds,
    /// ORDER_NOT_OPEN
    OrderNotOpen,
    /// INVALID_ORDER
    InvalidOrder,
    /// UUID_INVALID
    UuidInvalid,

    // === Account / funding ===
    /// CURRENCY_NOT_PROVIDED
    CurrencyNotProvided,
    /// INVALID_CURRENCY
    InvalidCurrency,
    /// CURRENCY_OFFLINE
    CurrencyOffline,
    /// ADDRESS_GENERATING
    AddressGenerating,
    /// ADDRESS_NOT_PROVIDED
    AddressNotProvided,
    /// WITHDRAWAL_TOO_SMALL
    WithdrawalTooSmall,

    /// Unrecognized message
    Unknown,
}

impl ApiErrorCode {
    /// Parse a Bittrex failure message
    pub fn parse(message: &str) -> Self {
        match message.trim().to_ascii_uppercase().as_str() {
            "APIKEY_NOT_PROVIDED" => Self::ApiKeyNotProvided,
            "APIKEY_INVALID" => Self::ApiKeyInvalid,
            "APISIGN_NOT_PROVIDED" => Self::ApiSignNotProvided,
            "INVALID_SIGNATURE" => Self::InvalidSignature,
            "NONCE_NOT_PROVIDED" => Self::NonceNotProvided,
            "NONCE_USED" => Self::NonceUsed,
            "INVALID_PERMISSION" => Self::InvalidPermission,

            "MARKET_NOT_PROVIDED" => Self::MarketNotProvided,
            "INVALID_MARKET" => Self::InvalidMarket,
            "MARKET_OFFLINE" => Self::MarketOffline,
            "QUANTITY_NOT_PROVIDED" => Self::QuantityNotProvided,
            "RATE_NOT_PROVIDED" => Self::RateNotProvided,
            "MIN_TRADE_REQUIREMENT_NOT_MET" => Self::MinTradeRequirementNotMet,
            "DUST_TRADE_DISALLOWED_MIN_VALUE_50K_SAT" => Self::DustTradeDisallowed,
            "INSUFFICIENT_FUNDS" => Self::InsufficientFunds,
            "ORDER_NOT_OPEN" => Self::OrderNotOpen,
            "INVALID_ORDER" => Self::InvalidOrder,
            "UUID_INVALID" => Self::UuidInvalid,

            "CURRENCY_NOT_PROVIDED" => Self::CurrencyNotProvided,
            "INVALID_CURRENCY" => Self::InvalidCurrency,
            "CURRENCY_OFFLINE" => Self::CurrencyOffline,
            "ADDRESS_GENERATING" => Self::AddressGenerating,
            "ADDRESS_NOT_PROVIDED" => Self::AddressNotProvided,
            "WITHDRAWAL_TOO_SMALL" => Self::WithdrawalTooSmall,

            _ => Self::Unknown,
        }
    }

    /// Get the recovery strategy for this error code
    pub fn recovery_strategy(&self) -> RecoveryStrategy {
        match self {
            // Rejected signature or key - reload credentials
            Self::ApiKeyInvalid | Self::InvalidSignature => RecoveryStrategy::Reauthenticate,

            // Malformed authenticated request or missing permission - fatal
            Self::ApiKeyNotProvided
            | Self::ApiSignNotProvided
            | Self::NonceNotProvided
            | Self::InvalidPermission => RecoveryStrategy::Fatal,

            // Stale nonce - retry with a fresh one
            Self::NonceUsed => RecoveryStrategy::Retry {
                delay_ms: 1000,
                max_attempts: 2,
            },

            // Temporarily unavailable - retry
            Self::MarketOffline | Self::CurrencyOffline => RecoveryStrategy::transient_retry(),
            Self::AddressGenerating => RecoveryStrategy::Retry {
                delay_ms: 10_000,
                max_attempts: 6,
            },

            // Account state - user action
            Self::InsufficientFunds => RecoveryStrategy::UserAction {
                message: "Insufficient funds - deposit more or reduce order size",
            },
            Self::MinTradeRequirementNotMet | Self::DustTradeDisallowed => {
                RecoveryStrategy::UserAction {
                    message: "Order size too small - increase quantity",
                }
            }
            Self::WithdrawalTooSmall => RecoveryStrategy::UserAction {
                message: "Withdrawal amount below the currency minimum",
            },

            // Bad request - skip
            Self::MarketNotProvided
            | Self::InvalidMarket
            | Self::QuantityNotProvided
            | Self::RateNotProvided
            | Self::OrderNotOpen
            | Self::InvalidOrder
            | Self::UuidInvalid
            | Self::CurrencyNotProvided
            | Self::InvalidCurrency
            | Self::AddressNotProvided => RecoveryStrategy::Skip,

            Self::Unknown => RecoveryStrategy::Manual,
        }
    }

    /// Check if this code concerns credentials or signing
    pub fn is_auth_error(&self) -> bool {
        matches!(
            self,
            Self::ApiKeyNotProvided
                | Self::ApiKeyInvalid
                | Self::ApiSignNotProvided
                | Self::InvalidSignature
                | Self::NonceNotProvided
                | Self::NonceUsed
                | Self::InvalidPermission
        )
    }
}
