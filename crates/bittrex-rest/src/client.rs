//! Main REST client implementation

use crate::endpoints::{AccountEndpoints, MarketEndpoints, PublicEndpoints};
use crate::error::{RestError, RestResult};
use crate::operation::Operation;
use crate::params::Params;
use crate::request::{self, PreparedRequest, Signing};
use crate::transport::{HttpTransport, ReqwestTransport};
use crate::types::{ApiResponse, Balance, OrderUuid, Ticker};
use bittrex_auth::{Credentials, MonotonicNonce, NonceSource};
use reqwest::Url;
use rust_decimal::Decimal;
use serde::de::DeserializeOwned;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, instrument, warn};

/// Bittrex API v1.1 base URL
pub const DEFAULT_BASE_URL: &str = "https://bittrex.com/api/v1.1/";

/// Environment variable overriding the base URL
pub const BASE_URL_ENV: &str = "BITTREX_BASE_URL";

/// Default request timeout
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Bittrex REST API client
///
/// Turns a catalog [`Operation`] plus [`Params`] into one signed (private) or
/// unsigned (public) HTTP GET and normalizes the response envelope. The
/// client holds no per-call state; the only shared mutable state is the
/// nonce counter.
///
/// # Example
///
/// ```no_run
/// use bittrex_rest::{BittrexClient, Credentials, Operation, Params};
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// // Public endpoints only
/// let client = BittrexClient::new()?;
/// let ticker = client.ticker("BTC-LTC")?;
///
/// // With authentication for private endpoints
/// let creds = Credentials::from_env()?;
/// let auth_client = BittrexClient::with_credentials(creds)?;
/// let balances = auth_client.balances()?;
///
/// // Dispatch by name
/// let result = auth_client.call_named("open orders", &Params::new())?;
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct BittrexClient {
    transport: Arc<dyn HttpTransport>,
    credentials: Option<Credentials>,
    nonce: Arc<dyn NonceSource>,
    base_url: String,
}

impl BittrexClient {
    /// Create a new client without authentication
    ///
    /// Only public endpoints will be available.
    pub fn new() -> RestResult<Self> {
        Self::with_config(ClientConfig::default())
    }

    /// Create a new client with credentials
    ///
    /// All endpoints (public and private) will be available.
    pub fn with_credentials(credentials: Credentials) -> RestResult<Self> {
        Self::with_config(ClientConfig::new().with_credentials(credentials))
    }

    /// Create a new client with custom configuration
    pub fn with_config(config: ClientConfig) -> RestResult<Self> {
        let user_agent = config
            .user_agent
            .clone()
            .unwrap_or_else(|| concat!("bittrex-rest/", env!("CARGO_PKG_VERSION")).to_string());
        let transport = ReqwestTransport::new(Duration::from_secs(config.timeout_secs), &user_agent)
            .map_err(|e| RestError::Config(format!("Failed to create HTTP client: {}", e)))?;

        Self::with_transport(config, Arc::new(transport))
    }

    /// Create a client that sends requests through `transport`
    ///
    /// # Errors
    /// Returns [`RestError::Config`] if the base URL is not an absolute
    /// http(s) URL.
    pub fn with_transport(
        config: ClientConfig,
        transport: Arc<dyn HttpTransport>,
    ) -> RestResult<Self> {
        let base_url = normalize_base_url(&config.base_url)?;
        info!(
            base_url = %base_url,
            authenticated = config.credentials.is_some(),
            "Created Bittrex REST client"
        );

        Ok(Self {
            transport,
            credentials: config.credentials,
            nonce: Arc::new(MonotonicNonce::new()),
            base_url,
        })
    }

    /// Replace the nonce source
    ///
    /// Clients that share one API key should share one nonce source.
    pub fn with_nonce_source(mut self, nonce: Arc<dyn NonceSource>) -> Self {
        self.nonce = nonce;
        self
    }

    /// Check if the client has credentials for private endpoints
    pub fn has_credentials(&self) -> bool {
        self.credentials.is_some()
    }

    /// Base URL requests are sent to
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    // ========================================================================
    // Dispatch
    // ========================================================================

    /// Validate parameters and build the request without sending it
    ///
    /// For private operations this consumes a nonce and signs the URL.
    pub fn prepare(&self, operation: Operation, params: &Params) -> RestResult<PreparedRequest> {
        request::prepare(
            &self.base_url,
            operation,
            params,
            Signing {
                credentials: self.credentials.as_ref(),
                nonce: self.nonce.as_ref(),
            },
        )
    }

    /// Perform `operation` and return the envelope's result payload
    ///
    /// A successful envelope with a null result yields `Value::Null`.
    /// Transport failures are returned as-is; nothing is retried.
    #[instrument(skip(self, params), fields(operation = %operation))]
    pub fn call(&self, operation: Operation, params: &Params) -> RestResult<serde_json::Value> {
        let request = self.prepare(operation, params)?;
        debug!(path = operation.path(), nonce = ?request.nonce, "Dispatching request");

        let response = self
            .transport
            .get(&request)
            .map_err(|source| RestError::Transport { operation, source })?;

        let envelope: ApiResponse = serde_json::from_str(&response.body).map_err(|e| {
            RestError::MalformedResponse {
                operation,
                reason: format!("HTTP {}: {}", response.status, e),
            }
        })?;

        match envelope.into_result() {
            Ok(result) => Ok(result.unwrap_or(serde_json::Value::Null)),
            Err(message) => {
                warn!(message = %message, "Request rejected by exchange");
                Err(RestError::api(operation, message))
            }
        }
    }

    /// Perform an operation given by name (e.g. `"buy limit"`)
    pub fn call_named(&self, name: &str, params: &Params) -> RestResult<serde_json::Value> {
        let operation: Operation = name.parse()?;
        self.call(operation, params)
    }

    /// Perform `operation` and decode the result payload into `T`
    pub fn call_as<T: DeserializeOwned>(&self, operation: Operation, params: &Params) -> RestResult<T> {
        let result = self.call(operation, params)?;
        decode(operation, result)
    }

    // ========================================================================
    // Endpoint groups
    // ========================================================================

    /// Get public market data endpoints
    pub fn public(&self) -> PublicEndpoints<'_> {
        PublicEndpoints::new(self)
    }

    /// Get trading endpoints (requires credentials)
    pub fn market(&self) -> MarketEndpoints<'_> {
        MarketEndpoints::new(self)
    }

    /// Get account endpoints (requires credentials)
    pub fn account(&self) -> AccountEndpoints<'_> {
        AccountEndpoints::new(self)
    }

    // ========================================================================
    // Shortcuts
    // ========================================================================

    /// Get the current tick values for a market
    pub fn ticker(&self, market: &str) -> RestResult<Ticker> {
        self.public().ticker(market)
    }

    /// Get all balances
    pub fn balances(&self) -> RestResult<Vec<Balance>> {
        self.account().balances()
    }

    /// Place a limit buy order
    pub fn buy_limit(&self, market: &str, quantity: Decimal, rate: Decimal) -> RestResult<OrderUuid> {
        self.market().buy_limit(market, quantity, rate)
    }

    /// Place a limit sell order
    pub fn sell_limit(&self, market: &str, quantity: Decimal, rate: Decimal) -> RestResult<OrderUuid> {
        self.market().sell_limit(market, quantity, rate)
    }

    /// Cancel an order by uuid
    pub fn cancel_order(&self, uuid: &str) -> RestResult<()> {
        self.market().cancel_order(uuid)
    }
}

impl std::fmt::Debug for BittrexClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BittrexClient")
            .field("base_url", &self.base_url)
            .field("has_credentials", &self.has_credentials())
            .finish()
    }
}

/// Decode a result payload, reporting failures as malformed responses
fn decode<T: DeserializeOwned>(
    operation: Operation,
    result: serde_json::Value,
) -> RestResult<T> {
    serde_json::from_value(result).map_err(|e| RestError::MalformedResponse {
        operation,
        reason: e.to_string(),
    })
}

/// Parse the base URL into the canonical form the HTTP client transmits
///
/// The signature covers the URL string as built, so it must already be what
/// `Url` serializes to (lowercase scheme and host, no default port).
fn normalize_base_url(base_url: &str) -> RestResult<String> {
    let invalid =
        |reason: String| RestError::Config(format!("Invalid base URL `{}`: {}", base_url, reason));

    let mut url = Url::parse(base_url.trim()).map_err(|e| invalid(e.to_string()))?;
    if !matches!(url.scheme(), "http" | "https") || url.cannot_be_a_base() {
        return Err(invalid("expected an absolute http(s) URL".to_string()));
    }
    if url.query().is_some() || url.fragment().is_some() {
        return Err(invalid("must not carry a query or fragment".to_string()));
    }
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }

    Ok(url.into())
}

/// Client configuration
///
/// Built once per process and handed to the client; never mutated after.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// API credentials (optional)
    pub credentials: Option<Credentials>,
    /// API base URL
    pub base_url: String,
    /// Request timeout in seconds
    pub timeout_secs: u64,
    /// Custom user agent
    pub user_agent: Option<String>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            credentials: None,
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            user_agent: None,
        }
    }
}

impl ClientConfig {
    /// Create a new configuration builder
    pub fn new() -> Self {
        Self::default()
    }

    /// Load credentials from `BITTREX_API_KEY`/`BITTREX_API_SECRET` and the
    /// base URL from `BITTREX_BASE_URL` if set
    pub fn from_env() -> RestResult<Self> {
        let mut config = Self::new().with_credentials(Credentials::from_env()?);
        if let Ok(base_url) = std::env::var(BASE_URL_ENV) {
            config = config.with_base_url(base_url);
        }
        Ok(config)
    }

    /// Set credentials
    pub fn with_credentials(mut self, credentials: Credentials) -> Self {
        self.credentials = Some(credentials);
        self
    }

    /// Set base URL
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Set timeout
    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }

    /// Set user agent
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error_codes::ApiErrorCode;
    use crate::transport::{HttpResponse, MockTransport, TransportError};
    use bittrex_auth::sign_url;

    const SECRET: &str = "secret";

    fn mock_client(credentials: bool) -> (BittrexClient, Arc<MockTransport>) {
        let mock = Arc::new(MockTransport::new());
        let mut config = ClientConfig::new();
        if credentials {
            config = config.with_credentials(Credentials::new("KEY", SECRET).unwrap());
        }
        let client = BittrexClient::with_transport(config, mock.clone())
            .unwrap()
            .with_nonce_source(Arc::new(MonotonicNonce::with_clock(|| 1_500_000_000)));
        (client, mock)
    }

    #[test]
    fn test_client_without_credentials() {
        let client = BittrexClient::new().unwrap();
        assert!(!client.has_credentials());
        assert_eq!(client.base_url(), DEFAULT_BASE_URL);
    }

    #[test]
    fn test_client_config_builder() {
        let config = ClientConfig::new()
            .with_timeout(60)
            .with_user_agent("test-agent")
            .with_base_url("http://localhost:8080/api/v1.1");

        assert_eq!(config.timeout_secs, 60);
        assert_eq!(config.user_agent, Some("test-agent".to_string()));

        let client = BittrexClient::with_transport(config, Arc::new(MockTransport::new())).unwrap();
        assert_eq!(client.base_url(), "http://localhost:8080/api/v1.1/");
    }

    #[test]
    fn test_base_url_is_canonicalized_before_signing() {
        let mock = Arc::new(MockTransport::new());
        let config = ClientConfig::new()
            .with_credentials(Credentials::new("KEY", SECRET).unwrap())
            .with_base_url("HTTPS://Bittrex.COM:443/api/v1.1");
        let client = BittrexClient::with_transport(config, mock)
            .unwrap()
            .with_nonce_source(Arc::new(MonotonicNonce::with_clock(|| 7)));
        assert_eq!(client.base_url(), "https://bittrex.com/api/v1.1/");

        let request = client.prepare(Operation::AccountBalances, &Params::new()).unwrap();
        assert_eq!(
            request.url,
            "https://bittrex.com/api/v1.1/account/getbalances?apikey=KEY&nonce=7"
        );
        assert_eq!(Url::parse(&request.url).unwrap().as_str(), request.url);
        assert_eq!(
            request.signature(),
            Some(sign_url(SECRET, &request.url).unwrap().as_str())
        );
    }

    #[test]
    fn test_invalid_base_url_rejected_at_construction() {
        for base_url in ["not a url", "ftp://bittrex.com/api/v1.1/", "https://bittrex.com/api?x=1"] {
            let err = BittrexClient::with_config(ClientConfig::new().with_base_url(base_url))
                .unwrap_err();
            assert!(
                matches!(err, RestError::Config(ref msg) if msg.contains(base_url)),
                "{} was accepted: {:?}",
                base_url,
                err
            );
        }
    }

    #[test]
    fn test_buy_limit_without_params_reports_market() {
        let (client, mock) = mock_client(true);

        let err = client.call_named("buy limit", &Params::new()).unwrap_err();
        assert!(matches!(
            err,
            RestError::MissingParameter { operation: Operation::BuyLimit, parameter: "market" }
        ));
        assert_eq!(mock.call_count(), 0);
    }

    #[test]
    fn test_ticker_without_market() {
        let (client, mock) = mock_client(true);
        mock.push_json(r#"{"success":true,"message":"","result":{"Bid":0.5,"Ask":0.75,"Last":0.625}}"#);

        client.call_named("ticker", &Params::new()).unwrap();

        let sent = mock.requests();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].url, "https://bittrex.com/api/v1.1/public/getticker");
        assert_eq!(sent[0].query_param("market"), None);
        assert_eq!(sent[0].query_param("apikey"), None);
        assert_eq!(sent[0].signature(), None);
    }

    #[test]
    fn test_private_call_is_signed_over_sent_url() {
        let (client, mock) = mock_client(true);
        mock.push_json(r#"{"success":true,"message":"","result":{"uuid":"e606d53c-8d70-11e3-94b5-425861b86ab6"}}"#);

        let params = Params::new()
            .with("market", "BTC-LTC")
            .with("quantity", "1.5")
            .with("rate", "0.25");
        let result = client.call(Operation::BuyLimit, &params).unwrap();
        assert_eq!(result["uuid"], "e606d53c-8d70-11e3-94b5-425861b86ab6");

        let sent = &mock.requests()[0];
        assert_eq!(
            sent.url,
            "https://bittrex.com/api/v1.1/market/buylimit?market=BTC-LTC&quantity=1.5&rate=0.25&apikey=KEY&nonce=1500000000"
        );
        assert_eq!(sent.signature(), Some(sign_url(SECRET, &sent.url).unwrap().as_str()));
    }

    #[test]
    fn test_consecutive_private_nonces_increase_within_same_second() {
        let (client, mock) = mock_client(true);
        mock.push_json(r#"{"success":true,"message":"","result":[]}"#);
        mock.push_json(r#"{"success":true,"message":"","result":[]}"#);

        client.call(Operation::OpenOrders, &Params::new()).unwrap();
        client.call(Operation::OpenOrders, &Params::new()).unwrap();

        let sent = mock.requests();
        let first = sent[0].nonce.unwrap();
        let second = sent[1].nonce.unwrap();
        assert!(second > first);
        assert_eq!(sent[1].query_param("nonce"), Some(second.to_string()));
        assert_ne!(sent[0].signature(), sent[1].signature());
    }

    #[test]
    fn test_api_error_carries_message() {
        let (client, mock) = mock_client(true);
        mock.push_json(r#"{"success": false, "message": "INSUFFICIENT_FUNDS", "result": null}"#);

        let err = client.buy_limit("BTC-LTC", Decimal::ONE, Decimal::ONE).unwrap_err();
        match err {
            RestError::Api { operation, message, code } => {
                assert_eq!(operation, Operation::BuyLimit);
                assert_eq!(message, "INSUFFICIENT_FUNDS");
                assert_eq!(code, ApiErrorCode::InsufficientFunds);
            }
            other => panic!("Expected Api error, got {:?}", other),
        }
    }

    #[test]
    fn test_transport_error_is_not_retried() {
        let (client, mock) = mock_client(false);
        mock.push_error(TransportError::Connect("connection refused".into()));
        mock.push_json(r#"{"success":true,"message":"","result":[]}"#);

        let err = client.call(Operation::ListMarkets, &Params::new()).unwrap_err();
        assert!(matches!(
            err,
            RestError::Transport { operation: Operation::ListMarkets, source: TransportError::Connect(_) }
        ));
        assert_eq!(mock.call_count(), 1);
    }

    #[test]
    fn test_malformed_response() {
        let (client, mock) = mock_client(false);
        mock.push_response(HttpResponse::new(502, "<html>Bad Gateway</html>"));

        let err = client.call(Operation::MarketSummaries, &Params::new()).unwrap_err();
        match err {
            RestError::MalformedResponse { operation, reason } => {
                assert_eq!(operation, Operation::MarketSummaries);
                assert!(reason.starts_with("HTTP 502"));
            }
            other => panic!("Expected MalformedResponse, got {:?}", other),
        }
    }

    #[test]
    fn test_envelope_without_success_flag_is_malformed() {
        let (client, mock) = mock_client(false);
        mock.push_json(r#"{"result":[]}"#);

        let err = client.call(Operation::ListMarkets, &Params::new()).unwrap_err();
        assert!(matches!(err, RestError::MalformedResponse { .. }));
    }

    #[test]
    fn test_null_result_on_success() {
        let (client, mock) = mock_client(true);
        mock.push_json(r#"{"success":true,"message":"","result":null}"#);

        client.cancel_order("09aa5bb6-8232-41aa-9b78-a5a1093e0211").unwrap();
        let sent = &mock.requests()[0];
        assert_eq!(sent.operation, Operation::CancelOrder);
        assert_eq!(
            sent.query_param("uuid").as_deref(),
            Some("09aa5bb6-8232-41aa-9b78-a5a1093e0211")
        );
    }

    #[test]
    fn test_private_call_without_credentials() {
        let (client, mock) = mock_client(false);

        let err = client.balances().unwrap_err();
        assert!(matches!(err, RestError::InvalidCredential(_)));
        assert_eq!(mock.call_count(), 0);
    }

    #[test]
    fn test_unknown_operation_name() {
        let (client, _mock) = mock_client(false);
        let err = client.call_named("getwithdraw", &Params::new()).unwrap_err();
        assert!(matches!(err, RestError::UnknownOperation(_)));
    }

    #[test]
    fn test_typed_result_mismatch_is_malformed() {
        let (client, mock) = mock_client(false);
        mock.push_json(r#"{"success":true,"message":"","result":"not a ticker"}"#);

        let err = client.ticker("BTC-LTC").unwrap_err();
        assert!(matches!(
            err,
            RestError::MalformedResponse { operation: Operation::Ticker, .. }
        ));
    }

    #[test]
    fn test_debug_hides_credentials() {
        let (client, _mock) = mock_client(true);
        let debug = format!("{:?}", client);
        assert!(debug.contains("has_credentials: true"));
        assert!(!debug.contains(SECRET));
    }
}
