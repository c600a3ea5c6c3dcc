//! API credentials and request signing for Bittrex private endpoints
//!
//! Bittrex authenticates a private call by signing the complete request URL
//! (scheme, host, path and query string, with `apikey` and `nonce` already
//! embedded) with HMAC-SHA512 keyed by the API secret. The lowercase hex
//! digest travels in the `apisign` request header.
//!
//! # Security
//!
//! The API secret is stored using the `secrecy` crate which:
//! - Zeroizes memory on drop
//! - Prevents accidental logging via Debug impl
//! - Provides explicit access via `expose_secret()`

use hmac::{Hmac, Mac};
use secrecy::{ExposeSecret, SecretString};
use sha2::Sha512;

use crate::error::{AuthError, AuthResult};

type HmacSha512 = Hmac<Sha512>;

/// Environment variable holding the API key
pub const API_KEY_ENV: &str = "BITTREX_API_KEY";

/// Environment variable holding the API secret
pub const API_SECRET_ENV: &str = "BITTREX_API_SECRET";

/// Compute the `apisign` value for a fully assembled request URL.
///
/// Returns the HMAC-SHA512 of `url` keyed by `secret`, rendered as 128
/// lowercase hex characters. The URL must be byte-identical to the one that
/// is transmitted.
pub fn sign_url(secret: &str, url: &str) -> AuthResult<String> {
    if secret.is_empty() {
        return Err(AuthError::InvalidCredentials(
            "API secret is empty".to_string(),
        ));
    }

    let mut mac = HmacSha512::new_from_slice(secret.as_bytes())
        .map_err(|e| AuthError::InvalidCredentials(format!("Unusable API secret: {}", e)))?;
    mac.update(url.as_bytes());

    Ok(hex::encode(mac.finalize().into_bytes()))
}

/// API credentials for authenticated requests
///
/// Loaded once at startup and never mutated. The secret is zeroized when the
/// credentials are dropped.
pub struct Credentials {
    /// API key (public identifier)
    api_key: String,
    /// API secret (shared signing key)
    secret: SecretString,
}

impl Credentials {
    /// Create new credentials from an API key and secret
    ///
    /// # Errors
    /// Returns [`AuthError::InvalidCredentials`] if either value is empty.
    pub fn new(api_key: impl Into<String>, secret: impl Into<String>) -> AuthResult<Self> {
        let api_key = api_key.into();
        let secret = secret.into();

        if api_key.trim().is_empty() {
            return Err(AuthError::InvalidCredentials("API key is empty".to_string()));
        }
        if secret.is_empty() {
            return Err(AuthError::InvalidCredentials(
                "API secret is empty".to_string(),
            ));
        }

        Ok(Self {
            api_key,
            secret: SecretString::from(secret),
        })
    }

    /// Create credentials from environment variables
    ///
    /// Reads `BITTREX_API_KEY` and `BITTREX_API_SECRET` from the environment.
    pub fn from_env() -> AuthResult<Self> {
        let api_key = std::env::var(API_KEY_ENV)
            .map_err(|_| AuthError::EnvVarNotSet(API_KEY_ENV.to_string()))?;
        let secret = std::env::var(API_SECRET_ENV)
            .map_err(|_| AuthError::EnvVarNotSet(API_SECRET_ENV.to_string()))?;

        Self::new(api_key, secret)
    }

    /// Get the API key
    pub fn api_key(&self) -> &str {
        &self.api_key
    }

    /// Sign a fully assembled request URL with this account's secret
    pub fn sign(&self, url: &str) -> AuthResult<String> {
        sign_url(self.secret.expose_secret(), url)
    }
}

impl Clone for Credentials {
    fn clone(&self) -> Self {
        Self {
            api_key: self.api_key.clone(),
            secret: SecretString::from(self.secret.expose_secret().to_owned()),
        }
    }
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let prefix: String = self.api_key.chars().take(8).collect();
        f.debug_struct("Credentials")
            .field("api_key", &format!("{}...", prefix))
            .field("secret", &"[REDACTED]")
            .finish()
    }
}
