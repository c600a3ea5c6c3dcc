//! Credentials, nonce generation and request signing for the Bittrex API
//!
//! Private Bittrex v1.1 endpoints expect `apikey` and `nonce` in the query
//! string and an `apisign` header carrying the HMAC-SHA512 of the complete
//! request URL, keyed by the API secret.
//!
//! # Example
//!
//! ```no_run
//! use bittrex_auth::{Credentials, MonotonicNonce, NonceSource};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let creds = Credentials::from_env()?;
//! let nonces = MonotonicNonce::new();
//!
//! let url = format!(
//!     "https://bittrex.com/api/v1.1/account/getbalances?apikey={}&nonce={}",
//!     creds.api_key(),
//!     nonces.next_nonce(),
//! );
//! let apisign = creds.sign(&url)?;
//! println!("apisign: {}", apisign);
//! # Ok(())
//! # }
//! ```

mod credentials;
mod error;
mod nonce;

pub use credentials::{sign_url, Credentials, API_KEY_ENV, API_SECRET_ENV};
pub use error::{AuthError, AuthResult};
pub use nonce::{MonotonicNonce, NonceSource};
