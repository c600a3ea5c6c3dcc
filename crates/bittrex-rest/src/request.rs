//! Request assembly and signing
//!
//! Query parameters are laid out in catalog order, required first, then
//! optional. Private requests append `apikey` and `nonce` last and are signed
//! over the final URL string; nothing may touch the URL after that.

use crate::error::{RestError, RestResult};
use crate::operation::Operation;
use crate::params::Params;
use bittrex_auth::{Credentials, NonceSource};

/// Header carrying the HMAC-SHA512 signature of the request URL
pub const SIGNATURE_HEADER: &str = "apisign";

/// Fully formed outbound call
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreparedRequest {
    /// Operation this request was built for
    pub operation: Operation,
    /// Exact URL to transmit (and, for private calls, the signed string)
    pub url: String,
    /// Extra request headers
    pub headers: Vec<(&'static str, String)>,
    /// Nonce embedded in the URL (private calls only)
    pub nonce: Option<u64>,
}

impl PreparedRequest {
    /// Value of the `apisign` header, if signed
    pub fn signature(&self) -> Option<&str> {
        self.header(SIGNATURE_HEADER)
    }

    /// Look up a header value
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }

    /// Raw query string (without the leading `?`)
    pub fn query(&self) -> &str {
        self.url.split_once('?').map(|(_, q)| q).unwrap_or("")
    }

    /// Decoded query parameters in transmission order
    pub fn query_pairs(&self) -> Result<Vec<(String, String)>, serde_urlencoded::de::Error> {
        serde_urlencoded::from_str(self.query())
    }

    /// Decoded value of one query parameter
    ///
    /// `None` if the parameter is absent or the query cannot be decoded; use
    /// [`query_pairs`](Self::query_pairs) to tell the two apart.
    pub fn query_param(&self, name: &str) -> Option<String> {
        self.query_pairs()
            .ok()?
            .into_iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value)
    }
}

/// Credentials and nonce source used for private requests
#[derive(Clone, Copy)]
pub(crate) struct Signing<'a> {
    pub credentials: Option<&'a Credentials>,
    pub nonce: &'a dyn NonceSource,
}

/// Validate `params` against the catalog and build the request
pub(crate) fn prepare(
    base_url: &str,
    operation: Operation,
    params: &Params,
    signing: Signing<'_>,
) -> RestResult<PreparedRequest> {
    let endpoint = operation.endpoint();
    let mut query: Vec<(&'static str, String)> = Vec::new();

    for &name in endpoint.required {
        let value = params.get(name).ok_or(RestError::MissingParameter {
            operation,
            parameter: name,
        })?;
        query.push((name, value.to_string()));
    }

    if let Some(unexpected) = params.names().find(|name| !endpoint.accepts(name)) {
        return Err(RestError::UnexpectedParameter {
            operation,
            parameter: unexpected.to_string(),
        });
    }

    for &name in endpoint.optional {
        if let Some(value) = params.get(name) {
            query.push((name, value.to_string()));
        }
    }

    let mut nonce = None;
    let mut signer = None;
    if endpoint.private {
        let credentials = signing.credentials.ok_or_else(|| {
            RestError::InvalidCredential(format!("{} requires API credentials", operation))
        })?;
        let value = signing.nonce.next_nonce();
        query.push(("apikey", credentials.api_key().to_string()));
        query.push(("nonce", value.to_string()));
        nonce = Some(value);
        signer = Some(credentials);
    }

    let mut url = format!("{}{}", base_url, endpoint.path);
    if !query.is_empty() {
        let encoded = serde_urlencoded::to_string(&query)
            .map_err(|e| RestError::InvalidParameter(e.to_string()))?;
        url.push('?');
        url.push_str(&encoded);
    }

    let mut headers = Vec::new();
    if let Some(credentials) = signer {
        headers.push((SIGNATURE_HEADER, credentials.sign(&url)?));
    }

    Ok(PreparedRequest {
        operation,
        url,
        headers,
        nonce,
    })
}
