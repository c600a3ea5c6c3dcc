//! Error types for REST API operations

use crate::error_codes::{ApiErrorCode, RecoveryStrategy};
use crate::operation::Operation;
use crate::transport::TransportError;
use bittrex_auth::AuthError;

/// Errors that can occur during REST API operations
#[derive(Debug, thiserror::Error)]
pub enum RestError {
    /// Missing or empty API key/secret, or a private call without credentials
    #[error("Invalid credential: {0}")]
    InvalidCredential(String),

    /// A required parameter was absent or empty
    #[error("{operation}: missing required parameter `{parameter}`")]
    MissingParameter {
        operation: Operation,
        parameter: &'static str,
    },

    /// A parameter not declared for the endpoint was supplied
    #[error("{operation}: unexpected parameter `{parameter}`")]
    UnexpectedParameter {
        operation: Operation,
        parameter: String,
    },

    /// Parameters could not be encoded into a query string
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    /// Operation name not found in the catalog
    #[error("Unknown operation: {0}")]
    UnknownOperation(String),

    /// Network-level failure; never retried by the client
    #[error("{operation}: transport error: {source}")]
    Transport {
        operation: Operation,
        #[source]
        source: TransportError,
    },

    /// Response body is not a valid envelope or result payload
    #[error("{operation}: malformed response: {reason}")]
    MalformedResponse {
        operation: Operation,
        reason: String,
    },

    /// Exchange rejected the request
    #[error("{operation}: API error: {message}")]
    Api {
        operation: Operation,
        /// Message from the failure envelope
        message: String,
        /// Parsed message
        code: ApiErrorCode,
    },

    /// Environment variable not set
    #[error("Environment variable not set: {0}")]
    EnvVarNotSet(String),

    /// Client could not be configured
    #[error("Configuration error: {0}")]
    Config(String),
}

impl RestError {
    /// Create an API error from the message of a failure envelope
    pub fn api(operation: Operation, message: impl Into<String>) -> Self {
        let message = message.into();
        let code = ApiErrorCode::parse(&message);
        Self::Api {
            operation,
            message,
            code,
        }
    }

    /// Operation the error was raised for, if known
    pub fn operation(&self) -> Option<Operation> {
        match self {
            Self::MissingParameter { operation, .. }
            | Self::UnexpectedParameter { operation, .. }
            | Self::Transport { operation, .. }
            | Self::MalformedResponse { operation, .. }
            | Self::Api { operation, .. } => Some(*operation),
            _ => None,
        }
    }

    /// Parsed exchange error code, for [`RestError::Api`]
    pub fn api_code(&self) -> Option<ApiErrorCode> {
        match self {
            Self::Api { code, .. } => Some(*code),
            _ => None,
        }
    }

    /// Get the recovery strategy for this error
    pub fn recovery_strategy(&self) -> RecoveryStrategy {
        match self {
            Self::Api { code, .. } => code.recovery_strategy(),
            Self::Transport { .. } => RecoveryStrategy::transient_retry(),
            Self::MalformedResponse { .. } => RecoveryStrategy::Manual,
            Self::InvalidCredential(_) | Self::EnvVarNotSet(_) | Self::Config(_) => {
                RecoveryStrategy::Fatal
            }
            Self::MissingParameter { .. }
            | Self::UnexpectedParameter { .. }
            | Self::InvalidParameter(_)
            | Self::UnknownOperation(_) => RecoveryStrategy::Fatal,
        }
    }

    /// Check if this error is retryable
    pub fn is_retryable(&self) -> bool {
        self.recovery_strategy().allows_retry()
    }

    /// Check if this error concerns credentials or signing
    pub fn is_auth_error(&self) -> bool {
        match self {
            Self::InvalidCredential(_) => true,
            Self::Api { code, .. } => code.is_auth_error(),
            _ => false,
        }
    }
}

impl From<AuthError> for RestError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::InvalidCredentials(msg) => Self::InvalidCredential(msg),
            AuthError::EnvVarNotSet(var) => Self::EnvVarNotSet(var),
        }
    }
}

/// Result type for REST operations
pub type RestResult<T> = Result<T, RestError>;
