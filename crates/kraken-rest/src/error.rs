//! Error types for REST API operations

use kraken_auth::AuthError;
use std::fmt;

use crate::transport::TransportError;

/// Errors that can occur during REST API operations
#[derive(Debug, thiserror::Error)]
pub enum RestError {
    /// The transport failed before a response arrived
    #[error("Transport error: {0}")]
    Transport(#[from] TransportError),

    /// Response was not JSON (e.g. an HTML error page)
    #[error("Unexpected Content-Type '{content_type}', expected 'application/json'")]
    UnexpectedContentType {
        /// Content-Type header as received (empty if absent)
        content_type: String,
    },

    /// Body could not be parsed as a response envelope
    #[error("Malformed response envelope: {0}")]
    MalformedEnvelope(#[source] serde_json::Error),

    /// Envelope carried neither errors nor a result
    #[error("Response envelope has no result")]
    MissingResult,

    /// API returned an error
    #[error("API error: {message}")]
    Api {
        /// Parsed first error
        error: ApiError,
        /// All error strings from the API, joined
        message: String,
    },

    /// Result did not have the expected shape
    #[error("Decode error: {0}")]
    Decode(String),

    /// Missing API credentials for private endpoint
    #[error("Authentication required for this endpoint")]
    AuthRequired,

    /// Invalid request parameters
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    /// Credentials could not be built
    #[error(transparent)]
    Auth(#[from] AuthError),
}

/// Broad class of a [`RestError`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Connection, DNS, TLS or timeout failure
    Transport,
    /// Response was not a well-formed JSON envelope
    Protocol,
    /// Kraken rejected the request
    Exchange,
    /// Result could not be turned into the typed record
    Decode,
    /// Request was never sent (missing credentials, bad arguments)
    Usage,
}

impl RestError {
    /// Create an API error from error strings returned by Kraken
    pub fn from_api_errors(errors: Vec<String>) -> Self {
        let message = errors.join(", ");
        let error = errors
            .first()
            .map(|e| ApiError::parse(e))
            .unwrap_or_else(|| ApiError::parse("Unknown error"));

        Self::Api { error, message }
    }

    pub(crate) fn decode(message: impl Into<String>) -> Self {
        Self::Decode(message.into())
    }

    /// Taxonomy class of this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Transport(_) => ErrorKind::Transport,
            Self::UnexpectedContentType { .. } | Self::MalformedEnvelope(_) | Self::MissingResult => {
                ErrorKind::Protocol
            }
            Self::Api { .. } => ErrorKind::Exchange,
            Self::Decode(_) => ErrorKind::Decode,
            Self::AuthRequired | Self::InvalidParameter(_) | Self::Auth(_) => ErrorKind::Usage,
        }
    }

    /// True for failures that may succeed on a later attempt
    ///
    /// Only transport failures qualify. Nothing in this crate retries.
    pub fn is_transient(&self) -> bool {
        self.kind() == ErrorKind::Transport
    }

    /// The parsed Kraken error, if Kraken rejected the request
    pub fn api_error(&self) -> Option<&ApiError> {
        match self {
            Self::Api { error, .. } => Some(error),
            _ => None,
        }
    }

    /// Check if this error indicates rate limiting
    pub fn is_rate_limited(&self) -> bool {
        self.api_error().is_some_and(ApiError::is_rate_limit)
    }
}

/// Result type for REST operations
pub type RestResult<T> = Result<T, RestError>;

/// Kraken API error categories
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCategory {
    /// EAPI:* errors - API-level issues
    Api,
    /// EGeneral:* errors - General errors
    General,
    /// EService:* errors - Service availability
    Service,
    /// EOrder:* errors - Trading/order errors
    Order,
    /// EFunding:* errors - Deposit/withdrawal errors
    Funding,
    /// EQuery:* errors - Query/search errors
    Query,
    /// ETrade:* errors - Trade execution errors
    Trade,
    /// ESession:* errors - Session errors
    Session,
    /// Unknown error category
    Unknown,
}

/// One Kraken error string, split into category and message
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiError {
    /// The original error string from Kraken
    pub raw: String,
    /// Error category
    pub category: ErrorCategory,
    /// Text after the category prefix
    pub message: String,
}

impl ApiError {
    /// Parse a Kraken error string ("ECATEGORY:Message")
    pub fn parse(error: &str) -> Self {
        let (category, message) = match error.split_once(':') {
            Some((prefix, message)) => {
                let category = match prefix {
                    "EAPI" => ErrorCategory::Api,
                    "EGeneral" => ErrorCategory::General,
                    "EService" => ErrorCategory::Service,
                    "EOrder" => ErrorCategory::Order,
                    "EFunding" => ErrorCategory::Funding,
                    "EQuery" => ErrorCategory::Query,
                    "ETrade" => ErrorCategory::Trade,
                    "ESession" => ErrorCategory::Session,
                    _ => ErrorCategory::Unknown,
                };
                (category, message.trim().to_string())
            }
            None => (ErrorCategory::Unknown, error.to_string()),
        };

        Self {
            raw: error.to_string(),
            category,
            message,
        }
    }

    /// EAPI:Rate limit exceeded, EOrder:Rate limit exceeded, EGeneral:Too many requests
    pub fn is_rate_limit(&self) -> bool {
        matches!(
            self.raw.as_str(),
            "EAPI:Rate limit exceeded" | "EOrder:Rate limit exceeded" | "EGeneral:Too many requests"
        )
    }

    /// EAPI:Invalid nonce
    pub fn is_invalid_nonce(&self) -> bool {
        self.raw == "EAPI:Invalid nonce"
    }

    /// Key or signature rejected
    pub fn is_authentication(&self) -> bool {
        matches!(
            self.raw.as_str(),
            "EAPI:Invalid key" | "EAPI:Invalid signature" | "EGeneral:Permission denied"
        )
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}
