//! Error types for the sendwithus client.
//!
//! The taxonomy mirrors the API's status-code contract: authentication
//! failures (403), other client-side request errors (4xx), and server
//! errors (5xx) each get their own variant carrying the raw response body.
//! Transport failures from the underlying HTTP layer are wrapped but never
//! reinterpreted, and payload-encoding failures always propagate since they
//! indicate a programming error in the caller's payload.
//!
//! HTTP errors are only surfaced as `Err` values when the client was built
//! with `raise_errors(true)`; otherwise a non-2xx status comes back as an
//! ordinary [`SwuResponse`](crate::http::SwuResponse) and the caller
//! inspects `status()` itself.
//!
//! # Examples
//!
//! ```rust
//! use sendwithus::error::SwuError;
//!
//! fn describe(error: &SwuError) -> &'static str {
//!     match error {
//!         SwuError::Authentication { .. } => "check the API key",
//!         SwuError::Api { .. } => "fix the request",
//!         SwuError::Server { .. } => "the service had a problem",
//!         _ => "something else went wrong",
//!     }
//! }
//! ```

use http::StatusCode;
use thiserror::Error;

/// Result type alias for sendwithus operations.
pub type SwuResult<T> = std::result::Result<T, SwuError>;

/// Top-level error type for the sendwithus client.
#[derive(Debug, Error)]
pub enum SwuError {
    /// Authentication failed (HTTP 403).
    ///
    /// The API key was rejected. Carries the raw response body returned
    /// by the service.
    #[error("authentication failed: {response}")]
    Authentication {
        /// Raw response body.
        response: String,
    },

    /// The request was invalid (HTTP 4xx other than 403).
    #[error("api request failed ({status}): {response}")]
    Api {
        /// The HTTP status code.
        status: u16,
        /// Raw response body.
        response: String,
    },

    /// The service failed to process the request (HTTP 5xx).
    #[error("server error ({status}): {response}")]
    Server {
        /// The HTTP status code.
        status: u16,
        /// Raw response body.
        response: String,
    },

    /// Transport-level failure (connection refused, DNS, timeout).
    ///
    /// These are propagated from the HTTP layer as-is, never reclassified.
    #[error("transport error: {message}")]
    Transport {
        /// Description of the transport failure.
        message: String,
        /// The underlying error, if available.
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// A payload value has no JSON representation.
    ///
    /// Raised by the payload encoder for non-finite floats or decimals
    /// outside the representable range. Always propagated immediately.
    #[error("encoding error: {message}")]
    Encoding {
        /// Description of the unrepresentable value.
        message: String,
    },

    /// A response body could not be decoded.
    ///
    /// The raw bytes remain available on the response; this error only
    /// occurs when the caller explicitly asks for a parsed body.
    #[error("serialization error: {message}")]
    Serialization {
        /// Description of the decode failure.
        message: String,
    },

    /// Client-side validation rejected the request before any I/O.
    #[error("validation error: {message}")]
    Validation {
        /// Description of the validation failure.
        message: String,
        /// The offending field, if known.
        field: Option<String>,
    },

    /// The client configuration is invalid.
    #[error("configuration error: {message}")]
    Configuration {
        /// Description of the configuration problem.
        message: String,
    },
}

impl SwuError {
    /// Returns the HTTP status code for status-derived errors.
    pub fn status(&self) -> Option<u16> {
        match self {
            SwuError::Authentication { .. } => Some(403),
            SwuError::Api { status, .. } | SwuError::Server { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Returns the raw response body for status-derived errors.
    pub fn response(&self) -> Option<&str> {
        match self {
            SwuError::Authentication { response }
            | SwuError::Api { response, .. }
            | SwuError::Server { response, .. } => Some(response.as_str()),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for SwuError {
    fn from(err: reqwest::Error) -> Self {
        SwuError::Transport {
            message: err.to_string(),
            source: Some(Box::new(err)),
        }
    }
}

/// Classify an HTTP status into a typed error.
///
/// Pure mapping per the API contract: 403 is an authentication failure,
/// any other 4xx is a client request error, any 5xx is a server error,
/// and everything else (2xx/3xx) is no error at all. The raw response
/// body travels with the error.
///
/// Only consulted when the client is configured with `raise_errors(true)`.
///
/// # Examples
///
/// ```rust
/// use http::StatusCode;
/// use sendwithus::error::{classify_status, SwuError};
///
/// assert!(classify_status(StatusCode::OK, b"").is_none());
/// assert!(matches!(
///     classify_status(StatusCode::FORBIDDEN, b"bad key"),
///     Some(SwuError::Authentication { .. })
/// ));
/// ```
pub fn classify_status(status: StatusCode, body: &[u8]) -> Option<SwuError> {
    let response = String::from_utf8_lossy(body).into_owned();
    if status == StatusCode::FORBIDDEN {
        Some(SwuError::Authentication { response })
    } else if status.is_client_error() {
        Some(SwuError::Api {
            status: status.as_u16(),
            response,
        })
    } else if status.is_server_error() {
        Some(SwuError::Server {
            status: status.as_u16(),
            response,
        })
    } else {
        None
    }
}
