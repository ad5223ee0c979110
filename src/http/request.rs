//! Request construction.
//!
//! Every logical operation is first described as an [`Operation`] (endpoint,
//! verb, body, extra headers, per-call timeout) and then assembled into a
//! wire-ready [`SwuRequest`] by [`build_request`]: absolute URL, the fixed
//! header set (client stamp, content type, accept, auth) merged with any
//! caller-supplied headers, and the encoded body.
//!
//! Body rules follow the API contract: GET and DELETE never carry a body
//! even if a payload was supplied, and POST/PUT carry one only when the
//! payload is non-empty. Pre-serialized bodies (the batch command array)
//! are attached verbatim, empty or not.

use std::time::Duration;

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;
use http::header::{HeaderMap, HeaderName, HeaderValue};
use serde::{Serialize, Serializer};

use crate::config::{client_stamp, AuthScheme, SwuConfig, API_KEY_HEADER, CLIENT_HEADER};
use crate::encoder::encode_payload;
use crate::error::{SwuError, SwuResult};
use crate::types::Payload;

/// HTTP methods used by the API.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    /// GET request.
    Get,
    /// POST request.
    Post,
    /// PUT request.
    Put,
    /// DELETE request.
    Delete,
}

impl HttpMethod {
    /// The method name as it appears on the wire.
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Put => "PUT",
            HttpMethod::Delete => "DELETE",
        }
    }

    /// Whether requests with this method may carry a body.
    pub fn allows_body(&self) -> bool {
        matches!(self, HttpMethod::Post | HttpMethod::Put)
    }
}

impl Serialize for HttpMethod {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

/// Body of a not-yet-built operation.
#[derive(Debug, Clone)]
pub(crate) enum OperationBody {
    /// No body.
    None,
    /// A payload to run through the configured encoder.
    Payload(Payload),
    /// Pre-serialized bytes, attached verbatim regardless of content.
    Raw(Vec<u8>),
}

/// One logical API operation before assembly.
#[derive(Debug, Clone)]
pub(crate) struct Operation {
    pub endpoint: String,
    pub method: HttpMethod,
    pub body: OperationBody,
    pub headers: Vec<(String, String)>,
    pub timeout: Option<Duration>,
}

impl Operation {
    pub fn new(method: HttpMethod, endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            method,
            body: OperationBody::None,
            headers: Vec::new(),
            timeout: None,
        }
    }

    pub fn get(endpoint: impl Into<String>) -> Self {
        Self::new(HttpMethod::Get, endpoint)
    }

    pub fn post(endpoint: impl Into<String>) -> Self {
        Self::new(HttpMethod::Post, endpoint)
    }

    pub fn put(endpoint: impl Into<String>) -> Self {
        Self::new(HttpMethod::Put, endpoint)
    }

    pub fn delete(endpoint: impl Into<String>) -> Self {
        Self::new(HttpMethod::Delete, endpoint)
    }

    pub fn with_payload(mut self, payload: Payload) -> Self {
        self.body = OperationBody::Payload(payload);
        self
    }

    pub fn with_raw_body(mut self, body: Vec<u8>) -> Self {
        self.body = OperationBody::Raw(body);
        self
    }

    pub fn with_headers(mut self, headers: Vec<(String, String)>) -> Self {
        self.headers = headers;
        self
    }

    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }
}

/// A fully assembled HTTP request, ready for the transport.
#[derive(Debug, Clone)]
pub struct SwuRequest {
    method: HttpMethod,
    url: String,
    headers: HeaderMap,
    body: Option<Vec<u8>>,
    timeout: Option<Duration>,
}

impl SwuRequest {
    /// The HTTP method.
    pub fn method(&self) -> HttpMethod {
        self.method
    }

    /// The absolute request URL.
    pub fn url(&self) -> &str {
        &self.url
    }

    /// The header set.
    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    /// The request body, if any.
    pub fn body(&self) -> Option<&[u8]> {
        self.body.as_deref()
    }

    /// Per-call timeout override, if any.
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout
    }
}

fn header_pair(name: &str, value: &str) -> SwuResult<(HeaderName, HeaderValue)> {
    let name = HeaderName::from_bytes(name.as_bytes()).map_err(|e| SwuError::Validation {
        message: format!("invalid header name {name:?}: {e}"),
        field: Some("headers".to_string()),
    })?;
    let value = HeaderValue::from_str(value).map_err(|e| SwuError::Validation {
        message: format!("invalid header value: {e}"),
        field: Some("headers".to_string()),
    })?;
    Ok((name, value))
}

/// Assemble a wire-ready request for an operation.
///
/// Headers are applied in a fixed order (client stamp, content type,
/// accept, auth) followed by caller-supplied headers, so a caller can
/// override any of the defaults.
pub(crate) fn build_request(config: &SwuConfig, operation: &Operation) -> SwuResult<SwuRequest> {
    let mut headers = HeaderMap::new();

    let (name, value) = header_pair(CLIENT_HEADER, &client_stamp())?;
    headers.insert(name, value);
    headers.insert(
        http::header::CONTENT_TYPE,
        HeaderValue::from_static("application/json"),
    );
    headers.insert(http::header::ACCEPT, HeaderValue::from_static("text/plain"));

    match config.auth_scheme {
        AuthScheme::Basic => {
            // Basic auth with {api_key, ""} as the credential pair.
            let credential = BASE64.encode(format!("{}:", config.expose_api_key()));
            let value = HeaderValue::from_str(&format!("Basic {credential}")).map_err(|e| {
                SwuError::Validation {
                    message: format!("api key is not a valid header value: {e}"),
                    field: Some("api_key".to_string()),
                }
            })?;
            headers.insert(http::header::AUTHORIZATION, value);
        }
        AuthScheme::ApiKeyHeader => {
            let (name, value) = header_pair(API_KEY_HEADER, config.expose_api_key())?;
            headers.insert(name, value);
        }
    }

    for (name, value) in &operation.headers {
        let (name, value) = header_pair(name, value)?;
        headers.insert(name, value);
    }

    let body = match &operation.body {
        OperationBody::None => None,
        OperationBody::Payload(payload) => {
            if operation.method.allows_body() && !payload.is_empty() {
                let encoded = encode_payload(config.encoder.as_ref(), payload)?;
                Some(
                    serde_json::to_vec(&encoded).map_err(|e| SwuError::Serialization {
                        message: format!("failed to serialize request body: {e}"),
                    })?,
                )
            } else {
                None
            }
        }
        OperationBody::Raw(bytes) => Some(bytes.clone()),
    };

    Ok(SwuRequest {
        method: operation.method,
        url: config.absolute_url(&operation.endpoint),
        headers,
        body,
        timeout: operation.timeout,
    })
}
