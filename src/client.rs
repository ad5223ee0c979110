//! Client implementation.
//!
//! [`SwuClient`] is the single-call executor: every operation method builds
//! one request, sends it through the transport, and either returns the raw
//! response or, when the client was configured with `raise_errors(true)`,
//! classifies non-2xx statuses into typed errors.
//!
//! The per-endpoint operation methods (`send`, `templates`,
//! `customer_create`, ...) live in [`crate::services`], one file per
//! endpoint family; this module carries the shared execution path.
//!
//! # Example
//!
//! ```rust,no_run
//! use sendwithus::{Payload, Recipient, SendRequest, SwuClient};
//!
//! # fn example() -> Result<(), sendwithus::SwuError> {
//! let client = SwuClient::with_api_key("live_abc123")?;
//!
//! let request = SendRequest::builder("tem_ABC", Recipient::new("user@example.com"))
//!     .email_data(Payload::new().field("first_name", "Ada"))
//!     .build()?;
//!
//! let response = client.send(&request)?;
//! assert_eq!(response.status_code(), 200);
//! # Ok(())
//! # }
//! ```

use std::sync::Arc;
use std::time::Duration;

use tracing::debug;

use crate::batch::BatchClient;
use crate::config::SwuConfig;
use crate::error::{classify_status, SwuResult};
use crate::http::{build_request, HttpMethod, Operation, ReqwestTransport, SwuResponse, Transport};
use crate::types::Payload;

/// Optional extras for a generic API request: payload, caller headers, and
/// a per-call timeout override.
#[derive(Debug, Clone, Default)]
pub struct RequestOptions {
    /// Request payload for POST/PUT operations.
    pub payload: Option<Payload>,
    /// Extra headers, overriding the defaults on collision.
    pub headers: Vec<(String, String)>,
    /// Per-call timeout, overriding the configured default.
    pub timeout: Option<Duration>,
}

impl RequestOptions {
    /// Empty options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Attach a payload.
    pub fn payload(mut self, payload: Payload) -> Self {
        self.payload = Some(payload);
        self
    }

    /// Add a header.
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    /// Override the timeout for this call only.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }
}

/// Synchronous client for the sendwithus API.
///
/// Cheap to clone; clones share the configuration and transport. The
/// client itself is immutable and safe to share across threads; batch
/// queues created from it are not shared, each one being exclusively owned
/// mutable state.
#[derive(Clone)]
pub struct SwuClient {
    config: Arc<SwuConfig>,
    transport: Arc<dyn Transport>,
}

impl SwuClient {
    /// Create a client from a configuration.
    pub fn new(config: SwuConfig) -> SwuResult<Self> {
        let transport = Arc::new(ReqwestTransport::new(config.timeout)?);
        Ok(Self {
            config: Arc::new(config),
            transport,
        })
    }

    /// Create a client with default configuration and the given API key.
    pub fn with_api_key(api_key: impl Into<String>) -> SwuResult<Self> {
        let config = SwuConfig::builder().api_key(api_key).build()?;
        Self::new(config)
    }

    /// Create a client with a custom transport.
    ///
    /// Useful for tests and for callers that bring their own HTTP stack.
    pub fn with_transport(config: SwuConfig, transport: Arc<dyn Transport>) -> Self {
        Self {
            config: Arc::new(config),
            transport,
        }
    }

    /// The client configuration.
    pub fn config(&self) -> &SwuConfig {
        &self.config
    }

    /// Start a new, independent batch queue.
    ///
    /// Operations invoked on the returned [`BatchClient`] are recorded
    /// instead of sent; see [`BatchClient::execute`]. Each call to this
    /// method creates a queue with its own command list.
    pub fn start_batch(&self) -> BatchClient {
        BatchClient::new(Arc::clone(&self.config), Arc::clone(&self.transport))
    }

    /// Issue a request to an arbitrary endpoint.
    ///
    /// The escape hatch behind every operation method: `endpoint` is the
    /// path fragment after `/api/v{version}/`, already substituted.
    pub fn api_request(
        &self,
        endpoint: &str,
        method: HttpMethod,
        options: RequestOptions,
    ) -> SwuResult<SwuResponse> {
        let mut operation = Operation::new(method, endpoint)
            .with_headers(options.headers)
            .with_timeout(options.timeout);
        if let Some(payload) = options.payload {
            operation = operation.with_payload(payload);
        }
        self.call(operation)
    }

    /// Execute one operation: build, send, classify.
    pub(crate) fn call(&self, operation: Operation) -> SwuResult<SwuResponse> {
        let request = build_request(&self.config, &operation)?;
        debug!(
            method = operation.method.as_str(),
            endpoint = %operation.endpoint,
            "sending api request"
        );

        let response = self.transport.execute(request)?;
        debug!(status = response.status_code(), "api response received");

        if self.config.raise_errors {
            if let Some(error) = classify_status(response.status(), response.body()) {
                return Err(error);
            }
        }
        Ok(response)
    }
}
