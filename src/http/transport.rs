//! Transport layer abstraction.
//!
//! The transport is the capability seam between request construction and
//! the network: one blocking call in, one response (or error) out. The
//! default implementation uses reqwest's blocking client; tests substitute
//! a mock. The transport applies no policy of its own, neither retries nor
//! status interpretation; its failures (connection errors, timeouts) are
//! surfaced to the caller untranslated.

use std::time::Duration;

#[cfg(test)]
use mockall::automock;

use crate::error::SwuResult;

use super::request::{HttpMethod, SwuRequest};
use super::response::SwuResponse;

/// Blocking HTTP transport.
#[cfg_attr(test, automock)]
pub trait Transport: Send + Sync {
    /// Send one request and block until the response arrives.
    ///
    /// # Errors
    ///
    /// Returns [`SwuError::Transport`](crate::error::SwuError::Transport)
    /// for connection failures and timeouts.
    fn execute(&self, request: SwuRequest) -> SwuResult<SwuResponse>;
}

/// Reqwest-based blocking transport.
pub struct ReqwestTransport {
    client: reqwest::blocking::Client,
}

impl ReqwestTransport {
    /// Create a transport with the given default timeout.
    ///
    /// Connection handling (pooling, keep-alive) is left to reqwest; the
    /// client applies no policy on top.
    pub fn new(timeout: Duration) -> SwuResult<Self> {
        let client = reqwest::blocking::Client::builder()
            .timeout(timeout)
            .build()?;
        Ok(Self { client })
    }
}

impl Transport for ReqwestTransport {
    fn execute(&self, request: SwuRequest) -> SwuResult<SwuResponse> {
        let method = match request.method() {
            HttpMethod::Get => reqwest::Method::GET,
            HttpMethod::Post => reqwest::Method::POST,
            HttpMethod::Put => reqwest::Method::PUT,
            HttpMethod::Delete => reqwest::Method::DELETE,
        };

        let mut builder = self
            .client
            .request(method, request.url())
            .headers(request.headers().clone());

        if let Some(timeout) = request.timeout() {
            builder = builder.timeout(timeout);
        }
        if let Some(body) = request.body() {
            builder = builder.body(body.to_vec());
        }

        let response = builder.send()?;
        SwuResponse::from_reqwest(response)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn transport_builds_with_default_timeout() {
        let transport = ReqwestTransport::new(Duration::from_secs(30));
        assert!(transport.is_ok());
    }
}
