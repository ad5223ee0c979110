//! Response handling.
//!
//! [`SwuResponse`] wraps the status code, headers, and raw body bytes of an
//! API response. Parsing is always on demand and fails softly: a malformed
//! or non-JSON body yields a typed error from [`SwuResponse::json`] while
//! the raw bytes stay accessible through [`SwuResponse::body`] and
//! [`SwuResponse::text`].

use std::collections::HashMap;

use http::StatusCode;
use serde::de::DeserializeOwned;
use serde::Deserialize;

use crate::error::{SwuError, SwuResult};

/// A response from the API.
#[derive(Debug, Clone)]
pub struct SwuResponse {
    status: StatusCode,
    headers: HashMap<String, String>,
    body: Vec<u8>,
}

impl SwuResponse {
    /// Create a response from its parts. Header names are lowercased.
    pub fn new(status: StatusCode, headers: HashMap<String, String>, body: Vec<u8>) -> Self {
        let headers = headers
            .into_iter()
            .map(|(name, value)| (name.to_lowercase(), value))
            .collect();
        Self {
            status,
            headers,
            body,
        }
    }

    /// Build a response from a blocking reqwest response, consuming it.
    pub(crate) fn from_reqwest(response: reqwest::blocking::Response) -> SwuResult<Self> {
        let status = response.status();

        let mut headers = HashMap::new();
        for (name, value) in response.headers() {
            if let Ok(value) = value.to_str() {
                headers.insert(name.as_str().to_lowercase(), value.to_string());
            }
        }

        let body = response.bytes().map(|b| b.to_vec()).map_err(SwuError::from)?;

        Ok(Self::new(status, headers, body))
    }

    /// The HTTP status code.
    pub fn status(&self) -> StatusCode {
        self.status
    }

    /// The status code as a bare number, for quick checks.
    pub fn status_code(&self) -> u16 {
        self.status.as_u16()
    }

    /// True for 2xx statuses.
    pub fn is_success(&self) -> bool {
        self.status.is_success()
    }

    /// Look up a header value, case-insensitively.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(&name.to_lowercase()).map(String::as_str)
    }

    /// The raw body bytes.
    pub fn body(&self) -> &[u8] {
        &self.body
    }

    /// The body as text, with invalid UTF-8 replaced.
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }

    /// Parse the body as JSON into a typed value.
    ///
    /// # Errors
    ///
    /// Returns [`SwuError::Serialization`] when the body is not valid JSON
    /// for `T`. The raw bytes remain available either way.
    pub fn json<T: DeserializeOwned>(&self) -> SwuResult<T> {
        serde_json::from_slice(&self.body).map_err(|e| SwuError::Serialization {
            message: format!("failed to decode response body: {e}"),
        })
    }

    /// Parse the body of a batch execution into per-command results.
    ///
    /// The returned list is in submission order: its i-th element is the
    /// result of the i-th recorded command.
    pub fn batch_results(&self) -> SwuResult<Vec<BatchResult>> {
        self.json()
    }
}

/// The result of one command in an executed batch.
///
/// The service returns one of these per submitted command, in submission
/// order, each with its own status code.
#[derive(Debug, Clone, Deserialize)]
pub struct BatchResult {
    /// HTTP status the command would have produced on its own.
    pub status_code: u16,

    /// Remaining fields of the result object (typically the command's
    /// response body).
    #[serde(flatten)]
    pub body: serde_json::Value,
}

impl BatchResult {
    /// True for 2xx statuses.
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status_code)
    }
}
