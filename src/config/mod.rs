//! Configuration for the sendwithus client.
//!
//! [`SwuConfig`] is an immutable snapshot of everything a request needs:
//! API key, endpoint location (protocol/host/port/version), authentication
//! scheme, error-raising policy, default timeout, and the payload encoder.
//! It is created once through [`SwuConfigBuilder`], shared behind an `Arc`,
//! and never mutated afterwards, so it can be read from any number of
//! operations (and batch queues) concurrently.

use std::sync::Arc;
use std::time::Duration;

use secrecy::{ExposeSecret, SecretString};
use url::Url;

pub mod error;

pub use error::ConfigError;

use crate::encoder::{JsonPayloadEncoder, PayloadEncoder};

/// Default API host.
pub const DEFAULT_HOST: &str = "api.sendwithus.com";

/// Default protocol.
pub const DEFAULT_PROTOCOL: &str = "https";

/// Default port.
pub const DEFAULT_PORT: u16 = 443;

/// Default API version.
pub const DEFAULT_API_VERSION: &str = "1";

/// Default request timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Header carrying the client identification stamp on every request.
pub const CLIENT_HEADER: &str = "X-SWU-Client";

/// Header carrying the API key under the legacy authentication scheme.
pub const API_KEY_HEADER: &str = "X-SWU-API-KEY";

/// The client identification stamp, `{language}-{client version}`.
pub fn client_stamp() -> String {
    format!("rust-{}", env!("CARGO_PKG_VERSION"))
}

/// How the API key is presented to the service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AuthScheme {
    /// HTTP Basic auth with the API key as username and an empty password.
    #[default]
    Basic,
    /// Legacy scheme: the key travels in the `X-SWU-API-KEY` header.
    ApiKeyHeader,
}

/// Immutable client configuration.
///
/// # Examples
///
/// ```rust
/// use sendwithus::config::SwuConfig;
///
/// let config = SwuConfig::builder()
///     .api_key("live_abc123")
///     .raise_errors(true)
///     .build()
///     .unwrap();
///
/// assert_eq!(config.host, "api.sendwithus.com");
/// assert_eq!(config.api_version, "1");
/// ```
#[derive(Clone)]
pub struct SwuConfig {
    /// API key used to authenticate every request.
    pub api_key: SecretString,

    /// Protocol, `https` by default.
    pub protocol: String,

    /// API host.
    pub host: String,

    /// API port.
    pub port: u16,

    /// API version segment of the request path.
    pub api_version: String,

    /// How the API key is sent.
    pub auth_scheme: AuthScheme,

    /// When true, 4xx/5xx responses become typed errors instead of
    /// ordinary responses.
    pub raise_errors: bool,

    /// Default timeout applied to every request unless overridden per call.
    pub timeout: Duration,

    /// Payload encoder used for every request body.
    pub encoder: Arc<dyn PayloadEncoder>,
}

impl std::fmt::Debug for SwuConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SwuConfig")
            .field("api_key", &self.api_key)
            .field("protocol", &self.protocol)
            .field("host", &self.host)
            .field("port", &self.port)
            .field("api_version", &self.api_version)
            .field("auth_scheme", &self.auth_scheme)
            .field("raise_errors", &self.raise_errors)
            .field("timeout", &self.timeout)
            .finish_non_exhaustive()
    }
}

impl SwuConfig {
    /// Create a new configuration builder.
    pub fn builder() -> SwuConfigBuilder {
        SwuConfigBuilder::default()
    }

    /// The API key in the clear, for building auth headers.
    pub(crate) fn expose_api_key(&self) -> &str {
        self.api_key.expose_secret()
    }

    /// Relative request path for an endpoint: `/api/v{version}/{endpoint}`.
    ///
    /// This is the form recorded into batch commands.
    pub fn relative_path(&self, endpoint: &str) -> String {
        format!("/api/v{}/{}", self.api_version, endpoint)
    }

    /// Absolute request URL for an endpoint:
    /// `{protocol}://{host}:{port}/api/v{version}/{endpoint}`.
    pub fn absolute_url(&self, endpoint: &str) -> String {
        format!(
            "{}://{}:{}{}",
            self.protocol,
            self.host,
            self.port,
            self.relative_path(endpoint)
        )
    }
}

/// Builder for [`SwuConfig`].
#[derive(Default)]
pub struct SwuConfigBuilder {
    api_key: Option<SecretString>,
    protocol: Option<String>,
    host: Option<String>,
    port: Option<u16>,
    api_version: Option<String>,
    auth_scheme: Option<AuthScheme>,
    raise_errors: Option<bool>,
    timeout: Option<Duration>,
    encoder: Option<Arc<dyn PayloadEncoder>>,
}

impl SwuConfigBuilder {
    /// Set the API key. Required.
    pub fn api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(SecretString::new(api_key.into()));
        self
    }

    /// Override the protocol (default `https`).
    pub fn protocol(mut self, protocol: impl Into<String>) -> Self {
        self.protocol = Some(protocol.into());
        self
    }

    /// Override the API host (default `api.sendwithus.com`).
    pub fn host(mut self, host: impl Into<String>) -> Self {
        self.host = Some(host.into());
        self
    }

    /// Override the API port (default 443).
    pub fn port(mut self, port: u16) -> Self {
        self.port = Some(port);
        self
    }

    /// Override the API version segment (default `1`).
    pub fn api_version(mut self, version: impl Into<String>) -> Self {
        self.api_version = Some(version.into());
        self
    }

    /// Select the authentication scheme (default HTTP Basic).
    pub fn auth_scheme(mut self, scheme: AuthScheme) -> Self {
        self.auth_scheme = Some(scheme);
        self
    }

    /// Raise typed errors for 4xx/5xx responses (default false).
    pub fn raise_errors(mut self, raise: bool) -> Self {
        self.raise_errors = Some(raise);
        self
    }

    /// Set the default request timeout (default 30 seconds).
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Install a replacement payload encoder.
    ///
    /// The default is [`JsonPayloadEncoder`].
    pub fn encoder(mut self, encoder: impl PayloadEncoder + 'static) -> Self {
        self.encoder = Some(Arc::new(encoder));
        self
    }

    /// Build the configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingField`] when no API key was supplied,
    /// and [`ConfigError::Invalid`] for an empty key or an endpoint that
    /// does not form a valid URL.
    pub fn build(self) -> Result<SwuConfig, ConfigError> {
        let api_key = self.api_key.ok_or_else(|| ConfigError::MissingField {
            field: "api_key".to_string(),
        })?;
        if api_key.expose_secret().is_empty() {
            return Err(ConfigError::Invalid {
                message: "api_key must not be empty".to_string(),
            });
        }

        let config = SwuConfig {
            api_key,
            protocol: self.protocol.unwrap_or_else(|| DEFAULT_PROTOCOL.to_string()),
            host: self.host.unwrap_or_else(|| DEFAULT_HOST.to_string()),
            port: self.port.unwrap_or(DEFAULT_PORT),
            api_version: self
                .api_version
                .unwrap_or_else(|| DEFAULT_API_VERSION.to_string()),
            auth_scheme: self.auth_scheme.unwrap_or_default(),
            raise_errors: self.raise_errors.unwrap_or(false),
            timeout: self.timeout.unwrap_or(DEFAULT_TIMEOUT),
            encoder: self
                .encoder
                .unwrap_or_else(|| Arc::new(JsonPayloadEncoder)),
        };

        // Catch malformed host/protocol/port combinations up front rather
        // than on the first request.
        let base = config.absolute_url("");
        Url::parse(&base).map_err(|e| ConfigError::Invalid {
            message: format!("invalid endpoint {base}: {e}"),
        })?;

        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_applies_defaults() {
        let config = SwuConfig::builder().api_key("key").build().unwrap();

        assert_eq!(config.protocol, "https");
        assert_eq!(config.host, "api.sendwithus.com");
        assert_eq!(config.port, 443);
        assert_eq!(config.api_version, "1");
        assert_eq!(config.auth_scheme, AuthScheme::Basic);
        assert!(!config.raise_errors);
        assert_eq!(config.timeout, Duration::from_secs(30));
    }

    #[test]
    fn builder_missing_api_key() {
        let result = SwuConfig::builder().build();
        match result.unwrap_err() {
            ConfigError::MissingField { field } => assert_eq!(field, "api_key"),
            other => panic!("expected MissingField, got {other:?}"),
        }
    }

    #[test]
    fn builder_rejects_empty_api_key() {
        let result = SwuConfig::builder().api_key("").build();
        assert!(matches!(result, Err(ConfigError::Invalid { .. })));
    }

    #[test]
    fn builder_rejects_malformed_endpoint() {
        let result = SwuConfig::builder()
            .api_key("key")
            .protocol("not a protocol")
            .build();
        assert!(matches!(result, Err(ConfigError::Invalid { .. })));
    }

    #[test]
    fn paths_follow_the_wire_contract() {
        let config = SwuConfig::builder().api_key("key").build().unwrap();
        assert_eq!(config.relative_path("send"), "/api/v1/send");
        assert_eq!(
            config.absolute_url("send"),
            "https://api.sendwithus.com:443/api/v1/send"
        );
    }

    #[test]
    fn overrides_are_honored() {
        let config = SwuConfig::builder()
            .api_key("key")
            .protocol("http")
            .host("localhost")
            .port(8080)
            .api_version("0")
            .auth_scheme(AuthScheme::ApiKeyHeader)
            .timeout(Duration::from_secs(5))
            .build()
            .unwrap();

        assert_eq!(
            config.absolute_url("templates"),
            "http://localhost:8080/api/v0/templates"
        );
        assert_eq!(config.auth_scheme, AuthScheme::ApiKeyHeader);
        assert_eq!(config.timeout, Duration::from_secs(5));
    }

    #[test]
    fn client_stamp_names_the_language() {
        assert!(client_stamp().starts_with("rust-"));
    }
}
