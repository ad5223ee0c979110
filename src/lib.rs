//! Synchronous Rust client for the [sendwithus](https://www.sendwithus.com)
//! transactional email API.
//!
//! # Features
//!
//! - **Templated sends** with per-send data, cc/bcc, tags, custom headers,
//!   ESP routing, locale and version overrides, and file/inline attachments
//! - **Template, snippet, customer, drip campaign, segment, and log**
//!   operations covering the full API surface
//! - **Batching**: record any sequence of operations and execute them as a
//!   single multiplexed request
//! - **Rich payloads**: ordered mappings carrying timestamps, decimals, and
//!   binary data, collapsed to wire JSON by a pluggable encoder
//! - **Typed errors**: opt-in classification of 4xx/5xx responses into
//!   authentication, API, and server errors
//!
//! # Quick start
//!
//! ```rust,no_run
//! use sendwithus::{Payload, Recipient, SendRequest, SwuClient};
//!
//! fn main() -> Result<(), sendwithus::SwuError> {
//!     let client = SwuClient::with_api_key("live_abc123")?;
//!
//!     let request = SendRequest::builder("tem_ABC123", Recipient::new("user@example.com"))
//!         .email_data(Payload::new().field("first_name", "Ada"))
//!         .build()?;
//!
//!     let response = client.send(&request)?;
//!     println!("sent: {}", response.status_code());
//!     Ok(())
//! }
//! ```
//!
//! # Batching
//!
//! ```rust,no_run
//! use sendwithus::SwuClient;
//!
//! fn main() -> Result<(), sendwithus::SwuError> {
//!     let client = SwuClient::with_api_key("live_abc123")?;
//!     let mut batch = client.start_batch();
//!
//!     batch.customer_create("one@example.com", None)?;
//!     batch.customer_create("two@example.com", None)?;
//!
//!     let response = batch.execute()?;
//!     for result in response.batch_results()? {
//!         println!("{}", result.status_code);
//!     }
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]
#![deny(unsafe_code)]

pub mod batch;
pub mod client;
pub mod config;
pub mod encoder;
pub mod error;
pub mod http;
pub mod services;
pub mod types;

pub use batch::BatchClient;
pub use client::{RequestOptions, SwuClient};
pub use config::{AuthScheme, ConfigError, SwuConfig, SwuConfigBuilder};
pub use encoder::{JsonPayloadEncoder, PayloadEncoder};
pub use error::{classify_status, SwuError, SwuResult};
pub use http::{
    BatchResult, HttpMethod, ReqwestTransport, SwuRequest, SwuResponse, Transport,
};
pub use services::{LogQuery, RenderVersion};
pub use types::{
    FileAttachment, Payload, PayloadValue, Recipient, SendRequest, SendRequestBuilder, Sender,
};
