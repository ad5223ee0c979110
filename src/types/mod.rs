//! Data types shared across the client: request payloads and the typed
//! model for templated sends.

pub mod payload;
pub mod send;

pub use payload::{Payload, PayloadValue};
pub use send::{FileAttachment, Recipient, SendRequest, SendRequestBuilder, Sender};
