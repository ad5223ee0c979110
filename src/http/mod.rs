//! HTTP layer: request construction, response handling, and the transport
//! seam.
//!
//! Requests are assembled by [`request::build_request`] from an internal
//! operation description, executed through the [`Transport`] trait, and
//! wrapped as [`SwuResponse`] values.

pub mod request;
pub mod response;
pub mod transport;

pub use request::{HttpMethod, SwuRequest};
pub use response::{BatchResult, SwuResponse};
pub use transport::{ReqwestTransport, Transport};

pub(crate) use request::{build_request, Operation, OperationBody};
