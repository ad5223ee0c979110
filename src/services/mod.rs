//! Per-endpoint operation methods.
//!
//! Each file covers one endpoint family and defines the operation methods
//! twice: on [`SwuClient`](crate::SwuClient), where they execute
//! immediately and return a response, and on
//! [`BatchClient`](crate::BatchClient), where they record a command and
//! return `SwuResult<()>`. Both go through the same operation constructors,
//! so a batched call hits exactly the path and body its direct counterpart
//! would.

pub mod customers;
pub mod drip_campaigns;
pub mod logs;
pub mod segments;
pub mod send;
pub mod snippets;
pub mod templates;

pub use logs::LogQuery;
pub use send::RenderVersion;
