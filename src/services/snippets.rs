//! Reusable content snippets.

use crate::batch::BatchClient;
use crate::client::SwuClient;
use crate::error::SwuResult;
use crate::http::{Operation, SwuResponse};
use crate::types::Payload;

fn snippet_payload(name: &str, body: &str) -> Payload {
    Payload::new().field("name", name).field("body", body)
}

fn list_op() -> Operation {
    Operation::get("snippets")
}

fn get_op(snippet_id: &str) -> Operation {
    Operation::get(format!("snippets/{snippet_id}"))
}

fn create_op(name: &str, body: &str) -> Operation {
    Operation::post("snippets").with_payload(snippet_payload(name, body))
}

fn update_op(snippet_id: &str, name: &str, body: &str) -> Operation {
    Operation::put(format!("snippets/{snippet_id}")).with_payload(snippet_payload(name, body))
}

impl SwuClient {
    /// List all snippets.
    pub fn snippets(&self) -> SwuResult<SwuResponse> {
        self.call(list_op())
    }

    /// Fetch one snippet.
    pub fn get_snippet(&self, snippet_id: &str) -> SwuResult<SwuResponse> {
        self.call(get_op(snippet_id))
    }

    /// Create a snippet.
    pub fn create_snippet(&self, name: &str, body: &str) -> SwuResult<SwuResponse> {
        self.call(create_op(name, body))
    }

    /// Update an existing snippet.
    pub fn update_snippet(
        &self,
        snippet_id: &str,
        name: &str,
        body: &str,
    ) -> SwuResult<SwuResponse> {
        self.call(update_op(snippet_id, name, body))
    }
}

impl BatchClient {
    /// Record a snippet listing.
    pub fn snippets(&mut self) -> SwuResult<()> {
        self.record(list_op())
    }

    /// Record fetching one snippet.
    pub fn get_snippet(&mut self, snippet_id: &str) -> SwuResult<()> {
        self.record(get_op(snippet_id))
    }

    /// Record a snippet creation.
    pub fn create_snippet(&mut self, name: &str, body: &str) -> SwuResult<()> {
        self.record(create_op(name, body))
    }

    /// Record a snippet update.
    pub fn update_snippet(&mut self, snippet_id: &str, name: &str, body: &str) -> SwuResult<()> {
        self.record(update_op(snippet_id, name, body))
    }
}
