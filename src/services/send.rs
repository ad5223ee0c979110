//! Sending templated email and rendering templates without sending.

use crate::batch::BatchClient;
use crate::client::SwuClient;
use crate::error::SwuResult;
use crate::http::{Operation, SwuResponse};
use crate::types::{Payload, SendRequest};

/// Selects a non-default template version for rendering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RenderVersion {
    /// By version id.
    Id(String),
    /// By version name.
    Name(String),
}

fn send_op(request: &SendRequest) -> Operation {
    Operation::post("send").with_payload(request.to_payload())
}

fn render_op(
    template_id: &str,
    template_data: Payload,
    version: Option<RenderVersion>,
) -> Operation {
    let mut payload = Payload::new()
        .field("template_id", template_id)
        .field("template_data", template_data);
    match version {
        Some(RenderVersion::Id(id)) => payload.insert("version_id", id),
        Some(RenderVersion::Name(name)) => payload.insert("version_name", name),
        None => {}
    }
    Operation::post("render").with_payload(payload)
}

impl SwuClient {
    /// Send a templated email.
    ///
    /// # Example
    ///
    /// ```rust,no_run
    /// use sendwithus::{Payload, Recipient, SendRequest, SwuClient};
    ///
    /// # fn example(client: &SwuClient) -> Result<(), sendwithus::SwuError> {
    /// let request = SendRequest::builder("tem_ABC", Recipient::new("user@example.com"))
    ///     .email_data(Payload::new().field("first_name", "Ada"))
    ///     .build()?;
    /// let response = client.send(&request)?;
    /// # Ok(())
    /// # }
    /// ```
    pub fn send(&self, request: &SendRequest) -> SwuResult<SwuResponse> {
        self.call(send_op(request))
    }

    /// Render a template with data, returning the output without sending.
    pub fn render(
        &self,
        template_id: &str,
        template_data: Payload,
        version: Option<RenderVersion>,
    ) -> SwuResult<SwuResponse> {
        self.call(render_op(template_id, template_data, version))
    }
}

impl BatchClient {
    /// Record a templated send.
    pub fn send(&mut self, request: &SendRequest) -> SwuResult<()> {
        self.record(send_op(request))
    }

    /// Record a template render.
    pub fn render(
        &mut self,
        template_id: &str,
        template_data: Payload,
        version: Option<RenderVersion>,
    ) -> SwuResult<()> {
        self.record(render_op(template_id, template_data, version))
    }
}
