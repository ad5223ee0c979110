//! Template and template-version operations.
//!
//! Templates were historically called "emails"; [`SwuClient::emails`] is
//! kept as a deprecated alias of [`SwuClient::templates`].

use crate::batch::BatchClient;
use crate::client::SwuClient;
use crate::error::SwuResult;
use crate::http::{Operation, SwuResponse};
use crate::types::Payload;

fn list_op() -> Operation {
    Operation::get("templates")
}

fn get_op(template_id: &str) -> Operation {
    Operation::get(format!("templates/{template_id}"))
}

fn get_version_op(template_id: &str, version_id: &str) -> Operation {
    Operation::get(format!("templates/{template_id}/versions/{version_id}"))
}

fn version_payload(
    name: &str,
    subject: &str,
    html: Option<&str>,
    text: Option<&str>,
) -> Payload {
    let mut payload = Payload::new().field("name", name).field("subject", subject);
    if let Some(html) = html {
        payload.insert("html", html);
    }
    if let Some(text) = text {
        payload.insert("text", text);
    }
    payload
}

fn create_op(name: &str, subject: &str, html: &str, text: Option<&str>) -> Operation {
    Operation::post("templates").with_payload(version_payload(name, subject, Some(html), text))
}

fn create_version_op(
    name: &str,
    subject: &str,
    template_id: &str,
    html: Option<&str>,
    text: Option<&str>,
) -> Operation {
    Operation::post(format!("templates/{template_id}/versions"))
        .with_payload(version_payload(name, subject, html, text))
}

fn update_version_op(
    name: &str,
    subject: &str,
    template_id: &str,
    version_id: &str,
    html: Option<&str>,
    text: Option<&str>,
) -> Operation {
    Operation::put(format!("templates/{template_id}/versions/{version_id}"))
        .with_payload(version_payload(name, subject, html, text))
}

impl SwuClient {
    /// List all templates.
    pub fn templates(&self) -> SwuResult<SwuResponse> {
        self.call(list_op())
    }

    /// List all templates.
    #[deprecated(note = "the service renamed emails to templates; use `templates`")]
    pub fn emails(&self) -> SwuResult<SwuResponse> {
        self.templates()
    }

    /// Get one template.
    pub fn get_template(&self, template_id: &str) -> SwuResult<SwuResponse> {
        self.call(get_op(template_id))
    }

    /// Get a specific version of a template.
    pub fn get_template_version(
        &self,
        template_id: &str,
        version_id: &str,
    ) -> SwuResult<SwuResponse> {
        self.call(get_version_op(template_id, version_id))
    }

    /// Create a template.
    pub fn create_template(
        &self,
        name: &str,
        subject: &str,
        html: &str,
        text: Option<&str>,
    ) -> SwuResult<SwuResponse> {
        self.call(create_op(name, subject, html, text))
    }

    /// Create a new version of an existing template.
    pub fn create_new_version(
        &self,
        name: &str,
        subject: &str,
        template_id: &str,
        html: Option<&str>,
        text: Option<&str>,
    ) -> SwuResult<SwuResponse> {
        self.call(create_version_op(name, subject, template_id, html, text))
    }

    /// Update an existing template version.
    pub fn update_template_version(
        &self,
        name: &str,
        subject: &str,
        template_id: &str,
        version_id: &str,
        html: Option<&str>,
        text: Option<&str>,
    ) -> SwuResult<SwuResponse> {
        self.call(update_version_op(
            name,
            subject,
            template_id,
            version_id,
            html,
            text,
        ))
    }
}

impl BatchClient {
    /// Record a template listing.
    pub fn templates(&mut self) -> SwuResult<()> {
        self.record(list_op())
    }

    /// Record fetching one template.
    pub fn get_template(&mut self, template_id: &str) -> SwuResult<()> {
        self.record(get_op(template_id))
    }

    /// Record fetching a specific template version.
    pub fn get_template_version(
        &mut self,
        template_id: &str,
        version_id: &str,
    ) -> SwuResult<()> {
        self.record(get_version_op(template_id, version_id))
    }

    /// Record a template creation.
    pub fn create_template(
        &mut self,
        name: &str,
        subject: &str,
        html: &str,
        text: Option<&str>,
    ) -> SwuResult<()> {
        self.record(create_op(name, subject, html, text))
    }

    /// Record creating a new template version.
    pub fn create_new_version(
        &mut self,
        name: &str,
        subject: &str,
        template_id: &str,
        html: Option<&str>,
        text: Option<&str>,
    ) -> SwuResult<()> {
        self.record(create_version_op(name, subject, template_id, html, text))
    }

    /// Record updating a template version.
    pub fn update_template_version(
        &mut self,
        name: &str,
        subject: &str,
        template_id: &str,
        version_id: &str,
        html: Option<&str>,
        text: Option<&str>,
    ) -> SwuResult<()> {
        self.record(update_version_op(
            name,
            subject,
            template_id,
            version_id,
            html,
            text,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::http::HttpMethod;

    #[test]
    fn operations_target_the_template_paths() {
        assert_eq!(list_op().endpoint, "templates");
        assert_eq!(get_op("tem_1").endpoint, "templates/tem_1");
        assert_eq!(
            get_version_op("tem_1", "ver_2").endpoint,
            "templates/tem_1/versions/ver_2"
        );
        assert_eq!(
            create_version_op("n", "s", "tem_1", None, Some("text")).endpoint,
            "templates/tem_1/versions"
        );

        let update = update_version_op("n", "s", "tem_1", "ver_2", Some("<html/>"), None);
        assert_eq!(update.endpoint, "templates/tem_1/versions/ver_2");
        assert_eq!(update.method, HttpMethod::Put);
    }

    #[test]
    fn version_payload_skips_absent_parts() {
        let payload = version_payload("name", "subject", None, Some("plain"));
        let keys: Vec<&str> = payload.iter().map(|(k, _)| k).collect();
        assert_eq!(keys, vec!["name", "subject", "text"]);
    }
}
