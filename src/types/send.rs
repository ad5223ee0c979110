//! Typed model for templated email sends.
//!
//! [`SendRequest`] captures everything the `send` endpoint accepts:
//! template, recipient, template data, sender override, cc/bcc lists,
//! tags, custom message headers, ESP account routing, locale, version
//! override, and inline/file attachments. It is built through
//! [`SendRequestBuilder`], which validates fail-fast: an empty address or
//! template id is rejected before any I/O happens.

use crate::error::{SwuError, SwuResult};
use crate::types::{Payload, PayloadValue};

/// An email recipient.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Recipient {
    /// Email address.
    pub address: String,
    /// Optional display name.
    pub name: Option<String>,
}

impl Recipient {
    /// Recipient with just an address.
    pub fn new(address: impl Into<String>) -> Self {
        Self {
            address: address.into(),
            name: None,
        }
    }

    /// Attach a display name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    fn to_payload(&self) -> Payload {
        let mut payload = Payload::new();
        if let Some(name) = &self.name {
            payload.insert("name", name.clone());
        }
        payload.insert("address", self.address.clone());
        payload
    }
}

/// Sender information for a send.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sender {
    /// Sender address.
    pub address: String,
    /// Optional display name.
    pub name: Option<String>,
    /// Optional reply-to address.
    pub reply_to: Option<String>,
}

impl Sender {
    /// Sender with just an address.
    pub fn new(address: impl Into<String>) -> Self {
        Self {
            address: address.into(),
            name: None,
            reply_to: None,
        }
    }

    /// Attach a display name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Attach a reply-to address.
    pub fn with_reply_to(mut self, reply_to: impl Into<String>) -> Self {
        self.reply_to = Some(reply_to.into());
        self
    }

    fn to_payload(&self) -> Payload {
        let mut payload = Payload::new();
        if let Some(name) = &self.name {
            payload.insert("name", name.clone());
        }
        payload.insert("address", self.address.clone());
        if let Some(reply_to) = &self.reply_to {
            payload.insert("reply_to", reply_to.clone());
        }
        payload
    }
}

/// A file attachment, sent as a base64-encoded `{id, data}` pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileAttachment {
    /// Attachment identifier (typically the filename).
    pub id: String,
    /// Raw file content; base64-encoded by the payload encoder.
    pub data: Vec<u8>,
}

impl FileAttachment {
    /// Create an attachment.
    pub fn new(id: impl Into<String>, data: impl Into<Vec<u8>>) -> Self {
        Self {
            id: id.into(),
            data: data.into(),
        }
    }

    fn to_payload(&self) -> Payload {
        Payload::new()
            .field("id", self.id.clone())
            .field("data", PayloadValue::bytes(self.data.clone()))
    }
}

/// A validated request for the `send` endpoint.
///
/// # Examples
///
/// ```rust
/// use sendwithus::types::{Payload, Recipient, SendRequest};
///
/// let request = SendRequest::builder("tem_ABC123", Recipient::new("user@example.com"))
///     .email_data(Payload::new().field("first_name", "Ada"))
///     .tag("welcome")
///     .build()
///     .unwrap();
/// ```
#[derive(Debug, Clone)]
pub struct SendRequest {
    template_id: String,
    recipient: Recipient,
    email_data: Option<Payload>,
    sender: Option<Sender>,
    cc: Vec<Recipient>,
    bcc: Vec<Recipient>,
    tags: Vec<String>,
    headers: Vec<(String, String)>,
    esp_account: Option<String>,
    locale: Option<String>,
    version_name: Option<String>,
    inline: Option<FileAttachment>,
    files: Vec<FileAttachment>,
}

impl SendRequest {
    /// Start building a send request for a template and recipient.
    pub fn builder(template_id: impl Into<String>, recipient: Recipient) -> SendRequestBuilder {
        SendRequestBuilder {
            request: SendRequest {
                template_id: template_id.into(),
                recipient,
                email_data: None,
                sender: None,
                cc: Vec::new(),
                bcc: Vec::new(),
                tags: Vec::new(),
                headers: Vec::new(),
                esp_account: None,
                locale: None,
                version_name: None,
                inline: None,
                files: Vec::new(),
            },
        }
    }

    /// Convert to the wire payload for the `send` endpoint.
    pub(crate) fn to_payload(&self) -> Payload {
        let mut payload = Payload::new()
            .field("email_id", self.template_id.clone())
            .field("recipient", self.recipient.to_payload())
            .field(
                "email_data",
                self.email_data.clone().unwrap_or_default(),
            );

        if let Some(sender) = &self.sender {
            payload.insert("sender", sender.to_payload());
        }
        if !self.cc.is_empty() {
            let cc: Vec<PayloadValue> = self
                .cc
                .iter()
                .map(|r| PayloadValue::Mapping(r.to_payload()))
                .collect();
            payload.insert("cc", PayloadValue::Sequence(cc));
        }
        if !self.bcc.is_empty() {
            let bcc: Vec<PayloadValue> = self
                .bcc
                .iter()
                .map(|r| PayloadValue::Mapping(r.to_payload()))
                .collect();
            payload.insert("bcc", PayloadValue::Sequence(bcc));
        }
        if !self.tags.is_empty() {
            payload.insert("tags", self.tags.clone());
        }
        if !self.headers.is_empty() {
            let mut headers = Payload::new();
            for (name, value) in &self.headers {
                headers.insert(name.clone(), value.clone());
            }
            payload.insert("headers", headers);
        }
        if let Some(esp_account) = &self.esp_account {
            payload.insert("esp_account", esp_account.clone());
        }
        if let Some(locale) = &self.locale {
            payload.insert("locale", locale.clone());
        }
        if let Some(version_name) = &self.version_name {
            payload.insert("version_name", version_name.clone());
        }
        if !self.files.is_empty() {
            let files: Vec<PayloadValue> = self
                .files
                .iter()
                .map(|f| PayloadValue::Mapping(f.to_payload()))
                .collect();
            payload.insert("files", PayloadValue::Sequence(files));
        }
        if let Some(inline) = &self.inline {
            payload.insert("inline", inline.to_payload());
        }

        payload
    }
}

/// Builder for [`SendRequest`] with fail-fast validation.
#[derive(Debug, Clone)]
pub struct SendRequestBuilder {
    request: SendRequest,
}

impl SendRequestBuilder {
    /// Template variables for rendering.
    pub fn email_data(mut self, data: Payload) -> Self {
        self.request.email_data = Some(data);
        self
    }

    /// Override the sender.
    pub fn sender(mut self, sender: Sender) -> Self {
        self.request.sender = Some(sender);
        self
    }

    /// Add a cc recipient.
    pub fn cc(mut self, recipient: Recipient) -> Self {
        self.request.cc.push(recipient);
        self
    }

    /// Add a bcc recipient.
    pub fn bcc(mut self, recipient: Recipient) -> Self {
        self.request.bcc.push(recipient);
        self
    }

    /// Add a tag.
    pub fn tag(mut self, tag: impl Into<String>) -> Self {
        self.request.tags.push(tag.into());
        self
    }

    /// Add a custom message header.
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.request.headers.push((name.into(), value.into()));
        self
    }

    /// Route the send through a specific ESP account.
    pub fn esp_account(mut self, esp_account: impl Into<String>) -> Self {
        self.request.esp_account = Some(esp_account.into());
        self
    }

    /// Select a template locale.
    pub fn locale(mut self, locale: impl Into<String>) -> Self {
        self.request.locale = Some(locale.into());
        self
    }

    /// Select a template version by name.
    pub fn version_name(mut self, version_name: impl Into<String>) -> Self {
        self.request.version_name = Some(version_name.into());
        self
    }

    /// Attach an inline image.
    pub fn inline(mut self, attachment: FileAttachment) -> Self {
        self.request.inline = Some(attachment);
        self
    }

    /// Attach a file.
    pub fn file(mut self, attachment: FileAttachment) -> Self {
        self.request.files.push(attachment);
        self
    }

    /// Validate and build the request.
    ///
    /// # Errors
    ///
    /// Returns [`SwuError::Validation`] for an empty template id, an empty
    /// recipient/cc/bcc/sender address, or an attachment without an id.
    pub fn build(self) -> SwuResult<SendRequest> {
        let request = self.request;

        if request.template_id.is_empty() {
            return Err(validation("template id must not be empty", "template_id"));
        }
        if request.recipient.address.is_empty() {
            return Err(validation("recipient address must not be empty", "recipient"));
        }
        if request.cc.iter().any(|r| r.address.is_empty()) {
            return Err(validation("cc address must not be empty", "cc"));
        }
        if request.bcc.iter().any(|r| r.address.is_empty()) {
            return Err(validation("bcc address must not be empty", "bcc"));
        }
        if let Some(sender) = &request.sender {
            if sender.address.is_empty() {
                return Err(validation("sender address must not be empty", "sender"));
            }
        }
        if request
            .files
            .iter()
            .chain(request.inline.iter())
            .any(|f| f.id.is_empty())
        {
            return Err(validation("attachment id must not be empty", "files"));
        }

        Ok(request)
    }
}

fn validation(message: &str, field: &str) -> SwuError {
    SwuError::Validation {
        message: message.to_string(),
        field: Some(field.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base() -> SendRequestBuilder {
        SendRequest::builder("tem_123", Recipient::new("user@example.com"))
    }

    #[test]
    fn minimal_request_builds() {
        let request = base().build().unwrap();
        let payload = request.to_payload();

        let keys: Vec<&str> = payload.iter().map(|(k, _)| k).collect();
        assert_eq!(keys, vec!["email_id", "recipient", "email_data"]);
    }

    #[test]
    fn email_data_defaults_to_empty_mapping() {
        let request = base().build().unwrap();
        let payload = request.to_payload();
        let (_, value) = payload.iter().nth(2).unwrap();
        assert_eq!(value, &PayloadValue::Mapping(Payload::new()));
    }

    #[test]
    fn full_request_carries_every_field() {
        let request = base()
            .email_data(Payload::new().field("name", "Ada"))
            .sender(
                Sender::new("from@example.com")
                    .with_name("From")
                    .with_reply_to("reply@example.com"),
            )
            .cc(Recipient::new("cc@example.com"))
            .bcc(Recipient::new("bcc@example.com"))
            .tag("one")
            .tag("two")
            .header("X-HEADER-ONE", "header-value")
            .esp_account("esp_123")
            .locale("sv-SE")
            .version_name("version-override")
            .inline(FileAttachment::new("logo.png", b"png".to_vec()))
            .file(FileAttachment::new("report.pdf", b"pdf".to_vec()))
            .build()
            .unwrap();

        let payload = request.to_payload();
        let keys: Vec<&str> = payload.iter().map(|(k, _)| k).collect();
        assert_eq!(
            keys,
            vec![
                "email_id",
                "recipient",
                "email_data",
                "sender",
                "cc",
                "bcc",
                "tags",
                "headers",
                "esp_account",
                "locale",
                "version_name",
                "files",
                "inline",
            ]
        );
    }

    #[test]
    fn empty_template_id_fails_fast() {
        let err = SendRequest::builder("", Recipient::new("user@example.com"))
            .build()
            .unwrap_err();
        assert!(matches!(err, SwuError::Validation { .. }));
    }

    #[test]
    fn empty_recipient_address_fails_fast() {
        let err = SendRequest::builder("tem_123", Recipient::new(""))
            .build()
            .unwrap_err();
        assert!(matches!(err, SwuError::Validation { .. }));
    }

    #[test]
    fn empty_cc_address_fails_fast() {
        let err = base().cc(Recipient::new("")).build().unwrap_err();
        match err {
            SwuError::Validation { field, .. } => assert_eq!(field.as_deref(), Some("cc")),
            other => panic!("expected Validation, got {other:?}"),
        }
    }

    #[test]
    fn attachment_without_id_fails_fast() {
        let err = base()
            .file(FileAttachment::new("", b"data".to_vec()))
            .build()
            .unwrap_err();
        assert!(matches!(err, SwuError::Validation { .. }));
    }

    #[test]
    fn recipient_payload_puts_name_before_address() {
        let recipient = Recipient::new("user@example.com").with_name("User");
        let payload = recipient.to_payload();
        let keys: Vec<&str> = payload.iter().map(|(k, _)| k).collect();
        assert_eq!(keys, vec!["name", "address"]);
    }
}
