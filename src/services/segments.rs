//! Customer segments: listing, evaluation, and segment-wide sends.

use crate::batch::BatchClient;
use crate::client::SwuClient;
use crate::error::SwuResult;
use crate::http::{Operation, SwuResponse};
use crate::types::Payload;

fn list_op() -> Operation {
    Operation::get("segments")
}

fn run_op(segment_id: &str) -> Operation {
    Operation::post(format!("segments/{segment_id}/run"))
}

fn send_op(segment_id: &str, template_id: &str, email_data: Option<Payload>) -> Operation {
    let mut payload = Payload::new().field("email_id", template_id);
    if let Some(data) = email_data {
        payload.insert("email_data", data);
    }
    Operation::post(format!("segments/{segment_id}/send")).with_payload(payload)
}

impl SwuClient {
    /// List all segments.
    pub fn list_segments(&self) -> SwuResult<SwuResponse> {
        self.call(list_op())
    }

    /// Evaluate a segment, returning the customers currently matching it.
    pub fn run_segment(&self, segment_id: &str) -> SwuResult<SwuResponse> {
        self.call(run_op(segment_id))
    }

    /// Send a template to every customer in a segment.
    pub fn send_segment(
        &self,
        segment_id: &str,
        template_id: &str,
        email_data: Option<Payload>,
    ) -> SwuResult<SwuResponse> {
        self.call(send_op(segment_id, template_id, email_data))
    }
}

impl BatchClient {
    /// Record a segment listing.
    pub fn list_segments(&mut self) -> SwuResult<()> {
        self.record(list_op())
    }

    /// Record a segment evaluation.
    pub fn run_segment(&mut self, segment_id: &str) -> SwuResult<()> {
        self.record(run_op(segment_id))
    }

    /// Record a segment-wide send.
    pub fn send_segment(
        &mut self,
        segment_id: &str,
        template_id: &str,
        email_data: Option<Payload>,
    ) -> SwuResult<()> {
        self.record(send_op(segment_id, template_id, email_data))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::encoder::{encode_payload, JsonPayloadEncoder};
    use crate::http::{HttpMethod, OperationBody};

    #[test]
    fn segment_paths_and_methods() {
        assert_eq!(list_op().endpoint, "segments");

        let run = run_op("seg_1");
        assert_eq!(run.endpoint, "segments/seg_1/run");
        assert_eq!(run.method, HttpMethod::Post);
    }

    #[test]
    fn send_carries_template_and_optional_data() {
        let operation = send_op("seg_1", "tem_1", Some(Payload::new().field("sale", true)));
        assert_eq!(operation.endpoint, "segments/seg_1/send");

        let payload = match &operation.body {
            OperationBody::Payload(p) => p,
            other => panic!("expected payload body, got {other:?}"),
        };
        let encoded = encode_payload(&JsonPayloadEncoder, payload).unwrap();
        assert_eq!(encoded["email_id"], "tem_1");
        assert_eq!(encoded["email_data"]["sale"], true);

        let bare = send_op("seg_1", "tem_1", None);
        let payload = match &bare.body {
            OperationBody::Payload(p) => p,
            other => panic!("expected payload body, got {other:?}"),
        };
        let encoded = encode_payload(&JsonPayloadEncoder, payload).unwrap();
        assert!(encoded.get("email_data").is_none());
    }
}
