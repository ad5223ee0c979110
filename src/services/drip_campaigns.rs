//! Drip campaign membership and introspection.

use crate::batch::BatchClient;
use crate::client::SwuClient;
use crate::error::SwuResult;
use crate::http::{Operation, SwuResponse};
use crate::types::{Payload, Recipient};

fn list_op() -> Operation {
    Operation::get("drip_campaigns")
}

fn details_op(campaign_id: &str) -> Operation {
    Operation::get(format!("drip_campaigns/{campaign_id}"))
}

fn customers_op(campaign_id: &str) -> Operation {
    Operation::get(format!("drip_campaigns/{campaign_id}/customers"))
}

fn activate_op(campaign_id: &str, recipient: &Recipient, email_data: Option<Payload>) -> Operation {
    let mut payload = Payload::new().field("recipient_address", recipient.address.clone());
    if let Some(data) = email_data {
        payload.insert("email_data", data);
    }
    Operation::post(format!("drip_campaigns/{campaign_id}/activate")).with_payload(payload)
}

fn deactivate_op(campaign_id: &str, email: &str) -> Operation {
    Operation::post(format!("drip_campaigns/{campaign_id}/deactivate"))
        .with_payload(Payload::new().field("recipient_address", email))
}

fn deactivate_all_op(email: &str) -> Operation {
    Operation::post("drip_campaigns/deactivate")
        .with_payload(Payload::new().field("email_address", email))
}

impl SwuClient {
    /// List all drip campaigns.
    pub fn list_drip_campaigns(&self) -> SwuResult<SwuResponse> {
        self.call(list_op())
    }

    /// Fetch one drip campaign, including its steps.
    pub fn drip_campaign_details(&self, campaign_id: &str) -> SwuResult<SwuResponse> {
        self.call(details_op(campaign_id))
    }

    /// List the customers currently on a drip campaign.
    pub fn drip_campaign_customers(&self, campaign_id: &str) -> SwuResult<SwuResponse> {
        self.call(customers_op(campaign_id))
    }

    /// Start a recipient on a drip campaign.
    pub fn start_on_drip_campaign(
        &self,
        campaign_id: &str,
        recipient: &Recipient,
        email_data: Option<Payload>,
    ) -> SwuResult<SwuResponse> {
        self.call(activate_op(campaign_id, recipient, email_data))
    }

    /// Remove a recipient from one drip campaign.
    pub fn remove_from_drip_campaign(
        &self,
        email: &str,
        campaign_id: &str,
    ) -> SwuResult<SwuResponse> {
        self.call(deactivate_op(campaign_id, email))
    }

    /// Remove a recipient from every drip campaign.
    pub fn drip_deactivate(&self, email: &str) -> SwuResult<SwuResponse> {
        self.call(deactivate_all_op(email))
    }
}

impl BatchClient {
    /// Record a drip campaign listing.
    pub fn list_drip_campaigns(&mut self) -> SwuResult<()> {
        self.record(list_op())
    }

    /// Record fetching one drip campaign.
    pub fn drip_campaign_details(&mut self, campaign_id: &str) -> SwuResult<()> {
        self.record(details_op(campaign_id))
    }

    /// Record listing a campaign's customers.
    pub fn drip_campaign_customers(&mut self, campaign_id: &str) -> SwuResult<()> {
        self.record(customers_op(campaign_id))
    }

    /// Record starting a recipient on a drip campaign.
    pub fn start_on_drip_campaign(
        &mut self,
        campaign_id: &str,
        recipient: &Recipient,
        email_data: Option<Payload>,
    ) -> SwuResult<()> {
        self.record(activate_op(campaign_id, recipient, email_data))
    }

    /// Record removing a recipient from one drip campaign.
    pub fn remove_from_drip_campaign(&mut self, email: &str, campaign_id: &str) -> SwuResult<()> {
        self.record(deactivate_op(campaign_id, email))
    }

    /// Record removing a recipient from every drip campaign.
    pub fn drip_deactivate(&mut self, email: &str) -> SwuResult<()> {
        self.record(deactivate_all_op(email))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::encoder::{encode_payload, JsonPayloadEncoder};
    use crate::http::{HttpMethod, OperationBody};

    fn encoded_body(operation: &Operation) -> serde_json::Value {
        match &operation.body {
            OperationBody::Payload(p) => encode_payload(&JsonPayloadEncoder, p).unwrap(),
            other => panic!("expected payload body, got {other:?}"),
        }
    }

    #[test]
    fn activate_carries_the_recipient_address() {
        let operation = activate_op(
            "dc_1",
            &Recipient::new("user@example.com"),
            Some(Payload::new().field("plan", "pro")),
        );

        assert_eq!(operation.endpoint, "drip_campaigns/dc_1/activate");
        assert_eq!(operation.method, HttpMethod::Post);
        let body = encoded_body(&operation);
        assert_eq!(body["recipient_address"], "user@example.com");
        assert_eq!(body["email_data"]["plan"], "pro");
    }

    #[test]
    fn deactivate_targets_one_campaign() {
        let operation = deactivate_op("dc_1", "user@example.com");
        assert_eq!(operation.endpoint, "drip_campaigns/dc_1/deactivate");
        assert_eq!(
            encoded_body(&operation)["recipient_address"],
            "user@example.com"
        );
    }

    #[test]
    fn deactivate_all_uses_the_global_endpoint() {
        let operation = deactivate_all_op("user@example.com");
        assert_eq!(operation.endpoint, "drip_campaigns/deactivate");
        assert_eq!(encoded_body(&operation)["email_address"], "user@example.com");
    }

    #[test]
    fn listing_paths() {
        assert_eq!(list_op().endpoint, "drip_campaigns");
        assert_eq!(details_op("dc_1").endpoint, "drip_campaigns/dc_1");
        assert_eq!(
            customers_op("dc_1").endpoint,
            "drip_campaigns/dc_1/customers"
        );
    }
}
