//! Customer profiles, conversion events, and group membership.

use rust_decimal::Decimal;

use crate::batch::BatchClient;
use crate::client::SwuClient;
use crate::error::SwuResult;
use crate::http::{Operation, SwuResponse};
use crate::types::Payload;

fn create_op(email: &str, data: Option<Payload>) -> Operation {
    // Customer data fields ride alongside the email in one flat object.
    let mut payload = data.unwrap_or_default();
    payload.insert("email", email);
    Operation::post("customers").with_payload(payload)
}

fn details_op(email: &str) -> Operation {
    Operation::get(format!("customers/{email}"))
}

fn delete_op(email: &str) -> Operation {
    Operation::delete(format!("customers/{email}"))
}

fn conversion_op(email: &str, revenue: Option<Decimal>) -> Operation {
    let mut payload = Payload::new();
    if let Some(revenue) = revenue {
        payload.insert("revenue", revenue);
    }
    Operation::post(format!("customers/{email}/conversions")).with_payload(payload)
}

fn add_to_group_op(email: &str, group_id: &str) -> Operation {
    Operation::post(format!("customers/{email}/groups/{group_id}"))
}

fn remove_from_group_op(email: &str, group_id: &str) -> Operation {
    Operation::delete(format!("customers/{email}/groups/{group_id}"))
}

impl SwuClient {
    /// Create or update a customer profile.
    ///
    /// `data` holds arbitrary profile fields; the email is merged in as the
    /// `email` field.
    pub fn customer_create(&self, email: &str, data: Option<Payload>) -> SwuResult<SwuResponse> {
        self.call(create_op(email, data))
    }

    /// Fetch a customer profile.
    pub fn customer_details(&self, email: &str) -> SwuResult<SwuResponse> {
        self.call(details_op(email))
    }

    /// Delete a customer profile.
    pub fn customer_delete(&self, email: &str) -> SwuResult<SwuResponse> {
        self.call(delete_op(email))
    }

    /// Record a conversion event for a customer, optionally with revenue.
    pub fn customer_conversion(
        &self,
        email: &str,
        revenue: Option<Decimal>,
    ) -> SwuResult<SwuResponse> {
        self.call(conversion_op(email, revenue))
    }

    /// Add a customer to a group.
    pub fn customer_add_to_group(&self, email: &str, group_id: &str) -> SwuResult<SwuResponse> {
        self.call(add_to_group_op(email, group_id))
    }

    /// Remove a customer from a group.
    pub fn customer_remove_from_group(
        &self,
        email: &str,
        group_id: &str,
    ) -> SwuResult<SwuResponse> {
        self.call(remove_from_group_op(email, group_id))
    }
}

impl BatchClient {
    /// Record a customer create/update.
    pub fn customer_create(&mut self, email: &str, data: Option<Payload>) -> SwuResult<()> {
        self.record(create_op(email, data))
    }

    /// Record a customer profile fetch.
    pub fn customer_details(&mut self, email: &str) -> SwuResult<()> {
        self.record(details_op(email))
    }

    /// Record a customer deletion.
    pub fn customer_delete(&mut self, email: &str) -> SwuResult<()> {
        self.record(delete_op(email))
    }

    /// Record a conversion event.
    pub fn customer_conversion(&mut self, email: &str, revenue: Option<Decimal>) -> SwuResult<()> {
        self.record(conversion_op(email, revenue))
    }

    /// Record adding a customer to a group.
    pub fn customer_add_to_group(&mut self, email: &str, group_id: &str) -> SwuResult<()> {
        self.record(add_to_group_op(email, group_id))
    }

    /// Record removing a customer from a group.
    pub fn customer_remove_from_group(&mut self, email: &str, group_id: &str) -> SwuResult<()> {
        self.record(remove_from_group_op(email, group_id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::encoder::{encode_payload, JsonPayloadEncoder};
    use crate::http::{HttpMethod, OperationBody};

    #[test]
    fn create_merges_email_into_the_data() {
        let operation = create_op(
            "user@example.com",
            Some(Payload::new().field("first_name", "Ada")),
        );
        assert_eq!(operation.endpoint, "customers");
        let payload = match &operation.body {
            OperationBody::Payload(p) => p,
            other => panic!("expected payload body, got {other:?}"),
        };
        let encoded = encode_payload(&JsonPayloadEncoder, payload).unwrap();
        assert_eq!(encoded["first_name"], "Ada");
        assert_eq!(encoded["email"], "user@example.com");
    }

    #[test]
    fn conversion_without_revenue_posts_no_body() {
        let operation = conversion_op("user@example.com", None);
        assert_eq!(operation.endpoint, "customers/user@example.com/conversions");
        assert_eq!(operation.method, HttpMethod::Post);
        // The empty payload is suppressed at build time.
        match &operation.body {
            OperationBody::Payload(p) => assert!(p.is_empty()),
            other => panic!("expected payload body, got {other:?}"),
        }
    }

    #[test]
    fn conversion_revenue_survives_as_a_number() {
        let operation = conversion_op("user@example.com", Some(Decimal::new(1999, 2)));
        let payload = match &operation.body {
            OperationBody::Payload(p) => p,
            other => panic!("expected payload body, got {other:?}"),
        };
        let encoded = encode_payload(&JsonPayloadEncoder, payload).unwrap();
        assert_eq!(encoded["revenue"], 19.99);
    }

    #[test]
    fn group_membership_paths() {
        assert_eq!(
            add_to_group_op("a@b.c", "grp_1").endpoint,
            "customers/a@b.c/groups/grp_1"
        );
        let remove = remove_from_group_op("a@b.c", "grp_1");
        assert_eq!(remove.endpoint, "customers/a@b.c/groups/grp_1");
        assert_eq!(remove.method, HttpMethod::Delete);
    }
}
