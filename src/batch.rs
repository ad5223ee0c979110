//! Batched requests.
//!
//! A [`BatchClient`] intercepts operations instead of sending them: each
//! operation method records a lightweight command (relative path, verb,
//! and the payload encoded at record time) onto an ordered queue, and
//! returns immediately without touching the network. [`BatchClient::execute`]
//! then sends the whole queue as one JSON array in a single POST to the
//! `batch` endpoint and hands back the multiplexed response, one result per
//! command in submission order.
//!
//! Queues are independent: every call to
//! [`SwuClient::start_batch`](crate::SwuClient::start_batch) creates a
//! queue with its own command list, and an executed queue is empty and
//! ready for reuse. Recording takes `&mut self`, so sharing one queue
//! across threads is a compile error rather than a data race.
//!
//! # Example
//!
//! ```rust,no_run
//! use sendwithus::SwuClient;
//!
//! # fn example() -> Result<(), sendwithus::SwuError> {
//! let client = SwuClient::with_api_key("live_abc123")?;
//! let mut batch = client.start_batch();
//!
//! batch.customer_create("one@example.com", None)?;
//! batch.customer_create("two@example.com", None)?;
//! assert_eq!(batch.command_length(), 2);
//!
//! let response = batch.execute()?;
//! let results = response.batch_results()?;
//! assert_eq!(results.len(), 2);
//! assert_eq!(batch.command_length(), 0);
//! # Ok(())
//! # }
//! ```

use std::sync::Arc;

use serde::Serialize;
use tracing::debug;

use crate::config::SwuConfig;
use crate::encoder::encode_payload;
use crate::error::{classify_status, SwuError, SwuResult};
use crate::http::{build_request, HttpMethod, Operation, OperationBody, SwuResponse, Transport};
use crate::types::Payload;

/// Endpoint accepting a batch of sub-requests.
const BATCH_ENDPOINT: &str = "batch";

/// One recorded operation, as it appears in the batch request array.
#[derive(Debug, Clone, Serialize)]
pub(crate) struct Command {
    path: String,
    method: HttpMethod,
    #[serde(skip_serializing_if = "Option::is_none")]
    body: Option<serde_json::Value>,
}

/// A queue of deferred operations, executed as one multiplexed request.
///
/// Created by [`SwuClient::start_batch`](crate::SwuClient::start_batch).
/// All the operation methods available on the client are mirrored here
/// (defined alongside them in [`crate::services`]) but return
/// `SwuResult<()>`: they record and return immediately.
pub struct BatchClient {
    config: Arc<SwuConfig>,
    transport: Arc<dyn Transport>,
    commands: Vec<Command>,
}

impl BatchClient {
    pub(crate) fn new(config: Arc<SwuConfig>, transport: Arc<dyn Transport>) -> Self {
        Self {
            config,
            transport,
            commands: Vec::new(),
        }
    }

    /// Number of commands currently queued.
    ///
    /// Zero for a fresh queue, incremented by one per recorded operation,
    /// and back to zero after a successful [`execute`](Self::execute).
    pub fn command_length(&self) -> usize {
        self.commands.len()
    }

    /// Record a request to an arbitrary endpoint.
    ///
    /// The batch wire format carries no per-command headers or timeouts,
    /// so unlike [`SwuClient::api_request`](crate::SwuClient::api_request)
    /// this takes only an optional payload.
    pub fn api_request(
        &mut self,
        endpoint: &str,
        method: HttpMethod,
        payload: Option<Payload>,
    ) -> SwuResult<()> {
        let mut operation = Operation::new(method, endpoint);
        if let Some(payload) = payload {
            operation = operation.with_payload(payload);
        }
        self.record(operation)
    }

    /// Record one operation as a command.
    ///
    /// The payload is encoded now, so an encoding error surfaces at the
    /// call site rather than at execute time; the body rules match direct
    /// execution (GET/DELETE and empty payloads carry none).
    pub(crate) fn record(&mut self, operation: Operation) -> SwuResult<()> {
        let path = self.config.relative_path(&operation.endpoint);
        let body = match &operation.body {
            OperationBody::None => None,
            OperationBody::Payload(payload) => {
                if operation.method.allows_body() && !payload.is_empty() {
                    Some(encode_payload(self.config.encoder.as_ref(), payload)?)
                } else {
                    None
                }
            }
            OperationBody::Raw(bytes) => {
                Some(
                    serde_json::from_slice(bytes).map_err(|e| SwuError::Serialization {
                        message: format!("raw command body is not valid JSON: {e}"),
                    })?,
                )
            }
        };

        debug!(
            method = operation.method.as_str(),
            path = %path,
            queued = self.commands.len() + 1,
            "recording batch command"
        );
        self.commands.push(Command {
            path,
            method: operation.method,
            body,
        });
        Ok(())
    }

    /// Execute every queued command as one request.
    ///
    /// Commands are serialized as a JSON array in submission order and
    /// POSTed to the batch endpoint; the response carries one result per
    /// command in the same order (see
    /// [`SwuResponse::batch_results`](crate::http::SwuResponse::batch_results)).
    /// On success the queue is cleared and reusable. An empty queue still
    /// executes, producing an empty result list.
    ///
    /// # Errors
    ///
    /// Transport failures leave the queue intact so it can be re-executed;
    /// with `raise_errors(true)` the same holds for classified HTTP errors.
    pub fn execute(&mut self) -> SwuResult<SwuResponse> {
        let body = serde_json::to_vec(&self.commands).map_err(|e| SwuError::Serialization {
            message: format!("failed to serialize batch commands: {e}"),
        })?;
        let operation = Operation::post(BATCH_ENDPOINT).with_raw_body(body);
        let request = build_request(&self.config, &operation)?;

        debug!(commands = self.commands.len(), "executing batch");
        let response = self.transport.execute(request)?;

        if self.config.raise_errors {
            if let Some(error) = classify_status(response.status(), response.body()) {
                return Err(error);
            }
        }

        self.commands.clear();
        Ok(response)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::SwuClient;
    use crate::http::transport::MockTransport;
    use http::StatusCode;
    use std::collections::HashMap;

    fn ok_response(body: &[u8]) -> SwuResponse {
        SwuResponse::new(StatusCode::OK, HashMap::new(), body.to_vec())
    }

    fn mock_client(transport: MockTransport) -> SwuClient {
        let config = SwuConfig::builder().api_key("TEST_KEY").build().unwrap();
        SwuClient::with_transport(config, Arc::new(transport))
    }

    #[test]
    fn queue_depth_tracks_records_and_resets_on_execute() {
        let mut transport = MockTransport::new();
        transport
            .expect_execute()
            .times(1)
            .returning(|_| Ok(ok_response(b"[]")));

        let client = mock_client(transport);
        let mut batch = client.start_batch();
        assert_eq!(batch.command_length(), 0);

        for i in 0..7 {
            batch
                .customer_create(&format!("user+{i}@example.com"), None)
                .unwrap();
            assert_eq!(batch.command_length(), i + 1);
        }

        batch.execute().unwrap();
        assert_eq!(batch.command_length(), 0);
    }

    #[test]
    fn empty_batch_still_executes() {
        let mut transport = MockTransport::new();
        transport
            .expect_execute()
            .times(1)
            .withf(|request| request.body() == Some(b"[]".as_slice()))
            .returning(|_| Ok(ok_response(b"[]")));

        let client = mock_client(transport);
        let mut batch = client.start_batch();

        let response = batch.execute().unwrap();
        assert!(response.batch_results().unwrap().is_empty());
        assert_eq!(batch.command_length(), 0);
    }

    #[test]
    fn commands_are_serialized_in_submission_order() {
        let mut transport = MockTransport::new();
        transport
            .expect_execute()
            .times(1)
            .withf(|request| {
                let commands: serde_json::Value =
                    serde_json::from_slice(request.body().unwrap()).unwrap();
                let commands = commands.as_array().unwrap();
                assert_eq!(commands.len(), 3);
                assert_eq!(commands[0]["path"], "/api/v1/customers");
                assert_eq!(commands[0]["method"], "POST");
                assert_eq!(commands[0]["body"]["email"], "first@example.com");
                assert_eq!(commands[1]["body"]["email"], "second@example.com");
                assert_eq!(commands[2]["path"], "/api/v1/customers/third@example.com");
                assert_eq!(commands[2]["method"], "DELETE");
                // GET/DELETE commands carry no body key at all.
                assert!(commands[2].get("body").is_none());
                true
            })
            .returning(|_| {
                Ok(ok_response(
                    br#"[
                        {"status_code": 200, "email": "first@example.com"},
                        {"status_code": 200, "email": "second@example.com"},
                        {"status_code": 200}
                    ]"#,
                ))
            });

        let client = mock_client(transport);
        let mut batch = client.start_batch();
        batch.customer_create("first@example.com", None).unwrap();
        batch.customer_create("second@example.com", None).unwrap();
        batch.customer_delete("third@example.com").unwrap();

        let response = batch.execute().unwrap();
        let results = response.batch_results().unwrap();

        assert_eq!(results.len(), 3);
        assert_eq!(results[0].body["email"], "first@example.com");
        assert_eq!(results[1].body["email"], "second@example.com");
    }

    #[test]
    fn independent_queues_do_not_share_state() {
        let transport = MockTransport::new();
        let client = mock_client(transport);

        let mut batch_one = client.start_batch();
        let mut batch_two = client.start_batch();

        for i in 0..5 {
            batch_one
                .customer_create(&format!("a+{i}@example.com"), None)
                .unwrap();
            batch_two
                .customer_create(&format!("b+{i}@example.com"), None)
                .unwrap();
        }

        assert_eq!(batch_one.command_length(), 5);
        assert_eq!(batch_two.command_length(), 5);
    }

    #[test]
    fn failed_execute_keeps_the_queue_for_retry() {
        let mut transport = MockTransport::new();
        transport
            .expect_execute()
            .times(1)
            .returning(|_| {
                Err(SwuError::Transport {
                    message: "connection refused".to_string(),
                    source: None,
                })
            });
        transport
            .expect_execute()
            .times(1)
            .returning(|_| Ok(ok_response(br#"[{"status_code": 200}]"#)));

        let client = mock_client(transport);
        let mut batch = client.start_batch();
        batch.customer_create("user@example.com", None).unwrap();

        assert!(batch.execute().is_err());
        assert_eq!(batch.command_length(), 1);

        batch.execute().unwrap();
        assert_eq!(batch.command_length(), 0);
    }

    #[test]
    fn recorded_commands_use_the_configured_encoder() {
        use crate::encoder::{JsonPayloadEncoder, PayloadEncoder};
        use crate::types::PayloadValue;
        use chrono::NaiveDate;

        struct StringTimestamps;

        impl PayloadEncoder for StringTimestamps {
            fn encode(&self, value: &PayloadValue) -> SwuResult<serde_json::Value> {
                match value {
                    PayloadValue::Timestamp(ts) => Ok(serde_json::Value::String(
                        ts.format("%Y-%m-%dT%H:%M:%S").to_string(),
                    )),
                    other => JsonPayloadEncoder.encode(other),
                }
            }
        }

        let mut transport = MockTransport::new();
        transport
            .expect_execute()
            .times(1)
            .withf(|request| {
                let commands: serde_json::Value =
                    serde_json::from_slice(request.body().unwrap()).unwrap();
                commands[0]["body"]["signed_up"] == serde_json::json!("2023-01-01T12:30:00")
            })
            .returning(|_| Ok(ok_response(b"[]")));

        let config = SwuConfig::builder()
            .api_key("TEST_KEY")
            .encoder(StringTimestamps)
            .build()
            .unwrap();
        let client = SwuClient::with_transport(config, Arc::new(transport));
        let mut batch = client.start_batch();

        let dt = NaiveDate::from_ymd_opt(2023, 1, 1)
            .unwrap()
            .and_hms_opt(12, 30, 0)
            .unwrap();
        batch
            .customer_create(
                "user@example.com",
                Some(Payload::new().field("signed_up", dt)),
            )
            .unwrap();
        batch.execute().unwrap();
    }

    #[test]
    fn batch_end_to_end_against_a_server() {
        let mut server = mockito::Server::new();
        let results: Vec<serde_json::Value> = (0..10)
            .map(|_| serde_json::json!({"status_code": 200}))
            .collect();
        let mock = server
            .mock("POST", "/api/v1/batch")
            .with_status(200)
            .with_body(serde_json::to_string(&results).unwrap())
            .create();

        let url = url::Url::parse(&server.url()).unwrap();
        let config = SwuConfig::builder()
            .api_key("TEST_KEY")
            .protocol("http")
            .host(url.host_str().unwrap())
            .port(url.port().unwrap())
            .build()
            .unwrap();
        let client = SwuClient::new(config).unwrap();

        let mut batch = client.start_batch();
        for i in 0..10 {
            batch
                .customer_create(
                    &format!("user+{i}@example.com"),
                    Some(Payload::new().field("segment", "Batch Updated Customer")),
                )
                .unwrap();
            assert_eq!(batch.command_length(), i + 1);
        }

        let response = batch.execute().unwrap();
        mock.assert();

        let results = response.batch_results().unwrap();
        assert_eq!(results.len(), 10);
        assert!(results.iter().all(|r| r.status_code == 200));
        assert_eq!(batch.command_length(), 0);
    }
}
