//! Payload encoding.
//!
//! The encoder is a pluggable strategy: one method turning a
//! [`PayloadValue`] into a wire-ready JSON value. The default,
//! [`JsonPayloadEncoder`], applies the service's encoding rules:
//!
//! - timestamps collapse to integer seconds since epoch, computed from the
//!   value's own calendar fields with no timezone normalization
//! - decimals collapse to the nearest double-precision float
//! - raw bytes become base64 strings
//! - sequences and mappings recurse, mappings keeping insertion order
//!
//! Values with no JSON representation (non-finite floats, decimals outside
//! the f64 range) fail with [`SwuError::Encoding`] and are never silently
//! dropped. A replacement encoder can be installed at config-build time via
//! [`SwuConfigBuilder::encoder`](crate::config::SwuConfigBuilder::encoder).

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;
use rust_decimal::prelude::ToPrimitive;
use serde_json::{Map, Number, Value};

use crate::error::{SwuError, SwuResult};
use crate::types::{Payload, PayloadValue};

/// Strategy for converting payload values to wire-ready JSON.
///
/// Implementations must be pure: same input, same output, no side effects.
pub trait PayloadEncoder: Send + Sync {
    /// Encode one payload value into a JSON value.
    ///
    /// # Errors
    ///
    /// Returns [`SwuError::Encoding`] when the value has no representation
    /// under this encoder's rules.
    fn encode(&self, value: &PayloadValue) -> SwuResult<Value>;
}

/// Encode a whole payload mapping through the given encoder.
///
/// Each field value goes through [`PayloadEncoder::encode`]; field order is
/// preserved.
pub fn encode_payload(encoder: &dyn PayloadEncoder, payload: &Payload) -> SwuResult<Value> {
    let mut map = Map::with_capacity(payload.len());
    for (name, value) in payload.iter() {
        map.insert(name.to_string(), encoder.encode(value)?);
    }
    Ok(Value::Object(map))
}

/// The default payload encoder.
///
/// # Examples
///
/// ```rust
/// use chrono::NaiveDate;
/// use sendwithus::encoder::{JsonPayloadEncoder, PayloadEncoder};
/// use sendwithus::types::PayloadValue;
///
/// let encoder = JsonPayloadEncoder;
/// let midnight = NaiveDate::from_ymd_opt(2023, 1, 1)
///     .unwrap()
///     .and_hms_opt(0, 0, 0)
///     .unwrap();
///
/// let encoded = encoder.encode(&PayloadValue::Timestamp(midnight)).unwrap();
/// assert_eq!(encoded, serde_json::json!(1672531200));
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonPayloadEncoder;

impl PayloadEncoder for JsonPayloadEncoder {
    fn encode(&self, value: &PayloadValue) -> SwuResult<Value> {
        match value {
            PayloadValue::Null => Ok(Value::Null),
            PayloadValue::Bool(b) => Ok(Value::Bool(*b)),
            PayloadValue::Integer(i) => Ok(Value::Number(Number::from(*i))),
            PayloadValue::Float(f) => {
                Number::from_f64(*f)
                    .map(Value::Number)
                    .ok_or_else(|| SwuError::Encoding {
                        message: format!("float {f} is not representable in JSON"),
                    })
            }
            PayloadValue::String(s) => Ok(Value::String(s.clone())),
            PayloadValue::Bytes(data) => Ok(Value::String(BASE64.encode(data))),
            PayloadValue::Decimal(d) => {
                // Nearest f64, matching the wire contract for decimal fields.
                d.to_f64()
                    .and_then(Number::from_f64)
                    .map(Value::Number)
                    .ok_or_else(|| SwuError::Encoding {
                        message: format!("decimal {d} is not representable as a float"),
                    })
            }
            PayloadValue::Timestamp(ts) => {
                // Calendar fields taken as-is; no timezone shift is applied.
                Ok(Value::Number(Number::from(ts.and_utc().timestamp())))
            }
            PayloadValue::Sequence(items) => {
                let mut encoded = Vec::with_capacity(items.len());
                for item in items {
                    encoded.push(self.encode(item)?);
                }
                Ok(Value::Array(encoded))
            }
            PayloadValue::Mapping(payload) => encode_payload(self, payload),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use rust_decimal::Decimal;
    use std::str::FromStr;

    fn encode(value: &PayloadValue) -> SwuResult<Value> {
        JsonPayloadEncoder.encode(value)
    }

    #[test]
    fn timestamp_encodes_to_epoch_seconds() {
        let dt = NaiveDate::from_ymd_opt(2013, 3, 12)
            .unwrap()
            .and_hms_opt(11, 2, 0)
            .unwrap();
        let encoded = encode(&PayloadValue::Timestamp(dt)).unwrap();
        assert_eq!(encoded, serde_json::json!(dt.and_utc().timestamp()));
        // No timezone shift: epoch seconds come straight from the fields.
        assert_eq!(encoded, serde_json::json!(1363086120));
    }

    #[test]
    fn decimal_encodes_to_nearest_float() {
        let d = Decimal::from_str("5.5").unwrap();
        let encoded = encode(&PayloadValue::Decimal(d)).unwrap();
        assert_eq!(encoded.as_f64(), Some(5.5));
    }

    #[test]
    fn high_precision_decimal_rounds_to_f64() {
        let d = Decimal::from_str("0.1234567890123456789").unwrap();
        let encoded = encode(&PayloadValue::Decimal(d)).unwrap();
        let f = encoded.as_f64().unwrap();
        assert!((f - 0.123_456_789_012_345_68).abs() < 1e-15);
    }

    #[test]
    fn non_finite_float_is_an_encoding_error() {
        let err = encode(&PayloadValue::Float(f64::NAN)).unwrap_err();
        assert!(matches!(err, SwuError::Encoding { .. }));

        let err = encode(&PayloadValue::Float(f64::INFINITY)).unwrap_err();
        assert!(matches!(err, SwuError::Encoding { .. }));
    }

    #[test]
    fn bytes_encode_to_base64() {
        let encoded = encode(&PayloadValue::bytes(b"hello".to_vec())).unwrap();
        assert_eq!(encoded, serde_json::json!("aGVsbG8="));
    }

    #[test]
    fn nested_values_encode_recursively() {
        let dt = NaiveDate::from_ymd_opt(2020, 6, 1)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap();
        let payload = Payload::new()
            .field("name", "test")
            .field(
                "inner",
                Payload::new()
                    .field("when", dt)
                    .field("amount", Decimal::from_str("2.25").unwrap()),
            )
            .field("tags", vec!["a", "b"]);

        let encoded = encode_payload(&JsonPayloadEncoder, &payload).unwrap();
        assert_eq!(
            encoded,
            serde_json::json!({
                "name": "test",
                "inner": {
                    "when": dt.and_utc().timestamp(),
                    "amount": 2.25,
                },
                "tags": ["a", "b"],
            })
        );
    }

    #[test]
    fn nested_encoding_error_propagates() {
        let payload = Payload::new().field(
            "inner",
            Payload::new().field("bad", f64::NEG_INFINITY),
        );
        let err = encode_payload(&JsonPayloadEncoder, &payload).unwrap_err();
        assert!(matches!(err, SwuError::Encoding { .. }));
    }

    #[test]
    fn mapping_preserves_field_order_on_the_wire() {
        let payload = Payload::new()
            .field("zebra", 1)
            .field("apple", 2)
            .field("mango", 3);
        let encoded = encode_payload(&JsonPayloadEncoder, &payload).unwrap();
        let wire = serde_json::to_string(&encoded).unwrap();
        assert_eq!(wire, r#"{"zebra":1,"apple":2,"mango":3}"#);
    }

    #[test]
    fn custom_encoder_can_replace_the_rules() {
        // A replacement strategy that renders timestamps as RFC 3339 strings.
        struct StringTimestamps;

        impl PayloadEncoder for StringTimestamps {
            fn encode(&self, value: &PayloadValue) -> SwuResult<Value> {
                match value {
                    PayloadValue::Timestamp(ts) => {
                        Ok(Value::String(ts.format("%Y-%m-%dT%H:%M:%S").to_string()))
                    }
                    other => JsonPayloadEncoder.encode(other),
                }
            }
        }

        let dt = NaiveDate::from_ymd_opt(2023, 1, 1)
            .unwrap()
            .and_hms_opt(12, 30, 0)
            .unwrap();
        let encoded = StringTimestamps.encode(&PayloadValue::Timestamp(dt)).unwrap();
        assert_eq!(encoded, serde_json::json!("2023-01-01T12:30:00"));
    }
}
