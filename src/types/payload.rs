//! Request payload model.
//!
//! API request bodies are ordered mappings from field name to value. The
//! value space is closed: JSON primitives, nested sequences and mappings,
//! raw binary (sent as base64), arbitrary-precision decimals, and
//! timezone-free timestamps. The encoder decides how the exotic members
//! collapse to wire scalars; see [`crate::encoder`].

use chrono::NaiveDateTime;
use rust_decimal::Decimal;

/// A single value in a request payload.
///
/// The two "exotic" members are [`Timestamp`](PayloadValue::Timestamp),
/// which the default encoder collapses to integer seconds since epoch, and
/// [`Decimal`](PayloadValue::Decimal), which collapses to the nearest f64.
/// [`Bytes`](PayloadValue::Bytes) is sent as a base64 string.
#[derive(Debug, Clone, PartialEq)]
pub enum PayloadValue {
    /// JSON null.
    Null,
    /// Boolean.
    Bool(bool),
    /// Integer.
    Integer(i64),
    /// Floating-point number. Must be finite to be encodable.
    Float(f64),
    /// UTF-8 string.
    String(String),
    /// Raw binary, encoded as a base64 string on the wire.
    Bytes(Vec<u8>),
    /// Arbitrary-precision decimal.
    Decimal(Decimal),
    /// Timezone-free timestamp; its calendar fields are taken as-is.
    Timestamp(NaiveDateTime),
    /// Ordered sequence of values.
    Sequence(Vec<PayloadValue>),
    /// Nested ordered mapping.
    Mapping(Payload),
}

impl PayloadValue {
    /// Wrap raw binary data.
    ///
    /// A named constructor instead of a `From` impl so that `Vec<u8>` is
    /// not silently swallowed by the generic sequence conversion.
    pub fn bytes(data: impl Into<Vec<u8>>) -> Self {
        PayloadValue::Bytes(data.into())
    }
}

impl From<bool> for PayloadValue {
    fn from(v: bool) -> Self {
        PayloadValue::Bool(v)
    }
}

impl From<i32> for PayloadValue {
    fn from(v: i32) -> Self {
        PayloadValue::Integer(i64::from(v))
    }
}

impl From<i64> for PayloadValue {
    fn from(v: i64) -> Self {
        PayloadValue::Integer(v)
    }
}

impl From<u32> for PayloadValue {
    fn from(v: u32) -> Self {
        PayloadValue::Integer(i64::from(v))
    }
}

impl From<f64> for PayloadValue {
    fn from(v: f64) -> Self {
        PayloadValue::Float(v)
    }
}

impl From<&str> for PayloadValue {
    fn from(v: &str) -> Self {
        PayloadValue::String(v.to_string())
    }
}

impl From<String> for PayloadValue {
    fn from(v: String) -> Self {
        PayloadValue::String(v)
    }
}

impl From<Decimal> for PayloadValue {
    fn from(v: Decimal) -> Self {
        PayloadValue::Decimal(v)
    }
}

impl From<NaiveDateTime> for PayloadValue {
    fn from(v: NaiveDateTime) -> Self {
        PayloadValue::Timestamp(v)
    }
}

impl From<Payload> for PayloadValue {
    fn from(v: Payload) -> Self {
        PayloadValue::Mapping(v)
    }
}

impl<T: Into<PayloadValue>> From<Vec<T>> for PayloadValue {
    fn from(v: Vec<T>) -> Self {
        PayloadValue::Sequence(v.into_iter().map(Into::into).collect())
    }
}

/// An ordered request payload.
///
/// Field order is insertion order and survives all the way to the wire.
/// Built fresh per call and treated as immutable once handed to the
/// encoder.
///
/// # Examples
///
/// ```rust
/// use sendwithus::types::Payload;
///
/// let payload = Payload::new()
///     .field("first_name", "Ada")
///     .field("visits", 3);
///
/// assert_eq!(payload.len(), 2);
/// assert!(!payload.is_empty());
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Payload {
    fields: Vec<(String, PayloadValue)>,
}

impl Payload {
    /// Create an empty payload.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a field, consuming and returning the payload for chaining.
    pub fn field(mut self, name: impl Into<String>, value: impl Into<PayloadValue>) -> Self {
        self.insert(name, value);
        self
    }

    /// Append a field in place.
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<PayloadValue>) {
        self.fields.push((name.into(), value.into()));
    }

    /// Number of fields.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// True when the payload has no fields.
    ///
    /// An empty payload on a POST or PUT suppresses the request body
    /// entirely, the same as passing no payload at all.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Iterate fields in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &PayloadValue)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v))
    }
}
