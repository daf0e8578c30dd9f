use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::ChannelError;

/// Payload type for keep-alive messages on a persistent transport.
pub const PAYLOAD_TYPE_KEEPALIVE: &str = "keepalive";
/// Payload type for sensor channel data.
pub const PAYLOAD_TYPE_CHANNELS: &str = "channels";
/// Payload type for module connection events.
pub const PAYLOAD_TYPE_CONNECTION: &str = "connection";

/// The JSON envelope exchanged with the platform in both directions.
///
/// `kind` (wire name `type`) stays a plain string rather than an enum so a
/// payload with a kind the platform introduced after this crate shipped still
/// decodes; it then classifies as none of the three known kinds.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Payload {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub datetime: Option<DateTime<Utc>>,
    #[serde(default)]
    pub module: String,
    #[serde(default)]
    pub payload: InnerPayload,
    #[serde(rename = "type", default)]
    pub kind: String,
}

/// Inner container for the channel sequence. Insertion order is meaningful:
/// it is the order the sender appended values.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct InnerPayload {
    #[serde(default)]
    pub channels: Vec<Channel>,
}

impl Payload {
    /// New outgoing payload for `module` with `kind = channels` and an empty
    /// channel sequence.
    pub fn new(module: impl Into<String>) -> Self {
        Payload {
            datetime: None,
            module: module.into(),
            payload: InnerPayload::default(),
            kind: PAYLOAD_TYPE_CHANNELS.to_string(),
        }
    }

    pub fn is_keep_alive(&self) -> bool {
        self.kind == PAYLOAD_TYPE_KEEPALIVE
    }

    pub fn is_channel_value(&self) -> bool {
        self.kind == PAYLOAD_TYPE_CHANNELS
    }

    pub fn is_connection(&self) -> bool {
        self.kind == PAYLOAD_TYPE_CONNECTION
    }

    fn add_channel(&mut self, c: Channel) {
        self.payload.channels.push(c);
    }

    /// Append an int32 value to the given channel.
    pub fn add_int(&mut self, channel: i64, value: i32) {
        let mut c = Channel::new(channel);
        c.set_int(value);
        self.add_channel(c);
    }

    /// Append a uint32 value to the given channel.
    pub fn add_uint(&mut self, channel: i64, value: u32) {
        let mut c = Channel::new(channel);
        c.set_uint(value);
        self.add_channel(c);
    }

    /// Append an int64 value to the given channel.
    pub fn add_int64(&mut self, channel: i64, value: i64) {
        let mut c = Channel::new(channel);
        c.set_int64(value);
        self.add_channel(c);
    }

    /// Append a uint64 value to the given channel.
    pub fn add_uint64(&mut self, channel: i64, value: u64) {
        let mut c = Channel::new(channel);
        c.set_uint64(value);
        self.add_channel(c);
    }

    /// Append a float32 value to the given channel.
    pub fn add_float(&mut self, channel: i64, value: f32) {
        let mut c = Channel::new(channel);
        c.set_float(value);
        self.add_channel(c);
    }

    /// Append a float64 value to the given channel.
    pub fn add_double(&mut self, channel: i64, value: f64) {
        let mut c = Channel::new(channel);
        c.set_double(value);
        self.add_channel(c);
    }

    /// Append a hex-string value (16 hex characters per set) to the given
    /// channel.
    pub fn add_hex_string(&mut self, channel: i64, value: impl Into<String>) {
        let mut c = Channel::new(channel);
        c.set_hex_string(value);
        self.add_channel(c);
    }

    /// Remove every appended value, keeping `module` and `kind`.
    pub fn clear_values(&mut self) {
        self.payload.channels.clear();
    }
}

/// One typed sensor reading: the stored variant *is* the wire type tag, so
/// tag and value can never disagree once set.
#[derive(Debug, Clone, PartialEq)]
pub enum ChannelValue {
    /// Tag `i`.
    Int(i32),
    /// Tag `I`.
    Uint(u32),
    /// Tag `l`.
    Int64(i64),
    /// Tag `L`.
    Uint64(u64),
    /// Tag `f`.
    Float(f32),
    /// Tag `d`.
    Double(f64),
    /// Tag `b`, 16 hex characters per set.
    HexString(String),
    /// A wire value that is neither a number nor a string (bool, array or
    /// object), kept verbatim. Never produced by the setters; every typed
    /// accessor fails with a type mismatch, distinguishing a malformed value
    /// from one that was never set.
    Opaque(Value),
}

impl ChannelValue {
    /// The one-character wire tag for this variant.
    pub fn type_tag(&self) -> &'static str {
        match self {
            ChannelValue::Int(_) => "i",
            ChannelValue::Uint(_) => "I",
            ChannelValue::Int64(_) => "l",
            ChannelValue::Uint64(_) => "L",
            ChannelValue::Float(_) => "f",
            ChannelValue::Double(_) => "d",
            ChannelValue::HexString(_) => "b",
            ChannelValue::Opaque(_) => "",
        }
    }

    fn as_f64(&self) -> Option<f64> {
        match self {
            ChannelValue::Int(v) => Some(f64::from(*v)),
            ChannelValue::Uint(v) => Some(f64::from(*v)),
            ChannelValue::Int64(v) => Some(*v as f64),
            ChannelValue::Uint64(v) => Some(*v as f64),
            ChannelValue::Float(v) => Some(f64::from(*v)),
            ChannelValue::Double(v) => Some(*v),
            ChannelValue::HexString(_) | ChannelValue::Opaque(_) => None,
        }
    }
}

/// One entry of a channels payload: an integer channel id plus an optional
/// typed value and an optional platform-assigned arrival time.
///
/// Numeric accessors are deliberately lenient: any numeric accessor reads any
/// numeric variant, truncating or widening through `f64` to the requested
/// width. A reader may ask for a narrower or wider type than was sent; only
/// the number-versus-string representation kind is enforced.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(from = "ChannelWire", into = "ChannelWire")]
pub struct Channel {
    pub channel: i64,
    value: Option<ChannelValue>,
    pub datetime: Option<DateTime<Utc>>,
}

impl Channel {
    /// New channel entry with no value set.
    pub fn new(channel: i64) -> Self {
        Channel {
            channel,
            value: None,
            datetime: None,
        }
    }

    /// The stored value, if any.
    pub fn value(&self) -> Option<&ChannelValue> {
        self.value.as_ref()
    }

    /// The one-character wire tag, or `""` when no value is set.
    pub fn type_tag(&self) -> &'static str {
        self.value.as_ref().map_or("", ChannelValue::type_tag)
    }

    fn numeric(&self) -> Result<f64, ChannelError> {
        match &self.value {
            None => Err(ChannelError::ValueNil),
            Some(v) => v.as_f64().ok_or_else(ChannelError::not_a_number),
        }
    }

    /// Read the value as int32, truncating if it was stored wider.
    pub fn get_int(&self) -> Result<i32, ChannelError> {
        match self.value {
            Some(ChannelValue::Int(v)) => Ok(v),
            _ => self.numeric().map(|f| f as i32),
        }
    }

    /// Read the value as uint32, truncating if it was stored wider.
    pub fn get_uint(&self) -> Result<u32, ChannelError> {
        match self.value {
            Some(ChannelValue::Uint(v)) => Ok(v),
            _ => self.numeric().map(|f| f as u32),
        }
    }

    /// Read the value as int64.
    pub fn get_int64(&self) -> Result<i64, ChannelError> {
        match self.value {
            Some(ChannelValue::Int64(v)) => Ok(v),
            _ => self.numeric().map(|f| f as i64),
        }
    }

    /// Read the value as uint64.
    pub fn get_uint64(&self) -> Result<u64, ChannelError> {
        match self.value {
            Some(ChannelValue::Uint64(v)) => Ok(v),
            _ => self.numeric().map(|f| f as u64),
        }
    }

    /// Read the value as float32.
    pub fn get_float(&self) -> Result<f32, ChannelError> {
        match self.value {
            Some(ChannelValue::Float(v)) => Ok(v),
            _ => self.numeric().map(|f| f as f32),
        }
    }

    /// Read the value as float64.
    pub fn get_double(&self) -> Result<f64, ChannelError> {
        match self.value {
            Some(ChannelValue::Double(v)) => Ok(v),
            _ => self.numeric(),
        }
    }

    /// Read the value as a hex string.
    pub fn get_hex_string(&self) -> Result<String, ChannelError> {
        match &self.value {
            None => Err(ChannelError::ValueNil),
            Some(ChannelValue::HexString(s)) => Ok(s.clone()),
            Some(_) => Err(ChannelError::not_a_hex_string()),
        }
    }

    pub fn set_int(&mut self, v: i32) {
        self.value = Some(ChannelValue::Int(v));
    }

    pub fn set_uint(&mut self, v: u32) {
        self.value = Some(ChannelValue::Uint(v));
    }

    pub fn set_int64(&mut self, v: i64) {
        self.value = Some(ChannelValue::Int64(v));
    }

    pub fn set_uint64(&mut self, v: u64) {
        self.value = Some(ChannelValue::Uint64(v));
    }

    pub fn set_float(&mut self, v: f32) {
        self.value = Some(ChannelValue::Float(v));
    }

    pub fn set_double(&mut self, v: f64) {
        self.value = Some(ChannelValue::Double(v));
    }

    pub fn set_hex_string(&mut self, v: impl Into<String>) {
        self.value = Some(ChannelValue::HexString(v.into()));
    }
}

/// Raw wire shape of a channel entry. The decoded representation follows the
/// JSON value kind, not the tag: a string is stored as a hex string whatever
/// the tag says, a number is narrowed to the tag's width (unknown tags fall
/// back to float64), and anything else non-null is kept as an opaque value.
/// Tag/value mismatches therefore never fail decode; they fail later, in the
/// accessor whose kind does not match. Only a JSON null decodes as unset.
#[derive(Serialize, Deserialize)]
struct ChannelWire {
    channel: i64,
    #[serde(rename = "type", default)]
    type_tag: String,
    #[serde(default)]
    value: Value,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    datetime: Option<DateTime<Utc>>,
}

impl From<ChannelWire> for Channel {
    fn from(w: ChannelWire) -> Self {
        let value = match w.value {
            Value::Null => None,
            Value::String(s) => Some(ChannelValue::HexString(s)),
            Value::Number(n) => {
                let f = n.as_f64().unwrap_or_default();
                Some(match w.type_tag.as_str() {
                    "i" => ChannelValue::Int(f as i32),
                    "I" => ChannelValue::Uint(f as u32),
                    "l" => ChannelValue::Int64(f as i64),
                    "L" => ChannelValue::Uint64(f as u64),
                    "f" => ChannelValue::Float(f as f32),
                    _ => ChannelValue::Double(f),
                })
            }
            other => Some(ChannelValue::Opaque(other)),
        };

        Channel {
            channel: w.channel,
            value,
            datetime: w.datetime,
        }
    }
}

impl From<Channel> for ChannelWire {
    fn from(c: Channel) -> Self {
        let (type_tag, value) = match c.value {
            None => (String::new(), Value::Null),
            Some(v) => {
                let tag = v.type_tag().to_string();
                let value = match v {
                    ChannelValue::Int(v) => Value::from(v),
                    ChannelValue::Uint(v) => Value::from(v),
                    ChannelValue::Int64(v) => Value::from(v),
                    ChannelValue::Uint64(v) => Value::from(v),
                    ChannelValue::Float(v) => Value::from(v),
                    ChannelValue::Double(v) => Value::from(v),
                    ChannelValue::HexString(s) => Value::String(s),
                    ChannelValue::Opaque(v) => v,
                };
                (tag, value)
            }
        };

        ChannelWire {
            channel: c.channel,
            type_tag,
            value,
            datetime: c.datetime,
        }
    }
}
