// Wire-format data model
// Payload envelope and typed channel values

pub mod payload;

pub use payload::{
    Channel, ChannelValue, InnerPayload, Payload, PAYLOAD_TYPE_CHANNELS, PAYLOAD_TYPE_CONNECTION,
    PAYLOAD_TYPE_KEEPALIVE,
};
